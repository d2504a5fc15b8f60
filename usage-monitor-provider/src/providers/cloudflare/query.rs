//! GraphQL Analytics 查询模板

use serde::Serialize;

use crate::types::UsageWindow;
use crate::utils::datetime::to_filter_timestamp;

/// Pages Functions 与 Workers 调用次数（按账户过滤）
pub(crate) const USAGE_QUERY: &str = r"query getBillingMetrics($accountId: String!, $filter: AccountWorkersInvocationsAdaptiveFilter_InputObject) {
  viewer {
    accounts(filter: { accountTag: $accountId }) {
      pagesFunctionsInvocationsAdaptiveGroups(limit: 1000, filter: $filter) { sum { requests } }
      workersInvocationsAdaptive(limit: 10000, filter: $filter) { sum { requests } }
    }
  }
}";

/// GraphQL 请求体
#[derive(Debug, Serialize)]
pub(crate) struct UsageQueryRequest<'a> {
    pub query: &'static str,
    pub variables: UsageQueryVariables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageQueryVariables<'a> {
    pub account_id: &'a str,
    pub filter: DatetimeFilter,
}

#[derive(Debug, Serialize)]
pub(crate) struct DatetimeFilter {
    pub datetime_geq: String,
    pub datetime_leq: String,
}

impl<'a> UsageQueryRequest<'a> {
    pub fn new(account_id: &'a str, window: &UsageWindow) -> Self {
        Self {
            query: USAGE_QUERY,
            variables: UsageQueryVariables {
                account_id,
                filter: DatetimeFilter {
                    datetime_geq: to_filter_timestamp(&window.start),
                    datetime_leq: to_filter_timestamp(&window.end),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UsageWindowKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn request_body_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let window = UsageWindow::ending_at(UsageWindowKind::UtcDay, now);
        let body = serde_json::to_value(UsageQueryRequest::new("acc-1", &window)).unwrap();

        assert_eq!(body["variables"]["accountId"], "acc-1");
        assert_eq!(
            body["variables"]["filter"]["datetime_geq"],
            "2024-03-15T00:00:00.000Z"
        );
        assert_eq!(
            body["variables"]["filter"]["datetime_leq"],
            "2024-03-15T12:00:00.000Z"
        );
        assert!(body["query"].as_str().unwrap().contains("$accountId"));
    }
}
