//! Cloudflare API 类型定义

use serde::Deserialize;

/// Cloudflare REST API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    /// 部分错误响应不带 `success`，缺省视为未知
    pub success: Option<bool>,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
}

impl<T> CloudflareResponse<T> {
    /// 取第一条错误 (code, message)
    pub fn first_error(&self) -> Option<(String, String)> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| (e.code.to_string(), e.message.clone()))
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

/// Cloudflare Account 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// GraphQL 通用响应
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `data` 字段
#[derive(Debug, Deserialize)]
pub struct UsageData {
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub accounts: Option<Vec<AccountUsage>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUsage {
    pub pages_functions_invocations_adaptive_groups: Option<Vec<SumGroup>>,
    pub workers_invocations_adaptive: Option<Vec<SumGroup>>,
}

#[derive(Debug, Deserialize)]
pub struct SumGroup {
    pub sum: Option<RequestSum>,
}

#[derive(Debug, Deserialize)]
pub struct RequestSum {
    pub requests: Option<u64>,
}

/// 累加所有分组的 `sum.requests`，缺失字段按 0 计
pub fn sum_requests(groups: Option<&[SumGroup]>) -> u64 {
    groups.unwrap_or_default().iter().fold(0_u64, |acc, group| {
        let requests = group.sum.as_ref().and_then(|s| s.requests).unwrap_or(0);
        acc.saturating_add(requests)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_requests_handles_missing_values() {
        let groups: Vec<SumGroup> = serde_json::from_str(
            r#"[{"sum":{"requests":10}},{"sum":null},{"sum":{"requests":null}},{"sum":{"requests":5}}]"#,
        )
        .unwrap();
        assert_eq!(sum_requests(Some(&groups)), 15);
        assert_eq!(sum_requests(Some(&[])), 0);
        assert_eq!(sum_requests(None), 0);
    }

    #[test]
    fn account_without_name_deserializes() {
        let account: CloudflareAccount = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(account.id, "abc");
        assert!(account.name.is_none());
    }

    #[test]
    fn first_error_picks_first_entry() {
        let resp: CloudflareResponse<serde_json::Value> = serde_json::from_str(
            r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"},{"code":1,"message":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(
            resp.first_error(),
            Some(("10000".to_string(), "Authentication error".to_string()))
        );
    }
}
