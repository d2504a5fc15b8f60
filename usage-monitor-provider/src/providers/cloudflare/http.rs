//! Cloudflare HTTP 请求方法

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::{HttpUtils, RawResponse};
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, CloudflareResponse, GraphqlResponse};

impl CloudflareProvider {
    /// 执行 REST GET 请求，返回 `result` 字段（缺失时为 None）
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}{path}", self.base_url);
        let request = self.client.get(&url).bearer_auth(&self.api_token);

        let response = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &url,
            self.max_retries,
        )
        .await?;

        if !response.is_success() {
            return Err(self.rest_failure(&response));
        }

        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;

        if cf_response.success == Some(false) {
            let (code, message) = cf_response
                .first_error()
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            log::error!("[{}] API 错误: {message}", self.provider_name());
            return Err(self.map_error(RawApiError::with_code(code, message), response.status));
        }

        Ok(cf_response.result)
    }

    /// 执行 GraphQL POST 请求，返回 `data` 字段
    ///
    /// 响应中的 `errors` 非空时视为失败，只保留第一条消息。
    pub(crate) async fn post_graphql<T: DeserializeOwned, B: Serialize>(
        &self,
        body: &B,
    ) -> Result<Option<T>> {
        let url = format!("{}/graphql", self.base_url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body);

        let response = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "POST",
            &url,
            self.max_retries,
        )
        .await?;

        if !response.is_success() {
            return Err(self.graphql_failure(&response));
        }

        let gql_response: GraphqlResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;

        if let Some(first) = gql_response.errors.as_ref().and_then(|e| e.first()) {
            log::warn!("[{}] GraphQL 错误: {}", self.provider_name(), first.message);
            return Err(self.query_error(first.message.clone()));
        }

        Ok(gql_response.data)
    }

    /// REST 非 2xx 响应：优先使用响应体中的错误码
    fn rest_failure(&self, response: &RawResponse) -> crate::ProviderError {
        match serde_json::from_str::<CloudflareResponse<serde_json::Value>>(&response.body)
            .ok()
            .and_then(|r| r.first_error())
        {
            Some((code, message)) => {
                self.map_error(RawApiError::with_code(code, message), response.status)
            }
            None => self.status_error(response.status, None),
        }
    }

    /// GraphQL 非 2xx 响应：带上第一条错误消息（若有）
    fn graphql_failure(&self, response: &RawResponse) -> crate::ProviderError {
        let message = serde_json::from_str::<GraphqlResponse<serde_json::Value>>(&response.body)
            .ok()
            .and_then(|r| r.errors)
            .and_then(|errors| errors.into_iter().next())
            .map(|e| e.message);
        self.map_error(RawApiError::new(message.unwrap_or_default()), response.status)
    }
}
