//! 日期时间格式化工具
//!
//! Cloudflare GraphQL 的 `datetime_geq` / `datetime_leq` 过滤器接受 RFC3339 字符串，
//! 这里统一输出带毫秒、以 `Z` 结尾的 UTC 形式。

use chrono::{DateTime, SecondsFormat, Utc};

/// 格式化为 GraphQL 过滤器使用的时间戳，如 `2024-03-15T00:00:00.000Z`
pub fn to_filter_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
