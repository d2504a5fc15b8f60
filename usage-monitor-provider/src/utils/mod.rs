//! Utility modules.

/// Timestamp formatting for analytics filters.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
