//! API 凭证

use usage_monitor_provider::mask_secret;

/// Opaque bearer secret for one upstream account grouping.
///
/// Supplied once at configuration time and never mutated. `Debug` output
/// is redacted; use [`masked`](Self::masked) for log lines.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Parses a comma-separated token list.
    ///
    /// Entries are trimmed and empty entries are dropped; order is kept.
    #[must_use]
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    /// The raw secret, for building the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Log-safe form of the secret.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
