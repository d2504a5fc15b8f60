//! Shared-password session gate
//!
//! The session token is the hex SHA-256 of a per-process random salt followed
//! by the password. It is the same for every login until the process
//! restarts, which invalidates all sessions.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth";

/// Session lifetime advertised to the browser (1 day).
pub const SESSION_MAX_AGE_SECS: i64 = 86_400;

const SALT_LENGTH: usize = 16;

/// Gate in front of the dashboard and the usage API.
pub struct AuthGate {
    salt: [u8; SALT_LENGTH],
    /// `None` when no password is configured.
    token: Option<String>,
}

impl AuthGate {
    /// Creates the gate with a fresh random salt.
    ///
    /// An empty or blank password counts as not configured.
    #[must_use]
    pub fn new(password: Option<&str>) -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        rand::rng().fill_bytes(&mut salt);
        Self::with_salt(password, salt)
    }

    fn with_salt(password: Option<&str>, salt: [u8; SALT_LENGTH]) -> Self {
        let token = password
            .filter(|p| !p.trim().is_empty())
            .map(|p| session_token(&salt, p));
        Self { salt, token }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Checks a session cookie value.
    pub fn is_authorized(&self, cookie: Option<&str>) -> CoreResult<bool> {
        let expected = self.token.as_deref().ok_or(CoreError::MissingPassword)?;
        Ok(cookie.is_some_and(|value| constant_time_eq(value.as_bytes(), expected.as_bytes())))
    }

    /// Verifies `password` and returns the session token to set as cookie.
    pub fn login(&self, password: &str) -> CoreResult<String> {
        let expected = self.token.as_deref().ok_or(CoreError::MissingPassword)?;
        let candidate = session_token(&self.salt, password);
        if constant_time_eq(candidate.as_bytes(), expected.as_bytes()) {
            Ok(candidate)
        } else {
            log::warn!("Login rejected: invalid password");
            Err(CoreError::InvalidPassword)
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

fn session_token(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 比较耗时与内容无关（长度除外）
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
