//! Log sanitization utilities
//!
//! Keeps API tokens and large upstream payloads out of debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Characters of a secret kept visible on each side by [`mask_secret`].
const MASK_VISIBLE: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the
/// first `TRUNCATE_LIMIT` bytes (on a char boundary) with a suffix carrying
/// the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret so it can be told apart in logs without being revealed.
///
/// `"abcdefghijklmnop"` becomes `"abcd…mnop"`; secrets too short to keep
/// both ends are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= MASK_VISIBLE * 2 {
        return "****".to_string();
    }
    let head: String = chars[..MASK_VISIBLE].iter().collect();
    let tail: String = chars[chars.len() - MASK_VISIBLE..].iter().collect();
    format!("{head}…{tail}")
}
