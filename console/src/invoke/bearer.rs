//! Bearer credential normalization

const BEARER_PREFIX: &str = "Bearer ";

/// Normalize a pasted credential into an `Authorization` header value.
///
/// Surrounding whitespace is dropped and the `Bearer ` prefix is added unless
/// already present. Blank input yields an empty string. Applying this twice
/// gives the same result as applying it once.
pub fn normalize_bearer(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with(BEARER_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", BEARER_PREFIX, trimmed)
    }
}
