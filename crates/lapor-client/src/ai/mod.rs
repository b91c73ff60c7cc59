//! AI request builders and response validators. The network call itself
//! happens outside this crate: `narrate request` / `scan request` emit a
//! complete request contract, and the `apply` commands validate the raw
//! JSON the caller brings back before any state changes.

pub mod narrative;
pub mod receipt;

pub const MODEL_ID: &str = "gemini-3-pro-preview";
pub const API_KEY_ENV: &str = "LAPOR_API_KEY";

/// An explicit `--api-key` wins over the environment variable. Neither being
/// set is fine: the transport may hold its own credentials.
pub fn resolve_credential(flag: Option<&str>) -> Option<String> {
    if let Some(key) = flag {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
