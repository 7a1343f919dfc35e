//! Canonical configuration names
//!
//! API descriptions name headers and security schemes freely
//! (`X-Api-Key`, `apiKeyAuth`). The configuration store is keyed by
//! snake_case names derived deterministically from those.

use heck::ToSnakeCase;

/// Convert an API-description name into its canonical configuration name
///
/// - `_`, `-`, `.`, `/` and spaces act as word separators
/// - other punctuation is dropped
/// - words are split on case boundaries, acronym runs included
///   (`APIKey` becomes `api_key`), lower-cased and joined with `_`
///
/// ```rust
/// use provconf_core::naming::canonical_name;
///
/// assert_eq!(canonical_name("X-Api-Key"), "x_api_key");
/// assert_eq!(canonical_name("apiKeyAuth"), "api_key_auth");
/// assert_eq!(canonical_name("APIKey"), "api_key");
/// ```
pub fn canonical_name(name: &str) -> String {
    let words: String = name
        .chars()
        .filter_map(|c| match c {
            '_' | '-' | '.' | '/' | ' ' => Some('_'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect();
    words.to_snake_case()
}
