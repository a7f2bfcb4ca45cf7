use std::env;

use crate::error::FetchError;

/// Environment variable read when `--env` is passed
pub const API_KEY_VAR: &str = "API_KEY";

/// Pick the API key to use
///
/// A key given on the command line always wins. Otherwise the `API_KEY` environment
/// variable is consulted, but only when `use_env` is set.
pub fn resolve_api_key(cli_key: Option<&str>, use_env: bool) -> Result<String, FetchError> {
    resolve_api_key_with(cli_key, use_env, |name| env::var(name).ok())
}

/// Same as [`resolve_api_key`] with the environment lookup supplied by the caller
pub fn resolve_api_key_with<F>(
    cli_key: Option<&str>,
    use_env: bool,
    lookup: F,
) -> Result<String, FetchError>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(key) = cli_key.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    if use_env {
        return lookup(API_KEY_VAR)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                FetchError::MissingCredential(format!(
                    "змінну середовища {API_KEY_VAR} не встановлено"
                ))
            });
    }

    Err(FetchError::MissingCredential(
        "API Key не вказано ні через прапорець, ні через змінну середовища".into(),
    ))
}

/// Hide everything but the last few characters of a key for logging
pub fn mask_key(key: &str) -> String {
    let visible = key.chars().count().saturating_sub(4);
    key.chars()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}
