use std::env;
use std::path::PathBuf;

use taskdeck_core::{AppError, AppResult};
use url::Url;

/// Storage key the session record is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "authState";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_base_url: String,
    pub state_dir: PathBuf,
    pub storage_key: String,
    pub http_timeout_secs: u64,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        let api_base_url = env::var("TASKDECK_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_owned());
        let api_base_url = validate_base_url(api_base_url.as_str())?;

        let state_dir = env::var("TASKDECK_STATE_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);

        let storage_key = env::var("TASKDECK_STORAGE_KEY")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned());
        if storage_key
            .chars()
            .any(|character| !character.is_ascii_alphanumeric() && character != '_' && character != '-')
        {
            return Err(AppError::Validation(format!(
                "TASKDECK_STORAGE_KEY may only contain letters, digits, '_' and '-', got '{storage_key}'"
            )));
        }

        let http_timeout_secs = parse_env_u64("TASKDECK_HTTP_TIMEOUT_SECS", 15)?;
        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "TASKDECK_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            state_dir,
            storage_key,
            http_timeout_secs,
        })
    }
}

fn validate_base_url(value: &str) -> AppResult<String> {
    let parsed = Url::parse(value).map_err(|error| {
        AppError::Validation(format!("invalid TASKDECK_API_BASE_URL '{value}': {error}"))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "TASKDECK_API_BASE_URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(value.trim_end_matches('/').to_owned())
}

fn default_state_dir() -> PathBuf {
    env::var("HOME")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|home| PathBuf::from(home).join(".taskdeck"))
        .unwrap_or_else(|| PathBuf::from(".taskdeck"))
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_base_url;

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(
            validate_base_url("http://localhost:8000/api/").ok().as_deref(),
            Some("http://localhost:8000/api")
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }
}
