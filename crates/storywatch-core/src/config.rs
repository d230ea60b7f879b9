use crate::ConfigError;

/// Application configuration shared by the CLI and the polling engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the dashboard backend.
    pub api_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Poll interval for the general story query, in seconds.
    pub refresh_secs: u64,
    /// Poll interval while hot mode is active, in seconds.
    pub hot_refresh_secs: u64,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every variable has a default, so loading only fails on an invalid
/// value, never on an absent one.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup instead of
/// `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let api_url = or_default("STORYWATCH_API_URL", "http://localhost:8000");
    let log_level = or_default("STORYWATCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_secs("STORYWATCH_REQUEST_TIMEOUT_SECS", "10")?;
    let refresh_secs = parse_secs("STORYWATCH_REFRESH_SECS", "300")?;
    let hot_refresh_secs = parse_secs("STORYWATCH_HOT_REFRESH_SECS", "120")?;

    Ok(AppConfig {
        api_url,
        log_level,
        request_timeout_secs,
        refresh_secs,
        hot_refresh_secs,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:8000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.refresh_secs, 300);
        assert_eq!(cfg.hot_refresh_secs, 120);
    }

    #[test]
    fn build_app_config_honors_overrides() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("STORYWATCH_API_URL", "https://stories.example.com");
        map.insert("STORYWATCH_LOG_LEVEL", "debug");
        map.insert("STORYWATCH_REQUEST_TIMEOUT_SECS", "30");
        map.insert("STORYWATCH_REFRESH_SECS", "600");
        map.insert("STORYWATCH_HOT_REFRESH_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_url, "https://stories.example.com");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.refresh_secs, 600);
        assert_eq!(cfg.hot_refresh_secs, 60);
    }

    #[test]
    fn build_app_config_fails_on_unparseable_interval() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("STORYWATCH_REFRESH_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORYWATCH_REFRESH_SECS"),
            "expected InvalidEnvVar(STORYWATCH_REFRESH_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_on_zero_interval() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("STORYWATCH_HOT_REFRESH_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORYWATCH_HOT_REFRESH_SECS"),
            "expected InvalidEnvVar(STORYWATCH_HOT_REFRESH_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_on_zero_timeout() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("STORYWATCH_REQUEST_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORYWATCH_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(STORYWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
