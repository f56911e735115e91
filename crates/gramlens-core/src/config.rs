use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let browserless_url = require("GRAMLENS_BROWSERLESS_URL")?;
    let browserless_token = lookup("GRAMLENS_BROWSERLESS_TOKEN").ok();

    let env = parse_environment(&or_default("GRAMLENS_ENV", "development"));
    let bind_addr = parse_addr("GRAMLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GRAMLENS_LOG_LEVEL", "info");
    let competitors_path = PathBuf::from(or_default(
        "GRAMLENS_COMPETITORS_PATH",
        "./config/competitors.yaml",
    ));

    let navigation_timeout_secs = parse_u64("GRAMLENS_NAVIGATION_TIMEOUT_SECS", "10")?;
    let scroll_steps = parse_u32("GRAMLENS_SCROLL_STEPS", "3")?;
    let scroll_step_delay_ms = parse_u64("GRAMLENS_SCROLL_STEP_DELAY_MS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        competitors_path,
        browserless_url,
        browserless_token,
        navigation_timeout_secs,
        scroll_steps,
        scroll_step_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
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

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("GRAMLENS_BROWSERLESS_URL", "http://localhost:3030");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_browserless_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GRAMLENS_BROWSERLESS_URL"),
            "expected MissingEnvVar(GRAMLENS_BROWSERLESS_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("GRAMLENS_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GRAMLENS_BIND_ADDR"),
            "expected InvalidEnvVar(GRAMLENS_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_required_vars_only() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.browserless_url, "http://localhost:3030");
        assert!(cfg.browserless_token.is_none());
        assert_eq!(cfg.navigation_timeout_secs, 10);
        assert_eq!(cfg.scroll_steps, 3);
        assert_eq!(cfg.scroll_step_delay_ms, 1000);
    }

    #[test]
    fn build_app_config_navigation_timeout_override() {
        let mut map = full_env();
        map.insert("GRAMLENS_NAVIGATION_TIMEOUT_SECS", "30");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.navigation_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_navigation_timeout_invalid() {
        let mut map = full_env();
        map.insert("GRAMLENS_NAVIGATION_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GRAMLENS_NAVIGATION_TIMEOUT_SECS"),
            "expected InvalidEnvVar(GRAMLENS_NAVIGATION_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_scroll_tuning_overrides() {
        let mut map = full_env();
        map.insert("GRAMLENS_SCROLL_STEPS", "5");
        map.insert("GRAMLENS_SCROLL_STEP_DELAY_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.scroll_steps, 5);
        assert_eq!(cfg.scroll_step_delay_ms, 250);
    }

    #[test]
    fn debug_redacts_browserless_token() {
        let mut map = full_env();
        map.insert("GRAMLENS_BROWSERLESS_TOKEN", "super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
