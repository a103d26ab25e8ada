use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank credentials (`OPENAI_API_KEY=` in a .env file) count as unset.
    let optional_secret = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_temperature = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let value = or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !(0.0..=2.0).contains(&value) {
            return Err(invalid(var, format!("{value} is outside 0.0..=2.0")));
        }
        Ok(value)
    };

    let bind_addr = parse_addr("LEADSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");

    let google_maps_api_key = optional_secret("GOOGLE_MAPS_API_KEY");
    let openai_api_key = optional_secret("OPENAI_API_KEY");

    let maps_base_url = or_default(
        "LEADSCOUT_MAPS_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );
    let openai_base_url = or_default("LEADSCOUT_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("LEADSCOUT_OPENAI_MODEL", "gpt-4o-mini");
    let openai_temperature = parse_temperature("LEADSCOUT_OPENAI_TEMPERATURE", "0.7")?;

    let http_timeout_secs = parse_u64("LEADSCOUT_HTTP_TIMEOUT_SECS", "15")?;
    let pitch_timeout_secs = parse_u64("LEADSCOUT_PITCH_TIMEOUT_SECS", "45")?;
    let user_agent = or_default(
        "LEADSCOUT_USER_AGENT",
        "leadscout/0.1 (local-business-outreach)",
    );

    Ok(AppConfig {
        bind_addr,
        log_level,
        google_maps_api_key,
        openai_api_key,
        maps_base_url,
        openai_base_url,
        openai_model,
        openai_temperature,
        http_timeout_secs,
        pitch_timeout_secs,
        user_agent,
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
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.google_maps_api_key.is_none());
        assert!(cfg.openai_api_key.is_none());
        assert!(!cfg.pitches_enabled());
        assert_eq!(cfg.maps_base_url, "https://maps.googleapis.com/maps/api/");
        assert_eq!(cfg.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.openai_model, "gpt-4o-mini");
        assert!((cfg.openai_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.http_timeout_secs, 15);
        assert_eq!(cfg.pitch_timeout_secs, 45);
        assert_eq!(cfg.user_agent, "leadscout/0.1 (local-business-outreach)");
    }

    #[test]
    fn build_app_config_reads_credentials() {
        let mut map = HashMap::new();
        map.insert("GOOGLE_MAPS_API_KEY", "maps-key");
        map.insert("OPENAI_API_KEY", "sk-test");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
        assert_eq!(cfg.google_maps_api_key.as_deref(), Some("maps-key"));
        assert_eq!(cfg.openai_api_key.as_deref(), Some("sk-test"));
        assert!(cfg.pitches_enabled());
    }

    #[test]
    fn blank_credentials_are_treated_as_unset() {
        let mut map = HashMap::new();
        map.insert("GOOGLE_MAPS_API_KEY", "");
        map.insert("OPENAI_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
        assert!(cfg.google_maps_api_key.is_none());
        assert!(cfg.openai_api_key.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("LEADSCOUT_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_BIND_ADDR"),
            "expected InvalidEnvVar(LEADSCOUT_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_timeout() {
        let mut map = HashMap::new();
        map.insert("LEADSCOUT_HTTP_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LEADSCOUT_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_pitch_timeout() {
        let mut map = HashMap::new();
        map.insert("LEADSCOUT_PITCH_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_PITCH_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LEADSCOUT_PITCH_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_out_of_range_temperature() {
        let mut map = HashMap::new();
        map.insert("LEADSCOUT_OPENAI_TEMPERATURE", "3.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_OPENAI_TEMPERATURE"),
            "expected InvalidEnvVar(LEADSCOUT_OPENAI_TEMPERATURE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_overrides_model_and_base_urls() {
        let mut map = HashMap::new();
        map.insert("LEADSCOUT_OPENAI_MODEL", "gpt-4.1-mini");
        map.insert("LEADSCOUT_MAPS_BASE_URL", "http://127.0.0.1:9000");
        map.insert("LEADSCOUT_OPENAI_BASE_URL", "http://127.0.0.1:9001/v1");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
        assert_eq!(cfg.openai_model, "gpt-4.1-mini");
        assert_eq!(cfg.maps_base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.openai_base_url, "http://127.0.0.1:9001/v1");
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let mut map = HashMap::new();
        map.insert("GOOGLE_MAPS_API_KEY", "maps-secret");
        map.insert("OPENAI_API_KEY", "sk-secret");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("maps-secret"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
