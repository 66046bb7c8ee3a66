use crate::app_config::{AppConfig, Environment};
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
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TOOLSOLOGY_ENV", "development"))?;
    let log_level = or_default("TOOLSOLOGY_LOG_LEVEL", "info");
    let api_url = lookup("TOOLSOLOGY_API_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    // Timeouts must be positive.
    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than 0".to_string(),
            }),
            secs => Ok(secs),
        }
    };

    let request_timeout_secs = parse_timeout("TOOLSOLOGY_REQUEST_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_timeout("TOOLSOLOGY_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("TOOLSOLOGY_USER_AGENT", "toolsology/0.1 (catalog-client)");

    // 0 disables the ceiling.
    let max_pages = match parse_usize("TOOLSOLOGY_MAX_PAGES", "50")? {
        0 => None,
        n => Some(n),
    };

    let currency = or_default("TOOLSOLOGY_CURRENCY", "PKR");
    if currency.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TOOLSOLOGY_CURRENCY".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        api_url,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        max_pages,
        currency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TOOLSOLOGY_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
