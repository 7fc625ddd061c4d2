use crate::app_config::{AdminSettings, AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SHOPSEED_ENV", "development"))?;
    let log_level = or_default("SHOPSEED_LOG_LEVEL", "info");

    let server_domain = or_default("SERVER_DOMAIN", "http://localhost:8080")
        .trim_end_matches('/')
        .to_string();
    if server_domain.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SERVER_DOMAIN".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let assets_dir = PathBuf::from(or_default(
        "SHOPSEED_ASSETS_DIR",
        "./frontend/src/assest/products",
    ));
    let general_sweep_cap = parse_usize("SHOPSEED_GENERAL_SWEEP_CAP", "200")?;

    let avatar_asset = or_default(
        "SHOPSEED_ADMIN_AVATAR",
        "watches/boAt Wave Style Call 1.webp",
    );
    if !avatar_asset.contains('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPSEED_ADMIN_AVATAR".to_string(),
            reason: "expected <directory>/<file name>".to_string(),
        });
    }
    let admin = AdminSettings {
        email: or_default("SHOPSEED_ADMIN_EMAIL", "admin@example.com"),
        name: or_default("SHOPSEED_ADMIN_NAME", "Admin"),
        password: or_default("SHOPSEED_ADMIN_PASSWORD", "Admin123!"),
        avatar_asset,
    };

    let db_max_connections = parse_u32("SHOPSEED_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("SHOPSEED_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPSEED_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("SHOPSEED_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        server_domain,
        assets_dir,
        general_sweep_cap,
        admin,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPSEED_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
