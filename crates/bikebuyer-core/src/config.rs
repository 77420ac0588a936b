use crate::app_config::AppConfig;
use crate::country::CountryCode;
use crate::ConfigError;

pub const DEFAULT_GEO_BASE_URL: &str = "https://api3.geo.admin.ch/rest/services/api/SearchServer";
pub const DEFAULT_PREDICT_URL: &str = "https://dss.ga-fl.net/public/api/v1/EAD_ZALAXUS_01_PredictBikeBuyer/EAD_ZALAXUS_01_PredictBikeBuyer/predict";

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
/// Every variable is optional; the lookup is injected so tests can drive
/// this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let log_level = or_default("BIKEBUYER_LOG_LEVEL", "info");
    let geo_base_url = or_default("BIKEBUYER_GEO_BASE_URL", DEFAULT_GEO_BASE_URL);
    let predict_url = or_default("BIKEBUYER_PREDICT_URL", DEFAULT_PREDICT_URL);
    let http_timeout_secs = parse_u64("BIKEBUYER_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIKEBUYER_USER_AGENT", "bikebuyer/0.1 (registration-assist)");

    let domestic_raw = or_default("BIKEBUYER_DOMESTIC_COUNTRY", CountryCode::DOMESTIC);
    let domestic_country =
        domestic_raw
            .parse::<CountryCode>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "BIKEBUYER_DOMESTIC_COUNTRY".to_string(),
                reason: e.to_string(),
            })?;

    let search_limit = parse_u32("BIKEBUYER_SEARCH_LIMIT", "20")?;
    let locality_debounce_ms = parse_u64("BIKEBUYER_LOCALITY_DEBOUNCE_MS", "200")?;
    let address_debounce_ms = parse_u64("BIKEBUYER_ADDRESS_DEBOUNCE_MS", "250")?;
    let history_path = PathBuf::from(or_default(
        "BIKEBUYER_HISTORY_PATH",
        "./data/bb_history_v1.json",
    ));

    Ok(AppConfig {
        log_level,
        geo_base_url,
        predict_url,
        http_timeout_secs,
        user_agent,
        domestic_country,
        search_limit,
        locality_debounce_ms,
        address_debounce_ms,
        history_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
