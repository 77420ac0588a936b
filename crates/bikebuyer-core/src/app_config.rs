use std::path::PathBuf;

use crate::country::CountryCode;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub geo_base_url: String,
    pub predict_url: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub domestic_country: CountryCode,
    pub search_limit: u32,
    pub locality_debounce_ms: u64,
    pub address_debounce_ms: u64,
    pub history_path: PathBuf,
}
