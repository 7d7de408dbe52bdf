use std::net::IpAddr;

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub webhook_secret: Option<String>,
    pub geocoding_api_key: Option<String>,
    pub geocoding_base_url: String,
    pub maps_api_key: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("FORMBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMBOARD_HOST: {e}"))?;

        let port: u16 = env_or("FORMBOARD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FORMBOARD_PORT: {e}"))?;

        let webhook_secret = env_optional("WEBHOOK_SECRET");
        let geocoding_api_key = env_optional("GEOCODING_API_KEY");
        let geocoding_base_url = env_or("GEOCODING_BASE_URL", DEFAULT_GEOCODING_BASE_URL);
        let maps_api_key = env_optional("MAPS_API_KEY");

        let log_level = env_or("FORMBOARD_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            webhook_secret,
            geocoding_api_key,
            geocoding_base_url,
            maps_api_key,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
