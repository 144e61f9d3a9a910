use dotenvy::dotenv;
use reqwest::Url;
use secrecy::SecretString;
use std::env;
use thiserror::Error;

pub const DEFAULT_LOCATION_API_URL: &str = "https://api.countrystatecity.in/v1/";
pub const DEFAULT_RELAY_PORT: u16 = 5000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug)]
pub struct Config {
    pub telegram_token: SecretString,
    pub telegram_api_url: Option<Url>,
    pub location_api_key: SecretString,
    pub location_api_url: Url,
    pub relay_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let telegram_token = get("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;
        let location_api_key =
            get("LOCATION_SECRET").ok_or(ConfigError::Missing("LOCATION_SECRET"))?;

        let location_api_url = parse_base_url(
            "LOCATION_API_URL",
            &get("LOCATION_API_URL").unwrap_or_else(|| DEFAULT_LOCATION_API_URL.to_string()),
        )?;

        let telegram_api_url = get("TELEGRAM_API_URL")
            .map(|raw| parse_base_url("TELEGRAM_API_URL", &raw))
            .transpose()?;

        let relay_port = match get("RELAY_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "RELAY_PORT",
                reason: format!("'{}' is not a port number", raw),
            })?,
            None => DEFAULT_RELAY_PORT,
        };

        Ok(Self {
            telegram_token: SecretString::from(telegram_token),
            telegram_api_url,
            location_api_key: SecretString::from(location_api_key),
            location_api_url,
            relay_port,
        })
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("'{}' is not an http(s) base URL", raw),
        });
    }

    Ok(url)
}
