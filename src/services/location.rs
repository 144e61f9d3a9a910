use crate::models::location::{City, Country, State};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

const API_KEY_HEADER: &str = "X-CSCAPI-KEY";

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: StatusCode },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LocationError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LocationError::Transport(_))
    }
}

/// Read access to the geographic catalogue.
#[async_trait]
pub trait LocationApi: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, LocationError>;

    async fn list_states(&self, country_code: &str) -> Result<Vec<State>, LocationError>;

    async fn list_cities(
        &self,
        country_code: &str,
        state_code: &str,
    ) -> Result<Vec<City>, LocationError>;
}

/// HTTP client for the countrystatecity.in API. One attempt per call.
pub struct LocationClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl LocationClient {
    pub fn new(base_url: Url, api_key: SecretString) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(http: Client, base_url: Url, api_key: SecretString) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>, LocationError> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Upstream { status });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LocationApi for LocationClient {
    async fn list_countries(&self) -> Result<Vec<Country>, LocationError> {
        self.fetch(&["countries"]).await
    }

    async fn list_states(&self, country_code: &str) -> Result<Vec<State>, LocationError> {
        self.fetch(&["countries", country_code, "states"]).await
    }

    async fn list_cities(
        &self,
        country_code: &str,
        state_code: &str,
    ) -> Result<Vec<City>, LocationError> {
        self.fetch(&["countries", country_code, "states", state_code, "cities"])
            .await
    }
}
