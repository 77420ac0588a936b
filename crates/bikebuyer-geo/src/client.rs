//! HTTP client for the geodata `SearchServer` endpoint.

use std::time::Duration;

use bikebuyer_core::config::DEFAULT_GEO_BASE_URL;
use bikebuyer_core::CountryCode;
use reqwest::{Client, Url};

use crate::address::parse_addresses;
use crate::error::GeoError;
use crate::locality::parse_localities;
use crate::types::{AddressMatch, LocalityMatch, SearchAttrs, SearchResponse};

/// Which index the search service should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrigin {
    Zipcode,
    Address,
}

impl SearchOrigin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOrigin::Zipcode => "zipcode",
            SearchOrigin::Address => "address",
        }
    }
}

/// Client for the location search service.
///
/// The service needs no authentication. Use [`GeoAdminClient::new`] for
/// production or [`GeoAdminClient::with_base_url`] to point at a mock
/// server in tests. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct GeoAdminClient {
    client: Client,
    base_url: Url,
    limit: u32,
}

impl GeoAdminClient {
    /// Creates a client pointed at the public search service.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, limit: u32) -> Result<Self, GeoError> {
        Self::with_base_url(DEFAULT_GEO_BASE_URL, timeout_secs, user_agent, limit)
    }

    /// Creates a client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeoError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        limit: u32,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| GeoError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            limit,
        })
    }

    /// Runs one free-text search and returns the raw result attributes.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure or timeout.
    /// - [`GeoError::UnexpectedStatus`] for any non-2xx status.
    /// - [`GeoError::Deserialize`] if the body does not match
    ///   [`SearchResponse`].
    pub async fn search(
        &self,
        origin: SearchOrigin,
        text: &str,
    ) -> Result<Vec<SearchAttrs>, GeoError> {
        let url = self.search_url(origin, text);
        tracing::debug!(origin = origin.as_str(), query = text, "location search");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<SearchResponse>(&body).map_err(|e| GeoError::Deserialize {
                context: format!("{} search for \"{text}\"", origin.as_str()),
                source: e,
            })?;

        Ok(parsed.into_attrs())
    }

    /// Looks up localities for a (partial) postal code.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search`].
    pub async fn search_localities(&self, query: &str) -> Result<Vec<LocalityMatch>, GeoError> {
        let query = query.trim();
        let results = self.search(SearchOrigin::Zipcode, query).await?;
        Ok(parse_localities(&results, query).collect())
    }

    /// Looks up street addresses within `city`.
    ///
    /// Returns an empty list without contacting the service when either
    /// input is blank.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search`].
    pub async fn search_addresses(
        &self,
        street: &str,
        city: &str,
        domestic: &CountryCode,
    ) -> Result<Vec<AddressMatch>, GeoError> {
        let (street, city) = (street.trim(), city.trim());
        if street.is_empty() || city.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("{street} {city}");
        let results = self.search(SearchOrigin::Address, &query).await?;
        Ok(parse_addresses(&results, domestic).collect())
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn search_url(&self, origin: SearchOrigin, text: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("type", "locations")
            .append_pair("origins", origin.as_str())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("searchText", text);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
