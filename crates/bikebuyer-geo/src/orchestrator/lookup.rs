use std::future::Future;

use bikebuyer_core::CountryCode;

use super::state::LookupRequest;
use crate::client::GeoAdminClient;
use crate::error::GeoError;
use crate::types::{AddressMatch, LocalityMatch};

/// The network side of a suggestion stream.
pub trait Lookup {
    type Item: Send + 'static;

    fn lookup(
        &self,
        request: &LookupRequest,
    ) -> impl Future<Output = Result<Vec<Self::Item>, GeoError>> + Send;
}

/// Postal-code text → localities.
#[derive(Debug, Clone)]
pub struct LocalityLookup {
    client: GeoAdminClient,
}

impl LocalityLookup {
    #[must_use]
    pub fn new(client: GeoAdminClient) -> Self {
        Self { client }
    }
}

impl Lookup for LocalityLookup {
    type Item = LocalityMatch;

    fn lookup(
        &self,
        request: &LookupRequest,
    ) -> impl Future<Output = Result<Vec<LocalityMatch>, GeoError>> + Send {
        self.client.search_localities(&request.text)
    }
}

/// Street text plus city context → addresses.
#[derive(Debug, Clone)]
pub struct AddressLookup {
    client: GeoAdminClient,
    domestic: CountryCode,
}

impl AddressLookup {
    #[must_use]
    pub fn new(client: GeoAdminClient, domestic: CountryCode) -> Self {
        Self { client, domestic }
    }
}

impl Lookup for AddressLookup {
    type Item = AddressMatch;

    fn lookup(
        &self,
        request: &LookupRequest,
    ) -> impl Future<Output = Result<Vec<AddressMatch>, GeoError>> + Send {
        self.client
            .search_addresses(&request.text, &request.context, &self.domestic)
    }
}
