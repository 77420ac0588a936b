//! Locality and address suggestions backed by the federal geodata search
//! service.
//!
//! The search service answers with loosely formatted, HTML-tagged labels;
//! [`locality`] and [`address`] reduce them to structured matches, and
//! [`orchestrator`] turns raw keystrokes into debounced, de-duplicated,
//! last-request-wins lookups.

pub mod address;
pub mod client;
pub mod error;
pub mod locality;
pub mod orchestrator;
pub mod types;

mod text;

pub use address::parse_addresses;
pub use client::{GeoAdminClient, SearchOrigin};
pub use error::GeoError;
pub use locality::parse_localities;
pub use orchestrator::{
    AddressLookup, Decision, LocalityLookup, Lookup, LookupRequest, QueryInput,
    QueryOrchestrator, QueryPolicy, QueryState,
};
pub use types::{AddressMatch, LocalityMatch, SearchAttrs, SearchResponse, SearchResult};
