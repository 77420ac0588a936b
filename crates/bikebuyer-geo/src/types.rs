//! Search service response types and the structured matches derived from
//! them.
//!
//! ## Observed shape
//!
//! `GET SearchServer?type=locations` answers `{"results": [...]}` where each
//! result carries an `attrs` object. Only three attributes matter here:
//!
//! - `label`: display text with inline markup, e.g. `"<b>1950 Sion</b>"` or
//!   `"Rue du Lac 12 <b>1950 Sion</b>"`.
//! - `detail`: lower-cased search text, e.g.
//!   `"rue du lac 12 1950 sion 6266 sion ch vs"`.
//! - `origin`: `"zipcode"`, `"address"`, ...
//!
//! Any of them may be missing, and `results` itself is omitted on some
//! empty answers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub attrs: Option<SearchAttrs>,
}

/// Raw free text of one search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchAttrs {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

#[cfg(test)]
impl SearchAttrs {
    pub(crate) fn from_label(label: &str) -> Self {
        Self {
            label: Some(label.to_owned()),
            ..Self::default()
        }
    }
}

impl SearchResponse {
    /// Flattens the envelope, dropping results without `attrs`.
    #[must_use]
    pub fn into_attrs(self) -> Vec<SearchAttrs> {
        self.results.into_iter().filter_map(|r| r.attrs).collect()
    }
}

/// Postal code, locality name and canton extracted from one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalityMatch {
    pub zip: String,
    pub city: String,
    pub canton: Option<String>,
}

/// Street line plus whatever locality information the result carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressMatch {
    pub street: String,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub canton: Option<String>,
}
