//! Postal-code search results → [`LocalityMatch`].

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{first_zip, split_canton, strip_leading_separator, strip_tags};
use crate::types::{LocalityMatch, SearchAttrs};

/// Everything up to and including the first four-digit run, plus trailing
/// whitespace.
static ZIP_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]*[0-9]{4}\s*").expect("valid zip prefix regex"));

/// Parses postal-code search results into locality matches.
///
/// `query` is the text the user typed; it stands in for the postal code
/// when a result carries none. Entries without a locality name are
/// skipped. Input order is preserved and duplicates are kept.
pub fn parse_localities<'a>(
    results: &'a [SearchAttrs],
    query: &'a str,
) -> impl Iterator<Item = LocalityMatch> + 'a {
    results
        .iter()
        .filter_map(move |attrs| parse_locality(attrs, query))
}

/// Parses a single result. Returns `None` when no locality name remains.
#[must_use]
pub fn parse_locality(attrs: &SearchAttrs, query: &str) -> Option<LocalityMatch> {
    let stripped = strip_tags(primary_text(attrs));
    let raw = stripped.trim();

    let zip = first_zip(raw).map_or_else(|| query.trim().to_owned(), |m| m.as_str().to_owned());

    let after_zip = ZIP_PREFIX_RE.find(raw).map_or(raw, |m| &raw[m.end()..]);
    let remainder = strip_leading_separator(after_zip).trim();

    let (city, canton) = split_canton(remainder);
    let city = strip_leading_separator(city).trim();
    if city.is_empty() {
        return None;
    }

    Some(LocalityMatch {
        zip,
        city: city.to_owned(),
        canton,
    })
}

/// The label when it has visible content, otherwise the detail.
fn primary_text(attrs: &SearchAttrs) -> &str {
    attrs
        .label
        .as_deref()
        .filter(|label| !strip_tags(label).trim().is_empty())
        .or(attrs.detail.as_deref())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "locality_test.rs"]
mod tests;
