//! Address search results → [`AddressMatch`].
//!
//! The street line is whatever precedes the first locality marker in the
//! label. Postal code, locality and canton come from the detail text, which
//! on address results repeats the whole address in lower case and ends with
//! `"<country> <canton>"`, e.g. `"rue du lac 12 1950 sion 6266 sion ch vs"`.

use std::sync::LazyLock;

use bikebuyer_core::CountryCode;
use regex::Regex;

use crate::text::{clean, first_zip, split_canton, strip_leading_separator};
use crate::types::{AddressMatch, SearchAttrs};

/// Shortest prefix ending in a house number with an optional letter (`"12a"`).
static HOUSE_NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?[0-9]+[a-zA-Z]?)\b").expect("valid house number regex")
});

/// Parses address search results into address matches.
///
/// `domestic` is the country whose code precedes the canton in the
/// lower-cased detail text. Entries without a street line are skipped.
pub fn parse_addresses<'a>(
    results: &'a [SearchAttrs],
    domestic: &'a CountryCode,
) -> impl Iterator<Item = AddressMatch> + 'a {
    results
        .iter()
        .filter_map(move |attrs| parse_address(attrs, domestic))
}

/// Parses a single result. Returns `None` when the street line is empty.
#[must_use]
pub fn parse_address(attrs: &SearchAttrs, domestic: &CountryCode) -> Option<AddressMatch> {
    let label = clean(attrs.label.as_deref().unwrap_or_default());
    let detail = clean(attrs.detail.as_deref().unwrap_or_default());
    let base = if label.is_empty() { &detail } else { &label };

    let street = extract_street(base);
    if street.is_empty() {
        return None;
    }

    let locality_source = if detail.is_empty() { base } else { &detail };
    let (zip, city, canton) = extract_locality(locality_source, domestic);

    Some(AddressMatch {
        street: street.to_owned(),
        zip,
        city,
        canton,
    })
}

/// First rule that applies: text before the first comma, text before the
/// first postal code, the house-number prefix, or the whole text.
fn extract_street(raw: &str) -> &str {
    if let Some(idx) = raw.find(',') {
        return raw[..idx].trim();
    }
    if let Some(zip) = first_zip(raw) {
        return raw[..zip.start()].trim();
    }
    if let Some(prefix) = HOUSE_NUMBER_PREFIX_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
    {
        return prefix.as_str().trim();
    }
    raw
}

/// Postal code, locality and canton from the text after the first postal
/// code.
fn extract_locality(
    raw: &str,
    domestic: &CountryCode,
) -> (Option<String>, Option<String>, Option<String>) {
    let zip = first_zip(raw);
    let remainder = zip.map_or(raw, |m| raw[m.end()..].trim());

    let (city, canton) = split_canton(remainder);
    let canton = canton.or_else(|| canton_after_country(raw, domestic));
    let city = strip_leading_separator(city).trim();

    (
        zip.map(|m| m.as_str().to_owned()),
        (!city.is_empty()).then(|| city.to_owned()),
        canton,
    )
}

/// Finds `"<country> <xx>"` in the lower-cased text and returns `XX`.
fn canton_after_country(raw: &str, domestic: &CountryCode) -> Option<String> {
    let lower = raw.to_lowercase();
    let marker = domestic.as_str().to_ascii_lowercase();
    let tokens: Vec<&str> = lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()))
        .collect();

    tokens.windows(2).find_map(|pair| {
        let [country, canton] = pair else {
            return None;
        };
        (*country == marker
            && canton.len() == 2
            && canton.chars().all(|c| c.is_ascii_lowercase()))
        .then(|| canton.to_ascii_uppercase())
    })
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
