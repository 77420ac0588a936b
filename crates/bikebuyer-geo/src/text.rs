//! Text primitives shared by the locality and address parsers.

use std::sync::LazyLock;

use regex::{Match, Regex};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{4}\b").expect("valid zip regex"));

static LEADING_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-–—•]\s*").expect("valid separator regex"));

static PAREN_CANTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(([A-Z]{2})\)\s*$").expect("valid canton regex"));

static SUFFIX_CANTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([A-Z]{2})$").expect("valid canton suffix regex"));

/// Removes every `<...>` tag.
pub(crate) fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Strips tags, collapses whitespace runs to one space, and trims.
pub(crate) fn clean(s: &str) -> String {
    let stripped = strip_tags(s);
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_owned()
}

/// First standalone four-digit token.
pub(crate) fn first_zip(s: &str) -> Option<Match<'_>> {
    ZIP_RE.find(s)
}

/// Drops one leading hyphen, dash or bullet glyph together with its
/// surrounding whitespace.
pub(crate) fn strip_leading_separator(s: &str) -> &str {
    LEADING_SEPARATOR_RE
        .find(s)
        .map_or(s, |m| &s[m.end()..])
}

/// Splits a trailing canton code off `s`.
///
/// Tries a parenthesised code at the very end (`"La Croix (VD)"`) first,
/// then a bare two-letter suffix (`"Mex VD"`). The remainder is trimmed.
pub(crate) fn split_canton(s: &str) -> (&str, Option<String>) {
    for re in [&*PAREN_CANTON_RE, &*SUFFIX_CANTON_RE] {
        if let Some(caps) = re.captures(s) {
            if let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) {
                return (s[..whole.start()].trim(), Some(code.as_str().to_owned()));
            }
        }
    }
    (s.trim(), None)
}
