use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper-cased ISO-3166 alpha-2 country code.
///
/// Locality and address lookups are only enabled for the configured
/// domestic code; every other value disables them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Default domestic scope code.
    pub const DOMESTIC: &'static str = "CH";

    /// Trims and upper-cases `raw` without validating its shape.
    ///
    /// Form input may briefly hold partial values, so the orchestrator
    /// accepts whatever the field contains and simply treats it as
    /// non-domestic.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn domestic() -> Self {
        Self(Self::DOMESTIC.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::domestic()
    }
}

impl FromStr for CountryCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = Self::new(s);
        if code.0.len() == 2 && code.0.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(code)
        } else {
            Err(CoreError::InvalidCountry(s.to_owned()))
        }
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
