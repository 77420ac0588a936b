//! Typed registration-form data and its conversion into the free-form
//! feature map consumed by the scoring service.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::country::CountryCode;
use crate::error::CoreError;
use crate::household::infer_divorced;

/// Marital status as encoded by the scoring service (`"M"` / `"S"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "M")]
    Married,
    #[default]
    #[serde(rename = "S")]
    Single,
}

/// One completed registration form.
///
/// Field names serialize in camelCase because that is the feature naming
/// the scoring service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    pub email_address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email_promotion: u8,
    #[serde(default)]
    pub country: CountryCode,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    /// Canton / region code.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub yearly_income: Option<String>,
    #[serde(default)]
    pub home_owner: bool,
    #[serde(default)]
    pub number_cars_owned: u32,
    #[serde(default)]
    pub total_children: u32,
    #[serde(default)]
    pub total_children_at_home: u32,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub occupation: String,
}

fn default_language() -> String {
    "FR".to_owned()
}

impl CustomerProfile {
    /// Builds the feature map sent verbatim to the scoring service: every
    /// form field plus the derived `age` and `divorced` values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Features`] or [`CoreError::FeatureShape`] if the
    /// profile cannot be converted to a JSON object.
    pub fn to_features(&self, today: NaiveDate) -> Result<Map<String, Value>, CoreError> {
        let Value::Object(mut features) = serde_json::to_value(self)? else {
            return Err(CoreError::FeatureShape);
        };

        if let Some(birth_date) = self.birth_date {
            features.insert("age".to_owned(), Value::from(age_on(birth_date, today)));
        }
        features.insert(
            "divorced".to_owned(),
            Value::from(u8::from(infer_divorced(
                self.marital_status,
                self.total_children,
            ))),
        );

        Ok(features)
    }
}

/// Completed years between `birth_date` and `today`.
///
/// One year is subtracted while the birthday has not yet come round in
/// `today`'s year. Birth dates in the future yield `0`.
#[must_use]
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_profile() -> CustomerProfile {
        serde_json::from_value(serde_json::json!({
            "firstName": "Marie",
            "lastName": "Durand",
            "gender": "F",
            "birthDate": "1990-06-15",
            "maritalStatus": "S",
            "emailAddress": "marie.durand@example.com",
            "country": "CH",
            "zip": "1950",
            "city": "Sion",
            "street": "Rue du Lac 12",
            "state": "VS",
            "totalChildren": 2,
            "education": "Bachelors",
            "occupation": "Professional"
        }))
        .unwrap()
    }

    #[test]
    fn age_decrements_before_birthday() {
        assert_eq!(age_on(date(1990, 6, 15), date(2026, 6, 14)), 35);
    }

    #[test]
    fn age_counts_birthday_itself() {
        assert_eq!(age_on(date(1990, 6, 15), date(2026, 6, 15)), 36);
    }

    #[test]
    fn age_of_future_birth_date_is_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2026, 1, 1)), 0);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let profile = sample_profile();
        assert_eq!(profile.language, "FR");
        assert_eq!(profile.country.as_str(), "CH");
        assert_eq!(profile.marital_status, MaritalStatus::Single);
        assert!(!profile.home_owner);
        assert!(profile.height.is_none());
    }

    #[test]
    fn features_use_camel_case_keys() {
        let features = sample_profile().to_features(date(2026, 10, 14)).unwrap();
        assert_eq!(features["firstName"], "Marie");
        assert_eq!(features["totalChildren"], 2);
        assert_eq!(features["maritalStatus"], "S");
        assert_eq!(features["country"], "CH");
        assert!(!features.contains_key("first_name"));
    }

    #[test]
    fn features_include_derived_fields() {
        let features = sample_profile().to_features(date(2026, 10, 14)).unwrap();
        assert_eq!(features["age"], 36);
        assert_eq!(features["divorced"], 1);
    }

    #[test]
    fn features_omit_age_without_birth_date() {
        let mut profile = sample_profile();
        profile.birth_date = None;
        profile.marital_status = MaritalStatus::Married;
        let features = profile.to_features(date(2026, 10, 14)).unwrap();
        assert!(!features.contains_key("age"));
        assert_eq!(features["divorced"], 0);
    }
}
