#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location search and detail types returned by the Locator Service.
//!
//! Also defines the coarse display tiers ([`SafetyTier`], [`CrimeTier`])
//! that the typeahead controller hands to its rendering collaborator in
//! place of any concrete styling.

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Reported crime level of a location.
///
/// Parsed case-insensitively from the service's free-form string. Any
/// value other than low/medium/high becomes [`CrimeLevel::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum CrimeLevel {
    /// Low reported crime.
    Low,
    /// Medium reported crime.
    Medium,
    /// High reported crime.
    High,
    /// Missing or unrecognised level.
    Unknown,
}

impl CrimeLevel {
    /// Parses a level string, falling back to [`Self::Unknown`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Returns the display tier for this level.
    #[must_use]
    pub const fn tier(self) -> CrimeTier {
        match self {
            Self::Low => CrimeTier::Low,
            Self::Medium => CrimeTier::Medium,
            Self::High => CrimeTier::High,
            Self::Unknown => CrimeTier::Unknown,
        }
    }
}

impl From<String> for CrimeLevel {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<CrimeLevel> for String {
    fn from(value: CrimeLevel) -> Self {
        value.to_string()
    }
}

/// Display tier for a 0-10 safety rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SafetyTier {
    /// Rating of 8 or above.
    High,
    /// Rating from 6 up to (not including) 8.
    Medium,
    /// Rating below 6.
    Low,
}

impl SafetyTier {
    /// Classifies a safety rating.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 8.0 {
            Self::High
        } else if rating >= 6.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Display tier for a crime level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CrimeTier {
    /// Matches "low" in any case.
    Low,
    /// Matches "medium" in any case.
    Medium,
    /// Matches "high" in any case.
    High,
    /// Anything else.
    Unknown,
}

impl CrimeTier {
    /// Classifies a raw level string.
    #[must_use]
    pub fn from_level(level: &str) -> Self {
        CrimeLevel::parse_lenient(level).tier()
    }
}

/// A single match from `GET /api/search`.
///
/// Results keep the order the service returned them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Location name, used as the key for detail lookups.
    pub location: String,
    /// Administrative zone the location belongs to.
    pub zone: String,
    /// Safety rating out of 10.
    pub safety_rating: f64,
    /// Reported crime level.
    pub crime_level: CrimeLevel,
}

impl SearchResult {
    /// Display tier for [`Self::safety_rating`].
    #[must_use]
    pub fn safety_tier(&self) -> SafetyTier {
        SafetyTier::from_rating(self.safety_rating)
    }

    /// Display tier for [`Self::crime_level`].
    #[must_use]
    pub const fn crime_tier(&self) -> CrimeTier {
        self.crime_level.tier()
    }
}

/// Full record from `GET /api/location/<name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetail {
    /// Location name.
    pub location: String,
    /// Administrative zone.
    pub zone: String,
    /// Reported crime level.
    pub crime_level: CrimeLevel,
    /// Safety rating out of 10.
    pub safety_rating: f64,
    /// Crime rating out of 10.
    pub crime_rating: f64,
    /// Total recorded crimes.
    pub total_crimes: u64,
    /// Water clogging notes. The service sends an empty string when absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub water_clogging: Option<String>,
    /// Electricity supply notes. The service sends an empty string when absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub electricity_issues: Option<String>,
    /// Advantages, in service order.
    #[serde(default)]
    pub pros: Vec<String>,
    /// Drawbacks, in service order.
    #[serde(default)]
    pub cons: Vec<String>,
}

impl LocationDetail {
    /// Display tier for [`Self::safety_rating`].
    #[must_use]
    pub fn safety_tier(&self) -> SafetyTier {
        SafetyTier::from_rating(self.safety_rating)
    }

    /// Display tier for [`Self::crime_level`].
    #[must_use]
    pub const fn crime_tier(&self) -> CrimeTier {
        self.crime_level.tier()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_tier_boundaries() {
        assert_eq!(SafetyTier::from_rating(8.0), SafetyTier::High);
        assert_eq!(SafetyTier::from_rating(10.0), SafetyTier::High);
        assert_eq!(SafetyTier::from_rating(7.9), SafetyTier::Medium);
        assert_eq!(SafetyTier::from_rating(6.0), SafetyTier::Medium);
        assert_eq!(SafetyTier::from_rating(5.9), SafetyTier::Low);
        assert_eq!(SafetyTier::from_rating(0.0), SafetyTier::Low);
    }

    #[test]
    fn crime_tier_is_case_insensitive() {
        assert_eq!(CrimeTier::from_level("LOW"), CrimeTier::Low);
        assert_eq!(CrimeTier::from_level("Medium"), CrimeTier::Medium);
        assert_eq!(CrimeTier::from_level("hIgH"), CrimeTier::High);
        assert_eq!(CrimeTier::from_level("Very High"), CrimeTier::Unknown);
        assert_eq!(CrimeTier::from_level(""), CrimeTier::Unknown);
    }

    #[test]
    fn tier_names_are_lowercase() {
        assert_eq!(SafetyTier::High.to_string(), "high");
        assert_eq!(CrimeTier::Unknown.as_ref(), "unknown");
    }

    #[test]
    fn deserializes_search_result_with_odd_level() {
        let result: SearchResult = serde_json::from_value(serde_json::json!({
            "location": "Saket",
            "zone": "South",
            "safety_rating": 7.5,
            "crime_level": "moderate"
        }))
        .unwrap();
        assert_eq!(result.crime_level, CrimeLevel::Unknown);
        assert_eq!(result.safety_tier(), SafetyTier::Medium);
    }

    #[test]
    fn deserializes_detail_with_empty_notes() {
        let detail: LocationDetail = serde_json::from_value(serde_json::json!({
            "location": "Dwarka",
            "zone": "South West",
            "crime_level": "Low",
            "safety_rating": 8.2,
            "crime_rating": 2.1,
            "total_crimes": 120,
            "water_clogging": "",
            "electricity_issues": "Occasional cuts in summer",
            "pros": ["Metro access", "Wide roads"],
            "cons": []
        }))
        .unwrap();
        assert_eq!(detail.water_clogging, None);
        assert_eq!(
            detail.electricity_issues.as_deref(),
            Some("Occasional cuts in summer")
        );
        assert_eq!(detail.pros, vec!["Metro access", "Wide roads"]);
        assert_eq!(detail.crime_tier(), CrimeTier::Low);
        assert_eq!(detail.safety_tier(), SafetyTier::High);
    }
}
