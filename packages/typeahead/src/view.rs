//! Rendering collaborator for the typeahead.
//!
//! The controller only decides *what* to show and which semantic tier
//! applies; markup and styling live behind [`TypeaheadView`].

use livability_locator_models::{
    CrimeLevel, CrimeTier, LocationDetail, SafetyTier, SearchResult,
};

/// Placeholder for optional detail fields the service left empty.
pub const NOT_REPORTED: &str = "N/A";

/// Visual effects the controller drives. Every method is a fire-and-forget
/// effect; the controller never reads anything back.
pub trait TypeaheadView: Send {
    /// Shows the dropdown with `entries` in order, nothing highlighted.
    fn show_dropdown(&mut self, entries: &[DropdownEntry]);
    /// Hides the dropdown.
    fn hide_dropdown(&mut self);
    /// Moves the keyboard highlight; `None` clears it.
    fn highlight(&mut self, index: Option<usize>);
    /// Replaces the input's text.
    fn set_query_text(&mut self, text: &str);
    /// Shows the loading indicator.
    fn show_loading(&mut self);
    /// Hides the loading indicator.
    fn hide_loading(&mut self);
    /// Shows the error panel with `message`.
    fn show_error(&mut self, message: &str);
    /// Hides the error panel.
    fn hide_error(&mut self);
    /// Populates and shows the detail panel.
    fn show_detail(&mut self, detail: &DetailPanel);
    /// Hides the detail panel.
    fn hide_detail(&mut self);
}

/// One row of the dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownEntry {
    /// Location name.
    pub label: String,
    /// Zone shown beside the name.
    pub zone: String,
    /// Safety rating out of 10.
    pub safety_rating: f64,
    /// Colour category for the rating.
    pub safety_tier: SafetyTier,
    /// Reported crime level.
    pub crime_level: CrimeLevel,
    /// Colour category for the crime level.
    pub crime_tier: CrimeTier,
}

impl From<&SearchResult> for DropdownEntry {
    fn from(result: &SearchResult) -> Self {
        Self {
            label: result.location.clone(),
            zone: result.zone.clone(),
            safety_rating: result.safety_rating,
            safety_tier: result.safety_tier(),
            crime_level: result.crime_level,
            crime_tier: result.crime_tier(),
        }
    }
}

/// A labelled value in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    /// Field label.
    pub label: &'static str,
    /// Rendered value.
    pub value: String,
}

/// Everything the detail panel displays for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// Panel heading.
    pub title: String,
    /// Colour category for the safety rating.
    pub safety_tier: SafetyTier,
    /// Colour category for the crime level.
    pub crime_tier: CrimeTier,
    /// Named fields in display order.
    pub fields: Vec<DetailField>,
    /// First bulleted list.
    pub pros: Vec<String>,
    /// Second bulleted list.
    pub cons: Vec<String>,
}

impl From<&LocationDetail> for DetailPanel {
    fn from(detail: &LocationDetail) -> Self {
        let field = |label, value: String| DetailField { label, value };
        let note = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| NOT_REPORTED.to_string())
        };

        Self {
            title: detail.location.clone(),
            safety_tier: detail.safety_tier(),
            crime_tier: detail.crime_tier(),
            fields: vec![
                field("Zone", detail.zone.clone()),
                field("Crime Level", detail.crime_level.to_string()),
                field("Safety Rating", format!("{:.1}/10", detail.safety_rating)),
                field("Crime Rating", format!("{:.1}/10", detail.crime_rating)),
                field("Total Crimes", detail.total_crimes.to_string()),
                field("Water Clogging", note(&detail.water_clogging)),
                field("Electricity Issues", note(&detail.electricity_issues)),
            ],
            pros: detail.pros.clone(),
            cons: detail.cons.clone(),
        }
    }
}
