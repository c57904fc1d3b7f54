#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Calculator types and the chart-ready shapes derived from their results.
//!
//! Each [`CalculatorType`] posts to its own `/calculate/<type>` endpoint
//! and answers with a fixed field set, modelled here as one struct per
//! type under [`CalculatorResult`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Flat field-name → value mapping gathered from a calculator form.
///
/// Sent verbatim as the request body; the Calculation Service owns
/// validation and coercion.
pub type FormFields = BTreeMap<String, String>;

/// The supported calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CalculatorType {
    /// Loan EMI with amortization schedule.
    Emi,
    /// Home loan affordability.
    Affordability,
    /// Debt-to-income ratio.
    Dti,
    /// Gratuity payout.
    Gratuity,
    /// Retirement corpus.
    Retirement,
}

impl CalculatorType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Emi,
            Self::Affordability,
            Self::Dti,
            Self::Gratuity,
            Self::Retirement,
        ]
    }

    /// Heading used for the rendered summary.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Emi => "EMI Calculation",
            Self::Affordability => "Loan Affordability",
            Self::Dti => "Debt-to-Income Ratio",
            Self::Gratuity => "Gratuity",
            Self::Retirement => "Retirement Planning",
        }
    }

    /// Names of the form fields the service reads for this calculator.
    ///
    /// EMI takes either `loan_amount` or `property_value` with
    /// `down_payment`; the rest are required.
    #[must_use]
    pub const fn form_fields(self) -> &'static [&'static str] {
        match self {
            Self::Emi => &["loan_amount", "property_value", "down_payment", "rate", "tenure"],
            Self::Affordability => &["income", "expenses", "existing_emis", "down_payment"],
            Self::Dti => &["debt", "income"],
            Self::Gratuity => &["salary", "years"],
            Self::Retirement => &["age", "retire_age", "saving", "roi", "expenses"],
        }
    }
}

/// `/calculate/emi` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    /// Loan principal.
    pub principal: f64,
    /// Fixed monthly instalment.
    pub emi: f64,
    /// Interest over the whole tenure.
    pub total_interest: f64,
    /// Principal plus interest.
    pub total_payment: f64,
}

/// `/calculate/affordability` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    /// Largest new EMI the income supports.
    pub max_emi: f64,
    /// Loan amount that EMI can service.
    pub affordable_loan: f64,
    /// Loan plus down payment.
    pub affordable_property: f64,
    /// Monthly income.
    pub income: f64,
    /// Monthly expenses.
    pub expenses: f64,
    /// Existing EMI obligations.
    pub existing_emis: f64,
    /// Income left after expenses and EMIs. May be negative.
    pub remaining_income: f64,
}

/// `/calculate/dti` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtiResult {
    /// Debt as a percentage of income.
    pub dti_ratio: f64,
    /// Service-assigned risk label.
    pub risk_level: String,
    /// Monthly debt payments.
    pub debt: f64,
    /// Income left after debt. May be negative.
    pub remaining_income: f64,
    /// Monthly income.
    pub income: f64,
}

/// `/calculate/gratuity` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratuityResult {
    /// Gratuity payout.
    pub gratuity: f64,
}

/// `/calculate/retirement` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    /// Projected corpus at retirement.
    pub corpus: f64,
    /// Corpus needed to cover post-retirement expenses.
    pub required_corpus: f64,
    /// Service-assigned verdict ("Sufficient" / "Insufficient").
    pub status: String,
}

/// A calculation result, tagged by calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorResult {
    /// EMI result.
    Emi(EmiResult),
    /// Affordability result.
    Affordability(AffordabilityResult),
    /// DTI result.
    Dti(DtiResult),
    /// Gratuity result.
    Gratuity(GratuityResult),
    /// Retirement result.
    Retirement(RetirementResult),
}

impl CalculatorResult {
    /// Interprets a response body according to `kind`'s schema.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if a required field is missing or
    /// has the wrong type.
    pub fn from_json(
        kind: CalculatorType,
        body: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            CalculatorType::Emi => Self::Emi(serde_json::from_value(body)?),
            CalculatorType::Affordability => Self::Affordability(serde_json::from_value(body)?),
            CalculatorType::Dti => Self::Dti(serde_json::from_value(body)?),
            CalculatorType::Gratuity => Self::Gratuity(serde_json::from_value(body)?),
            CalculatorType::Retirement => Self::Retirement(serde_json::from_value(body)?),
        })
    }

    /// Which calculator produced this result.
    #[must_use]
    pub const fn kind(&self) -> CalculatorType {
        match self {
            Self::Emi(_) => CalculatorType::Emi,
            Self::Affordability(_) => CalculatorType::Affordability,
            Self::Dti(_) => CalculatorType::Dti,
            Self::Gratuity(_) => CalculatorType::Gratuity,
            Self::Retirement(_) => CalculatorType::Retirement,
        }
    }
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationPoint {
    /// 1-based month number.
    pub period: u32,
    /// Principal repaid this month, never negative.
    pub principal_paid: f64,
    /// Interest charged this month, never negative.
    pub interest_paid: f64,
}

/// A labelled line of the textual summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Field label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

/// Textual summary of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Heading.
    pub title: String,
    /// Lines in display order. Empty for the unknown-type fallback.
    pub lines: Vec<SummaryLine>,
}

/// Drawing surface a chart is bound to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartSlot {
    /// Category breakdown pie.
    Pie,
    /// Underlying quantities bar chart.
    Bar,
    /// Principal vs. interest line chart.
    Amortization,
}

impl ChartSlot {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pie, Self::Bar, Self::Amortization]
    }
}

/// A pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Category name.
    pub label: String,
    /// Non-negative amount.
    pub amount: f64,
    /// Hex fill colour.
    pub color: &'static str,
}

/// Category → amount breakdown of a declared total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieDataset {
    /// The amount the slices add up to.
    pub total: f64,
    /// Slices in display order.
    pub slices: Vec<PieSlice>,
}

impl PieDataset {
    /// Sum of all slice amounts.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.slices.iter().map(|s| s.amount).sum()
    }
}

/// A single bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    /// Bar label.
    pub label: &'static str,
    /// Bar height.
    pub value: f64,
    /// Hex fill colour.
    pub color: &'static str,
}

/// A bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDataset {
    /// Bars in display order.
    pub bars: Vec<BarEntry>,
}

/// One series of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    /// Series label.
    pub label: &'static str,
    /// One value per period.
    pub values: Vec<f64>,
    /// Hex stroke colour.
    pub color: &'static str,
}

/// A line chart over periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDataset {
    /// X-axis periods.
    pub periods: Vec<u32>,
    /// Series, each with `periods.len()` values.
    pub series: Vec<LineSeries>,
}

/// Data for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    /// Pie chart.
    Pie(PieDataset),
    /// Bar chart.
    Bar(BarDataset),
    /// Line chart.
    Line(LineDataset),
}

/// Everything produced from one calculator submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendering {
    /// Textual summary.
    pub summary: Summary,
    /// Charts to draw, keyed by surface.
    pub charts: Vec<(ChartSlot, ChartData)>,
}

impl Rendering {
    /// The chart bound to `slot`, if any.
    #[must_use]
    pub fn chart(&self, slot: ChartSlot) -> Option<&ChartData> {
        self.charts
            .iter()
            .find_map(|(s, data)| (*s == slot).then_some(data))
    }
}
