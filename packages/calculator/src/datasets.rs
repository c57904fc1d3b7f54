//! Chart datasets derived from calculator results.

use livability_calculator_models::{
    AffordabilityResult, AmortizationPoint, BarDataset, BarEntry, DtiResult, LineDataset,
    LineSeries, PieDataset, PieSlice,
};

/// Label of the residual slice added when categories fall short of the total.
pub const UNALLOCATED_LABEL: &str = "Other/Unallocated";

/// Fill colour of the residual slice.
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

/// Half a paisa. The service rounds amounts to two decimals, so a shortfall
/// below this is float noise, not unallocated income.
pub const RESIDUAL_TOLERANCE: f64 = 0.005;

const EXPENSES_COLOR: &str = "#ff6384";
const EMIS_COLOR: &str = "#ffcd56";
const REMAINING_COLOR: &str = "#4bc0c0";
const INCOME_COLOR: &str = "#36a2eb";
const MAX_EMI_COLOR: &str = "#9966ff";
const PRINCIPAL_COLOR: &str = "#36a2eb";
const INTEREST_COLOR: &str = "#ff6384";

fn slice(label: &str, amount: f64, color: &'static str) -> PieSlice {
    PieSlice {
        label: label.to_string(),
        amount,
        color,
    }
}

/// Builds a pie whose slices add up to `total`.
///
/// If the categories fall short of `total` by more than
/// [`RESIDUAL_TOLERANCE`], an [`UNALLOCATED_LABEL`] slice carrying the
/// residual is appended.
#[must_use]
pub fn complete_pie(total: f64, slices: Vec<PieSlice>) -> PieDataset {
    let mut dataset = PieDataset { total, slices };
    let residual = total - dataset.sum();
    if residual > RESIDUAL_TOLERANCE {
        dataset
            .slices
            .push(slice(UNALLOCATED_LABEL, residual, NEUTRAL_COLOR));
    }
    dataset
}

/// Income split into expenses, existing EMIs and what remains.
#[must_use]
pub fn affordability_pie(result: &AffordabilityResult) -> PieDataset {
    complete_pie(
        result.income,
        vec![
            slice("Expenses", result.expenses, EXPENSES_COLOR),
            slice("Existing EMIs", result.existing_emis, EMIS_COLOR),
            slice(
                "Remaining Income",
                result.remaining_income.max(0.0),
                REMAINING_COLOR,
            ),
        ],
    )
}

/// Income split into debt and what remains.
#[must_use]
pub fn dti_pie(result: &DtiResult) -> PieDataset {
    complete_pie(
        result.income,
        vec![
            slice("Debt", result.debt, EXPENSES_COLOR),
            slice(
                "Remaining Income",
                result.remaining_income.max(0.0),
                REMAINING_COLOR,
            ),
        ],
    )
}

/// The four monthly quantities behind an affordability result.
#[must_use]
pub fn affordability_bar(result: &AffordabilityResult) -> BarDataset {
    let bar = |label, value, color| BarEntry {
        label,
        value,
        color,
    };
    BarDataset {
        bars: vec![
            bar("Income", result.income, INCOME_COLOR),
            bar("Expenses", result.expenses, EXPENSES_COLOR),
            bar("Existing EMIs", result.existing_emis, EMIS_COLOR),
            bar("Maximum EMI", result.max_emi, MAX_EMI_COLOR),
        ],
    }
}

/// Principal and interest series over the schedule's periods.
#[must_use]
pub fn amortization_line(schedule: &[AmortizationPoint]) -> LineDataset {
    LineDataset {
        periods: schedule.iter().map(|p| p.period).collect(),
        series: vec![
            LineSeries {
                label: "Principal",
                values: schedule.iter().map(|p| p.principal_paid).collect(),
                color: PRINCIPAL_COLOR,
            },
            LineSeries {
                label: "Interest",
                values: schedule.iter().map(|p| p.interest_paid).collect(),
                color: INTEREST_COLOR,
            },
        ],
    }
}
