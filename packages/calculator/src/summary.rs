//! Textual summaries of calculator results.

use livability_calculator_models::{CalculatorResult, Summary, SummaryLine};

/// Summary title when the calculator type is not recognised.
pub const UNKNOWN_TYPE_MESSAGE: &str = "Unknown calculator type";

/// Formats an amount in rupees with Indian digit grouping, e.g.
/// `₹12,34,567.89`.
#[must_use]
pub fn format_inr(amount: f64) -> String {
    let paise_total = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (rupees, paise) = (
        (paise_total / 100.0).trunc() as u64,
        (paise_total % 100.0) as u64,
    );
    let sign = if amount < 0.0 && paise_total > 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{}.{paise:02}", group_indian(&rupees.to_string()))
}

/// Groups the last three digits, then every two before them.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut rest, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{last_three}", groups.join(","))
}

/// Formats a percentage with two decimals.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn line(label: &'static str, value: String) -> SummaryLine {
    SummaryLine { label, value }
}

/// Builds the summary for a recognised result.
#[must_use]
pub fn summarize(result: &CalculatorResult) -> Summary {
    let lines = match result {
        CalculatorResult::Emi(r) => vec![
            line("Loan Amount", format_inr(r.principal)),
            line("Monthly EMI", format_inr(r.emi)),
            line("Total Interest", format_inr(r.total_interest)),
            line("Total Payment", format_inr(r.total_payment)),
        ],
        CalculatorResult::Affordability(r) => vec![
            line("Maximum EMI", format_inr(r.max_emi)),
            line("Affordable Loan Amount", format_inr(r.affordable_loan)),
            line("Affordable Property Value", format_inr(r.affordable_property)),
            line("Remaining Income", format_inr(r.remaining_income)),
        ],
        CalculatorResult::Dti(r) => vec![
            line("Debt-to-Income Ratio", format_percent(r.dti_ratio)),
            line("Risk Level", r.risk_level.clone()),
            line("Monthly Debt", format_inr(r.debt)),
            line("Remaining Income", format_inr(r.remaining_income)),
        ],
        CalculatorResult::Gratuity(r) => vec![line("Gratuity Amount", format_inr(r.gratuity))],
        CalculatorResult::Retirement(r) => vec![
            line("Expected Corpus", format_inr(r.corpus)),
            line("Required Corpus", format_inr(r.required_corpus)),
            line("Status", r.status.clone()),
        ],
    };

    Summary {
        title: result.kind().title().to_string(),
        lines,
    }
}

/// Fallback summary for an unrecognised calculator type.
#[must_use]
pub fn unknown_type_summary() -> Summary {
    Summary {
        title: UNKNOWN_TYPE_MESSAGE.to_string(),
        lines: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livability_calculator_models::{
        AffordabilityResult, DtiResult, EmiResult, GratuityResult, RetirementResult,
    };

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(999.5), "₹999.50");
        assert_eq!(format_inr(1_000.0), "₹1,000.00");
        assert_eq!(format_inr(100_000.0), "₹1,00,000.00");
        assert_eq!(format_inr(1_234_567.891), "₹12,34,567.89");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789.00");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_inr(-5_000.0), "-₹5,000.00");
        assert_eq!(format_inr(-0.001), "₹0.00");
    }

    #[test]
    fn affordability_summary_shows_signed_remaining_income() {
        let summary = summarize(&CalculatorResult::Affordability(AffordabilityResult {
            max_emi: -2_000.0,
            affordable_loan: -120_000.0,
            affordable_property: 880_000.0,
            income: 50_000.0,
            expenses: 40_000.0,
            existing_emis: 20_000.0,
            remaining_income: -10_000.0,
        }));
        assert_eq!(summary.title, "Loan Affordability");
        let labels: Vec<&str> = summary.lines.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "Maximum EMI",
                "Affordable Loan Amount",
                "Affordable Property Value",
                "Remaining Income",
            ]
        );
        assert_eq!(summary.lines[3].value, "-₹10,000.00");
    }

    #[test]
    fn labels_and_values_per_calculator() {
        let cases: Vec<(CalculatorResult, &str, Vec<&str>, usize, &str)> = vec![
            (
                CalculatorResult::Emi(EmiResult {
                    principal: 100_000.0,
                    emi: 5_000.0,
                    total_interest: 2_000.0,
                    total_payment: 102_000.0,
                }),
                "EMI Calculation",
                vec!["Loan Amount", "Monthly EMI", "Total Interest", "Total Payment"],
                1,
                "₹5,000.00",
            ),
            (
                CalculatorResult::Dti(DtiResult {
                    dti_ratio: 25.0,
                    risk_level: "Moderate".to_string(),
                    debt: 25_000.0,
                    remaining_income: 75_000.0,
                    income: 100_000.0,
                }),
                "Debt-to-Income Ratio",
                vec![
                    "Debt-to-Income Ratio",
                    "Risk Level",
                    "Monthly Debt",
                    "Remaining Income",
                ],
                0,
                "25.00%",
            ),
            (
                CalculatorResult::Gratuity(GratuityResult {
                    gratuity: 288_461.54,
                }),
                "Gratuity",
                vec!["Gratuity Amount"],
                0,
                "₹2,88,461.54",
            ),
            (
                CalculatorResult::Retirement(RetirementResult {
                    corpus: 8_000_000.0,
                    required_corpus: 12_000_000.0,
                    status: "Insufficient".to_string(),
                }),
                "Retirement Planning",
                vec!["Expected Corpus", "Required Corpus", "Status"],
                1,
                "₹1,20,00,000.00",
            ),
        ];

        for (result, title, expected_labels, index, value) in cases {
            let summary = summarize(&result);
            assert_eq!(summary.title, title);
            let labels: Vec<&str> = summary.lines.iter().map(|l| l.label).collect();
            assert_eq!(labels, expected_labels, "{title}");
            assert_eq!(summary.lines[index].value, value, "{title}");
        }
    }

    #[test]
    fn dti_risk_level_and_percent_formatting() {
        assert_eq!(format_percent(33.333), "33.33%");
        let summary = summarize(&CalculatorResult::Dti(DtiResult {
            dti_ratio: 41.5,
            risk_level: "High".to_string(),
            debt: 41_500.0,
            remaining_income: 58_500.0,
            income: 100_000.0,
        }));
        assert_eq!(summary.lines[0].value, "41.50%");
        assert_eq!(summary.lines[1].value, "High");
        assert_eq!(summary.lines[2].value, "₹41,500.00");
    }

    #[test]
    fn retirement_summary_passes_status_through() {
        let summary = summarize(&CalculatorResult::Retirement(RetirementResult {
            corpus: 35_294_536.0,
            required_corpus: 12_000_000.0,
            status: "Sufficient".to_string(),
        }));
        assert_eq!(summary.lines.len(), 3);
        assert_eq!(summary.lines[2].value, "Sufficient");
        assert_eq!(summary.lines[0].value, "₹3,52,94,536.00");
    }

    #[test]
    fn fallback_has_no_lines() {
        let summary = unknown_type_summary();
        assert_eq!(summary.title, UNKNOWN_TYPE_MESSAGE);
        assert!(summary.lines.is_empty());
    }
}
