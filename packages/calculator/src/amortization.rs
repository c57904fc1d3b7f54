//! Month-by-month principal/interest breakdown of a fixed-EMI loan.
//!
//! The Calculation Service returns only the principal and EMI; the rate and
//! tenure come from the submitted form. The schedule is a pure function of
//! those four inputs and is recomputed on every render.

use livability_calculator_models::{AmortizationPoint, FormFields};

/// Form field holding the nominal annual interest rate in percent.
pub const RATE_FIELD: &str = "rate";

/// Form field holding the tenure in months.
pub const TENURE_FIELD: &str = "tenure";

/// Rate and tenure read from a submitted EMI form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    /// Nominal annual rate in percent (e.g. `8.5`).
    pub annual_rate_percent: f64,
    /// Number of monthly instalments.
    pub tenure_months: u32,
}

impl LoanTerms {
    /// Reads [`RATE_FIELD`] and [`TENURE_FIELD`] from `fields`. Returns
    /// `None` if either is missing, unparsable, or the tenure is zero.
    #[must_use]
    pub fn from_form(fields: &FormFields) -> Option<Self> {
        let annual_rate_percent = fields.get(RATE_FIELD)?.trim().parse::<f64>().ok()?;
        let tenure_months = fields
            .get(TENURE_FIELD)?
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)?;
        Some(Self {
            annual_rate_percent,
            tenure_months,
        })
    }
}

/// Computes the amortization schedule.
///
/// Each period charges `balance × monthly_rate` interest and repays the
/// rest of the EMI as principal. Both recorded amounts are clamped to zero,
/// but the running balance is not, so it can go negative when the EMI
/// overpays. Always returns exactly `tenure_months` points.
#[must_use]
pub fn amortization_schedule(
    principal: f64,
    emi: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Vec<AmortizationPoint> {
    let monthly_rate = annual_rate_percent / (12.0 * 100.0);
    let mut balance = principal;

    (1..=tenure_months)
        .map(|period| {
            let interest = balance * monthly_rate;
            let principal_paid = emi - interest;
            balance -= principal_paid;
            AmortizationPoint {
                period,
                principal_paid: principal_paid.max(0.0),
                interest_paid: interest.max(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn three_month_schedule_at_one_percent_monthly() {
        let schedule = amortization_schedule(100_000.0, 5_000.0, 12.0, 3);
        assert_eq!(schedule.len(), 3);

        let periods: Vec<u32> = schedule.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![1, 2, 3]);

        assert!(close(schedule[0].interest_paid, 1_000.0));
        assert!(close(schedule[0].principal_paid, 4_000.0));
        assert!(close(schedule[1].interest_paid, 960.0));
        assert!(close(schedule[1].principal_paid, 4_040.0));
        assert!(close(schedule[2].interest_paid, 919.6));
        assert!(close(schedule[2].principal_paid, 4_080.4));
    }

    #[test]
    fn emi_below_first_interest_clamps_principal() {
        // 1% of 100k is 1000, so a 500 EMI never covers interest.
        let schedule = amortization_schedule(100_000.0, 500.0, 12.0, 4);
        assert_eq!(schedule.len(), 4);
        for point in &schedule {
            assert!(close(point.principal_paid, 0.0));
            assert!(point.interest_paid > 0.0);
        }
        // Balance grows, so interest grows each month.
        assert!(schedule[3].interest_paid > schedule[0].interest_paid);
    }

    #[test]
    fn overpaid_balance_clamps_interest_but_keeps_decaying() {
        // Pays 100k off in the first month; balance then goes negative.
        let schedule = amortization_schedule(100_000.0, 101_000.0, 12.0, 3);
        assert!(close(schedule[0].interest_paid, 1_000.0));
        assert!(close(schedule[0].principal_paid, 100_000.0));
        // Balance is now 0: no interest, full EMI recorded as principal.
        assert!(close(schedule[1].interest_paid, 0.0));
        assert!(close(schedule[1].principal_paid, 101_000.0));
        // Balance is -101k: interest is negative and clamped.
        assert!(close(schedule[2].interest_paid, 0.0));
        assert!(schedule[2].principal_paid > 101_000.0);
    }

    #[test]
    fn zero_rate_is_all_principal() {
        let schedule = amortization_schedule(12_000.0, 1_000.0, 0.0, 12);
        assert_eq!(schedule.len(), 12);
        assert!(schedule.iter().all(|p| close(p.principal_paid, 1_000.0)));
        assert!(schedule.iter().all(|p| close(p.interest_paid, 0.0)));
    }

    #[test]
    fn zero_tenure_yields_empty_schedule() {
        assert!(amortization_schedule(1_000.0, 100.0, 10.0, 0).is_empty());
    }

    #[test]
    fn recomputation_is_identical() {
        let first = amortization_schedule(2_500_000.0, 21_696.0, 8.5, 240);
        let second = amortization_schedule(2_500_000.0, 21_696.0, 8.5, 240);
        assert_eq!(first, second);
        assert_eq!(first.len(), 240);
    }

    #[test]
    fn reads_terms_from_form() {
        let fields = FormFields::from([
            ("rate".to_string(), " 8.5 ".to_string()),
            ("tenure".to_string(), "240".to_string()),
            ("loan_amount".to_string(), "2500000".to_string()),
        ]);
        let terms = LoanTerms::from_form(&fields).unwrap();
        assert!(close(terms.annual_rate_percent, 8.5));
        assert_eq!(terms.tenure_months, 240);
    }

    #[test]
    fn rejects_missing_or_bad_terms() {
        let missing = FormFields::from([("rate".to_string(), "8.5".to_string())]);
        assert!(LoanTerms::from_form(&missing).is_none());

        let zero = FormFields::from([
            ("rate".to_string(), "8.5".to_string()),
            ("tenure".to_string(), "0".to_string()),
        ]);
        assert!(LoanTerms::from_form(&zero).is_none());

        let garbage = FormFields::from([
            ("rate".to_string(), "eight".to_string()),
            ("tenure".to_string(), "12".to_string()),
        ]);
        assert!(LoanTerms::from_form(&garbage).is_none());
    }
}
