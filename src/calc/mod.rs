//! Bill arithmetic: tip amount and per-person share.
//!
//! Everything in here is pure. The screen and the one-shot CLI both call
//! [`calculate`] on every input change, so outputs are never cached.

pub mod inputs;

use serde::Serialize;
use thiserror::Error;

/// Bills at or below this amount get no tip.
const TIP_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Cannot split a bill between zero people")]
    ZeroSplit,

    #[error("Bill amount is empty")]
    EmptyBill,

    #[error("Invalid bill amount: {0:?}")]
    InvalidBill(String),

    #[error("Bill amount is larger than {0}")]
    BillTooLarge(f64),
}

/// Tip for a bill at the given percentage.
///
/// Bills of 1.0 or less (including zero and negatives) produce no tip. The
/// percentage is not range-checked here; callers pass a [`inputs::TipPercentage`].
pub fn compute_tip(bill_amount: f64, tip_percentage: i32) -> f64 {
    if bill_amount > TIP_THRESHOLD {
        bill_amount * f64::from(tip_percentage) / 100.0
    } else {
        0.0
    }
}

/// Bill plus tip, divided evenly between `split_count` people.
pub fn compute_total_per_person(
    bill_amount: f64,
    split_count: u32,
    tip_percentage: i32,
) -> Result<f64, CalcError> {
    if split_count == 0 {
        return Err(CalcError::ZeroSplit);
    }
    let total = bill_amount + compute_tip(bill_amount, tip_percentage);
    Ok(total / f64::from(split_count))
}

/// Everything the screen (or `--json`) shows for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub bill_amount: f64,
    pub split_count: u32,
    pub tip_percentage: i32,
    pub tip_amount: f64,
    pub total_per_person: f64,
}

pub fn calculate(
    bill_amount: f64,
    split: inputs::SplitCount,
    tip: inputs::TipPercentage,
) -> Result<Summary, CalcError> {
    Ok(Summary {
        bill_amount,
        split_count: split.get(),
        tip_percentage: tip.get(),
        tip_amount: compute_tip(bill_amount, tip.get()),
        total_per_person: compute_total_per_person(bill_amount, split.get(), tip.get())?,
    })
}

/// Two-decimal money string, e.g. `$27.50`
pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, value)
}

#[cfg(test)]
mod tests {
    use super::inputs::{SplitCount, TipPercentage};
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_no_tip_at_or_below_threshold() {
        for bill in [-50.0, -0.01, 0.0, 0.5, 0.99, 1.0] {
            for pct in [0, 15, 20, 100, 250, -10] {
                assert_eq!(compute_tip(bill, pct), 0.0, "bill={} pct={}", bill, pct);
            }
        }
    }

    #[test]
    fn test_tip_above_threshold() {
        assert!(approx(compute_tip(1.01, 100), 1.01));
        assert!(approx(compute_tip(100.0, 20), 20.0));
        assert!(approx(compute_tip(42.5, 18), 7.65));
        // Percentage isn't clamped at this layer
        assert!(approx(compute_tip(10.0, 150), 15.0));
    }

    #[test]
    fn test_total_times_split_matches_bill_plus_tip() {
        for bill in [0.5, 1.0, 12.34, 100.0, 987.65] {
            for split in 1..=10u32 {
                for pct in [0, 7, 15, 33, 100] {
                    let per_person = compute_total_per_person(bill, split, pct).unwrap();
                    let expected = bill + compute_tip(bill, pct);
                    assert!((per_person * f64::from(split) - expected).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_total_non_increasing_in_split() {
        for bill in [0.0, 3.0, 59.99, 250.0] {
            let mut previous = f64::INFINITY;
            for split in 1..=10u32 {
                let total = compute_total_per_person(bill, split, 18).unwrap();
                assert!(total <= previous, "bill={} split={}", bill, split);
                previous = total;
            }
        }
    }

    #[test]
    fn test_zero_split_is_an_error() {
        assert_eq!(compute_total_per_person(100.0, 0, 20), Err(CalcError::ZeroSplit));
    }

    #[test]
    fn test_scenarios() {
        let cases = [
            // bill, pct, split, tip, total per person
            (100.0, 20, 1, 20.0, 120.0),
            (50.0, 10, 2, 5.0, 27.5),
            (0.5, 15, 1, 0.0, 0.5),
            (200.0, 0, 4, 0.0, 50.0),
        ];
        for (bill, pct, split, tip, total) in cases {
            assert!(approx(compute_tip(bill, pct), tip));
            assert!(approx(compute_total_per_person(bill, split, pct).unwrap(), total));

            let summary = calculate(bill, SplitCount::new(split), TipPercentage::new(pct)).unwrap();
            assert!(approx(summary.tip_amount, tip));
            assert!(approx(summary.total_per_person, total));
        }
    }

    #[test]
    fn test_calculate_matches_pure_functions() {
        let summary = calculate(87.3, SplitCount::new(3), TipPercentage::new(22)).unwrap();
        assert_eq!(summary.split_count, 3);
        assert_eq!(summary.tip_percentage, 22);
        assert!(approx(summary.tip_amount, compute_tip(87.3, 22)));
        assert!(approx(
            summary.total_per_person,
            compute_total_per_person(87.3, 3, 22).unwrap()
        ));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("$", 120.0), "$120.00");
        assert_eq!(format_amount("$", 27.5), "$27.50");
        assert_eq!(format_amount("€", 0.0), "€0.00");
        assert_eq!(format_amount("$", 33.333), "$33.33");
    }

    #[test]
    fn test_summary_serializes() {
        let summary = calculate(50.0, SplitCount::new(2), TipPercentage::new(10)).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["split_count"], 2);
        assert_eq!(json["tip_percentage"], 10);
        assert_eq!(json["total_per_person"], 27.5);
    }
}
