//! Input values for the calculator
//!
//! These types hold the bounds the calculator itself doesn't check:
//! split count stays in 1..=10, the slider stays in 0.0..=1.0, and the bill
//! text has to parse before any arithmetic happens.

use super::CalcError;

/// Largest bill we accept; keeps tip and total finite at any percentage
pub const MAX_BILL: f64 = 1_000_000_000_000.0;

/// Parse user-entered bill text
pub fn parse_bill(text: &str) -> Result<f64, CalcError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::EmptyBill);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value > MAX_BILL => Err(CalcError::BillTooLarge(MAX_BILL)),
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CalcError::InvalidBill(trimmed.to_string())),
    }
}

/// Number of people sharing the bill, always within [`SplitCount::MIN`]..=[`SplitCount::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SplitCount(u32);

impl SplitCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(n: u32) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns false if already at the maximum
    pub fn increment(&mut self) -> bool {
        if self.0 < Self::MAX {
            self.0 += 1;
            true
        } else {
            false
        }
    }

    /// Returns false if already at the minimum
    pub fn decrement(&mut self) -> bool {
        if self.0 > Self::MIN {
            self.0 -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for SplitCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Raw tip slider value in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SliderPosition(f32);

impl SliderPosition {
    pub fn new(position: f32) -> Self {
        if position.is_nan() {
            return Self(0.0);
        }
        Self(position.clamp(0.0, 1.0))
    }

    /// Slider position in the middle of the percentage's bucket, so
    /// truncation maps it back to `pct` despite f32 rounding
    pub fn from_percentage(pct: TipPercentage) -> Self {
        Self::new((pct.get() as f32 + 0.5) / 100.0)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Move by whole percentage points, clamped to 0%..=100%
    pub fn nudge(self, delta_pct: i32) -> Self {
        let current = self.tip_percentage().get();
        Self::from_percentage(TipPercentage::new(current.saturating_add(delta_pct)))
    }

    pub fn tip_percentage(self) -> TipPercentage {
        TipPercentage::from_slider(self)
    }
}

/// Whole-number tip percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TipPercentage(i32);

impl TipPercentage {
    pub const MAX: i32 = 100;

    pub fn new(pct: i32) -> Self {
        Self(pct.clamp(0, Self::MAX))
    }

    /// Truncates toward zero, so 0.999 is 99%
    pub fn from_slider(position: SliderPosition) -> Self {
        Self((position.get() * 100.0) as i32)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bill() {
        assert_eq!(parse_bill("100"), Ok(100.0));
        assert_eq!(parse_bill(" 42.50 "), Ok(42.5));
        assert_eq!(parse_bill(".5"), Ok(0.5));
        assert_eq!(parse_bill("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_bill_rejects_bad_input() {
        assert_eq!(parse_bill(""), Err(CalcError::EmptyBill));
        assert_eq!(parse_bill("   "), Err(CalcError::EmptyBill));
        assert_eq!(parse_bill("."), Err(CalcError::InvalidBill(".".to_string())));
        assert_eq!(parse_bill("abc"), Err(CalcError::InvalidBill("abc".to_string())));
        assert_eq!(parse_bill("-5"), Err(CalcError::InvalidBill("-5".to_string())));
        assert!(parse_bill("inf").is_err());
        assert!(parse_bill("NaN").is_err());
    }

    #[test]
    fn test_parse_bill_caps_huge_amounts() {
        assert_eq!(parse_bill("999999999999"), Ok(999_999_999_999.0));
        assert_eq!(parse_bill("1e12"), Ok(MAX_BILL));
        assert_eq!(parse_bill("1e307"), Err(CalcError::BillTooLarge(MAX_BILL)));
        assert_eq!(parse_bill("1000000000000.01"), Err(CalcError::BillTooLarge(MAX_BILL)));
    }

    #[test]
    fn test_split_count_clamps() {
        assert_eq!(SplitCount::new(0).get(), 1);
        assert_eq!(SplitCount::new(5).get(), 5);
        assert_eq!(SplitCount::new(42).get(), 10);
        assert_eq!(SplitCount::default().get(), 1);
    }

    #[test]
    fn test_split_count_bounds() {
        let mut split = SplitCount::default();
        assert!(!split.decrement());
        assert_eq!(split.get(), 1);

        for _ in 0..20 {
            split.increment();
        }
        assert_eq!(split.get(), 10);
        assert!(!split.increment());

        assert!(split.decrement());
        assert_eq!(split.get(), 9);
    }

    #[test]
    fn test_slider_truncates_toward_zero() {
        assert_eq!(SliderPosition::new(0.0).tip_percentage().get(), 0);
        assert_eq!(SliderPosition::new(0.07).tip_percentage().get(), 7);
        assert_eq!(SliderPosition::new(0.999).tip_percentage().get(), 99);
        assert_eq!(SliderPosition::new(0.5).tip_percentage().get(), 50);
        assert_eq!(SliderPosition::new(1.0).tip_percentage().get(), 100);
    }

    #[test]
    fn test_slider_clamps() {
        assert_eq!(SliderPosition::new(-0.3).get(), 0.0);
        assert_eq!(SliderPosition::new(1.7).get(), 1.0);
        assert_eq!(SliderPosition::new(f32::NAN).get(), 0.0);
    }

    #[test]
    fn test_slider_nudge() {
        let slider = SliderPosition::default().nudge(1);
        assert_eq!(slider.tip_percentage().get(), 1);

        let slider = SliderPosition::new(0.999).nudge(-5);
        assert_eq!(slider.tip_percentage().get(), 94);

        let slider = SliderPosition::new(0.98).nudge(5);
        assert_eq!(slider.tip_percentage().get(), 100);
        assert_eq!(slider.get(), 1.0);

        let slider = SliderPosition::new(0.02).nudge(-10);
        assert_eq!(slider.tip_percentage().get(), 0);

        let mut slider = SliderPosition::default();
        for _ in 0..37 {
            slider = slider.nudge(1);
        }
        assert_eq!(slider.tip_percentage().get(), 37);
    }

    #[test]
    fn test_percentage_round_trips_through_slider() {
        for pct in 0..=100 {
            let slider = SliderPosition::from_percentage(TipPercentage::new(pct));
            assert_eq!(slider.tip_percentage().get(), pct, "pct={}", pct);
        }
    }

    #[test]
    fn test_tip_percentage_clamps() {
        assert_eq!(TipPercentage::new(-5).get(), 0);
        assert_eq!(TipPercentage::new(18).get(), 18);
        assert_eq!(TipPercentage::new(300).get(), 100);
    }
}
