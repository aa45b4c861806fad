use crate::domain::graph::Cost;

/// Default share added on top of the lower bound.
pub const DEFAULT_PERCENTAGE: f64 = 0.1;

/// Budget derived from a Steiner tree cost, together with the markup it was
/// computed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetLine {
    pub budget: Cost,
    pub percentage: f64,
}

impl BudgetLine {
    pub fn from_lower_bound(lower_bound: Cost, percentage: f64) -> Self {
        Self {
            budget: compute_budget(lower_bound, percentage),
            percentage,
        }
    }

    /// Comment line written above the budget in an instance file.
    pub fn comment(&self) -> String {
        format!(
            "c the budget calculated from the minimum Steiner tree cost plus {}%.",
            decimal(self.percentage * 100.0)
        )
    }

    pub fn directive(&self) -> String {
        format!("b {}", self.budget)
    }
}

/// Shortest round-trip form, keeping `.0` on whole numbers (`50.0`, `12.5`).
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// `round(lower_bound * (1 + percentage))`, halves rounded to even.
///
/// Negative results clamp to zero and results beyond `Cost::MAX` saturate.
pub fn compute_budget(lower_bound: Cost, percentage: f64) -> Cost {
    let raw = lower_bound as f64 + lower_bound as f64 * percentage;
    let rounded = raw.round_ties_even();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        // `as` saturates at Cost::MAX.
        rounded as Cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markup() {
        assert_eq!(compute_budget(8, DEFAULT_PERCENTAGE), 9);
        assert_eq!(compute_budget(100, DEFAULT_PERCENTAGE), 110);
    }

    #[test]
    fn test_zero_lower_bound() {
        assert_eq!(compute_budget(0, 0.5), 0);
    }

    #[test]
    fn test_zero_percentage_is_identity() {
        assert_eq!(compute_budget(37, 0.0), 37);
    }

    #[test]
    fn test_halves_round_to_even() {
        // 5 * 1.5 = 7.5 -> 8, 3 * 1.5 = 4.5 -> 4
        assert_eq!(compute_budget(5, 0.5), 8);
        assert_eq!(compute_budget(3, 0.5), 4);
    }

    #[test]
    fn test_negative_markup_clamps_at_zero() {
        assert_eq!(compute_budget(10, -0.25), 8);
        assert_eq!(compute_budget(10, -2.0), 0);
    }

    #[test]
    fn test_budget_line_text() {
        let line = BudgetLine::from_lower_bound(20, 0.5);
        assert_eq!(line.budget, 30);
        assert_eq!(line.directive(), "b 30");
        assert_eq!(
            line.comment(),
            "c the budget calculated from the minimum Steiner tree cost plus 50.0%."
        );
    }

    #[test]
    fn test_percentage_text_keeps_decimal_point() {
        let text = |p| BudgetLine::from_lower_bound(8, p).comment();
        assert!(text(0.1).ends_with(" plus 10.0%."));
        assert!(text(0.0).ends_with(" plus 0.0%."));
        assert!(text(1.0).ends_with(" plus 100.0%."));
        assert!(text(0.125).ends_with(" plus 12.5%."));
        assert!(text(0.07).ends_with(" plus 7.000000000000001%."));
    }
}
