//! Kernels over double storages.

use tabmap_core::error::Result;

use crate::map::{BinaryKernel, TernaryKernel, UnaryKernel};
use crate::problems::ProblemBuilder;
use crate::registry::Registry;

use super::{round_range_message, DIVISION_BY_ZERO, ROUND_MAX_DOUBLE, ROUND_MIN_DOUBLE};

/// Beyond this many places a double within the round bounds has no digits left to drop.
const MAX_SIGNIFICANT_PLACES: i64 = 15;

/// Round a finite `x` (within the round bounds) to `decimal_places`, ties away
/// from zero or, with `use_bankers`, to even.
pub fn round_double(x: f64, decimal_places: i64, use_bankers: bool) -> f64 {
    let round = |v: f64| if use_bankers { v.round_ties_even() } else { v.round() };
    if decimal_places > MAX_SIGNIFICANT_PLACES {
        return x;
    }
    if decimal_places < -MAX_SIGNIFICANT_PLACES {
        return 0.0;
    }
    // decimal_places is within +-15 here.
    let places = decimal_places as i32;
    if places >= 0 {
        let scale = 10f64.powi(places);
        round(x * scale) / scale
    } else {
        let scale = 10f64.powi(-places);
        round(x / scale) * scale
    }
}

fn abs(v: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(v.abs())
}

fn negate(v: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(-v)
}

fn add(a: &f64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(a + b)
}

fn sub(a: &f64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(a - b)
}

fn mul(a: &f64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(a * b)
}

fn div(a: &f64, b: &f64, row: usize, pb: &mut ProblemBuilder) -> Option<f64> {
    if *b == 0.0 {
        pb.append_warning_with_value(row, DIVISION_BY_ZERO, *a);
        return None;
    }
    Some(a / b)
}

fn round(
    item: &f64,
    decimal_places: &i64,
    use_bankers: &bool,
    row: usize,
    pb: &mut ProblemBuilder,
) -> Option<f64> {
    if !item.is_finite() {
        pb.append_error_with_value(row, format!("Error: `round` cannot round {item}"), *item);
        return None;
    }
    if !(ROUND_MIN_DOUBLE..=ROUND_MAX_DOUBLE).contains(item) {
        pb.append_error_with_value(row, round_range_message(item), *item);
        return None;
    }
    Some(round_double(*item, *decimal_places, *use_bankers))
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register_unary(UnaryKernel::<f64, f64>::new("abs", abs))?;
    registry.register_unary(UnaryKernel::<f64, f64>::new("negate", negate))?;

    registry.register_binary(BinaryKernel::<f64, f64, f64>::new("add", add))?;
    registry.register_binary(BinaryKernel::<f64, f64, f64>::new("sub", sub))?;
    registry.register_binary(BinaryKernel::<f64, f64, f64>::new("mul", mul))?;
    registry.register_binary(BinaryKernel::<f64, f64, f64>::new("div", div))?;

    registry.register_ternary(TernaryKernel::<f64, i64, bool, f64>::new("round", round))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_double_positive_places() {
        assert_eq!(round_double(1234.5678, 2, false), 1234.57);
        assert_eq!(round_double(2.5, 0, false), 3.0);
        assert_eq!(round_double(-2.5, 0, false), -3.0);
    }

    #[test]
    fn test_round_double_bankers() {
        assert_eq!(round_double(2.5, 0, true), 2.0);
        assert_eq!(round_double(3.5, 0, true), 4.0);
        assert_eq!(round_double(-2.5, 0, true), -2.0);
    }

    #[test]
    fn test_round_double_negative_places() {
        assert_eq!(round_double(1250.0, -2, false), 1300.0);
        assert_eq!(round_double(1250.0, -2, true), 1200.0);
        assert_eq!(round_double(1234.0, -20, false), 0.0);
        assert_eq!(round_double(0.125, 40, false), 0.125);
    }

    #[test]
    fn test_round_reports_non_finite() {
        let mut pb = ProblemBuilder::new();
        assert_eq!(round(&f64::NAN, &0, &false, 0, &mut pb), None);
        assert_eq!(round(&f64::INFINITY, &0, &false, 1, &mut pb), None);
        assert_eq!(round(&1e15, &0, &false, 2, &mut pb), None);
        let report = pb.finish();
        assert_eq!(report.problems.len(), 3);
        assert!(report.problems[2].message.contains("(inclusive)"));
    }
}
