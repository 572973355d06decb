//! Kernels over long storages.

use tabmap_core::error::Result;

use crate::map::{BinaryKernel, TernaryKernel, UnaryKernel};
use crate::problems::ProblemBuilder;
use crate::registry::Registry;

use super::{overflow_message, round_range_message, DIVISION_BY_ZERO, ROUND_MAX_LONG, ROUND_MIN_LONG};

/// Round `n` to `decimal_places`. Non-negative places leave a long unchanged;
/// negative places round to a multiple of `10^-places`, ties away from zero or,
/// with `use_bankers`, to the even multiple. `None` on overflow.
pub fn round_long(n: i64, decimal_places: i64, use_bankers: bool) -> Option<i64> {
    if decimal_places >= 0 {
        return Some(n);
    }
    let scale = match u32::try_from(decimal_places.unsigned_abs())
        .ok()
        .and_then(|digits| 10i64.checked_pow(digits))
    {
        Some(scale) => scale,
        // 10^19 and beyond do not fit; only zero is a multiple of them.
        None => return Some(0),
    };

    let quotient = n / scale;
    let remainder = n % scale;
    let twice = remainder.unsigned_abs() * 2;
    let away = match twice.cmp(&scale.unsigned_abs()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => !use_bankers || quotient % 2 != 0,
    };
    let rounded = if away {
        quotient.checked_add(n.signum())?
    } else {
        quotient
    };
    rounded.checked_mul(scale)
}

/// Floor modulo: the result takes the sign of the divisor.
pub fn floor_mod(a: i64, b: i64) -> i64 {
    if b == -1 {
        return 0;
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn abs(v: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
    let out = v.checked_abs();
    if out.is_none() {
        pb.append_error_with_value(row, overflow_message("abs", v), *v);
    }
    out
}

fn negate(v: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
    let out = v.checked_neg();
    if out.is_none() {
        pb.append_error_with_value(row, overflow_message("negate", v), *v);
    }
    out
}

macro_rules! checked_binary {
    ($fn_name:ident, $method:ident, $op:literal, $sym:literal) => {
        fn $fn_name(a: &i64, b: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
            let out = a.$method(*b);
            if out.is_none() {
                pb.append_error_with_value(
                    row,
                    overflow_message($op, format_args!("{} {} {}", a, $sym, b)),
                    *a,
                );
            }
            out
        }
    };
}

checked_binary!(add, checked_add, "add", "+");
checked_binary!(sub, checked_sub, "sub", "-");
checked_binary!(mul, checked_mul, "mul", "*");

fn div(a: &i64, b: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
    if *b == 0 {
        pb.append_warning_with_value(row, DIVISION_BY_ZERO, *a);
        return None;
    }
    let out = a.checked_div(*b);
    if out.is_none() {
        pb.append_error_with_value(row, overflow_message("div", format_args!("{a} / {b}")), *a);
    }
    out
}

fn modulo(a: &i64, b: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
    if *b == 0 {
        pb.append_warning_with_value(row, DIVISION_BY_ZERO, *a);
        return None;
    }
    Some(floor_mod(*a, *b))
}

fn add_double(a: &i64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(*a as f64 + b)
}

fn sub_double(a: &i64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(*a as f64 - b)
}

fn mul_double(a: &i64, b: &f64, _: usize, _: &mut ProblemBuilder) -> Option<f64> {
    Some(*a as f64 * b)
}

fn div_double(a: &i64, b: &f64, row: usize, pb: &mut ProblemBuilder) -> Option<f64> {
    if *b == 0.0 {
        pb.append_warning_with_value(row, DIVISION_BY_ZERO, *a);
        return None;
    }
    Some(*a as f64 / b)
}

fn round(
    item: &i64,
    decimal_places: &i64,
    use_bankers: &bool,
    row: usize,
    pb: &mut ProblemBuilder,
) -> Option<i64> {
    if !(ROUND_MIN_LONG..=ROUND_MAX_LONG).contains(item) {
        pb.append_error_with_value(row, round_range_message(item), *item);
        return None;
    }
    let out = round_long(*item, *decimal_places, *use_bankers);
    if out.is_none() {
        pb.append_error_with_value(
            row,
            overflow_message("round", format_args!("{item} to {decimal_places} places")),
            *item,
        );
    }
    out
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register_unary(UnaryKernel::<i64, i64>::new("abs", abs))?;
    registry.register_unary(UnaryKernel::<i64, i64>::new("negate", negate))?;

    registry.register_binary(BinaryKernel::<i64, i64, i64>::new("add", add))?;
    registry.register_binary(BinaryKernel::<i64, i64, i64>::new("sub", sub))?;
    registry.register_binary(BinaryKernel::<i64, i64, i64>::new("mul", mul))?;
    registry.register_binary(BinaryKernel::<i64, i64, i64>::new("div", div))?;
    registry.register_binary(BinaryKernel::<i64, i64, i64>::new("mod", modulo))?;

    registry.register_binary(BinaryKernel::<i64, f64, f64>::new("add", add_double))?;
    registry.register_binary(BinaryKernel::<i64, f64, f64>::new("sub", sub_double))?;
    registry.register_binary(BinaryKernel::<i64, f64, f64>::new("mul", mul_double))?;
    registry.register_binary(BinaryKernel::<i64, f64, f64>::new("div", div_double))?;

    registry.register_ternary(TernaryKernel::<i64, i64, bool, i64>::new("round", round))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_long_non_negative_places_is_identity() {
        assert_eq!(round_long(1234, 0, false), Some(1234));
        assert_eq!(round_long(-1234, 3, true), Some(-1234));
    }

    #[test]
    fn test_round_long_half_away_from_zero() {
        assert_eq!(round_long(1250, -2, false), Some(1300));
        assert_eq!(round_long(-1250, -2, false), Some(-1300));
        assert_eq!(round_long(1249, -2, false), Some(1200));
        assert_eq!(round_long(1251, -2, false), Some(1300));
        assert_eq!(round_long(5, -1, false), Some(10));
    }

    #[test]
    fn test_round_long_bankers() {
        assert_eq!(round_long(1250, -2, true), Some(1200));
        assert_eq!(round_long(1350, -2, true), Some(1400));
        assert_eq!(round_long(-1250, -2, true), Some(-1200));
        assert_eq!(round_long(-1350, -2, true), Some(-1400));
        assert_eq!(round_long(1251, -2, true), Some(1300));
    }

    #[test]
    fn test_round_long_huge_scale() {
        assert_eq!(round_long(ROUND_MAX_LONG, -15, false), Some(0));
        assert_eq!(round_long(ROUND_MAX_LONG, -14, false), Some(100_000_000_000_000));
        assert_eq!(round_long(42, -40, false), Some(0));
    }

    #[test]
    fn test_round_long_overflow_is_none() {
        assert_eq!(round_long(i64::MAX, -1, false), None);
    }

    #[test]
    fn test_floor_mod_follows_divisor_sign() {
        assert_eq!(floor_mod(7, 3), 1);
        assert_eq!(floor_mod(-7, 3), 2);
        assert_eq!(floor_mod(7, -3), -2);
        assert_eq!(floor_mod(-7, -3), -1);
        assert_eq!(floor_mod(i64::MIN, -1), 0);
    }

    #[test]
    fn test_round_rejects_out_of_range() {
        let mut pb = ProblemBuilder::new();
        assert_eq!(round(&(ROUND_MAX_LONG + 1), &0, &false, 3, &mut pb), None);
        assert_eq!(round(&ROUND_MAX_LONG, &0, &false, 4, &mut pb), Some(ROUND_MAX_LONG));
        let report = pb.finish();
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].row, 3);
        assert!(report.problems[0].message.contains("100000000000000"));
    }
}
