//! Decimal fixed-point numbers.
//!
//! A `Fix` pairs a decimal exponent (number of fractional digits, at most
//! [`MAX_EXP`]) with a scaled integer value: `Fix::new(2, 150)` reads as
//! `1.50`. Only representation and printing live here; arithmetic is the
//! host's concern.

use std::fmt;

/// Largest supported number of fractional digits.
pub const MAX_EXP: u8 = 7;

/// A decimal fixed-point number.
///
/// Comparison is on the raw `(exp, val)` pair: `Fix::new(0, 1)` and
/// `Fix::new(1, 10)` denote the same quantity but are distinct values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fix {
    exp: u8,
    val: i64,
}

impl Fix {
    /// Create a fixed-point number with `exp` fractional digits.
    ///
    /// Exponents beyond [`MAX_EXP`] are clamped.
    #[inline]
    pub fn new(exp: u8, val: i64) -> Self {
        Fix {
            exp: exp.min(MAX_EXP),
            val,
        }
    }

    /// Number of fractional digits.
    #[inline]
    pub const fn exp(self) -> u8 {
        self.exp
    }

    /// The scaled integer value.
    #[inline]
    pub const fn val(self) -> i64 {
        self.val
    }

    /// The scaling factor, `10^exp`.
    #[inline]
    pub fn scale(self) -> i64 {
        10i64.pow(u32::from(self.exp))
    }

    /// Integer part.
    #[inline]
    pub fn int_part(self) -> i64 {
        self.val / self.scale()
    }

    /// Fractional part, as a non-negative scaled integer.
    #[inline]
    pub fn frac_part(self) -> i64 {
        (self.val % self.scale()).abs()
    }

    /// Approximate the value as a float.
    #[inline]
    #[allow(clippy::cast_precision_loss, reason = "approximation by contract")]
    pub fn to_f64(self) -> f64 {
        self.val as f64 / self.scale() as f64
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exp == 0 {
            return write!(f, "{}", self.val);
        }
        let sign = if self.val < 0 { "-" } else { "" };
        let scale = 10u64.pow(u32::from(self.exp));
        let abs = self.val.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$}",
            abs / scale,
            abs % scale,
            width = self.exp as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_number_prints_without_point() {
        assert_eq!(Fix::new(0, 42).to_string(), "42");
    }

    #[test]
    fn fraction_prints_with_leading_zeros() {
        assert_eq!(Fix::new(3, 1_500).to_string(), "1.500");
        assert_eq!(Fix::new(3, 42).to_string(), "0.042");
    }

    #[test]
    fn negative_fraction_keeps_sign() {
        assert_eq!(Fix::new(2, -150).to_string(), "-1.50");
        assert_eq!(Fix::new(2, -5).to_string(), "-0.05");
    }

    #[test]
    fn parts_split_on_scale() {
        let x = Fix::new(2, 314);
        assert_eq!(x.int_part(), 3);
        assert_eq!(x.frac_part(), 14);
        assert!((x.to_f64() - 3.14).abs() < 1e-9);
    }

    #[test]
    fn exponent_is_clamped() {
        assert_eq!(Fix::new(12, 1).exp(), MAX_EXP);
    }
}
