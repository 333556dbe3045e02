//! The coefficient ring over which [`crate::complex::Complex`] and every polynomial
//! in this crate is generic.
//!
//! Two scalar types are used throughout: [`crate::rational::Rational`] (exact mode)
//! and `f64` (float mode). `Scalar` bundles exactly the operations both the LI
//! canonicalizer and the pretty-printer need.

use num_traits::{One, Signed, Zero};
use std::fmt::Display;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A field-like scalar usable as a Dirac-algebra coefficient.
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Signed
    + Display
    + 'static
{
    /// `4`, the trace of the identity matrix — used by index contraction.
    fn four() -> Self {
        Self::one() + Self::one() + Self::one() + Self::one()
    }

    /// `2`, used by the σ structure-matrix definition `(i/2)[γ^μ, γ^ν]`.
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Whether the tokenizer's numeral scanner accepts a decimal point for
    /// this scalar mode. `Rational` reads integer digit runs only; `f64`
    /// additionally allows one `.`.
    fn allows_decimal_point() -> bool {
        false
    }

    /// Parses a numeral scanned by the tokenizer (a run of digits, with an
    /// optional `.` when [`Scalar::allows_decimal_point`] is true).
    fn from_numeral(text: &str) -> Option<Self>;

    /// LaTeX rendering of this scalar. The default just calls `Display`;
    /// `Rational` overrides it to emit `\frac{num}{den}` for non-integers.
    fn to_latex(&self) -> String {
        self.to_string()
    }
}

impl Scalar for crate::rational::Rational {
    fn from_numeral(text: &str) -> Option<Self> {
        text.parse::<i64>().ok().map(Self::from_int)
    }

    fn to_latex(&self) -> String {
        if self.denominator() == 1 {
            return self.numerator().to_string();
        }
        if self.numerator() < 0 {
            format!("-\\frac{{{}}}{{{}}}", -self.numerator(), self.denominator())
        } else {
            format!("\\frac{{{}}}{{{}}}", self.numerator(), self.denominator())
        }
    }
}

impl Scalar for f64 {
    fn allows_decimal_point() -> bool {
        true
    }

    fn from_numeral(text: &str) -> Option<Self> {
        text.parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn four_and_two() {
        assert_eq!(Rational::four(), Rational::from_int(4));
        assert_eq!(f64::four(), 4.0);
        assert_eq!(f64::two(), 2.0);
    }
}
