//! Complex numbers over a [`Scalar`] coefficient ring.
//!
//! Grounded on `algebra/Complex.hpp`, which in the reference implementation is a
//! bare `std::complex<double>` plus free `one()`/`zero()`/`I()` helpers. This crate
//! needs the same shape genericized over `Rational` as well as `f64`, so rather than
//! reuse `num_complex::Complex` (which would require `Rational` to implement
//! `num_traits::Num`/`FromStrRadix`, machinery the spec never calls for) this is a
//! small dedicated type built on [`Scalar`].

use crate::scalar::Scalar;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex<S: Scalar> {
    pub re: S,
    pub im: S,
}

impl<S: Scalar> Complex<S> {
    pub fn new(re: S, im: S) -> Self {
        Complex { re, im }
    }

    pub fn real(re: S) -> Self {
        Complex { re, im: S::zero() }
    }

    pub fn zero() -> Self {
        Complex {
            re: S::zero(),
            im: S::zero(),
        }
    }

    pub fn one() -> Self {
        Complex {
            re: S::one(),
            im: S::zero(),
        }
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Complex {
            re: S::zero(),
            im: S::one(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn conj(&self) -> Self {
        Complex {
            re: self.re,
            im: -self.im,
        }
    }
}

impl<S: Scalar> Add for Complex<S> {
    type Output = Complex<S>;
    fn add(self, rhs: Self) -> Self::Output {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<S: Scalar> Sub for Complex<S> {
    type Output = Complex<S>;
    fn sub(self, rhs: Self) -> Self::Output {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<S: Scalar> Mul for Complex<S> {
    type Output = Complex<S>;
    fn mul(self, rhs: Self) -> Self::Output {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<S: Scalar> Div for Complex<S> {
    type Output = Complex<S>;
    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        )
    }
}

impl<S: Scalar> Neg for Complex<S> {
    type Output = Complex<S>;
    fn neg(self) -> Self::Output {
        Complex::new(-self.re, -self.im)
    }
}

impl<S: Scalar> fmt::Display for Complex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            write!(f, "{}", self.re)
        } else if self.re.is_zero() {
            write!(f, "{}I", self.im)
        } else {
            write!(f, "{} + {}I", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn multiplication_matches_standard_identity() {
        let i: Complex<Rational> = Complex::i();
        assert_eq!(i * i, -Complex::one());
    }

    #[test]
    fn division_is_inverse_of_multiplication() {
        let a = Complex::new(3.0_f64, 2.0);
        let b = Complex::new(1.0_f64, -1.0);
        let q = a / b;
        assert!((q * b - a).re.abs() < 1e-9);
        assert!((q * b - a).im.abs() < 1e-9);
    }

    #[test]
    fn zero_is_additive_identity() {
        let a: Complex<Rational> = Complex::new(Rational::from_int(2), Rational::from_int(3));
        assert_eq!(a + Complex::zero(), a);
    }
}
