//! The Dirac basis {1, γ, σ, γ^5γ, γ^5} extending the Lorentz-invariant basis.
//!
//! Grounded on `algebra/Gamma.hpp`'s `GammaBasis`, which derives from
//! `LI::Basis` and adds γ (1 index), σ (2 indices), γ^5 (0 indices).

use crate::complex::Complex;
use crate::li::LiId;
use crate::polynomial::{Canonicalize, Polynomial, Term};
use crate::scalar::Scalar;
use crate::tensor::{Basis, TensorBase};
use std::fmt;

/// Identifiers of the gamma basis: the LI basis plus γ, σ, γ^5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GammaId {
    Li(LiId),
    Gamma,
    Sigma,
    Gamma5,
}

impl fmt::Display for GammaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GammaId::Li(id) => write!(f, "{id}"),
            GammaId::Gamma => write!(f, "\\gamma"),
            GammaId::Sigma => write!(f, "\\sigma"),
            GammaId::Gamma5 => write!(f, "\\gamma^5"),
        }
    }
}

pub struct GammaBasis;

impl Basis for GammaBasis {
    type Id = GammaId;

    fn allows(_id: &GammaId) -> bool {
        true
    }

    fn max_index_count(id: &GammaId) -> usize {
        match id {
            GammaId::Li(li) => crate::li::LiBasis::max_index_count(li),
            GammaId::Gamma => 1,
            GammaId::Sigma => 2,
            GammaId::Gamma5 => 0,
        }
    }
}

pub type GammaTensor = TensorBase<GammaBasis>;

/// Polynomial over `Complex<S>` coefficients and Gamma-basis tensor factors —
/// the shape an as-yet-unreduced user expression takes.
pub type GammaPolynomial<S> = Polynomial<Complex<S>, GammaTensor>;

pub fn gamma_scalar_poly<S: Scalar>(c: Complex<S>) -> GammaPolynomial<S> {
    if c.is_zero() {
        GammaPolynomial::zero()
    } else {
        GammaPolynomial::new(vec![Term::new(c, Vec::new())])
    }
}

pub fn gamma_tensor_poly<S: Scalar>(t: GammaTensor) -> GammaPolynomial<S> {
    GammaPolynomial::new(vec![Term::new(Complex::one(), vec![t])])
}

impl<S: Scalar> Canonicalize for GammaPolynomial<S> {
    /// Gamma polynomials carry no contraction/merge identities of their own —
    /// they are only ever simplified after [`crate::gamma::reduce::reduce_gamma`]
    /// lowers them into the LI-polynomial canonical form. This pass only drops
    /// exact-zero terms, the one identity that holds before reduction.
    fn canonicalize(&mut self) {
        self.terms.retain(|t| !t.coeff.is_zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_arities() {
        assert_eq!(GammaBasis::max_index_count(&GammaId::Gamma), 1);
        assert_eq!(GammaBasis::max_index_count(&GammaId::Sigma), 2);
        assert_eq!(GammaBasis::max_index_count(&GammaId::Gamma5), 0);
        assert_eq!(
            GammaBasis::max_index_count(&GammaId::Li(LiId::Epsilon)),
            4
        );
    }
}
