//! Interface boundary for an external Fierz-identity generator.
//!
//! The kernel does not implement fourth- or sixth-order Fierz rearrangement
//! itself (SPEC_FULL.md §4.11) — this trait is the seam an external collaborator
//! would implement against, using nothing but the public kernel API
//! (`crate::polynomial`, `crate::gamma::reduce_gamma`, `CanonicalExpr`).

use crate::gamma::basis::GammaPolynomial;
use crate::gamma::reduce::CanonicalExpr;
use crate::scalar::Scalar;

/// Exposes both a reduced expression and the gamma polynomial it came from,
/// so a Fierz generator can build further products (e.g. rearranging a
/// bilinear product's spinor index contraction order) and re-reduce them
/// through [`crate::gamma::reduce_gamma`] without the kernel knowing anything
/// about Fierz identities itself.
pub trait FierzSource<S: Scalar> {
    /// The expression's canonical five-component form.
    fn canonical(&self) -> &CanonicalExpr<S>;

    /// The gamma-basis polynomial the canonical form was reduced from.
    fn source_polynomial(&self) -> &GammaPolynomial<S>;
}

/// Pairs a gamma polynomial with its reduction, the minimal concrete type
/// satisfying [`FierzSource`].
pub struct ReducedExpr<S: Scalar> {
    source: GammaPolynomial<S>,
    canonical: CanonicalExpr<S>,
}

impl<S: Scalar> ReducedExpr<S> {
    pub fn new(source: GammaPolynomial<S>) -> Self {
        let canonical = crate::gamma::reduce::reduce_gamma(&source);
        ReducedExpr { source, canonical }
    }
}

impl<S: Scalar> FierzSource<S> for ReducedExpr<S> {
    fn canonical(&self) -> &CanonicalExpr<S> {
        &self.canonical
    }

    fn source_polynomial(&self) -> &GammaPolynomial<S> {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::gamma::basis::gamma_scalar_poly;
    use crate::rational::Rational;

    #[test]
    fn reduced_expr_exposes_both_views() {
        let poly: GammaPolynomial<Rational> = gamma_scalar_poly(Complex::real(Rational::from_int(3)));
        let reduced = ReducedExpr::new(poly.clone());
        assert_eq!(*reduced.source_polynomial(), poly);
        assert!(reduced
            .canonical()
            .is_scalar(Complex::real(Rational::from_int(3))));
    }
}
