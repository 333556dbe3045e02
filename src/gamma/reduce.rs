//! The canonical reducer: folds an arbitrary gamma-tensor polynomial down to
//! the fixed five-component canonical form.
//!
//! Grounded on `algebra/Gamma.hpp`'s `reduceGamma` and `CanonicalExpr`.

use super::basis::{GammaId, GammaPolynomial};
use super::structure::{gamma5_matrix, gamma_matrix, sigma_matrix, GammaMatrix};
use crate::complex::Complex;
use crate::index::{IndexId, TensorIndex};
use crate::li::{self, TensorPolynomial};
use crate::scalar::Scalar;

/// Reserved generation numbers for the expression's fixed free-index slots,
/// disjoint from the positive counters minted per term by `reduce_gamma`.
const VECTOR_GEN: i64 = -1;
const TENSOR_GEN: i64 = -2;
const PSEUDO_GEN: i64 = -3;

/// The unique canonical representation of a Dirac-algebra expression: a
/// 5-vector of LI tensor polynomials bound to one shared free vector index,
/// one shared free index pair, and one shared free pseudovector index.
#[derive(Clone)]
pub struct CanonicalExpr<S: Scalar> {
    pub coeffs: [TensorPolynomial<S>; 5],
    pub vector_index: TensorIndex,
    pub tensor_indices: (TensorIndex, TensorIndex),
    pub pseudo_vector_index: TensorIndex,
}

impl<S: Scalar> CanonicalExpr<S> {
    pub fn zero() -> Self {
        CanonicalExpr {
            coeffs: std::array::from_fn(|_| TensorPolynomial::zero()),
            vector_index: TensorIndex::lower(IndexId::Tag(VECTOR_GEN, 0)),
            tensor_indices: (
                TensorIndex::lower(IndexId::Tag(TENSOR_GEN, 0)),
                TensorIndex::lower(IndexId::Tag(TENSOR_GEN, 1)),
            ),
            pseudo_vector_index: TensorIndex::lower(IndexId::Tag(PSEUDO_GEN, 0)),
        }
    }

    pub fn from_scalar(c: Complex<S>) -> Self {
        let mut e = CanonicalExpr::zero();
        e.coeffs[0] = li::scalar_poly(c);
        e
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    pub fn is_scalar(&self, value: Complex<S>) -> bool {
        if self.coeffs[1..].iter().any(|c| !c.is_zero()) {
            return false;
        }
        match self.coeffs[0].terms.as_slice() {
            [] => value.is_zero(),
            [term] => term.factors.is_empty() && term.coeff == value,
            _ => false,
        }
    }

    /// Combines two canonical expressions component-wise. Both operands must
    /// share the same fixed free-index slots, which they always do since
    /// `CanonicalExpr::zero()` is the only constructor.
    pub fn add(mut self, other: CanonicalExpr<S>) -> Self {
        for i in 0..5 {
            self.coeffs[i] = crate::polynomial::add(self.coeffs[i].clone(), other.coeffs[i].clone());
        }
        self
    }

    /// Merges `coeffs[2]` terms that are equal under σ's antisymmetry
    /// (swapping the two free tensor indices and negating).
    pub fn apply_symmetry(mut self) -> Self {
        let (a, b) = (self.tensor_indices.0.clone(), self.tensor_indices.1.clone());
        let merger = move |t1: &crate::polynomial::Term<Complex<S>, li::Tensor>,
                            t2: &crate::polynomial::Term<Complex<S>, li::Tensor>| {
            if let Some(m) = li::try_merge(t1, t2) {
                return Some(m);
            }
            let swapped = li::swap_and_negate(t2, &a, &b);
            li::try_merge(t1, &swapped)
        };
        let merged = crate::polynomial::merge_terms(self.coeffs[2].terms.clone(), merger);
        self.coeffs[2] = TensorPolynomial::new(merged);
        self.coeffs[2].terms.retain(|t| !t.coeff.is_zero());
        self
    }
}

fn default_slot_id<S: Scalar>(expr: &CanonicalExpr<S>, component: usize, slot: i64) -> IndexId {
    match (component, slot) {
        (1, 0) => expr.vector_index.id.clone(),
        (2, 0) => expr.tensor_indices.0.id.clone(),
        (2, 1) => expr.tensor_indices.1.id.clone(),
        (3, 0) => expr.pseudo_vector_index.id.clone(),
        _ => IndexId::Tag(0, 0),
    }
}

fn matrix_vec_mul<S: Scalar>(
    mat: &GammaMatrix<S>,
    vec: &[TensorPolynomial<S>; 5],
) -> [TensorPolynomial<S>; 5] {
    std::array::from_fn(|i| {
        let mut acc = TensorPolynomial::zero();
        for k in 0..5 {
            let term = crate::polynomial::prod(mat.entries[i][k].clone(), vec[k].clone());
            acc = crate::polynomial::add(acc, term);
        }
        acc
    })
}

/// Folds every term of `poly` into the fixed five-component canonical form.
///
/// Each gamma-basis factor in a term mints a fresh pair of bookkeeping
/// generation tags (row-side `L`, column-side `R`), with `L` of one factor
/// equal to `R` of the next so the structure matrices thread a shared dummy
/// index; the product is then folded right to left, starting from the last
/// factor's first column and walking backward over the earlier matrices, so
/// the first factor in the term ends up outermost and its surviving free tag
/// (`L` of the first factor) is renamed to the expression's shared
/// free-index slots.
pub fn reduce_gamma<S: Scalar>(poly: &GammaPolynomial<S>) -> CanonicalExpr<S> {
    let mut expr = CanonicalExpr::zero();

    for term in &poly.terms {
        let mut coeff = li::scalar_poly::<S>(term.coeff);
        let mut counter: i64 = 1;
        let first_gen = counter;
        let mut factors_repr: Vec<GammaMatrix<S>> = Vec::new();

        for factor in &term.factors {
            match factor.id() {
                GammaId::Li(li_id) => {
                    let li_tensor = li::Tensor::with_indices(li_id.clone(), factor.indices().clone())
                        .expect("arity already validated when this tensor was built");
                    coeff = crate::polynomial::prod(coeff, li::tensor_poly(li_tensor));
                }
                GammaId::Gamma => {
                    let l = counter;
                    let r = counter + 1;
                    counter = r;
                    factors_repr.push(gamma_matrix(&factor.indices()[0], l, r));
                }
                GammaId::Sigma => {
                    let l = counter;
                    let mid = counter + 1;
                    let r = counter + 2;
                    counter = r;
                    factors_repr.push(sigma_matrix(
                        &factor.indices()[0],
                        &factor.indices()[1],
                        l,
                        r,
                        mid,
                    ));
                }
                GammaId::Gamma5 => {
                    let l = counter;
                    let r = counter + 1;
                    counter = r;
                    factors_repr.push(gamma5_matrix(l, r));
                }
            }
        }

        if factors_repr.is_empty() {
            expr.coeffs[0] = crate::polynomial::add(expr.coeffs[0].clone(), coeff);
            continue;
        }

        let final_gen = first_gen;
        let (last, rest) = factors_repr.split_last().expect("checked non-empty above");
        let mut term_repr = last.col0();
        for mat in rest.iter().rev() {
            term_repr = matrix_vec_mul(mat, &term_repr);
        }

        for i in 0..5 {
            let mut component = term_repr[i].clone();
            component = li::rename_tag(component, final_gen, 0, default_slot_id(&expr, i, 0));
            if i == 2 {
                component = li::rename_tag(component, final_gen, 1, default_slot_id(&expr, 2, 1));
            }
            let scaled = crate::polynomial::prod(coeff.clone(), component);
            expr.coeffs[i] = crate::polynomial::add(expr.coeffs[i].clone(), scaled);
        }
    }

    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamma::basis::{gamma_tensor_poly, GammaBasis, GammaTensor};
    use crate::index::IndexId;
    use crate::rational::Rational;
    use crate::tensor::TensorBase;

    fn gamma_factor(name: &str) -> GammaTensor {
        TensorBase::<GammaBasis>::with_index(
            GammaId::Gamma,
            TensorIndex::upper(IndexId::Named(name.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn pure_scalar_term_lands_in_coeffs0() {
        let poly: GammaPolynomial<Rational> = gamma_tensor_poly_from_scalar(Rational::from_int(3));
        let expr = reduce_gamma(&poly);
        assert!(expr.is_scalar(Complex::real(Rational::from_int(3))));
    }

    fn gamma_tensor_poly_from_scalar<S: Scalar>(v: S) -> GammaPolynomial<S> {
        super::super::basis::gamma_scalar_poly(Complex::real(v))
    }

    #[test]
    fn single_gamma_has_no_scalar_component() {
        let mu = gamma_factor("mu");
        let poly: GammaPolynomial<Rational> = gamma_tensor_poly(mu);
        let expr = reduce_gamma(&poly);
        assert!(expr.coeffs[0].is_zero());
        assert!(!expr.coeffs[1].is_zero());
        assert!(expr.coeffs[2].is_zero());
        assert!(expr.coeffs[3].is_zero());
        assert!(expr.coeffs[4].is_zero());
    }

    #[test]
    fn gamma5_times_gamma5_is_identity() {
        let g5 = TensorBase::<GammaBasis>::create(GammaId::Gamma5).unwrap();
        let poly: GammaPolynomial<Rational> = crate::polynomial::prod(
            gamma_tensor_poly(g5.clone()),
            gamma_tensor_poly(g5),
        );
        let expr = reduce_gamma(&poly);
        assert!(expr.is_scalar(Complex::one()));
    }

    /// Regression for the structure-matrix fold direction: `\gamma_\mu\gamma_\nu`
    /// must reduce keeping `\mu` outermost (the term's own factor order), not
    /// the reversed word `\gamma_\nu\gamma_\mu`. A reversed fold flips the sign
    /// of this antisymmetric `\sigma` component.
    #[test]
    fn gamma_mu_gamma_nu_keeps_original_factor_order_in_sigma_component() {
        let mu = gamma_factor("mu");
        let nu = gamma_factor("nu");
        let term = crate::polynomial::Term::new(Complex::one(), vec![mu, nu]);
        let poly: GammaPolynomial<Rational> = GammaPolynomial::new(vec![term]);
        let expr = reduce_gamma(&poly);

        let mu_idx = TensorIndex::upper(IndexId::Named("mu".to_string()));
        let nu_idx = TensorIndex::upper(IndexId::Named("nu".to_string()));
        let a = expr.tensor_indices.0.clone();
        let b = expr.tensor_indices.1.clone();

        let half_neg_i: Complex<Rational> = Complex::new(Rational::from_int(0), Rational::new(-1, 2));
        let term1 = crate::polynomial::Term::new(
            half_neg_i,
            vec![li::eta(mu_idx.clone(), a.clone()), li::eta(nu_idx.clone(), b.clone())],
        );
        let term2 = crate::polynomial::Term::new(
            -half_neg_i,
            vec![li::eta(mu_idx, b), li::eta(nu_idx, a)],
        );
        let expected: TensorPolynomial<Rational> = TensorPolynomial::new(vec![term1, term2]);

        let diff = crate::polynomial::sub(expr.coeffs[2].clone(), expected);
        assert!(
            diff.terms.is_empty(),
            "sigma component did not match the expected antisymmetric form; fold direction regressed"
        );
    }
}
