//! Structure matrices: 5×5 arrays of LI tensor polynomials encoding
//! left-multiplication by γ^μ, σ^{μ1μ2}, and γ^5 on the canonical 5-component
//! basis {1, γ_λ, σ_{λ1λ2}, γ^5γ_λ, γ^5}.
//!
//! Grounded on `algebra/GammaMatrix.hpp`. That header's two snapshots
//! disagree on the σ entries (see `DESIGN.md`); per the resolution recorded
//! there, σ's structure matrix is derived symbolically as
//! `(i/2)(γ(μ1)·γ(μ2) − γ(μ2)·γ(μ1))` rather than transcribed from either
//! table, so only the γ and γ^5 tables below are literal transcriptions.

use crate::complex::Complex;
use crate::index::{IndexId, TensorIndex};
use crate::li::{self, TensorPolynomial};
use crate::scalar::Scalar;

/// A 5×5 matrix of LI tensor polynomials.
#[derive(Clone)]
pub struct GammaMatrix<S: Scalar> {
    pub entries: [[TensorPolynomial<S>; 5]; 5],
}

impl<S: Scalar> GammaMatrix<S> {
    pub fn zero() -> Self {
        GammaMatrix {
            entries: std::array::from_fn(|_| std::array::from_fn(|_| TensorPolynomial::zero())),
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: TensorPolynomial<S>) {
        self.entries[row][col] = value;
    }

    /// Matrix product, entries combined with LI polynomial `add`/`prod`.
    pub fn mul(&self, other: &GammaMatrix<S>) -> GammaMatrix<S> {
        let mut out = GammaMatrix::zero();
        for i in 0..5 {
            for j in 0..5 {
                let mut acc = TensorPolynomial::zero();
                for k in 0..5 {
                    let term = crate::polynomial::prod(
                        self.entries[i][k].clone(),
                        other.entries[k][j].clone(),
                    );
                    acc = crate::polynomial::add(acc, term);
                }
                out.entries[i][j] = acc;
            }
        }
        out
    }

    pub fn sub(&self, other: &GammaMatrix<S>) -> GammaMatrix<S> {
        let mut out = self.clone();
        for i in 0..5 {
            for j in 0..5 {
                out.entries[i][j] =
                    crate::polynomial::sub(out.entries[i][j].clone(), other.entries[i][j].clone());
            }
        }
        out
    }

    pub fn scale(&self, factor: Complex<S>) -> GammaMatrix<S> {
        let mut out = GammaMatrix::zero();
        for i in 0..5 {
            for j in 0..5 {
                out.entries[i][j] = crate::polynomial::prod(
                    li::scalar_poly(factor),
                    self.entries[i][j].clone(),
                );
            }
        }
        out
    }

    /// First column — what the matrix produces when left-multiplying a basis
    /// vector `(1,0,0,0,0)`.
    pub fn col0(&self) -> [TensorPolynomial<S>; 5] {
        std::array::from_fn(|i| self.entries[i][0].clone())
    }
}

fn nu(gen: i64, slot: i64) -> TensorIndex {
    TensorIndex::upper(IndexId::Tag(gen, slot))
}

fn lambda(gen: i64, slot: i64) -> TensorIndex {
    TensorIndex::lower(IndexId::Tag(gen, slot))
}

/// Left-multiplication by γ^μ, generation `l` for the row (output) side and
/// `r` for the column (input) side.
pub fn gamma_matrix<S: Scalar>(mu: &TensorIndex, l: i64, r: i64) -> GammaMatrix<S> {
    let mut m = GammaMatrix::zero();

    m.set(0, 1, li::tensor_poly(li::eta(mu.clone(), nu(r, 0))));
    m.set(1, 0, li::tensor_poly(li::eta(mu.clone(), lambda(l, 0))));

    let i_unit: Complex<S> = Complex::i();
    let term_a = crate::polynomial::prod(
        li::tensor_poly(li::eta(mu.clone(), nu(r, 0))),
        li::tensor_poly(li::eta(nu(r, 1), lambda(l, 0))),
    );
    let term_b = crate::polynomial::prod(
        li::tensor_poly(li::eta(mu.clone(), nu(r, 1))),
        li::tensor_poly(li::eta(nu(r, 0), lambda(l, 0))),
    );
    let m12 = crate::polynomial::prod(li::scalar_poly(i_unit), crate::polynomial::sub(term_a, term_b));
    m.set(1, 2, m12);

    let term_c = crate::polynomial::prod(
        li::tensor_poly(li::eta(mu.clone(), lambda(l, 0))),
        li::tensor_poly(li::eta(nu(r, 0), lambda(l, 1))),
    );
    let term_d = crate::polynomial::prod(
        li::tensor_poly(li::eta(mu.clone(), lambda(l, 1))),
        li::tensor_poly(li::eta(nu(r, 0), lambda(l, 0))),
    );
    let half_neg_i: Complex<S> = -Complex::i() / Complex::new(S::two(), S::zero());
    let m21 = crate::polynomial::prod(li::scalar_poly(half_neg_i), crate::polynomial::sub(term_c, term_d));
    m.set(2, 1, m21);

    let half: Complex<S> = Complex::new(S::one() / S::two(), S::zero());
    let eps_23 = li::epsilon(vec![mu.clone(), nu(r, 0), lambda(l, 0), lambda(l, 1)])
        .expect("four indices");
    m.set(
        2,
        3,
        crate::polynomial::prod(li::scalar_poly(half), li::tensor_poly(eps_23)),
    );

    let eps_32 = li::epsilon(vec![mu.clone(), nu(r, 0), nu(r, 1), lambda(l, 0)])
        .expect("four indices");
    let neg_one: Complex<S> = -Complex::one();
    m.set(
        3,
        2,
        crate::polynomial::prod(li::scalar_poly(neg_one), li::tensor_poly(eps_32)),
    );

    m.set(
        3,
        4,
        crate::polynomial::prod(
            li::scalar_poly(-Complex::one()),
            li::tensor_poly(li::eta(mu.clone(), lambda(l, 0))),
        ),
    );
    m.set(
        4,
        3,
        crate::polynomial::prod(
            li::scalar_poly(-Complex::one()),
            li::tensor_poly(li::eta(mu.clone(), nu(r, 0))),
        ),
    );

    m
}

/// Left-multiplication by γ^5, generation `l` for the row side and `r` for
/// the column side.
pub fn gamma5_matrix<S: Scalar>(l: i64, r: i64) -> GammaMatrix<S> {
    let mut m = GammaMatrix::zero();
    m.set(0, 4, li::scalar_poly(Complex::one()));
    m.set(1, 3, li::tensor_poly(li::eta(nu(r, 0), lambda(l, 0))));

    let half_neg_i: Complex<S> = -Complex::i() / Complex::new(S::two(), S::zero());
    let eps = li::epsilon(vec![nu(r, 0), nu(r, 1), lambda(l, 0), lambda(l, 1)])
        .expect("four indices");
    m.set(
        2,
        2,
        crate::polynomial::prod(li::scalar_poly(half_neg_i), li::tensor_poly(eps)),
    );

    m.set(3, 1, li::tensor_poly(li::eta(nu(r, 0), lambda(l, 0))));
    m.set(4, 0, li::scalar_poly(Complex::one()));
    m
}

/// Left-multiplication by σ^{μ1μ2}, derived as `(i/2)(γ(μ1)γ(μ2) − γ(μ2)γ(μ1))`
/// through an internally-minted generation `mid` bridging the two γ factors.
pub fn sigma_matrix<S: Scalar>(
    mu1: &TensorIndex,
    mu2: &TensorIndex,
    l: i64,
    r: i64,
    mid: i64,
) -> GammaMatrix<S> {
    let g1 = gamma_matrix::<S>(mu1, l, mid);
    let g2 = gamma_matrix::<S>(mu2, mid, r);
    let g2_first = gamma_matrix::<S>(mu2, l, mid);
    let g1_second = gamma_matrix::<S>(mu1, mid, r);

    let forward = g1.mul(&g2);
    let backward = g2_first.mul(&g1_second);
    let commutator = forward.sub(&backward);

    let half_i: Complex<S> = Complex::i() / Complex::new(S::two(), S::zero());
    commutator.scale(half_i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn gamma_matrix_row0_col1_is_eta() {
        let mu = TensorIndex::upper(IndexId::Named("mu".into()));
        let m: GammaMatrix<Rational> = gamma_matrix(&mu, 1, 0);
        assert_eq!(m.entries[0][1].terms.len(), 1);
        assert_eq!(m.entries[0][0].terms.len(), 0);
    }

    #[test]
    fn gamma5_squares_to_identity_entry_present() {
        let m: GammaMatrix<Rational> = gamma5_matrix(1, 0);
        assert_eq!(m.entries[0][4].terms.len(), 1);
        assert_eq!(m.entries[4][0].terms.len(), 1);
    }
}
