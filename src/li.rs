//! Lorentz-invariant tensor algebra: the basis {η, δ, ε} and the polynomial
//! canonicalization pipeline that contracts indices and merges terms.
//!
//! Grounded on `algebra/LorentzInvariant.hpp`.

use crate::complex::Complex;
use crate::error::{EngineError, Result};
use crate::index::{IndexId, TensorIndex, TensorIndices};
use crate::permutation::all_permutations;
use crate::polynomial::{merge_terms, Canonicalize, Polynomial, Term};
use crate::scalar::Scalar;
use crate::tensor::{Basis, TensorBase};
use std::collections::VecDeque;
use std::fmt;

/// Identifiers of the Lorentz-invariant basis: metric, Kronecker delta, and
/// the Levi-Civita symbol, plus an opaque escape hatch for any other literal
/// the tokenizer sees (a zero-index, commuting, user-named tensor).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiId {
    Eta,
    Delta,
    Epsilon,
    Named(String),
}

impl fmt::Display for LiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiId::Eta => write!(f, "\\eta"),
            LiId::Delta => write!(f, "\\delta"),
            LiId::Epsilon => write!(f, "\\epsilon"),
            LiId::Named(name) => write!(f, "\\{name}"),
        }
    }
}

pub struct LiBasis;

impl Basis for LiBasis {
    type Id = LiId;

    fn allows(_id: &LiId) -> bool {
        true
    }

    fn max_index_count(id: &LiId) -> usize {
        match id {
            LiId::Eta | LiId::Delta => 2,
            LiId::Epsilon => 4,
            LiId::Named(_) => 0,
        }
    }
}

pub type Tensor = TensorBase<LiBasis>;

pub fn eta(a: TensorIndex, b: TensorIndex) -> Tensor {
    Tensor::with_indices(LiId::Eta, vec![a, b]).expect("eta always fits the LI basis")
}

pub fn delta(a: TensorIndex, b: TensorIndex) -> Tensor {
    Tensor::with_indices(LiId::Delta, vec![a, b]).expect("delta always fits the LI basis")
}

pub fn epsilon(indices: TensorIndices) -> Result<Tensor> {
    if indices.len() != 4 {
        return Err(EngineError::MalformedTensor("\\epsilon".to_string()));
    }
    Tensor::with_indices(LiId::Epsilon, indices)
}

/// Polynomial over `Complex<S>` coefficients and LI tensor factors.
pub type TensorPolynomial<S> = Polynomial<Complex<S>, Tensor>;

pub fn scalar_poly<S: Scalar>(c: Complex<S>) -> TensorPolynomial<S> {
    if c.is_zero() {
        TensorPolynomial::zero()
    } else {
        TensorPolynomial::new(vec![Term::new(c, Vec::new())])
    }
}

pub fn tensor_poly<S: Scalar>(t: Tensor) -> TensorPolynomial<S> {
    TensorPolynomial::new(vec![Term::new(Complex::one(), vec![t])])
}

impl<S: Scalar> TensorPolynomial<S> {
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Scalar> Canonicalize for TensorPolynomial<S> {
    fn canonicalize(&mut self) {
        self.terms.retain(|t| !t.coeff.is_zero());

        let expanded: Vec<Term<Complex<S>, Tensor>> = self
            .terms
            .drain(..)
            .flat_map(|t| expand_epsilon_powers_term(t))
            .collect();

        let contracted: Vec<Term<Complex<S>, Tensor>> = expanded
            .into_iter()
            .filter_map(|t| contract_indices(t))
            .filter(|t| !t.coeff.is_zero())
            .collect();

        let mut merged = merge_terms(contracted, |a, b| try_merge(a, b));
        merged.retain(|t| !t.coeff.is_zero());
        self.terms = merged;
    }
}

/// Expands any term containing two ε factors via
/// `ε_{a} ε^{b} = -Σ_π sgn(π) Π_i η(a_i, b_{π(i)})`, recursively (a term with
/// three or more ε factors collapses pairwise, left to right).
fn expand_epsilon_powers_term<S: Scalar>(term: Term<Complex<S>, Tensor>) -> Vec<Term<Complex<S>, Tensor>> {
    let mut prefix: Vec<Tensor> = Vec::new();
    let mut eps_cache: Option<Tensor> = None;

    for (i, factor) in term.factors.iter().enumerate() {
        if *factor.id() == LiId::Epsilon {
            if let Some(first) = eps_cache.take() {
                let remaining: Vec<Tensor> = term.factors[i + 1..].to_vec();
                let mut expanded = Vec::with_capacity(24);
                for perm in all_permutations(4) {
                    let mut factors = prefix.clone();
                    for a in 0..4 {
                        factors.push(eta(
                            first.indices()[a].clone(),
                            factor.indices()[perm.map[a]].clone(),
                        ));
                    }
                    factors.extend(remaining.clone());
                    let sign: Complex<S> = if perm.is_even {
                        -Complex::one()
                    } else {
                        Complex::one()
                    };
                    expanded.push(Term::new(term.coeff * sign, factors));
                }
                return expanded
                    .into_iter()
                    .flat_map(expand_epsilon_powers_term)
                    .collect();
            } else {
                eps_cache = Some(factor.clone());
            }
        } else {
            prefix.push(factor.clone());
        }
    }

    vec![Term::new(term.coeff, prefix)]
}

/// Contracts all dual index pairs within one term's η/δ/ε factors.
/// Returns `None` if the term vanishes (two equal/dual indices survive on a
/// single ε factor).
fn contract_indices<S: Scalar>(term: Term<Complex<S>, Tensor>) -> Option<Term<Complex<S>, Tensor>> {
    let mut metrics: VecDeque<Tensor> = VecDeque::new();
    let mut epsilons: Vec<Tensor> = Vec::new();
    let mut named: Vec<Tensor> = Vec::new();
    for f in term.factors {
        match f.id() {
            LiId::Eta | LiId::Delta => metrics.push_back(f),
            LiId::Epsilon => epsilons.push(f),
            LiId::Named(_) => named.push(f),
        }
    }

    let mut coeff = term.coeff;
    let mut kept_metrics: Vec<Tensor> = Vec::new();

    while let Some(m) = metrics.pop_front() {
        let i1 = m.indices()[0].clone();
        let i2 = m.indices()[1].clone();

        if i1.is_dual(&i2) {
            coeff = coeff * Complex::real(S::four());
            continue;
        }

        let mut matched = false;

        for j in 0..metrics.len() {
            let m2_indices = metrics[j].indices().clone();
            for (q, idx) in m2_indices.iter().enumerate() {
                if idx.is_dual(&i1) || idx.is_dual(&i2) {
                    let survivor = if idx.is_dual(&i1) { i2.clone() } else { i1.clone() };
                    let other_pos = 1 - q;
                    let other_idx = m2_indices[other_pos].clone();
                    let new_id = if other_idx.upper != survivor.upper {
                        LiId::Delta
                    } else {
                        LiId::Eta
                    };
                    let mut new_indices = m2_indices.clone();
                    new_indices[q] = survivor;
                    metrics[j] =
                        Tensor::with_indices(new_id, new_indices).expect("two indices always fit");
                    matched = true;
                    break;
                }
            }
            if matched {
                break;
            }
        }
        if matched {
            continue;
        }

        for eps in epsilons.iter_mut() {
            let eps_indices = eps.indices().clone();
            for (q, idx) in eps_indices.iter().enumerate() {
                if idx.is_dual(&i1) || idx.is_dual(&i2) {
                    let survivor = if idx.is_dual(&i1) { i2.clone() } else { i1.clone() };
                    *eps = eps
                        .replace_index(q, survivor)
                        .expect("position came from this tensor's own indices");
                    matched = true;
                    break;
                }
            }
            if matched {
                break;
            }
        }
        if matched {
            continue;
        }

        kept_metrics.push(m);
    }

    for eps in &epsilons {
        let idxs = eps.indices();
        for a in 0..idxs.len() {
            for b in (a + 1)..idxs.len() {
                if idxs[a].is_dual(&idxs[b]) || idxs[a].is_equal(&idxs[b]) {
                    return None;
                }
            }
        }
    }

    let mut factors = kept_metrics;
    factors.extend(epsilons);
    factors.extend(named);
    Some(Term::new(coeff, factors))
}

/// Two terms merge iff their factor lists agree up to a reordering permutation
/// whose composed parity (over matched ε factors) is even (add) or odd
/// (subtract).
pub fn try_merge<S: Scalar>(
    t1: &Term<Complex<S>, Tensor>,
    t2: &Term<Complex<S>, Tensor>,
) -> Option<Term<Complex<S>, Tensor>> {
    if t1.factors.len() != t2.factors.len() {
        return None;
    }

    let mut remaining: Vec<Tensor> = t2.factors.clone();
    let mut overall_even = true;

    for f1 in &t1.factors {
        let mut found_at = None;
        for (j, f2) in remaining.iter().enumerate() {
            if let Some(perm) = f1.mapping_to(f2) {
                found_at = Some((j, perm.is_even));
                break;
            }
        }
        let (j, factor_even) = found_at?;
        if *f1.id() == LiId::Epsilon {
            overall_even = overall_even == factor_even;
        }
        remaining.remove(j);
    }

    if !remaining.is_empty() {
        return None;
    }

    let coeff = if overall_even {
        t1.coeff + t2.coeff
    } else {
        t1.coeff - t2.coeff
    };
    Some(Term::new(coeff, t1.factors.clone()))
}

/// Renames every occurrence of the internal bookkeeping tag
/// `IndexId::Tag(gen, slot)` within `poly` to `to_id`, keeping each
/// occurrence's own upper/lower position. Used by the canonical reducer to
/// bind a gamma-chain's surviving structural index to the expression's fixed
/// free-index slot.
pub fn rename_tag<S: Scalar>(
    poly: TensorPolynomial<S>,
    gen: i64,
    slot: i64,
    to_id: IndexId,
) -> TensorPolynomial<S> {
    let target = IndexId::Tag(gen, slot);
    let terms = poly
        .terms
        .into_iter()
        .map(|t| {
            let factors = t
                .factors
                .into_iter()
                .map(|f| {
                    let new_indices: TensorIndices = f
                        .indices()
                        .iter()
                        .map(|idx| {
                            if idx.id == target {
                                TensorIndex::new(to_id.clone(), idx.upper)
                            } else {
                                idx.clone()
                            }
                        })
                        .collect();
                    Tensor::with_indices(f.id().clone(), new_indices)
                        .expect("renaming never changes a tensor's index count")
                })
                .collect();
            Term::new(t.coeff, factors)
        })
        .collect();
    TensorPolynomial::new(terms)
}

/// Swaps index id `a` with index id `b` everywhere in `term`'s factors and
/// negates its coefficient — used by the σ antisymmetry merge.
pub fn swap_and_negate<S: Scalar>(
    term: &Term<Complex<S>, Tensor>,
    a: &TensorIndex,
    b: &TensorIndex,
) -> Term<Complex<S>, Tensor> {
    let factors = term
        .factors
        .iter()
        .map(|f| {
            let new_indices: TensorIndices = f
                .indices()
                .iter()
                .map(|idx| {
                    if idx.id == a.id {
                        TensorIndex::new(b.id.clone(), idx.upper)
                    } else if idx.id == b.id {
                        TensorIndex::new(a.id.clone(), idx.upper)
                    } else {
                        idx.clone()
                    }
                })
                .collect();
            Tensor::with_indices(f.id().clone(), new_indices).expect("swap never changes index count")
        })
        .collect();
    Term::new(-term.coeff, factors)
}

pub fn index_upper(name: &str) -> TensorIndex {
    TensorIndex::upper(IndexId::Named(name.to_string()))
}

pub fn index_lower(name: &str) -> TensorIndex {
    TensorIndex::lower(IndexId::Named(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    fn idx_up(tag: (i64, i64)) -> TensorIndex {
        TensorIndex::upper(IndexId::Tag(tag.0, tag.1))
    }
    fn idx_lo(tag: (i64, i64)) -> TensorIndex {
        TensorIndex::lower(IndexId::Tag(tag.0, tag.1))
    }

    #[test]
    fn trace_of_identity_is_four() {
        // eta^{mu nu} eta_{mu nu} -> contracts twice (once via dual, once via trace) -> 4
        let mu = (0, 0);
        let nu = (1, 0);
        let t1 = eta(idx_up(mu), idx_up(nu));
        let t2 = eta(idx_lo(mu), idx_lo(nu));
        let poly: TensorPolynomial<Rational> =
            crate::polynomial::prod(tensor_poly(t1), tensor_poly(t2));
        assert_eq!(poly.terms.len(), 1);
        assert!(poly.terms[0].factors.is_empty());
        assert_eq!(poly.terms[0].coeff, Complex::real(Rational::from_int(4)));
    }

    #[test]
    fn dual_eta_delta_chain_contracts_to_single_eta() {
        let mu = (0, 0);
        let nu = (1, 0);
        let rho = (2, 0);
        // eta^{mu nu} eta_{nu rho} -> eta^{mu}_{rho} ... contracted to one factor with mu, rho
        let t1 = eta(idx_up(mu), idx_up(nu));
        let t2 = eta(idx_lo(nu), idx_lo(rho));
        let poly: TensorPolynomial<Rational> =
            crate::polynomial::prod(tensor_poly(t1), tensor_poly(t2));
        assert_eq!(poly.terms.len(), 1);
        assert_eq!(poly.terms[0].factors.len(), 1);
    }

    #[test]
    fn epsilon_self_contraction_trace_is_minus_24() {
        let idx = |n: i64| idx_up((n, 0));
        let idx_lower = |n: i64| idx_lo((n, 0));
        let e1 = epsilon(vec![idx(0), idx(1), idx(2), idx(3)]).unwrap();
        let e2 = epsilon(vec![idx_lower(0), idx_lower(1), idx_lower(2), idx_lower(3)]).unwrap();
        let poly: TensorPolynomial<Rational> =
            crate::polynomial::prod(tensor_poly(e1), tensor_poly(e2));
        assert_eq!(poly.terms.len(), 1);
        assert!(poly.terms[0].factors.is_empty());
        assert_eq!(
            poly.terms[0].coeff,
            Complex::real(Rational::from_int(-24))
        );
    }

    #[test]
    fn named_literal_survives_contraction_untouched() {
        let m = Tensor::create(LiId::Named("m".to_string())).unwrap();
        let term = Term::new(Complex::<Rational>::one(), vec![m]);
        let out = contract_indices(term).unwrap();
        assert_eq!(out.factors.len(), 1);
        assert_eq!(*out.factors[0].id(), LiId::Named("m".to_string()));
    }

    #[test]
    fn repeated_index_on_epsilon_vanishes() {
        let idx = |n: i64| idx_up((n, 0));
        let e = epsilon(vec![idx(0), idx(0), idx(1), idx(2)]);
        // constructing the term directly (bypassing tokenizer) to hit contract_indices
        let e = e.unwrap();
        let term = Term::new(Complex::<Rational>::one(), vec![e]);
        assert!(contract_indices(term).is_none());
    }
}
