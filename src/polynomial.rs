//! Generic polynomial-over-a-basis algebra.
//!
//! Grounded on `algebra/Polynomials.hpp`: a polynomial is an ordered list of
//! `Term`s, each a coefficient times a product of factors. The original's
//! virtual `canonicalize()` becomes the [`Canonicalize`] trait, since Rust has
//! no virtual dispatch; every constructor that introduces new terms calls it.

use std::ops::{Add, Mul, Neg};

/// One term of a polynomial: a coefficient and an ordered product of factors.
#[derive(Debug, Clone, PartialEq)]
pub struct Term<Coeff, Factor> {
    pub coeff: Coeff,
    pub factors: Vec<Factor>,
}

impl<Coeff, Factor: Clone> Term<Coeff, Factor> {
    pub fn new(coeff: Coeff, factors: Vec<Factor>) -> Self {
        Term { coeff, factors }
    }
}

impl<Coeff: Mul<Output = Coeff>, Factor: Clone> Mul for Term<Coeff, Factor> {
    type Output = Term<Coeff, Factor>;
    fn mul(self, rhs: Self) -> Self::Output {
        let mut factors = self.factors;
        factors.extend(rhs.factors);
        Term {
            coeff: self.coeff * rhs.coeff,
            factors,
        }
    }
}

impl<Coeff: Neg<Output = Coeff>, Factor> Neg for Term<Coeff, Factor> {
    type Output = Term<Coeff, Factor>;
    fn neg(self) -> Self::Output {
        Term {
            coeff: -self.coeff,
            factors: self.factors,
        }
    }
}

/// Hook invoked after any mutation that introduces new terms — the
/// generalization of the original's virtual `canonicalize()`.
pub trait Canonicalize {
    fn canonicalize(&mut self);
}

/// An ordered sum of terms over a `Coeff` ring and `Factor` basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<Coeff, Factor> {
    pub terms: Vec<Term<Coeff, Factor>>,
}

impl<Coeff, Factor> Default for Polynomial<Coeff, Factor> {
    fn default() -> Self {
        Polynomial { terms: Vec::new() }
    }
}

impl<Coeff, Factor> Polynomial<Coeff, Factor> {
    pub fn new(terms: Vec<Term<Coeff, Factor>>) -> Self {
        Polynomial { terms }
    }

    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    pub fn is_zero_trivially(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<Coeff, Factor> Polynomial<Coeff, Factor>
where
    Polynomial<Coeff, Factor>: Canonicalize,
{
    pub fn canonicalized(mut self) -> Self {
        Canonicalize::canonicalize(&mut self);
        self
    }
}

/// `a + b`, canonicalized.
pub fn add<Coeff, Factor>(
    mut a: Polynomial<Coeff, Factor>,
    b: Polynomial<Coeff, Factor>,
) -> Polynomial<Coeff, Factor>
where
    Polynomial<Coeff, Factor>: Canonicalize,
{
    a.terms.extend(b.terms);
    a.canonicalize();
    a
}

/// `a - b`, canonicalized.
pub fn sub<Coeff, Factor>(
    a: Polynomial<Coeff, Factor>,
    b: Polynomial<Coeff, Factor>,
) -> Polynomial<Coeff, Factor>
where
    Coeff: Neg<Output = Coeff>,
    Polynomial<Coeff, Factor>: Canonicalize,
{
    add(a, negate(b))
}

/// Negate every term's coefficient.
pub fn negate<Coeff, Factor>(p: Polynomial<Coeff, Factor>) -> Polynomial<Coeff, Factor>
where
    Coeff: Neg<Output = Coeff>,
{
    Polynomial {
        terms: p.terms.into_iter().map(|t| -t).collect(),
    }
}

/// `a * b` (outer product of term lists), canonicalized.
pub fn prod<Coeff, Factor>(
    a: Polynomial<Coeff, Factor>,
    b: Polynomial<Coeff, Factor>,
) -> Polynomial<Coeff, Factor>
where
    Coeff: Clone + Mul<Output = Coeff>,
    Factor: Clone,
    Polynomial<Coeff, Factor>: Canonicalize,
{
    let mut terms = Vec::with_capacity(a.terms.len() * b.terms.len());
    for ta in &a.terms {
        for tb in &b.terms {
            terms.push(ta.clone() * tb.clone());
        }
    }
    let mut p = Polynomial { terms };
    p.canonicalize();
    p
}

/// Sum of several polynomials, canonicalized once at the end.
pub fn sum<Coeff, Factor>(
    polys: impl IntoIterator<Item = Polynomial<Coeff, Factor>>,
) -> Polynomial<Coeff, Factor>
where
    Polynomial<Coeff, Factor>: Canonicalize,
{
    let mut terms = Vec::new();
    for p in polys {
        terms.extend(p.terms);
    }
    let mut p = Polynomial { terms };
    p.canonicalize();
    p
}

/// Iteratively merges mergeable terms using `try_merge`, repeating until no
/// further merges occur. Worst case is quadratic in term count.
pub fn merge_terms<Coeff, Factor>(
    terms: Vec<Term<Coeff, Factor>>,
    try_merge: impl Fn(&Term<Coeff, Factor>, &Term<Coeff, Factor>) -> Option<Term<Coeff, Factor>>,
) -> Vec<Term<Coeff, Factor>> {
    let mut work = terms;
    let mut result = Vec::new();

    while !work.is_empty() {
        let mut current = work.remove(0);
        let mut i = 0;
        while i < work.len() {
            if let Some(merged) = try_merge(&current, &work[i]) {
                current = merged;
                work.remove(i);
            } else {
                i += 1;
            }
        }
        result.push(current);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // A trivial no-op canonicalizer used only to exercise the free functions;
    // `li.rs` provides the real one.
    impl Canonicalize for Polynomial<i64, char> {
        fn canonicalize(&mut self) {
            self.terms.retain(|t| t.coeff != 0);
        }
    }

    #[test]
    fn term_multiplication_concatenates_factors() {
        let t1 = Term::new(2, vec!['a']);
        let t2 = Term::new(3, vec!['b']);
        let t3 = t1 * t2;
        assert_eq!(t3.coeff, 6);
        assert_eq!(t3.factors, vec!['a', 'b']);
    }

    #[test]
    fn add_drops_zero_terms() {
        let a = Polynomial::new(vec![Term::new(1, vec!['a'])]);
        let b = Polynomial::new(vec![Term::new(0, vec!['b'])]);
        let c = add(a, b);
        assert_eq!(c.terms.len(), 1);
    }

    #[test]
    fn negate_flips_every_coefficient() {
        let a = Polynomial::new(vec![Term::new(1, vec!['a']), Term::new(-2, vec!['b'])]);
        let n = negate(a);
        assert_eq!(n.terms[0].coeff, -1);
        assert_eq!(n.terms[1].coeff, 2);
    }
}
