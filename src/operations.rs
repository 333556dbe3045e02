//! Operand arithmetic: the layer between compiled tokens and the canonical
//! reducer. An [`Operand`] is whatever a single compiled value can be before
//! it is forced into a gamma polynomial; [`OpList`] is what one subexpression
//! reduces to while the interpreter still has unresolved splices on its hands.
//!
//! Grounded on `Operations.{hpp,cpp}`.

use crate::complex::Complex;
use crate::error::{EngineError, Result};
use crate::gamma::basis::{gamma_tensor_poly, GammaId, GammaPolynomial, GammaTensor};
use crate::gamma::reduce::{reduce_gamma, CanonicalExpr};
use crate::li::{self, LiId};
use crate::scalar::Scalar;
use crate::tensor::TensorBase;

/// The literal that resolves to the imaginary unit rather than a tensor.
pub const IMAGINARY_UNIT: &str = "I";

/// A single compiled value, not yet forced into arithmetic form.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand<S: Scalar> {
    Literal(String),
    Complex(Complex<S>),
    Tensor(GammaTensor),
    Poly(GammaPolynomial<S>),
}

/// A subexpression still awaiting an explicit operator — adjacent operands
/// are joined here by the compiler's splice operator and forced into a
/// product only once an explicit operator needs a single value.
pub type OpList<S> = Vec<Operand<S>>;

fn literal_gamma_id(name: &str) -> GammaId {
    match name {
        "gamma" => GammaId::Gamma,
        "sigma" => GammaId::Sigma,
        "gamma5" => GammaId::Gamma5,
        "eta" => GammaId::Li(LiId::Eta),
        "delta" => GammaId::Li(LiId::Delta),
        "epsilon" => GammaId::Li(LiId::Epsilon),
        _ => GammaId::Li(LiId::Named(name.to_string())),
    }
}

/// Resolves a literal to either the imaginary unit or an incomplete tensor
/// named after it. Tensors built this way still need their indices attached
/// by [`subscript`]/[`superscript`] before they can be reduced.
pub fn resolve<S: Scalar>(literal: &str) -> Result<Operand<S>> {
    if literal == IMAGINARY_UNIT {
        return Ok(Operand::Complex(Complex::i()));
    }
    let tensor = TensorBase::create(literal_gamma_id(literal))?;
    Ok(Operand::Tensor(tensor))
}

/// Forces an operand into a gamma polynomial, resolving literals first.
pub fn get_poly<S: Scalar>(op: &Operand<S>) -> Result<GammaPolynomial<S>> {
    match op {
        Operand::Literal(l) => get_poly(&resolve(l)?),
        Operand::Tensor(t) => Ok(gamma_tensor_poly(t.clone())),
        Operand::Poly(p) => Ok(p.clone()),
        Operand::Complex(_) => Err(EngineError::NonNumericInArithmetic),
    }
}

/// Forces an operand into a tensor — a literal resolves to an incomplete
/// tensor of the same name, bypassing the imaginary-unit check (matching
/// the reference behavior: `\I` used as a subscript target builds a tensor
/// literally named `I`, not the imaginary unit).
pub fn get_tensor<S: Scalar>(op: &Operand<S>) -> Result<GammaTensor> {
    match op {
        Operand::Tensor(t) => Ok(t.clone()),
        Operand::Literal(l) => Ok(TensorBase::create(literal_gamma_id(l))?),
        _ => Err(EngineError::SubscriptTargetNotTensor),
    }
}

/// Addition of two single operands.
pub fn sum<S: Scalar>(op1: &Operand<S>, op2: &Operand<S>) -> Result<Operand<S>> {
    if let Operand::Literal(l) = op1 {
        return sum(&resolve(l)?, op2);
    }
    if let Operand::Literal(l) = op2 {
        return sum(op1, &resolve(l)?);
    }
    if let Operand::Complex(a) = op1 {
        let Operand::Complex(b) = op2 else {
            return Err(EngineError::NonNumericInArithmetic);
        };
        return Ok(Operand::Complex(*a + *b));
    }
    Ok(Operand::Poly(crate::polynomial::add(
        get_poly(op1)?,
        get_poly(op2)?,
    )))
}

/// Subtraction of two single operands.
pub fn diff<S: Scalar>(op1: &Operand<S>, op2: &Operand<S>) -> Result<Operand<S>> {
    if let Operand::Literal(l) = op1 {
        return diff(&resolve(l)?, op2);
    }
    if let Operand::Literal(l) = op2 {
        return diff(op1, &resolve(l)?);
    }
    if let Operand::Complex(a) = op1 {
        let Operand::Complex(b) = op2 else {
            return Err(EngineError::NonNumericInArithmetic);
        };
        return Ok(Operand::Complex(*a - *b));
    }
    Ok(Operand::Poly(crate::polynomial::sub(
        get_poly(op1)?,
        get_poly(op2)?,
    )))
}

/// Negation of a single operand.
pub fn neg<S: Scalar>(op: &Operand<S>) -> Result<Operand<S>> {
    match op {
        Operand::Literal(l) => neg(&resolve(l)?),
        Operand::Complex(c) => Ok(Operand::Complex(-*c)),
        other => Ok(Operand::Poly(crate::polynomial::negate(get_poly(other)?))),
    }
}

/// Multiplication of two single operands.
pub fn prod<S: Scalar>(op1: &Operand<S>, op2: &Operand<S>) -> Result<Operand<S>> {
    if let Operand::Literal(l) = op1 {
        return prod(&resolve(l)?, op2);
    }
    if let Operand::Literal(l) = op2 {
        return prod(op1, &resolve(l)?);
    }

    match (op1, op2) {
        (Operand::Complex(a), Operand::Complex(b)) => Ok(Operand::Complex(*a * *b)),
        (Operand::Complex(a), _) => Ok(Operand::Poly(scale_poly(get_poly(op2)?, *a))),
        (_, Operand::Complex(b)) => Ok(Operand::Poly(scale_poly(get_poly(op1)?, *b))),
        _ => Ok(Operand::Poly(crate::polynomial::prod(
            get_poly(op1)?,
            get_poly(op2)?,
        ))),
    }
}

fn scale_poly<S: Scalar>(p: GammaPolynomial<S>, c: Complex<S>) -> GammaPolynomial<S> {
    crate::polynomial::prod(crate::gamma::basis::gamma_scalar_poly(c), p)
}

/// Division. The divisor must be a number.
pub fn div<S: Scalar>(op1: &Operand<S>, op2: &Operand<S>) -> Result<Operand<S>> {
    if let Operand::Literal(l) = op1 {
        return div(&resolve(l)?, op2);
    }
    if let Operand::Literal(l) = op2 {
        return div(op1, &resolve(l)?);
    }
    let Operand::Complex(b) = op2 else {
        return Err(EngineError::NonDivisibleOperand);
    };
    if let Operand::Complex(a) = op1 {
        return Ok(Operand::Complex(*a / *b));
    }
    let inv = Complex::one() / *b;
    Ok(Operand::Poly(scale_poly(get_poly(op1)?, inv)))
}

/// The common list-unwrapping shape of every arithmetic binary: any operand
/// list longer than one element is first collapsed into a product.
fn arithmetic_binary<S: Scalar>(
    first: OpList<S>,
    second: OpList<S>,
    op: impl Fn(&Operand<S>, &Operand<S>) -> Result<Operand<S>>,
) -> Result<OpList<S>> {
    if first.is_empty() || second.is_empty() {
        return Err(EngineError::MissingOperand("<binary>".to_string()));
    }
    if first.len() > 1 {
        return arithmetic_binary(to_product(first)?, second, op);
    }
    if second.len() > 1 {
        return arithmetic_binary(first, to_product(second)?, op);
    }
    Ok(vec![op(&first[0], &second[0])?])
}

pub fn sum_lists<S: Scalar>(first: OpList<S>, second: OpList<S>) -> Result<OpList<S>> {
    arithmetic_binary(first, second, sum)
}

pub fn diff_lists<S: Scalar>(first: OpList<S>, second: OpList<S>) -> Result<OpList<S>> {
    arithmetic_binary(first, second, diff)
}

pub fn prod_lists<S: Scalar>(first: OpList<S>, second: OpList<S>) -> Result<OpList<S>> {
    arithmetic_binary(first, second, prod)
}

pub fn div_lists<S: Scalar>(first: OpList<S>, second: OpList<S>) -> Result<OpList<S>> {
    arithmetic_binary(first, second, div)
}

/// List negation: collapse multi-value lists to a product first.
pub fn neg_list<S: Scalar>(arg: OpList<S>) -> Result<OpList<S>> {
    if arg.is_empty() {
        return Err(EngineError::MissingOperand("-".to_string()));
    }
    if arg.len() > 1 {
        return neg_list(to_product(arg)?);
    }
    Ok(vec![neg(&arg[0])?])
}

/// Converts a literal-only operand list into a list of tensor indices.
fn to_indices<S: Scalar>(list: &[Operand<S>], upper: bool) -> Result<crate::index::TensorIndices> {
    list.iter()
        .map(|op| match op {
            Operand::Literal(name) => Ok(if upper {
                li::index_upper(name)
            } else {
                li::index_lower(name)
            }),
            _ => Err(EngineError::IndexNotLiteral),
        })
        .collect()
}

/// Subscript: attaches lower indices to a single-value list's tensor.
pub fn subscript<S: Scalar>(head: &[Operand<S>], indices: &[Operand<S>]) -> Result<OpList<S>> {
    let [only] = head else {
        return Err(EngineError::MissingOperand("_".to_string()));
    };
    let tensor = get_tensor(only)?.push_all(to_indices(indices, false)?)?;
    Ok(vec![Operand::Tensor(tensor)])
}

/// Superscript: attaches upper indices to a single-value list's tensor.
pub fn superscript<S: Scalar>(head: &[Operand<S>], indices: &[Operand<S>]) -> Result<OpList<S>> {
    let [only] = head else {
        return Err(EngineError::MissingOperand("^".to_string()));
    };
    let tensor = get_tensor(only)?.push_all(to_indices(indices, true)?)?;
    Ok(vec![Operand::Tensor(tensor)])
}

/// List concatenation — what the splice operator performs.
pub fn join<S: Scalar>(mut first: OpList<S>, second: OpList<S>) -> OpList<S> {
    first.extend(second);
    first
}

/// Collapses an operand list to its running product, as a single-element list.
pub fn to_product<S: Scalar>(ops: OpList<S>) -> Result<OpList<S>> {
    if ops.is_empty() {
        return Ok(ops);
    }
    let mut value = Operand::Complex(Complex::one());
    for op in &ops {
        value = prod(&value, op)?;
    }
    Ok(vec![value])
}

/// Reduces a single operand to canonical form.
pub fn eval<S: Scalar>(value: &Operand<S>) -> Result<CanonicalExpr<S>> {
    if let Operand::Complex(c) = value {
        return Ok(CanonicalExpr::from_scalar(*c));
    }
    Ok(reduce_gamma(&get_poly(value)?))
}

/// Reduces an operand list (one or more splice-joined values) to canonical form.
pub fn eval_list<S: Scalar>(ops: OpList<S>) -> Result<CanonicalExpr<S>> {
    if ops.is_empty() {
        return Err(EngineError::InconsistentExpression);
    }
    if ops.len() == 1 {
        return eval(&ops[0]);
    }
    eval(&to_product(ops)?[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn imaginary_unit_literal_resolves_to_i() {
        let op: Operand<Rational> = resolve("I").unwrap();
        assert_eq!(op, Operand::Complex(Complex::i()));
    }

    #[test]
    fn plain_literal_resolves_to_named_tensor() {
        let op: Operand<Rational> = resolve("m").unwrap();
        match op {
            Operand::Tensor(t) => assert_eq!(*t.id(), GammaId::Li(LiId::Named("m".to_string()))),
            _ => panic!("expected a tensor"),
        }
    }

    #[test]
    fn sum_of_two_numbers_is_a_number() {
        let a: Operand<Rational> = Operand::Complex(Complex::real(Rational::from_int(2)));
        let b: Operand<Rational> = Operand::Complex(Complex::real(Rational::from_int(3)));
        let s = sum(&a, &b).unwrap();
        assert_eq!(s, Operand::Complex(Complex::real(Rational::from_int(5))));
    }

    #[test]
    fn sum_of_number_and_tensor_is_rejected() {
        let a: Operand<Rational> = Operand::Complex(Complex::real(Rational::from_int(2)));
        let b: Operand<Rational> = resolve("m").unwrap();
        assert_eq!(sum(&a, &b), Err(EngineError::NonNumericInArithmetic));
    }

    #[test]
    fn division_by_non_number_is_rejected() {
        let a: Operand<Rational> = resolve("m").unwrap();
        let b: Operand<Rational> = resolve("n").unwrap();
        assert_eq!(div(&a, &b), Err(EngineError::NonDivisibleOperand));
    }

    #[test]
    fn to_product_collapses_a_literal_run() {
        let ops: OpList<Rational> = vec![resolve("a").unwrap(), resolve("b").unwrap()];
        let product = to_product(ops).unwrap();
        assert_eq!(product.len(), 1);
    }

    #[test]
    fn eval_pure_number_is_scalar_canonical_expr() {
        let op: Operand<Rational> = Operand::Complex(Complex::real(Rational::from_int(7)));
        let expr = eval(&op).unwrap();
        assert!(expr.is_scalar(Complex::real(Rational::from_int(7))));
    }
}
