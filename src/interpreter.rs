//! Stack machine executing a compiled postfix token stream.
//!
//! Grounded on `Interpreter.{hpp,cpp}`.

use crate::complex::Complex;
use crate::error::{EngineError, Result};
use crate::gamma::reduce::CanonicalExpr;
use crate::operations::{self, Operand, OpList};
use crate::scalar::Scalar;
use crate::token::{Op, Token};
use std::collections::VecDeque;

/// Executes a postfix token stream against an operand stack, one [`OpList`]
/// per stack slot (a slot holds more than one value only transiently, while
/// splice-joined literals await the explicit operator that forces them into
/// a product).
pub struct Interpreter<S: Scalar> {
    stack: VecDeque<OpList<S>>,
}

impl<S: Scalar> Interpreter<S> {
    pub fn new() -> Self {
        Interpreter {
            stack: VecDeque::new(),
        }
    }

    pub fn stack(&self) -> &VecDeque<OpList<S>> {
        &self.stack
    }

    /// Executes one token.
    pub fn exec_token(&mut self, token: Token<S>) -> Result<()> {
        match token {
            Token::Op(op) => self.exec_op(op),
            Token::Number(n) => {
                self.stack.push_front(vec![Operand::Complex(Complex::real(n))]);
                Ok(())
            }
            Token::Literal(l) => {
                self.stack.push_front(vec![Operand::Literal(l)]);
                Ok(())
            }
        }
    }

    /// Executes one operator against the top of the stack.
    pub fn exec_op(&mut self, op: Op) -> Result<()> {
        match op {
            Op::Plus => self.perform_binary(operations::sum_lists),
            Op::Minus => self.perform_binary(operations::diff_lists),
            Op::UMinus => self.perform_unary(operations::neg_list),
            Op::Mul => self.perform_binary(operations::prod_lists),
            Op::Div => self.perform_binary(operations::div_lists),
            Op::Subs => self.perform_binary(|h: OpList<S>, i: OpList<S>| operations::subscript(&h, &i)),
            Op::Super => {
                self.perform_binary(|h: OpList<S>, i: OpList<S>| operations::superscript(&h, &i))
            }
            Op::Splice => self.perform_binary(|a, b| Ok(operations::join(a, b))),
            Op::LBrace | Op::RBrace | Op::Nop => {
                Err(EngineError::Internal(format!("unsupported operation: {op}")))
            }
        }
    }

    /// Executes an entire compiled token sequence.
    pub fn exec_all(&mut self, tokens: impl IntoIterator<Item = Token<S>>) -> Result<()> {
        for token in tokens {
            self.exec_token(token)?;
        }
        Ok(())
    }

    fn perform_binary(
        &mut self,
        op: impl Fn(OpList<S>, OpList<S>) -> Result<OpList<S>>,
    ) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(EngineError::MissingOperand(
                "binary operation".to_string(),
            ));
        }
        let second = self.stack.pop_front().expect("length just checked");
        let first = self.stack.pop_front().expect("length just checked");
        let res = op(first, second)?;
        self.stack.push_front(res);
        Ok(())
    }

    fn perform_unary(&mut self, op: impl Fn(OpList<S>) -> Result<OpList<S>>) -> Result<()> {
        let top = self
            .stack
            .pop_front()
            .ok_or_else(|| EngineError::MissingOperand("unary operation".to_string()))?;
        let res = op(top)?;
        self.stack.push_front(res);
        Ok(())
    }

    /// Consumes the interpreter: the stack must hold exactly one value, which
    /// is reduced to canonical form.
    pub fn finish(mut self) -> Result<CanonicalExpr<S>> {
        if self.stack.len() != 1 {
            return Err(EngineError::InconsistentExpression);
        }
        operations::eval_list(self.stack.pop_front().expect("length just checked"))
    }
}

impl<S: Scalar> Default for Interpreter<S> {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Compiles and runs a full expression in one call.
pub fn run<S: Scalar>(src: &str) -> Result<CanonicalExpr<S>> {
    let tokens = crate::compiler::Compiler::compile(crate::token::Tokenizer::<S>::new(src))?;
    let mut interp = Interpreter::new();
    interp.exec_all(tokens)?;
    interp.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn two_plus_three_is_five() {
        let expr = run::<Rational>("2 + 3").unwrap();
        assert!(expr.is_scalar(Complex::real(Rational::from_int(5))));
    }

    #[test]
    fn subscript_then_splice_builds_a_two_gamma_product() {
        // \gamma_\mu \gamma^\mu should reduce to a pure scalar (4).
        let expr = run::<Rational>("\\gamma_\\mu\\gamma^\\mu").unwrap();
        assert!(expr.is_scalar(Complex::real(Rational::from_int(4))));
    }

    #[test]
    fn unary_minus_negates_a_number() {
        let expr = run::<Rational>("-5").unwrap();
        assert!(expr.is_scalar(Complex::real(Rational::from_int(-5))));
    }

    #[test]
    fn mismatched_arity_is_missing_operand() {
        let tokens = vec![Token::<Rational>::Op(Op::Plus)];
        let mut interp = Interpreter::new();
        let err = interp.exec_all(tokens).unwrap_err();
        assert!(matches!(err, EngineError::MissingOperand(_)));
    }

    #[test]
    fn leftover_values_are_inconsistent_expression() {
        let mut interp = Interpreter::<Rational>::new();
        interp.exec_token(Token::Number(Rational::from_int(1))).unwrap();
        interp.exec_token(Token::Number(Rational::from_int(2))).unwrap();
        assert_eq!(interp.finish().unwrap_err(), EngineError::InconsistentExpression);
    }
}
