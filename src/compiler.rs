//! Infix-to-postfix compiler — a shunting-yard variant.
//!
//! Grounded on `Compiler.{hpp,cpp}`.

use crate::error::{EngineError, Result};
use crate::scalar::Scalar;
use crate::token::{Op, Token};
use std::collections::VecDeque;

/// Operator precedence, low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Bracket = 0,
    Additive = 1,
    Multiplicative = 2,
    Unary = 3,
    Subscript = 4,
}

fn precedence(op: Op) -> Precedence {
    match op {
        Op::LBrace | Op::RBrace => Precedence::Bracket,
        Op::Plus | Op::Minus => Precedence::Additive,
        Op::Mul | Op::Div | Op::Splice => Precedence::Multiplicative,
        Op::UMinus => Precedence::Unary,
        Op::Subs | Op::Super => Precedence::Subscript,
        Op::Nop => unreachable!("Nop is never pushed"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    LBrace,
    RBrace,
    Operator,
    Value,
}

/// Transforms a token sequence in natural (infix) order into reverse Polish
/// (postfix) order.
pub struct Compiler<S: Scalar> {
    state: State,
    body: Vec<Token<S>>,
    op_stack: VecDeque<Op>,
    last_op: Option<Op>,
}

impl<S: Scalar> Compiler<S> {
    pub fn new() -> Self {
        Compiler {
            state: State::Empty,
            body: Vec::new(),
            op_stack: VecDeque::new(),
            last_op: None,
        }
    }

    fn is_new_subexpr(&self) -> bool {
        matches!(self.state, State::Empty | State::LBrace)
    }

    pub fn push_token(&mut self, token: Token<S>) -> Result<()> {
        match token {
            Token::Op(op) => self.push_op(op),
            value => self.push_value(value),
        }
    }

    fn push_value(&mut self, value: Token<S>) -> Result<()> {
        // Juxtaposition becomes explicit: \a\b -> \a & \b, }\a -> } & \a.
        if matches!(self.state, State::Value | State::RBrace) {
            self.push_op(Op::Splice)?;
        }

        self.body.push(value);
        self.state = State::Value;
        Ok(())
    }

    pub fn push_op(&mut self, op: Op) -> Result<()> {
        if (op == Op::Minus) && self.is_new_subexpr() {
            self.do_push(Op::UMinus);
            return Ok(());
        }

        if op != Op::LBrace {
            if self.state == State::Empty {
                return Err(EngineError::ConsecutiveOperators(
                    "<start>".to_string(),
                    op.to_string(),
                ));
            }

            let after_bracket = self.state == State::LBrace;
            if after_bracket || self.state == State::Operator {
                let is_closing = op == Op::RBrace;

                if is_closing && after_bracket {
                    return Err(EngineError::EmptyBracket);
                }
                if !is_closing && after_bracket {
                    return Err(EngineError::ConsecutiveOperators(
                        "{".to_string(),
                        op.to_string(),
                    ));
                }
                if is_closing && !after_bracket {
                    return Err(EngineError::ConsecutiveOperators(
                        self.last_op.map(|o| o.to_string()).unwrap_or_default(),
                        op.to_string(),
                    ));
                }
                if !is_closing && !after_bracket {
                    return Err(EngineError::ConsecutiveOperators(
                        self.last_op.map(|o| o.to_string()).unwrap_or_default(),
                        op.to_string(),
                    ));
                }
            }
        }

        if op == Op::LBrace {
            self.do_push(op);
            return Ok(());
        }

        if op == Op::RBrace {
            self.pop_until(|stack| {
                if stack.is_empty() {
                    return Err(EngineError::UnmatchedCloseBracket);
                }
                Ok(*stack.front().unwrap() == Op::LBrace)
            })?;
            self.op_stack.pop_front();
            self.state = State::RBrace;
            self.last_op = Some(op);
            return Ok(());
        }

        let incoming = precedence(op);
        self.pop_until(|stack| {
            if stack.is_empty() {
                return Ok(true);
            }
            Ok(incoming > precedence(*stack.front().unwrap()))
        })?;

        self.do_push(op);
        Ok(())
    }

    fn do_push(&mut self, op: Op) {
        self.op_stack.push_front(op);
        self.last_op = Some(op);
        self.state = match op {
            Op::LBrace => State::LBrace,
            Op::RBrace => State::RBrace,
            _ => State::Operator,
        };
    }

    fn pop_until(&mut self, cond: impl Fn(&VecDeque<Op>) -> Result<bool>) -> Result<()> {
        while !cond(&self.op_stack)? {
            let top = self.op_stack.pop_front().expect("cond checked non-empty");
            self.body.push(Token::Op(top));
        }
        Ok(())
    }

    /// Drains the operator stack as if at the end of an expression.
    pub fn pop_all(&mut self) -> Result<()> {
        self.pop_until(|stack| {
            let Some(top) = stack.front() else {
                return Ok(true);
            };
            if *top == Op::LBrace {
                return Err(EngineError::UnmatchedOpenBracket);
            }
            if *top == Op::UMinus {
                if self.body.is_empty() {
                    return Err(EngineError::MissingOperand(top.to_string()));
                }
            } else if self.body.len() < 2 {
                return Err(EngineError::MissingOperand(top.to_string()));
            }
            Ok(false)
        })
    }

    /// Compiles a full token stream to postfix order.
    pub fn compile(tokens: impl IntoIterator<Item = Result<Token<S>>>) -> Result<Vec<Token<S>>> {
        let mut compiler = Compiler::new();
        for token in tokens {
            compiler.push_token(token?)?;
        }
        compiler.pop_all()?;
        Ok(compiler.body)
    }
}

impl<S: Scalar> Default for Compiler<S> {
    fn default() -> Self {
        Compiler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;
    use crate::token::Tokenizer;

    fn compile(src: &str) -> Vec<Token<Rational>> {
        Compiler::compile(Tokenizer::<Rational>::new(src)).unwrap()
    }

    #[test]
    fn simple_sum_is_already_postfix_of_two_values() {
        let code = compile("\\a + \\b");
        assert_eq!(
            code,
            vec![
                Token::Literal("a".into()),
                Token::Literal("b".into()),
                Token::Op(Op::Plus),
            ]
        );
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let code = compile("\\a + \\b * \\c");
        assert_eq!(
            code,
            vec![
                Token::Literal("a".into()),
                Token::Literal("b".into()),
                Token::Literal("c".into()),
                Token::Op(Op::Mul),
                Token::Op(Op::Plus),
            ]
        );
    }

    #[test]
    fn juxtaposition_becomes_splice() {
        let code = compile("\\a\\b");
        assert_eq!(
            code,
            vec![
                Token::Literal("a".into()),
                Token::Literal("b".into()),
                Token::Op(Op::Splice),
            ]
        );
    }

    #[test]
    fn unmatched_open_bracket_is_an_error() {
        let err = Compiler::<Rational>::compile(Tokenizer::<Rational>::new("{\\a")).unwrap_err();
        assert_eq!(err, EngineError::UnmatchedOpenBracket);
    }

    #[test]
    fn unmatched_close_bracket_is_an_error() {
        let err = Compiler::<Rational>::compile(Tokenizer::<Rational>::new("\\a}")).unwrap_err();
        assert_eq!(err, EngineError::UnmatchedCloseBracket);
    }

    #[test]
    fn empty_bracket_is_an_error() {
        let err = Compiler::<Rational>::compile(Tokenizer::<Rational>::new("{}")).unwrap_err();
        assert_eq!(err, EngineError::EmptyBracket);
    }

    #[test]
    fn leading_minus_becomes_unary() {
        let code = compile("-\\a");
        assert_eq!(
            code,
            vec![Token::Literal("a".into()), Token::Op(Op::UMinus)]
        );
    }
}
