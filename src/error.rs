//! Error taxonomy for the algebra kernel, the compiler front end, and the REPL.
//!
//! A single flat enum covers every failure kind, matching this crate's existing
//! hand-rolled `Display`/`Error` pattern rather than pulling in `thiserror`.

use std::fmt;

/// Unified error type returned by every fallible stage of the kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The tokenizer hit a character it could not classify, or a malformed literal/number.
    Tokenize(String),

    /// Unmatched `{`.
    UnmatchedOpenBracket,
    /// Unmatched `}`.
    UnmatchedCloseBracket,
    /// `{}` with nothing inside.
    EmptyBracket,
    /// Two operators in a row with no bracket between them.
    ConsecutiveOperators(String, String),
    /// An operator was drained with fewer operands than its arity requires.
    MissingOperand(String),
    /// Execution left more or fewer than one value on the interpreter stack.
    InconsistentExpression,

    /// An arithmetic operator was applied to an operand that is not a number or polynomial.
    NonNumericInArithmetic,
    /// Division was attempted with a non-scalar divisor.
    NonDivisibleOperand,
    /// `_`/`^` was applied to something that cannot carry indices.
    SubscriptTargetNotTensor,
    /// A subscript/superscript list held something other than a literal.
    IndexNotLiteral,

    /// A tensor id is not a member of its basis.
    UnknownBasisId(String),
    /// A tensor was given more indices than its basis allows.
    TooManyIndices { id: String, max: usize },
    /// A tensor reached canonicalization without the index count its id requires.
    MalformedTensor(String),

    /// An invariant the kernel assumes was violated; should never surface in practice.
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Tokenize(s) => write!(f, "tokenize error: {s}"),
            EngineError::UnmatchedOpenBracket => write!(f, "unmatched opening bracket"),
            EngineError::UnmatchedCloseBracket => write!(f, "unmatched closing bracket"),
            EngineError::EmptyBracket => write!(f, "empty bracket"),
            EngineError::ConsecutiveOperators(a, b) => {
                write!(f, "consecutive operators {a} and {b}")
            }
            EngineError::MissingOperand(op) => {
                write!(f, "{op} is missing one or more operands")
            }
            EngineError::InconsistentExpression => write!(f, "inconsistent expression"),
            EngineError::NonNumericInArithmetic => {
                write!(f, "operand is not a number or polynomial")
            }
            EngineError::NonDivisibleOperand => write!(f, "can only divide by a number"),
            EngineError::SubscriptTargetNotTensor => {
                write!(f, "subscript/superscript target is not a tensor")
            }
            EngineError::IndexNotLiteral => {
                write!(f, "can only convert a literal to a tensor index")
            }
            EngineError::UnknownBasisId(id) => write!(f, "tensor identifier {id} not in basis"),
            EngineError::TooManyIndices { id, max } => {
                write!(f, "too many indices for {id} (maximum {max})")
            }
            EngineError::MalformedTensor(id) => {
                write!(f, "tensor {id} does not carry the indices its basis requires")
            }
            EngineError::Internal(s) => write!(f, "internal error: {s}"),
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let e = EngineError::TooManyIndices {
            id: "\\eta".to_string(),
            max: 2,
        };
        assert_eq!(e.to_string(), "too many indices for \\eta (maximum 2)");
    }

    #[test]
    fn error_trait_is_implemented() {
        let e: Box<dyn std::error::Error> = Box::new(EngineError::UnmatchedOpenBracket);
        assert_eq!(e.to_string(), "unmatched opening bracket");
    }
}
