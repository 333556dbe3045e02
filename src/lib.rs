//! # dirac-algebra
//!
//! A symbolic computer algebra engine for expressions built from Dirac gamma
//! matrices and the Lorentz-invariant tensors (`\eta`, `\delta`, `\varepsilon`)
//! they contract against.
//!
//! An expression such as `\gamma_\mu\gamma^\mu` is parsed, compiled to
//! postfix, executed against an operand stack, and reduced to canonical
//! form: a 5-component vector of Lorentz-invariant-tensor polynomials, one
//! component per element of the basis `{1, \gamma^\mu, \sigma^{\mu\nu},
//! \gamma^5\gamma^\mu, \gamma^5}`. The canonical form can be pretty-printed
//! back to LaTeX.
//!
//! ## Pipeline
//!
//! ```text
//! source text -> Tokenizer -> Compiler (shunting-yard) -> Interpreter (stack
//! machine) -> Operand/OpList arithmetic -> CanonicalExpr -> ExprPrinter
//! ```
//!
//! Coefficients are generic over [`scalar::Scalar`]; the crate ships two
//! implementations, [`rational::Rational`] (exact mode, the default) and
//! `f64` (float mode).
//!
//! ## Quick start
//!
//! ```
//! use dirac_algebra::interpreter::run;
//! use dirac_algebra::rational::Rational;
//!
//! let expr = run::<Rational>("\\gamma_\\mu\\gamma^\\mu").unwrap();
//! assert!(expr.is_scalar(dirac_algebra::complex::Complex::real(Rational::from_int(4))));
//! ```

pub mod cli;
pub mod compiler;
pub mod complex;
pub mod error;
pub mod fierz;
pub mod gamma;
pub mod index;
pub mod interpreter;
pub mod li;
pub mod operations;
pub mod permutation;
pub mod polynomial;
pub mod printer;
pub mod rational;
pub mod scalar;
pub mod settings;
pub mod tensor;
pub mod token;

pub use complex::Complex;
pub use error::{EngineError, Result};
pub use gamma::{reduce_gamma, CanonicalExpr, GammaBasis, GammaId, GammaPolynomial, GammaTensor};
pub use interpreter::{run, Interpreter};
pub use printer::ExprPrinter;
pub use rational::Rational;
pub use scalar::Scalar;
pub use settings::{Mode, Settings};
