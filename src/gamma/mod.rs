//! The Dirac gamma-matrix algebra: basis, structure matrices, and the
//! canonical reducer.

pub mod basis;
pub mod reduce;
pub mod structure;

pub use basis::{gamma_scalar_poly, gamma_tensor_poly, GammaBasis, GammaId, GammaPolynomial, GammaTensor};
pub use reduce::{reduce_gamma, CanonicalExpr};
pub use structure::{gamma5_matrix, gamma_matrix, sigma_matrix, GammaMatrix};
