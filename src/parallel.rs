//! Parallel batch operations using Rayon.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symgrad = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Trees are immutable and `Expr` is `Send + Sync`, so evaluating or
//! differentiating many expressions (gradient components, per-point
//! residuals) is embarrassingly parallel.

use rayon::prelude::*;

use crate::ast::Expr;
use crate::error::ExprError;
use crate::symbol::Symbol;

/// Evaluate a slice of expressions in parallel.
///
/// # Errors
/// Fails with the error of any expression that fails; which one wins is
/// unspecified when several fail.
pub fn evaluate_batch(exprs: &[Expr]) -> Result<Vec<f64>, ExprError> {
    exprs.par_iter().map(Expr::evaluate).collect()
}

/// Differentiate a slice of expressions with respect to `var` in parallel.
///
/// # Errors
/// Fails with the error of any expression that fails.
pub fn differentiate_batch(exprs: &[Expr], var: Symbol) -> Result<Vec<Expr>, ExprError> {
    exprs.par_iter().map(|e| e.derivative(var)).collect()
}
