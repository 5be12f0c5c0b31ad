//! Least-squares model builders.
//!
//! These are thin consumers of the expression core: they compose the linear
//! hypothesis `Σ θᵢ·xᵢ`, the mean-squared-error cost
//! `(1/(2m)) · Σ (yᵢ − f(xᵢ))²`, and the cost gradient, all as symbolic
//! trees a caller can evaluate or differentiate further.

use crate::ast::Expr;
use crate::builder::{div, mul, pow, sub};
use crate::diff::Diff;
use crate::error::ExprError;
use crate::symbol::Symbol;

/// Build the linear hypothesis `Σ θᵢ·xᵢ` from paired input and parameter
/// expressions.
///
/// # Errors
/// Returns [`ExprError::LengthMismatch`] when the sequences differ in
/// length, and [`ExprError::EmptySum`] when both are empty.
///
/// # Example
/// ```ignore
/// use symgrad::{Expr, regression::hypothesis};
///
/// let inputs = [Expr::constant(1.0), Expr::variable_with("x", 2.0)];
/// let params = [
///     Expr::variable_with("theta0", 0.5),
///     Expr::variable_with("theta1", 3.0),
/// ];
/// let f = hypothesis(&inputs, &params)?;
/// assert_eq!(f.evaluate()?, 6.5);
/// ```
pub fn hypothesis(inputs: &[Expr], params: &[Expr]) -> Result<Expr, ExprError> {
    if inputs.len() != params.len() {
        return Err(ExprError::LengthMismatch {
            left: inputs.len(),
            right: params.len(),
        });
    }
    Expr::sum(
        params
            .iter()
            .zip(inputs)
            .map(|(theta, x)| mul(theta, x))
            .collect(),
    )
}

/// Build the least-squares cost `(1/(2m)) · Σ (yᵢ − model(xᵢ))²`.
///
/// Each observed output is wrapped as the expression-bound variable `y`.
/// Expression bindings are display-transparent, so the residuals render
/// with the observed value substituted, e.g. `(2 - theta0 * 1 + ...)^2`.
///
/// # Errors
/// Returns [`ExprError::LengthMismatch`] when the sequences differ in
/// length, and [`ExprError::EmptySum`] for an empty dataset.
pub fn cost<F>(model: F, inputs: &[Expr], outputs: &[Expr]) -> Result<Expr, ExprError>
where
    F: Fn(&Expr) -> Expr,
{
    if inputs.len() != outputs.len() {
        return Err(ExprError::LengthMismatch {
            left: inputs.len(),
            right: outputs.len(),
        });
    }
    let m = outputs.len() as f64;
    let residuals = inputs
        .iter()
        .zip(outputs)
        .map(|(x, y)| {
            let observed = Expr::variable_bound("y", y.clone());
            pow(sub(observed, model(x)), 2.0)
        })
        .collect();
    let total = Expr::sum(residuals)?;
    Ok(mul(div(1.0, mul(2.0, m)), total))
}

/// Compute the gradient of an expression: one partial derivative per
/// variable, in order.
///
/// # Errors
/// Propagates the first [`ExprError::UnboundVariable`] hit while
/// differentiating.
pub fn gradient(expr: &Expr, vars: &[Symbol]) -> Result<Vec<Expr>, ExprError> {
    let diff = Diff::new();
    vars.iter()
        .map(|&var| diff.differentiate(expr, var))
        .collect()
}
