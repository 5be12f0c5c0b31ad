//! Symbolic Expression Trees for Least-Squares Regression
//!
//! A small, focused Rust library for building arithmetic expression trees
//! over constants and named variables, evaluating them numerically,
//! differentiating them symbolically, and rendering them as precedence-aware
//! strings. The driving use case is expressing a least-squares cost function
//! and its gradient symbolically so callers never hand-derive formulas.
//!
//! # Features
//! - Immutable expression trees with cheap `Arc`-shared children
//! - N-ary sums and products; subtraction and division as display-tagged
//!   sums/products (composition over inheritance)
//! - Stack-safe iterative evaluation, even for one-term-per-data-point trees
//! - **Type-safe expression building** with operator overloading
//! - **Builder pattern API** for differentiation with opt-in memoization
//! - Linear-regression hypothesis/cost builders and a synthetic data
//!   generator
//!
//! # Usage Examples
//!
//! ## Building and differentiating
//! ```ignore
//! use symgrad::{Expr, sym};
//!
//! let x = Expr::variable_with("x", 2.0);
//! let expr = symgrad::pow(x, 2.0) + 1.0;
//! assert_eq!(expr.evaluate()?, 5.0);
//!
//! let dx = expr.derivative(sym("x"))?;
//! assert_eq!(dx.evaluate()?, 4.0); // 2x at x = 2
//! ```
//!
//! ## Least-squares cost and gradient
//! ```ignore
//! use symgrad::{Expr, sym, regression::{cost, gradient, hypothesis}};
//!
//! let theta = [Expr::variable_with("theta0", 0.0), Expr::variable_with("theta1", 1.0)];
//! let xs: Vec<Expr> = data.iter().map(|(x, _)| Expr::constant(*x)).collect();
//! let ys: Vec<Expr> = data.iter().map(|(_, y)| Expr::constant(*y)).collect();
//!
//! let j = cost(|x| hypothesis(&[Expr::constant(1.0), x.clone()], &theta).unwrap(), &xs, &ys)?;
//! let grad = gradient(&j, &[sym("theta0"), sym("theta1")])?;
//! ```

mod ast;
mod builder;
pub mod data;
mod diff;
mod display;
mod error;
mod eval;
pub(crate) mod numeric;
pub mod regression;
mod symbol;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{Binding, Expr, ExprKind, ProductForm, SumForm};
pub use builder::{IntoExpr, add, div, mul, neg, pow, sub};
pub use diff::Diff;
pub use error::ExprError;
pub use symbol::{Symbol, sym, symbol_count};
