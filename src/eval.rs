//! Numeric evaluation.
//!
//! Evaluation walks the tree with an explicit work stack instead of native
//! recursion: a cost expression carries one residual term per data point, so
//! sums and products can be arbitrarily wide and alias chains arbitrarily
//! long without risking stack exhaustion.
//!
//! Products reduce as a left fold seeded at 1.0. For three or more factors
//! this can differ in the last ulp from a right-nested grouping
//! `v0 * (v1 * (v2 * ...))`.

use crate::ast::{Binding, Expr, ExprKind};
use crate::error::ExprError;

enum Frame<'a> {
    Visit(&'a Expr),
    ReduceSum(usize),
    ReduceProduct(usize),
    ReducePower,
}

impl Expr {
    /// Reduce the tree to a single float.
    ///
    /// Expression-bound variables defer to their binding; literal-bound
    /// variables yield their literal.
    ///
    /// # Errors
    /// Returns [`ExprError::UnboundVariable`] when a free variable is
    /// reached, directly or through a chain of aliases.
    ///
    /// Numeric-domain failures (negative base with fractional exponent,
    /// division by zero) are not intercepted; they come back as non-finite
    /// floats.
    pub fn evaluate(&self) -> Result<f64, ExprError> {
        let mut frames = vec![Frame::Visit(self)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Visit(expr) => match &expr.kind {
                    ExprKind::Constant(n) => values.push(*n),

                    ExprKind::Variable { name, binding } => match binding {
                        Binding::Free => {
                            return Err(ExprError::unbound(name.name().as_ref()));
                        }
                        Binding::Literal(v) => values.push(*v),
                        Binding::Expr(inner) => frames.push(Frame::Visit(inner.as_ref())),
                    },

                    ExprKind::Sum { terms, .. } => {
                        frames.push(Frame::ReduceSum(terms.len()));
                        // Reversed so operands are visited left to right.
                        for term in terms.iter().rev() {
                            frames.push(Frame::Visit(term.as_ref()));
                        }
                    }

                    ExprKind::Product { factors, .. } => {
                        frames.push(Frame::ReduceProduct(factors.len()));
                        for factor in factors.iter().rev() {
                            frames.push(Frame::Visit(factor.as_ref()));
                        }
                    }

                    ExprKind::Power { base, exponent } => {
                        frames.push(Frame::ReducePower);
                        frames.push(Frame::Visit(exponent.as_ref()));
                        frames.push(Frame::Visit(base.as_ref()));
                    }
                },

                Frame::ReduceSum(arity) => {
                    let split = values.len() - arity;
                    let total: f64 = values.drain(split..).sum();
                    values.push(total);
                }

                Frame::ReduceProduct(arity) => {
                    let split = values.len() - arity;
                    // Left fold over the operand values; the 1.0 seed is exact.
                    let total: f64 = values.drain(split..).fold(1.0, |acc, v| acc * v);
                    values.push(total);
                }

                Frame::ReducePower => {
                    let exponent = values.pop().unwrap_or_default();
                    let base = values.pop().unwrap_or_default();
                    values.push(base.powf(exponent));
                }
            }
        }

        Ok(values.pop().unwrap_or_default())
    }
}
