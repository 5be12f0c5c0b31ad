//! Differentiation engine - applies calculus rules.
//!
//! # Design note: the power rule is deliberately simple
//!
//! `Power` nodes differentiate with the fixed rule
//! `exponent * base^(exponent - 1) * base'`, which assumes the exponent does
//! not depend on the differentiation variable. The general term
//! (`base^exponent * ln(base) * exponent'`) is intentionally NOT added:
//! downstream consumers depend on the simple rule, and the node set carries
//! no logarithm to express the general term with. Quotients built through
//! [`Expr::quotient`] are unaffected - their reciprocal power has a constant
//! exponent, so the chain `b^-1 -> -b^-2 * b'` is exact.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::{Binding, Expr, ExprKind};
use crate::error::ExprError;
use crate::symbol::Symbol;

type DerivativeCache = FxHashMap<(u64, Symbol), Expr>;

/// Builder for differentiation.
///
/// # Example
/// ```ignore
/// use symgrad::{Diff, Expr, sym};
///
/// let x = Expr::variable_with("x", 2.0);
/// let expr = symgrad::pow(x, 2.0);
/// let dx = Diff::new().memoize(true).differentiate(&expr, sym("x"))?;
/// assert_eq!(dx.evaluate()?, 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diff {
    memoize: bool,
}

impl Diff {
    /// Create a differentiation builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read-through memoization of subtree derivatives.
    ///
    /// The cache is keyed by `(node id, variable)` and lives for a single
    /// [`differentiate`](Diff::differentiate) call. Trees are immutable, so
    /// entries are never invalidated. Off by default; results are identical
    /// either way.
    pub fn memoize(mut self, on: bool) -> Self {
        self.memoize = on;
        self
    }

    /// Differentiate `expr` with respect to `var`, producing a new tree.
    ///
    /// # Errors
    /// Returns [`ExprError::UnboundVariable`] when a free variable named
    /// `var` is differentiated.
    pub fn differentiate(&self, expr: &Expr, var: Symbol) -> Result<Expr, ExprError> {
        let mut cache = DerivativeCache::default();
        self.derive(expr, var, &mut cache)
    }

    fn derive(&self, expr: &Expr, var: Symbol, cache: &mut DerivativeCache) -> Result<Expr, ExprError> {
        if self.memoize {
            if let Some(hit) = cache.get(&(expr.id, var)) {
                return Ok(hit.clone());
            }
        }

        let result = match &expr.kind {
            // Constants have no dependence on any variable
            ExprKind::Constant(_) => Expr::constant(0.0),

            ExprKind::Variable { name, binding } => {
                if *name != var {
                    Expr::constant(0.0)
                } else {
                    match binding {
                        Binding::Free => {
                            return Err(ExprError::unbound(name.name().as_ref()));
                        }
                        // The variable IS the differentiation variable; the
                        // literal is only an evaluation convenience.
                        Binding::Literal(_) => Expr::constant(1.0),
                        // Alias: the binding acts as a substitution step.
                        Binding::Expr(inner) => self.derive(inner, var, cache)?,
                    }
                }
            }

            // Linearity: (a + b + ...)' = a' + b' + ...
            ExprKind::Sum { terms, .. } => {
                let derived = terms
                    .iter()
                    .map(|t| self.derive(t, var, cache).map(Arc::new))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::sum_from_arcs(derived)
            }

            ExprKind::Product { factors, .. } => self.derive_product(factors, var, cache)?,

            // Simple power rule: exponent * base^(exponent - 1) * base'
            ExprKind::Power { base, exponent } => {
                let base_prime = self.derive(base, var, cache)?;
                let decremented =
                    Expr::difference(exponent.as_ref().clone(), Expr::constant(1.0));
                Expr::product_from_arcs(vec![
                    Arc::clone(exponent),
                    Arc::new(Expr::power_from_arcs(Arc::clone(base), Arc::new(decremented))),
                    Arc::new(base_prime),
                ])
            }
        };

        if self.memoize {
            cache.insert((expr.id, var), result.clone());
        }
        Ok(result)
    }

    /// Generalized product rule by left-to-right decomposition.
    ///
    /// Splits the factors into a head `f` and a tail product `g` (a single
    /// remaining factor stands alone) and applies `f'g + fg'`, where `g'`
    /// decomposes the same way. A constant head short-circuits to `f * g'` -
    /// scalar multiples need no product rule.
    ///
    /// The decomposition accumulates right to left in a loop, so stack depth
    /// is independent of the factor count.
    fn derive_product(
        &self,
        factors: &[Arc<Expr>],
        var: Symbol,
        cache: &mut DerivativeCache,
    ) -> Result<Expr, ExprError> {
        let last = factors.len() - 1;
        let mut derived = self.derive(&factors[last], var, cache)?;

        for i in (0..last).rev() {
            let head = &factors[i];
            if matches!(head.kind, ExprKind::Constant(_)) {
                derived =
                    Expr::product_from_arcs(vec![Arc::clone(head), Arc::new(derived)]);
                continue;
            }

            let head_prime = self.derive(head, var, cache)?;
            let tail = if i + 1 == last {
                Arc::clone(&factors[last])
            } else {
                Arc::new(Expr::product_from_arcs(factors[i + 1..].to_vec()))
            };
            derived = Expr::sum_from_arcs(vec![
                Arc::new(Expr::product_from_arcs(vec![Arc::new(head_prime), tail])),
                Arc::new(Expr::product_from_arcs(vec![
                    Arc::clone(head),
                    Arc::new(derived),
                ])),
            ]);
        }
        Ok(derived)
    }
}

impl Expr {
    /// Differentiate with respect to `var` (convenience wrapper).
    ///
    /// Shorthand for `Diff::new().differentiate(self, var)`; use the
    /// [`Diff`] builder directly for memoization.
    ///
    /// # Errors
    /// Returns [`ExprError::UnboundVariable`] when a free variable named
    /// `var` is differentiated.
    pub fn derivative(&self, var: Symbol) -> Result<Expr, ExprError> {
        Diff::new().differentiate(self, var)
    }
}
