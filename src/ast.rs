//! Expression trees for symbolic arithmetic.
//!
//! An [`Expr`] is an immutable tree over constants and named variables.
//! Subtraction and division are not distinct algebraic kinds: they are sums
//! and products over canonical operands, tagged with a display form so
//! rendering can show `a - b` and `a / b` while evaluation and
//! differentiation see only the underlying sum/product machinery.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::symbol::{Symbol, sym};

/// Global counter for expression IDs
static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// An immutable expression tree node.
///
/// Children are `Arc`-shared; cloning an `Expr` is cheap. The `id` is unique
/// per node and used only for debugging and derivative memoization — equality
/// is structural on [`ExprKind`].
#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID (not used in equality comparisons)
    pub id: u64,
    pub kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// What a variable resolves to.
///
/// A variable is simultaneously a free unknown and an alias cell: bound to a
/// literal it evaluates to that literal but still differentiates as the
/// independent variable itself; bound to an expression it defers entirely to
/// that expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// No value assigned; evaluation and self-differentiation fail.
    Free,
    /// Bound to a literal float.
    Literal(f64),
    /// Alias for another expression.
    Expr(Arc<Expr>),
}

/// Display form of a sum: a plain `+`-joined chain, or a two-operand
/// difference rendered as `a - b`.
#[derive(Debug, Clone, PartialEq)]
pub enum SumForm {
    Plain,
    Difference { lhs: Arc<Expr>, rhs: Arc<Expr> },
}

/// Display form of a product: a plain `*`-joined chain, or a two-operand
/// quotient rendered as `a / b`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductForm {
    Plain,
    Quotient { lhs: Arc<Expr>, rhs: Arc<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal float (e.g. 3.14)
    Constant(f64),

    /// Named variable with a binding cell
    Variable { name: Symbol, binding: Binding },

    /// N-ary sum, at least one operand
    Sum { terms: Vec<Arc<Expr>>, form: SumForm },

    /// N-ary product, at least two operands
    Product {
        factors: Vec<Arc<Expr>>,
        form: ProductForm,
    },

    /// Base raised to an exponent, both expressions
    Power { base: Arc<Expr>, exponent: Arc<Expr> },
}

impl Expr {
    pub(crate) fn new(kind: ExprKind) -> Self {
        Expr {
            id: next_id(),
            kind,
        }
    }

    // Constructors

    /// Create a constant expression.
    ///
    /// Numeric leaves are expected to be finite; a non-finite value here
    /// propagates as a non-finite evaluation result rather than an error.
    pub fn constant(value: f64) -> Self {
        debug_assert!(value.is_finite(), "constant leaves should be finite");
        Expr::new(ExprKind::Constant(value))
    }

    /// Create a free (unbound) variable.
    pub fn variable(name: &str) -> Self {
        Expr::new(ExprKind::Variable {
            name: sym(name),
            binding: Binding::Free,
        })
    }

    /// Create a variable bound to a literal value.
    ///
    /// The variable evaluates to `value` but is still treated as the
    /// independent variable when differentiated with respect to its own name.
    pub fn variable_with(name: &str, value: f64) -> Self {
        Expr::new(ExprKind::Variable {
            name: sym(name),
            binding: Binding::Literal(value),
        })
    }

    /// Create a variable aliased to another expression.
    ///
    /// Evaluation, differentiation, and rendering all defer to the bound
    /// expression.
    pub fn variable_bound(name: &str, expr: Expr) -> Self {
        Expr::new(ExprKind::Variable {
            name: sym(name),
            binding: Binding::Expr(Arc::new(expr)),
        })
    }

    /// Create an n-ary sum.
    ///
    /// # Errors
    /// Returns [`ExprError::EmptySum`](crate::ExprError::EmptySum) when
    /// `terms` is empty.
    pub fn sum(terms: Vec<Expr>) -> Result<Self, crate::ExprError> {
        if terms.is_empty() {
            return Err(crate::ExprError::EmptySum);
        }
        Ok(Expr::sum_from_arcs(
            terms.into_iter().map(Arc::new).collect(),
        ))
    }

    /// Create an n-ary product.
    ///
    /// # Errors
    /// Returns [`ExprError::ProductArity`](crate::ExprError::ProductArity)
    /// when fewer than two operands are given.
    pub fn product(factors: Vec<Expr>) -> Result<Self, crate::ExprError> {
        if factors.len() < 2 {
            return Err(crate::ExprError::ProductArity {
                got: factors.len(),
            });
        }
        Ok(Expr::product_from_arcs(
            factors.into_iter().map(Arc::new).collect(),
        ))
    }

    /// Sum over already-shared operands. Callers uphold the ≥1 invariant.
    pub(crate) fn sum_from_arcs(terms: Vec<Arc<Expr>>) -> Self {
        debug_assert!(!terms.is_empty());
        Expr::new(ExprKind::Sum {
            terms,
            form: SumForm::Plain,
        })
    }

    /// Product over already-shared operands. Callers uphold the ≥2 invariant.
    pub(crate) fn product_from_arcs(factors: Vec<Arc<Expr>>) -> Self {
        debug_assert!(factors.len() >= 2);
        Expr::new(ExprKind::Product {
            factors,
            form: ProductForm::Plain,
        })
    }

    /// Create `a - b`, stored as `a + (-1 * b)` with a difference display tag.
    pub fn difference(a: Expr, b: Expr) -> Self {
        let lhs = Arc::new(a);
        let rhs = Arc::new(b);
        let negated = Expr::product_from_arcs(vec![
            Arc::new(Expr::constant(-1.0)),
            Arc::clone(&rhs),
        ]);
        Expr::new(ExprKind::Sum {
            terms: vec![Arc::clone(&lhs), Arc::new(negated)],
            form: SumForm::Difference { lhs, rhs },
        })
    }

    /// Create `a / b`, stored as `a * b^-1` with a quotient display tag.
    pub fn quotient(a: Expr, b: Expr) -> Self {
        let lhs = Arc::new(a);
        let rhs = Arc::new(b);
        let reciprocal = Expr::power_from_arcs(Arc::clone(&rhs), Arc::new(Expr::constant(-1.0)));
        Expr::new(ExprKind::Product {
            factors: vec![Arc::clone(&lhs), Arc::new(reciprocal)],
            form: ProductForm::Quotient { lhs, rhs },
        })
    }

    /// Create a power expression.
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Expr::power_from_arcs(Arc::new(base), Arc::new(exponent))
    }

    pub(crate) fn power_from_arcs(base: Arc<Expr>, exponent: Arc<Expr>) -> Self {
        Expr::new(ExprKind::Power { base, exponent })
    }

    // Accessors

    /// The literal value if this node is a constant.
    pub fn as_constant(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Constant(n) => Some(*n),
            _ => None,
        }
    }

    /// Check whether this node is the constant one (with tolerance).
    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_constant().is_some_and(crate::numeric::is_one)
    }

    /// Check whether this node is the constant negative one (with tolerance).
    #[inline]
    pub fn is_neg_one_num(&self) -> bool {
        self.as_constant().is_some_and(crate::numeric::is_neg_one)
    }

    /// True for any multi-operand node (sum or product of either display
    /// form). Rendering parenthesizes these when nested.
    pub fn is_nary(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Sum { .. } | ExprKind::Product { .. }
        )
    }

    // Analysis

    /// Count the total number of nodes in the tree (bindings not followed).
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Constant(_) | ExprKind::Variable { .. } => 1,
            ExprKind::Sum { terms, .. } => 1 + terms.iter().map(|t| t.node_count()).sum::<usize>(),
            ExprKind::Product { factors, .. } => {
                1 + factors.iter().map(|f| f.node_count()).sum::<usize>()
            }
            ExprKind::Power { base, exponent } => 1 + base.node_count() + exponent.node_count(),
        }
    }

    /// Maximum nesting depth of the tree (bindings not followed).
    pub fn max_depth(&self) -> usize {
        match &self.kind {
            ExprKind::Constant(_) | ExprKind::Variable { .. } => 1,
            ExprKind::Sum { terms, .. } => {
                1 + terms.iter().map(|t| t.max_depth()).max().unwrap_or(0)
            }
            ExprKind::Product { factors, .. } => {
                1 + factors.iter().map(|f| f.max_depth()).max().unwrap_or(0)
            }
            ExprKind::Power { base, exponent } => 1 + base.max_depth().max(exponent.max_depth()),
        }
    }

    /// Whether differentiating with respect to `var` can produce a non-zero
    /// result. Matches derivative semantics: a variable depends only on its
    /// own name, never through an alias with a different name.
    pub fn depends_on(&self, var: Symbol) -> bool {
        match &self.kind {
            ExprKind::Constant(_) => false,
            ExprKind::Variable { name, .. } => *name == var,
            ExprKind::Sum { terms, .. } => terms.iter().any(|t| t.depends_on(var)),
            ExprKind::Product { factors, .. } => factors.iter().any(|f| f.depends_on(var)),
            ExprKind::Power { base, exponent } => {
                base.depends_on(var) || exponent.depends_on(var)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExprError;

    #[test]
    fn test_constructors() {
        let num = Expr::constant(5.0);
        match &num.kind {
            ExprKind::Constant(n) => assert_eq!(*n, 5.0),
            _ => panic!("Expected Constant variant"),
        }

        let var = Expr::variable("x");
        match &var.kind {
            ExprKind::Variable { name, binding } => {
                assert_eq!(*name, sym("x"));
                assert_eq!(*binding, Binding::Free);
            }
            _ => panic!("Expected Variable variant"),
        }
    }

    #[test]
    fn test_ids_unique_equality_structural() {
        let e1 = Expr::constant(1.0);
        let e2 = Expr::constant(1.0);
        let e3 = Expr::constant(2.0);

        assert_ne!(e1.id, e2.id);
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
    }

    #[test]
    fn test_product_arity_enforced() {
        assert_eq!(
            Expr::product(vec![]),
            Err(ExprError::ProductArity { got: 0 })
        );
        assert_eq!(
            Expr::product(vec![Expr::constant(1.0)]),
            Err(ExprError::ProductArity { got: 1 })
        );
        assert!(Expr::product(vec![Expr::constant(1.0), Expr::constant(2.0)]).is_ok());
    }

    #[test]
    fn test_empty_sum_rejected() {
        assert_eq!(Expr::sum(vec![]), Err(ExprError::EmptySum));
        assert!(Expr::sum(vec![Expr::constant(1.0)]).is_ok());
    }

    #[test]
    fn test_difference_is_tagged_sum() {
        let d = Expr::difference(Expr::variable("a"), Expr::variable("b"));
        match &d.kind {
            ExprKind::Sum { terms, form } => {
                assert_eq!(terms.len(), 2);
                assert!(matches!(form, SumForm::Difference { .. }));
                // Second canonical term is -1 * b
                match &terms[1].kind {
                    ExprKind::Product { factors, .. } => {
                        assert!(factors[0].is_neg_one_num());
                    }
                    _ => panic!("Expected negated product as second term"),
                }
            }
            _ => panic!("Expected Sum variant"),
        }
    }

    #[test]
    fn test_quotient_is_tagged_product() {
        let q = Expr::quotient(Expr::variable("a"), Expr::variable("b"));
        match &q.kind {
            ExprKind::Product { factors, form } => {
                assert_eq!(factors.len(), 2);
                assert!(matches!(form, ProductForm::Quotient { .. }));
                // Second canonical factor is b^-1
                match &factors[1].kind {
                    ExprKind::Power { exponent, .. } => {
                        assert!(exponent.is_neg_one_num());
                    }
                    _ => panic!("Expected reciprocal power as second factor"),
                }
            }
            _ => panic!("Expected Product variant"),
        }
    }

    #[test]
    fn test_node_count_and_depth() {
        let x = Expr::variable("x");
        assert_eq!(x.node_count(), 1);
        assert_eq!(x.max_depth(), 1);

        let tree = Expr::power(
            Expr::sum(vec![Expr::variable("x"), Expr::constant(1.0)]).unwrap(),
            Expr::constant(2.0),
        );
        assert_eq!(tree.node_count(), 5); // Power + (Sum + x + 1) + 2
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn test_depends_on_by_name_only() {
        let x = sym("x");
        let expr = Expr::sum(vec![Expr::variable("x"), Expr::variable("y")]).unwrap();
        assert!(expr.depends_on(x));
        assert!(!expr.depends_on(sym("z")));

        // An alias named y does not depend on x even if its binding mentions x
        let alias = Expr::variable_bound("y", Expr::variable("x"));
        assert!(!alias.depends_on(x));
    }
}
