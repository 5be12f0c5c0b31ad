//! Construction layer: literal coercion and operator-style tree building.
//!
//! The free functions accept either expressions or bare numeric literals and
//! normalize literals to constant nodes at the boundary. The `std::ops`
//! implementations are sugar over the same functions, so
//! `theta * x + intercept` builds the same tree as
//! `add(mul(theta, x), intercept)`.

use std::ops;
use std::sync::Arc;

use crate::ast::Expr;

/// Conversion into an expression node, coercing numeric literals to
/// constants.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for f64 {
    fn into_expr(self) -> Expr {
        Expr::constant(self)
    }
}

impl IntoExpr for i32 {
    fn into_expr(self) -> Expr {
        Expr::constant(f64::from(self))
    }
}

/// Build `a + b`.
pub fn add(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::sum_from_arcs(vec![Arc::new(a.into_expr()), Arc::new(b.into_expr())])
}

/// Build `a - b` (a sum with a negated second operand, difference display).
pub fn sub(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::difference(a.into_expr(), b.into_expr())
}

/// Build `a * b`.
pub fn mul(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::product_from_arcs(vec![Arc::new(a.into_expr()), Arc::new(b.into_expr())])
}

/// Build `a / b` (a product with a reciprocal power, quotient display).
pub fn div(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::quotient(a.into_expr(), b.into_expr())
}

/// Build `base ^ exponent`.
pub fn pow(base: impl IntoExpr, exponent: impl IntoExpr) -> Expr {
    Expr::power(base.into_expr(), exponent.into_expr())
}

/// Build `-a`, stored as `-1 * a` and rendered with a bare minus sign.
pub fn neg(a: impl IntoExpr) -> Expr {
    mul(-1.0, a)
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $builder:ident) => {
        impl ops::$trait for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $builder(self, rhs)
            }
        }

        impl ops::$trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $builder(self, rhs)
            }
        }

        impl ops::$trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $builder(self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::symbol::sym;

    #[test]
    fn test_literals_are_coerced_to_constants() {
        let expr = add(Expr::variable("x"), 1.0);
        match &expr.kind {
            ExprKind::Sum { terms, .. } => {
                assert_eq!(terms[1].as_constant(), Some(1.0));
            }
            _ => panic!("Expected Sum variant"),
        }
    }

    #[test]
    fn test_operators_match_builders() {
        let by_ops = Expr::variable_with("x", 2.0) * 3.0 + 1.0;
        let by_fns = add(mul(Expr::variable_with("x", 2.0), 3.0), 1.0);
        assert_eq!(by_ops, by_fns);
        assert_eq!(by_ops.evaluate(), Ok(7.0));
    }

    #[test]
    fn test_operator_chain_evaluates() {
        let x = Expr::variable_with("x", 4.0);
        let expr = (2.0 * x - 3.0) / 5.0;
        // Division goes through a reciprocal power, so allow rounding slack.
        assert!((expr.evaluate().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_neg_builds_signed_product() {
        let expr = -Expr::variable_with("x", 2.0);
        assert_eq!(expr.evaluate(), Ok(-2.0));
        assert_eq!(expr.to_string(), "-x");
    }

    #[test]
    fn test_operator_tree_differentiates() {
        // d/dx (3x + 1) = 3
        let x = Expr::variable_with("x", 0.0);
        let expr = 3.0 * x + 1.0;
        let d = expr.derivative(sym("x")).unwrap();
        assert_eq!(d.evaluate(), Ok(3.0));
    }
}
