// Display formatting for expression trees
use std::fmt;

use crate::ast::{Binding, Expr, ExprKind, ProductForm, SumForm};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Constant(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e10 {
                    // Display as integer if no fractional part
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }

            // An aliased variable is transparent for display; a literal
            // binding shows the name, never the value.
            ExprKind::Variable { name, binding } => match binding {
                Binding::Expr(inner) => write!(f, "{}", inner),
                _ => write!(f, "{}", name),
            },

            ExprKind::Sum { terms, form } => match form {
                SumForm::Plain => {
                    for (i, term) in terms.iter().enumerate() {
                        if i > 0 {
                            write!(f, " + ")?;
                        }
                        write!(f, "{}", term)?;
                    }
                    Ok(())
                }
                SumForm::Difference { lhs, rhs } => {
                    write!(f, "{} - {}", lhs, parenthesize_nary(rhs))
                }
            },

            ExprKind::Product { factors, form } => match form {
                ProductForm::Plain => fmt_plain_product(f, factors),
                ProductForm::Quotient { lhs, rhs } => {
                    write!(f, "{} / {}", parenthesize_nary(lhs), parenthesize_nary(rhs))
                }
            },

            ExprKind::Power { base, exponent } => {
                write!(
                    f,
                    "{}^{}",
                    parenthesize_nary(base),
                    parenthesize_nary(exponent)
                )
            }
        }
    }
}

/// Render a product chain, eliding a leading constant 1 or -1 to a bare
/// sign. Sum operands are parenthesized; multiplication binds tighter.
fn fmt_plain_product(f: &mut fmt::Formatter<'_>, factors: &[std::sync::Arc<Expr>]) -> fmt::Result {
    if factors[0].is_one_num() || factors[0].is_neg_one_num() {
        if factors[0].is_neg_one_num() {
            write!(f, "-")?;
        }
        let rest = &factors[1..];
        return if rest.len() == 1 {
            write!(f, "{}", rest[0])
        } else {
            fmt_plain_product(f, rest)
        };
    }

    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, " * ")?;
        }
        write!(f, "{}", fmt_product_operand(factor))?;
    }
    Ok(())
}

/// Wrap sums (of either display form) in parentheses.
fn fmt_product_operand(expr: &Expr) -> String {
    match expr.kind {
        ExprKind::Sum { .. } => format!("({})", expr),
        _ => format!("{}", expr),
    }
}

/// Wrap any multi-operand expression in parentheses.
fn parenthesize_nary(expr: &Expr) -> String {
    if expr.is_nary() {
        format!("({})", expr)
    } else {
        format!("{}", expr)
    }
}
