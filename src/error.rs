use std::fmt;

/// Errors that can occur while constructing, evaluating, or differentiating
/// expression trees.
///
/// Propagation is fail-fast: every operation either completes fully or
/// returns the first error it hits. Numeric-domain failures (negative base
/// with fractional exponent, division by zero) are NOT represented here;
/// they surface as non-finite floats from evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A variable with no binding was evaluated, or differentiated with
    /// respect to its own name.
    UnboundVariable { name: String },

    /// A product was constructed with fewer than two operands.
    ProductArity { got: usize },

    /// A sum was constructed with no operands.
    EmptySum,

    /// Two paired operand sequences differ in length.
    LengthMismatch { left: usize, right: usize },

    /// A dataset of zero points was requested.
    EmptyDataset,
}

impl ExprError {
    /// Create an `UnboundVariable` error for the given name.
    pub fn unbound(name: impl Into<String>) -> Self {
        ExprError::UnboundVariable { name: name.into() }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::UnboundVariable { name } => {
                write!(f, "Variable '{}' has no value assigned", name)
            }
            ExprError::ProductArity { got } => {
                write!(f, "Product requires at least 2 operands, got {}", got)
            }
            ExprError::EmptySum => write!(f, "Sum requires at least 1 operand"),
            ExprError::LengthMismatch { left, right } => {
                write!(
                    f,
                    "Operand sequences must have equal length, got {} and {}",
                    left, right
                )
            }
            ExprError::EmptyDataset => write!(f, "Dataset must contain at least one point"),
        }
    }
}

impl std::error::Error for ExprError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_names_variable() {
        let err = ExprError::unbound("x");
        assert_eq!(format!("{}", err), "Variable 'x' has no value assigned");
    }

    #[test]
    fn test_arity_message_carries_count() {
        let err = ExprError::ProductArity { got: 1 };
        assert!(format!("{}", err).contains("got 1"));
    }
}
