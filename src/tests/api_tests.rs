//! End-to-end API tests: the full generate -> hypothesis -> cost ->
//! gradient -> descend workflow the crate exists for.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::generate_with;
use crate::regression::{cost, gradient, hypothesis};
use crate::symbol::sym;
use crate::{Expr, ExprError};

/// Build the cost expression for a two-parameter linear model at a given
/// parameter point.
fn cost_at(theta0: f64, theta1: f64, data: &[(f64, f64)]) -> Expr {
    let theta = [
        Expr::variable_with("theta0", theta0),
        Expr::variable_with("theta1", theta1),
    ];
    let xs: Vec<Expr> = data.iter().map(|(x, _)| Expr::constant(*x)).collect();
    let ys: Vec<Expr> = data.iter().map(|(_, y)| Expr::constant(*y)).collect();
    cost(
        |x| {
            hypothesis(&[Expr::constant(1.0), x.clone()], &theta)
                .expect("paired sequences have equal length")
        },
        &xs,
        &ys,
    )
    .expect("paired sequences have equal length")
}

#[test]
fn test_symbolic_gradient_matches_finite_differences() {
    let data = generate_with(&mut StdRng::seed_from_u64(42), 20).unwrap();
    let (t0, t1) = (1.0, 2.0);

    let j = cost_at(t0, t1, &data);
    let grad = gradient(&j, &[sym("theta0"), sym("theta1")]).unwrap();
    let g0 = grad[0].evaluate().unwrap();
    let g1 = grad[1].evaluate().unwrap();

    let h = 1e-4;
    let fd0 = (cost_at(t0 + h, t1, &data).evaluate().unwrap()
        - cost_at(t0 - h, t1, &data).evaluate().unwrap())
        / (2.0 * h);
    let fd1 = (cost_at(t0, t1 + h, &data).evaluate().unwrap()
        - cost_at(t0, t1 - h, &data).evaluate().unwrap())
        / (2.0 * h);

    let rel = |a: f64, b: f64| (a - b).abs() / a.abs().max(b.abs()).max(1.0);
    assert!(rel(g0, fd0) < 1e-4, "g0 = {}, fd0 = {}", g0, fd0);
    assert!(rel(g1, fd1) < 1e-4, "g1 = {}, fd1 = {}", g1, fd1);
}

#[test]
fn test_gradient_descent_reduces_cost() {
    let data = generate_with(&mut StdRng::seed_from_u64(7), 30).unwrap();

    // Normalize x to keep a plain fixed learning rate stable.
    let x_scale = data
        .iter()
        .map(|(x, _)| x.abs())
        .fold(1.0_f64, f64::max);
    let scaled: Vec<(f64, f64)> = data.iter().map(|(x, y)| (x / x_scale, *y)).collect();

    let (mut t0, mut t1) = (0.0, 0.0);
    let rate = 0.5;
    let initial = cost_at(t0, t1, &scaled).evaluate().unwrap();

    let mut current = initial;
    for _ in 0..100 {
        let j = cost_at(t0, t1, &scaled);
        let grad = gradient(&j, &[sym("theta0"), sym("theta1")]).unwrap();
        t0 -= rate * grad[0].evaluate().unwrap();
        t1 -= rate * grad[1].evaluate().unwrap();
        current = cost_at(t0, t1, &scaled).evaluate().unwrap();
    }

    assert!(
        current < initial / 2.0,
        "descent failed: {} -> {}",
        initial,
        current
    );
}

#[test]
fn test_cost_over_large_dataset_is_stack_safe() {
    let data = generate_with(&mut StdRng::seed_from_u64(3), 20_000).unwrap();
    let j = cost_at(0.5, 0.5, &data);
    assert!(j.evaluate().unwrap().is_finite());
    let grad = gradient(&j, &[sym("theta1")]).unwrap();
    assert!(grad[0].evaluate().unwrap().is_finite());
}

#[test]
fn test_cost_gradient_renders() {
    let data = [(1.0, 2.0), (2.0, 4.0)];
    let j = cost_at(0.0, 0.0, &data);
    let grad = gradient(&j, &[sym("theta0"), sym("theta1")]).unwrap();

    for g in &grad {
        let rendered = g.to_string();
        assert!(!rendered.is_empty());
        assert_eq!(rendered, g.to_string());
    }
}

#[test]
fn test_workflow_surfaces_unbound_variables() {
    // A free parameter makes the gradient unevaluable, not wrong.
    let theta = [Expr::variable("theta0"), Expr::variable_with("theta1", 1.0)];
    let f = hypothesis(&[Expr::constant(1.0), Expr::constant(2.0)], &theta).unwrap();
    assert_eq!(f.evaluate(), Err(ExprError::unbound("theta0")));
    assert_eq!(
        f.derivative(sym("theta0")),
        Err(ExprError::unbound("theta0"))
    );
}
