//! Synthetic data generation for linear regression.
//!
//! Pure data generation: this module never touches the expression core. It
//! produces raw float pairs that the hypothesis and cost builders later wrap
//! as constants or bound variables.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ExprError;

/// Generate `m` noisy `(x, y)` points from a random linear law, using the
/// thread-local RNG.
///
/// The slope and intercept are drawn from `[0, 10)`, the x-range spans a
/// random window of width 100 to 200 starting in `[-100, 100]`, and each
/// output carries gaussian noise `N(1, 0.5)` scaled by the window width.
/// Points come back sorted by x.
///
/// # Errors
/// Returns [`ExprError::EmptyDataset`] when `m` is zero.
pub fn generate(m: usize) -> Result<Vec<(f64, f64)>, ExprError> {
    generate_with(&mut rand::thread_rng(), m)
}

/// [`generate`] with a caller-provided RNG, for reproducible datasets.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, m: usize) -> Result<Vec<(f64, f64)>, ExprError> {
    if m == 0 {
        return Err(ExprError::EmptyDataset);
    }

    let slope = rng.gen_range(0.0..10.0);
    let intercept = rng.gen_range(0.0..10.0);
    let x_min = f64::from(rng.gen_range(-100..=100));
    let width = f64::from(rng.gen_range(100..=200));

    let mut xs: Vec<f64> = (0..m).map(|_| rng.gen::<f64>()).collect();
    xs.sort_by(f64::total_cmp);

    let noise = Normal::new(1.0, 0.5).expect("finite mean and positive std dev");
    Ok(xs
        .into_iter()
        .map(|u| {
            let x = u * width + x_min;
            let y = intercept + slope * x + noise.sample(rng) * width;
            (x, y)
        })
        .collect())
}
