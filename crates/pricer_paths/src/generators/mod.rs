//! Brownian path generators.
//!
//! Three stateless generators, each a single-shot computation driven by an
//! explicitly supplied random number generator:
//!
//! | Generator | Output layout | Shape |
//! |-----------|---------------|-------|
//! | [`generate_brownian_paths`] | `PathMajor` | `(n_paths, n_steps)` |
//! | [`generate_reflected_paths`] | `PathMajor` | `(2 * n_half_paths, n_steps)` |
//! | [`generate_correlated_paths`] | `TimeMajor` | `(n_steps, n_paths)` |
//!
//! The correlated generator is time-major: row `t` is the cross-section of
//! all assets at one time. Call [`PathEnsemble::to_path_major`] on its
//! output when a uniform orientation is required.
//!
//! # Algorithm
//!
//! 1. Validate `T > 0`, `N > 0`, `n > 0` and compute `dt = T / N`
//! 2. Draw increments `N(0, dt)` (correlated through `sqrt(dt) * L * z` for
//!    the correlated generator)
//! 3. Cumulative sum along the time axis
//!
//! [`PathEnsemble::to_path_major`]: crate::PathEnsemble::to_path_major

mod correlated;
mod independent;
mod reflected;

pub use correlated::generate_correlated_paths;
pub use independent::generate_brownian_paths;
pub use reflected::generate_reflected_paths;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::PathError;

/// Largest number of `f64` values a single allocation can hold.
const MAX_VALUES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Buffer length of an `n_paths x n_steps` ensemble.
///
/// Fails instead of wrapping when the product overflows or exceeds what a
/// `Vec<f64>` can address.
#[inline]
pub(crate) fn ensemble_len(n_paths: usize, n_steps: usize) -> Result<usize, PathError> {
    n_paths
        .checked_mul(n_steps)
        .filter(|&len| len <= MAX_VALUES)
        .ok_or(PathError::EnsembleTooLarge { n_paths, n_steps })
}

/// Rejects a zero path count.
#[inline]
pub(crate) fn check_path_count(n_paths: usize) -> Result<(), PathError> {
    if n_paths == 0 {
        return Err(PathError::InvalidPathCount(n_paths));
    }
    Ok(())
}

/// Fills `buffer` with i.i.d. `N(0, std_dev^2)` draws.
#[inline]
pub(crate) fn fill_increments<R: Rng + ?Sized>(rng: &mut R, buffer: &mut [f64], std_dev: f64) {
    for value in buffer.iter_mut() {
        let z: f64 = StandardNormal.sample(rng);
        *value = std_dev * z;
    }
}

/// Running sum along each row of a row-major `rows x cols` buffer.
pub(crate) fn cumsum_rows(values: &mut [f64], cols: usize) {
    for row in values.chunks_exact_mut(cols) {
        let mut acc = 0.0;
        for value in row.iter_mut() {
            acc += *value;
            *value = acc;
        }
    }
}

/// Running sum down each column of a row-major `rows x cols` buffer.
pub(crate) fn cumsum_columns(values: &mut [f64], cols: usize) {
    let rows = values.len() / cols;
    for r in 1..rows {
        let (done, rest) = values.split_at_mut(r * cols);
        let previous = &done[(r - 1) * cols..];
        for (value, &above) in rest[..cols].iter_mut().zip(previous) {
            *value += above;
        }
    }
}
