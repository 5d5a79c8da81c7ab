//! Correlated multi-asset Brownian paths.

use rand::Rng;
use tracing::{debug, warn};

use super::{check_path_count, cumsum_columns, ensemble_len, fill_increments};
use crate::correlation::CorrelationMatrix;
use crate::ensemble::{PathEnsemble, PathLayout};
use crate::error::PathError;
use crate::grid::TimeGrid;

/// Generates `n_paths` jointly correlated Brownian paths.
///
/// Each of the `n_steps` increments is an independent draw from the
/// `n_paths`-dimensional normal distribution with zero mean and covariance
/// `correlation * dt` (element-wise scaling, see
/// [`CorrelationMatrix::covariance`]). Draws are produced as
/// `sqrt(dt) * L * z` with `L` the Cholesky factor of the correlation matrix
/// and `z` i.i.d. standard normals, then summed along the time axis.
///
/// The matrix is factorised before any random numbers are drawn, so a
/// rejected matrix leaves `rng` untouched.
///
/// # Returns
///
/// A **`TimeMajor`** ensemble of shape `(n_steps, n_paths)`: row `t` holds
/// every asset at time `(t + 1) * dt`. This is the transpose of the other
/// generators; use [`PathEnsemble::to_path_major`] for a uniform orientation.
///
/// # Errors
///
/// - `PathError::InvalidStepCount`, `InvalidPathCount`, `InvalidHorizon` as
///   for [`generate_brownian_paths`](super::generate_brownian_paths)
/// - `PathError::EnsembleTooLarge` if `n_steps * n_paths` overflows the
///   addressable buffer size
/// - `PathError::DimensionMismatch` if `correlation.dim() != n_paths`
/// - `PathError::Correlation(NotPositiveSemiDefinite)` if the matrix cannot
///   be factorised
///
/// # Examples
///
/// ```rust
/// use pricer_paths::{generate_correlated_paths, CorrelationMatrix, PathLayout};
/// use pricer_paths::rng::PathRng;
///
/// let corr = CorrelationMatrix::from_rows(&[[1.0, 0.5], [0.5, 1.0]]).unwrap();
/// let mut rng = PathRng::from_seed(42);
/// let paths = generate_correlated_paths(&mut rng, 1.0, 252, 2, &corr).unwrap();
///
/// assert_eq!(paths.layout(), PathLayout::TimeMajor);
/// assert_eq!(paths.shape(), (252, 2));
/// assert_eq!(paths.to_path_major().shape(), (2, 252));
/// ```
pub fn generate_correlated_paths<R: Rng + ?Sized>(
    rng: &mut R,
    horizon: f64,
    n_steps: usize,
    n_paths: usize,
    correlation: &CorrelationMatrix<f64>,
) -> Result<PathEnsemble, PathError> {
    let grid = TimeGrid::new(horizon, n_steps)?;
    check_path_count(n_paths)?;
    let len = ensemble_len(n_paths, n_steps)?;
    if correlation.dim() != n_paths {
        return Err(PathError::DimensionMismatch {
            expected: n_paths,
            got: correlation.dim(),
        });
    }

    let cholesky = correlation.cholesky().map_err(|err| {
        warn!(dim = n_paths, error = %err, "correlation matrix factorisation failed");
        err
    })?;

    debug!(
        n_paths,
        n_steps,
        dt = grid.dt(),
        "generating correlated Brownian paths"
    );

    let sqrt_dt = grid.sqrt_dt();
    let mut values = vec![0.0; len];
    let mut z = vec![0.0; n_paths];
    for row in values.chunks_exact_mut(n_paths) {
        fill_increments(rng, &mut z, sqrt_dt);
        cholesky.transform_into(&z, row);
    }
    cumsum_columns(&mut values, n_paths);

    Ok(PathEnsemble::from_raw(
        values,
        n_paths,
        grid,
        PathLayout::TimeMajor,
    ))
}
