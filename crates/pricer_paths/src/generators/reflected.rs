//! Antithetic (reflected) Brownian paths.

use rand::Rng;
use tracing::debug;

use super::{check_path_count, cumsum_rows, ensemble_len, fill_increments};
use crate::ensemble::{PathEnsemble, PathLayout};
use crate::error::PathError;
use crate::grid::TimeGrid;

/// Generates `n_half_paths` Brownian paths together with their reflections.
///
/// Draws `n_half_paths x n_steps` increments as in
/// [`generate_brownian_paths`](super::generate_brownian_paths), then stacks
/// them on top of their exact negation before summing. Row `k + n_half_paths`
/// is therefore the bit-exact negation of row `k`: paired paths are perfectly
/// negatively correlated, not independent draws.
///
/// # Returns
///
/// A `PathMajor` ensemble of shape `(2 * n_half_paths, n_steps)`.
///
/// # Errors
///
/// Same as `generate_brownian_paths`, applied to `n_half_paths`.
/// `PathError::EnsembleTooLarge` is checked against the stacked
/// `2 * n_half_paths` rows.
///
/// # Examples
///
/// ```rust
/// use pricer_paths::generate_reflected_paths;
/// use pricer_paths::rng::PathRng;
///
/// let mut rng = PathRng::from_seed(42);
/// let paths = generate_reflected_paths(&mut rng, 1.0, 100, 5).unwrap();
///
/// assert_eq!(paths.shape(), (10, 100));
/// assert_eq!(paths.at(0, 99), -paths.at(5, 99));
/// ```
pub fn generate_reflected_paths<R: Rng + ?Sized>(
    rng: &mut R,
    horizon: f64,
    n_steps: usize,
    n_half_paths: usize,
) -> Result<PathEnsemble, PathError> {
    let grid = TimeGrid::new(horizon, n_steps)?;
    check_path_count(n_half_paths)?;
    let n_paths = n_half_paths.saturating_mul(2);
    let len = ensemble_len(n_paths, n_steps)?;

    debug!(
        n_half_paths,
        n_steps,
        dt = grid.dt(),
        "generating antithetic Brownian paths"
    );

    let half_len = len / 2;
    let mut values = vec![0.0; len];
    {
        let (drawn, reflected) = values.split_at_mut(half_len);
        fill_increments(rng, drawn, grid.sqrt_dt());
        for (mirror, &dw) in reflected.iter_mut().zip(drawn.iter()) {
            *mirror = -dw;
        }
    }
    cumsum_rows(&mut values, n_steps);

    Ok(PathEnsemble::from_raw(
        values,
        n_paths,
        grid,
        PathLayout::PathMajor,
    ))
}
