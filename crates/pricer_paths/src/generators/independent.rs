//! Independent Brownian paths.

use rand::Rng;
use tracing::debug;

use super::{check_path_count, cumsum_rows, ensemble_len, fill_increments};
use crate::ensemble::{PathEnsemble, PathLayout};
use crate::error::PathError;
use crate::grid::TimeGrid;

/// Generates `n_paths` independent Brownian paths on `(0, horizon]`.
///
/// Each path is the running sum of `n_steps` i.i.d. `N(0, dt)` increments,
/// `dt = horizon / n_steps`. Increments are drawn path by path, so the
/// result for a given seed does not depend on how the caller later slices
/// the ensemble.
///
/// # Returns
///
/// A `PathMajor` ensemble of shape `(n_paths, n_steps)`.
///
/// # Errors
///
/// - `PathError::InvalidStepCount` if `n_steps == 0`
/// - `PathError::InvalidPathCount` if `n_paths == 0`
/// - `PathError::InvalidHorizon` if `horizon` is not finite and positive
/// - `PathError::EnsembleTooLarge` if `n_paths * n_steps` overflows the
///   addressable buffer size
///
/// # Examples
///
/// ```rust
/// use pricer_paths::generate_brownian_paths;
/// use pricer_paths::rng::PathRng;
///
/// let mut rng = PathRng::from_seed(42);
/// let paths = generate_brownian_paths(&mut rng, 1.0, 252, 1_000).unwrap();
///
/// assert_eq!(paths.shape(), (1_000, 252));
/// ```
pub fn generate_brownian_paths<R: Rng + ?Sized>(
    rng: &mut R,
    horizon: f64,
    n_steps: usize,
    n_paths: usize,
) -> Result<PathEnsemble, PathError> {
    let grid = TimeGrid::new(horizon, n_steps)?;
    check_path_count(n_paths)?;
    let len = ensemble_len(n_paths, n_steps)?;

    debug!(n_paths, n_steps, dt = grid.dt(), "generating independent Brownian paths");

    let mut values = vec![0.0; len];
    fill_increments(rng, &mut values, grid.sqrt_dt());
    cumsum_rows(&mut values, n_steps);

    Ok(PathEnsemble::from_raw(
        values,
        n_paths,
        grid,
        PathLayout::PathMajor,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PathRng;
    use approx::assert_relative_eq;

    #[test]
    fn test_shape() {
        let mut rng = PathRng::from_seed(42);
        let paths = generate_brownian_paths(&mut rng, 1.0, 50, 7).unwrap();

        assert_eq!(paths.shape(), (7, 50));
        assert_eq!(paths.layout(), PathLayout::PathMajor);
        assert_eq!(paths.as_slice().len(), 350);
    }

    #[test]
    fn test_paths_are_cumulative_increments() {
        let mut rng = PathRng::from_seed(5);
        let mut reference = PathRng::from_seed(5);
        let n_steps = 4;
        let paths = generate_brownian_paths(&mut rng, 2.0, n_steps, 2).unwrap();

        let sqrt_dt = 0.5_f64.sqrt();
        for p in 0..2 {
            let mut expected = 0.0;
            for t in 0..n_steps {
                expected += sqrt_dt * reference.gen_normal();
                assert_eq!(paths.value(p, t), expected);
            }
        }
    }

    #[test]
    fn test_reproducibility() {
        let a = generate_brownian_paths(&mut PathRng::from_seed(12345), 1.0, 20, 10).unwrap();
        let b = generate_brownian_paths(&mut PathRng::from_seed(12345), 1.0, 20, 10).unwrap();
        let c = generate_brownian_paths(&mut PathRng::from_seed(54321), 1.0, 20, 10).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = PathRng::from_seed(1);
        assert_eq!(
            generate_brownian_paths(&mut rng, 1.0, 0, 10),
            Err(PathError::InvalidStepCount(0))
        );
        assert_eq!(
            generate_brownian_paths(&mut rng, 1.0, 10, 0),
            Err(PathError::InvalidPathCount(0))
        );
        assert!(matches!(
            generate_brownian_paths(&mut rng, -1.0, 10, 10),
            Err(PathError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn test_failed_call_leaves_rng_untouched() {
        let mut rng = PathRng::from_seed(8);
        let mut reference = PathRng::from_seed(8);
        let _ = generate_brownian_paths(&mut rng, 1.0, 10, 0);

        assert_eq!(rng.gen_normal(), reference.gen_normal());
    }

    #[test]
    fn test_oversized_request_is_rejected() {
        let mut rng = PathRng::from_seed(8);
        let mut reference = PathRng::from_seed(8);

        assert_eq!(
            generate_brownian_paths(&mut rng, 1.0, usize::MAX / 2, 4),
            Err(PathError::EnsembleTooLarge {
                n_paths: 4,
                n_steps: usize::MAX / 2
            })
        );
        assert_eq!(rng.gen_normal(), reference.gen_normal());
    }

    #[test]
    fn test_increment_variance() {
        let mut rng = PathRng::from_seed(99);
        let n_steps = 10;
        let horizon = 0.5;
        let paths = generate_brownian_paths(&mut rng, horizon, n_steps, 20_000).unwrap();
        let dt = horizon / n_steps as f64;

        let increments: Vec<f64> = (0..paths.n_paths())
            .flat_map(|p| paths.increments(p))
            .collect();
        let n = increments.len() as f64;
        let mean = increments.iter().sum::<f64>() / n;
        let variance = increments.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!(mean.abs() < 5.0 * (dt / n).sqrt());
        assert_relative_eq!(variance, dt, max_relative = 0.02);
    }
}
