//! Uniform time discretisation shared by all generators.

use crate::error::PathError;

/// Validated uniform time grid on `(0, T]`.
///
/// The grid has `n_steps` points `dt, 2dt, ..., T` with `dt = T / n_steps`.
/// Time 0 is implicit: every generated path starts at zero there and the
/// value is not stored.
///
/// # Examples
///
/// ```rust
/// use pricer_paths::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.dt(), 0.25);
/// assert_eq!(grid.times(), vec![0.25, 0.5, 0.75, 1.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeGrid {
    horizon: f64,
    n_steps: usize,
}

impl TimeGrid {
    /// Creates a grid over `(0, horizon]` with `n_steps` equal steps.
    ///
    /// # Errors
    ///
    /// - `PathError::InvalidStepCount` if `n_steps` is 0
    /// - `PathError::InvalidHorizon` if `horizon` is not finite and positive
    pub fn new(horizon: f64, n_steps: usize) -> Result<Self, PathError> {
        if n_steps == 0 {
            return Err(PathError::InvalidStepCount(n_steps));
        }
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(PathError::InvalidHorizon(horizon));
        }
        Ok(Self { horizon, n_steps })
    }

    /// Total simulated duration `T`.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of increments `N`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Step size `T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.n_steps as f64
    }

    /// Standard deviation of a single increment, `sqrt(dt)`.
    #[inline]
    pub fn sqrt_dt(&self) -> f64 {
        self.dt().sqrt()
    }

    /// Observation times `dt, 2dt, ..., T`.
    ///
    /// The last entry is exactly `horizon`.
    pub fn times(&self) -> Vec<f64> {
        let dt = self.dt();
        let mut times: Vec<f64> = (1..=self.n_steps).map(|k| k as f64 * dt).collect();
        // k * dt can round away from T on the final step
        if let Some(last) = times.last_mut() {
            *last = self.horizon;
        }
        times
    }
}
