//! Generated path ensembles.
//!
//! # Memory Layout
//!
//! Values are stored row-major in a single buffer. What a row means depends
//! on the [`PathLayout`]:
//!
//! | Layout | Shape | Index of (path p, step t) |
//! |--------|-------|---------------------------|
//! | `PathMajor` | `(n_paths, n_steps)` | `p * n_steps + t` |
//! | `TimeMajor` | `(n_steps, n_paths)` | `t * n_paths + p` |
//!
//! The independent and reflected generators return `PathMajor`; the
//! correlated generator returns `TimeMajor`. Use [`PathEnsemble::value`] for
//! layout-independent access, or [`PathEnsemble::to_path_major`] /
//! [`PathEnsemble::to_time_major`] for an explicit transpose.
//!
//! Step index `t` holds the value at time `(t + 1) * dt`; the value 0 at
//! time 0 is implicit.

use crate::grid::TimeGrid;

/// Storage orientation of a [`PathEnsemble`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathLayout {
    /// One row per trajectory, shape `(n_paths, n_steps)`.
    PathMajor,
    /// One row per time point, shape `(n_steps, n_paths)`.
    TimeMajor,
}

/// Immutable ensemble of simulated Brownian paths.
///
/// # Examples
///
/// ```rust
/// use pricer_paths::{generate_brownian_paths, PathLayout};
/// use pricer_paths::rng::PathRng;
///
/// let mut rng = PathRng::from_seed(1);
/// let paths = generate_brownian_paths(&mut rng, 2.0, 8, 3).unwrap();
///
/// assert_eq!(paths.layout(), PathLayout::PathMajor);
/// assert_eq!(paths.shape(), (3, 8));
/// assert_eq!(paths.at(1, 7), paths.value(1, 7));
///
/// let transposed = paths.to_time_major();
/// assert_eq!(transposed.shape(), (8, 3));
/// assert_eq!(transposed.at(7, 1), paths.at(1, 7));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathEnsemble {
    values: Vec<f64>,
    n_paths: usize,
    grid: TimeGrid,
    layout: PathLayout,
}

impl PathEnsemble {
    /// Wraps a filled buffer. Length must be `n_paths * grid.n_steps()`.
    pub(crate) fn from_raw(
        values: Vec<f64>,
        n_paths: usize,
        grid: TimeGrid,
        layout: PathLayout,
    ) -> Self {
        debug_assert_eq!(values.len(), n_paths * grid.n_steps());
        Self {
            values,
            n_paths,
            grid,
            layout,
        }
    }

    /// Storage orientation.
    #[inline]
    pub fn layout(&self) -> PathLayout {
        self.layout
    }

    /// `(rows, columns)` of the stored array.
    ///
    /// `(n_paths, n_steps)` for `PathMajor`, `(n_steps, n_paths)` for
    /// `TimeMajor`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        match self.layout {
            PathLayout::PathMajor => (self.n_paths, self.n_steps()),
            PathLayout::TimeMajor => (self.n_steps(), self.n_paths),
        }
    }

    /// Number of trajectories.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of stored time points per trajectory.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.grid.n_steps()
    }

    /// Time grid the ensemble was simulated on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Step size `T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.grid.dt()
    }

    /// Total simulated duration `T`.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.grid.horizon()
    }

    /// Observation time of each step index.
    pub fn times(&self) -> Vec<f64> {
        self.grid.times()
    }

    /// Raw row-major buffer in the ensemble's own layout.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the ensemble and returns the raw row-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Element at `(row, col)` of the stored array.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside [`shape`](Self::shape).
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        let (rows, cols) = self.shape();
        assert!(
            row < rows && col < cols,
            "Index ({}, {}) out of bounds for shape ({}, {})",
            row,
            col,
            rows,
            cols
        );
        self.values[row * cols + col]
    }

    /// Value of trajectory `path` at step index `step`, whatever the layout.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths()` or `step >= n_steps()`.
    #[inline]
    pub fn value(&self, path: usize, step: usize) -> f64 {
        match self.layout {
            PathLayout::PathMajor => self.at(path, step),
            PathLayout::TimeMajor => self.at(step, path),
        }
    }

    /// Full trajectory of one path (length `n_steps`).
    pub fn path(&self, path: usize) -> Vec<f64> {
        (0..self.n_steps()).map(|t| self.value(path, t)).collect()
    }

    /// Value of every path at the horizon `T`.
    pub fn terminal_values(&self) -> Vec<f64> {
        let last = self.n_steps() - 1;
        (0..self.n_paths).map(|p| self.value(p, last)).collect()
    }

    /// Per-step increments of one path, with the implicit 0 at time 0.
    ///
    /// ```rust
    /// use pricer_paths::generate_brownian_paths;
    /// use pricer_paths::rng::PathRng;
    ///
    /// let mut rng = PathRng::from_seed(3);
    /// let paths = generate_brownian_paths(&mut rng, 1.0, 5, 1).unwrap();
    /// let dw = paths.increments(0);
    /// assert_eq!(dw[0], paths.value(0, 0));
    /// ```
    pub fn increments(&self, path: usize) -> Vec<f64> {
        let mut previous = 0.0;
        (0..self.n_steps())
            .map(|t| {
                let current = self.value(path, t);
                let dw = current - previous;
                previous = current;
                dw
            })
            .collect()
    }

    /// Returns the ensemble in `PathMajor` layout, transposing if needed.
    pub fn to_path_major(&self) -> Self {
        self.to_layout(PathLayout::PathMajor)
    }

    /// Returns the ensemble in `TimeMajor` layout, transposing if needed.
    pub fn to_time_major(&self) -> Self {
        self.to_layout(PathLayout::TimeMajor)
    }

    fn to_layout(&self, layout: PathLayout) -> Self {
        if self.layout == layout {
            return self.clone();
        }
        let (rows, cols) = self.shape();
        let mut values = vec![0.0; self.values.len()];
        for r in 0..rows {
            for c in 0..cols {
                values[c * rows + r] = self.values[r * cols + c];
            }
        }
        Self {
            values,
            n_paths: self.n_paths,
            grid: self.grid,
            layout,
        }
    }
}
