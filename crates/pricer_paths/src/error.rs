//! Error types for path generation.
//!
//! This module provides:
//! - `PathError`: Errors returned by the path generators and configuration
//! - `CorrelationError`: Errors from correlation matrix validation and factorisation
//! - `ConfigError`: Errors from loading a `PathConfig`
//! - `ErrorKind`: Coarse classification of any `PathError`

use thiserror::Error;

/// Coarse classification of a [`PathError`].
///
/// Callers that only need to distinguish bad arguments from numerical
/// failures can match on the kind instead of individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Non-positive horizon, step count or path count, or a malformed matrix.
    InvalidArgument,
    /// Correlation matrix dimension does not match the requested path count.
    DimensionMismatch,
    /// Correlation matrix is not positive semi-definite.
    NumericalInstability,
    /// Configuration could not be read or parsed.
    Configuration,
}

/// Errors returned by the path generators.
///
/// # Examples
/// ```
/// use pricer_paths::{ErrorKind, PathError};
///
/// let err = PathError::InvalidStepCount(0);
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(format!("{}", err), "Invalid step count 0: must be at least 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Time horizon is not a finite positive number.
    #[error("Invalid time horizon {0}: must be finite and positive")]
    InvalidHorizon(f64),

    /// Step count is zero.
    #[error("Invalid step count {0}: must be at least 1")]
    InvalidStepCount(usize),

    /// Path count is zero.
    #[error("Invalid path count {0}: must be at least 1")]
    InvalidPathCount(usize),

    /// `n_paths * n_steps` values do not fit in a single buffer.
    #[error("Ensemble of {n_paths} paths x {n_steps} steps exceeds the addressable buffer size")]
    EnsembleTooLarge {
        /// Requested number of paths (rows of the path-major shape)
        n_paths: usize,
        /// Requested number of steps
        n_steps: usize,
    },

    /// Correlation matrix dimension differs from the path count.
    #[error("Correlation matrix is {got}x{got} but {expected} paths were requested")]
    DimensionMismatch {
        /// Requested number of paths
        expected: usize,
        /// Dimension of the supplied matrix
        got: usize,
    },

    /// Correlation matrix validation or factorisation failed.
    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PathError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::InvalidHorizon(_)
            | PathError::InvalidStepCount(_)
            | PathError::InvalidPathCount(_)
            | PathError::EnsembleTooLarge { .. } => ErrorKind::InvalidArgument,
            PathError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            PathError::Correlation(err) => err.kind(),
            PathError::Config(_) => ErrorKind::Configuration,
        }
    }
}

/// Correlation matrix errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Element count does not describe a square matrix of the stated dimension.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// Entry is NaN or infinite.
    #[error("Correlation at ({i}, {j}) is not finite")]
    NonFinite {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Diagonal entry differs from 1.0.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Off-diagonal correlation outside [-1, 1].
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// Offending value
        value: f64,
    },

    /// Factorisation hit a negative pivot or an inconsistent zero pivot.
    #[error("Correlation matrix is not positive semi-definite (pivot {index})")]
    NotPositiveSemiDefinite {
        /// Pivot index at which the factorisation failed
        index: usize,
    },
}

impl CorrelationError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CorrelationError::InvalidDimensions { .. } => ErrorKind::DimensionMismatch,
            CorrelationError::NotPositiveSemiDefinite { .. } => ErrorKind::NumericalInstability,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in a config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parameter required by the selected mode is absent
    #[error("Missing parameter '{0}'")]
    MissingParameter(&'static str),

    /// Parameter given that the selected mode does not accept
    #[error("Parameter '{0}' is not used by this generation mode")]
    UnexpectedParameter(&'static str),
}
