//! Path generation configuration.
//!
//! [`PathConfig`] bundles the inputs of one generator call (horizon, steps,
//! path count, mode, optional seed and correlation rows) so a simulation can
//! be described once, validated, and replayed. Configurations are built with
//! [`PathConfig::builder`] or, with the `serde` feature, loaded from TOML:
//!
//! ```toml
//! mode = "correlated"
//! horizon = 1.0
//! n_steps = 252
//! n_paths = 2
//! seed = 42
//! correlation = [[1.0, 0.5], [0.5, 1.0]]
//! ```

use rand::Rng;
#[cfg(feature = "serde")]
use std::path::Path;
#[cfg(feature = "serde")]
use tracing::info;

use crate::correlation::CorrelationMatrix;
use crate::ensemble::PathEnsemble;
use crate::error::{ConfigError, PathError};
use crate::generators::{
    check_path_count, ensemble_len, generate_brownian_paths, generate_correlated_paths,
    generate_reflected_paths,
};
use crate::grid::TimeGrid;
use crate::rng::PathRng;

/// Default horizon in years.
pub const DEFAULT_HORIZON: f64 = 1.0;

/// Default step count (daily steps over one trading year).
pub const DEFAULT_STEPS: usize = 252;

/// Default path count.
pub const DEFAULT_PATHS: usize = 10_000;

/// Which generator a [`PathConfig`] dispatches to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GenerationMode {
    /// Independent paths, [`generate_brownian_paths`].
    #[default]
    Independent,
    /// Antithetic pairs, [`generate_reflected_paths`]; `n_paths` counts pairs.
    Reflected,
    /// Correlated paths, [`generate_correlated_paths`]; needs `correlation`.
    Correlated,
}

/// Description of one path generation run.
///
/// # Examples
///
/// ```rust
/// use pricer_paths::{GenerationMode, PathConfig};
///
/// let config = PathConfig::builder()
///     .mode(GenerationMode::Reflected)
///     .horizon(2.0)
///     .n_steps(100)
///     .n_paths(500)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// let paths = config.generate().unwrap();
/// assert_eq!(paths.shape(), (1_000, 100));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Generator to run
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: GenerationMode,

    /// Time horizon `T`
    #[cfg_attr(feature = "serde", serde(default = "default_horizon"))]
    pub horizon: f64,

    /// Number of time steps `N`
    #[cfg_attr(feature = "serde", serde(default = "default_steps"))]
    pub n_steps: usize,

    /// Number of paths (number of antithetic pairs in reflected mode)
    #[cfg_attr(feature = "serde", serde(default = "default_paths"))]
    pub n_paths: usize,

    /// Seed for reproducible runs; OS entropy when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,

    /// Correlation matrix rows (correlated mode only)
    #[cfg_attr(feature = "serde", serde(default))]
    pub correlation: Option<Vec<Vec<f64>>>,
}

#[cfg(feature = "serde")]
fn default_horizon() -> f64 {
    DEFAULT_HORIZON
}

#[cfg(feature = "serde")]
fn default_steps() -> usize {
    DEFAULT_STEPS
}

#[cfg(feature = "serde")]
fn default_paths() -> usize {
    DEFAULT_PATHS
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::default(),
            horizon: DEFAULT_HORIZON,
            n_steps: DEFAULT_STEPS,
            n_paths: DEFAULT_PATHS,
            seed: None,
            correlation: None,
        }
    }
}

impl PathConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> PathConfigBuilder {
        PathConfigBuilder::default()
    }

    /// Checks every parameter the selected generator will check, plus the
    /// presence (or absence) of `correlation` for the mode.
    ///
    /// # Errors
    ///
    /// The same `PathError` the generator would return, or
    /// `PathError::Config` for a missing or unexpected `correlation`.
    pub fn validate(&self) -> Result<(), PathError> {
        TimeGrid::new(self.horizon, self.n_steps)?;
        check_path_count(self.n_paths)?;
        let rows = match self.mode {
            GenerationMode::Reflected => self.n_paths.saturating_mul(2),
            _ => self.n_paths,
        };
        ensemble_len(rows, self.n_steps)?;
        match (self.mode, &self.correlation) {
            (GenerationMode::Correlated, None) => {
                Err(ConfigError::MissingParameter("correlation").into())
            }
            (GenerationMode::Correlated, Some(_)) => {
                let matrix = self.correlation_matrix()?;
                if matrix.dim() != self.n_paths {
                    return Err(PathError::DimensionMismatch {
                        expected: self.n_paths,
                        got: matrix.dim(),
                    });
                }
                matrix.cholesky()?;
                Ok(())
            }
            (_, Some(_)) => Err(ConfigError::UnexpectedParameter("correlation").into()),
            (_, None) => Ok(()),
        }
    }

    /// Parses the `correlation` rows into a validated matrix.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingParameter` if no rows are configured, otherwise
    /// any `CorrelationError` from validation.
    pub fn correlation_matrix(&self) -> Result<CorrelationMatrix<f64>, PathError> {
        let rows = self
            .correlation
            .as_ref()
            .ok_or(ConfigError::MissingParameter("correlation"))?;
        Ok(CorrelationMatrix::from_rows(rows.as_slice())?)
    }

    /// Runs the configured generator with a fresh [`PathRng`].
    ///
    /// Seeded from `seed` when present, otherwise from OS entropy.
    pub fn generate(&self) -> Result<PathEnsemble, PathError> {
        let mut rng = match self.seed {
            Some(seed) => PathRng::from_seed(seed),
            None => PathRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    /// Runs the configured generator with a caller-supplied generator.
    ///
    /// `seed` is ignored. The configuration is validated first, so a struct
    /// literal that bypassed the builder fails the same way `build()` would.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathEnsemble, PathError> {
        self.validate()?;
        match self.mode {
            GenerationMode::Independent => {
                generate_brownian_paths(rng, self.horizon, self.n_steps, self.n_paths)
            }
            GenerationMode::Reflected => {
                generate_reflected_paths(rng, self.horizon, self.n_steps, self.n_paths)
            }
            GenerationMode::Correlated => {
                let correlation = self.correlation_matrix()?;
                generate_correlated_paths(
                    rng,
                    self.horizon,
                    self.n_steps,
                    self.n_paths,
                    &correlation,
                )
            }
        }
    }
}

#[cfg(feature = "serde")]
impl PathConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, PathError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, PathError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            mode = ?config.mode,
            n_paths = config.n_paths,
            n_steps = config.n_steps,
            "loaded path configuration"
        );
        Ok(config)
    }
}

/// Builder for [`PathConfig`].
///
/// Unset fields take the defaults (`horizon = 1.0`, `n_steps = 252`,
/// `n_paths = 10_000`, independent mode). Validation runs at build time.
#[derive(Clone, Debug, Default)]
pub struct PathConfigBuilder {
    mode: GenerationMode,
    horizon: Option<f64>,
    n_steps: Option<usize>,
    n_paths: Option<usize>,
    seed: Option<u64>,
    correlation: Option<Vec<Vec<f64>>>,
}

impl PathConfigBuilder {
    /// Sets the generation mode.
    #[inline]
    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the time horizon.
    #[inline]
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the correlation rows and switches to correlated mode.
    pub fn correlation(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.mode = GenerationMode::Correlated;
        self.correlation = Some(rows);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`PathConfig::validate`].
    pub fn build(self) -> Result<PathConfig, PathError> {
        let config = PathConfig {
            mode: self.mode,
            horizon: self.horizon.unwrap_or(DEFAULT_HORIZON),
            n_steps: self.n_steps.unwrap_or(DEFAULT_STEPS),
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            seed: self.seed,
            correlation: self.correlation,
        };
        config.validate()?;
        Ok(config)
    }
}
