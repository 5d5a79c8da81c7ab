//! # Pricer Paths
//!
//! Brownian motion sample paths for Monte Carlo simulation.
//!
//! Three stateless generators cover the common driving-noise set-ups:
//!
//! - [`generate_brownian_paths`]: independent paths from i.i.d. normal increments
//! - [`generate_reflected_paths`]: antithetic pairs (each path and its negation)
//!   for variance reduction
//! - [`generate_correlated_paths`]: jointly correlated paths driven by a
//!   [`CorrelationMatrix`]
//!
//! Every generator takes the random number generator as an explicit
//! `&mut R where R: rand::Rng + ?Sized` argument. There is no global random
//! state: seeding, and one-handle-per-thread sharing, are the caller's choice.
//! [`rng::PathRng`] is the seeded default.
//!
//! ## Output orientation
//!
//! Results are returned as an immutable [`PathEnsemble`] tagged with its
//! [`PathLayout`]. The independent and reflected generators are path-major,
//! shape `(n_paths, n_steps)`; the correlated generator is **time-major**,
//! shape `(n_steps, n_paths)`. [`PathEnsemble::value`] indexes by
//! `(path, step)` regardless of layout, and
//! [`PathEnsemble::to_path_major`] transposes explicitly.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_paths::{generate_brownian_paths, generate_correlated_paths, CorrelationMatrix};
//! use pricer_paths::rng::PathRng;
//!
//! let mut rng = PathRng::from_seed(42);
//!
//! // One year of daily steps, 1,000 independent paths
//! let paths = generate_brownian_paths(&mut rng, 1.0, 252, 1_000).unwrap();
//! assert_eq!(paths.shape(), (1_000, 252));
//!
//! // Two assets with correlation 0.5
//! let corr = CorrelationMatrix::from_rows(&[[1.0, 0.5], [0.5, 1.0]]).unwrap();
//! let joint = generate_correlated_paths(&mut rng, 1.0, 252, 2, &corr).unwrap();
//! assert_eq!(joint.shape(), (252, 2));
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize` for ensembles and TOML loading for
//!   [`PathConfig`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod correlation;
pub mod ensemble;
pub mod error;
pub mod generators;
pub mod grid;
pub mod rng;

pub use config::{GenerationMode, PathConfig, PathConfigBuilder};
pub use correlation::{CholeskyFactor, CorrelationMatrix};
pub use ensemble::{PathEnsemble, PathLayout};
pub use error::{ConfigError, CorrelationError, ErrorKind, PathError};
pub use generators::{generate_brownian_paths, generate_correlated_paths, generate_reflected_paths};
pub use grid::TimeGrid;
