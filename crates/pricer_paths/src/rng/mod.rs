//! # Random Number Generation
//!
//! The generators in this crate never touch a process-wide random source.
//! Every call takes an explicit `&mut R where R: rand::Rng + ?Sized`, so the
//! caller decides on seeding and on one-handle-per-thread sharing.
//!
//! [`PathRng`] is the default handle: a seeded wrapper around
//! `rand::rngs::StdRng` that remembers its seed for reproducibility tracking
//! and implements `RngCore`, so it can be handed straight to the generators.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_paths::rng::PathRng;
//! use pricer_paths::generate_brownian_paths;
//!
//! let mut rng = PathRng::from_seed(12345);
//! let paths = generate_brownian_paths(&mut rng, 1.0, 252, 100).unwrap();
//! assert_eq!(paths.shape(), (100, 252));
//! ```
//!
//! Any other `rand` generator works equally well:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use pricer_paths::generate_brownian_paths;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let paths = generate_brownian_paths(&mut rng, 1.0, 10, 4).unwrap();
//! assert_eq!(paths.shape(), (4, 10));
//! ```

mod prng;

pub use prng::PathRng;
