//! Statistical and structural properties of the path generators.
//!
//! These tests verify:
//! - Output shapes and layouts for all generators
//! - Terminal variance of independent paths (Var[W(T)] = T)
//! - Exact antithetic negation of reflected paths
//! - Single-asset reduction and pairwise correlation of correlated paths
//! - Error conditions at the public API

use approx::assert_relative_eq;
use pricer_paths::rng::PathRng;
use pricer_paths::{
    generate_brownian_paths, generate_correlated_paths, generate_reflected_paths,
    CorrelationMatrix, ErrorKind, PathError, PathLayout,
};
use proptest::prelude::*;

fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

fn sample_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    sxy / (sxx * syy).sqrt()
}

// ============================================================================
// Independent paths
// ============================================================================

#[test]
fn independent_terminal_variance_matches_horizon() {
    let n_paths = 10_000;
    let mut rng = PathRng::from_seed(42);
    let paths = generate_brownian_paths(&mut rng, 1.0, 252, n_paths).unwrap();

    assert_eq!(paths.shape(), (n_paths, 252));

    let terminal = paths.terminal_values();
    let variance = sample_variance(&terminal);
    // Standard error of the sample variance is sqrt(2 / n) * T
    let tolerance = 5.0 * (2.0 / n_paths as f64).sqrt();
    assert!(
        (variance - 1.0).abs() < tolerance,
        "terminal variance {} not within {} of 1.0",
        variance,
        tolerance
    );

    let mean = terminal.iter().sum::<f64>() / n_paths as f64;
    assert!(mean.abs() < 5.0 / (n_paths as f64).sqrt());
}

#[test]
fn independent_variance_grows_linearly_in_time() {
    let n_paths = 8_000;
    let horizon = 2.0;
    let n_steps = 8;
    let mut rng = PathRng::from_seed(314);
    let paths = generate_brownian_paths(&mut rng, horizon, n_steps, n_paths).unwrap();

    for (t, time) in paths.times().into_iter().enumerate() {
        let column: Vec<f64> = (0..n_paths).map(|p| paths.value(p, t)).collect();
        assert_relative_eq!(sample_variance(&column), time, max_relative = 0.1);
    }
}

// ============================================================================
// Reflected paths
// ============================================================================

#[test]
fn reflected_scenario_ten_by_hundred() {
    let mut rng = PathRng::from_seed(2718);
    let paths = generate_reflected_paths(&mut rng, 1.0, 100, 5).unwrap();

    assert_eq!(paths.shape(), (10, 100));
    assert_eq!(paths.layout(), PathLayout::PathMajor);
    for k in 0..5 {
        assert_eq!(paths.path(k), paths.path(k + 5).iter().map(|v| -v).collect::<Vec<_>>());
    }
}

#[test]
fn reflected_halves_have_brownian_variance() {
    let n_half = 5_000;
    let mut rng = PathRng::from_seed(99);
    let paths = generate_reflected_paths(&mut rng, 1.0, 50, n_half).unwrap();

    let terminal = paths.terminal_values();
    let variance = sample_variance(&terminal[..n_half]);
    assert_relative_eq!(variance, 1.0, max_relative = 0.1);
}

// ============================================================================
// Correlated paths
// ============================================================================

#[test]
fn correlated_single_asset_reduces_to_brownian_motion() {
    let corr = CorrelationMatrix::from_rows(&[[1.0]]).unwrap();
    let n_trials = 4_000;
    let n_steps = 20;
    let horizon = 1.0;
    let dt = horizon / n_steps as f64;
    let mut rng = PathRng::from_seed(7);

    let mut by_step = vec![Vec::with_capacity(n_trials); n_steps];
    for _ in 0..n_trials {
        let paths = generate_correlated_paths(&mut rng, horizon, n_steps, 1, &corr).unwrap();
        assert_eq!(paths.shape(), (n_steps, 1));
        for (t, column) in by_step.iter_mut().enumerate() {
            column.push(paths.at(t, 0));
        }
    }

    for (t, column) in by_step.iter().enumerate() {
        let expected = (t + 1) as f64 * dt;
        assert_relative_eq!(sample_variance(column), expected, max_relative = 0.12);
    }
}

#[test]
fn correlated_final_increments_have_target_correlation() {
    let corr = CorrelationMatrix::from_rows(&[[1.0, 0.5], [0.5, 1.0]]).unwrap();
    let n_trials = 5_000;
    let n_steps = 252;
    let mut rng = PathRng::from_seed(1234);

    let mut first = Vec::with_capacity(n_trials);
    let mut second = Vec::with_capacity(n_trials);
    for _ in 0..n_trials {
        let paths = generate_correlated_paths(&mut rng, 1.0, n_steps, 2, &corr).unwrap();
        assert_eq!(paths.shape(), (n_steps, 2));
        let last = n_steps - 1;
        first.push(paths.at(last, 0) - paths.at(last - 1, 0));
        second.push(paths.at(last, 1) - paths.at(last - 1, 1));
    }

    let rho = sample_correlation(&first, &second);
    assert!((rho - 0.5).abs() < 0.05, "sample correlation {}", rho);
}

#[test]
fn correlated_terminal_values_share_correlation() {
    let corr = CorrelationMatrix::from_rows(&[
        [1.0, 0.8, -0.4],
        [0.8, 1.0, -0.2],
        [-0.4, -0.2, 1.0],
    ])
    .unwrap();
    let mut rng = PathRng::from_seed(55);
    let n_trials = 4_000;

    let mut terminals = vec![Vec::with_capacity(n_trials); 3];
    for _ in 0..n_trials {
        let paths = generate_correlated_paths(&mut rng, 1.0, 10, 3, &corr).unwrap();
        for (asset, column) in terminals.iter_mut().enumerate() {
            column.push(paths.terminal_values()[asset]);
        }
    }

    for i in 0..3 {
        for j in (i + 1)..3 {
            let rho = sample_correlation(&terminals[i], &terminals[j]);
            assert!(
                (rho - corr.get(i, j)).abs() < 0.07,
                "rho({}, {}) = {}, expected {}",
                i,
                j,
                rho,
                corr.get(i, j)
            );
        }
    }
}

#[test]
fn correlated_output_transposes_to_path_major() {
    let corr = CorrelationMatrix::constant(3, 0.25).unwrap();
    let mut rng = PathRng::from_seed(8);
    let paths = generate_correlated_paths(&mut rng, 1.0, 12, 3, &corr).unwrap();
    let path_major = paths.to_path_major();

    assert_eq!(path_major.shape(), (3, 12));
    for p in 0..3 {
        for t in 0..12 {
            assert_eq!(path_major.at(p, t), paths.at(t, p));
        }
    }
}

// ============================================================================
// Error conditions
// ============================================================================

#[test]
fn zero_steps_is_invalid_argument_for_all_generators() {
    let mut rng = PathRng::from_seed(0);
    let corr = CorrelationMatrix::identity(2);

    let errors = [
        generate_brownian_paths(&mut rng, 1.0, 0, 2).unwrap_err(),
        generate_reflected_paths(&mut rng, 1.0, 0, 2).unwrap_err(),
        generate_correlated_paths(&mut rng, 1.0, 0, 2, &corr).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err, PathError::InvalidStepCount(0));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn mismatched_correlation_shape_is_dimension_mismatch() {
    let mut rng = PathRng::from_seed(0);
    let corr = CorrelationMatrix::identity(4);
    let err = generate_correlated_paths(&mut rng, 1.0, 10, 2, &corr).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_independent_shape(
        seed in any::<u64>(),
        horizon in 0.01f64..10.0,
        n_steps in 1usize..64,
        n_paths in 1usize..64,
    ) {
        let mut rng = PathRng::from_seed(seed);
        let paths = generate_brownian_paths(&mut rng, horizon, n_steps, n_paths).unwrap();
        prop_assert_eq!(paths.shape(), (n_paths, n_steps));
        prop_assert!(paths.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn prop_reflected_exact_negation(
        seed in any::<u64>(),
        n_steps in 1usize..64,
        n_half in 1usize..32,
    ) {
        let mut rng = PathRng::from_seed(seed);
        let paths = generate_reflected_paths(&mut rng, 1.0, n_steps, n_half).unwrap();
        prop_assert_eq!(paths.shape(), (2 * n_half, n_steps));
        for k in 0..n_half {
            for t in 0..n_steps {
                prop_assert_eq!(paths.at(k, t), -paths.at(k + n_half, t));
            }
        }
    }

    #[test]
    fn prop_correlated_shape_and_reproducibility(
        seed in any::<u64>(),
        n_steps in 1usize..32,
        n_paths in 1usize..6,
        rho in -0.15f64..0.9,
    ) {
        // Constant correlation is PSD for rho >= -1 / (n - 1); n <= 5 keeps -0.15 valid
        let corr = CorrelationMatrix::constant(n_paths, rho).unwrap();
        let a = generate_correlated_paths(&mut PathRng::from_seed(seed), 1.0, n_steps, n_paths, &corr).unwrap();
        let b = generate_correlated_paths(&mut PathRng::from_seed(seed), 1.0, n_steps, n_paths, &corr).unwrap();
        prop_assert_eq!(a.shape(), (n_steps, n_paths));
        prop_assert_eq!(a, b);
    }
}
