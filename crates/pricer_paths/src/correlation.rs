//! Correlation matrices and their Cholesky factors.
//!
//! Correlated Brownian increments are produced from independent standard
//! normals `Z = [Z1, ..., Zn]` via
//!
//! ```text
//! W = L * Z,    C = L * L^T
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the correlation
//! matrix `C`. Scaling `W` by `sqrt(dt)` gives increments with covariance
//! `C * dt`.
//!
//! The factorisation here accepts positive *semi*-definite matrices: a zero
//! pivot is allowed as long as the rest of its column is zero too, so
//! perfectly correlated assets (`rho = 1`) factor successfully.
//!
//! ## Usage
//!
//! ```
//! use pricer_paths::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::new(&[
//!     1.0_f64, 0.5,
//!     0.5, 1.0,
//! ], 2).unwrap();
//!
//! let cholesky = corr.cholesky().unwrap();
//! let w = cholesky.transform(&[0.5_f64, 0.8]);
//! assert_eq!(w.len(), 2);
//! ```

use num_traits::Float;

use crate::error::CorrelationError;

/// Tolerance for the unit diagonal and symmetry checks.
const VALIDATION_TOLERANCE: f64 = 1e-10;

/// Tolerance below which a Cholesky pivot is treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Correlation matrix with validation and Cholesky decomposition.
///
/// A correlation matrix must satisfy:
/// - Square and symmetric
/// - Diagonal elements equal to 1.0
/// - Off-diagonal elements in [-1, 1]
/// - Positive semi-definite (checked by [`cholesky`](Self::cholesky))
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix<T: Float> {
    /// Matrix elements in row-major order
    data: Vec<T>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl<T: Float> CorrelationMatrix<T> {
    /// Create a new correlation matrix from a flat row-major array.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` unless `data.len() == dim * dim`
    /// - `NonFinite` for NaN or infinite entries
    /// - `InvalidDiagonal` if a diagonal entry differs from 1.0
    /// - `NotSymmetric` if `C[i,j] != C[j,i]`
    /// - `OutOfRange` for off-diagonal entries outside [-1, 1]
    pub fn new(data: &[T], dim: usize) -> Result<Self, CorrelationError> {
        if dim.checked_mul(dim) != Some(data.len()) {
            return Err(CorrelationError::InvalidDimensions {
                expected: dim.saturating_mul(dim),
                got: data.len(),
            });
        }

        let one = T::one();
        let epsilon = T::from(VALIDATION_TOLERANCE).unwrap_or_else(T::epsilon);

        for i in 0..dim {
            for j in 0..dim {
                if !data[i * dim + j].is_finite() {
                    return Err(CorrelationError::NonFinite { i, j });
                }
            }
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if (diag - one).abs() > epsilon {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if (val_ij - val_ji).abs() > epsilon {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }

                if val_ij.abs() > one {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij.to_f64().unwrap_or(f64::NAN),
                    });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Create a correlation matrix from nested rows.
    ///
    /// Every row must have as many entries as there are rows.
    ///
    /// ```
    /// use pricer_paths::CorrelationMatrix;
    ///
    /// let corr = CorrelationMatrix::from_rows(&[vec![1.0, -0.3], vec![-0.3, 1.0]]).unwrap();
    /// assert_eq!(corr.get(1, 0), -0.3);
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, CorrelationError> {
        let dim = rows.len();
        if rows.iter().any(|row| row.as_ref().len() != dim) {
            return Err(CorrelationError::InvalidDimensions {
                expected: dim.saturating_mul(dim),
                got: rows.iter().map(|row| row.as_ref().len()).sum(),
            });
        }
        let data: Vec<T> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self::new(&data, dim)
    }

    /// Create an identity correlation matrix (no correlation).
    ///
    /// # Panics
    ///
    /// If `dim * dim` overflows `usize`.
    pub fn identity(dim: usize) -> Self {
        let len = dim
            .checked_mul(dim)
            .unwrap_or_else(|| panic!("correlation matrix dimension {} overflows", dim));
        let mut data = vec![T::zero(); len];
        for i in 0..dim {
            data[i * dim + i] = T::one();
        }
        Self { data, dim }
    }

    /// Create a matrix with the same correlation `rho` between every pair.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if `dim * dim` overflows `usize`
    /// - `OutOfRange` if `rho` is outside [-1, 1] (and `dim > 1`)
    pub fn constant(dim: usize, rho: T) -> Result<Self, CorrelationError> {
        let len = dim
            .checked_mul(dim)
            .ok_or(CorrelationError::InvalidDimensions {
                expected: usize::MAX,
                got: 0,
            })?;
        let mut data = vec![rho; len];
        for i in 0..dim {
            data[i * dim + i] = T::one();
        }
        Self::new(&data, dim)
    }

    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// Matrix elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Per-step increment covariance `C * dt` (row-major).
    ///
    /// Every entry is scaled by the scalar `dt`; this is not a matrix product.
    pub fn covariance(&self, dt: T) -> Vec<T> {
        self.data.iter().map(|&c| c * dt).collect()
    }

    /// Compute the Cholesky factor `L` with `C = L * L^T`.
    ///
    /// Zero pivots are accepted when the remainder of the pivot column is
    /// also zero, which is exactly the positive semi-definite case; the
    /// corresponding column of `L` is then zero.
    ///
    /// # Errors
    ///
    /// `NotPositiveSemiDefinite` if a pivot is negative beyond tolerance, or
    /// a zero pivot has a non-zero residual below it.
    pub fn cholesky(&self) -> Result<CholeskyFactor<T>, CorrelationError> {
        let n = self.dim;
        let tolerance = T::from(PIVOT_TOLERANCE).unwrap_or_else(T::epsilon);
        let mut lower = vec![T::zero(); n * n];

        for j in 0..n {
            let mut sum = T::zero();
            for k in 0..j {
                let l_jk = lower[j * n + k];
                sum = sum + l_jk * l_jk;
            }
            let pivot = self.get(j, j) - sum;

            if pivot < -tolerance {
                return Err(CorrelationError::NotPositiveSemiDefinite { index: j });
            }

            if pivot <= tolerance {
                // Column j is a linear combination of earlier columns
                for i in (j + 1)..n {
                    let mut residual = self.get(i, j);
                    for k in 0..j {
                        residual = residual - lower[i * n + k] * lower[j * n + k];
                    }
                    if residual.abs() > tolerance.sqrt() {
                        return Err(CorrelationError::NotPositiveSemiDefinite { index: j });
                    }
                }
                continue;
            }

            let l_jj = pivot.sqrt();
            lower[j * n + j] = l_jj;
            for i in (j + 1)..n {
                let mut sum = T::zero();
                for k in 0..j {
                    sum = sum + lower[i * n + k] * lower[j * n + k];
                }
                lower[i * n + j] = (self.get(i, j) - sum) / l_jj;
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor of a correlation matrix.
///
/// Used to transform independent standard normals into correlated normals.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor<T: Float> {
    /// Lower triangular matrix elements (row-major)
    data: Vec<T>,
    /// Matrix dimension
    dim: usize,
}

impl<T: Float> CholeskyFactor<T> {
    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    ///
    /// Returns zero for upper triangular elements (j > i).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Transform independent standard normals to correlated normals.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform(&self, z: &[T]) -> Vec<T> {
        let mut w = vec![T::zero(); self.dim];
        self.transform_into(z, &mut w);
        w
    }

    /// Compute `out = L * z` without allocating.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `self.dim()`.
    pub fn transform_into(&self, z: &[T], out: &mut [T]) {
        assert!(
            z.len() >= self.dim && out.len() >= self.dim,
            "Input length {} / output length {} is less than matrix dimension {}",
            z.len(),
            out.len(),
            self.dim
        );

        let n = self.dim;
        for i in 0..n {
            let row = &self.data[i * n..i * n + i + 1];
            out[i] = row
                .iter()
                .zip(&z[..=i])
                .fold(T::zero(), |acc, (&l, &zj)| acc + l * zj);
        }
    }
}
