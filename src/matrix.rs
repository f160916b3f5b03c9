//! Random vectors and their dot product.
//!
//! The payload of `/matrices` is two flat vectors of `10 * 10` integers drawn
//! uniformly from `[0, 128)`, plus the sum of their pairwise products.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::MatrixError;

/// Number of elements in each generated vector.
pub const MATRIX_LEN: usize = 10 * 10;

/// Exclusive upper bound of generated values.
pub const VALUE_UPPER: i64 = 128;

/// Draw `len` integers uniformly from `[0, upper)`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, len: usize, upper: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(0..upper)).collect()
}

/// Sum of pairwise products of two equal-length slices.
pub fn dot_product(a: &[i64], b: &[i64]) -> Result<i64, MatrixError> {
    if a.len() != b.len() {
        return Err(MatrixError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Two random vectors and their dot product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Matrices {
    /// First vector, `MATRIX_LEN` values in `[0, 128)`.
    pub matrix_a: Vec<i64>,
    /// Second vector, same shape and range.
    pub matrix_b: Vec<i64>,
    /// `sum(matrix_a[i] * matrix_b[i])`.
    pub product: i64,
}

impl Matrices {
    /// Generate both vectors from `rng` and multiply them.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, MatrixError> {
        let matrix_a = random_vector(rng, MATRIX_LEN, VALUE_UPPER);
        let matrix_b = random_vector(rng, MATRIX_LEN, VALUE_UPPER);
        let product = dot_product(&matrix_a, &matrix_b)?;

        Ok(Self {
            matrix_a,
            matrix_b,
            product,
        })
    }
}
