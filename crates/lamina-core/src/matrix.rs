//! 2×2 complex matrices for transfer-matrix composition.
//!
//! The transfer-matrix method only ever multiplies 2×2 matrices and scales
//! them by complex amplitudes, so the matrix is a stack-allocated value type
//! with inlined arithmetic rather than a general linear-algebra dependency.

use num_complex::Complex64;
use std::ops::{Div, Mul};

/// A 2×2 matrix over complex doubles.
///
/// Operations return fresh values; there is no in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2c {
    pub m00: Complex64,
    pub m01: Complex64,
    pub m10: Complex64,
    pub m11: Complex64,
}

impl Matrix2c {
    pub fn new(m00: Complex64, m01: Complex64, m10: Complex64, m11: Complex64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        Self::new(one, zero, zero, one)
    }
}

/// Row-by-column matrix product.
impl Mul for Matrix2c {
    type Output = Matrix2c;

    fn mul(self, rhs: Matrix2c) -> Matrix2c {
        Matrix2c::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }
}

/// Left multiplication by a complex scalar.
impl Mul<Matrix2c> for Complex64 {
    type Output = Matrix2c;

    fn mul(self, rhs: Matrix2c) -> Matrix2c {
        Matrix2c::new(
            self * rhs.m00,
            self * rhs.m01,
            self * rhs.m10,
            self * rhs.m11,
        )
    }
}

/// Right multiplication by a complex scalar.
impl Mul<Complex64> for Matrix2c {
    type Output = Matrix2c;

    fn mul(self, rhs: Complex64) -> Matrix2c {
        rhs * self
    }
}

/// Componentwise division by a complex scalar.
impl Div<Complex64> for Matrix2c {
    type Output = Matrix2c;

    fn div(self, rhs: Complex64) -> Matrix2c {
        Matrix2c::new(
            self.m00 / rhs,
            self.m01 / rhs,
            self.m10 / rhs,
            self.m11 / rhs,
        )
    }
}
