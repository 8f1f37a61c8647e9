//! Wavelength-independent refractive index.

use num_complex::Complex64;

use crate::provider::{DispersionError, DispersionModel};

/// A fixed complex refractive index.
///
/// Useful for idealised media (vacuum, non-dispersive glass) and for tests
/// where the index must be known exactly.
#[derive(Debug, Clone)]
pub struct ConstantIndex {
    name: String,
    index: Complex64,
}

impl ConstantIndex {
    /// Construct from real and imaginary parts $n + ik$.
    pub fn new(name: impl Into<String>, n: f64, k: f64) -> Self {
        Self {
            name: name.into(),
            index: Complex64::new(n, k),
        }
    }

    /// Construct a lossless medium with a purely real index.
    pub fn real(name: impl Into<String>, n: f64) -> Self {
        Self::new(name, n, 0.0)
    }

    /// Vacuum / air ($n = 1$).
    pub fn air() -> Self {
        Self::real("air", 1.0)
    }
}

impl DispersionModel for ConstantIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_at(&self, wavelength_nm: f64) -> Result<Complex64, DispersionError> {
        if !(wavelength_nm > 0.0) {
            return Err(DispersionError::InvalidWavelength(wavelength_nm));
        }
        Ok(self.index)
    }
}
