//! Dispersion model trait.
//!
//! All refractive-index sources implement [`DispersionModel`], which returns
//! a complex refractive index at a given vacuum wavelength. Models are
//! immutable after construction and shared between stacks behind `Arc`, so
//! the trait requires `Send + Sync`.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from dispersion models.
#[derive(Debug, Error)]
pub enum DispersionError {
    #[error("Wavelength {wavelength_nm} nm is outside the data range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid wavelength: {0} nm")]
    InvalidWavelength(f64),
}

/// Provides a wavelength-dependent complex refractive index.
///
/// Implementations include closed-form formulas (Cauchy, Sellmeier) and
/// tabulated experimental data interpolated by cubic splines.
pub trait DispersionModel: Send + Sync {
    /// Human-readable name of this model.
    fn name(&self) -> &str;

    /// Complex refractive index $\tilde{n} = n + ik$ at a vacuum wavelength.
    ///
    /// The sign convention is $k \geq 0$ for absorbing media. A model that
    /// cannot evaluate at the requested wavelength fails with a
    /// [`DispersionError`]; callers do not attempt recovery.
    fn index_at(&self, wavelength_nm: f64) -> Result<Complex64, DispersionError>;
}
