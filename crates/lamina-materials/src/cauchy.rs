//! Cauchy's formula for transparent media.
//!
//! $n(\lambda) = A + B/\lambda^2 + C/\lambda^4$ with a zero imaginary part.
//! An adequate description of normally dispersive dielectrics in the visible;
//! see [Cauchy's equation](https://en.wikipedia.org/wiki/Cauchy%27s_equation).

use num_complex::Complex64;

use crate::provider::{DispersionError, DispersionModel};

/// Cauchy dispersion formula with up to three terms.
#[derive(Debug, Clone)]
pub struct CauchyFormula {
    name: String,
    /// Dimensionless constant term.
    a: f64,
    /// Second-order coefficient in nm².
    b: f64,
    /// Fourth-order coefficient in nm⁴.
    c: f64,
}

impl CauchyFormula {
    /// Construct from the three Cauchy coefficients.
    ///
    /// `b` is in nm² and `c` in nm⁴, matching the nanometre wavelength
    /// convention used throughout the engine.
    pub fn new(name: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self {
            name: name.into(),
            a,
            b,
            c,
        }
    }

    /// Two-term form with the fourth-order coefficient set to zero.
    pub fn two_term(name: impl Into<String>, a: f64, b: f64) -> Self {
        Self::new(name, a, b, 0.0)
    }

    /// Magnesium fluoride (MgF₂), a common low-index coating material.
    ///
    /// Coefficients fitted to the visible range; $n \approx 1.381$ at 550 nm.
    pub fn magnesium_fluoride() -> Self {
        Self::two_term("MgF2", 1.36957, 3.5821e3)
    }
}

impl DispersionModel for CauchyFormula {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_at(&self, wavelength_nm: f64) -> Result<Complex64, DispersionError> {
        if !(wavelength_nm > 0.0) {
            return Err(DispersionError::InvalidWavelength(wavelength_nm));
        }
        let l2 = wavelength_nm * wavelength_nm;
        let n = self.a + self.b / l2 + self.c / (l2 * l2);
        Ok(Complex64::new(n, 0.0))
    }
}
