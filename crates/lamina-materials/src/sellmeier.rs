//! Three-term Sellmeier equation for optical glasses.
//!
//! $n^2(\lambda) = 1 + \sum_{i=1}^{3} \frac{B_i \lambda^2}{\lambda^2 - C_i}$
//!
//! The standard catalogue form for optical glasses; coefficients here use
//! $C_i$ in nm² (catalogue values in μm² scale by $10^6$).

use num_complex::Complex64;

use crate::provider::{DispersionError, DispersionModel};

/// Sellmeier dispersion with three resonance terms.
#[derive(Debug, Clone)]
pub struct SellmeierFormula {
    name: String,
    /// Oscillator strengths $B_1..B_3$ (dimensionless).
    b: [f64; 3],
    /// Resonance wavelengths squared $C_1..C_3$ in nm².
    c: [f64; 3],
}

impl SellmeierFormula {
    /// Construct from catalogue coefficients, $C_i$ in nm².
    pub fn new(name: impl Into<String>, b: [f64; 3], c: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            b,
            c,
        }
    }

    /// Schott N-BK7 borosilicate crown glass.
    ///
    /// Coefficients from the Schott catalogue; valid 300–2500 nm.
    /// $n \approx 1.5168$ at the helium d line (587.6 nm).
    pub fn bk7() -> Self {
        Self::new(
            "N-BK7",
            [1.03961212, 0.231792344, 1.01046945],
            [6.00069867e3, 2.00179144e4, 1.03560653e8],
        )
    }
}

impl DispersionModel for SellmeierFormula {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_at(&self, wavelength_nm: f64) -> Result<Complex64, DispersionError> {
        if !(wavelength_nm > 0.0) {
            return Err(DispersionError::InvalidWavelength(wavelength_nm));
        }
        let l2 = wavelength_nm * wavelength_nm;
        let mut n2 = 1.0;
        for (&b, &c) in self.b.iter().zip(self.c.iter()) {
            n2 += b * l2 / (l2 - c);
        }
        // Between resonance poles n² can go negative; the formula is not
        // meaningful there and the wavelength is treated as out of range.
        if n2 <= 0.0 {
            return Err(DispersionError::InvalidWavelength(wavelength_nm));
        }
        Ok(Complex64::new(n2.sqrt(), 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bk7_at_fraunhofer_d_line() {
        let glass = SellmeierFormula::bk7();
        let n = glass.index_at(587.56).unwrap();
        assert_relative_eq!(n.re, 1.5168, epsilon = 1e-4);
    }

    #[test]
    fn bk7_dispersion_is_normal_in_visible() {
        let glass = SellmeierFormula::bk7();
        let n_f = glass.index_at(486.13).unwrap().re;
        let n_c = glass.index_at(656.27).unwrap().re;
        assert!(n_f > n_c);
        // Abbe number V_d = (n_d - 1) / (n_F - n_C) ≈ 64.2 for N-BK7
        let n_d = glass.index_at(587.56).unwrap().re;
        assert_relative_eq!((n_d - 1.0) / (n_f - n_c), 64.17, epsilon = 0.5);
    }
}
