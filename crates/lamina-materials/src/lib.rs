//! # Lamina Materials
//!
//! Dispersion models for the lamina thin-film engine. Every model implements
//! the [`DispersionModel`](provider::DispersionModel) trait, which returns a
//! wavelength-dependent complex refractive index $\tilde{n} = n + ik$.
//!
//! ## Available models
//!
//! | Model | Module | Notes |
//! |-------|--------|-------|
//! | Constant index | [`constant`] | Fixed $n + ik$, wavelength-independent |
//! | Cauchy formula | [`cauchy`] | $n(\lambda) = A + B/\lambda^2 + C/\lambda^4$, transparent media |
//! | Sellmeier equation | [`sellmeier`] | Three-term, optical glasses (BK7 preset) |
//! | Tabulated data | [`tabulated`] | Spline-interpolated $(n, k)$ tables (Al preset) |
//!
//! ## Units
//!
//! All wavelengths are vacuum wavelengths in nanometres. Formula coefficients
//! are stated in nm-based units on each constructor.
//!
//! ## Interpolation
//!
//! Tabulated data is interpolated with natural cubic splines
//! ([`spline::CubicSpline`]); evaluation outside the tabulated range is a
//! domain error, not an extrapolation.

pub mod cauchy;
pub mod constant;
pub mod provider;
pub mod sellmeier;
pub mod spline;
pub mod tabulated;
