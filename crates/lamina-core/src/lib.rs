//! # Lamina Core
//!
//! The numerical backbone of the lamina thin-film engine: a coherent
//! transfer-matrix method (TMM) solver for the reflectance and transmittance
//! of planar multilayer stacks at arbitrary incidence angle and polarization,
//! including absorbing media and evanescent regimes.
//!
//! ## Modules
//!
//! - [`matrix`] — 2×2 complex matrices for transfer-matrix composition.
//! - [`stack`] — The multilayer data model (semi-infinite ambient and
//!   substrate with finite films in between).
//! - [`tmm`] — The coherent solver: [`tmm::coherent_tmm`] maps a stack,
//!   a polarization, an incidence angle, and a wavelength to $(R, T)$.
//!
//! ## Conventions
//!
//! Wavelengths and thicknesses share a length unit (nanometres throughout
//! this workspace). Complex refractive indices are $n + ik$ with $k \geq 0$
//! for absorbing media; a forward-travelling wave then decays into the
//! stack. Angles are measured from the surface normal and may be complex.
//!
//! ## Reference
//! S. J. Byrnes, *Multilayer optical calculations*,
//! [arXiv:1603.02720](https://arxiv.org/abs/1603.02720).

pub mod matrix;
pub mod stack;
pub mod tmm;
