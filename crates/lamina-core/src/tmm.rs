//! Coherent transfer-matrix solver.
//!
//! Given a [`Stack`], a polarization, an incidence angle, and a vacuum
//! wavelength, [`coherent_tmm`] computes the reflected and transmitted power
//! fractions $(R, T)$ assuming fully coherent superposition across all layer
//! boundaries. Absorbing (complex-index) media, oblique incidence, and
//! evanescent regimes (total internal reflection, tunnelling through thin
//! films) are all handled.
//!
//! The delicate part is not the matrix algebra but the branch protocol:
//! picking the forward-travelling solution of Snell's law in lossy media and
//! keeping the layer phases bounded for near-opaque films. The protocol
//! follows S. J. Byrnes, *Multilayer optical calculations*,
//! [arXiv:1603.02720](https://arxiv.org/abs/1603.02720).

use std::f64::consts::{PI, TAU};
use std::sync::atomic::{AtomicBool, Ordering};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lamina_materials::provider::DispersionError;

use crate::matrix::Matrix2c;
use crate::stack::Stack;

/// Tolerance for sign decisions on complex quantities, per arXiv:1603.02720.
const BRANCH_TOL: f64 = 100.0 * f64::EPSILON;

/// Im(δ) above which a layer is numerically opaque: single-pass transmission
/// is below $e^{-35} \approx 10^{-30.4}$ and the growing exponential in the
/// transfer matrix would overflow long before the result changed.
const OPACITY_LIMIT: f64 = 35.0;

/// One-shot latch for the opacity notice. Diagnostic only; never read on the
/// numerical path.
static OPACITY_WARNING: AtomicBool = AtomicBool::new(false);

/// Linear polarization of the incident plane wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    /// TE: electric field perpendicular to the plane of incidence.
    S,
    /// TM: electric field in the plane of incidence.
    P,
}

/// Reflected and transmitted power fractions of the incident beam.
///
/// For passive stacks $R + T \leq 1$; the remainder $1 - R - T$ is absorbed
/// in the films.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub reflectance: f64,
    pub transmittance: f64,
}

/// Errors from stack construction and the coherent solve.
#[derive(Debug, Error)]
pub enum TmmError {
    #[error("Invalid wavelength: {0} nm (must be positive)")]
    InvalidWavelength(f64),

    #[error("Invalid film thickness: {0} nm (must be finite and positive)")]
    InvalidThickness(f64),

    #[error(
        "n0 sin(theta0) has imaginary part {imag:.3e}; for an absorbing incidence \
         medium, theta0 must be chosen so that n0 sin(theta0) is real"
    )]
    NonUniformIncidence { imag: f64 },

    #[error("theta0 does not describe a forward-travelling wave in the incidence medium")]
    NonForwardIncidence,

    #[error("Dispersion model failed in layer {layer}: {source}")]
    Dispersion {
        layer: usize,
        source: DispersionError,
    },
}

/// Decide whether the wave `(n, theta)` travels forward (from the incidence
/// side towards the exit side) rather than backward.
///
/// For real `n` and `theta` the criterion is simply `-π/2 < θ < π/2`. With
/// complex values the decaying solution is the forward one in lossy or
/// evanescent regimes, and the sign of the Poynting flux decides otherwise
/// (arXiv:1603.02720, appendix D). If `theta` is the forward angle, `π − θ`
/// is the backward one and vice versa.
fn is_forward_angle(n: Complex64, theta: Complex64) -> bool {
    if n.re * n.im < 0.0 {
        log::warn!(
            "gain medium n = {:.3e}{:+.3e}i: the forward/backward wave assignment \
             is ambiguous (arXiv:1603.02720, appendix C); continuing with the \
             decaying-branch convention",
            n.re,
            n.im
        );
    }
    let ncostheta = n * theta.cos();
    let forward = if ncostheta.im.abs() > BRANCH_TOL {
        // Evanescent decay or lossy medium: the decaying wave is forward
        ncostheta.im > 0.0
    } else {
        // Lossless propagation: forward has positive Poynting flux, which is
        // Re[n cos θ] for s and Re[n cos θ*] for p; the two agree here
        ncostheta.re > 0.0
    };

    // All three sign criteria should agree with the chosen branch; disagreement
    // beyond the tolerance means the index is in a regime where the split into
    // forward and backward waves is shaky.
    let ncoscon = (n * theta.conj().cos()).re;
    let consistent = if forward {
        ncostheta.im > -BRANCH_TOL && ncostheta.re > -BRANCH_TOL && ncoscon > -BRANCH_TOL
    } else {
        ncostheta.im < BRANCH_TOL && ncostheta.re < BRANCH_TOL && ncoscon < BRANCH_TOL
    };
    if !consistent {
        log::warn!(
            "unclear which wave is forward for n = {:.3e}{:+.3e}i, theta = \
             {:.3e}{:+.3e}i; continuing with forward = {}",
            n.re,
            n.im,
            theta.re,
            theta.im,
            forward
        );
    }
    forward
}

/// Propagate the incidence angle through every layer with Snell's law.
///
/// Returns one (possibly complex) angle per layer, taking the principal
/// branch of `asin` and then flipping the two boundary angles to `π − θ`
/// where the principal value is the backward wave. Interior branches are
/// left alone: the observables only depend on the boundary branches
/// (arXiv:1603.02720, section 5).
fn snell_angles(n_list: &[Complex64], theta_0: Complex64) -> Vec<Complex64> {
    let n0_sin = n_list[0] * theta_0.sin();
    let mut angles: Vec<Complex64> = n_list.iter().map(|&n| (n0_sin / n).asin()).collect();

    let pi = Complex64::new(PI, 0.0);
    if !is_forward_angle(n_list[0], angles[0]) {
        angles[0] = pi - angles[0];
    }
    let last = angles.len() - 1;
    if !is_forward_angle(n_list[last], angles[last]) {
        angles[last] = pi - angles[last];
    }
    angles
}

/// Coherent transfer-matrix solve: reflectance and transmittance of `stack`
/// for a monochromatic plane wave.
///
/// # Arguments
/// * `stack` - The multilayer, front (incidence side) to back.
/// * `polarization` - S (TE) or P (TM).
/// * `theta_0` - Incidence angle from the normal in the incidence medium,
///   in radians. May be complex; for an absorbing incidence medium it must
///   be chosen so that $n_0 \sin\theta_0$ is real (constant intensity along
///   the surface).
/// * `lambda_nm` - Vacuum wavelength, in the same length unit as the layer
///   thicknesses.
///
/// # Errors
/// Domain errors (bad wavelength, non-uniform or backward incidence, a
/// dispersion model that cannot evaluate) abort the solve. Gain media and
/// shaky forward-angle splits only log warnings and the computation
/// proceeds; NaN or infinity arising from pathological inputs propagate
/// into the returned values unchecked.
pub fn coherent_tmm(
    stack: &Stack,
    polarization: Polarization,
    theta_0: Complex64,
    lambda_nm: f64,
) -> Result<SolveResult, TmmError> {
    if !(lambda_nm > 0.0) {
        return Err(TmmError::InvalidWavelength(lambda_nm));
    }

    let num_layers = stack.len();
    let mut n_list = Vec::with_capacity(num_layers);
    for (i, layer) in stack.layers().iter().enumerate() {
        let n = layer
            .model()
            .index_at(lambda_nm)
            .map_err(|source| TmmError::Dispersion { layer: i, source })?;
        n_list.push(n);
    }

    // The transverse wavevector n0 sin(theta0) is conserved across the stack;
    // a complex value would mean laterally varying intensity, which the
    // plane-wave ansatz cannot represent.
    let n0_sin_th0 = n_list[0] * theta_0.sin();
    if n0_sin_th0.im.abs() >= BRANCH_TOL {
        return Err(TmmError::NonUniformIncidence { imag: n0_sin_th0.im });
    }
    if !is_forward_angle(n_list[0], theta_0) {
        return Err(TmmError::NonForwardIncidence);
    }

    let th_list = snell_angles(&n_list, theta_0);

    // z-component of the wavevector of the forward wave in each layer;
    // a positive imaginary part means decay.
    let kz_list: Vec<Complex64> = n_list
        .iter()
        .zip(th_list.iter())
        .map(|(&n, &th)| TAU * n * th.cos() / lambda_nm)
        .collect();

    // Phase accrued in a single pass through each film. The semi-infinite
    // endpoints have no single-pass phase; their entries stay zero and are
    // never read.
    let zero = Complex64::new(0.0, 0.0);
    let mut delta = vec![zero; num_layers];
    for i in 1..num_layers - 1 {
        delta[i] = kz_list[i] * stack.layers()[i].thickness_nm();
    }

    // Clamp nearly opaque films: beyond Im(delta) = 35 the transmitted
    // amplitude is below 1e-30 and exp(+Im delta) overflows without changing
    // any observable.
    for d in delta.iter_mut().take(num_layers - 1).skip(1) {
        if d.im > OPACITY_LIMIT {
            *d = Complex64::new(d.re, OPACITY_LIMIT);
            if !OPACITY_WARNING.swap(true, Ordering::Relaxed) {
                log::warn!(
                    "nearly opaque layer truncated to Im(delta) = 35 (single-pass \
                     transmission ~1e-30) for numerical stability; this notice is \
                     shown once per process"
                );
            }
        }
    }

    // Fresnel amplitudes at each interface (i, i+1), for the wave coming
    // from layer i.
    let mut r_list = Vec::with_capacity(num_layers - 1);
    let mut t_list = Vec::with_capacity(num_layers - 1);
    for i in 0..num_layers - 1 {
        let ci = th_list[i].cos();
        let cf = th_list[i + 1].cos();
        let (r, t) = match polarization {
            Polarization::S => {
                let ii = n_list[i] * ci;
                let ff = n_list[i + 1] * cf;
                ((ii - ff) / (ii + ff), 2.0 * ii / (ii + ff))
            }
            Polarization::P => {
                let ii = n_list[i] * ci;
                let fi = n_list[i + 1] * ci;
                let if_ = n_list[i] * cf;
                ((fi - if_) / (fi + if_), 2.0 * ii / (fi + if_))
            }
        };
        r_list.push(r);
        t_list.push(t);
    }

    // At the interface between layers i-1 and i, relate the forward and
    // backward amplitudes on the two sides: (v_{i-1}, w_{i-1}) = M_i (v_i, w_i)
    // with M_i the propagation phase through film i followed by the interface
    // (i, i+1). The product over the films (empty for a bare interface,
    // N = 2) composed with the entry interface gives the system matrix.
    let j = Complex64::i();
    let one = Complex64::new(1.0, 0.0);
    let mut mtilde = Matrix2c::identity();
    for i in 1..num_layers - 1 {
        let phase = Matrix2c::new((-j * delta[i]).exp(), zero, zero, (j * delta[i]).exp());
        let interface = Matrix2c::new(one, r_list[i], r_list[i], one);
        mtilde = mtilde * (phase * interface / t_list[i]);
    }
    mtilde = Matrix2c::new(one, r_list[0], r_list[0], one) / t_list[0] * mtilde;

    // Net complex reflection and transmission amplitudes
    let r = mtilde.m10 / mtilde.m00;
    let t = one / mtilde.m00;

    // Power fractions. The transmittance normalisation compares the
    // longitudinal energy flux on the two sides; the p form carries the
    // conjugate on cos(theta).
    let n_i = n_list[0];
    let n_f = n_list[num_layers - 1];
    let th_i = theta_0;
    let th_f = th_list[num_layers - 1];
    let reflectance = r.norm_sqr();
    let transmittance = match polarization {
        Polarization::S => {
            t.norm_sqr() * (n_f * th_f.cos()).re / (n_i * th_i.cos()).re
        }
        Polarization::P => {
            t.norm_sqr() * (n_f * th_f.cos().conj()).re / (n_i * th_i.cos().conj()).re
        }
    };

    Ok(SolveResult {
        reflectance,
        transmittance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn forward_angle_for_real_media() {
        assert!(is_forward_angle(c(1.5, 0.0), c(0.3, 0.0)));
        // pi - 0.3 is the backward branch
        assert!(!is_forward_angle(c(1.5, 0.0), c(PI - 0.3, 0.0)));
    }

    #[test]
    fn forward_angle_in_lossy_medium_is_the_decaying_wave() {
        let n = c(0.77, 5.94);
        // Normal incidence: n cos(0) has a large positive imaginary part
        assert!(is_forward_angle(n, c(0.0, 0.0)));
        assert!(!is_forward_angle(n, c(PI, 0.0)));
    }

    #[test]
    fn snell_flips_the_exit_branch_under_total_internal_reflection() {
        // Glass to air beyond the critical angle: the principal asin gives
        // theta with cos(theta) on the growing branch; the correction must
        // land on the decaying one.
        let n_list = [c(1.5, 0.0), c(1.0, 0.0)];
        let th = snell_angles(&n_list, c(0.8, 0.0));
        let ncos = n_list[1] * th[1].cos();
        assert!(ncos.im > 0.0, "exit wave must decay, got kz ~ {}", ncos);
    }

    #[test]
    fn snell_preserves_transverse_wavevector() {
        let n_list = [c(1.0, 0.0), c(1.38, 0.0), c(2.1, 0.3), c(1.52, 0.0)];
        let th = snell_angles(&n_list, c(0.5, 0.0));
        let reference = n_list[0] * c(0.5, 0.0).sin();
        for (&n, &theta) in n_list.iter().zip(th.iter()) {
            let invariant = n * theta.sin();
            assert!((invariant - reference).norm() < 1e-12);
        }
    }
}
