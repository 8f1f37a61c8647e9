//! Quantified invariants of the coherent solver.
//!
//! Energy conservation, polarization degeneracy at normal incidence, the
//! Fresnel law, clamp idempotence, continuity under zero-thickness
//! insertion, determinism, and the domain-error contract.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use num_complex::Complex64;

use lamina_core::stack::Stack;
use lamina_core::tmm::{coherent_tmm, Polarization, TmmError};
use lamina_materials::constant::ConstantIndex;
use lamina_materials::provider::DispersionModel;
use lamina_materials::tabulated::TabulatedIndex;

fn medium(n: f64) -> Arc<dyn DispersionModel> {
    Arc::new(ConstantIndex::real("medium", n))
}

fn absorber(n: f64, k: f64) -> Arc<dyn DispersionModel> {
    Arc::new(ConstantIndex::new("absorber", n, k))
}

fn angle(theta: f64) -> Complex64 {
    Complex64::new(theta, 0.0)
}

/// A lossless three-film stack used by several invariants.
fn lossless_multilayer() -> Stack {
    let mut stack = Stack::new(medium(1.0), medium(1.52));
    stack.insert_layer(medium(1.38), 120.0).unwrap();
    stack.insert_layer(medium(2.35), 65.0).unwrap();
    stack.insert_layer(medium(1.7), 80.0).unwrap();
    stack
}

#[test]
fn lossless_stacks_conserve_energy() {
    let stack = lossless_multilayer();
    for pol in [Polarization::S, Polarization::P] {
        for i in 0..15 {
            let theta = angle(i as f64 * 0.1);
            let result = coherent_tmm(&stack, pol, theta, 550.0).unwrap();
            assert_abs_diff_eq!(
                result.reflectance + result.transmittance,
                1.0,
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn normal_incidence_follows_the_fresnel_law() {
    for (n1, n2) in [(1.0, 1.5), (1.0, 2.4), (1.33, 1.0), (1.5, 1.52)] {
        let stack = Stack::new(medium(n1), medium(n2));
        let expected = ((n1 - n2) / (n1 + n2)).powi(2);
        for pol in [Polarization::S, Polarization::P] {
            let result = coherent_tmm(&stack, pol, angle(0.0), 500.0).unwrap();
            assert_abs_diff_eq!(result.reflectance, expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn polarizations_agree_at_normal_incidence() {
    // The plane of incidence is undefined at theta = 0, so s and p must
    // coincide, including through an absorbing film
    let mut stack = lossless_multilayer();
    stack.insert_layer(absorber(0.77, 5.94), 20.0).unwrap();

    let s = coherent_tmm(&stack, Polarization::S, angle(0.0), 550.0).unwrap();
    let p = coherent_tmm(&stack, Polarization::P, angle(0.0), 550.0).unwrap();
    assert_abs_diff_eq!(s.reflectance, p.reflectance, epsilon = 1e-10);
    assert_abs_diff_eq!(s.transmittance, p.transmittance, epsilon = 1e-10);
}

#[test]
fn brewster_null_for_several_index_pairs() {
    for (n1, n2) in [(1.0, 1.5), (1.33, 1.6)] {
        let stack = Stack::new(medium(n1), medium(n2));
        let brewster = angle((n2 / n1).atan());
        let result = coherent_tmm(&stack, Polarization::P, brewster, 589.0).unwrap();
        assert!(
            result.reflectance < 1e-12,
            "R_p({} -> {}) = {:.3e}",
            n1,
            n2,
            result.reflectance
        );
    }
}

#[test]
fn opacity_clamp_makes_thickness_irrelevant() {
    // At 1000 nm of strong absorber, Im(delta) is already far beyond the
    // clamp; doubling the thickness must not move the observables
    let solve = |d_nm: f64| {
        let mut stack = Stack::new(medium(1.0), medium(1.5));
        stack.insert_layer(absorber(0.77, 5.94), d_nm).unwrap();
        coherent_tmm(&stack, Polarization::S, angle(0.0), 500.0).unwrap()
    };
    let a = solve(1000.0);
    let b = solve(2000.0);
    assert!((a.reflectance - b.reflectance).abs() <= 1e-15);
    assert!((a.transmittance - b.transmittance).abs() <= 1e-15);
}

#[test]
fn inserting_a_vanishing_layer_changes_nothing() {
    // A film of the substrate's own index with thickness -> 0 is a no-op
    let bare = Stack::new(medium(1.0), medium(1.5));
    let reference = coherent_tmm(&bare, Polarization::S, angle(0.3), 500.0).unwrap();

    let mut padded = Stack::new(medium(1.0), medium(1.5));
    padded.insert_layer(medium(1.5), 1e-9).unwrap();
    let perturbed = coherent_tmm(&padded, Polarization::S, angle(0.3), 500.0).unwrap();

    assert_abs_diff_eq!(
        reference.reflectance,
        perturbed.reflectance,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        reference.transmittance,
        perturbed.transmittance,
        epsilon = 1e-9
    );
}

#[test]
fn repeated_solves_are_bit_identical() {
    let mut stack = lossless_multilayer();
    stack.insert_layer(absorber(1.2, 0.05), 300.0).unwrap();

    let first = coherent_tmm(&stack, Polarization::P, angle(0.7), 620.0).unwrap();
    let second = coherent_tmm(&stack, Polarization::P, angle(0.7), 620.0).unwrap();
    assert_eq!(
        first.reflectance.to_bits(),
        second.reflectance.to_bits()
    );
    assert_eq!(
        first.transmittance.to_bits(),
        second.transmittance.to_bits()
    );
}

#[test]
fn domain_errors_abort_the_solve() {
    let stack = Stack::new(medium(1.0), medium(1.5));
    assert!(matches!(
        coherent_tmm(&stack, Polarization::S, angle(0.0), 0.0),
        Err(TmmError::InvalidWavelength(_))
    ));
    assert!(matches!(
        coherent_tmm(&stack, Polarization::S, angle(0.0), -500.0),
        Err(TmmError::InvalidWavelength(_))
    ));

    // A backward-travelling incidence angle is rejected
    assert!(matches!(
        coherent_tmm(
            &stack,
            Polarization::S,
            angle(std::f64::consts::PI - 0.2),
            500.0
        ),
        Err(TmmError::NonForwardIncidence)
    ));
}

#[test]
fn dispersion_failures_carry_the_layer_index() {
    let mut stack = Stack::new(medium(1.0), medium(1.5));
    stack
        .insert_layer(Arc::new(TabulatedIndex::aluminium()), 50.0)
        .unwrap();

    // Aluminium data stops at 900 nm; the failing layer is the film at 1
    match coherent_tmm(&stack, Polarization::S, angle(0.0), 1500.0) {
        Err(TmmError::Dispersion { layer, .. }) => assert_eq!(layer, 1),
        other => panic!("expected a dispersion error, got {:?}", other),
    }
}

#[test]
fn stack_is_not_mutated_by_a_failing_solve() {
    let mut stack = Stack::new(medium(1.0), medium(1.5));
    stack
        .insert_layer(Arc::new(TabulatedIndex::aluminium()), 50.0)
        .unwrap();
    let before = stack.len();
    let _ = coherent_tmm(&stack, Polarization::S, angle(0.0), 1500.0);
    assert_eq!(stack.len(), before);
}
