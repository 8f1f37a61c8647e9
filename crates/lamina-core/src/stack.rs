//! The multilayer data model.
//!
//! A [`Stack`] is an ordered sequence of layers, front to back in the order
//! the light traverses them. The first and last layers are semi-infinite
//! (the ambient and the substrate, `thickness = ∞`); every interior film has
//! a finite positive thickness. Dispersion models are shared behind `Arc`,
//! so several stacks may reference the same material.

use std::fmt::Write as _;
use std::sync::Arc;

use lamina_materials::provider::DispersionModel;

use crate::tmm::TmmError;

/// One layer of a multilayer: a dispersion model plus a thickness.
#[derive(Clone)]
pub struct Layer {
    model: Arc<dyn DispersionModel>,
    thickness_nm: f64,
}

impl Layer {
    pub fn model(&self) -> &Arc<dyn DispersionModel> {
        &self.model
    }

    /// Thickness in nm; `f64::INFINITY` for the ambient and substrate.
    pub fn thickness_nm(&self) -> f64 {
        self.thickness_nm
    }
}

/// An ordered multilayer with semi-infinite outermost layers.
///
/// The two endpoint layers exist from construction and their thickness can
/// never change, so every `Stack` satisfies `len() >= 2` with infinite
/// endpoint thicknesses at all times.
#[derive(Clone)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    /// Create the minimal stack `[top(∞), bottom(∞)]`.
    ///
    /// `top` is the incidence medium, `bottom` the exit medium.
    pub fn new(top: Arc<dyn DispersionModel>, bottom: Arc<dyn DispersionModel>) -> Self {
        Self {
            layers: vec![
                Layer {
                    model: top,
                    thickness_nm: f64::INFINITY,
                },
                Layer {
                    model: bottom,
                    thickness_nm: f64::INFINITY,
                },
            ],
        }
    }

    /// Insert a film immediately above the substrate.
    ///
    /// ```text
    /// ---------------- ambient
    /// ---------------- film 1
    /// ---------------- film 2
    /// ---------------- <- new film inserted here
    /// ---------------- substrate
    /// ```
    ///
    /// The thickness must be finite and positive.
    pub fn insert_layer(
        &mut self,
        model: Arc<dyn DispersionModel>,
        thickness_nm: f64,
    ) -> Result<(), TmmError> {
        if !thickness_nm.is_finite() || thickness_nm <= 0.0 {
            return Err(TmmError::InvalidThickness(thickness_nm));
        }
        let at = self.layers.len() - 1;
        self.layers.insert(
            at,
            Layer {
                model,
                thickness_nm,
            },
        );
        Ok(())
    }

    /// Number of layers, counting the two semi-infinite endpoints.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `len()` is always at least 2, so a stack is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn layer(&self, i: usize) -> Option<&Layer> {
        self.layers.get(i)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Human-readable layer listing at a given wavelength.
    ///
    /// One line per layer with its index, refractive index, and thickness in
    /// nm. Diagnostic only; the formatting is not part of any contract.
    pub fn describe(&self, wavelength_nm: f64) -> Result<String, TmmError> {
        let mut out = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let n = layer
                .model
                .index_at(wavelength_nm)
                .map_err(|source| TmmError::Dispersion { layer: i, source })?;
            let _ = writeln!(
                out,
                "{:>3}  {:<24} n = {:.4} + {:.4}i  d = {} nm",
                i,
                layer.model.name(),
                n.re,
                n.im,
                if layer.thickness_nm.is_finite() {
                    format!("{:.1}", layer.thickness_nm)
                } else {
                    "inf".to_string()
                }
            );
        }
        Ok(out)
    }

    /// Print [`describe`](Self::describe) to stdout.
    pub fn print_layers(&self, wavelength_nm: f64) -> Result<(), TmmError> {
        print!("{}", self.describe(wavelength_nm)?);
        Ok(())
    }
}
