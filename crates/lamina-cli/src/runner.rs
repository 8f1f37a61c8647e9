//! Spectrum runner: resolves materials, builds the stack, sweeps wavelengths.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::Serialize;

use lamina_core::stack::Stack;
use lamina_core::tmm::{coherent_tmm, Polarization};
use lamina_materials::cauchy::CauchyFormula;
use lamina_materials::constant::ConstantIndex;
use lamina_materials::provider::DispersionModel;
use lamina_materials::sellmeier::SellmeierFormula;
use lamina_materials::tabulated::TabulatedIndex;

use crate::config::{CustomMaterial, JobConfig, PolarizationSpec};

/// One row of the computed spectrum.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumRow {
    pub wavelength_nm: f64,
    pub polarization: Polarization,
    pub reflectance: f64,
    pub transmittance: f64,
    /// 1 − R − T; zero for lossless stacks up to rounding.
    pub absorptance: f64,
}

/// Resolve a material identifier to a dispersion model.
///
/// Built-ins are checked first, then the job's inline `[materials.*]`
/// definitions.
pub fn resolve_material(id: &str, job: &JobConfig) -> Result<Arc<dyn DispersionModel>> {
    let model: Arc<dyn DispersionModel> = match id {
        "air" => Arc::new(ConstantIndex::air()),
        "glass" => Arc::new(ConstantIndex::real("glass", 1.52)),
        "BK7" => Arc::new(SellmeierFormula::bk7()),
        "MgF2" => Arc::new(CauchyFormula::magnesium_fluoride()),
        "Al" => Arc::new(TabulatedIndex::aluminium()),
        _ => match job.materials.get(id) {
            Some(CustomMaterial::Constant { n, k }) => Arc::new(ConstantIndex::new(id, *n, *k)),
            Some(CustomMaterial::Cauchy { a, b, c }) => {
                Arc::new(CauchyFormula::new(id, *a, *b, *c))
            }
            None => anyhow::bail!(
                "Unknown material '{}'. Built-ins: air, glass, BK7, MgF2, Al; \
                 or define [materials.{}] in the job file",
                id,
                id
            ),
        },
    };
    Ok(model)
}

/// Build the multilayer from the job's `[stack]` section.
pub fn build_stack(job: &JobConfig) -> Result<Stack> {
    let ambient = resolve_material(&job.stack.ambient, job)
        .context("resolving the ambient medium")?;
    let substrate = resolve_material(&job.stack.substrate, job)
        .context("resolving the substrate")?;

    let mut stack = Stack::new(ambient, substrate);
    for (i, film) in job.stack.film.iter().enumerate() {
        let model = resolve_material(&film.material, job)
            .with_context(|| format!("resolving film {} ('{}')", i, film.material))?;
        stack
            .insert_layer(model, film.thickness_nm)
            .with_context(|| format!("inserting film {} ('{}')", i, film.material))?;
    }
    Ok(stack)
}

fn polarizations(spec: PolarizationSpec) -> Vec<Polarization> {
    match spec {
        PolarizationSpec::S => vec![Polarization::S],
        PolarizationSpec::P => vec![Polarization::P],
        PolarizationSpec::Both => vec![Polarization::S, Polarization::P],
    }
}

/// Run the configured sweep and collect the spectrum.
pub fn run_sweep(job: &JobConfig) -> Result<Vec<SpectrumRow>> {
    let stack = build_stack(job)?;
    let wavelengths = job.sweep.wavelengths.grid();
    if wavelengths.is_empty() {
        anyhow::bail!("The wavelength grid is empty");
    }
    let theta_0 = Complex64::new(job.sweep.angle_deg.to_radians(), 0.0);
    let pols = polarizations(job.sweep.polarization);

    println!(
        "Sweeping {} wavelengths at {:.2} deg incidence ({} layers)",
        wavelengths.len(),
        job.sweep.angle_deg,
        stack.len()
    );

    let mut rows = Vec::with_capacity(wavelengths.len() * pols.len());
    for (wi, &wl) in wavelengths.iter().enumerate() {
        for &pol in &pols {
            let result = coherent_tmm(&stack, pol, theta_0, wl)
                .map_err(|e| anyhow::anyhow!("Solve failed at λ={:.1} nm: {}", wl, e))?;
            rows.push(SpectrumRow {
                wavelength_nm: wl,
                polarization: pol,
                reflectance: result.reflectance,
                transmittance: result.transmittance,
                absorptance: 1.0 - result.reflectance - result.transmittance,
            });
        }
        if (wi + 1) % 25 == 0 || wi == 0 || wi == wavelengths.len() - 1 {
            let last = rows.last().unwrap();
            println!(
                "  [{}/{}] λ={:.1} nm: R={:.4}, T={:.4}",
                wi + 1,
                wavelengths.len(),
                wl,
                last.reflectance,
                last.transmittance
            );
        }
    }
    Ok(rows)
}

/// Write the spectrum to a CSV file with a metadata header.
pub fn write_spectrum_csv(rows: &[SpectrumRow], path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# lamina — coherent thin-film spectrum")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# angle_deg: {}", job.sweep.angle_deg)?;
    writeln!(
        file,
        "# stack: {} | {} film(s) | {}",
        job.stack.ambient,
        job.stack.film.len(),
        job.stack.substrate
    )?;
    for film in &job.stack.film {
        writeln!(
            file,
            "# film: material={}, thickness={} nm",
            film.material, film.thickness_nm
        )?;
    }
    writeln!(file, "#")?;
    writeln!(
        file,
        "wavelength_nm,polarization,reflectance,transmittance,absorptance"
    )?;

    for row in rows {
        let pol = match row.polarization {
            Polarization::S => "s",
            Polarization::P => "p",
        };
        writeln!(
            file,
            "{:.2},{},{:.9e},{:.9e},{:.9e}",
            row.wavelength_nm, pol, row.reflectance, row.transmittance, row.absorptance
        )?;
    }

    println!("Spectrum written to: {}", path.display());
    Ok(())
}

/// Write the spectrum to a JSON file.
pub fn write_spectrum_json(rows: &[SpectrumRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Spectrum (JSON) written to: {}", path.display());
    Ok(())
}
