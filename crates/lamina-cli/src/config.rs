//! TOML job configuration for spectrum sweeps.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub sweep: SweepConfig,
    pub stack: StackConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Inline material definitions, usable by id alongside the built-ins.
    #[serde(default)]
    pub materials: BTreeMap<String, CustomMaterial>,
}

/// What to compute: the wavelength grid, incidence angle, and polarization.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub wavelengths: WavelengthSpec,
    /// Incidence angle from the surface normal, in degrees. Default: 0.
    #[serde(default)]
    pub angle_deg: f64,
    #[serde(default = "default_polarization")]
    pub polarization: PolarizationSpec,
}

fn default_polarization() -> PolarizationSpec {
    PolarizationSpec::Both
}

/// Wavelength specification: either a range or explicit list (nm).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WavelengthSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl WavelengthSpec {
    /// Expand to the explicit wavelength grid.
    pub fn grid(&self) -> Vec<f64> {
        match self {
            WavelengthSpec::Range { range, points } => {
                let [start, end] = *range;
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / (*points - 1).max(1) as f64)
                    .collect()
            }
            WavelengthSpec::List { values } => values.clone(),
        }
    }
}

/// Which polarizations to run.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarizationSpec {
    S,
    P,
    Both,
}

/// The multilayer, listed front to back.
#[derive(Debug, Deserialize)]
pub struct StackConfig {
    /// Material id of the semi-infinite incidence medium.
    pub ambient: String,
    /// Material id of the semi-infinite exit medium.
    pub substrate: String,
    /// Films between ambient and substrate, in traversal order.
    #[serde(default)]
    pub film: Vec<FilmConfig>,
}

/// One finite film.
#[derive(Debug, Deserialize)]
pub struct FilmConfig {
    pub material: String,
    pub thickness_nm: f64,
}

/// An inline material definition.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomMaterial {
    /// Fixed complex index n + ik.
    Constant {
        n: f64,
        #[serde(default)]
        k: f64,
    },
    /// Cauchy formula A + B/λ² + C/λ⁴, B in nm², C in nm⁴.
    Cauchy {
        a: f64,
        b: f64,
        #[serde(default)]
        c: f64,
    },
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to also save the spectrum as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_job() {
        let job: JobConfig = toml::from_str(
            r#"
            [sweep]
            wavelengths = { range = [400.0, 800.0], points = 81 }
            angle_deg = 15.0
            polarization = "s"

            [stack]
            ambient = "air"
            substrate = "BK7"

            [[stack.film]]
            material = "MgF2"
            thickness_nm = 99.6

            [materials.mygel]
            type = "constant"
            n = 1.41
            "#,
        )
        .unwrap();

        assert_eq!(job.sweep.wavelengths.grid().len(), 81);
        assert_eq!(job.stack.film.len(), 1);
        assert!(matches!(job.sweep.polarization, PolarizationSpec::S));
        assert!(matches!(
            job.materials.get("mygel"),
            Some(CustomMaterial::Constant { .. })
        ));
    }

    #[test]
    fn grid_handles_single_point_range() {
        let spec = WavelengthSpec::Range {
            range: [550.0, 600.0],
            points: 1,
        };
        assert_eq!(spec.grid(), vec![550.0]);
    }
}
