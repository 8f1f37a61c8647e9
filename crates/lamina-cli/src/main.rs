//! Lamina command-line interface.
//!
//! Compute reflectance/transmittance spectra of multilayer stacks from TOML
//! job files:
//! ```sh
//! lamina run job.toml
//! lamina validate job.toml
//! lamina materials
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lamina")]
#[command(about = "Lamina: coherent transfer-matrix thin-film optics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a spectrum sweep from a TOML job file.
    Run {
        /// Path to the job configuration file.
        job: PathBuf,
        /// Output directory (overrides the job file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a job file and resolve its stack without solving.
    Validate {
        /// Path to the job configuration file.
        job: PathBuf,
    },
    /// List the built-in material identifiers.
    Materials,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { job, output } => {
            let config = config::load_config(&job)?;
            println!("Job: {}", job.display());

            let rows = runner::run_sweep(&config)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.directory));
            runner::write_spectrum_csv(&rows, &out_dir.join("spectrum.csv"), &config)?;
            if config.output.save_json {
                runner::write_spectrum_json(&rows, &out_dir.join("spectrum.json"))?;
            }
            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { job } => {
            let config = config::load_config(&job)?;
            let stack = runner::build_stack(&config)?;
            let grid = config.sweep.wavelengths.grid();
            let probe = grid.first().copied().unwrap_or(550.0);
            println!("Layers at λ = {:.1} nm:", probe);
            print!("{}", stack.describe(probe)?);
            println!("Job file is valid: {}", job.display());
            Ok(())
        }
        Commands::Materials => {
            println!("Built-in materials:");
            println!("  air    - n = 1 (constant)");
            println!("  glass  - n = 1.52 (constant)");
            println!("  BK7    - Schott N-BK7 (Sellmeier, 300-2500 nm)");
            println!("  MgF2   - magnesium fluoride (Cauchy, visible)");
            println!("  Al     - aluminium (tabulated, 300-900 nm)");
            println!();
            println!("Inline [materials.<id>] entries may define 'constant' or 'cauchy' models.");
            Ok(())
        }
    }
}
