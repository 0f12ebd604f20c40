use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rst_contracts::{RST_KEYWORDS_REPORT_SCHEMA_VERSION, RST_RESTORE_REPORT_SCHEMA_VERSION};
use rst_core::ecl::EclFile;
use rst_core::{RestartConfig, RestartError, Restored, SolutionKey};
use rst_units::UnitSystem;

mod report;

use report::{
    emit_report, values_sha256, Diagnostic, KeywordEntry, KeywordsReport, RestoreReport,
    ValueUnits, WellSummary,
};

const EXIT_RESTORE_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "rst")]
#[command(about = "Restore simulation state from ECLIPSE restart files.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode cell fields and well data for the configured report step.
    Restore {
        /// Restart configuration JSON (rst.restart-config@0.1.0).
        #[arg(long, value_name = "PATH")]
        config: PathBuf,
        /// Number of active cells in the grid.
        #[arg(long)]
        num_cells: usize,
        /// Override the unit system declared in the config.
        #[arg(long, value_enum)]
        unit_system: Option<UnitSystem>,
        /// Report pressure and temperature in deck units instead of SI.
        #[arg(long, default_value_t = false)]
        deck_units: bool,
        /// Also write the report to this file.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// List the keywords of a restart file or of one report step.
    Keywords {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
        #[arg(long)]
        step: Option<u32>,
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Restore {
            config,
            num_cells,
            unit_system,
            deck_units,
            out,
        } => cmd_restore(&config, num_cells, unit_system, deck_units, out.as_deref()),
        Command::Keywords { file, step, out } => cmd_keywords(&file, step, out.as_deref()),
    }
}

fn cmd_restore(
    config_path: &Path,
    num_cells: usize,
    unit_system: Option<UnitSystem>,
    deck_units: bool,
    out: Option<&Path>,
) -> Result<ExitCode> {
    let mut config = RestartConfig::load(config_path)?;
    if let Some(u) = unit_system {
        config.unit_system = u;
    }

    let mut report = RestoreReport {
        schema_version: RST_RESTORE_REPORT_SCHEMA_VERSION,
        ok: false,
        file: config.restart_file_path().display().to_string(),
        step: config.restart_step,
        unit_system: config.unit_system.as_str(),
        values: None,
        solution: None,
        wells: None,
        well_summary: None,
        sha256: None,
        diagnostics: Vec::new(),
    };

    match rst_core::restore(&config, num_cells) {
        Ok(restored) => {
            let Restored {
                mut solution,
                wells,
                well_layout,
                unit_system,
                ..
            } = restored;
            report.sha256 = Some(values_sha256(&solution, &wells));
            if deck_units {
                let table = unit_system.conversion_table();
                for key in SolutionKey::ALL {
                    let (Some(dim), Some(values)) = (key.dimension(), solution.get_mut(key)) else {
                        continue;
                    };
                    table.apply_from_si(dim, values);
                }
            }
            report.ok = true;
            report.values = Some(if deck_units {
                ValueUnits::Deck
            } else {
                ValueUnits::Si
            });
            report.well_summary = Some(WellSummary {
                num_wells: config.num_wells,
                num_phases: config.num_phases,
                num_perforations: well_layout.num_perforations(),
                unread_tail: well_layout.unread_tail(),
            });
            report.solution = Some(solution);
            report.wells = Some(wells);
            emit_report(&report, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail(report, &err, out),
    }
}

fn fail(mut report: RestoreReport, err: &RestartError, out: Option<&Path>) -> Result<ExitCode> {
    eprintln!("{}: {err}", err.code());
    report.diagnostics.push(Diagnostic::from(err));
    emit_report(&report, out)?;
    Ok(ExitCode::from(EXIT_RESTORE_FAILED))
}

fn cmd_keywords(path: &Path, step: Option<u32>, out: Option<&Path>) -> Result<ExitCode> {
    let mut report = KeywordsReport {
        schema_version: RST_KEYWORDS_REPORT_SCHEMA_VERSION,
        ok: false,
        file: path.display().to_string(),
        step,
        report_steps: Vec::new(),
        keywords: Vec::new(),
        diagnostics: Vec::new(),
    };

    match list_keywords(path, step, &mut report) {
        Ok(()) => {
            report.ok = true;
            emit_report(&report, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}: {err}", err.code());
            report.diagnostics.push(Diagnostic::from(&err));
            emit_report(&report, out)?;
            Ok(ExitCode::from(EXIT_RESTORE_FAILED))
        }
    }
}

fn list_keywords(
    path: &Path,
    step: Option<u32>,
    report: &mut KeywordsReport,
) -> Result<(), RestartError> {
    let mut file = EclFile::open(path)?;
    report.report_steps = file.report_steps()?;
    if let Some(step) = step {
        if !file.select_report_step(step)? {
            return Err(RestartError::StepNotFound {
                path: file.path().to_path_buf(),
                step,
            });
        }
    }
    report.keywords = file
        .headers()
        .iter()
        .map(|h| KeywordEntry {
            name: h.name.clone(),
            ty: h.ty.to_string(),
            count: h.count,
        })
        .collect();
    Ok(())
}
