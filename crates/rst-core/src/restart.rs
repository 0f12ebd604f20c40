use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rst_contracts::{
    RESTART_CONFIG_SCHEMA_VERSION, SEPARATE_RESTART_EXT_PREFIX, UNIFIED_RESTART_EXT,
};
use rst_units::{ConversionTable, UnitSystem};
use serde::{Deserialize, Serialize};

use crate::ecl::EclFile;
use crate::error::RestartError;
use crate::solution::{restore_solution, Solution};
use crate::source::KeywordSource;
use crate::wells::{restore_wells, WellLayout, Wells};

/// What the simulation configuration tells a restore.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RestartConfig {
    pub schema_version: String,
    /// Path prefix of the restart file(s), without extension.
    pub restart_root: String,
    pub restart_step: u32,
    #[serde(default)]
    pub unified: bool,
    pub unit_system: UnitSystem,
    /// Wells defined at `restart_step`.
    pub num_wells: usize,
    pub num_phases: usize,
}

impl RestartConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read restart config: {}", path.display()))?;
        Self::from_json_slice(&bytes)
            .with_context(|| format!("parse restart config: {}", path.display()))
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let cfg: RestartConfig = serde_json::from_slice(bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != RESTART_CONFIG_SCHEMA_VERSION {
            anyhow::bail!(
                "schema_version mismatch: expected {RESTART_CONFIG_SCHEMA_VERSION} got {:?}",
                self.schema_version
            );
        }
        if self.restart_root.trim().is_empty() {
            anyhow::bail!("restart_root is empty");
        }
        if self.num_phases == 0 {
            anyhow::bail!("num_phases must be at least 1");
        }
        Ok(())
    }

    /// Input restart file for this configuration.
    pub fn restart_file_path(&self) -> PathBuf {
        restart_file_name(&self.restart_root, self.restart_step, self.unified)
    }
}

/// `<root>.UNRST` for unified files, `<root>.X0005` style otherwise.
pub fn restart_file_name(root: &str, step: u32, unified: bool) -> PathBuf {
    if unified {
        PathBuf::from(format!("{root}.{UNIFIED_RESTART_EXT}"))
    } else {
        PathBuf::from(format!("{root}.{SEPARATE_RESTART_EXT_PREFIX}{step:04}"))
    }
}

/// Decoded state plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub path: PathBuf,
    pub step: u32,
    pub unit_system: UnitSystem,
    pub solution: Solution,
    pub wells: Wells,
    pub well_layout: WellLayout,
}

/// Runs both decoders over one open block.
pub fn decode<S: KeywordSource + ?Sized>(
    src: &mut S,
    num_cells: usize,
    table: &ConversionTable,
    num_wells: usize,
    num_phases: usize,
) -> Result<(Solution, Wells, WellLayout), RestartError> {
    let solution = restore_solution(src, num_cells, table)?;
    let (wells, layout) = restore_wells(src, num_wells, num_phases)?;
    Ok((solution, wells, layout))
}

/// Opens the configured restart file, selects the report step when the file
/// is unified, and decodes cell fields and well data from it.
///
/// The file is closed before returning, whichever way this returns.
pub fn restore(config: &RestartConfig, num_cells: usize) -> Result<Restored, RestartError> {
    let step = config.restart_step;

    let mut file = EclFile::open(&config.restart_file_path())?;
    if config.unified && !file.select_report_step(step)? {
        return Err(RestartError::StepNotFound {
            path: file.path().to_path_buf(),
            step,
        });
    }

    let table = config.unit_system.conversion_table();
    let (solution, wells, well_layout) = decode(
        &mut file,
        num_cells,
        table,
        config.num_wells,
        config.num_phases,
    )?;

    Ok(Restored {
        path: file.path().to_path_buf(),
        step,
        unit_system: config.unit_system,
        solution,
        wells,
        well_layout,
    })
}

pub fn init_from_restart_file(
    config: &RestartConfig,
    num_cells: usize,
) -> Result<(Solution, Wells), RestartError> {
    let restored = restore(config, num_cells)?;
    Ok((restored.solution, restored.wells))
}
