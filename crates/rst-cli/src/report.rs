use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use rst_core::{RestartError, Solution, Wells};
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

impl From<&RestartError> for Diagnostic {
    fn from(err: &RestartError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueUnits {
    Si,
    Deck,
}

#[derive(Debug, Clone, Serialize)]
pub struct WellSummary {
    pub num_wells: usize,
    pub num_phases: usize,
    pub num_perforations: usize,
    /// Trailing `OPM_XWEL` values left unread by the even split.
    pub unread_tail: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    pub schema_version: &'static str,
    pub ok: bool,
    pub file: String,
    pub step: u32,
    pub unit_system: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wells: Option<Wells>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub well_summary: Option<WellSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordsReport {
    pub schema_version: &'static str,
    pub ok: bool,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    pub report_steps: Vec<u32>,
    pub keywords: Vec<KeywordEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Digest of the decoded values, stable across runs and platforms.
pub fn values_sha256(solution: &Solution, wells: &Wells) -> String {
    let mut h = Sha256::new();
    for (key, values) in solution.iter() {
        h.update(key.keyword().as_bytes());
        hash_values(&mut h, values);
    }
    for (name, values) in [
        ("bhp", &wells.bhp),
        ("temperature", &wells.temperature),
        ("well_rate", &wells.well_rate),
        ("perf_pressure", &wells.perf_pressure),
        ("perf_rate", &wells.perf_rate),
    ] {
        h.update(name.as_bytes());
        hash_values(&mut h, values);
    }
    let digest = h.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn hash_values(h: &mut Sha256, values: &[f64]) {
    h.update((values.len() as u64).to_le_bytes());
    for v in values {
        h.update(v.to_le_bytes());
    }
}

pub fn emit_report<T: Serialize>(report: &T, out: Option<&Path>) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create report dir: {}", parent.display()))?;
            }
        }
        std::fs::write(path, &bytes)
            .with_context(|| format!("write report: {}", path.display()))?;
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes).context("write stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_core::{KeywordData, MemContainer};
    use rst_units::METRIC_TO_SI;

    fn decoded(p: f32) -> (Solution, Wells) {
        let mut c = MemContainer::new()
            .with("PRESSURE", KeywordData::Real(vec![p]))
            .with("TEMP", KeywordData::Real(vec![1.0]))
            .with("SWAT", KeywordData::Real(vec![0.5]))
            .with("SGAS", KeywordData::Real(vec![0.5]))
            .with("OPM_XWEL", KeywordData::Doub(vec![1.0, 2.0, 3.0]));
        let (sol, wells, _) = rst_core::restart::decode(&mut c, 1, &METRIC_TO_SI, 1, 1).unwrap();
        (sol, wells)
    }

    #[test]
    fn digest_tracks_values() {
        let (s1, w1) = decoded(1.0);
        let (s2, w2) = decoded(2.0);
        let d1 = values_sha256(&s1, &w1);
        assert_eq!(d1.len(), 64);
        assert_eq!(d1, values_sha256(&s1, &w1));
        assert_ne!(d1, values_sha256(&s2, &w2));
    }

    #[test]
    fn diagnostic_from_restart_error() {
        let d = Diagnostic::from(&RestartError::MissingKeyword {
            name: "SGAS".to_string(),
        });
        assert_eq!(d.code, "RST0100");
        assert!(d.message.contains("SGAS"));
    }
}
