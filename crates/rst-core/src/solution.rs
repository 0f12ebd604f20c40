//! Per-cell solution fields.

use std::collections::BTreeMap;

use rst_contracts::{
    KW_PRESSURE, KW_RS, KW_RV, KW_SGAS, KW_SWAT, KW_TEMP, MANDATORY_CELL_KEYWORDS,
};
use rst_units::{ConversionTable, Dimension};
use serde::Serialize;

use crate::error::RestartError;
use crate::keywords;
use crate::source::KeywordSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolutionKey {
    Pressure,
    Temperature,
    Swat,
    Sgas,
    Rs,
    Rv,
}

impl SolutionKey {
    pub const ALL: [SolutionKey; 6] = [
        SolutionKey::Pressure,
        SolutionKey::Temperature,
        SolutionKey::Swat,
        SolutionKey::Sgas,
        SolutionKey::Rs,
        SolutionKey::Rv,
    ];

    pub const MANDATORY: [SolutionKey; 4] = [
        SolutionKey::Pressure,
        SolutionKey::Temperature,
        SolutionKey::Swat,
        SolutionKey::Sgas,
    ];

    pub const OPTIONAL: [SolutionKey; 2] = [SolutionKey::Rs, SolutionKey::Rv];

    /// Name of the restart keyword holding this field.
    pub fn keyword(self) -> &'static str {
        match self {
            SolutionKey::Pressure => KW_PRESSURE,
            SolutionKey::Temperature => KW_TEMP,
            SolutionKey::Swat => KW_SWAT,
            SolutionKey::Sgas => KW_SGAS,
            SolutionKey::Rs => KW_RS,
            SolutionKey::Rv => KW_RV,
        }
    }

    /// Dimension converted on restore; `None` for fields stored as read.
    pub fn dimension(self) -> Option<Dimension> {
        match self {
            SolutionKey::Pressure => Some(Dimension::Pressure),
            SolutionKey::Temperature => Some(Dimension::Temperature),
            SolutionKey::Swat | SolutionKey::Sgas | SolutionKey::Rs | SolutionKey::Rv => None,
        }
    }
}

/// Field values keyed by kind. An absent key means the restart file did not
/// carry that field. Mandatory fields hold one value per active cell; RS and
/// RV hold whatever the file stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    fields: BTreeMap<SolutionKey, Vec<f64>>,
}

impl Solution {
    pub fn get(&self, key: SolutionKey) -> Option<&[f64]> {
        self.fields.get(&key).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, key: SolutionKey) -> Option<&mut [f64]> {
        self.fields.get_mut(&key).map(Vec::as_mut_slice)
    }

    pub fn contains(&self, key: SolutionKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Present fields in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (SolutionKey, &[f64])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, key: SolutionKey, values: Vec<f64>) {
        self.fields.insert(key, values);
    }
}

/// Decodes the cell fields of the active block.
///
/// PRESSURE, TEMP, SWAT and SGAS must all be present as `REAL` with exactly
/// `num_cells` values. Pressure and temperature go through `table`; the
/// saturations are kept as stored. RS and RV are read when present, with no
/// size check and no conversion.
pub fn restore_solution<S: KeywordSource + ?Sized>(
    src: &mut S,
    num_cells: usize,
    table: &ConversionTable,
) -> Result<Solution, RestartError> {
    keywords::require(src, &MANDATORY_CELL_KEYWORDS)?;

    let mut sol = Solution::default();
    for key in SolutionKey::MANDATORY {
        let values = read_cell_field(src, key.keyword(), num_cells)?;
        sol.insert(key, values);
    }

    for key in SolutionKey::MANDATORY {
        let (Some(dim), Some(values)) = (key.dimension(), sol.get_mut(key)) else {
            continue;
        };
        table.apply_to_si(dim, values);
    }

    for key in SolutionKey::OPTIONAL {
        if src.contains(key.keyword()) {
            let data = keywords::fetch(src, key.keyword())?;
            sol.insert(key, keywords::into_real(data, key.keyword())?);
        }
    }

    Ok(sol)
}

fn read_cell_field<S: KeywordSource + ?Sized>(
    src: &mut S,
    name: &str,
    num_cells: usize,
) -> Result<Vec<f64>, RestartError> {
    let data = keywords::fetch(src, name)?;
    keywords::validate_count(&data, num_cells, name)?;
    keywords::into_real(data, name)
}
