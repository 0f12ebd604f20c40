//! Per-well dynamic data from the flat `OPM_XWEL` buffer.
//!
//! The buffer carries no length markers. For `W` wells and `P` phases it is
//! laid out as
//!
//! ```text
//! [ bhp: W | temperature: W | well rate: W*P | perf pressure: k | perf rate: k ]
//! ```
//!
//! where the perforation count `k` is whatever remains after the well
//! sections, halved. An odd remainder leaves the final element unread.

use std::ops::Range;

use rst_contracts::KW_OPM_XWEL;
use serde::Serialize;

use crate::error::RestartError;
use crate::keywords;
use crate::source::KeywordSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellSegment {
    Bhp,
    Temperature,
    WellRate,
    PerfPressure,
    PerfRate,
}

impl WellSegment {
    pub const ORDER: [WellSegment; 5] = [
        WellSegment::Bhp,
        WellSegment::Temperature,
        WellSegment::WellRate,
        WellSegment::PerfPressure,
        WellSegment::PerfRate,
    ];
}

/// Segment boundaries of one well buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellLayout {
    pub bhp: Range<usize>,
    pub temperature: Range<usize>,
    pub well_rate: Range<usize>,
    pub perf_pressure: Range<usize>,
    pub perf_rate: Range<usize>,
    len: usize,
}

impl WellLayout {
    /// Splits a buffer of `len` values for `num_wells` wells and
    /// `num_phases` phases.
    pub fn compute(len: usize, num_wells: usize, num_phases: usize) -> Result<Self, RestartError> {
        let too_short = |required: usize| RestartError::BufferTooShort {
            name: KW_OPM_XWEL.to_string(),
            required,
            actual: len,
        };

        let fixed = num_wells
            .checked_mul(num_phases)
            .and_then(|rates| rates.checked_add(num_wells.checked_mul(2)?))
            .ok_or_else(|| too_short(usize::MAX))?;
        if len < fixed {
            return Err(too_short(fixed));
        }

        let perf = (len - fixed) / 2;
        let bhp = 0..num_wells;
        let temperature = bhp.end..bhp.end + num_wells;
        let well_rate = temperature.end..fixed;
        let perf_pressure = fixed..fixed + perf;
        let perf_rate = perf_pressure.end..perf_pressure.end + perf;

        Ok(Self {
            bhp,
            temperature,
            well_rate,
            perf_pressure,
            perf_rate,
            len,
        })
    }

    pub fn segment(&self, seg: WellSegment) -> Range<usize> {
        match seg {
            WellSegment::Bhp => self.bhp.clone(),
            WellSegment::Temperature => self.temperature.clone(),
            WellSegment::WellRate => self.well_rate.clone(),
            WellSegment::PerfPressure => self.perf_pressure.clone(),
            WellSegment::PerfRate => self.perf_rate.clone(),
        }
    }

    pub fn num_perforations(&self) -> usize {
        self.perf_pressure.len()
    }

    /// Trailing values not covered by any segment (0 or 1).
    pub fn unread_tail(&self) -> usize {
        self.len - self.perf_rate.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wells {
    pub bhp: Vec<f64>,
    pub temperature: Vec<f64>,
    pub well_rate: Vec<f64>,
    pub perf_pressure: Vec<f64>,
    pub perf_rate: Vec<f64>,
}

impl Wells {
    /// Copies each segment of `buffer` out according to `layout`.
    pub fn from_buffer(buffer: &[f64], layout: &WellLayout) -> Result<Self, RestartError> {
        let take = |range: Range<usize>| -> Result<Vec<f64>, RestartError> {
            buffer
                .get(range.clone())
                .map(<[f64]>::to_vec)
                .ok_or(RestartError::BufferTooShort {
                    name: KW_OPM_XWEL.to_string(),
                    required: range.end,
                    actual: buffer.len(),
                })
        };
        Ok(Self {
            bhp: take(layout.bhp.clone())?,
            temperature: take(layout.temperature.clone())?,
            well_rate: take(layout.well_rate.clone())?,
            perf_pressure: take(layout.perf_pressure.clone())?,
            perf_rate: take(layout.perf_rate.clone())?,
        })
    }
}

/// Decodes `OPM_XWEL` from the active block. Values are kept as stored.
pub fn restore_wells<S: KeywordSource + ?Sized>(
    src: &mut S,
    num_wells: usize,
    num_phases: usize,
) -> Result<(Wells, WellLayout), RestartError> {
    keywords::require(src, &[KW_OPM_XWEL])?;
    let buffer = keywords::into_doub(keywords::fetch(src, KW_OPM_XWEL)?, KW_OPM_XWEL)?;
    let layout = WellLayout::compute(buffer.len(), num_wells, num_phases)?;
    let wells = Wells::from_buffer(&buffer, &layout)?;
    Ok((wells, layout))
}
