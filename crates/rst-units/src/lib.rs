//! Deck unit systems and their conversion to the internal SI system.
//!
//! A restore picks exactly one [`ConversionTable`] up front from the deck's
//! [`UnitSystem`] and runs every dimensional field through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnitSystem {
    #[default]
    Metric,
    Field,
}

impl UnitSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Field => "field",
        }
    }

    pub fn conversion_table(self) -> &'static ConversionTable {
        match self {
            UnitSystem::Metric => &METRIC_TO_SI,
            UnitSystem::Field => &FIELD_TO_SI,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UnitSystemParseError {
    value: String,
}

impl fmt::Display for UnitSystemParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid unit system {:?} (expected one of: metric, field)",
            self.value
        )
    }
}

impl std::error::Error for UnitSystemParseError {}

impl FromStr for UnitSystem {
    type Err = UnitSystemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "field" => Ok(UnitSystem::Field),
            _ => Err(UnitSystemParseError { value: s }),
        }
    }
}

impl TryFrom<String> for UnitSystem {
    type Error = UnitSystemParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for UnitSystem {
    fn value_variants<'a>() -> &'a [Self] {
        const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Field];
        &ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Physical dimensions the restore path converts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Pressure,
    Temperature,
}

/// Affine map into SI: `si = (x + offset) * factor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub factor: f64,
    pub offset: f64,
}

impl Scale {
    pub const fn linear(factor: f64) -> Self {
        Self {
            factor,
            offset: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionTable {
    name: &'static str,
    pressure: Scale,
    temperature: Scale,
}

pub const BAR: f64 = 1.0e5;
pub const PSI: f64 = 6894.757293168361;

pub const METRIC_TO_SI: ConversionTable = ConversionTable {
    name: "metric-to-si",
    pressure: Scale::linear(BAR),
    // Celsius -> Kelvin
    temperature: Scale {
        factor: 1.0,
        offset: 273.15,
    },
};

pub const FIELD_TO_SI: ConversionTable = ConversionTable {
    name: "field-to-si",
    pressure: Scale::linear(PSI),
    // Fahrenheit -> Rankine -> Kelvin
    temperature: Scale {
        factor: 5.0 / 9.0,
        offset: 459.67,
    },
};

impl ConversionTable {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scale(&self, dim: Dimension) -> Scale {
        match dim {
            Dimension::Pressure => self.pressure,
            Dimension::Temperature => self.temperature,
        }
    }

    pub fn to_si(&self, dim: Dimension, x: f64) -> f64 {
        let s = self.scale(dim);
        (x + s.offset) * s.factor
    }

    pub fn from_si(&self, dim: Dimension, x: f64) -> f64 {
        let s = self.scale(dim);
        x / s.factor - s.offset
    }

    /// Converts every element of `values` in place, preserving order.
    pub fn apply_to_si(&self, dim: Dimension, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.to_si(dim, *v);
        }
    }

    pub fn apply_from_si(&self, dim: Dimension, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.from_si(dim, *v);
        }
    }
}
