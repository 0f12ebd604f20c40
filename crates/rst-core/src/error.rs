use std::fmt;
use std::path::PathBuf;

use crate::ecl::EclType;

/// Every way a restore can fail. None of these are retried; the first one
/// aborts the whole restore and no partial record is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum RestartError {
    FileNotFound {
        path: PathBuf,
    },
    StepNotFound {
        path: PathBuf,
        step: u32,
    },
    MissingKeyword {
        name: String,
    },
    CellCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    BufferTooShort {
        name: String,
        required: usize,
        actual: usize,
    },
    KeywordType {
        name: String,
        expected: EclType,
        actual: EclType,
    },
    MalformedContainer {
        path: PathBuf,
        detail: String,
    },
}

impl RestartError {
    pub fn code(&self) -> &'static str {
        match self {
            RestartError::FileNotFound { .. } => "RST0001",
            RestartError::StepNotFound { .. } => "RST0002",
            RestartError::MissingKeyword { .. } => "RST0100",
            RestartError::CellCountMismatch { .. } => "RST0101",
            RestartError::BufferTooShort { .. } => "RST0102",
            RestartError::KeywordType { .. } => "RST0103",
            RestartError::MalformedContainer { .. } => "RST0200",
        }
    }

    pub(crate) fn missing(name: &str) -> Self {
        RestartError::MissingKeyword {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for RestartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartError::FileNotFound { path } => {
                write!(f, "restart file {} not found", path.display())
            }
            RestartError::StepNotFound { path, step } => write!(
                f,
                "restart file {} does not contain data for report step {step}",
                path.display()
            ),
            RestartError::MissingKeyword { name } => {
                write!(f, "restart file does not contain {name} data")
            }
            RestartError::CellCountMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "could not restore {name}: mismatched number of cells (expected {expected}, got {actual})"
            ),
            RestartError::BufferTooShort {
                name,
                required,
                actual,
            } => write!(
                f,
                "{name} too short: need at least {required} values for the well sections, got {actual}"
            ),
            RestartError::KeywordType {
                name,
                expected,
                actual,
            } => write!(f, "keyword {name} is stored as {actual}, expected {expected}"),
            RestartError::MalformedContainer { path, detail } => {
                write!(f, "malformed restart file {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for RestartError {}
