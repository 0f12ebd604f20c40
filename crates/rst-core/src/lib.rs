//! Restores simulation state from ECLIPSE-style restart files.
//!
//! - [`ecl`]: the unformatted restart-file reader.
//! - [`keywords`]: presence/type/size checks.
//! - [`solution`]: per-cell fields (pressure, temperature, saturations, RS/RV).
//! - [`wells`]: per-well data from the positional `OPM_XWEL` buffer.
//! - [`restart`]: configuration and the restore entry points.

pub mod ecl;
pub mod error;
pub mod keywords;
pub mod restart;
pub mod solution;
pub mod source;
pub mod wells;

pub use error::RestartError;
pub use restart::{init_from_restart_file, restore, RestartConfig, Restored};
pub use solution::{Solution, SolutionKey};
pub use source::{KeywordData, KeywordSource, MemContainer};
pub use wells::{WellLayout, WellSegment, Wells};
