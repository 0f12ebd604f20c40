//! Shared, version-pinned identifiers.
//!
//! Schema strings for machine-readable I/O and the keyword names that make up
//! the restart-file wire contract. Keyword names are matched exactly and are
//! case-sensitive.

pub const RESTART_CONFIG_SCHEMA_VERSION: &str = "rst.restart-config@0.1.0";

pub const RST_RESTORE_REPORT_SCHEMA_VERSION: &str = "rst.restore.report@0.1.0";
pub const RST_KEYWORDS_REPORT_SCHEMA_VERSION: &str = "rst.keywords.report@0.1.0";

pub const KW_PRESSURE: &str = "PRESSURE";
pub const KW_TEMP: &str = "TEMP";
pub const KW_SWAT: &str = "SWAT";
pub const KW_SGAS: &str = "SGAS";
pub const KW_RS: &str = "RS";
pub const KW_RV: &str = "RV";

/// Flat per-well dynamic data written by the simulator.
pub const KW_OPM_XWEL: &str = "OPM_XWEL";

/// First keyword of every report-step block in a unified restart file.
pub const KW_SEQNUM: &str = "SEQNUM";

pub const MANDATORY_CELL_KEYWORDS: [&str; 4] = [KW_PRESSURE, KW_TEMP, KW_SWAT, KW_SGAS];

pub const UNIFIED_RESTART_EXT: &str = "UNRST";
pub const SEPARATE_RESTART_EXT_PREFIX: char = 'X';
