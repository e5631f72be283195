//! Centralized constants for suna.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "suna";

/// Directory under `$HOME` holding suna's persistent state.
pub const CONFIG_DIR_NAME: &str = ".suna";

/// Configuration filename inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILENAME: &str = "config.json";

/// Oldest defaults-file version this build accepts.
pub const COMPATIBLE_VERSION: &str = "1.60.0";

/// Environment variable that pre-enables sandbox operation logging.
pub const LOGGING_ENV_VAR: &str = "SUNA_LOGGING";

// --- Port windows ---

/// Lowest port a topology base port may use.
pub const MIN_PORT_VALUE: u32 = 11_000;

/// Highest port a topology base port may use.
pub const MAX_PORT_VALUE: u32 = 30_000;

/// Allowed window for the group communication port offset.
pub const GROUP_PORT_DELTA_MIN: u32 = 101;
pub const GROUP_PORT_DELTA_MAX: u32 = 299;

/// Allowed window for the extended-protocol (mysqlx) port offset.
pub const MYSQLX_PORT_DELTA_MIN: u32 = 2_000;
pub const MYSQLX_PORT_DELTA_MAX: u32 = 15_000;

// --- Startup load ---

/// Pause after a failed defaults-file load, long enough for the warning
/// banner to register before execution continues.
pub const LOAD_FAILURE_PAUSE_MS: u64 = 1_000;

/// Banner line framing the failed-load warning.
pub const STAR_LINE: &str =
    "**********************************************************************";
