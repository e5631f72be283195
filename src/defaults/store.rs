//! The effective-defaults store and update pipeline.
//!
//! One `DefaultsStore` owns the process's effective record: lazily resolved
//! from the configuration file (or factory values), cached for the process
//! lifetime, and replaced — never mutated in place — by [`DefaultsStore::update`].
//! The store is unsynchronized by design; a multi-threaded host must add its
//! own mutual exclusion around `effective()`/`update()`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::constants;

use super::types::SandboxDefaults;
use super::{fields, persist, validate, DefaultsError};

/// Process-wide "log sandbox operations" flag.
///
/// Seeded from the `SUNA_LOGGING` environment variable and raised when the
/// effective record enables logging. Kept as independent global state because
/// logging decisions are consulted in code paths that run before a record
/// reference is available.
static LOG_OPERATIONS: LazyLock<AtomicBool> = LazyLock::new(|| {
    AtomicBool::new(std::env::var(constants::LOGGING_ENV_VAR).is_ok_and(|v| !v.is_empty()))
});

/// Whether sandbox operations should be logged right now.
pub fn log_operations() -> bool {
    LOG_OPERATIONS.load(Ordering::Relaxed)
}

/// Owner of the effective configuration record.
pub struct DefaultsStore {
    config_file: PathBuf,
    current: Option<SandboxDefaults>,
}

impl DefaultsStore {
    /// Store backed by an explicit configuration file path.
    pub fn new(config_file: PathBuf) -> Self {
        Self {
            config_file,
            current: None,
        }
    }

    /// Store backed by the standard location, `$HOME/.suna/config.json`.
    pub fn open_default() -> Result<Self, DefaultsError> {
        let home = dirs::home_dir().ok_or(DefaultsError::NoHomeDir)?;
        Ok(Self::new(
            home.join(constants::CONFIG_DIR_NAME)
                .join(constants::CONFIG_FILENAME),
        ))
    }

    /// Path of the backing configuration file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// The effective record, resolved lazily on first call.
    ///
    /// Reads the configuration file if one exists, otherwise takes the
    /// factory values; subsequent calls return the cached record without
    /// touching storage. A malformed file is an error — the tool cannot
    /// guarantee its own state over a corrupted store.
    pub fn effective(&mut self) -> Result<&SandboxDefaults, DefaultsError> {
        let resolved = match self.current.take() {
            Some(current) => current,
            None => {
                let resolved = if self.config_file.exists() {
                    persist::read_defaults(&self.config_file)?
                } else {
                    SandboxDefaults::factory()
                };
                if resolved.log_sb_operations {
                    LOG_OPERATIONS.store(true, Ordering::Relaxed);
                }
                resolved
            }
        };
        Ok(self.current.insert(resolved))
    }

    /// Idempotent startup hook.
    ///
    /// No configuration file: no-op, factory values stay effective. File
    /// present and valid: it becomes effective. File present but invalid:
    /// advisory only — a warning banner is printed, factory values stay
    /// effective, and execution pauses briefly so the message registers.
    pub fn load(&mut self) -> Result<(), DefaultsError> {
        if !self.config_file.exists() {
            return Ok(());
        }
        let candidate = persist::read_defaults(&self.config_file)?;
        match validate::validate(&candidate) {
            Ok(()) => {
                if candidate.log_sb_operations {
                    LOG_OPERATIONS.store(true, Ordering::Relaxed);
                }
                self.current = Some(candidate);
            }
            Err(issues) => {
                // Commit the fallback so a later effective() call does not
                // re-read and cache the rejected file.
                let factory = SandboxDefaults::factory();
                if factory.log_sb_operations {
                    LOG_OPERATIONS.store(true, Ordering::Relaxed);
                }
                self.current = Some(factory);
                eprintln!("{}", constants::STAR_LINE);
                eprintln!(
                    "{} defaults file {} not validated",
                    "warning:".yellow().bold(),
                    self.config_file.display()
                );
                for issue in &issues {
                    eprintln!("{issue}");
                }
                eprintln!("loading internal defaults");
                eprintln!("{}", constants::STAR_LINE);
                eprintln!();
                thread::sleep(Duration::from_millis(constants::LOAD_FAILURE_PAUSE_MS));
            }
        }
        Ok(())
    }

    /// Applies exactly one named field change, atomically.
    ///
    /// The change is made on a copy of the effective record; the copy must
    /// validate before it is committed, so a rejected update leaves the
    /// previous record untouched. With `persist_to_file`, the new record is
    /// also written to the configuration file and a confirmation printed.
    pub fn update(
        &mut self,
        name: &str,
        value: &str,
        persist_to_file: bool,
    ) -> Result<(), DefaultsError> {
        let mut candidate = self.effective()?.clone();
        fields::apply(&mut candidate, name, value)?;
        if let Err(issues) = validate::validate(&candidate) {
            for issue in &issues {
                eprintln!("{issue}");
            }
            return Err(DefaultsError::Invalid {
                field: name.to_string(),
                value: value.to_string(),
                issues,
            });
        }
        if persist_to_file {
            persist::write_defaults(&self.config_file, &candidate)?;
            println!("# updated {name} -> \"{value}\"");
        }
        self.current = Some(candidate);
        Ok(())
    }
}
