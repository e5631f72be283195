//! Persistent defaults for suna.
//!
//! A single validated record ([`SandboxDefaults`]) governs port allocation,
//! artifact naming, and filesystem layout for every topology the tool can
//! deploy. The record is resolved from compiled-in factory values and/or a
//! JSON configuration file, and changed only through the
//! [`DefaultsStore::update`] pipeline, which validates a copy before
//! committing it.

mod fields;
mod persist;
mod resolve;
mod store;
mod types;
mod validate;

pub use fields::field_names;
pub use persist::{read_defaults, remove_defaults, render, write_defaults};
pub use store::{log_operations, DefaultsStore};
pub use types::SandboxDefaults;
pub use validate::{validate, ValidationIssue};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the defaults subsystem.
///
/// All variants are treated as fatal by the CLI (nonzero exit); tests assert
/// on the kinds directly. The advisory path — an invalid file on startup
/// load — never surfaces as one of these.
#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error encoding defaults: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("bad input for {field}: {value} ({reason})")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("unrecognized field {0}")]
    UnknownField(String),

    #[error("invalid defaults data {field} : {value} ({} issues)", .issues.len())]
    Invalid {
        field: String,
        value: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("configuration file {0} not found")]
    NotFound(PathBuf),

    #[error("could not determine home directory")]
    NoHomeDir,
}
