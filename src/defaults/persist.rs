//! JSON persistence of the defaults file.
//!
//! One record, one file, tab-indented UTF-8 JSON. Environment variables are
//! contracted on the way out and expanded on the way in, so the on-disk form
//! stays portable while the in-memory form stays literal.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::resolve::{contract_env, expand_env};
use super::types::SandboxDefaults;
use super::DefaultsError;

/// Serializes a record as tab-indented JSON, the on-disk format. Also used
/// for the record snapshots in validation diagnostics.
pub(super) fn to_pretty(defaults: &SandboxDefaults) -> Result<String, DefaultsError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    defaults.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a record to `path`, creating the parent directory if absent.
///
/// Path fields are contracted to placeholder form first; the record passed
/// in is left untouched.
pub fn write_defaults(path: &Path, defaults: &SandboxDefaults) -> Result<(), DefaultsError> {
    let contracted = contract_env(defaults.clone());
    let json = to_pretty(&contracted)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| DefaultsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, json).map_err(|source| DefaultsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a record from `path` and expands its path fields to literal form.
pub fn read_defaults(path: &Path) -> Result<SandboxDefaults, DefaultsError> {
    let blob = fs::read(path).map_err(|source| DefaultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let defaults: SandboxDefaults = serde_json::from_slice(&blob)?;
    Ok(expand_env(defaults))
}

/// Deletes the defaults file. A missing file is an error — removal should
/// only be requested when the caller believes one exists.
pub fn remove_defaults(path: &Path) -> Result<(), DefaultsError> {
    if !path.exists() {
        return Err(DefaultsError::NotFound(path.to_path_buf()));
    }
    fs::remove_file(path).map_err(|source| DefaultsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders a record for display: env-contracted indented JSON, prefixed with
/// a note saying whether it reflects the configuration file or the
/// compiled-in values.
pub fn render(
    defaults: &SandboxDefaults,
    config_file: Option<&Path>,
) -> Result<String, DefaultsError> {
    let contracted = contract_env(defaults.clone());
    let header = match config_file {
        Some(path) => format!("# Configuration file: {}", path.display()),
        None => "# Internal values:".to_string(),
    };
    Ok(format!("{header}\n{}", to_pretty(&contracted)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = SandboxDefaults::factory();
        write_defaults(&path, &original).unwrap();
        let reloaded = read_defaults(&path).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn on_disk_form_is_contracted() {
        let Ok(home) = std::env::var("HOME") else { return };
        if home.is_empty() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        write_defaults(&path, &SandboxDefaults::factory()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("$HOME/sandboxes"));
        assert!(!text.contains(&format!("{home}/sandboxes")));
    }

    #[test]
    fn write_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("config.json");
        write_defaults(&path, &SandboxDefaults::factory()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn remove_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = remove_defaults(&path).unwrap_err();
        assert!(matches!(err, DefaultsError::NotFound(_)));
    }

    #[test]
    fn remove_deletes_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        write_defaults(&path, &SandboxDefaults::factory()).unwrap();
        remove_defaults(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn malformed_file_is_an_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_defaults(&path).unwrap_err();
        assert!(matches!(err, DefaultsError::Encoding(_)));
    }

    #[test]
    fn render_marks_internal_values() {
        let text = render(&SandboxDefaults::factory(), None).unwrap();
        assert!(text.starts_with("# Internal values:"));
    }

    #[test]
    fn render_marks_file_backed_values() {
        let text = render(
            &SandboxDefaults::factory(),
            Some(Path::new("/tmp/config.json")),
        )
        .unwrap();
        assert!(text.starts_with("# Configuration file: /tmp/config.json"));
    }
}
