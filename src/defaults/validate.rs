//! Validation of a candidate defaults record.
//!
//! Validation is a pure decision: it never mutates its input and never
//! terminates the process. Callers decide how to react to a failure. Four
//! checks run in sequence — numeric ranges, pairwise conflicts, empty
//! strings, version compatibility — and all must pass.

use std::fmt;

use crate::constants;

use super::resolve::contract_env;
use super::types::SandboxDefaults;

/// A single reason a record was rejected.
///
/// Range failures are collected per field; conflict and emptiness failures
/// carry a snapshot of the whole record (env-contracted) for diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    Conflict {
        record: Box<SandboxDefaults>,
    },
    EmptyFields {
        record: Box<SandboxDefaults>,
    },
    IncompatibleVersion {
        found: String,
        required: &'static str,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "value {field} ({value}) must be between {min} and {max}"
            ),
            ValidationIssue::Conflict { record } => {
                write!(f, "conflicts found in defaults values:\n{}", render(record))
            }
            ValidationIssue::EmptyFields { record } => write!(
                f,
                "one or more empty values found in defaults:\n{}",
                render(record)
            ),
            ValidationIssue::IncompatibleVersion { found, required } => write!(
                f,
                "provided defaults are for version {found}. Current version is {required}"
            ),
        }
    }
}

fn render(record: &SandboxDefaults) -> String {
    super::persist::to_pretty(record).unwrap_or_else(|_| format!("{record:#?}"))
}

/// Checks whether a candidate record is safe to become effective.
///
/// Returns every failing range check before short-circuiting the remaining
/// checks; conflict, emptiness, and version failures each yield a single
/// issue. `Ok(())` means the record may be committed.
pub fn validate(nd: &SandboxDefaults) -> Result<(), Vec<ValidationIssue>> {
    let ranges: [(&'static str, u32, u32, u32); 8] = [
        (
            "master-slave-base-port",
            nd.master_slave_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "group-replication-base-port",
            nd.group_replication_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "group-replication-sp-base-port",
            nd.group_replication_sp_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "multiple-base-port",
            nd.multiple_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "fan-in-replication-base-port",
            nd.fan_in_replication_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "all-masters-replication-base-port",
            nd.all_masters_replication_base_port,
            constants::MIN_PORT_VALUE,
            constants::MAX_PORT_VALUE,
        ),
        (
            "group-port-delta",
            nd.group_port_delta,
            constants::GROUP_PORT_DELTA_MIN,
            constants::GROUP_PORT_DELTA_MAX,
        ),
        (
            "mysqlx-port-delta",
            nd.mysqlx_port_delta,
            constants::MYSQLX_PORT_DELTA_MIN,
            constants::MYSQLX_PORT_DELTA_MAX,
        ),
    ];
    let range_issues: Vec<ValidationIssue> = ranges
        .into_iter()
        .filter(|(_, value, min, max)| value < min || value > max)
        .map(|(field, value, min, max)| ValidationIssue::OutOfRange {
            field,
            value,
            min,
            max,
        })
        .collect();
    if !range_issues.is_empty() {
        return Err(range_issues);
    }

    // The multiple-instance topology must not collide with any named topology.
    let no_conflicts = nd.multiple_base_port != nd.group_replication_sp_base_port
        && nd.multiple_base_port != nd.group_replication_base_port
        && nd.multiple_base_port != nd.master_slave_base_port
        && nd.multiple_base_port != nd.fan_in_replication_base_port
        && nd.multiple_base_port != nd.all_masters_replication_base_port
        && nd.multiple_prefix != nd.group_sp_prefix
        && nd.multiple_prefix != nd.group_prefix
        && nd.multiple_prefix != nd.master_slave_prefix
        && nd.multiple_prefix != nd.sandbox_prefix
        && nd.multiple_prefix != nd.fan_in_prefix
        && nd.multiple_prefix != nd.all_masters_prefix
        && nd.master_abbr != nd.slave_abbr
        && nd.sandbox_home != nd.sandbox_binary;
    if !no_conflicts {
        return Err(vec![ValidationIssue::Conflict {
            record: Box::new(contract_env(nd.clone())),
        }]);
    }

    let all_present = !nd.sandbox_prefix.is_empty()
        && !nd.master_slave_prefix.is_empty()
        && !nd.master_name.is_empty()
        && !nd.master_abbr.is_empty()
        && !nd.node_prefix.is_empty()
        && !nd.slave_prefix.is_empty()
        && !nd.slave_abbr.is_empty()
        && !nd.group_prefix.is_empty()
        && !nd.group_sp_prefix.is_empty()
        && !nd.multiple_prefix.is_empty()
        && !nd.fan_in_prefix.is_empty()
        && !nd.all_masters_prefix.is_empty()
        && !nd.sandbox_home.is_empty()
        && !nd.sandbox_binary.is_empty()
        && !nd.log_directory.is_empty();
    if !all_present {
        return Err(vec![ValidationIssue::EmptyFields {
            record: Box::new(contract_env(nd.clone())),
        }]);
    }

    if !version_at_least(&nd.version, constants::COMPATIBLE_VERSION) {
        return Err(vec![ValidationIssue::IncompatibleVersion {
            found: nd.version.clone(),
            required: constants::COMPATIBLE_VERSION,
        }]);
    }
    Ok(())
}

/// Parses a dotted version string into its numeric components.
/// Returns `None` on any non-numeric component.
fn version_to_list(version: &str) -> Option<Vec<u32>> {
    version.split('.').map(|part| part.parse().ok()).collect()
}

/// True when `candidate` parses and compares component-wise greater than or
/// equal to `required`. Unparseable versions never pass.
pub(super) fn version_at_least(candidate: &str, required: &str) -> bool {
    match (version_to_list(candidate), version_to_list(required)) {
        (Some(c), Some(r)) => c >= r,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SandboxDefaults {
        SandboxDefaults::factory()
    }

    #[test]
    fn port_window_boundaries() {
        let mut d = base();
        d.master_slave_base_port = 10_999;
        assert!(validate(&d).is_err());
        d.master_slave_base_port = 11_000;
        assert!(validate(&d).is_ok());
        d.master_slave_base_port = 30_000;
        assert!(validate(&d).is_ok());
        d.master_slave_base_port = 30_001;
        assert!(validate(&d).is_err());
    }

    #[test]
    fn all_range_failures_reported_together() {
        let mut d = base();
        d.master_slave_base_port = 1;
        d.group_port_delta = 500;
        let issues = validate(&d).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| matches!(i, ValidationIssue::OutOfRange { .. })));
    }

    #[test]
    fn mysqlx_port_delta_participates_in_the_decision() {
        let mut d = base();
        d.mysqlx_port_delta = 1_999;
        let issues = validate(&d).unwrap_err();
        assert!(matches!(
            issues.as_slice(),
            [ValidationIssue::OutOfRange {
                field: "mysqlx-port-delta",
                ..
            }]
        ));
    }

    #[test]
    fn multiple_base_port_collision_is_a_conflict() {
        let mut d = base();
        d.multiple_base_port = d.group_replication_base_port;
        let issues = validate(&d).unwrap_err();
        assert!(matches!(
            issues.as_slice(),
            [ValidationIssue::Conflict { .. }]
        ));
    }

    #[test]
    fn conflict_diagnostic_uses_the_display_format() {
        let mut d = base();
        d.multiple_base_port = d.master_slave_base_port;
        let issues = validate(&d).unwrap_err();
        let text = issues[0].to_string();
        // Same tab-indented rendering as `defaults show` and the on-disk form.
        assert!(text.contains("\n\t\"version\""));
    }

    #[test]
    fn identical_sandbox_directories_conflict() {
        let mut d = base();
        d.sandbox_binary = d.sandbox_home.clone();
        assert!(validate(&d).is_err());
    }

    #[test]
    fn matching_role_abbreviations_conflict() {
        let mut d = base();
        d.slave_abbr = d.master_abbr.clone();
        assert!(validate(&d).is_err());
    }

    #[test]
    fn empty_prefix_rejected() {
        let mut d = base();
        d.node_prefix = String::new();
        let issues = validate(&d).unwrap_err();
        assert!(matches!(
            issues.as_slice(),
            [ValidationIssue::EmptyFields { .. }]
        ));
    }

    #[test]
    fn version_gate() {
        let mut d = base();
        d.version = "0.0.1".to_string();
        let issues = validate(&d).unwrap_err();
        assert!(matches!(
            issues.as_slice(),
            [ValidationIssue::IncompatibleVersion { .. }]
        ));
        d.version = "1.60.0".to_string();
        assert!(validate(&d).is_ok());
        d.version = "2.0.0".to_string();
        assert!(validate(&d).is_ok());
    }

    #[test]
    fn version_comparison_is_numeric_not_lexical() {
        assert!(version_at_least("1.100.0", "1.60.0"));
        assert!(!version_at_least("1.9.0", "1.60.0"));
        assert!(!version_at_least("not-a-version", "1.60.0"));
    }
}
