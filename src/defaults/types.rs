//! The defaults record and its compiled-in factory values.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants;

/// The persistent defaults record governing sandbox provisioning.
///
/// Serialized as kebab-case JSON in the configuration file. Path fields are
/// stored on disk in `$HOME`/`$PWD` placeholder form and held in memory fully
/// expanded; see [`super::resolve`]. Fields must never be mutated directly on
/// the effective record — all changes go through
/// [`DefaultsStore::update`](super::DefaultsStore::update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SandboxDefaults {
    /// Version of the tool that produced this record; gates compatibility.
    pub version: String,
    /// Directory where sandboxes are deployed.
    pub sandbox_home: String,
    /// Directory holding the database server binaries.
    pub sandbox_binary: String,
    /// Whether to maintain a catalog of deployed sandboxes.
    pub use_sandbox_catalog: bool,
    /// Whether sandbox operations are logged.
    pub log_sb_operations: bool,
    /// Directory receiving operation logs.
    pub log_directory: String,
    /// Base port for single/replica deployments.
    pub master_slave_base_port: u32,
    /// Base port for group replication deployments.
    pub group_replication_base_port: u32,
    /// Base port for single-primary group replication deployments.
    pub group_replication_sp_base_port: u32,
    /// Base port for fan-in replication deployments.
    pub fan_in_replication_base_port: u32,
    /// Base port for all-masters replication deployments.
    pub all_masters_replication_base_port: u32,
    /// Base port for multiple-instance deployments.
    pub multiple_base_port: u32,
    /// Offset added to a node's port for group communication.
    pub group_port_delta: u32,
    /// Offset added to a node's port for the extended protocol.
    pub mysqlx_port_delta: u32,
    pub master_name: String,
    pub master_abbr: String,
    pub node_prefix: String,
    pub slave_prefix: String,
    pub slave_abbr: String,
    pub sandbox_prefix: String,
    pub master_slave_prefix: String,
    pub group_prefix: String,
    pub group_sp_prefix: String,
    pub multiple_prefix: String,
    pub fan_in_prefix: String,
    pub all_masters_prefix: String,
    /// Ports other tooling must not allocate. Not validated further here.
    pub reserved_ports: Vec<u32>,
    /// Last-modification marker, informational only.
    pub timestamp: String,
}

impl SandboxDefaults {
    /// Compiled-in factory record, built from the live environment.
    ///
    /// Used whenever no valid configuration file exists. Path fields are
    /// rooted at `$HOME`, already in expanded (literal) form.
    pub fn factory() -> Self {
        let home = std::env::var("HOME").unwrap_or_default();
        Self {
            version: constants::COMPATIBLE_VERSION.to_string(),
            sandbox_home: format!("{home}/sandboxes"),
            sandbox_binary: format!("{home}/opt/db"),
            use_sandbox_catalog: true,
            log_sb_operations: false,
            log_directory: format!("{home}/sandboxes/logs"),
            master_slave_base_port: 11_000,
            group_replication_base_port: 12_000,
            group_replication_sp_base_port: 13_000,
            fan_in_replication_base_port: 14_000,
            all_masters_replication_base_port: 15_000,
            multiple_base_port: 16_000,
            group_port_delta: 125,
            mysqlx_port_delta: 10_000,
            master_name: "master".to_string(),
            master_abbr: "m".to_string(),
            node_prefix: "node".to_string(),
            slave_prefix: "slave".to_string(),
            slave_abbr: "s".to_string(),
            sandbox_prefix: "msb_".to_string(),
            master_slave_prefix: "rsandbox_".to_string(),
            group_prefix: "group_msb_".to_string(),
            group_sp_prefix: "group_sp_msb_".to_string(),
            multiple_prefix: "multi_msb_".to_string(),
            fan_in_prefix: "fan_in_msb_".to_string(),
            all_masters_prefix: "all_masters_msb_".to_string(),
            reserved_ports: vec![1186, 3306, 33060],
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
