//! Named-field dispatch for the update pipeline.
//!
//! Each recognized field name maps to a typed setter that parses the textual
//! value and assigns it. Adding a field is one table entry plus the struct
//! field itself; an unknown name is a lookup failure, never a silent no-op.

use super::types::SandboxDefaults;
use super::DefaultsError;

type Setter = fn(&mut SandboxDefaults, &str) -> Result<(), DefaultsError>;

/// Recognized update keys and their setters, in record order. `timestamp` is
/// deliberately absent: it is informational and not caller-settable.
pub const FIELD_SETTERS: &[(&str, Setter)] = &[
    ("version", |d, v| {
        d.version = v.to_string();
        Ok(())
    }),
    ("sandbox-home", |d, v| {
        d.sandbox_home = v.to_string();
        Ok(())
    }),
    ("sandbox-binary", |d, v| {
        d.sandbox_binary = v.to_string();
        Ok(())
    }),
    ("use-sandbox-catalog", |d, v| {
        d.use_sandbox_catalog = parse_bool("use-sandbox-catalog", v)?;
        Ok(())
    }),
    ("log-sb-operations", |d, v| {
        d.log_sb_operations = parse_bool("log-sb-operations", v)?;
        Ok(())
    }),
    ("log-directory", |d, v| {
        d.log_directory = v.to_string();
        Ok(())
    }),
    ("master-slave-base-port", |d, v| {
        d.master_slave_base_port = parse_int("master-slave-base-port", v)?;
        Ok(())
    }),
    ("group-replication-base-port", |d, v| {
        d.group_replication_base_port = parse_int("group-replication-base-port", v)?;
        Ok(())
    }),
    ("group-replication-sp-base-port", |d, v| {
        d.group_replication_sp_base_port = parse_int("group-replication-sp-base-port", v)?;
        Ok(())
    }),
    ("fan-in-replication-base-port", |d, v| {
        d.fan_in_replication_base_port = parse_int("fan-in-replication-base-port", v)?;
        Ok(())
    }),
    ("all-masters-replication-base-port", |d, v| {
        d.all_masters_replication_base_port = parse_int("all-masters-replication-base-port", v)?;
        Ok(())
    }),
    ("multiple-base-port", |d, v| {
        d.multiple_base_port = parse_int("multiple-base-port", v)?;
        Ok(())
    }),
    ("group-port-delta", |d, v| {
        d.group_port_delta = parse_int("group-port-delta", v)?;
        Ok(())
    }),
    ("mysqlx-port-delta", |d, v| {
        d.mysqlx_port_delta = parse_int("mysqlx-port-delta", v)?;
        Ok(())
    }),
    ("master-name", |d, v| {
        d.master_name = v.to_string();
        Ok(())
    }),
    ("master-abbr", |d, v| {
        d.master_abbr = v.to_string();
        Ok(())
    }),
    ("node-prefix", |d, v| {
        d.node_prefix = v.to_string();
        Ok(())
    }),
    ("slave-prefix", |d, v| {
        d.slave_prefix = v.to_string();
        Ok(())
    }),
    ("slave-abbr", |d, v| {
        d.slave_abbr = v.to_string();
        Ok(())
    }),
    ("sandbox-prefix", |d, v| {
        d.sandbox_prefix = v.to_string();
        Ok(())
    }),
    ("master-slave-prefix", |d, v| {
        d.master_slave_prefix = v.to_string();
        Ok(())
    }),
    ("group-prefix", |d, v| {
        d.group_prefix = v.to_string();
        Ok(())
    }),
    ("group-sp-prefix", |d, v| {
        d.group_sp_prefix = v.to_string();
        Ok(())
    }),
    ("multiple-prefix", |d, v| {
        d.multiple_prefix = v.to_string();
        Ok(())
    }),
    ("fan-in-prefix", |d, v| {
        d.fan_in_prefix = v.to_string();
        Ok(())
    }),
    ("all-masters-prefix", |d, v| {
        d.all_masters_prefix = v.to_string();
        Ok(())
    }),
    ("reserved-ports", |d, v| {
        d.reserved_ports = parse_int_list("reserved-ports", v)?;
        Ok(())
    }),
];

/// Applies one named field change to `defaults`, parsing `value` into the
/// field's type. Unknown names fail; nothing is assigned on a parse failure.
pub fn apply(defaults: &mut SandboxDefaults, name: &str, value: &str) -> Result<(), DefaultsError> {
    let setter = FIELD_SETTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, setter)| setter)
        .ok_or_else(|| DefaultsError::UnknownField(name.to_string()))?;
    setter(defaults, value)
}

/// The update keys accepted by [`apply`], for help text.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    FIELD_SETTERS.iter().map(|(name, _)| *name)
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, DefaultsError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DefaultsError::Parse {
            field,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<u32, DefaultsError> {
    value.trim().parse().map_err(|_| DefaultsError::Parse {
        field,
        value: value.to_string(),
        reason: "expected an integer".to_string(),
    })
}

/// Parses a comma- or semicolon-delimited list of integers, as used by
/// `reserved-ports`. Blank segments are skipped.
fn parse_int_list(field: &'static str, value: &str) -> Result<Vec<u32>, DefaultsError> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_int(field, part))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_field_passes_through() {
        let mut d = SandboxDefaults::factory();
        apply(&mut d, "master-name", "primary").unwrap();
        assert_eq!(d.master_name, "primary");
    }

    #[test]
    fn integer_field_is_parsed() {
        let mut d = SandboxDefaults::factory();
        apply(&mut d, "multiple-base-port", "17000").unwrap();
        assert_eq!(d.multiple_base_port, 17_000);
    }

    #[test]
    fn boolean_field_accepts_common_spellings() {
        let mut d = SandboxDefaults::factory();
        for (text, expected) in [("true", true), ("NO", false), ("1", true), ("off", false)] {
            apply(&mut d, "use-sandbox-catalog", text).unwrap();
            assert_eq!(d.use_sandbox_catalog, expected);
        }
    }

    #[test]
    fn reserved_ports_parses_a_delimited_list() {
        let mut d = SandboxDefaults::factory();
        apply(&mut d, "reserved-ports", "4500, 4600;4700").unwrap();
        assert_eq!(d.reserved_ports, vec![4500, 4600, 4700]);
    }

    #[test]
    fn bad_integer_reports_the_field() {
        let mut d = SandboxDefaults::factory();
        let err = apply(&mut d, "group-port-delta", "lots").unwrap_err();
        assert!(matches!(
            err,
            DefaultsError::Parse {
                field: "group-port-delta",
                ..
            }
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut d = SandboxDefaults::factory();
        let err = apply(&mut d, "not-a-real-field", "x").unwrap_err();
        assert!(matches!(err, DefaultsError::UnknownField(_)));
    }

    #[test]
    fn timestamp_is_not_settable() {
        let mut d = SandboxDefaults::factory();
        assert!(matches!(
            apply(&mut d, "timestamp", "now").unwrap_err(),
            DefaultsError::UnknownField(_)
        ));
    }
}
