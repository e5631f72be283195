//! Environment-variable substitution for path fields.
//!
//! Path fields travel between two forms: placeholder form on disk
//! (`$HOME/sandboxes`) so a defaults file ports across machines and users,
//! and literal form in memory (`/home/alice/sandboxes`) so the rest of the
//! tool never sees a placeholder. [`expand_env`] runs after every file read,
//! [`contract_env`] before every file write or display. The two are a
//! lossless inverse pair for the recognized variables.

use super::types::SandboxDefaults;

/// Variables recognized for substitution. `HOME` comes first so a path lying
/// under both resolves against the home directory.
const ENV_VARS: [&str; 2] = ["HOME", "PWD"];

fn expand_str(s: &str, var: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => s.replace(&format!("${var}"), &value),
        _ => s.to_string(),
    }
}

fn contract_str(s: &str, var: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => s.replace(&value, &format!("${var}")),
        _ => s.to_string(),
    }
}

/// Replaces `$HOME`/`$PWD` placeholders in path fields with their current
/// literal values. Returns a transformed copy; fields without a placeholder
/// pass through unchanged.
pub fn expand_env(mut defaults: SandboxDefaults) -> SandboxDefaults {
    for var in ENV_VARS {
        defaults.sandbox_home = expand_str(&defaults.sandbox_home, var);
        defaults.sandbox_binary = expand_str(&defaults.sandbox_binary, var);
        defaults.log_directory = expand_str(&defaults.log_directory, var);
    }
    defaults
}

/// Replaces literal occurrences of the recognized variables' values in path
/// fields with their placeholder tokens. Returns a transformed copy.
pub fn contract_env(mut defaults: SandboxDefaults) -> SandboxDefaults {
    for var in ENV_VARS {
        defaults.sandbox_home = contract_str(&defaults.sandbox_home, var);
        defaults.sandbox_binary = contract_str(&defaults.sandbox_binary, var);
        defaults.log_directory = contract_str(&defaults.log_directory, var);
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Option<String> {
        std::env::var("HOME").ok().filter(|h| !h.is_empty())
    }

    #[test]
    fn expand_replaces_home_placeholder() {
        let Some(home) = home() else { return };
        let mut d = SandboxDefaults::factory();
        d.sandbox_home = "$HOME/sandboxes".to_string();
        let expanded = expand_env(d);
        assert_eq!(expanded.sandbox_home, format!("{home}/sandboxes"));
    }

    #[test]
    fn contract_replaces_literal_home() {
        let Some(home) = home() else { return };
        let mut d = SandboxDefaults::factory();
        d.sandbox_binary = format!("{home}/opt/db");
        let contracted = contract_env(d);
        assert_eq!(contracted.sandbox_binary, "$HOME/opt/db");
    }

    #[test]
    fn expand_and_contract_are_inverses() {
        if home().is_none() {
            return;
        }
        let mut d = SandboxDefaults::factory();
        d.sandbox_home = "$HOME/sandboxes".to_string();
        d.sandbox_binary = "$HOME/opt/db".to_string();
        d.log_directory = "$HOME/sandboxes/logs".to_string();
        let round_tripped = contract_env(expand_env(d.clone()));
        assert_eq!(round_tripped, d);
    }

    #[test]
    fn unrelated_paths_pass_through() {
        let mut d = SandboxDefaults::factory();
        d.sandbox_home = "/var/lib/sandboxes".to_string();
        d.sandbox_binary = "/usr/local/db".to_string();
        d.log_directory = "/var/log/suna".to_string();
        let expanded = expand_env(d.clone());
        assert_eq!(expanded, d);
        let contracted = contract_env(d.clone());
        assert_eq!(contracted, d);
    }
}
