use crate::error::{GateError, Result};
use crate::types::RecordKind;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GATE_DIR: &str = ".actiongate";
pub const RECORDS_DIR: &str = ".actiongate/records";
pub const CONFIG_FILE: &str = ".actiongate/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn kind_dir(root: &Path, kind: RecordKind) -> PathBuf {
    root.join(RECORDS_DIR).join(kind.as_str())
}

pub fn record_path(root: &Path, kind: RecordKind, name: &str) -> PathBuf {
    kind_dir(root, kind).join(format!("{name}.yaml"))
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap())
}

/// Record names double as file stems, so they must stay path-safe.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 140 || name.contains("..") || !name_re().is_match(name) {
        return Err(GateError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["CR-0001", "acme", "demo_site.1", "7"] {
            validate_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "-leading", "has space", "../escape", "a/b", "a..b"] {
            assert!(validate_name(name).is_err(), "expected invalid: {name}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.actiongate/config.yaml")
        );
        assert_eq!(
            record_path(root, RecordKind::DemoSite, "acme"),
            PathBuf::from("/tmp/proj/.actiongate/records/demo_site/acme.yaml")
        );
    }
}
