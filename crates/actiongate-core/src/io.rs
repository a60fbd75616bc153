use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory,
/// so a reader never observes a half-written record.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records/demo_site/acme.yaml");
        atomic_write(&path, b"status: Active").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "status: Active");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.yaml");
        atomic_write(&path, b"status: Pending").unwrap();
        atomic_write(&path, b"status: Approved").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "status: Approved");
    }

    #[test]
    fn write_if_missing_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(write_if_missing(&path, b"first").unwrap());
        assert!(!write_if_missing(&path, b"second").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }
}
