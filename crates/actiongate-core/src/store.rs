use crate::error::Result;
use crate::host::RecordReloader;
use crate::record::Record;
use crate::types::RecordKind;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reloads records from the YAML files under a project root.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RecordReloader for FileRecordStore {
    async fn reload(&self, kind: RecordKind, name: &str) -> Result<Record> {
        Record::load(&self.root, kind, name)
    }
}
