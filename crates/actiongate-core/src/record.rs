use crate::error::{GateError, Result};
use crate::paths;
use crate::types::{RecordKind, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Well-known optional fields
// ---------------------------------------------------------------------------

pub const PRODUCTION_SITE_URL: &str = "production_site_url";
pub const BACKUP_URL: &str = "backup_url";
pub const SITE_URL: &str = "site_url";
pub const CONVERSION_REQUEST: &str = "conversion_request";
pub const CONVERTED_TO_PAID: &str = "converted_to_paid";

/// Identifier and URL fields. Their values are always stored as text.
const TEXT_FIELDS: &[&str] = &[PRODUCTION_SITE_URL, BACKUP_URL, SITE_URL, CONVERSION_REQUEST];

// ---------------------------------------------------------------------------
// LogEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A snapshot of one business record. The status is kept as the raw stored
/// string so that values outside the kind's enumeration survive a round trip
/// and simply gate nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(kind: RecordKind, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            kind,
            name: name.into(),
            status: kind.initial_status().as_str().to_string(),
            fields: BTreeMap::new(),
            log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The status, if it belongs to this record kind's enumeration.
    pub fn known_status(&self) -> Option<Status> {
        self.kind.status(&self.status)
    }

    pub fn has_status(&self, status: Status) -> bool {
        self.known_status() == Some(status)
    }

    /// A field's value as text. Numbers and booleans are rendered; missing,
    /// null, blank and structured values all read as absent.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// A check field. Accepts booleans, 0/1 and the usual truthy strings.
    pub fn flag(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => {
                let s = s.trim();
                s == "1" || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes")
            }
            _ => false,
        }
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status.as_str().to_string();
        self.updated_at = Utc::now();
    }

    pub fn append_log(&mut self, message: impl Into<String>) {
        let now = Utc::now();
        self.log.push(LogEntry {
            at: now,
            message: message.into(),
        });
        self.updated_at = now;
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(root: &Path, record: Record) -> Result<Self> {
        paths::validate_name(&record.name)?;
        if paths::record_path(root, record.kind, &record.name).exists() {
            return Err(GateError::RecordExists {
                kind: record.kind.to_string(),
                name: record.name,
            });
        }
        record.save(root)?;
        Ok(record)
    }

    pub fn load(root: &Path, kind: RecordKind, name: &str) -> Result<Self> {
        paths::validate_name(name)?;
        let path = paths::record_path(root, kind, name);
        if !path.exists() {
            return Err(GateError::RecordNotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
        let data = std::fs::read_to_string(&path)?;
        let record: Record = serde_yaml::from_str(&data)?;
        Ok(record)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::record_path(root, self.kind, &self.name);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn list(root: &Path, kind: RecordKind) -> Result<Vec<Self>> {
        let dir = paths::kind_dir(root, kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::load(root, kind, name) {
                Ok(r) => records.push(r),
                Err(GateError::RecordNotFound { .. } | GateError::InvalidName(_)) => {}
                Err(e) => return Err(e),
            }
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

/// Interpret a `key=value` pair from the command line. Identifier and URL
/// fields stay text; elsewhere booleans and integers become typed values.
pub fn parse_field_value(name: &str, raw: &str) -> Value {
    if TEXT_FIELDS.contains(&name) {
        return Value::String(raw.to_string());
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(raw.to_string()),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
