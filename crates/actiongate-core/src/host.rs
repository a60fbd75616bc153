//! Collaborator interfaces the gate consumes. The embedding application
//! supplies implementations; the gate never talks to storage, transport or
//! the user directly.

use crate::action::InputField;
use crate::error::Result;
use crate::record::Record;
use crate::types::{NotifyLevel, RecordKind};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Procedure parameters, keyed by input field name.
pub type Params = BTreeMap<String, String>;

/// Named server-side procedures, invoked against one record.
#[async_trait]
pub trait RemoteProcedures: Send + Sync {
    /// Unknown names fail with [`GateError::ProcedureNotFound`](crate::GateError::ProcedureNotFound).
    async fn invoke(&self, record: &Record, procedure: &str, params: &Params) -> Result<Value>;
}

/// Re-fetches the authoritative copy of a record.
#[async_trait]
pub trait RecordReloader: Send + Sync {
    async fn reload(&self, kind: RecordKind, name: &str) -> Result<Record>;
}

#[async_trait]
pub trait Prompter: Send + Sync {
    /// `false` when the user declines or dismisses.
    async fn confirm(&self, message: &str) -> bool;

    /// `None` when the user cancels.
    async fn prompt(&self, title: &str, fields: &[InputField]) -> Option<Params>;
}

pub trait Navigator: Send + Sync {
    fn open_external(&self, url: &str) -> Result<()>;
    fn navigate_to_record(&self, kind: RecordKind, name: &str) -> Result<()>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// The full set of collaborators handed to an [`ActionExecutor`](crate::executor::ActionExecutor).
#[derive(Clone)]
pub struct Host {
    pub procedures: Arc<dyn RemoteProcedures>,
    pub reloader: Arc<dyn RecordReloader>,
    pub prompter: Arc<dyn Prompter>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}
