//! Local stand-in for the server-side procedure registry.
//!
//! Each procedure enforces the same status guard as its server counterpart
//! and applies the resulting status change to the record on disk. Nothing
//! here provisions sites, moves money or sends mail; that work stays behind
//! the real remote interface.

use crate::error::{GateError, Result};
use crate::host::{Params, RemoteProcedures};
use crate::record::Record;
use crate::types::{RecordKind, Status};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::path::PathBuf;

pub type Procedure = fn(&mut Record, &Params) -> Result<Value>;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub fn lookup(kind: RecordKind, procedure: &str) -> Option<Procedure> {
    let f: Procedure = match (kind, procedure) {
        (RecordKind::ConversionRequest, "approve") => approve,
        (RecordKind::ConversionRequest, "reject") => reject,
        (RecordKind::ConversionRequest, "start_conversion") => start_conversion,
        (RecordKind::DemoRequest, "start_provisioning") => start_provisioning,
        (RecordKind::DemoSite, "send_conversion_link") => send_conversion_link,
        _ => return None,
    };
    Some(f)
}

/// Procedures backed by the YAML record files under `root`.
#[derive(Debug, Clone)]
pub struct LocalProcedures {
    root: PathBuf,
}

impl LocalProcedures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RemoteProcedures for LocalProcedures {
    async fn invoke(&self, record: &Record, procedure: &str, params: &Params) -> Result<Value> {
        let f = lookup(record.kind, procedure).ok_or_else(|| GateError::ProcedureNotFound {
            kind: record.kind.to_string(),
            procedure: procedure.to_string(),
        })?;

        // Guards run against the stored copy, not the caller's snapshot.
        let mut current = Record::load(&self.root, record.kind, &record.name)?;
        let result = f(&mut current, params)?;
        current.save(&self.root)?;

        tracing::info!(
            kind = %current.kind,
            record = %current.name,
            procedure,
            status = %current.status,
            "procedure applied"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Procedures
// ---------------------------------------------------------------------------

fn require(record: &Record, procedure: &str, allowed: &[Status]) -> Result<()> {
    match record.known_status() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(GateError::InvalidTransition {
            procedure: procedure.to_string(),
            status: record.status.clone(),
        }),
    }
}

fn approve(record: &mut Record, _params: &Params) -> Result<Value> {
    require(record, "approve", &[Status::Pending])?;
    record.set_status(Status::Approved);
    record.set_field("approved_on", Utc::now().to_rfc3339());
    record.append_log("Conversion request approved");
    Ok(json!({ "status": "approved" }))
}

fn reject(record: &mut Record, params: &Params) -> Result<Value> {
    require(record, "reject", &[Status::Pending])?;
    record.set_status(Status::Rejected);

    let reason = params
        .get("reason")
        .map(|r| r.trim())
        .filter(|r| !r.is_empty());
    if let Some(reason) = reason {
        let notes = record
            .field("admin_notes")
            .map(Cow::into_owned)
            .unwrap_or_default();
        record.set_field("admin_notes", format!("{notes}\nRejection reason: {reason}"));
    }
    record.append_log(format!(
        "Conversion request rejected: {}",
        reason.unwrap_or("No reason given")
    ));
    Ok(json!({ "status": "rejected" }))
}

fn start_conversion(record: &mut Record, _params: &Params) -> Result<Value> {
    require(record, "start_conversion", &[Status::Approved])?;
    record.set_status(Status::InProgress);
    record.set_field("conversion_started", Utc::now().to_rfc3339());
    record.append_log("Conversion started");
    Ok(json!({ "status": "started", "message": "Conversion process initiated" }))
}

fn start_provisioning(record: &mut Record, _params: &Params) -> Result<Value> {
    require(
        record,
        "start_provisioning",
        &[Status::Pending, Status::Failed],
    )?;
    record.set_status(Status::Provisioning);
    record.set_field("provisioning_started", Utc::now().to_rfc3339());
    record.append_log("Provisioning started");
    Ok(json!({ "status": "started", "message": "Provisioning initiated" }))
}

fn send_conversion_link(record: &mut Record, _params: &Params) -> Result<Value> {
    require(record, "send_conversion_link", &[Status::Active])?;
    let email = record.field("contact_email").map(Cow::into_owned);
    record.set_field("conversion_link_sent", Utc::now().to_rfc3339());
    record.append_log(match &email {
        Some(e) => format!("Conversion link sent to {e}"),
        None => "Conversion link sent".to_string(),
    });
    Ok(json!({ "status": "sent", "email": email }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
