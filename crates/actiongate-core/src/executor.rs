use crate::action::{ActionDescriptor, ActionEffect, Confirmation};
use crate::classifier::ActionGate;
use crate::config::Config;
use crate::error::{GateError, Result};
use crate::host::{Host, Params};
use crate::record::Record;
use crate::types::{NotifyLevel, RecordKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// ActionOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The user declined the confirmation or dismissed the prompt.
    Cancelled,
    /// The same action on the same record is still in flight.
    AlreadyPending,
    /// A link action handed off to the navigator.
    Navigated,
    /// The procedure succeeded and the record was reloaded.
    Completed { result: Value, record: Record },
}

// ---------------------------------------------------------------------------
// Pending-activation guard
// ---------------------------------------------------------------------------

type PendingKey = (RecordKind, String, String);

struct PendingGuard<'a> {
    set: &'a Mutex<HashSet<PendingKey>>,
    key: PendingKey,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
    }
}

// ---------------------------------------------------------------------------
// ActionExecutor
// ---------------------------------------------------------------------------

/// Runs one action activation: confirm, invoke, reload, notify, in that
/// order and without retries.
pub struct ActionExecutor {
    host: Host,
    notify_on_success: bool,
    block_while_pending: bool,
    pending: Mutex<HashSet<PendingKey>>,
}

impl ActionExecutor {
    pub fn new(host: Host, config: &Config) -> Self {
        Self {
            host,
            notify_on_success: config.notify_on_success,
            block_while_pending: config.block_while_pending,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve `action` against the record's current actions and run it.
    pub async fn execute_named(
        &self,
        gate: &ActionGate,
        record: &Record,
        action: &str,
    ) -> Result<ActionOutcome> {
        let descriptor =
            gate.find_action(record, action)
                .ok_or_else(|| GateError::ActionUnavailable {
                    kind: record.kind.to_string(),
                    name: record.name.clone(),
                    action: action.to_string(),
                })?;
        self.execute(&descriptor, record).await
    }

    pub async fn execute(
        &self,
        descriptor: &ActionDescriptor,
        record: &Record,
    ) -> Result<ActionOutcome> {
        match &descriptor.effect {
            ActionEffect::OpenUrl { url } => {
                self.host.navigator.open_external(url)?;
                Ok(ActionOutcome::Navigated)
            }
            ActionEffect::OpenRecord { kind, name } => {
                self.host.navigator.navigate_to_record(*kind, name)?;
                Ok(ActionOutcome::Navigated)
            }
            ActionEffect::Invoke { procedure } => {
                let Some(_guard) = self.begin(record, descriptor) else {
                    tracing::debug!(
                        action = %descriptor.name,
                        record = %record.name,
                        "activation ignored; previous call still pending"
                    );
                    return Ok(ActionOutcome::AlreadyPending);
                };
                self.invoke(descriptor, procedure, record).await
            }
        }
    }

    fn begin(&self, record: &Record, descriptor: &ActionDescriptor) -> Option<PendingGuard<'_>> {
        let key = (record.kind, record.name.clone(), descriptor.name.clone());
        let mut set = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(key.clone()) && self.block_while_pending {
            return None;
        }
        drop(set);
        Some(PendingGuard {
            set: &self.pending,
            key,
        })
    }

    async fn invoke(
        &self,
        descriptor: &ActionDescriptor,
        procedure: &str,
        record: &Record,
    ) -> Result<ActionOutcome> {
        let params = match &descriptor.confirmation {
            None => Params::new(),
            Some(Confirmation::Confirm { message }) => {
                if !self.host.prompter.confirm(message).await {
                    return Ok(ActionOutcome::Cancelled);
                }
                Params::new()
            }
            Some(Confirmation::Prompt { title, fields }) => {
                match self.host.prompter.prompt(title, fields).await {
                    Some(values) => values,
                    None => return Ok(ActionOutcome::Cancelled),
                }
            }
        };

        tracing::info!(
            kind = %record.kind,
            record = %record.name,
            procedure,
            "invoking remote procedure"
        );
        let result = match self.host.procedures.invoke(record, procedure, &params).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(procedure, error = %e, "remote procedure failed; record left as is");
                return Err(e);
            }
        };

        let reloaded = self
            .host
            .reloader
            .reload(record.kind, &record.name)
            .await
            .map_err(|e| GateError::ReloadFailed {
                procedure: procedure.to_string(),
                source: Box::new(e),
            })?;
        tracing::info!(
            record = %reloaded.name,
            status = %reloaded.status,
            "record reloaded"
        );

        if self.notify_on_success {
            if let Some(ref msg) = descriptor.success_message {
                self.host.notifier.notify(msg, NotifyLevel::Success);
            }
        }

        Ok(ActionOutcome::Completed {
            result,
            record: reloaded,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
