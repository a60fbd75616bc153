//! Recording stub collaborators shared by the unit tests.

use crate::action::InputField;
use crate::error::{GateError, Result};
use crate::host::{Host, Navigator, Notifier, Params, Prompter, RecordReloader, RemoteProcedures};
use crate::record::Record;
use crate::types::{NotifyLevel, RecordKind};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Everything the stubs observed, in call order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<String>>,
    invocations: Mutex<Vec<(String, Params)>>,
    notifications: Mutex<Vec<(String, NotifyLevel)>>,
}

impl Recorder {
    fn event(&self, e: String) {
        self.events.lock().unwrap().push(e);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn invocations(&self) -> Vec<(String, Params)> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(String, NotifyLevel)> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| e.starts_with("reload:"))
            .count()
    }
}

pub struct StubHost {
    pub recorder: Arc<Recorder>,
    pub release: Arc<Notify>,
    reloaded: Record,
    confirm: bool,
    answers: Option<Params>,
    fail: bool,
    fail_reload: bool,
    hold_first: bool,
}

impl StubHost {
    /// `reloaded` is what the reloader hands back after a successful call.
    pub fn new(reloaded: Record) -> Self {
        Self {
            recorder: Arc::new(Recorder::default()),
            release: Arc::new(Notify::new()),
            reloaded,
            confirm: true,
            answers: Some(Params::new()),
            fail: false,
            fail_reload: false,
            hold_first: false,
        }
    }

    pub fn declining(mut self) -> Self {
        self.confirm = false;
        self.answers = None;
        self
    }

    pub fn answering(mut self, values: &[(&str, &str)]) -> Self {
        self.answers = Some(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Invocations succeed but the follow-up reload errors.
    pub fn reload_failing(mut self) -> Self {
        self.fail_reload = true;
        self
    }

    /// The first invocation blocks until `release` is notified.
    pub fn held(mut self) -> Self {
        self.hold_first = true;
        self
    }

    pub fn host(&self) -> Host {
        let stub = Arc::new(Stub {
            recorder: Arc::clone(&self.recorder),
            release: Arc::clone(&self.release),
            reloaded: self.reloaded.clone(),
            confirm: self.confirm,
            answers: self.answers.clone(),
            fail: self.fail,
            fail_reload: self.fail_reload,
            hold_first: self.hold_first,
        });
        Host {
            procedures: stub.clone(),
            reloader: stub.clone(),
            prompter: stub.clone(),
            navigator: stub.clone(),
            notifier: stub,
        }
    }
}

struct Stub {
    recorder: Arc<Recorder>,
    release: Arc<Notify>,
    reloaded: Record,
    confirm: bool,
    answers: Option<Params>,
    fail: bool,
    fail_reload: bool,
    hold_first: bool,
}

#[async_trait]
impl RemoteProcedures for Stub {
    async fn invoke(&self, _record: &Record, procedure: &str, params: &Params) -> Result<Value> {
        let n = {
            let mut calls = self.recorder.invocations.lock().unwrap();
            calls.push((procedure.to_string(), params.clone()));
            calls.len()
        };
        self.recorder.event(format!("invoke:{procedure}"));
        if self.hold_first && n == 1 {
            self.release.notified().await;
        }
        if self.fail {
            return Err(GateError::RemoteProcedure {
                procedure: procedure.to_string(),
                message: "stubbed failure".into(),
            });
        }
        Ok(json!({ "status": "ok" }))
    }
}

#[async_trait]
impl RecordReloader for Stub {
    async fn reload(&self, kind: RecordKind, name: &str) -> Result<Record> {
        self.recorder.event(format!("reload:{name}"));
        if self.fail_reload {
            return Err(GateError::RecordNotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
        Ok(self.reloaded.clone())
    }
}

#[async_trait]
impl Prompter for Stub {
    async fn confirm(&self, _message: &str) -> bool {
        self.confirm
    }

    async fn prompt(&self, _title: &str, _fields: &[InputField]) -> Option<Params> {
        self.answers.clone()
    }
}

impl Navigator for Stub {
    fn open_external(&self, url: &str) -> Result<()> {
        self.recorder.event(format!("open:{url}"));
        Ok(())
    }

    fn navigate_to_record(&self, kind: RecordKind, name: &str) -> Result<()> {
        self.recorder.event(format!("navigate:{kind}/{name}"));
        Ok(())
    }
}

impl Notifier for Stub {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.recorder
            .notifications
            .lock()
            .unwrap()
            .push((message.to_string(), level));
    }
}
