//! Terminal-backed collaborators: stdin for confirmation and input, stderr
//! for navigation and notifications so `--json` stdout stays clean.

use actiongate_core::action::InputField;
use actiongate_core::host::{Navigator, Notifier, Params, Prompter};
use actiongate_core::types::{NotifyLevel, RecordKind};
use actiongate_core::{GateError, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

// ---------------------------------------------------------------------------
// TerminalPrompter
// ---------------------------------------------------------------------------

pub struct TerminalPrompter {
    assume_yes: bool,
    preset: Params,
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalPrompter {
    /// `assume_yes` answers confirmations without reading stdin; `preset`
    /// pre-fills prompt fields by name.
    pub fn new(assume_yes: bool, preset: Params) -> Self {
        Self {
            assume_yes,
            preset,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    /// Next line of stdin, or `None` on EOF / read error.
    async fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        let mut stdin = self.stdin.lock().await;
        match stdin.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        match self.read_line().await {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    async fn prompt(&self, title: &str, fields: &[InputField]) -> Option<Params> {
        let mut values = Params::new();
        let mut announced = false;
        for field in fields {
            if let Some(v) = self.preset.get(&field.field_name) {
                values.insert(field.field_name.clone(), v.clone());
                continue;
            }
            if self.assume_yes {
                values.insert(field.field_name.clone(), String::new());
                continue;
            }
            if !announced {
                eprintln!("{title}");
                announced = true;
            }
            eprint!("{}: ", field.label);
            let answer = self.read_line().await?;
            values.insert(field.field_name.clone(), answer);
        }
        Some(values)
    }
}

// ---------------------------------------------------------------------------
// TerminalNavigator
// ---------------------------------------------------------------------------

pub struct TerminalNavigator {
    launch: bool,
}

impl TerminalNavigator {
    pub fn new(launch: bool) -> Self {
        Self { launch }
    }
}

impl Navigator for TerminalNavigator {
    fn open_external(&self, url: &str) -> Result<()> {
        eprintln!("Opening {url}");
        if self.launch {
            open::that(url).map_err(|e| GateError::Navigation(format!("{url}: {e}")))?;
        }
        Ok(())
    }

    fn navigate_to_record(&self, kind: RecordKind, name: &str) -> Result<()> {
        eprintln!("{} {name}: actiongate record show {kind} {name}", kind.label());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TerminalNotifier
// ---------------------------------------------------------------------------

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        eprintln!("[{level}] {message}");
    }
}
