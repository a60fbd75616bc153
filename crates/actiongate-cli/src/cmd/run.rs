use crate::output::{parse_pairs, print_json};
use crate::terminal::{TerminalNavigator, TerminalNotifier, TerminalPrompter};
use actiongate_core::config::Config;
use actiongate_core::host::Host;
use actiongate_core::procedures::LocalProcedures;
use actiongate_core::record::Record;
use actiongate_core::store::FileRecordStore;
use actiongate_core::types::RecordKind;
use actiongate_core::{ActionExecutor, ActionGate, ActionOutcome, GateError};
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub struct RunArgs {
    pub kind: String,
    pub name: String,
    pub action: String,
    pub yes: bool,
    pub inputs: Vec<String>,
    pub no_open: bool,
}

pub fn run(root: &Path, args: RunArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let kind = RecordKind::from_str(&args.kind)?;
    let record = Record::load(root, kind, &args.name)
        .with_context(|| format!("failed to load {kind} '{}'", args.name))?;
    let preset = parse_pairs(&args.inputs)?.into_iter().collect();

    let host = Host {
        procedures: Arc::new(LocalProcedures::new(root)),
        reloader: Arc::new(FileRecordStore::new(root)),
        prompter: Arc::new(TerminalPrompter::new(args.yes, preset)),
        navigator: Arc::new(TerminalNavigator::new(!args.no_open)),
        notifier: Arc::new(TerminalNotifier),
    };
    let executor = ActionExecutor::new(host, &config);
    let gate = ActionGate::new();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = match rt.block_on(executor.execute_named(&gate, &record, &args.action)) {
        Ok(outcome) => outcome,
        // The procedure already ran; only the refresh went wrong.
        Err(e @ GateError::ReloadFailed { .. }) => return Err(e.into()),
        Err(e) => {
            let action = &args.action;
            return Err(anyhow::Error::new(e).context(format!("action '{action}' failed")));
        }
    };

    if json {
        return print_json(&outcome);
    }

    match outcome {
        ActionOutcome::Cancelled => println!("Cancelled; nothing was sent."),
        ActionOutcome::AlreadyPending => println!("'{}' is already running.", args.action),
        ActionOutcome::Navigated => {}
        ActionOutcome::Completed { record, .. } => {
            match gate.indicator(&record) {
                Some(i) => println!("{}: {} ({})", record.name, record.status, i.color),
                None => println!("{}: {}", record.name, record.status),
            }
            let next: Vec<_> = gate
                .available_actions(&record)
                .into_iter()
                .map(|a| a.name)
                .collect();
            if !next.is_empty() {
                println!("Available: {}", next.join(", "));
            }
        }
    }
    Ok(())
}
