use crate::output::{parse_pairs, print_json, print_table};
use actiongate_core::config::Config;
use actiongate_core::record::{parse_field_value, Record};
use actiongate_core::types::RecordKind;
use actiongate_core::ActionGate;
use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum RecordSubcommand {
    /// Create a record
    Create {
        /// conversion_request, demo_request or demo_site
        kind: String,
        name: String,
        /// Initial status (default depends on the kind)
        #[arg(long)]
        status: Option<String>,
        /// Optional field as key=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Show a record with its indicator and available actions
    Show { kind: String, name: String },
    /// List records, optionally of one kind
    List { kind: Option<String> },
}

pub fn run(root: &Path, subcmd: RecordSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RecordSubcommand::Create {
            kind,
            name,
            status,
            fields,
        } => create(root, &kind, &name, status, &fields, json),
        RecordSubcommand::Show { kind, name } => show(root, &kind, &name, json),
        RecordSubcommand::List { kind } => list(root, kind.as_deref(), json),
    }
}

fn create(
    root: &Path,
    kind: &str,
    name: &str,
    status: Option<String>,
    fields: &[String],
    json: bool,
) -> anyhow::Result<()> {
    Config::load(root).context("failed to load config")?;
    let kind = RecordKind::from_str(kind)?;

    let mut record = Record::new(kind, name);
    if let Some(status) = status {
        if kind.status(&status).is_none() {
            tracing::warn!(%kind, %status, "status is not one of this kind's known values");
        }
        record = record.with_status(status);
    }
    for (key, value) in parse_pairs(fields)? {
        let value = parse_field_value(&key, &value);
        record = record.with_field(key, value);
    }

    let record = Record::create(root, record)
        .with_context(|| format!("failed to create {kind} '{name}'"))?;

    if json {
        print_json(&record)?;
    } else {
        println!("Created {} {} [{}]", kind.label(), record.name, record.status);
        println!("Next: actiongate actions {kind} {name}");
    }
    Ok(())
}

fn show(root: &Path, kind: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let kind = RecordKind::from_str(kind)?;
    let record =
        Record::load(root, kind, name).with_context(|| format!("failed to load {kind} '{name}'"))?;
    let gate = ActionGate::new();
    let indicator = gate.indicator(&record);
    let actions = gate.available_actions(&record);

    if json {
        return print_json(&serde_json::json!({
            "record": record,
            "indicator": indicator,
            "actions": actions,
        }));
    }

    println!("{}: {}", kind.label(), record.name);
    match indicator {
        Some(i) => println!("Status:  {} ({})", record.status, i.color),
        None => println!("Status:  {}", record.status),
    }
    for (key, value) in &record.fields {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("  {key}: {shown}");
    }
    if !actions.is_empty() {
        let labels: Vec<_> = actions.iter().map(|a| a.name.as_str()).collect();
        println!("Actions: {}", labels.join(", "));
    }
    if !record.log.is_empty() {
        println!("Log:");
        for entry in &record.log {
            println!("  [{}] {}", entry.at.format("%Y-%m-%d %H:%M:%S"), entry.message);
        }
    }
    Ok(())
}

fn list(root: &Path, kind: Option<&str>, json: bool) -> anyhow::Result<()> {
    let kinds = match kind {
        Some(k) => vec![RecordKind::from_str(k)?],
        None => RecordKind::all().to_vec(),
    };

    let mut records = Vec::new();
    for kind in kinds {
        records.extend(Record::list(root, kind).context("failed to list records")?);
    }

    if json {
        let summaries: Vec<_> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "kind": r.kind,
                    "name": r.name,
                    "status": r.status,
                })
            })
            .collect();
        return print_json(&summaries);
    }

    if records.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    let rows = records
        .iter()
        .map(|r| vec![r.kind.to_string(), r.name.clone(), r.status.clone()])
        .collect();
    print_table(&["KIND", "NAME", "STATUS"], rows);
    Ok(())
}
