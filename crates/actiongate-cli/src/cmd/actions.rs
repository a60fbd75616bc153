use crate::output::{print_json, print_table};
use actiongate_core::action::{ActionDescriptor, ActionEffect, Confirmation};
use actiongate_core::record::Record;
use actiongate_core::types::RecordKind;
use actiongate_core::ActionGate;
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;

pub fn run(root: &Path, kind: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let kind = RecordKind::from_str(kind)?;
    let record =
        Record::load(root, kind, name).with_context(|| format!("failed to load {kind} '{name}'"))?;
    let actions = ActionGate::new().available_actions(&record);

    if json {
        return print_json(&actions);
    }

    if actions.is_empty() {
        println!("No actions available ({} is '{}').", record.name, record.status);
        return Ok(());
    }

    let rows = actions.iter().map(row).collect();
    print_table(&["NAME", "LABEL", "GROUP", "CONFIRM", "EFFECT"], rows);
    Ok(())
}

fn row(action: &ActionDescriptor) -> Vec<String> {
    let confirm = match &action.confirmation {
        None => String::new(),
        Some(Confirmation::Confirm { .. }) => "confirm".to_string(),
        Some(Confirmation::Prompt { fields, .. }) => {
            let names: Vec<_> = fields.iter().map(|f| f.field_name.as_str()).collect();
            format!("prompt({})", names.join(", "))
        }
    };
    let effect = match &action.effect {
        ActionEffect::Invoke { procedure } => format!("invoke {procedure}"),
        ActionEffect::OpenUrl { url } => format!("open {url}"),
        ActionEffect::OpenRecord { kind, name } => format!("go to {kind} {name}"),
    };
    let mut label = action.label.clone();
    if action.style_hint.is_some() {
        label.push_str(" *");
    }
    vec![
        action.name.clone(),
        label,
        action.group.clone().unwrap_or_default(),
        confirm,
        effect,
    ]
}
