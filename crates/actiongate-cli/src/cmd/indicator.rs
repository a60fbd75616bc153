use crate::output::print_json;
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
    let indicator = ActionGate::new().indicator(&record);

    if json {
        return print_json(&indicator);
    }
    if let Some(i) = indicator {
        println!("{} ({})", i.label, i.color);
    }
    Ok(())
}
