use crate::action::ActionDescriptor;
use crate::indicator::{compute_indicator, Indicator};
use crate::record::Record;
use crate::rules::rules_for;
use crate::types::RecordKind;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

pub struct EvalContext<'a> {
    pub record: &'a Record,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleClass {
    /// Fires on one or more status values.
    Status,
    /// Fires when an optional field is non-empty, whatever the status.
    Field,
    /// Status check combined with a field check.
    Compound,
}

/// A fn-pointer rule: predicate plus descriptor builder, no heap state.
pub struct Rule {
    pub id: &'static str,
    pub class: RuleClass,
    pub condition: fn(&EvalContext) -> bool,
    pub descriptor: fn(&EvalContext) -> ActionDescriptor,
}

// ---------------------------------------------------------------------------
// ActionGate
// ---------------------------------------------------------------------------

/// Maps a record snapshot to the actions it currently permits.
///
/// Unlike a first-match classifier, every rule in a kind's table is
/// evaluated and all matches are returned in table order: a record can
/// offer a status action and several link actions at once.
pub struct ActionGate {
    tables: BTreeMap<RecordKind, Vec<Rule>>,
}

impl Default for ActionGate {
    fn default() -> Self {
        let tables = RecordKind::all()
            .iter()
            .map(|&kind| (kind, rules_for(kind)))
            .collect();
        Self { tables }
    }
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule table for one record kind.
    pub fn with_rules(mut self, kind: RecordKind, rules: Vec<Rule>) -> Self {
        self.tables.insert(kind, rules);
        self
    }

    pub fn available_actions(&self, record: &Record) -> Vec<ActionDescriptor> {
        let ctx = EvalContext { record };
        let Some(rules) = self.tables.get(&record.kind) else {
            return Vec::new();
        };

        if record.known_status().is_none() {
            tracing::debug!(
                kind = %record.kind,
                name = %record.name,
                status = %record.status,
                "unknown status; only link actions can apply"
            );
        }

        rules
            .iter()
            .filter(|rule| {
                let hit = (rule.condition)(&ctx);
                tracing::trace!(rule = rule.id, class = ?rule.class, hit, "rule evaluated");
                hit
            })
            .map(|rule| (rule.descriptor)(&ctx))
            .collect()
    }

    /// Look up a currently available action by name.
    pub fn find_action(&self, record: &Record, name: &str) -> Option<ActionDescriptor> {
        self.available_actions(record)
            .into_iter()
            .find(|d| d.name == name)
    }

    pub fn indicator(&self, record: &Record) -> Option<Indicator> {
        compute_indicator(record.kind, &record.status)
    }
}

/// Evaluate the built-in rule tables against `record`.
pub fn compute_available_actions(record: &Record) -> Vec<ActionDescriptor> {
    ActionGate::new().available_actions(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SITE_URL;

    fn names(actions: &[ActionDescriptor]) -> Vec<&str> {
        actions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn custom_table_replaces_default() {
        let gate = ActionGate::new().with_rules(
            RecordKind::DemoRequest,
            vec![Rule {
                id: "always",
                class: RuleClass::Field,
                condition: |_| true,
                descriptor: |ctx| {
                    ActionDescriptor::invoke("ping", &format!("Ping {}", ctx.record.name), "ping")
                },
            }],
        );
        let rec = Record::new(RecordKind::DemoRequest, "acme").with_field(SITE_URL, "https://acme.demo");
        let actions = gate.available_actions(&rec);
        assert_eq!(names(&actions), ["ping"]);
        assert_eq!(actions[0].label, "Ping acme");
    }

    #[test]
    fn empty_table_gives_no_actions() {
        let gate = ActionGate::new().with_rules(RecordKind::DemoSite, Vec::new());
        let rec = Record::new(RecordKind::DemoSite, "acme");
        assert!(gate.available_actions(&rec).is_empty());
    }

    #[test]
    fn find_action_only_returns_available() {
        let gate = ActionGate::new();
        let rec = Record::new(RecordKind::ConversionRequest, "CR-1");
        assert!(gate.find_action(&rec, "approve").is_some());
        assert!(gate.find_action(&rec, "start_conversion").is_none());
    }

    #[test]
    fn descriptors_are_rebuilt_per_snapshot() {
        let gate = ActionGate::new();
        let pending = Record::new(RecordKind::ConversionRequest, "CR-1");
        let approved = pending.clone().with_status("Approved");
        assert_eq!(names(&gate.available_actions(&pending)), ["approve", "reject"]);
        assert_eq!(names(&gate.available_actions(&approved)), ["start_conversion"]);
        assert_eq!(names(&gate.available_actions(&pending)), ["approve", "reject"]);
    }
}
