use crate::action::{ActionDescriptor, InputField, InputKind};
use crate::classifier::{EvalContext, Rule, RuleClass};
use crate::record::{BACKUP_URL, CONVERSION_REQUEST, CONVERTED_TO_PAID, PRODUCTION_SITE_URL, SITE_URL};
use crate::types::{RecordKind, Status};
use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Helper macro for concise rule definitions
// ---------------------------------------------------------------------------

macro_rules! rule {
    (
        id: $id:expr,
        class: $class:expr,
        condition: $cond:expr,
        descriptor: $desc:expr
    ) => {
        Rule {
            id: $id,
            class: $class,
            condition: $cond,
            descriptor: $desc,
        }
    };
}

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn status_in(ctx: &EvalContext, statuses: &[Status]) -> bool {
    ctx.record
        .known_status()
        .map(|s| statuses.contains(&s))
        .unwrap_or(false)
}

fn has_field(ctx: &EvalContext, name: &str) -> bool {
    ctx.record.field(name).is_some()
}

fn field_value<'a>(ctx: &EvalContext<'a>, name: &str) -> Cow<'a, str> {
    ctx.record.field(name).unwrap_or_default()
}

fn open_production_site() -> Rule {
    rule! {
        id: "open_production_site",
        class: RuleClass::Field,
        condition: |ctx| has_field(ctx, PRODUCTION_SITE_URL),
        descriptor: |ctx| ActionDescriptor::open_url(
            "open_production_site",
            "Open Production Site",
            &field_value(ctx, PRODUCTION_SITE_URL),
        )
    }
}

// ---------------------------------------------------------------------------
// Per-kind tables (display-ordered)
// ---------------------------------------------------------------------------

pub fn conversion_request_rules() -> Vec<Rule> {
    vec![
        rule! {
            id: "approve",
            class: RuleClass::Status,
            condition: |ctx| status_in(ctx, &[Status::Pending]),
            descriptor: |_| ActionDescriptor::invoke("approve", "Approve", "approve")
                .in_group("Actions")
                .confirm("Approve this conversion request?")
        },
        rule! {
            id: "reject",
            class: RuleClass::Status,
            condition: |ctx| status_in(ctx, &[Status::Pending]),
            descriptor: |_| ActionDescriptor::invoke("reject", "Reject", "reject")
                .in_group("Actions")
                .prompt(
                    "Reject Conversion Request",
                    vec![InputField::new("reason", "Rejection Reason", InputKind::SmallText)],
                )
        },
        rule! {
            id: "start_conversion",
            class: RuleClass::Status,
            condition: |ctx| status_in(ctx, &[Status::Approved]),
            descriptor: |_| ActionDescriptor::invoke("start_conversion", "Start Conversion", "start_conversion")
                .confirm("Start the conversion process? This will begin provisioning.")
                .primary()
        },
        open_production_site(),
        rule! {
            id: "download_backup",
            class: RuleClass::Field,
            condition: |ctx| has_field(ctx, BACKUP_URL),
            descriptor: |ctx| ActionDescriptor::open_url(
                "download_backup",
                "Download Backup",
                &field_value(ctx, BACKUP_URL),
            )
        },
    ]
}

pub fn demo_request_rules() -> Vec<Rule> {
    vec![
        rule! {
            id: "start_provisioning",
            class: RuleClass::Status,
            condition: |ctx| status_in(ctx, &[Status::Pending, Status::Failed]),
            descriptor: |_| ActionDescriptor::invoke("start_provisioning", "Start Provisioning", "start_provisioning")
                .on_success("Provisioning started")
        },
        rule! {
            id: "open_demo_site",
            class: RuleClass::Field,
            condition: |ctx| has_field(ctx, SITE_URL),
            descriptor: |ctx| ActionDescriptor::open_url(
                "open_demo_site",
                "Open Demo Site",
                &field_value(ctx, SITE_URL),
            )
        },
    ]
}

pub fn demo_site_rules() -> Vec<Rule> {
    vec![
        rule! {
            id: "send_conversion_link",
            class: RuleClass::Compound,
            condition: |ctx| status_in(ctx, &[Status::Active]) && !ctx.record.flag(CONVERTED_TO_PAID),
            descriptor: |_| ActionDescriptor::invoke("send_conversion_link", "Send Conversion Link", "send_conversion_link")
                .confirm("Send a conversion link to the customer?")
                .primary()
        },
        rule! {
            id: "view_conversion",
            class: RuleClass::Field,
            condition: |ctx| has_field(ctx, CONVERSION_REQUEST),
            descriptor: |ctx| ActionDescriptor::open_record(
                "view_conversion",
                "View Conversion",
                RecordKind::ConversionRequest,
                &field_value(ctx, CONVERSION_REQUEST),
            )
        },
        open_production_site(),
    ]
}

pub fn rules_for(kind: RecordKind) -> Vec<Rule> {
    match kind {
        RecordKind::ConversionRequest => conversion_request_rules(),
        RecordKind::DemoRequest => demo_request_rules(),
        RecordKind::DemoSite => demo_site_rules(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionEffect, Confirmation, StyleHint};
    use crate::classifier::compute_available_actions;
    use crate::record::{parse_field_value, Record};

    fn action_names(record: &Record) -> Vec<String> {
        compute_available_actions(record)
            .into_iter()
            .map(|a| a.name)
            .collect()
    }

    fn conversion(status: &str) -> Record {
        Record::new(RecordKind::ConversionRequest, "CR-0001").with_status(status)
    }

    fn site(status: &str, converted: bool) -> Record {
        Record::new(RecordKind::DemoSite, "acme")
            .with_status(status)
            .with_field(CONVERTED_TO_PAID, converted)
    }

    #[test]
    fn pending_conversion_gives_approve_and_reject() {
        assert_eq!(action_names(&conversion("Pending")), ["approve", "reject"]);
    }

    #[test]
    fn approved_conversion_gives_start_conversion() {
        let names = action_names(&conversion("Approved"));
        assert_eq!(names, ["start_conversion"]);

        let start = &compute_available_actions(&conversion("Approved"))[0];
        assert_eq!(start.style_hint, Some(StyleHint::Primary));
        assert_eq!(start.remote_procedure(), Some("start_conversion"));
    }

    #[test]
    fn terminal_conversion_statuses_have_no_primary_actions() {
        for status in ["Completed", "Failed", "Rejected", "In Progress"] {
            assert!(action_names(&conversion(status)).is_empty(), "{status}");
        }
    }

    #[test]
    fn production_site_link_ignores_status() {
        for status in ["Pending", "Approved", "Completed", "Nonsense"] {
            let rec = conversion(status).with_field(PRODUCTION_SITE_URL, "https://acme.example.com");
            let names = action_names(&rec);
            assert!(names.contains(&"open_production_site".to_string()), "{status}");
        }
        let rec = conversion("Completed").with_field(PRODUCTION_SITE_URL, "");
        assert!(action_names(&rec).is_empty());
    }

    #[test]
    fn link_actions_union_with_status_actions() {
        let rec = conversion("Pending")
            .with_field(PRODUCTION_SITE_URL, "https://acme.example.com")
            .with_field(BACKUP_URL, "https://files.example.com/acme.tgz");
        assert_eq!(
            action_names(&rec),
            ["approve", "reject", "open_production_site", "download_backup"]
        );
        let backup = compute_available_actions(&rec).pop().unwrap();
        assert_eq!(
            backup.effect,
            ActionEffect::OpenUrl {
                url: "https://files.example.com/acme.tgz".into()
            }
        );
    }

    #[test]
    fn unknown_status_keeps_link_actions_only() {
        let rec = Record::new(RecordKind::DemoRequest, "acme")
            .with_status("Archived")
            .with_field(SITE_URL, "https://acme.demo");
        assert_eq!(action_names(&rec), ["open_demo_site"]);
    }

    #[test]
    fn reject_prompts_for_reason() {
        let reject = compute_available_actions(&conversion("Pending"))
            .into_iter()
            .find(|a| a.name == "reject")
            .unwrap();
        let Some(Confirmation::Prompt { title, fields }) = reject.confirmation else {
            panic!("expected prompt")
        };
        assert_eq!(title, "Reject Conversion Request");
        assert_eq!(fields[0].field_name, "reason");
        assert_eq!(fields[0].input_kind, InputKind::SmallText);
    }

    #[test]
    fn start_provisioning_on_pending_or_failed() {
        for (status, expected) in [
            ("Pending", true),
            ("Failed", true),
            ("Provisioning", false),
            ("Active", false),
        ] {
            let rec = Record::new(RecordKind::DemoRequest, "acme").with_status(status);
            assert_eq!(
                action_names(&rec).contains(&"start_provisioning".to_string()),
                expected,
                "{status}"
            );
        }
    }

    #[test]
    fn start_provisioning_has_no_confirmation_but_notifies() {
        let rec = Record::new(RecordKind::DemoRequest, "acme");
        let start = &compute_available_actions(&rec)[0];
        assert!(!start.requires_confirmation());
        assert_eq!(start.success_message.as_deref(), Some("Provisioning started"));
    }

    #[test]
    fn send_conversion_link_requires_active_and_unconverted() {
        assert_eq!(action_names(&site("Active", false)), ["send_conversion_link"]);
        assert!(action_names(&site("Active", true)).is_empty());
        assert!(action_names(&site("Suspended", false)).is_empty());
        assert!(action_names(&site("Converted", true)).is_empty());
    }

    #[test]
    fn demo_site_links_to_conversion_record() {
        let rec = site("Converted", true)
            .with_field(CONVERSION_REQUEST, "CR-0001")
            .with_field(PRODUCTION_SITE_URL, "https://acme.example.com");
        let actions = compute_available_actions(&rec);
        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0].effect,
            ActionEffect::OpenRecord {
                kind: RecordKind::ConversionRequest,
                name: "CR-0001".into()
            }
        );
        assert_eq!(actions[1].name, "open_production_site");
    }

    #[test]
    fn numeric_link_values_still_enable_links() {
        let typed = site("Converted", true).with_field(CONVERSION_REQUEST, 42);
        let actions = compute_available_actions(&typed);
        assert_eq!(
            actions[0].effect,
            ActionEffect::OpenRecord {
                kind: RecordKind::ConversionRequest,
                name: "42".into()
            }
        );

        let parsed = site("Converted", true)
            .with_field(CONVERSION_REQUEST, parse_field_value(CONVERSION_REQUEST, "0042"));
        let actions = compute_available_actions(&parsed);
        assert_eq!(
            actions[0].effect,
            ActionEffect::OpenRecord {
                kind: RecordKind::ConversionRequest,
                name: "0042".into()
            }
        );
    }

    #[test]
    fn rule_ids_match_descriptor_names() {
        for kind in RecordKind::all() {
            for rule in rules_for(*kind) {
                let rec = Record::new(*kind, "x");
                let ctx = EvalContext { record: &rec };
                assert_eq!((rule.descriptor)(&ctx).name, rule.id);
            }
        }
    }
}
