use crate::types::{IndicatorColor, RecordKind, Status};
use serde::{Deserialize, Serialize};

/// Presentational status badge. Never consulted for gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    pub color: IndicatorColor,
}

/// Badge for a raw status value, or `None` when the kind has no mapping for
/// it (unknown values included).
pub fn compute_indicator(kind: RecordKind, status: &str) -> Option<Indicator> {
    let status = kind.status(status)?;
    let color = match (kind, status) {
        (RecordKind::ConversionRequest, Status::Completed) => IndicatorColor::Green,
        (RecordKind::ConversionRequest, Status::Failed) => IndicatorColor::Red,
        (RecordKind::ConversionRequest, Status::InProgress) => IndicatorColor::Orange,
        (RecordKind::ConversionRequest, Status::Approved) => IndicatorColor::Blue,
        _ => return None,
    };
    Some(Indicator {
        label: status.as_str().to_string(),
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(status: &str) -> Option<(String, IndicatorColor)> {
        compute_indicator(RecordKind::ConversionRequest, status).map(|i| (i.label, i.color))
    }

    #[test]
    fn conversion_request_badges() {
        assert_eq!(badge("Completed"), Some(("Completed".into(), IndicatorColor::Green)));
        assert_eq!(badge("Failed"), Some(("Failed".into(), IndicatorColor::Red)));
        assert_eq!(
            badge("In Progress"),
            Some(("In Progress".into(), IndicatorColor::Orange))
        );
        assert_eq!(badge("Approved"), Some(("Approved".into(), IndicatorColor::Blue)));
    }

    #[test]
    fn unmapped_statuses_have_no_badge() {
        assert_eq!(badge("Pending"), None);
        assert_eq!(badge("Rejected"), None);
        assert_eq!(badge("Bogus"), None);
        assert_eq!(badge(""), None);
    }

    #[test]
    fn other_kinds_have_no_badges() {
        assert_eq!(compute_indicator(RecordKind::DemoRequest, "Failed"), None);
        assert_eq!(compute_indicator(RecordKind::DemoSite, "Active"), None);
    }
}
