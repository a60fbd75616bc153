use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    ConversionRequest,
    DemoRequest,
    DemoSite,
}

impl RecordKind {
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::ConversionRequest,
            RecordKind::DemoRequest,
            RecordKind::DemoSite,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::ConversionRequest => "conversion_request",
            RecordKind::DemoRequest => "demo_request",
            RecordKind::DemoSite => "demo_site",
        }
    }

    /// Human-facing name, as shown in page titles and navigation targets.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::ConversionRequest => "Conversion Request",
            RecordKind::DemoRequest => "Demo Request",
            RecordKind::DemoSite => "Demo Site",
        }
    }

    /// The closed set of statuses a record of this kind may hold.
    pub fn statuses(self) -> &'static [Status] {
        match self {
            RecordKind::ConversionRequest => &[
                Status::Pending,
                Status::Approved,
                Status::Rejected,
                Status::InProgress,
                Status::Completed,
                Status::Failed,
            ],
            RecordKind::DemoRequest => &[
                Status::Pending,
                Status::Provisioning,
                Status::Active,
                Status::Failed,
            ],
            RecordKind::DemoSite => &[Status::Active, Status::Suspended, Status::Converted],
        }
    }

    /// Parse `raw` as a status known to this kind. Anything else is `None`.
    pub fn status(self, raw: &str) -> Option<Status> {
        Status::parse(raw).filter(|s| self.statuses().contains(s))
    }

    /// Status assigned to freshly created records.
    pub fn initial_status(self) -> Status {
        match self {
            RecordKind::ConversionRequest | RecordKind::DemoRequest => Status::Pending,
            RecordKind::DemoSite => Status::Active,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = crate::error::GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conversion_request" | "conversion-request" | "Conversion Request" => {
                Ok(RecordKind::ConversionRequest)
            }
            "demo_request" | "demo-request" | "Demo Request" => Ok(RecordKind::DemoRequest),
            "demo_site" | "demo-site" | "Demo Site" => Ok(RecordKind::DemoSite),
            _ => Err(crate::error::GateError::UnknownRecordKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Every status value used across record kinds. Records store the raw
/// string; this enum is what the rule tables match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Approved,
    Rejected,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Failed,
    Provisioning,
    Active,
    Suspended,
    Converted,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Failed => "Failed",
            Status::Provisioning => "Provisioning",
            Status::Active => "Active",
            Status::Suspended => "Suspended",
            Status::Converted => "Converted",
        }
    }

    /// Exact, case-sensitive match on the stored form.
    pub fn parse(raw: &str) -> Option<Status> {
        match raw {
            "Pending" => Some(Status::Pending),
            "Approved" => Some(Status::Approved),
            "Rejected" => Some(Status::Rejected),
            "In Progress" => Some(Status::InProgress),
            "Completed" => Some(Status::Completed),
            "Failed" => Some(Status::Failed),
            "Provisioning" => Some(Status::Provisioning),
            "Active" => Some(Status::Active),
            "Suspended" => Some(Status::Suspended),
            "Converted" => Some(Status::Converted),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IndicatorColor / NotifyLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorColor {
    Green,
    Red,
    Orange,
    Blue,
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorColor::Green => "green",
            IndicatorColor::Red => "red",
            IndicatorColor::Orange => "orange",
            IndicatorColor::Blue => "blue",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotifyLevel::Success => "success",
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
