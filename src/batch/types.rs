//! Data types for batch runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One accumulated result row. `serial` is 1-based and contiguous in
/// insertion order immediately after any run or reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResultRow {
    pub serial: u32,
    pub image_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Lifecycle phase of a batch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl BatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "running" => Some(Self::Running),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification emitted during a batch run.
///
/// `NoCoordinates` and `InputError` are status-only: they consume no serial
/// and add no result row. Delivery is advisory; no correctness property
/// depends on a consumer receiving these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BatchEvent {
    Started {
        run_id: String,
        total: u32,
    },
    RowAdded {
        row: BatchResultRow,
    },
    NoCoordinates {
        image_id: String,
    },
    InputError {
        image_id: String,
        message: String,
    },
    Progress {
        completed: u32,
        total: u32,
        current_image: String,
    },
    Completed {
        rows_added: u32,
        duration_ms: u64,
    },
    Cancelled {
        completed: u32,
        total: u32,
    },
}

/// Totals for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub run_id: String,
    pub images_processed: u32,
    pub images_failed: u32,
    pub rows_added: u32,
    pub duration_ms: u64,
    pub cancelled: bool,
    pub errors: Vec<String>,
}

impl BatchSummary {
    pub fn empty(run_id: String) -> Self {
        Self {
            run_id,
            images_processed: 0,
            images_failed: 0,
            rows_added: 0,
            duration_ms: 0,
            cancelled: false,
            errors: Vec::new(),
        }
    }
}

pub fn new_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Per-input diagnostics carried on status notifications are clipped to
/// this many characters.
pub const DIAGNOSTIC_MAX_CHARS: usize = 80;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_roundtrip() {
        for phase in [
            BatchPhase::Idle,
            BatchPhase::Running,
            BatchPhase::Paused,
            BatchPhase::Completed,
            BatchPhase::Cancelled,
        ] {
            assert_eq!(BatchPhase::from_str(phase.as_str()), Some(phase));
        }
    }

    #[test]
    fn phase_from_invalid() {
        assert_eq!(BatchPhase::from_str("unknown"), None);
        assert_eq!(BatchPhase::from_str(""), None);
    }

    #[test]
    fn phase_default_is_idle() {
        assert_eq!(BatchPhase::default(), BatchPhase::Idle);
    }

    #[test]
    fn event_serde_is_tagged() {
        let event = BatchEvent::Progress {
            completed: 3,
            total: 7,
            current_image: "IMG_0042".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Progress\""));
        assert!(json.contains("\"completed\":3"));
        assert!(json.contains("IMG_0042"));
    }

    #[test]
    fn row_serde_roundtrip() {
        let row = BatchResultRow {
            serial: 4,
            image_id: "field-7".to_string(),
            latitude: 30.045977,
            longitude: 73.604948,
        };
        let json = serde_json::to_string(&row).unwrap();
        let parsed: BatchResultRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn summary_starts_empty() {
        let summary = BatchSummary::empty(new_run_id());
        assert_eq!(summary.images_processed, 0);
        assert_eq!(summary.rows_added, 0);
        assert!(!summary.cancelled);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(new_run_id(), new_run_id());
    }
}
