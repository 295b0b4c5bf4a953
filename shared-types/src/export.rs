use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contact::ContactRecord;
use crate::notification::Notification;
use crate::phone;

/// One contact in the shape an exporter consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportEntry {
    pub name: String,
    pub tel: String,
}

impl From<&ContactRecord> for ExportEntry {
    fn from(record: &ContactRecord) -> Self {
        Self {
            name: record.name().to_string(),
            tel: phone::to_tel(record.raw_phone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PickerOptions {
    pub multiple: bool,
}

/// Request shape passed to a native contacts capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PickerRequest {
    pub properties: Vec<String>,
    pub options: PickerOptions,
}

impl Default for PickerRequest {
    fn default() -> Self {
        Self {
            properties: vec!["name".to_string(), "tel".to_string()],
            options: PickerOptions { multiple: true },
        }
    }
}

/// Which export path ran and how far it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[ts(export)]
pub enum ExportOutcome {
    NothingSelected,
    Native { count: usize },
    Files { written: Vec<String> },
    NativeFailed,
    FilesFailed { written: Vec<String> },
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportResponse {
    pub outcome: ExportOutcome,
    pub notification: Notification,
}
