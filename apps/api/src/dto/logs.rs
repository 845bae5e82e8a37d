use serde::Serialize;
use stockledger_application::LogEntry;
use ts_rs::TS;

/// API representation of one audit log row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/log-entry-response.ts"
)]
pub struct LogEntryResponse {
    pub id: i64,
    pub action: String,
    pub item_id: Option<i64>,
    pub category_id: Option<i64>,
    pub quantity_change: Option<i64>,
    pub description: String,
    pub recorded_at: String,
}

impl From<LogEntry> for LogEntryResponse {
    fn from(value: LogEntry) -> Self {
        Self {
            id: value.id.as_i64(),
            action: value.action.as_str().to_owned(),
            item_id: value.item_id.map(|id| id.as_i64()),
            category_id: value.category_id.map(|id| id.as_i64()),
            quantity_change: value.quantity_change,
            description: value.description,
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}
