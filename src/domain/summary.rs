// src/domain/summary.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A summary produced during this session; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: u64,
    pub original_text: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
