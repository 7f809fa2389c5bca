use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One outbound catalog call, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: i32,
    pub executed_at: DateTime<Utc>,
    pub url: String,
    pub query_params: Option<String>,
    pub success: bool,
}

/// Per-day tally of outbound calls, keyed by the local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRequestCount {
    pub day: String,
    pub total_requests: i64,
}

/// Day-first key format the daily counters are stored under.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
