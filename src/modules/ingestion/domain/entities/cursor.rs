use serde::{Deserialize, Serialize};

/// Row id of the one cursor row the store ever holds.
pub const CURSOR_ID: i64 = 1;

/// Singleton state of the pull-based ingestion loop: the next external title
/// id to fetch, whether the global genre catalog has been loaded, and a
/// version counter for compare-and-swap updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionCursor {
    pub id: i64,
    pub next_title_id: i64,
    pub genres_loaded: bool,
    pub version: i64,
}

impl IngestionCursor {
    pub fn initial(start_id: i64) -> Self {
        Self {
            id: CURSOR_ID,
            next_title_id: start_id,
            genres_loaded: false,
            version: 0,
        }
    }
}
