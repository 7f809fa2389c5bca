use diesel::prelude::*;

use crate::modules::ingestion::domain::IngestionCursor;
use crate::schema::ingestion_cursor;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = ingestion_cursor)]
pub struct CursorRow {
    pub id: i64,
    pub next_title_id: i64,
    pub genres_loaded: bool,
    pub version: i64,
}

impl CursorRow {
    pub fn from_entity(cursor: &IngestionCursor) -> Self {
        Self {
            id: cursor.id,
            next_title_id: cursor.next_title_id,
            genres_loaded: cursor.genres_loaded,
            version: cursor.version,
        }
    }

    pub fn into_entity(self) -> IngestionCursor {
        IngestionCursor {
            id: self.id,
            next_title_id: self.next_title_id,
            genres_loaded: self.genres_loaded,
            version: self.version,
        }
    }
}
