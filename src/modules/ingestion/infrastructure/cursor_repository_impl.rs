use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::CursorRow;
use crate::log_debug;
use crate::modules::ingestion::domain::{CursorRepository, IngestionCursor, CURSOR_ID};
use crate::schema::ingestion_cursor;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct CursorRepositoryImpl {
    db: Arc<Database>,
}

impl CursorRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CursorRepository for CursorRepositoryImpl {
    async fn get(&self) -> AppResult<Option<IngestionCursor>> {
        let db = self.db.clone();
        let row = task::spawn_blocking(move || -> AppResult<Option<CursorRow>> {
            let mut conn = db.get_connection()?;
            let row = ingestion_cursor::table
                .filter(ingestion_cursor::id.eq(CURSOR_ID))
                .first::<CursorRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        Ok(row.map(CursorRow::into_entity))
    }

    async fn initialize(&self, start_id: i64) -> AppResult<IngestionCursor> {
        let db = self.db.clone();
        let cursor = task::spawn_blocking(move || -> AppResult<IngestionCursor> {
            let mut conn = db.get_connection()?;
            conn.transaction::<IngestionCursor, AppError, _>(|conn| {
                // Lost races fall through to reading the winner's row
                diesel::insert_or_ignore_into(ingestion_cursor::table)
                    .values(CursorRow::from_entity(&IngestionCursor::initial(start_id)))
                    .execute(conn)?;
                let row: CursorRow = ingestion_cursor::table
                    .filter(ingestion_cursor::id.eq(CURSOR_ID))
                    .first(conn)?;
                Ok(row.into_entity())
            })
        })
        .await??;
        Ok(cursor)
    }

    async fn advance(&self, expected: &IngestionCursor) -> AppResult<IngestionCursor> {
        let db = self.db.clone();
        let expected = expected.clone();
        let cursor = task::spawn_blocking(move || -> AppResult<IngestionCursor> {
            let mut conn = db.get_connection()?;
            let affected = diesel::update(
                ingestion_cursor::table
                    .filter(ingestion_cursor::id.eq(CURSOR_ID))
                    .filter(ingestion_cursor::version.eq(expected.version)),
            )
            .set((
                ingestion_cursor::next_title_id.eq(expected.next_title_id + 1),
                ingestion_cursor::version.eq(expected.version + 1),
            ))
            .execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::Conflict(format!(
                    "Ingestion cursor moved past version {} concurrently",
                    expected.version
                )));
            }
            Ok(IngestionCursor {
                next_title_id: expected.next_title_id + 1,
                version: expected.version + 1,
                ..expected
            })
        })
        .await??;
        log_debug!(
            "Cursor advanced to id {} (version {})",
            cursor.next_title_id,
            cursor.version
        );
        Ok(cursor)
    }

    async fn mark_genres_loaded(&self, expected: &IngestionCursor) -> AppResult<IngestionCursor> {
        let db = self.db.clone();
        let expected = expected.clone();
        let cursor = task::spawn_blocking(move || -> AppResult<IngestionCursor> {
            let mut conn = db.get_connection()?;
            let affected = diesel::update(
                ingestion_cursor::table
                    .filter(ingestion_cursor::id.eq(CURSOR_ID))
                    .filter(ingestion_cursor::version.eq(expected.version)),
            )
            .set((
                ingestion_cursor::genres_loaded.eq(true),
                ingestion_cursor::version.eq(expected.version + 1),
            ))
            .execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::Conflict(format!(
                    "Ingestion cursor moved past version {} concurrently",
                    expected.version
                )));
            }
            Ok(IngestionCursor {
                genres_loaded: true,
                version: expected.version + 1,
                ..expected
            })
        })
        .await??;
        Ok(cursor)
    }
}
