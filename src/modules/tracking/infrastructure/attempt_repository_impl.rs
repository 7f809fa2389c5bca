use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, Utc};
use diesel::prelude::*;
use tokio::task;

use super::models::{AttemptRow, DailyCountRow, NewAttemptRow};
use crate::modules::tracking::domain::entities::{day_key, AttemptRecord, DailyRequestCount};
use crate::modules::tracking::domain::repositories::AttemptRepository;
use crate::schema::{daily_request_counts, request_attempts};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct AttemptRepositoryImpl {
    db: Arc<Database>,
}

impl AttemptRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttemptRepository for AttemptRepositoryImpl {
    async fn log_attempt(
        &self,
        url: &str,
        query_params: Option<&str>,
        success: bool,
    ) -> AppResult<()> {
        let db = self.db.clone();
        let row = NewAttemptRow {
            executed_at: Utc::now().naive_utc(),
            url: url.to_string(),
            query_params: query_params.map(|p| p.to_string()),
            success,
        };
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            conn.transaction::<(), AppError, _>(|conn| {
                diesel::insert_into(request_attempts::table)
                    .values(&row)
                    .execute(conn)?;

                let key = day_key(Local::now().date_naive());
                let bumped = diesel::update(
                    daily_request_counts::table.filter(daily_request_counts::day.eq(&key)),
                )
                .set(
                    daily_request_counts::total_requests
                        .eq(daily_request_counts::total_requests + 1),
                )
                .execute(conn)?;
                if bumped == 0 {
                    diesel::insert_into(daily_request_counts::table)
                        .values(DailyCountRow {
                            day: key,
                            total_requests: 1,
                        })
                        .execute(conn)?;
                }
                Ok(())
            })
        })
        .await??;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<AttemptRecord>> {
        let db = self.db.clone();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<AttemptRow>> {
            let mut conn = db.get_connection()?;
            let rows = request_attempts::table
                .order((
                    request_attempts::executed_at.desc(),
                    request_attempts::id.desc(),
                ))
                .limit(limit)
                .load::<AttemptRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        Ok(rows.into_iter().map(AttemptRow::into_entity).collect())
    }

    async fn find_day(&self, day: &str) -> AppResult<Option<DailyRequestCount>> {
        let db = self.db.clone();
        let day = day.to_string();
        let row = task::spawn_blocking(move || -> AppResult<Option<DailyCountRow>> {
            let mut conn = db.get_connection()?;
            let row = daily_request_counts::table
                .filter(daily_request_counts::day.eq(&day))
                .first::<DailyCountRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        Ok(row.map(DailyCountRow::into_entity))
    }
}
