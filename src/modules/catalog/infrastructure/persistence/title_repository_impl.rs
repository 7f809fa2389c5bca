use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tokio::task;

use super::models::{decode_ids, encode_ids, upsert_title_row, TitleRow};
use crate::log_debug;
use crate::modules::catalog::domain::entities::Title;
use crate::modules::catalog::domain::repositories::TitleRepository;
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::schema::titles;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct TitleRepositoryImpl {
    db: Arc<Database>,
}

impl TitleRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TitleRepository for TitleRepositoryImpl {
    async fn find(&self, kind: TitleKind, id: i64) -> AppResult<Option<Title>> {
        let db = self.db.clone();
        let row = task::spawn_blocking(move || -> AppResult<Option<TitleRow>> {
            let mut conn = db.get_connection()?;
            let row = titles::table
                .filter(titles::id.eq(id))
                .filter(titles::kind.eq(kind.as_str()))
                .first::<TitleRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        row.map(TitleRow::into_entity).transpose()
    }

    async fn find_by_name(&self, kind: TitleKind, name: &str) -> AppResult<Option<Title>> {
        let db = self.db.clone();
        let name = name.to_string();
        let row = task::spawn_blocking(move || -> AppResult<Option<TitleRow>> {
            let mut conn = db.get_connection()?;
            let row = titles::table
                .filter(titles::name.eq(&name))
                .filter(titles::kind.eq(kind.as_str()))
                .first::<TitleRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        row.map(TitleRow::into_entity).transpose()
    }

    async fn find_many(&self, kind: TitleKind, ids: &[i64]) -> AppResult<Vec<Title>> {
        let db = self.db.clone();
        let ids = ids.to_vec();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<TitleRow>> {
            let mut conn = db.get_connection()?;
            let rows = titles::table
                .filter(titles::id.eq_any(&ids))
                .filter(titles::kind.eq(kind.as_str()))
                .load::<TitleRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        rows.into_iter().map(TitleRow::into_entity).collect()
    }

    async fn get_all(&self, kind: TitleKind) -> AppResult<Vec<Title>> {
        let db = self.db.clone();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<TitleRow>> {
            let mut conn = db.get_connection()?;
            let rows = titles::table
                .filter(titles::kind.eq(kind.as_str()))
                .order(titles::id.asc())
                .load::<TitleRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        rows.into_iter().map(TitleRow::into_entity).collect()
    }

    async fn save(&self, title: &Title) -> AppResult<Title> {
        log_debug!("Upserting {} '{}'", title.kind.label(), title.name);
        let db = self.db.clone();
        let title = title.clone();
        let title = task::spawn_blocking(move || -> AppResult<Title> {
            let mut conn = db.get_connection()?;
            upsert_title_row(&mut conn, &title)?;
            Ok(title)
        })
        .await??;
        Ok(title)
    }

    async fn create_local(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
        genre_ids: &[i64],
    ) -> AppResult<Title> {
        let db = self.db.clone();
        let name = name.to_string();
        let genre_ids = genre_ids.to_vec();
        let title = task::spawn_blocking(move || -> AppResult<Title> {
            let mut conn = db.get_connection()?;
            conn.transaction::<Title, AppError, _>(|conn| {
                // ids share one space with catalog identities; local rows
                // take the next free id within the variant
                let max_id: Option<i64> = titles::table
                    .filter(titles::kind.eq(kind.as_str()))
                    .select(diesel::dsl::max(titles::id))
                    .first(conn)?;
                let mut title = Title::new(kind, max_id.unwrap_or(0) + 1, name, year);
                title.set_genres(genre_ids);
                upsert_title_row(conn, &title)?;
                Ok(title)
            })
        })
        .await??;
        log_debug!(
            "Created local {} '{}' with id {}",
            kind.label(),
            title.name,
            title.id
        );
        Ok(title)
    }

    async fn delete(&self, kind: TitleKind, id: i64) -> AppResult<()> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let affected = diesel::delete(
                titles::table
                    .filter(titles::id.eq(id))
                    .filter(titles::kind.eq(kind.as_str())),
            )
            .execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::NotFound(format!(
                    "{} with id {} not found",
                    kind.label(),
                    id
                )));
            }
            Ok(())
        })
        .await??;
        Ok(())
    }

    async fn strip_genre(&self, genre_id: i64) -> AppResult<usize> {
        let db = self.db.clone();
        let changed = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            conn.transaction::<usize, AppError, _>(|conn| {
                let rows: Vec<TitleRow> = titles::table.load(conn)?;
                let mut changed = 0;
                for row in rows {
                    let mut ids = decode_ids(&row.genre_ids)?;
                    let before = ids.len();
                    ids.retain(|gid| *gid != genre_id);
                    if ids.len() < before {
                        diesel::update(
                            titles::table
                                .filter(titles::id.eq(row.id))
                                .filter(titles::kind.eq(&row.kind)),
                        )
                        .set((
                            titles::genre_ids.eq(encode_ids(&ids)?),
                            titles::updated_at.eq(Utc::now().naive_utc()),
                        ))
                        .execute(conn)?;
                        changed += 1;
                    }
                }
                Ok(changed)
            })
        })
        .await??;
        log_debug!("Detached genre {} from {} titles", genre_id, changed);
        Ok(changed)
    }
}
