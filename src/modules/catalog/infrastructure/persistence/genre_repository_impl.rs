use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::GenreRow;
use crate::log_debug;
use crate::modules::catalog::domain::entities::Genre;
use crate::modules::catalog::domain::repositories::GenreRepository;
use crate::schema::genres;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct GenreRepositoryImpl {
    db: Arc<Database>,
}

impl GenreRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for GenreRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let db = self.db.clone();
        let row = task::spawn_blocking(move || -> AppResult<Option<GenreRow>> {
            let mut conn = db.get_connection()?;
            let row = genres::table
                .filter(genres::id.eq(id))
                .first::<GenreRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        Ok(row.map(GenreRow::into_entity))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let db = self.db.clone();
        let name = name.to_string();
        let row = task::spawn_blocking(move || -> AppResult<Option<GenreRow>> {
            let mut conn = db.get_connection()?;
            let row = genres::table
                .filter(genres::name.eq(&name))
                .first::<GenreRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        Ok(row.map(GenreRow::into_entity))
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Genre>> {
        let db = self.db.clone();
        let names = names.to_vec();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<GenreRow>> {
            let mut conn = db.get_connection()?;
            let rows = genres::table
                .filter(genres::name.eq_any(&names))
                .load::<GenreRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        Ok(rows.into_iter().map(GenreRow::into_entity).collect())
    }

    async fn get_all(&self) -> AppResult<Vec<Genre>> {
        let db = self.db.clone();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<GenreRow>> {
            let mut conn = db.get_connection()?;
            let rows = genres::table
                .order(genres::id.asc())
                .load::<GenreRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        Ok(rows.into_iter().map(GenreRow::into_entity).collect())
    }

    async fn filter_existing_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        let db = self.db.clone();
        let ids = ids.to_vec();
        let existing = task::spawn_blocking(move || -> AppResult<Vec<i64>> {
            let mut conn = db.get_connection()?;
            let existing = genres::table
                .filter(genres::id.eq_any(&ids))
                .select(genres::id)
                .load::<i64>(&mut conn)?;
            Ok(existing)
        })
        .await??;
        Ok(existing)
    }

    async fn insert(&self, genre: &Genre) -> AppResult<Genre> {
        let db = self.db.clone();
        let row = GenreRow::from_entity(genre);
        let row = task::spawn_blocking(move || -> AppResult<GenreRow> {
            let mut conn = db.get_connection()?;
            diesel::insert_into(genres::table)
                .values(&row)
                .execute(&mut conn)?;
            Ok(row)
        })
        .await??;
        Ok(row.into_entity())
    }

    async fn insert_batch(&self, genres_in: &[Genre]) -> AppResult<usize> {
        log_debug!("Bulk inserting {} genres", genres_in.len());
        let db = self.db.clone();
        let rows: Vec<GenreRow> = genres_in.iter().map(GenreRow::from_entity).collect();
        let inserted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            conn.transaction::<usize, AppError, _>(|conn| {
                let inserted = diesel::insert_into(genres::table)
                    .values(&rows)
                    .execute(conn)?;
                Ok(inserted)
            })
        })
        .await??;
        Ok(inserted)
    }

    async fn create(&self, name: &str) -> AppResult<Genre> {
        let db = self.db.clone();
        let name = name.to_string();
        let row = task::spawn_blocking(move || -> AppResult<GenreRow> {
            let mut conn = db.get_connection()?;
            conn.transaction::<GenreRow, AppError, _>(|conn| {
                let max_id: Option<i64> = genres::table
                    .select(diesel::dsl::max(genres::id))
                    .first(conn)?;
                let row = GenreRow {
                    id: max_id.unwrap_or(0) + 1,
                    name,
                };
                diesel::insert_into(genres::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(row)
            })
        })
        .await??;
        Ok(row.into_entity())
    }

    async fn update(&self, genre: &Genre) -> AppResult<Genre> {
        let db = self.db.clone();
        let row = GenreRow::from_entity(genre);
        let row = task::spawn_blocking(move || -> AppResult<GenreRow> {
            let mut conn = db.get_connection()?;
            let affected = diesel::update(genres::table.filter(genres::id.eq(row.id)))
                .set(genres::name.eq(&row.name))
                .execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::NotFound(format!(
                    "Genre with id {} not found",
                    row.id
                )));
            }
            Ok(row)
        })
        .await??;
        Ok(row.into_entity())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let affected =
                diesel::delete(genres::table.filter(genres::id.eq(id))).execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::NotFound(format!("Genre with id {} not found", id)));
            }
            Ok(())
        })
        .await??;
        Ok(())
    }
}
