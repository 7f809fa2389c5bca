use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::{upsert_actor_row, upsert_title_row};
use crate::log_debug;
use crate::modules::catalog::domain::entities::{Actor, Title};
use crate::modules::catalog::domain::repositories::LinkRepository;
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::schema::{actors, titles};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct LinkRepositoryImpl {
    db: Arc<Database>,
}

impl LinkRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LinkRepository for LinkRepositoryImpl {
    async fn persist(&self, actors_in: &[Actor], titles_in: &[Title]) -> AppResult<()> {
        log_debug!(
            "Persisting relation update for {} actors and {} titles",
            actors_in.len(),
            titles_in.len()
        );
        let db = self.db.clone();
        let actors_in = actors_in.to_vec();
        let titles_in = titles_in.to_vec();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            conn.transaction::<(), AppError, _>(|conn| {
                for actor in &actors_in {
                    upsert_actor_row(conn, actor)?;
                }
                for title in &titles_in {
                    upsert_title_row(conn, title)?;
                }
                Ok(())
            })
        })
        .await??;
        Ok(())
    }

    async fn delete_title(&self, kind: TitleKind, id: i64, detached: &[Actor]) -> AppResult<()> {
        let db = self.db.clone();
        let detached = detached.to_vec();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            conn.transaction::<(), AppError, _>(|conn| {
                for actor in &detached {
                    upsert_actor_row(conn, actor)?;
                }
                let affected = diesel::delete(
                    titles::table
                        .filter(titles::id.eq(id))
                        .filter(titles::kind.eq(kind.as_str())),
                )
                .execute(conn)?;
                if affected == 0 {
                    return Err(AppError::NotFound(format!(
                        "{} with id {} not found",
                        kind.label(),
                        id
                    )));
                }
                Ok(())
            })
        })
        .await??;
        Ok(())
    }

    async fn delete_actor(&self, id: i64, detached: &[Title]) -> AppResult<()> {
        let db = self.db.clone();
        let detached = detached.to_vec();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            conn.transaction::<(), AppError, _>(|conn| {
                for title in &detached {
                    upsert_title_row(conn, title)?;
                }
                let affected =
                    diesel::delete(actors::table.filter(actors::id.eq(id))).execute(conn)?;
                if affected == 0 {
                    return Err(AppError::NotFound(format!("Actor with id {} not found", id)));
                }
                Ok(())
            })
        })
        .await??;
        Ok(())
    }
}
