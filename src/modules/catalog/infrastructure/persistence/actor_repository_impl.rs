use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::{lower, upsert_actor_row, ActorRow};
use crate::log_debug;
use crate::modules::catalog::domain::entities::Actor;
use crate::modules::catalog::domain::repositories::ActorRepository;
use crate::schema::actors;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct ActorRepositoryImpl {
    db: Arc<Database>,
}

impl ActorRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActorRepository for ActorRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Actor>> {
        let db = self.db.clone();
        let row = task::spawn_blocking(move || -> AppResult<Option<ActorRow>> {
            let mut conn = db.get_connection()?;
            let row = actors::table
                .filter(actors::id.eq(id))
                .first::<ActorRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        row.map(ActorRow::into_entity).transpose()
    }

    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Actor>> {
        let db = self.db.clone();
        let ids = ids.to_vec();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<ActorRow>> {
            let mut conn = db.get_connection()?;
            let rows = actors::table
                .filter(actors::id.eq_any(&ids))
                .load::<ActorRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        rows.into_iter().map(ActorRow::into_entity).collect()
    }

    async fn get_all(&self) -> AppResult<Vec<Actor>> {
        let db = self.db.clone();
        let rows = task::spawn_blocking(move || -> AppResult<Vec<ActorRow>> {
            let mut conn = db.get_connection()?;
            let rows = actors::table.order(actors::id.asc()).load::<ActorRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;
        rows.into_iter().map(ActorRow::into_entity).collect()
    }

    async fn find_by_name_ci(&self, first: &str, last: &str) -> AppResult<Option<Actor>> {
        let db = self.db.clone();
        let first = first.to_lowercase();
        let last = last.to_lowercase();
        let row = task::spawn_blocking(move || -> AppResult<Option<ActorRow>> {
            let mut conn = db.get_connection()?;
            let row = actors::table
                .filter(lower(actors::first_name).eq(&first))
                .filter(lower(actors::last_name).eq(&last))
                .first::<ActorRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;
        row.map(ActorRow::into_entity).transpose()
    }

    async fn save(&self, actor: &Actor) -> AppResult<Actor> {
        let db = self.db.clone();
        let actor = actor.clone();
        let actor = task::spawn_blocking(move || -> AppResult<Actor> {
            let mut conn = db.get_connection()?;
            upsert_actor_row(&mut conn, &actor)?;
            Ok(actor)
        })
        .await??;
        Ok(actor)
    }

    async fn create_local(&self, first: &str, last: &str) -> AppResult<Actor> {
        let db = self.db.clone();
        let first = first.to_string();
        let last = last.to_string();
        let actor = task::spawn_blocking(move || -> AppResult<Actor> {
            let mut conn = db.get_connection()?;
            conn.transaction::<Actor, AppError, _>(|conn| {
                let max_id: Option<i64> = actors::table
                    .select(diesel::dsl::max(actors::id))
                    .first(conn)?;
                let actor = Actor::new(max_id.unwrap_or(0) + 1, first, last);
                upsert_actor_row(conn, &actor)?;
                Ok(actor)
            })
        })
        .await??;
        log_debug!("Created local actor '{}' with id {}", actor.full_name(), actor.id);
        Ok(actor)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let affected =
                diesel::delete(actors::table.filter(actors::id.eq(id))).execute(&mut conn)?;
            if affected == 0 {
                return Err(AppError::NotFound(format!("Actor with id {} not found", id)));
            }
            Ok(())
        })
        .await??;
        Ok(())
    }
}
