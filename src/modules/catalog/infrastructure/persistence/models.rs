use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::modules::catalog::domain::entities::{Actor, Genre, Title};
use crate::schema::{actors, genres, titles};
use crate::shared::errors::{AppError, AppResult};

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = genres)]
pub struct GenreRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = titles)]
pub struct TitleRow {
    pub id: i64,
    pub kind: String,
    pub name: String,
    pub year: Option<i32>,
    pub genre_ids: String,
    pub actor_ids: String,
    pub cast_fetched: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = actors)]
pub struct ActorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub movie_ids: String,
    pub tv_show_ids: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Id-sets live in TEXT columns as JSON arrays.

pub fn encode_ids(ids: &[i64]) -> AppResult<String> {
    serde_json::to_string(ids).map_err(AppError::from)
}

pub fn decode_ids(raw: &str) -> AppResult<Vec<i64>> {
    serde_json::from_str(raw).map_err(AppError::from)
}

impl GenreRow {
    pub fn from_entity(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }

    pub fn into_entity(self) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
        }
    }
}

impl TitleRow {
    pub fn from_entity(title: &Title) -> AppResult<Self> {
        Ok(Self {
            id: title.id,
            kind: title.kind.as_str().to_string(),
            name: title.name.clone(),
            year: title.year,
            genre_ids: encode_ids(&title.genre_ids)?,
            actor_ids: encode_ids(&title.actor_ids)?,
            cast_fetched: title.cast_fetched,
            created_at: title.created_at.naive_utc(),
            updated_at: title.updated_at.naive_utc(),
        })
    }

    pub fn into_entity(self) -> AppResult<Title> {
        Ok(Title {
            id: self.id,
            kind: self.kind.parse()?,
            name: self.name,
            year: self.year,
            genre_ids: decode_ids(&self.genre_ids)?,
            actor_ids: decode_ids(&self.actor_ids)?,
            cast_fetched: self.cast_fetched,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}

impl ActorRow {
    pub fn from_entity(actor: &Actor) -> AppResult<Self> {
        Ok(Self {
            id: actor.id,
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            movie_ids: encode_ids(&actor.movie_ids)?,
            tv_show_ids: encode_ids(&actor.tv_show_ids)?,
            created_at: actor.created_at.naive_utc(),
            updated_at: actor.updated_at.naive_utc(),
        })
    }

    pub fn into_entity(self) -> AppResult<Actor> {
        Ok(Actor {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            movie_ids: decode_ids(&self.movie_ids)?,
            tv_show_ids: decode_ids(&self.tv_show_ids)?,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}

// Connection-level helpers shared by the repositories so multi-row edits can
// reuse the same upserts inside one transaction.

pub fn upsert_title_row(conn: &mut SqliteConnection, title: &Title) -> AppResult<()> {
    let row = TitleRow::from_entity(title)?;
    diesel::replace_into(titles::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

pub fn upsert_actor_row(conn: &mut SqliteConnection, actor: &Actor) -> AppResult<()> {
    let row = ActorRow::from_entity(actor)?;
    diesel::replace_into(actors::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}
