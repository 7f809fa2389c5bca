use async_trait::async_trait;

use crate::modules::catalog::domain::entities::{Actor, Title};
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::AppResult;

/// Atomic writes for edits that touch both sides of the actor/title
/// relation. Each method is one transaction: either every row persists or
/// none does, so a half-applied toggle is never observable.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Upsert the given actor and title rows together.
    async fn persist(&self, actors: &[Actor], titles: &[Title]) -> AppResult<()>;

    /// Delete one title and persist the actors it was detached from.
    async fn delete_title(&self, kind: TitleKind, id: i64, detached: &[Actor]) -> AppResult<()>;

    /// Delete one actor and persist the titles it was detached from.
    async fn delete_actor(&self, id: i64, detached: &[Title]) -> AppResult<()>;
}
