use async_trait::async_trait;

use crate::modules::catalog::domain::entities::Actor;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Actor>>;

    /// Rows whose ids appear in `ids`; missing ids are absent from the
    /// result.
    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Actor>>;

    async fn get_all(&self) -> AppResult<Vec<Actor>>;

    /// Case-insensitive exact match on first + last name.
    async fn find_by_name_ci(&self, first_name: &str, last_name: &str)
        -> AppResult<Option<Actor>>;

    /// Insert-or-replace keyed by id.
    async fn save(&self, actor: &Actor) -> AppResult<Actor>;

    /// Insert a user-created actor, allocating the next local id.
    async fn create_local(&self, first_name: &str, last_name: &str) -> AppResult<Actor>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}
