use async_trait::async_trait;

use crate::modules::catalog::domain::entities::Title;
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait TitleRepository: Send + Sync {
    async fn find(&self, kind: TitleKind, id: i64) -> AppResult<Option<Title>>;

    /// Exact-name lookup within one variant.
    async fn find_by_name(&self, kind: TitleKind, name: &str) -> AppResult<Option<Title>>;

    /// Rows whose ids appear in `ids`, same variant. Missing ids are simply
    /// absent from the result.
    async fn find_many(&self, kind: TitleKind, ids: &[i64]) -> AppResult<Vec<Title>>;

    async fn get_all(&self, kind: TitleKind) -> AppResult<Vec<Title>>;

    /// Insert-or-replace keyed by (id, kind).
    async fn save(&self, title: &Title) -> AppResult<Title>;

    /// Insert a user-created title, allocating the next local id for the
    /// variant.
    async fn create_local(
        &self,
        kind: TitleKind,
        name: &str,
        year: Option<i32>,
        genre_ids: &[i64],
    ) -> AppResult<Title>;

    async fn delete(&self, kind: TitleKind, id: i64) -> AppResult<()>;

    /// Remove a genre id from every title of both variants; returns how many
    /// rows changed. Used when a genre row is deleted so no title keeps a
    /// dangling reference.
    async fn strip_genre(&self, genre_id: i64) -> AppResult<usize>;
}
