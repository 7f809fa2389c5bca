use async_trait::async_trait;

use crate::modules::catalog::domain::entities::Genre;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>>;

    /// Exact-name lookup; genre names are unique.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;

    /// Exact-name batch lookup. Returns only the rows that exist; callers
    /// decide what a partial result means.
    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Genre>>;

    async fn get_all(&self) -> AppResult<Vec<Genre>>;

    /// Subset of `ids` that exist, in no particular order.
    async fn filter_existing_ids(&self, ids: &[i64]) -> AppResult<Vec<i64>>;

    /// Insert a genre carrying its own id (catalog-sourced).
    async fn insert(&self, genre: &Genre) -> AppResult<Genre>;

    async fn insert_batch(&self, genres: &[Genre]) -> AppResult<usize>;

    /// Insert a user-created genre, allocating the next local id.
    async fn create(&self, name: &str) -> AppResult<Genre>;

    async fn update(&self, genre: &Genre) -> AppResult<Genre>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}
