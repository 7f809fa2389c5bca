use std::sync::Arc;

use super::ports::CatalogClient;
use crate::modules::catalog::application::GenreService;
use crate::modules::catalog::domain::entities::Genre;
use crate::modules::ingestion::domain::{CursorRepository, IngestionCursor};
use crate::shared::errors::AppResult;
use crate::{log_debug, log_info};

/// First external id the cursor walk starts from on a fresh store.
pub const DEFAULT_START_ID: i64 = 1;

/// One-time store preparation: creates the cursor row and loads the remote
/// genre catalog, guarded by the cursor's genres-loaded flag.
pub struct BootstrapService {
    cursor_repo: Arc<dyn CursorRepository>,
    genre_service: Arc<GenreService>,
    catalog: Arc<dyn CatalogClient>,
}

impl BootstrapService {
    pub fn new(
        cursor_repo: Arc<dyn CursorRepository>,
        genre_service: Arc<GenreService>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            cursor_repo,
            genre_service,
            catalog,
        }
    }

    /// Idempotent: running it against a prepared store changes nothing.
    pub async fn run(&self, start_id: i64) -> AppResult<IngestionCursor> {
        crate::shared::utils::Validator::validate_external_id(start_id)?;

        let cursor = self.cursor_repo.initialize(start_id).await?;
        if cursor.genres_loaded {
            log_debug!("Genre catalog already loaded, nothing to bootstrap");
            return Ok(cursor);
        }

        let catalog_genres = self.catalog.fetch_genre_catalog().await?;
        let incoming: Vec<Genre> = catalog_genres
            .iter()
            .map(|g| Genre::new(g.id, g.name.clone()))
            .collect();
        let absorbed = self.genre_service.absorb_genres(&incoming).await?;

        let updated = self.cursor_repo.mark_genres_loaded(&cursor).await?;

        log_info!(
            "Bootstrapped store: {} genres loaded, cursor at {}",
            absorbed.len(),
            updated.next_title_id
        );
        Ok(updated)
    }
}
