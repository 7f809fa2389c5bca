/// Cursor-driven ingestion pipeline.
///
/// Each tick fetches exactly one external title id, upserts the title with
/// its genre list, links a capped number of cast members, and moves the
/// cursor forward by one. A failed fetch or a failed write skips the id
/// instead of retrying it: bad or missing external ids would otherwise stall
/// the walk forever. Whatever happens inside the tick, the cursor advances
/// exactly once, in one place, at the end.
use std::sync::Arc;

use super::actor_reconciler::ActorReconciler;
use super::ports::{CatalogClient, TitleDetails};
use crate::modules::catalog::application::GenreService;
use crate::modules::catalog::domain::entities::{Genre, Title};
use crate::modules::catalog::domain::repositories::TitleRepository;
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::modules::ingestion::domain::CursorRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info, log_warn};

/// How many cast credits of a title are linked per ingest.
pub const DEFAULT_CAST_CAP: usize = 12;

/// Options controlling one ingestion tick.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Which title variant the walked id space belongs to.
    pub kind: TitleKind,

    /// Upper bound on cast credits linked per title.
    pub cast_cap: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            kind: TitleKind::Movie,
            cast_cap: DEFAULT_CAST_CAP,
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The payload was stored; `title_id` is the external id embedded in the
    /// payload, which may differ from the requested id.
    Ingested { title_id: i64, cast_linked: usize },

    /// The id yielded nothing; only the attempt log tells why.
    Skipped { reason: String },
}

/// Report of one `process_next_id` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub requested_id: i64,
    pub cursor_after: i64,
    pub outcome: TickOutcome,
}

pub struct IngestService {
    cursor_repo: Arc<dyn CursorRepository>,
    title_repo: Arc<dyn TitleRepository>,
    genre_service: Arc<GenreService>,
    reconciler: Arc<ActorReconciler>,
    catalog: Arc<dyn CatalogClient>,
}

impl IngestService {
    pub fn new(
        cursor_repo: Arc<dyn CursorRepository>,
        title_repo: Arc<dyn TitleRepository>,
        genre_service: Arc<GenreService>,
        reconciler: Arc<ActorReconciler>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            cursor_repo,
            title_repo,
            genre_service,
            reconciler,
            catalog,
        }
    }

    /// Runs one ingestion tick against the id the cursor points at.
    ///
    /// Only two failures propagate to the caller: a missing cursor and a
    /// lost compare-and-swap on the advance (another tick ran concurrently).
    /// Fetch and write failures are absorbed into a Skipped outcome.
    pub async fn process_next_id(&self, options: &IngestOptions) -> AppResult<IngestReport> {
        let cursor = self
            .cursor_repo
            .get()
            .await?
            .ok_or_else(|| AppError::NotFound("Ingestion cursor is not initialized".to_string()))?;
        let requested_id = cursor.next_title_id;

        log_debug!("Ingest tick: fetching {} {}", options.kind, requested_id);

        // Stage 1: fetch. A non-success response skips the id for good.
        let outcome = match self
            .catalog
            .fetch_title_details(options.kind, requested_id)
            .await
        {
            Err(e) => {
                log_warn!("Skipping {} {}: {}", options.kind, requested_id, e);
                TickOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
            // Stage 2: store. Write failures are swallowed the same way so
            // the cursor still moves.
            Ok(details) => match self.ingest_payload(options, details).await {
                Ok((title_id, cast_linked)) => TickOutcome::Ingested {
                    title_id,
                    cast_linked,
                },
                Err(e) => {
                    log_warn!(
                        "Failed to store payload for {} {}: {}",
                        options.kind,
                        requested_id,
                        e
                    );
                    TickOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
            },
        };

        // Stage 3: advance exactly once, whatever the tick did.
        let after = self.cursor_repo.advance(&cursor).await?;

        if let TickOutcome::Ingested {
            title_id,
            cast_linked,
        } = &outcome
        {
            log_info!(
                "Ingested {} {} ({} cast linked), cursor now at {}",
                options.kind,
                title_id,
                cast_linked,
                after.next_title_id
            );
        }

        Ok(IngestReport {
            requested_id,
            cursor_after: after.next_title_id,
            outcome,
        })
    }

    /// Upserts the title carried by the payload, keyed by the external id
    /// embedded in it, then links its cast.
    async fn ingest_payload(
        &self,
        options: &IngestOptions,
        details: TitleDetails,
    ) -> AppResult<(i64, usize)> {
        let year = details.release_year()?;

        // The payload's genre list is folded into the local table first so
        // the title never references an unknown genre id
        let incoming: Vec<Genre> = details
            .genres
            .iter()
            .map(|g| Genre::new(g.id, g.name.clone()))
            .collect();
        let genre_ids = self.genre_service.absorb_genres(&incoming).await?;

        let title = match self.title_repo.find(options.kind, details.external_id).await? {
            Some(mut existing) => {
                existing.rename(details.name.clone());
                existing.set_year(year);
                existing.set_genres(genre_ids);
                existing
            }
            None => {
                let mut title = Title::new(
                    options.kind,
                    details.external_id,
                    details.name.clone(),
                    year,
                );
                title.set_genres(genre_ids);
                title
            }
        };

        let (title, cast_linked) = self
            .reconciler
            .link_cast(title, &details.cast, options.cast_cap)
            .await?;

        Ok((title.id, cast_linked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_walk_movies_with_the_stock_cap() {
        let options = IngestOptions::default();
        assert_eq!(options.kind, TitleKind::Movie);
        assert_eq!(options.cast_cap, DEFAULT_CAST_CAP);
    }

    #[test]
    fn cast_cap_default_is_twelve() {
        assert_eq!(DEFAULT_CAST_CAP, 12);
    }
}
