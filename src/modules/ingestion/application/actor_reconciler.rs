use std::collections::HashSet;
use std::sync::Arc;

use super::ports::{CastCredit, CatalogClient};
use crate::modules::catalog::application::GenreService;
use crate::modules::catalog::domain::entities::{Actor, Title};
use crate::modules::catalog::domain::repositories::{
    ActorRepository, LinkRepository, TitleRepository,
};
use crate::modules::catalog::domain::value_objects::{PersonName, TitleKind};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};

/// Reconciles cast members against the local actor table.
///
/// Two identity rules apply, depending on the path in:
/// - cursor-driven ingestion identifies actors by external id and upserts,
/// - the name-search path identifies actors by case-insensitive full name
///   and backs off when the name is already taken.
///
/// When a name-search match carries an external id that already has a row
/// under a different spelling, the existing row wins and keeps its stored
/// spelling; no second row is created for the same external identity.
pub struct ActorReconciler {
    actor_repo: Arc<dyn ActorRepository>,
    title_repo: Arc<dyn TitleRepository>,
    link_repo: Arc<dyn LinkRepository>,
    genre_service: Arc<GenreService>,
    catalog: Arc<dyn CatalogClient>,
}

impl ActorReconciler {
    pub fn new(
        actor_repo: Arc<dyn ActorRepository>,
        title_repo: Arc<dyn TitleRepository>,
        link_repo: Arc<dyn LinkRepository>,
        genre_service: Arc<GenreService>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self {
            actor_repo,
            title_repo,
            link_repo,
            genre_service,
            catalog,
        }
    }

    /// Upserts the first `cap` cast credits by external id, links each to the
    /// title on both sides, and persists everything in one unit of work. The
    /// title's cast-fetched flag is set here. Returns the updated title and
    /// how many actors were linked.
    pub async fn link_cast(
        &self,
        mut title: Title,
        cast: &[CastCredit],
        cap: usize,
    ) -> AppResult<(Title, usize)> {
        let mut seen: HashSet<i64> = HashSet::new();
        let mut touched: Vec<Actor> = Vec::new();

        for credit in cast.iter().take(cap) {
            if !seen.insert(credit.external_id) {
                continue;
            }

            let name = PersonName::parse(&credit.full_name);
            let mut actor = match self.actor_repo.find_by_id(credit.external_id).await? {
                Some(existing) => existing,
                None => Actor::new(credit.external_id, name.first, name.last),
            };

            actor.add_title(title.kind, title.id);
            title.add_actor(actor.id);
            touched.push(actor);
        }

        title.mark_cast_fetched();
        let linked = touched.len();
        self.link_repo
            .persist(&touched, std::slice::from_ref(&title))
            .await?;

        log_debug!(
            "Linked {} cast members to {} {} '{}'",
            linked,
            title.kind,
            title.id,
            title.name
        );
        Ok((title, linked))
    }

    /// Looks a person up in the remote catalog by full name and pulls them
    /// into the store together with their known-for movies.
    ///
    /// No-ops (returning None) when an actor with that name already exists,
    /// or when the search yields no case-insensitive full-name match in the
    /// Acting department.
    pub async fn search_and_link_actor(&self, full_name: &str) -> AppResult<Option<Actor>> {
        let query = full_name.trim();
        crate::shared::utils::Validator::validate_person_name(query)?;
        let name = PersonName::parse(query);

        // Identity by name: an existing actor with this name ends the search
        if self
            .actor_repo
            .find_by_name_ci(&name.first, &name.last)
            .await?
            .is_some()
        {
            log_debug!("Actor '{}' already exists, skipping catalog search", name);
            return Ok(None);
        }

        let candidates = self.catalog.search_person(query).await?;
        let candidate = candidates.into_iter().find(|c| {
            c.department == "Acting"
                && PersonName::parse(c.full_name.trim()).matches_ci(&name.first, &name.last)
        });
        let candidate = match candidate {
            Some(c) => c,
            None => {
                log_debug!("No acting match for '{}' in catalog search", query);
                return Ok(None);
            }
        };

        // Same external identity under a different spelling reuses the
        // existing row, stored spelling kept
        let mut actor = match self.actor_repo.find_by_id(candidate.external_id).await? {
            Some(existing) => existing,
            None => {
                let catalog_name = PersonName::parse(&candidate.full_name);
                Actor::new(candidate.external_id, catalog_name.first, catalog_name.last)
            }
        };

        let mut touched: Vec<Title> = Vec::new();
        let mut seen: HashSet<i64> = HashSet::new();
        for entry in candidate
            .known_for
            .iter()
            .filter(|e| e.media_type == "movie")
        {
            if !seen.insert(entry.external_id) {
                continue;
            }

            let mut title = match self.title_repo.find(TitleKind::Movie, entry.external_id).await? {
                Some(existing) => existing,
                None => {
                    let year = entry.release_year()?;
                    let genre_ids = self.genre_service.filter_known_ids(&entry.genre_ids).await?;
                    let mut title =
                        Title::new(TitleKind::Movie, entry.external_id, entry.name.clone(), year);
                    title.set_genres(genre_ids);
                    title
                }
            };

            title.add_actor(actor.id);
            actor.add_title(TitleKind::Movie, title.id);
            touched.push(title);
        }

        self.link_repo
            .persist(std::slice::from_ref(&actor), &touched)
            .await?;

        log_info!(
            "Linked actor '{}' (id {}) with {} known-for movies",
            actor.full_name(),
            actor.id,
            touched.len()
        );
        Ok(Some(actor))
    }

    /// Re-fetches a stored title's cast from the catalog and links it. Fails
    /// with AlreadyExists once the cast has been fetched, so the call stays a
    /// one-shot per title.
    pub async fn refresh_title_cast(
        &self,
        kind: TitleKind,
        title_id: i64,
        cap: usize,
    ) -> AppResult<(Title, usize)> {
        let title = self.title_repo.find(kind, title_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} with id {} not found", kind.label(), title_id))
        })?;
        if title.cast_fetched {
            return Err(AppError::AlreadyExists(format!(
                "Cast for {} {} was already fetched",
                kind, title_id
            )));
        }

        let details = self.catalog.fetch_title_details(kind, title_id).await?;
        self.link_cast(title, &details.cast, cap).await
    }
}
