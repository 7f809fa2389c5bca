use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::modules::catalog::domain::entities::{Actor, Title};
use crate::modules::catalog::domain::repositories::{
    ActorRepository, LinkRepository, TitleRepository,
};
use crate::modules::catalog::domain::value_objects::TitleKind;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};

/// Keeps the actor/title many-to-many relation symmetric: every edit goes
/// through here and touches both sides in one unit of work.
pub struct CastService {
    actor_repo: Arc<dyn ActorRepository>,
    title_repo: Arc<dyn TitleRepository>,
    link_repo: Arc<dyn LinkRepository>,
}

impl CastService {
    pub fn new(
        actor_repo: Arc<dyn ActorRepository>,
        title_repo: Arc<dyn TitleRepository>,
        link_repo: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            actor_repo,
            title_repo,
            link_repo,
        }
    }

    /// Makes `title_ids` the authoritative list of titles the actor appears
    /// in for the given variant. Every id must exist before anything is
    /// mutated. The whole title collection of that variant is then scanned
    /// and membership toggled wherever the stored state disagrees with the
    /// target list.
    ///
    /// The scan is O(total titles) per edit, which holds up for the catalog
    /// sizes this store is built for.
    pub async fn set_actor_titles(
        &self,
        actor_id: i64,
        kind: TitleKind,
        title_ids: &[i64],
    ) -> AppResult<Actor> {
        let mut actor = self.require_actor(actor_id).await?;

        let desired: Vec<i64> = self
            .require_titles(kind, title_ids)
            .await?
            .iter()
            .map(|t| t.id)
            .collect();

        actor.set_titles(kind, desired.clone());

        // Scan the whole variant and toggle rows that disagree
        let target: HashSet<i64> = desired.iter().copied().collect();
        let mut touched = Vec::new();
        for mut title in self.title_repo.get_all(kind).await? {
            let should_contain = target.contains(&title.id);
            let does_contain = title.has_actor(actor_id);
            if should_contain == does_contain {
                continue;
            }
            if should_contain {
                title.add_actor(actor_id);
            } else {
                title.remove_actor(actor_id);
            }
            touched.push(title);
        }

        log_debug!(
            "Syncing actor {} to {} {}s, {} rows toggled",
            actor_id,
            target.len(),
            kind,
            touched.len()
        );
        self.link_repo.persist(std::slice::from_ref(&actor), &touched).await?;

        Ok(actor)
    }

    /// Links one actor/title pair on both sides. Idempotent: linking an
    /// already linked pair changes nothing.
    pub async fn add_actor_to_title(
        &self,
        kind: TitleKind,
        title_id: i64,
        actor_id: i64,
    ) -> AppResult<()> {
        let mut title = self.require_title(kind, title_id).await?;
        let mut actor = self.require_actor(actor_id).await?;

        let title_side = title.add_actor(actor_id);
        let actor_side = actor.add_title(kind, title_id);
        if !title_side && !actor_side {
            return Ok(());
        }

        self.link_repo
            .persist(std::slice::from_ref(&actor), std::slice::from_ref(&title))
            .await?;

        log_info!("Linked actor {} to {} {}", actor_id, kind, title_id);
        Ok(())
    }

    /// Unlinks one actor/title pair on both sides. Idempotent.
    pub async fn remove_actor_from_title(
        &self,
        kind: TitleKind,
        title_id: i64,
        actor_id: i64,
    ) -> AppResult<()> {
        let mut title = self.require_title(kind, title_id).await?;
        let mut actor = self.require_actor(actor_id).await?;

        let title_side = title.remove_actor(actor_id);
        let actor_side = actor.remove_title(kind, title_id);
        if !title_side && !actor_side {
            return Ok(());
        }

        self.link_repo
            .persist(std::slice::from_ref(&actor), std::slice::from_ref(&title))
            .await?;

        log_info!("Unlinked actor {} from {} {}", actor_id, kind, title_id);
        Ok(())
    }

    /// Links the actor to every listed title. All ids must exist before
    /// anything is written; already linked pairs are left alone.
    pub async fn add_actor_to_titles(
        &self,
        actor_id: i64,
        kind: TitleKind,
        title_ids: &[i64],
    ) -> AppResult<Actor> {
        let mut actor = self.require_actor(actor_id).await?;
        let titles = self.require_titles(kind, title_ids).await?;

        let mut touched = Vec::new();
        for mut title in titles {
            let title_side = title.add_actor(actor_id);
            let actor_side = actor.add_title(kind, title.id);
            if title_side || actor_side {
                touched.push(title);
            }
        }

        if !touched.is_empty() {
            self.link_repo
                .persist(std::slice::from_ref(&actor), &touched)
                .await?;
            log_info!("Linked actor {} to {} {}s", actor_id, touched.len(), kind);
        }
        Ok(actor)
    }

    /// Unlinks the actor from every listed title. All ids must exist before
    /// anything is written; absent links are left alone.
    pub async fn remove_actor_from_titles(
        &self,
        actor_id: i64,
        kind: TitleKind,
        title_ids: &[i64],
    ) -> AppResult<Actor> {
        let mut actor = self.require_actor(actor_id).await?;
        let titles = self.require_titles(kind, title_ids).await?;

        let mut touched = Vec::new();
        for mut title in titles {
            let title_side = title.remove_actor(actor_id);
            let actor_side = actor.remove_title(kind, title.id);
            if title_side || actor_side {
                touched.push(title);
            }
        }

        if !touched.is_empty() {
            self.link_repo
                .persist(std::slice::from_ref(&actor), &touched)
                .await?;
            log_info!(
                "Unlinked actor {} from {} {}s",
                actor_id,
                touched.len(),
                kind
            );
        }
        Ok(actor)
    }

    /// Returns the cast of a title in stored link order.
    pub async fn get_title_cast(&self, kind: TitleKind, title_id: i64) -> AppResult<Vec<Actor>> {
        let title = self.require_title(kind, title_id).await?;

        let actors = self.actor_repo.find_many(&title.actor_ids).await?;
        let mut by_id: HashMap<i64, Actor> = actors.into_iter().map(|a| (a.id, a)).collect();
        let cast = title
            .actor_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        Ok(cast)
    }

    /// Returns the titles of one variant an actor is linked to, in stored
    /// link order.
    pub async fn get_actor_titles(&self, actor_id: i64, kind: TitleKind) -> AppResult<Vec<Title>> {
        let actor = self.require_actor(actor_id).await?;

        let titles = self.title_repo.find_many(kind, actor.title_ids(kind)).await?;
        let mut by_id: HashMap<i64, Title> = titles.into_iter().map(|t| (t.id, t)).collect();
        let ordered = actor
            .title_ids(kind)
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        Ok(ordered)
    }

    /// Cross-checks both sides of the relation for every actor and title.
    /// A consistent store returns Ok; any one-sided link fails with a
    /// description of each mismatch.
    pub async fn verify_symmetry(&self) -> AppResult<()> {
        let actors = self.actor_repo.get_all().await?;

        let mut problems = Vec::new();
        for kind in TitleKind::ALL {
            let titles = self.title_repo.get_all(kind).await?;
            let titles_by_id: HashMap<i64, &Title> = titles.iter().map(|t| (t.id, t)).collect();
            let actors_by_id: HashMap<i64, &Actor> = actors.iter().map(|a| (a.id, a)).collect();

            for actor in &actors {
                for title_id in actor.title_ids(kind) {
                    let linked_back = titles_by_id
                        .get(title_id)
                        .map(|t| t.has_actor(actor.id))
                        .unwrap_or(false);
                    if !linked_back {
                        problems.push(format!(
                            "actor {} lists {} {} but is not in its cast",
                            actor.id, kind, title_id
                        ));
                    }
                }
            }
            for title in &titles {
                for actor_id in &title.actor_ids {
                    let linked_back = actors_by_id
                        .get(actor_id)
                        .map(|a| a.has_title(kind, title.id))
                        .unwrap_or(false);
                    if !linked_back {
                        problems.push(format!(
                            "{} {} lists actor {} who does not list it back",
                            kind, title.id, actor_id
                        ));
                    }
                }
            }
        }

        if !problems.is_empty() {
            return Err(AppError::InvariantViolation(problems.join("; ")));
        }
        Ok(())
    }

    async fn require_actor(&self, id: i64) -> AppResult<Actor> {
        self.actor_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor with id {} not found", id)))
    }

    async fn require_title(&self, kind: TitleKind, id: i64) -> AppResult<Title> {
        self.title_repo.find(kind, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} with id {} not found", kind.label(), id))
        })
    }

    /// Loads every listed title, failing with the full set of missing ids
    /// before anything is mutated. Caller order is kept, duplicates collapse.
    async fn require_titles(&self, kind: TitleKind, title_ids: &[i64]) -> AppResult<Vec<Title>> {
        let mut wanted: Vec<i64> = Vec::new();
        for id in title_ids {
            if !wanted.contains(id) {
                wanted.push(*id);
            }
        }

        let found = self.title_repo.find_many(kind, &wanted).await?;
        if found.len() != wanted.len() {
            let known: HashSet<i64> = found.iter().map(|t| t.id).collect();
            let missing: Vec<String> = wanted
                .iter()
                .filter(|id| !known.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(AppError::NotFound(format!(
                "Unknown {} ids: {}",
                kind,
                missing.join(", ")
            )));
        }

        let mut by_id: HashMap<i64, Title> = found.into_iter().map(|t| (t.id, t)).collect();
        Ok(wanted.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
