use std::sync::Arc;

use crate::log_info;
use crate::modules::catalog::domain::entities::Actor;
use crate::modules::catalog::domain::repositories::{
    ActorRepository, LinkRepository, TitleRepository,
};
use crate::modules::catalog::domain::value_objects::{PersonName, TitleKind};
use crate::shared::errors::{AppError, AppResult};

pub struct ActorService {
    actor_repo: Arc<dyn ActorRepository>,
    title_repo: Arc<dyn TitleRepository>,
    link_repo: Arc<dyn LinkRepository>,
}

impl ActorService {
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

    pub async fn create_actor(&self, full_name: &str) -> AppResult<Actor> {
        crate::shared::utils::Validator::validate_person_name(full_name)?;
        let name = PersonName::parse(full_name);

        // Identity by name is case-insensitive
        if self
            .actor_repo
            .find_by_name_ci(&name.first, &name.last)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Actor '{}' already exists",
                name
            )));
        }

        let actor = self.actor_repo.create_local(&name.first, &name.last).await?;

        log_info!("Created actor '{}' with id {}", actor.full_name(), actor.id);
        Ok(actor)
    }

    pub async fn get_actor(&self, id: i64) -> AppResult<Option<Actor>> {
        let actor = self.actor_repo.find_by_id(id).await?;

        Ok(actor)
    }

    pub async fn get_all_actors(&self) -> AppResult<Vec<Actor>> {
        let actors = self.actor_repo.get_all().await?;

        Ok(actors)
    }

    pub async fn rename_actor(&self, id: i64, full_name: &str) -> AppResult<Actor> {
        let mut actor = self.require_actor(id).await?;

        crate::shared::utils::Validator::validate_person_name(full_name)?;
        let name = PersonName::parse(full_name);

        // Check if another actor already carries this name
        if let Some(existing) = self
            .actor_repo
            .find_by_name_ci(&name.first, &name.last)
            .await?
        {
            if existing.id != actor.id {
                return Err(AppError::AlreadyExists(format!(
                    "Actor '{}' already exists",
                    name
                )));
            }
        }

        actor.rename(name.first, name.last);
        let updated = self.actor_repo.save(&actor).await?;

        Ok(updated)
    }

    /// Deletes an actor and drops their id from every linked title of both
    /// variants in the same unit of work, keeping the relation symmetric.
    pub async fn delete_actor(&self, id: i64) -> AppResult<()> {
        let actor = self.require_actor(id).await?;

        let mut detached = Vec::new();
        for kind in TitleKind::ALL {
            let mut titles = self
                .title_repo
                .find_many(kind, actor.title_ids(kind))
                .await?;
            for title in &mut titles {
                title.remove_actor(id);
            }
            detached.append(&mut titles);
        }

        self.link_repo.delete_actor(id, &detached).await?;

        log_info!(
            "Deleted actor '{}' (id {}), unlinked {} titles",
            actor.full_name(),
            id,
            detached.len()
        );
        Ok(())
    }

    async fn require_actor(&self, id: i64) -> AppResult<Actor> {
        self.actor_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor with id {} not found", id)))
    }
}
