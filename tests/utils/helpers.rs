/// Test helper functions and service builders
use std::sync::Arc;

use kino::modules::catalog::infrastructure::{
    ActorRepositoryImpl, GenreRepositoryImpl, LinkRepositoryImpl, TitleRepositoryImpl,
};
use kino::modules::catalog::{
    ActorRepository, ActorService, CastService, GenreRepository, GenreService, LinkRepository,
    TitleRepository, TitleService,
};
use kino::modules::ingestion::infrastructure::CursorRepositoryImpl;
use kino::modules::ingestion::{
    ActorReconciler, BootstrapService, CatalogClient, CursorRepository, DiscoveryService,
    IngestService,
};
use kino::shared::Database;

pub struct TestServices {
    pub genre_service: Arc<GenreService>,
    pub title_service: Arc<TitleService>,
    pub actor_service: Arc<ActorService>,
    pub cast_service: Arc<CastService>,
    pub ingest_service: Arc<IngestService>,
    pub discovery_service: Arc<DiscoveryService>,
    pub bootstrap_service: Arc<BootstrapService>,
    pub reconciler: Arc<ActorReconciler>,
    pub cursor_repo: Arc<dyn CursorRepository>,
    pub genre_repo: Arc<dyn GenreRepository>,
    pub title_repo: Arc<dyn TitleRepository>,
    pub actor_repo: Arc<dyn ActorRepository>,
    pub link_repo: Arc<dyn LinkRepository>,
}

/// Build the full service graph over a test database, with the remote
/// catalog port replaced by the caller's double.
pub fn build_test_services(
    database: &Arc<Database>,
    catalog: Arc<dyn CatalogClient>,
) -> TestServices {
    let genre_repo: Arc<dyn GenreRepository> =
        Arc::new(GenreRepositoryImpl::new(Arc::clone(database)));
    let title_repo: Arc<dyn TitleRepository> =
        Arc::new(TitleRepositoryImpl::new(Arc::clone(database)));
    let actor_repo: Arc<dyn ActorRepository> =
        Arc::new(ActorRepositoryImpl::new(Arc::clone(database)));
    let link_repo: Arc<dyn LinkRepository> =
        Arc::new(LinkRepositoryImpl::new(Arc::clone(database)));
    let cursor_repo: Arc<dyn CursorRepository> =
        Arc::new(CursorRepositoryImpl::new(Arc::clone(database)));

    let genre_service = Arc::new(GenreService::new(
        Arc::clone(&genre_repo),
        Arc::clone(&title_repo),
    ));
    let title_service = Arc::new(TitleService::new(
        Arc::clone(&title_repo),
        Arc::clone(&actor_repo),
        Arc::clone(&link_repo),
        Arc::clone(&genre_service),
    ));
    let actor_service = Arc::new(ActorService::new(
        Arc::clone(&actor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&link_repo),
    ));
    let cast_service = Arc::new(CastService::new(
        Arc::clone(&actor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&link_repo),
    ));

    let reconciler = Arc::new(ActorReconciler::new(
        Arc::clone(&actor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&link_repo),
        Arc::clone(&genre_service),
        Arc::clone(&catalog),
    ));
    let ingest_service = Arc::new(IngestService::new(
        Arc::clone(&cursor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&genre_service),
        Arc::clone(&reconciler),
        Arc::clone(&catalog),
    ));
    let discovery_service = Arc::new(DiscoveryService::new(
        Arc::clone(&title_repo),
        Arc::clone(&genre_service),
        Arc::clone(&catalog),
    ));
    let bootstrap_service = Arc::new(BootstrapService::new(
        Arc::clone(&cursor_repo),
        Arc::clone(&genre_service),
        Arc::clone(&catalog),
    ));

    TestServices {
        genre_service,
        title_service,
        actor_service,
        cast_service,
        ingest_service,
        discovery_service,
        bootstrap_service,
        reconciler,
        cursor_repo,
        genre_repo,
        title_repo,
        actor_repo,
        link_repo,
    }
}
