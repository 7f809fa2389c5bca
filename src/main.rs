use std::sync::Arc;
use std::time::Duration;

use kino::modules::catalog::domain::repositories::{
    ActorRepository, GenreRepository, LinkRepository, TitleRepository,
};
use kino::modules::catalog::infrastructure::{
    ActorRepositoryImpl, GenreRepositoryImpl, LinkRepositoryImpl, TitleRepositoryImpl,
};
use kino::modules::catalog::GenreService;
use kino::modules::ingestion::domain::CursorRepository;
use kino::modules::ingestion::infrastructure::CursorRepositoryImpl;
use kino::modules::ingestion::{
    ActorReconciler, BootstrapService, CatalogClient, IngestOptions, IngestService,
    DEFAULT_START_ID,
};
use kino::modules::tmdb::TmdbClient;
use kino::modules::tracking::infrastructure::AttemptRepositoryImpl;
use kino::modules::tracking::{AttemptRepository, AttemptTracker, TrackingService};
use kino::shared::utils::logger::init_logger;
use kino::shared::Database;

const DEFAULT_TICK_SECONDS: u64 = 30;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let database = Arc::new(Database::from_env()?);
    database.run_migrations()?;

    // Repositories
    let genre_repo: Arc<dyn GenreRepository> =
        Arc::new(GenreRepositoryImpl::new(Arc::clone(&database)));
    let title_repo: Arc<dyn TitleRepository> =
        Arc::new(TitleRepositoryImpl::new(Arc::clone(&database)));
    let actor_repo: Arc<dyn ActorRepository> =
        Arc::new(ActorRepositoryImpl::new(Arc::clone(&database)));
    let link_repo: Arc<dyn LinkRepository> =
        Arc::new(LinkRepositoryImpl::new(Arc::clone(&database)));
    let cursor_repo: Arc<dyn CursorRepository> =
        Arc::new(CursorRepositoryImpl::new(Arc::clone(&database)));
    let attempt_repo: Arc<dyn AttemptRepository> =
        Arc::new(AttemptRepositoryImpl::new(Arc::clone(&database)));

    // Services
    let tracker: Arc<dyn AttemptTracker> = Arc::new(TrackingService::new(attempt_repo));
    let catalog_client: Arc<dyn CatalogClient> = Arc::new(TmdbClient::from_env(tracker)?);

    let genre_service = Arc::new(GenreService::new(
        Arc::clone(&genre_repo),
        Arc::clone(&title_repo),
    ));
    let reconciler = Arc::new(ActorReconciler::new(
        Arc::clone(&actor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&link_repo),
        Arc::clone(&genre_service),
        Arc::clone(&catalog_client),
    ));
    let ingest_service = IngestService::new(
        Arc::clone(&cursor_repo),
        Arc::clone(&title_repo),
        Arc::clone(&genre_service),
        reconciler,
        Arc::clone(&catalog_client),
    );
    let bootstrap = BootstrapService::new(
        Arc::clone(&cursor_repo),
        Arc::clone(&genre_service),
        Arc::clone(&catalog_client),
    );

    let start_id = env_or("KINO_START_ID", DEFAULT_START_ID);
    bootstrap.run(start_id).await?;

    let tick_seconds = env_or("KINO_TICK_SECONDS", DEFAULT_TICK_SECONDS);
    let options = IngestOptions::default();
    let mut ticker = tokio::time::interval(Duration::from_secs(tick_seconds));

    log::info!("Ingestion loop running every {}s", tick_seconds);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = ingest_service.process_next_id(&options).await {
                    log::error!("Ingest tick failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutdown signal received, stopping ingestion loop");
                break;
            }
        }
    }

    Ok(())
}
