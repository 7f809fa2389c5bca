pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::ports::{
    CastCredit, CatalogClient, CatalogGenre, KnownForTitle, PersonMatch, TitleDetails, TitleHit,
};
pub use application::{
    ActorReconciler, BootstrapService, DiscoveryService, IngestOptions, IngestReport,
    IngestService, TickOutcome, DEFAULT_CAST_CAP, DEFAULT_START_ID,
};
pub use domain::{CursorRepository, IngestionCursor};
