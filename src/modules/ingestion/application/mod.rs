pub mod actor_reconciler;
pub mod bootstrap_service;
pub mod discovery_service;
pub mod ingest_service;
pub mod ports;

pub use actor_reconciler::ActorReconciler;
pub use bootstrap_service::{BootstrapService, DEFAULT_START_ID};
pub use discovery_service::DiscoveryService;
pub use ingest_service::{
    IngestOptions, IngestReport, IngestService, TickOutcome, DEFAULT_CAST_CAP,
};
