pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::TrackingService;
pub use domain::{day_key, AttemptRecord, AttemptRepository, AttemptTracker, DailyRequestCount};
