pub mod entities;
pub mod repositories;
pub mod tracker;

pub use entities::{day_key, AttemptRecord, DailyRequestCount};
pub use repositories::AttemptRepository;
pub use tracker::AttemptTracker;
