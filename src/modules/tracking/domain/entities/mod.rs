pub mod attempt;

pub use attempt::{day_key, AttemptRecord, DailyRequestCount};
