pub mod attempt_repository;

pub use attempt_repository::AttemptRepository;
