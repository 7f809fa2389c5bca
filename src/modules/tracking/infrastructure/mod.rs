pub mod attempt_repository_impl;
pub mod models;

pub use attempt_repository_impl::AttemptRepositoryImpl;
