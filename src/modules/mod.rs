pub mod catalog;
pub mod ingestion;
pub mod tmdb;
pub mod tracking;
