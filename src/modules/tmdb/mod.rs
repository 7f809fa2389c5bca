pub mod client;
pub mod mapper;
pub mod models;

pub use client::{TmdbClient, TMDB_API_BASE_URL};
pub use mapper::TmdbMapper;
