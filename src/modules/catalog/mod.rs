pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ActorService, CastService, GenreService, TitleService};
pub use domain::entities::{Actor, Genre, Title};
pub use domain::repositories::{ActorRepository, GenreRepository, LinkRepository, TitleRepository};

// Re-export common value objects for shorter imports
pub use domain::value_objects::{PersonName, TitleKind};
