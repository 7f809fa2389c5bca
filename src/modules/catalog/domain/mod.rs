pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{Actor, Genre, Title};
pub use repositories::{ActorRepository, GenreRepository, LinkRepository, TitleRepository};
pub use value_objects::{PersonName, TitleKind};
