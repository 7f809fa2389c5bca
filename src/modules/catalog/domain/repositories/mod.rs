pub mod actor_repository;
pub mod genre_repository;
pub mod link_repository;
pub mod title_repository;

pub use actor_repository::ActorRepository;
pub use genre_repository::GenreRepository;
pub use link_repository::LinkRepository;
pub use title_repository::TitleRepository;
