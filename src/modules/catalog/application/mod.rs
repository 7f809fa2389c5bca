pub mod actor_service;
pub mod cast_service;
pub mod genre_service;
pub mod title_service;

pub use actor_service::ActorService;
pub use cast_service::CastService;
pub use genre_service::GenreService;
pub use title_service::TitleService;
