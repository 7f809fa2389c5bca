pub mod actor_repository_impl;
pub mod genre_repository_impl;
pub mod link_repository_impl;
pub mod models;
pub mod title_repository_impl;

pub use actor_repository_impl::ActorRepositoryImpl;
pub use genre_repository_impl::GenreRepositoryImpl;
pub use link_repository_impl::LinkRepositoryImpl;
pub use title_repository_impl::TitleRepositoryImpl;
