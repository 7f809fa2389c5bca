pub mod persistence;

pub use persistence::{
    ActorRepositoryImpl, GenreRepositoryImpl, LinkRepositoryImpl, TitleRepositoryImpl,
};
