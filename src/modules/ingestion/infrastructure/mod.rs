pub mod cursor_repository_impl;
pub mod models;

pub use cursor_repository_impl::CursorRepositoryImpl;
