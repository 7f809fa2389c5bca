pub mod entities;
pub mod repositories;

pub use entities::{IngestionCursor, CURSOR_ID};
pub use repositories::CursorRepository;
