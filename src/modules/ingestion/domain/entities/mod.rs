pub mod cursor;

pub use cursor::{IngestionCursor, CURSOR_ID};
