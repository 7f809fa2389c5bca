pub mod actor;
pub mod genre;
pub mod title;

pub use actor::Actor;
pub use genre::Genre;
pub use title::Title;
