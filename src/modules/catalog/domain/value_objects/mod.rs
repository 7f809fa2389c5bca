pub mod person_name;
pub mod title_kind;

pub use person_name::PersonName;
pub use title_kind::TitleKind;
