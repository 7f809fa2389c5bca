pub mod catalog_client;

pub use catalog_client::{
    CastCredit, CatalogClient, CatalogGenre, KnownForTitle, PersonMatch, TitleDetails, TitleHit,
};
