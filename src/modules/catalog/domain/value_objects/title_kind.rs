use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// The two catalog title variants. Everything relation-shaped is
/// parameterized over this instead of being duplicated per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    Movie,
    TvShow,
}

impl TitleKind {
    pub const ALL: [TitleKind; 2] = [TitleKind::Movie, TitleKind::TvShow];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::TvShow => "tv_show",
        }
    }

    /// Human-readable label for error messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TitleKind::Movie => "Movie",
            TitleKind::TvShow => "TV show",
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TitleKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(TitleKind::Movie),
            "tv_show" => Ok(TitleKind::TvShow),
            other => Err(AppError::InvalidInput(format!(
                "Unknown title kind: '{}'",
                other
            ))),
        }
    }
}
