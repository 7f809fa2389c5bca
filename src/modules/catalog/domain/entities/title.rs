use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::value_objects::TitleKind;

/// A catalog title (movie or TV show).
///
/// `genre_ids` and `actor_ids` are ordered, de-duplicated id-sets. The actor
/// set mirrors `Actor::title_ids` for the same kind; the two sides are kept
/// symmetric by the cast synchronizer and the ingestion reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: i64,
    pub kind: TitleKind,
    pub name: String,
    pub year: Option<i32>,
    pub genre_ids: Vec<i64>,
    pub actor_ids: Vec<i64>,
    pub cast_fetched: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Title {
    /// A title keyed by an identity the caller already owns: the external
    /// catalog id on ingestion, or a freshly allocated local id.
    pub fn new(kind: TitleKind, id: i64, name: impl Into<String>, year: Option<i32>) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind,
            name: name.into(),
            year,
            genre_ids: Vec::new(),
            actor_ids: Vec::new(),
            cast_fetched: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_genre(&self, genre_id: i64) -> bool {
        self.genre_ids.contains(&genre_id)
    }

    pub fn add_genre(&mut self, genre_id: i64) -> bool {
        if !self.genre_ids.contains(&genre_id) {
            self.genre_ids.push(genre_id);
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    pub fn remove_genre(&mut self, genre_id: i64) -> bool {
        let original_len = self.genre_ids.len();
        self.genre_ids.retain(|id| *id != genre_id);

        if self.genre_ids.len() < original_len {
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Replace the genre set, keeping first occurrence order.
    pub fn set_genres(&mut self, genre_ids: Vec<i64>) {
        self.genre_ids.clear();
        for id in genre_ids {
            if !self.genre_ids.contains(&id) {
                self.genre_ids.push(id);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn has_actor(&self, actor_id: i64) -> bool {
        self.actor_ids.contains(&actor_id)
    }

    pub fn add_actor(&mut self, actor_id: i64) -> bool {
        if !self.actor_ids.contains(&actor_id) {
            self.actor_ids.push(actor_id);
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    pub fn remove_actor(&mut self, actor_id: i64) -> bool {
        let original_len = self.actor_ids.len();
        self.actor_ids.retain(|id| *id != actor_id);

        if self.actor_ids.len() < original_len {
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.updated_at = Utc::now();
    }

    pub fn mark_cast_fetched(&mut self) {
        self.cast_fetched = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Title {
        Title::new(TitleKind::Movie, 603, "The Matrix", Some(1999))
    }

    #[test]
    fn add_genre_is_idempotent() {
        let mut title = movie();
        assert!(title.add_genre(28));
        assert!(!title.add_genre(28));
        assert_eq!(title.genre_ids, vec![28]);
    }

    #[test]
    fn set_genres_deduplicates_preserving_order() {
        let mut title = movie();
        title.set_genres(vec![28, 878, 28, 12]);
        assert_eq!(title.genre_ids, vec![28, 878, 12]);
    }

    #[test]
    fn remove_genre_reports_whether_anything_changed() {
        let mut title = movie();
        title.set_genres(vec![28]);
        assert!(title.remove_genre(28));
        assert!(!title.remove_genre(28));
        assert!(title.genre_ids.is_empty());
    }

    #[test]
    fn actor_membership_round_trip() {
        let mut title = movie();
        assert!(title.add_actor(6384));
        assert!(title.has_actor(6384));
        assert!(!title.add_actor(6384));
        assert!(title.remove_actor(6384));
        assert!(!title.has_actor(6384));
    }
}
