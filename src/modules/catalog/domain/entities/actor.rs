use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::value_objects::{PersonName, TitleKind};

/// An actor with one mirrored title id-set per title variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub movie_ids: Vec<i64>,
    pub tv_show_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Actor {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            movie_ids: Vec::new(),
            tv_show_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> PersonName {
        PersonName::new(self.first_name.clone(), self.last_name.clone())
    }

    pub fn full_name(&self) -> String {
        self.name().to_string()
    }

    pub fn title_ids(&self, kind: TitleKind) -> &[i64] {
        match kind {
            TitleKind::Movie => &self.movie_ids,
            TitleKind::TvShow => &self.tv_show_ids,
        }
    }

    fn title_ids_mut(&mut self, kind: TitleKind) -> &mut Vec<i64> {
        match kind {
            TitleKind::Movie => &mut self.movie_ids,
            TitleKind::TvShow => &mut self.tv_show_ids,
        }
    }

    pub fn has_title(&self, kind: TitleKind, title_id: i64) -> bool {
        self.title_ids(kind).contains(&title_id)
    }

    pub fn add_title(&mut self, kind: TitleKind, title_id: i64) -> bool {
        let ids = self.title_ids_mut(kind);
        if !ids.contains(&title_id) {
            ids.push(title_id);
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    pub fn remove_title(&mut self, kind: TitleKind, title_id: i64) -> bool {
        let ids = self.title_ids_mut(kind);
        let original_len = ids.len();
        ids.retain(|id| *id != title_id);

        if ids.len() < original_len {
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Replace one variant's id-set, keeping first occurrence order.
    pub fn set_titles(&mut self, kind: TitleKind, title_ids: Vec<i64>) {
        let ids = self.title_ids_mut(kind);
        ids.clear();
        for id in title_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, first_name: impl Into<String>, last_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.updated_at = Utc::now();
    }
}
