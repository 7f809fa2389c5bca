use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::modules::tracking::domain::entities::{AttemptRecord, DailyRequestCount};
use crate::schema::{daily_request_counts, request_attempts};

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = request_attempts)]
pub struct AttemptRow {
    pub id: i32,
    pub executed_at: NaiveDateTime,
    pub url: String,
    pub query_params: Option<String>,
    pub success: bool,
}

impl AttemptRow {
    pub fn into_entity(self) -> AttemptRecord {
        AttemptRecord {
            id: self.id,
            executed_at: self.executed_at.and_utc(),
            url: self.url,
            query_params: self.query_params,
            success: self.success,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = request_attempts)]
pub struct NewAttemptRow {
    pub executed_at: NaiveDateTime,
    pub url: String,
    pub query_params: Option<String>,
    pub success: bool,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = daily_request_counts)]
pub struct DailyCountRow {
    pub day: String,
    pub total_requests: i64,
}

impl DailyCountRow {
    pub fn into_entity(self) -> DailyRequestCount {
        DailyRequestCount {
            day: self.day,
            total_requests: self.total_requests,
        }
    }
}
