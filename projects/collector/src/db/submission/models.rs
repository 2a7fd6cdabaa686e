use chrono::NaiveDateTime;
use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::submissions;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = submissions)]
pub struct Submission {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmission {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}
