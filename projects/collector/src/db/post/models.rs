use chrono::NaiveDateTime;
use diesel::prelude::*;
use crate::db::schema::stackoverflow_posts;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = stackoverflow_posts)]
#[diesel(primary_key(question_id))]
pub struct StackOverflowPost {
    pub question_id: i64,
    pub title: String,
    pub body: String,
    pub answers: String,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stackoverflow_posts)]
pub struct NewStackOverflowPost<'a> {
    pub question_id: i64,
    pub title: &'a str,
    pub body: &'a str,
    pub answers: &'a str,
}
