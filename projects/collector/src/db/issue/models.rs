use chrono::NaiveDateTime;
use diesel::prelude::*;
use crate::db::schema::github_issues;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = github_issues)]
pub struct GitHubIssue {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub body: Option<String>,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = github_issues)]
pub struct NewGitHubIssue<'a> {
    pub id: i64,
    pub number: i64,
    pub title: &'a str,
    pub body: Option<&'a str>,
}
