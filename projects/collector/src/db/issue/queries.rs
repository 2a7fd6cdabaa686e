use thiserror::Error;
use diesel::prelude::*;
use diesel::upsert::excluded;
use crate::db::{issue::models::*, schema::github_issues::dsl::*};

#[derive(Debug, Error)]
pub enum UpsertIssueError {
    #[error("UpsertIssue: {source}")]
    UpsertIssue {
        #[from]
        source: diesel::result::Error,
    },
}

/// Insert-or-update keyed on the GitHub issue id; refetching the same issue
/// replaces its fields with the latest ones.
pub fn upsert_issue(
    conn: &mut PgConnection,
    new: &NewGitHubIssue,
) -> Result<GitHubIssue, UpsertIssueError> {
    diesel::insert_into(github_issues)
        .values(new)
        .on_conflict(id)
        .do_update()
        .set((
            number.eq(excluded(number)),
            title.eq(excluded(title)),
            body.eq(excluded(body)),
            fetched_at.eq(excluded(fetched_at)),
        ))
        .get_result(conn)
        .map_err(|source| UpsertIssueError::UpsertIssue { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::Connection;

    fn pg_conn() -> PgConnection {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let mut conn = PgConnection::establish(&url).expect("connect to test database");
        crate::db::run_migrations(&mut conn).expect("run migrations");
        conn.begin_test_transaction().expect("begin test transaction");
        conn
    }

    #[test]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    fn upserting_the_same_issue_id_twice_leaves_one_row_with_latest_fields() {
        let mut conn = pg_conn();

        upsert_issue(
            &mut conn,
            &NewGitHubIssue {
                id: -7,
                number: 100,
                title: "first title",
                body: Some("first body"),
            },
        )
        .unwrap();

        let updated = upsert_issue(
            &mut conn,
            &NewGitHubIssue {
                id: -7,
                number: 101,
                title: "second title",
                body: None,
            },
        )
        .unwrap();
        assert_eq!(updated.number, 101);

        let rows: Vec<GitHubIssue> = github_issues
            .filter(id.eq(-7_i64))
            .load(&mut conn)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 101);
        assert_eq!(rows[0].title, "second title");
        assert!(rows[0].body.is_none());
    }
}
