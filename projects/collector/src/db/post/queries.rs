use diesel::prelude::*;
use diesel::upsert::excluded;
use crate::db::{post::models::*, schema::stackoverflow_posts::dsl::*};

#[derive(Debug, thiserror::Error)]
pub enum UpsertPostError {
    #[error("UpsertPost: {source}")]
    UpsertPost {
        #[from]
        source: diesel::result::Error,
    },
}

/// Insert-or-update keyed on the Stack Overflow question id, so repeated
/// collection runs converge to one row per question.
pub fn upsert_post(
    conn: &mut PgConnection,
    new: &NewStackOverflowPost,
) -> Result<StackOverflowPost, UpsertPostError> {
    diesel::insert_into(stackoverflow_posts)
        .values(new)
        .on_conflict(question_id)
        .do_update()
        .set((
            title.eq(excluded(title)),
            body.eq(excluded(body)),
            answers.eq(excluded(answers)),
            fetched_at.eq(excluded(fetched_at)),
        ))
        .get_result(conn)
        .map_err(|source| UpsertPostError::UpsertPost { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::Connection;

    // Changes roll back with the test transaction; negative ids keep the
    // fixtures away from collected data when pointed at a shared database.
    fn pg_conn() -> PgConnection {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let mut conn = PgConnection::establish(&url).expect("connect to test database");
        crate::db::run_migrations(&mut conn).expect("run migrations");
        conn.begin_test_transaction().expect("begin test transaction");
        conn
    }

    #[test]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    fn upserting_the_same_question_id_twice_leaves_one_row_with_latest_fields() {
        let mut conn = pg_conn();

        upsert_post(
            &mut conn,
            &NewStackOverflowPost {
                question_id: -42,
                title: "first title",
                body: "first body",
                answers: "[]",
            },
        )
        .unwrap();

        let updated = upsert_post(
            &mut conn,
            &NewStackOverflowPost {
                question_id: -42,
                title: "second title",
                body: "second body",
                answers: r#"[{"answer_id": 1}]"#,
            },
        )
        .unwrap();
        assert_eq!(updated.title, "second title");

        let rows: Vec<StackOverflowPost> = stackoverflow_posts
            .filter(question_id.eq(-42_i64))
            .load(&mut conn)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "second title");
        assert_eq!(rows[0].body, "second body");
        assert_eq!(rows[0].answers, r#"[{"answer_id": 1}]"#);
    }
}
