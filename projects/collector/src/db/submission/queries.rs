use thiserror::Error;
use diesel::prelude::*;
use crate::db::{submission::models::*, schema::submissions::dsl::*};

#[derive(Debug, Error)]
pub enum InsertSubmissionError {
    #[error("InsertSubmission: {source}")]
    InsertSubmission {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_submission(
    conn: &mut PgConnection,
    new: NewSubmission,
) -> Result<Submission, InsertSubmissionError> {
    diesel::insert_into(submissions)
        .values(new)
        .get_result(conn)
        .map_err(|source| InsertSubmissionError::InsertSubmission { source })
}
