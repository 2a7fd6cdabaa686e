pub mod jobs;

use std::sync::Arc;

use axum::http::StatusCode;
use interfaces_github_issues::index::{
    fetch_repo_issues, FetchRepoIssuesError, GitHubIssuesResult, IssueItem,
};
use interfaces_stackexchange_questions::index::{
    fetch_tagged_questions, FetchTaggedQuestionsError, QuestionItem, SearchResponse,
    StackExchangeSearchResult,
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::db::issue::{models::NewGitHubIssue, queries::upsert_issue};
use crate::db::post::{models::NewStackOverflowPost, queries::upsert_post};
use crate::db::PgPool;
use crate::metrics::Metrics;
use self::jobs::JobRegistry;

pub struct CollectionOutcome {
    pub questions_stored: usize,
    pub issues_stored: usize,
}

#[derive(Debug, Error)]
pub enum RunCollectionError {
    #[error("FetchTaggedQuestions: {source}")]
    FetchTaggedQuestions {
        #[from]
        source: FetchTaggedQuestionsError,
    },

    #[error("FetchRepoIssues: {source}")]
    FetchRepoIssues {
        #[from]
        source: FetchRepoIssuesError,
    },

    #[error("UpstreamStatus: {source_api} returned {status}")]
    UpstreamStatus {
        source_api: &'static str,
        status: StatusCode,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },

    #[error("SerializeAnswers: {source}")]
    SerializeAnswers {
        source: serde_json::Error,
    },

    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error("UpsertPost: {source}")]
    UpsertPost {
        #[from]
        source: crate::db::post::queries::UpsertPostError,
    },

    #[error("UpsertIssue: {source}")]
    UpsertIssue {
        #[from]
        source: crate::db::issue::queries::UpsertIssueError,
    },
}

/// Sequentially fetches both sources and upserts every decoded record.
/// A failure on the second source leaves the first source's rows in place.
pub async fn run_collection(
    pool: &PgPool,
    metrics: &Metrics,
    config: &Config,
) -> Result<CollectionOutcome, RunCollectionError> {
    let questions = fetch_stackoverflow_questions(metrics, config).await?;

    let mut conn = pool.get()?;

    let mut questions_stored = 0usize;
    for item in &questions {
        let answers_json = match &item.answers {
            Some(value) => serde_json::to_string(value)
                .map_err(|source| RunCollectionError::SerializeAnswers { source })?,
            None => String::from("[]"),
        };

        upsert_post(
            &mut conn,
            &NewStackOverflowPost {
                question_id: item.question_id,
                title: &item.title,
                body: &item.body,
                answers: &answers_json,
            },
        )?;
        questions_stored += 1;
    }

    let issues = fetch_github_issues(metrics, config).await?;

    let mut issues_stored = 0usize;
    for item in &issues {
        upsert_issue(
            &mut conn,
            &NewGitHubIssue {
                id: item.id,
                number: item.number,
                title: &item.title,
                body: item.body.as_deref(),
            },
        )?;
        issues_stored += 1;
    }

    Ok(CollectionOutcome {
        questions_stored,
        issues_stored,
    })
}

/// Registers a job, runs the collection on the runtime, and records the
/// outcome in the registry. Returns immediately with the job id.
pub fn spawn_collection(
    pool: PgPool,
    metrics: Arc<Metrics>,
    config: Arc<Config>,
    registry: Arc<JobRegistry>,
) -> Uuid {
    let job_id = registry.start();

    tokio::spawn(async move {
        match run_collection(&pool, &metrics, &config).await {
            Ok(outcome) => {
                info!(
                    %job_id,
                    questions_stored = outcome.questions_stored,
                    issues_stored = outcome.issues_stored,
                    "collection run finished"
                );
                registry.complete(job_id, outcome.questions_stored, outcome.issues_stored);
            }
            Err(err) => {
                error!(%job_id, error = %err, "collection run failed");
                registry.fail(job_id, err.to_string());
            }
        }
    });

    job_id
}

async fn fetch_stackoverflow_questions(
    metrics: &Metrics,
    config: &Config,
) -> Result<Vec<QuestionItem>, RunCollectionError> {
    metrics.stackoverflow_api_calls.inc();

    let StackExchangeSearchResult { body, status } =
        fetch_tagged_questions("stackoverflow", &config.stackoverflow_tag).await?;

    metrics.data_collected_bytes.inc_by(body.len() as u64);

    let items = decode_questions(status, &body)?;

    for item in &items {
        info!(
            question_id = item.question_id,
            title = %item.title,
            "fetched stackoverflow question"
        );
    }

    Ok(items)
}

fn decode_questions(
    status: StatusCode,
    body: &str,
) -> Result<Vec<QuestionItem>, RunCollectionError> {
    if !status.is_success() {
        return Err(RunCollectionError::UpstreamStatus {
            source_api: "stackoverflow",
            status,
        });
    }

    let parsed: SearchResponse = serde_json::from_str(body)?;
    Ok(parsed.items)
}

async fn fetch_github_issues(
    metrics: &Metrics,
    config: &Config,
) -> Result<Vec<IssueItem>, RunCollectionError> {
    metrics.github_api_calls.inc();

    let GitHubIssuesResult { body, status } = fetch_repo_issues(
        config.github_token.as_deref(),
        &config.github_owner,
        &config.github_repo,
    )
    .await?;

    metrics.data_collected_bytes.inc_by(body.len() as u64);

    let issues = decode_issues(status, &body)?;

    for issue in &issues {
        info!(
            id = issue.id,
            number = issue.number,
            title = %issue.title,
            "fetched github issue"
        );
    }

    Ok(issues)
}

fn decode_issues(status: StatusCode, body: &str) -> Result<Vec<IssueItem>, RunCollectionError> {
    if !status.is_success() {
        return Err(RunCollectionError::UpstreamStatus {
            source_api: "github",
            status,
        });
    }

    let issues: Vec<IssueItem> = serde_json::from_str(body)?;
    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_github_response_reports_the_status_not_a_decode_error() {
        let result = decode_issues(
            StatusCode::FORBIDDEN,
            r#"{"message": "API rate limit exceeded"}"#,
        );

        match result {
            Err(RunCollectionError::UpstreamStatus { source_api, status }) => {
                assert_eq!(source_api, "github");
                assert_eq!(status, StatusCode::FORBIDDEN);
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[test]
    fn non_success_stackoverflow_response_reports_the_status() {
        let result = decode_questions(StatusCode::BAD_REQUEST, r#"{"error_id": 400}"#);

        match result {
            Err(RunCollectionError::UpstreamStatus { source_api, status }) => {
                assert_eq!(source_api, "stackoverflow");
                assert_eq!(status, StatusCode::BAD_REQUEST);
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[test]
    fn successful_payloads_still_decode() {
        let issues = decode_issues(
            StatusCode::OK,
            r#"[{"id": 1, "number": 2, "title": "t", "body": null}]"#,
        )
        .unwrap();
        assert_eq!(issues.len(), 1);

        let questions = decode_questions(
            StatusCode::OK,
            r#"{"items": [{"question_id": 5, "title": "q"}]}"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn upstream_status_error_text_names_source_and_code() {
        let err = RunCollectionError::UpstreamStatus {
            source_api: "github",
            status: StatusCode::FORBIDDEN,
        };
        let text = err.to_string();
        assert!(text.contains("github"));
        assert!(text.contains("403"));
    }
}
