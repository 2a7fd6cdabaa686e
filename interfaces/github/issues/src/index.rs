use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub struct GitHubIssuesResult {
    pub body: String,
    pub status: StatusCode,
}

/// One issue as returned by `GET /repos/{owner}/{repo}/issues`. The API
/// returns many more fields; only the stored ones are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueItem {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub body: Option<String>,
}

pub async fn fetch_repo_issues(
    token: Option<&str>,
    owner: &str,
    repo: &str,
) -> Result<GitHubIssuesResult, FetchRepoIssuesError> {
    let url = format!("https://api.github.com/repos/{owner}/{repo}/issues");

    let client = Client::new();

    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .header("User-Agent", "rust-client");

    // Unauthenticated calls work too, at a lower rate limit.
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    let response = request
        .send()
        .await
        .map_err(|source| FetchRepoIssuesError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchRepoIssuesError::ResponseRead { source })?;

    Ok(GitHubIssuesResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchRepoIssuesError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_issue_list_ignoring_extra_fields() {
        let body = r#"[
            {
                "id": 2401833912,
                "number": 14377,
                "title": "Remote write panics on shutdown",
                "body": "Seen on v2.52.0 under load.",
                "state": "open",
                "labels": [],
                "user": {"login": "someone"}
            },
            {
                "id": 2401833999,
                "number": 14378,
                "title": "Docs typo",
                "body": null
            }
        ]"#;

        let issues: Vec<IssueItem> = serde_json::from_str(body).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, 2401833912);
        assert_eq!(issues[0].number, 14377);
        assert_eq!(issues[0].body.as_deref(), Some("Seen on v2.52.0 under load."));
        assert!(issues[1].body.is_none());
    }

    #[test]
    fn rejects_non_array_payload() {
        let body = r#"{"message": "Bad credentials"}"#;
        assert!(serde_json::from_str::<Vec<IssueItem>>(body).is_err());
    }
}
