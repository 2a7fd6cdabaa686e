use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub struct StackExchangeSearchResult {
    pub body: String,
    pub status: StatusCode,
}

/// Envelope of `GET /2.3/search/advanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<QuestionItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionItem {
    pub question_id: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Present only when the filter includes answers; kept opaque.
    #[serde(default)]
    pub answers: Option<serde_json::Value>,
}

pub async fn fetch_tagged_questions(
    site: &str,
    tag: &str,
) -> Result<StackExchangeSearchResult, FetchTaggedQuestionsError> {
    let client = Client::new();

    // The Stack Exchange API gzips every response, hence the gzip feature.
    let response = client
        .get("https://api.stackexchange.com/2.3/search/advanced")
        .query(&[
            ("order", "desc"),
            ("sort", "activity"),
            ("tagged", tag),
            ("site", site),
            ("filter", "withbody"),
        ])
        .send()
        .await
        .map_err(|source| FetchTaggedQuestionsError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchTaggedQuestionsError::ResponseRead { source })?;

    Ok(StackExchangeSearchResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchTaggedQuestionsError {
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
    fn decodes_search_envelope() {
        let body = r#"{
            "items": [
                {
                    "question_id": 78901234,
                    "title": "How do I relabel metrics?",
                    "body": "<p>Full question body.</p>",
                    "tags": ["prometheus"],
                    "score": 3
                }
            ],
            "has_more": true,
            "quota_max": 300,
            "quota_remaining": 297
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].question_id, 78901234);
        assert_eq!(parsed.items[0].title, "How do I relabel metrics?");
        assert!(parsed.items[0].answers.is_none());
    }

    #[test]
    fn body_and_answers_default_when_absent() {
        let body = r#"{"items": [{"question_id": 1, "title": "t"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items[0].body, "");
        assert!(parsed.items[0].answers.is_none());
    }
}
