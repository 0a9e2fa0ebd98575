//! HTTP client for the study API.

pub mod models;

use std::collections::HashMap;

use drill_core::{Item, ItemId, ItemResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use models::{
    AssignmentResource, Collection, CreateReviewRequest, ReviewBody, SubjectResource,
    SummaryReport,
};

pub const API_URL: &str = "https://api.wanikani.com/v2";

/// Client for the study API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(API_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        parse(check(resp).await?).await
    }

    /// Lesson and review availability.
    pub async fn summary(&self) -> Result<SummaryReport> {
        self.get(&self.url("summary")).await
    }

    /// Fetch subjects and convert them into items, in the order of `ids`.
    ///
    /// Subjects of unsupported types are skipped.
    pub async fn subjects(&self, ids: &[ItemId]) -> Result<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(ItemId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut next = Some(self.url(&format!("subjects?ids={joined}")));
        let mut by_id = HashMap::new();

        while let Some(url) = next {
            let page: Collection<SubjectResource> = self.get(&url).await?;
            for resource in page.data {
                match resource.into_item() {
                    Ok(item) => {
                        by_id.insert(item.id, item);
                    }
                    Err(error) => tracing::warn!(%error, "skipping subject"),
                }
            }
            next = page.pages.and_then(|pages| pages.next_url);
        }

        tracing::debug!(requested = ids.len(), received = by_id.len(), "fetched subjects");
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Report a completed review.
    pub async fn submit_review(&self, result: &ItemResult) -> Result<()> {
        let request = CreateReviewRequest {
            review: ReviewBody {
                subject_id: result.item_id,
                incorrect_meaning_answers: result.meaning_wrong,
                incorrect_reading_answers: result.reading_wrong,
            },
        };
        let resp = self
            .client
            .post(self.url("reviews"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Assignment tracking the user's progress on a subject.
    pub async fn assignment_id(&self, subject_id: ItemId) -> Result<Option<u64>> {
        let url = self.url(&format!("assignments?subject_ids={subject_id}"));
        let page: Collection<AssignmentResource> = self.get(&url).await?;
        Ok(page.data.first().map(|assignment| assignment.id))
    }

    /// Move a lesson into the review queue.
    pub async fn start_assignment(&self, assignment_id: u64) -> Result<()> {
        let resp = self
            .client
            .put(self.url(&format!("assignments/{assignment_id}/start")))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
}
