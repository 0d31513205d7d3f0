use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::codec::ImageResult;
use crate::error::{Result, SlideInsightError};
use crate::models::SearchHit;

#[cfg(test)]
use mockall::automock;

/// Boundary to the pre-built multimodal similarity index. Read-only for the
/// life of the process, so it can be shared across sessions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SlideIndex: Send + Sync {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    index_name: &'a str,
    query: &'a str,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

/// HTTP client for a similarity-index sidecar serving a named index
/// artifact.
pub struct HttpSlideIndex {
    client: reqwest::Client,
    base_url: String,
    index_name: String,
}

impl HttpSlideIndex {
    pub fn new(base_url: String, index_name: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            index_name,
        }
    }
}

#[async_trait]
impl SlideIndex for HttpSlideIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let request = SearchRequest {
            index_name: &self.index_name,
            query,
            k,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(SlideInsightError::Retrieval(format!(
                "index service returned {status}"
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            SlideInsightError::Retrieval(format!("failed to parse index response: {e}"))
        })?;
        Ok(parsed.results)
    }
}

/// One retrieval hit with its image decoded, ready for display and for
/// re-use in the generation request. Rank 1 is the most relevant match.
#[derive(Debug, Clone)]
pub struct SlideMatch {
    pub identifier: String,
    pub rank: usize,
    pub score: f32,
    pub image: ImageResult,
}

/// Wraps the similarity index: runs the query, re-ranks defensively by
/// score, and decodes every hit's image.
pub struct DocumentRetriever {
    index: Arc<dyn SlideIndex>,
}

impl DocumentRetriever {
    pub fn new(index: Arc<dyn SlideIndex>) -> Self {
        Self { index }
    }

    /// Top-k slides for a topic, ordered by non-increasing relevance score.
    /// Returns at most k matches; an empty result is valid here and left to
    /// the orchestrator to judge.
    pub async fn retrieve(&self, topic: &str, k: usize) -> Result<Vec<SlideMatch>> {
        info!("Retrieving top {} slides for topic: {}", k, topic);

        let mut hits = self.index.search(topic, k).await?;

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        let mut matches = Vec::with_capacity(hits.len());
        for (i, hit) in hits.into_iter().enumerate() {
            let image = ImageResult::from_base64(&hit.base64)?;
            matches.push(SlideMatch {
                identifier: format!("doc{}-p{}", hit.doc_id, hit.page_num),
                rank: i + 1,
                score: hit.score,
                image,
            });
        }

        Ok(matches)
    }
}
