//! Maven Central search.

use std::sync::Arc;

use serde::Deserialize;

use crate::http::HttpClient;
use crate::package::ArtifactCoordinate;
use crate::util::Deadline;
use crate::{DepsError, Result};

/// Search API response: `{"response": {"docs": [...]}}`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub response: SearchBody,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    pub docs: Vec<SearchDoc>,
}

/// One search hit. Only the coordinate fields are read.
#[derive(Debug, Deserialize)]
pub struct SearchDoc {
    pub g: String,
    pub a: String,
    #[serde(rename = "latestVersion")]
    pub latest_version: String,
}

impl From<SearchDoc> for ArtifactCoordinate {
    fn from(doc: SearchDoc) -> Self {
        ArtifactCoordinate::new(doc.g, doc.a, doc.latest_version)
    }
}

/// Resolves free-text library names to artifact coordinates.
pub struct MavenSearch {
    client: Arc<HttpClient>,
    url: String,
}

impl MavenSearch {
    pub fn new(client: Arc<HttpClient>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Query URL asking for a single JSON result.
    pub fn query_url(&self, query: &str) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}q={}&rows=1&wt=json",
            self.url,
            separator,
            urlencoding::encode(query)
        )
    }

    /// Return the coordinate of the first match, or `None` when nothing matches.
    ///
    /// Only the first document is considered; there is no scoring or paging.
    pub fn search(&self, query: &str, deadline: Option<&Deadline>) -> Result<Option<ArtifactCoordinate>> {
        let url = self.query_url(query);
        let data: SearchResponse = self.client.get_json(&url, deadline)?;

        log::debug!(
            "Search for {:?} returned {} docs ({} found)",
            query,
            data.response.docs.len(),
            data.response.num_found
        );

        Ok(data.response.docs.into_iter().next().map(ArtifactCoordinate::from))
    }

    /// Like [`search`](Self::search) but an empty result is an error.
    pub fn resolve(&self, query: &str, deadline: Option<&Deadline>) -> Result<ArtifactCoordinate> {
        self.search(query, deadline)?.ok_or_else(|| DepsError::NotFound {
            name: query.to_string(),
        })
    }
}
