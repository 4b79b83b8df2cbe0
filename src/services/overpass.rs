use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{RawElement, SearchCategory};

/// Amenity values that classify a healthcare facility
const HEALTHCARE_AMENITIES: &str = "hospital|clinic|pharmacy|doctors";

/// Office values that classify an organization
const ORGANIZATION_OFFICES: &str = "ngo|company|government|association|foundation";

/// Server-side timeout hint embedded in every query, in seconds
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Errors that can occur when talking to the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("Overpass request failed: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("Overpass returned error status: {0}")]
    Api(reqwest::StatusCode),

    #[error("Invalid Overpass response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<RawElement>,
}

/// Overpass API client
///
/// Performs exactly one request/response exchange per call. There is no
/// retry and no caching; a failed call surfaces to the caller, who may
/// retry the whole request.
pub struct OverpassClient {
    endpoint: String,
    client: Client,
}

impl OverpassClient {
    /// Create a new Overpass client
    pub fn new(endpoint: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, client }
    }

    /// Execute one Overpass QL query and parse the element collection.
    ///
    /// An empty element list is a valid, non-error result.
    pub async fn fetch_elements(&self, query: &str) -> Result<Vec<RawElement>, OverpassError> {
        tracing::debug!("Posting Overpass query to {}", self.endpoint);

        let body = format!("data={}", urlencoding::encode(query));

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::error!("Overpass returned status {}", response.status());
            return Err(OverpassError::Api(response.status()));
        }

        let text = response.text().await?;

        let parsed: OverpassResponse = serde_json::from_str(&text)
            .map_err(|e| OverpassError::MalformedResponse(e.to_string()))?;

        tracing::debug!("Overpass returned {} elements", parsed.elements.len());

        Ok(parsed.elements)
    }

    /// Fetch a single element by identifier, members resolved.
    ///
    /// Returns `None` when the identifier matches nothing; the recurse-down
    /// tail of the query yields untagged skeleton members, so the facility
    /// itself is the first element carrying tags.
    pub async fn fetch_element(&self, id: i64) -> Result<Option<RawElement>, OverpassError> {
        let query = build_element_query(id);
        let elements = self.fetch_elements(&query).await?;

        Ok(elements.into_iter().find(|element| !element.tags.is_empty()))
    }
}

/// Build the point-in-radius search query for the requested category.
///
/// Healthcare and organization clauses are disjunctions over the
/// classifying tag values, each matching both point and area geometries;
/// `all` combines the two. The category is validated before this runs, so
/// every variant maps to a query.
pub fn build_search_query(category: SearchCategory, lat: f64, lon: f64, radius_m: u32) -> String {
    let mut clauses = String::new();

    if matches!(category, SearchCategory::All | SearchCategory::Healthcare) {
        clauses.push_str(&format!(
            "  node[\"amenity\"~\"^({v})$\"](around:{r},{lat},{lon});\n  way[\"amenity\"~\"^({v})$\"](around:{r},{lat},{lon});\n",
            v = HEALTHCARE_AMENITIES,
            r = radius_m,
        ));
    }

    if matches!(category, SearchCategory::All | SearchCategory::Organizations) {
        clauses.push_str(&format!(
            "  node[\"office\"~\"^({v})$\"](around:{r},{lat},{lon});\n  way[\"office\"~\"^({v})$\"](around:{r},{lat},{lon});\n",
            v = ORGANIZATION_OFFICES,
            r = radius_m,
        ));
    }

    format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n{clauses});\nout center;")
}

/// Build the single-element lookup query used by facility details.
///
/// Matches a node, way, or relation by identifier and requests the full
/// body plus recursively referenced members.
pub fn build_element_query(id: i64) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n  node({id});\n  way({id});\n  relation({id});\n);\nout body center;\n>;\nout skel qt;"
    )
}
