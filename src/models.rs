use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for ad fields the backend did not return.
pub const MISSING: &str = "N/A";

#[derive(Debug, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// The scraper's payload, kept untouched so it can be forwarded as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScrapeResponse(pub Value);

impl ScrapeResponse {
    /// Number of entries in the `ads` array; zero when it is absent or not an array.
    pub fn ad_count(&self) -> usize {
        self.0.get("ads").and_then(Value::as_array).map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Ad {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ad {
    pub fn page_name_or_default(&self) -> &str {
        self.page_name.as_deref().unwrap_or(MISSING)
    }

    /// First `max_chars` characters of the description, followed by `...`.
    pub fn description_preview(&self, max_chars: usize) -> String {
        let description = self.ad_description.as_deref().unwrap_or(MISSING);
        let mut preview: String = description.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// Counters returned by the backend ingest endpoint. Absent counters are zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessResult {
    pub success: Option<bool>,
    pub processed: u64,
    pub skipped: u64,
    pub errors: u64,
    pub total_received: u64,
    pub metadata: Option<ProcessMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessMetadata {
    pub processed_at: Option<DateTime<Utc>>,
}

impl ProcessResult {
    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.as_ref().and_then(|m| m.processed_at)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyResponse {
    pub pagination: Pagination,
    pub ads: Vec<Ad>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Pagination {
    pub total: u64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub pages: Option<u32>,
}
