//! Pagination types
//!
//! `ResultPage` is one decoded response body. `PaginationState` holds the
//! bookkeeping for a single run and is only mutated by the paginator's
//! advance step.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response Types
// ============================================================================

/// One page of search results, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    /// Images on this page
    pub value: Vec<Image>,
    /// Offset to request next
    pub next_offset: u64,
    /// Upstream estimate of the total number of matches
    pub total_estimated_matches: u64,
    /// Remaining response fields (`_type`, `webSearchUrl`, `queryExpansions`, ...)
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl ResultPage {
    /// Decode a response body, rejecting bodies without the paging fields
    pub fn from_json(body: JsonValue) -> Result<Self> {
        serde_json::from_value(body)
            .map_err(|e| Error::malformed(format!("unexpected response shape: {e}")))
    }

    /// Number of images on the page
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the page has no images
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// A single image result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Full-size image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Page the image was found on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    /// Human readable size, e.g. `"43 KB"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Run State
// ============================================================================

/// Lifecycle of a pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// More pages may be requested
    Running,
    /// Stopping condition reached
    Done,
    /// A request failed; no further requests are made
    Failed,
}

/// Bookkeeping for one pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    /// Offset of the next request
    pub offset: u64,
    /// Results still wanted; may go negative when a page overshoots
    pub remaining: i64,
    /// Latest upstream estimate of available results
    pub available: u64,
    /// Session affinity token attached to requests
    pub client_id: Option<String>,
    /// Whether `client_id` is fixed for the rest of the run
    pub client_id_settled: bool,
    /// Pages fetched so far
    pub pages: u32,
    /// Current lifecycle state
    pub status: RunStatus,
}

impl PaginationState {
    /// Create the state for a run starting at `offset` wanting `amount` results
    pub fn new(offset: u64, amount: i64, client_id: Option<String>) -> Self {
        let available = offset.saturating_add(amount.max(0) as u64);
        let client_id_settled = client_id.is_some();

        let mut state = Self {
            offset,
            remaining: amount,
            available,
            client_id,
            client_id_settled,
            pages: 0,
            status: RunStatus::Running,
        };
        if state.is_exhausted() {
            state.status = RunStatus::Done;
        }
        state
    }

    /// `min(offset + remaining, available)`
    pub fn upper_bound(&self) -> u64 {
        bound(self.offset, self.remaining, self.available)
    }

    /// Whether the stopping condition holds
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.upper_bound()
    }

    /// Size of the next request given the per-request cap
    pub fn page_size(&self, count: u32) -> u32 {
        let left = self.upper_bound().saturating_sub(self.offset);
        left.min(u64::from(count)) as u32
    }

    /// Whether the run can still issue requests
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Fold a successful page into the state
    ///
    /// `requested_offset` is the offset the page was requested at. A
    /// `nextOffset` behind it, or a non-empty page whose `nextOffset` fails
    /// to move while the run would continue, is rejected and leaves the state
    /// untouched. An empty page that does not move the offset means the
    /// upstream has nothing left, which ends the run.
    pub fn advance(&mut self, requested_offset: u64, page: &ResultPage) -> Result<()> {
        if page.next_offset < requested_offset {
            return Err(Error::malformed(format!(
                "nextOffset {} is behind requested offset {}",
                page.next_offset, requested_offset
            )));
        }

        let remaining = self.remaining.saturating_sub(page.len() as i64);
        let available = page.total_estimated_matches;
        let exhausted = page.next_offset >= bound(page.next_offset, remaining, available);
        let stalled = page.next_offset == requested_offset;

        if stalled && !exhausted && !page.is_empty() {
            return Err(Error::malformed(format!(
                "nextOffset did not advance past {requested_offset}"
            )));
        }

        self.offset = page.next_offset;
        self.remaining = remaining;
        self.available = available;
        self.pages += 1;

        if exhausted || stalled {
            self.status = RunStatus::Done;
        }

        Ok(())
    }

    /// Adopt the token from the first response unless one is already fixed
    pub fn capture_client_id(&mut self, header: Option<&str>) {
        if self.client_id_settled {
            return;
        }
        self.client_id = header.map(str::to_string);
        self.client_id_settled = true;
    }

    /// Mark the run as failed
    pub fn fail(&mut self) {
        self.status = RunStatus::Failed;
    }
}

fn bound(offset: u64, remaining: i64, available: u64) -> u64 {
    if remaining <= 0 {
        return offset;
    }
    offset.saturating_add(remaining as u64).min(available)
}
