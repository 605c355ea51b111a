//! The pagination loop
//!
//! A [`Paginator`] is created per run and pulled one page at a time.
//! Requests are strictly sequential: the next one is only sent when the
//! consumer asks for the next page.

use super::request::{RequestTemplate, CLIENT_ID_HEADER};
use super::types::{Image, PaginationState, ResultPage};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Transport};
use crate::types::JsonValue;
use futures::{Stream, TryStreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Type alias for the page stream returned by [`Paginator::into_stream`]
pub type PageStream = Pin<Box<dyn Stream<Item = Result<ResultPage>> + Send>>;

/// Lazy, single-pass sequence of result pages for one search
pub struct Paginator {
    transport: Arc<dyn Transport>,
    request: RequestTemplate,
    count: u32,
    state: PaginationState,
}

impl Paginator {
    /// Create a paginator that sends requests with a default [`ReqwestTransport`]
    pub fn new(config: SearchConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a paginator that sends requests through `transport`
    pub fn with_transport(config: SearchConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let request = RequestTemplate::new(&config)?;
        let state = PaginationState::new(config.offset, config.amount, config.client_id);

        debug!(
            "New image search for '{}': offset={}, count={}, amount={}",
            config.query, config.offset, config.count, config.amount
        );

        Ok(Self {
            transport,
            request,
            count: config.count,
            state,
        })
    }

    /// Current run state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Whether no further requests will be made
    pub fn is_done(&self) -> bool {
        !self.state.is_running()
    }

    /// Fetch the next page
    ///
    /// Returns `Ok(None)` once the run is done. After an error the run is
    /// failed and every later call returns `Ok(None)` without a request.
    pub async fn next_page(&mut self) -> Result<Option<ResultPage>> {
        if !self.state.is_running() {
            return Ok(None);
        }

        match self.fetch().await {
            Ok(page) => {
                if !self.state.is_running() {
                    info!(
                        "Image search finished after {} page(s) at offset {}",
                        self.state.pages, self.state.offset
                    );
                }
                Ok(Some(page))
            }
            Err(e) => {
                warn!("Image search failed at offset {}: {}", self.state.offset, e);
                self.state.fail();
                Err(e)
            }
        }
    }

    async fn fetch(&mut self) -> Result<ResultPage> {
        let offset = self.state.offset;
        let count = self.state.page_size(self.count);
        let url = self.request.url(offset, count);
        let headers = self.request.headers(self.state.client_id.as_deref())?;

        debug!(
            "Requesting page {}: offset={}, count={}",
            self.state.pages + 1,
            offset,
            count
        );

        let response = self.transport.get(&url, &headers).await?;
        if !response.is_success() {
            return Err(Error::http_status(
                response.status(),
                response.status_text(),
            ));
        }

        let body: JsonValue = response.json()?;
        let page = ResultPage::from_json(body)?;

        self.state.advance(offset, &page)?;
        self.state.capture_client_id(response.header(CLIENT_ID_HEADER));

        debug!(
            "Received {} image(s): nextOffset={}, totalEstimatedMatches={}",
            page.len(),
            page.next_offset,
            page.total_estimated_matches
        );

        Ok(page)
    }

    /// Turn the paginator into a `Stream` of pages
    ///
    /// The stream ends after the last page or right after the first error.
    pub fn into_stream(self) -> PageStream {
        Box::pin(futures::stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page, paginator)))
        }))
    }

    /// Drain the run and return every image in order
    pub async fn collect_images(self) -> Result<Vec<Image>> {
        self.into_stream()
            .try_fold(Vec::new(), |mut images, page| async move {
                images.extend(page.value);
                Ok(images)
            })
            .await
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("count", &self.count)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Start a search over `transport` and return its pages as a stream
pub fn search(config: SearchConfig, transport: Arc<dyn Transport>) -> Result<PageStream> {
    Ok(Paginator::with_transport(config, transport)?.into_stream())
}
