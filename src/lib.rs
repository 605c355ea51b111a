//! # Bing Image Search
//!
//! A lazy, paginated client for the Bing Image Search v7 API.
//!
//! ## Features
//!
//! - **Pull-driven pagination**: one request per page, only when asked for
//! - **Bounded runs**: stop at the requested amount or the upstream's estimate
//! - **Session affinity**: the client ID from the first response is reused
//! - **Full filter set**: every optional filter is omitted unless set
//! - **Pluggable transport**: bring your own HTTP stack or use reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bing_image_search::{Paginator, SearchConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SearchConfig::builder()
//!         .key("...")
//!         .query("puffins")
//!         .amount(300)
//!         .build();
//!
//!     let mut pages = Paginator::new(config)?;
//!     while let Some(page) = pages.next_page().await? {
//!         for image in &page.value {
//!             println!("{:?}", image.content_url);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐     ┌────────────────────────┐     ┌─────────────┐
//! │ SearchConfig  │ ──▶ │ Paginator              │ ──▶ │ Transport   │
//! │ filters,      │     │ PaginationState        │     │ reqwest or  │
//! │ offset/amount │     │ next_page / into_stream│     │ custom      │
//! └───────────────┘     └────────────────────────┘     └─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and filter values
pub mod types;

/// Search configuration
pub mod config;

/// Transport seam and reqwest implementation
pub mod http;

/// The pagination loop
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Error, Result};
pub use http::{transport_fn, ReqwestTransport, Transport, TransportResponse};
pub use pagination::{search, Image, PageStream, Paginator, ResultPage};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
