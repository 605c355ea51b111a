//! Pagination module
//!
//! Drives the offset/count continuation loop against the image search
//! endpoint.
//!
//! # Overview
//!
//! Each run keeps an offset, the number of results still wanted and the
//! upstream's estimate of how many exist. A request asks for
//! `min(count, upper_bound - offset)` results where
//! `upper_bound = min(offset + remaining, available)`, and the run stops as
//! soon as `offset >= upper_bound`. The session token returned by the first
//! response is echoed on every later request of the run.

mod paginator;
mod request;
mod types;

pub use paginator::{search, PageStream, Paginator};
pub use request::{API_KEY_HEADER, CLIENT_ID_HEADER, CLIENT_IP_HEADER, LOCATION_HEADER};
pub use types::{Image, PaginationState, ResultPage, RunStatus};
