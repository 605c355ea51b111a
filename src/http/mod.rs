//! HTTP module
//!
//! The [`Transport`] seam the paginator sends its requests through, and a
//! default implementation on top of `reqwest`.
//!
//! # Features
//!
//! - **Pluggable transport**: any `Transport` impl or async closure
//! - **Buffered responses**: status, headers and body captured up front
//! - **Single attempt**: no retry, backoff or rate limiting; wrap the
//!   transport if a caller needs them

mod client;
mod transport;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, ReqwestTransport};
pub use transport::{transport_fn, FnTransport, Transport, TransportResponse};
