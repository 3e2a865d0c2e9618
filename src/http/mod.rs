//! Transport facade.
//!
//! This module is the sole place HTTP requests are constructed. It exposes
//! three operations — `execute` (JSON request/response), `upload` (bytes or
//! file) and `download` (to a local destination) — each asynchronous, each
//! resolving to exactly one terminal outcome. Upload and download additionally
//! report cumulative byte progress over an mpsc channel while the transfer is
//! in flight.
//!
//! Every operation runs a connectivity pre-flight first: when the network is
//! unreachable the operation resolves immediately with
//! `ErrorCode::NetworkUnavailable` and no request is issued.

use serde::Serialize;

pub mod client;
pub mod reachability;

pub use client::{HeaderMap, HttpService, Method};
pub use reachability::HttpProbe;

/// Where request parameters are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEncoding {
    /// URL query string.
    Query,
    /// URL-encoded request body.
    Form,
    /// JSON request body.
    Json,
}

/// Cumulative transfer progress. `bytes_transferred` is monotonically
/// non-decreasing across the events of one operation; `total_bytes` is `None`
/// when the server did not announce a total ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferProgress {
    pub bytes_transferred: u64,
    pub total_bytes: Option<u64>,
}

/// Channel end the facade pushes progress events into. Dropped receivers are
/// tolerated; progress then goes nowhere but the transfer continues.
pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<TransferProgress>;

/// Network reachability probe consulted before every operation.
///
/// Swappable so tests (and embedders with their own connectivity source) can
/// inject a stub instead of touching the network.
pub trait Connectivity: Send + Sync {
    fn is_reachable(&self) -> impl std::future::Future<Output = bool> + Send;
}
