//! Core library for a starter client application: login, file upload, file
//! download, local persistence and reachability checking.
//!
//! Layers, outermost first:
//!
//! - `services` — login / upload / download service objects;
//! - `http` — the transport facade all services issue requests through;
//! - `storage` — the JSON-document store for persisted users;
//! - `models`, `error` — shared business objects and the error taxonomy.
//!
//! Everything is explicitly constructed and injected; there is no global
//! state. Network operations are async and resolve to exactly one terminal
//! outcome, with transfer progress reported over an mpsc channel.

pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{AppError, ErrorCode, Result};
pub use models::Person;
