//! Local persistence layer.
//!
//! A single JSON-document file holds the store: an integer schema version and
//! the persisted `Person` rows keyed by email. Every mutation is written to
//! disk immediately. A store that cannot be initialized degrades silently —
//! reads return empty, writes become logged no-ops — rather than failing the
//! caller.

pub mod store;

pub use store::Database;
