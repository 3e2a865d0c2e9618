use serde::{Deserialize, Serialize};

/// A logged-in user as returned by the login endpoint and persisted locally.
///
/// `email` is the identity key: the store keeps at most one row per email.
/// Mapping from a user record is lenient — absent fields fall back to their
/// defaults, matching the endpoint's sparse responses. A record that is not a
/// JSON object does not map at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub email: String,
    /// Account activation flag as sent by the server.
    #[serde(default)]
    pub activated: i64,
    /// Account creation timestamp, opaque server integer.
    #[serde(default)]
    pub created: i64,
}
