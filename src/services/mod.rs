//! Service objects.
//!
//! Each service pairs one transport-facade operation with its domain-specific
//! request shaping and response interpretation. Services hold their
//! collaborators by injection — the HTTP facade, and for login the store
//! handle — and report completion through the returned future; transfer
//! progress flows through the facade's progress channel untouched.

pub mod download;
pub mod login;
pub mod upload;

pub use download::DownloadService;
pub use login::LoginService;
pub use upload::UploadService;
