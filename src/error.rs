//! Error taxonomy shared by the transport facade, service objects and storage.
//!
//! Two layers: `AppError` carries transport/storage failures with their source
//! intact, while `ErrorCode` is the closed set of codes the login endpoint
//! speaks plus the local conditions a caller may want to show the user.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Closed error-code enumeration. The first four values are wire values sent
/// by the login endpoint; the rest are assigned locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NoError = 0,
    InvalidCredentials = 100,
    UserNotVerified = 101,
    UserBlocked = 102,
    NoDataReceived = 103,
    NetworkUnavailable = 104,
    UnknownError = 105,
}

impl ErrorCode {
    /// Recognize a server-sent integer code. Unrecognized values return `None`;
    /// callers surface those as `UnknownError`.
    pub fn from_raw(raw: i64) -> Option<ErrorCode> {
        match raw {
            0 => Some(ErrorCode::NoError),
            100 => Some(ErrorCode::InvalidCredentials),
            101 => Some(ErrorCode::UserNotVerified),
            102 => Some(ErrorCode::UserBlocked),
            103 => Some(ErrorCode::NoDataReceived),
            104 => Some(ErrorCode::NetworkUnavailable),
            105 => Some(ErrorCode::UnknownError),
            _ => None,
        }
    }

    /// User-facing description for this code.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoError => "No error",
            ErrorCode::InvalidCredentials => "The email or password is incorrect",
            ErrorCode::UserNotVerified => "The account has not been verified yet",
            ErrorCode::UserBlocked => "The account has been blocked",
            ErrorCode::NoDataReceived => "The server returned no data",
            ErrorCode::NetworkUnavailable => "The network is unavailable",
            ErrorCode::UnknownError => "An unknown error occurred",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{}", .0.message())]
    Code(ErrorCode),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Collapse any failure into the closed `ErrorCode` taxonomy for display.
    ///
    /// Connectivity-shaped transport failures map to `NetworkUnavailable`;
    /// everything else without a domain code maps to `UnknownError`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Code(code) => *code,
            AppError::Network(err) if err.is_connect() || err.is_timeout() => {
                ErrorCode::NetworkUnavailable
            }
            _ => ErrorCode::UnknownError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_recognizes_wire_codes() {
        assert_eq!(ErrorCode::from_raw(0), Some(ErrorCode::NoError));
        assert_eq!(ErrorCode::from_raw(100), Some(ErrorCode::InvalidCredentials));
        assert_eq!(ErrorCode::from_raw(101), Some(ErrorCode::UserNotVerified));
        assert_eq!(ErrorCode::from_raw(102), Some(ErrorCode::UserBlocked));
    }

    #[test]
    fn from_raw_recognizes_local_codes() {
        assert_eq!(ErrorCode::from_raw(103), Some(ErrorCode::NoDataReceived));
        assert_eq!(ErrorCode::from_raw(104), Some(ErrorCode::NetworkUnavailable));
        assert_eq!(ErrorCode::from_raw(105), Some(ErrorCode::UnknownError));
    }

    #[test]
    fn from_raw_rejects_unknown_values() {
        assert_eq!(ErrorCode::from_raw(-1), None);
        assert_eq!(ErrorCode::from_raw(1), None);
        assert_eq!(ErrorCode::from_raw(999), None);
    }

    #[test]
    fn every_code_has_a_message() {
        let codes = [
            ErrorCode::NoError,
            ErrorCode::InvalidCredentials,
            ErrorCode::UserNotVerified,
            ErrorCode::UserBlocked,
            ErrorCode::NoDataReceived,
            ErrorCode::NetworkUnavailable,
            ErrorCode::UnknownError,
        ];
        for code in codes {
            assert!(!code.message().is_empty());
        }
    }

    #[test]
    fn code_error_displays_the_code_message() {
        let err = AppError::Code(ErrorCode::InvalidCredentials);
        assert_eq!(err.to_string(), ErrorCode::InvalidCredentials.message());
    }

    #[test]
    fn error_code_is_identity_for_domain_codes() {
        let err = AppError::Code(ErrorCode::UserBlocked);
        assert_eq!(err.error_code(), ErrorCode::UserBlocked);
    }

    #[test]
    fn error_code_collapses_unclassified_failures_to_unknown() {
        let io = AppError::Io(std::io::Error::other("boom"));
        assert_eq!(io.error_code(), ErrorCode::UnknownError);

        let json: serde_json::Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::Json(json).error_code(), ErrorCode::UnknownError);

        let storage = AppError::Storage("disk full".into());
        assert_eq!(storage.error_code(), ErrorCode::UnknownError);
    }
}
