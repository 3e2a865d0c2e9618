//! Login service: JSON POST of credentials, response normalization, and
//! persistence of the resulting user.

use serde_json::Value;

use crate::error::{AppError, ErrorCode, Result};
use crate::http::{Connectivity, HttpProbe, HttpService, Method, ParamEncoding};
use crate::models::Person;
use crate::storage::Database;

pub struct LoginService<C: Connectivity = HttpProbe> {
    http: HttpService<C>,
    db: Database,
    login_url: String,
}

impl LoginService<HttpProbe> {
    /// Service with the default reachability probe pointed at the login host.
    pub fn new(login_url: impl Into<String>, db: Database) -> Result<Self> {
        let login_url = login_url.into();
        let http = HttpService::new(&login_url)?;
        Ok(Self {
            http,
            db,
            login_url,
        })
    }
}

impl<C: Connectivity> LoginService<C> {
    pub fn with_http(http: HttpService<C>, db: Database, login_url: impl Into<String>) -> Self {
        Self {
            http,
            db,
            login_url: login_url.into(),
        }
    }

    /// POST `{"email", "password"}` to the login endpoint and interpret the
    /// response.
    ///
    /// On a no-error response with a mappable user record, the `Person` is
    /// upserted into the store before the future resolves; a persist failure
    /// is logged and does not fail the login. Domain error codes from the
    /// payload and transport failures surface as the error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Person> {
        let params = serde_json::json!({ "email": username, "password": password });
        let response = self
            .http
            .execute(
                Method::POST,
                &self.login_url,
                Some(&params),
                ParamEncoding::Json,
                None,
            )
            .await?;

        let person = interpret_response(&response)?;
        if let Err(err) = self.db.save(&person) {
            log::warn!("failed to persist logged-in user {}: {}", person.email, err);
        }
        Ok(person)
    }
}

/// Normalize a login response payload.
///
/// Expects an object with an integer `errorCode` and, when that code is
/// no-error, a `user` record mappable to `Person`. A missing or non-integer
/// `errorCode`, an unrecognized code, or an unmappable user record all
/// normalize to `UnknownError`; a recognized non-zero code surfaces verbatim.
pub(crate) fn interpret_response(response: &Value) -> Result<Person> {
    let Some(raw_code) = response.get("errorCode").and_then(Value::as_i64) else {
        return Err(AppError::Code(ErrorCode::UnknownError));
    };

    let code = ErrorCode::from_raw(raw_code).unwrap_or(ErrorCode::UnknownError);
    if code != ErrorCode::NoError {
        return Err(AppError::Code(code));
    }

    let Some(user) = response.get("user") else {
        return Err(AppError::Code(ErrorCode::UnknownError));
    };
    serde_json::from_value(user.clone()).map_err(|_| AppError::Code(ErrorCode::UnknownError))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl Connectivity for Offline {
        async fn is_reachable(&self) -> bool {
            false
        }
    }

    fn code_of(result: Result<Person>) -> ErrorCode {
        match result.unwrap_err() {
            AppError::Code(code) => code,
            other => panic!("expected a domain code, got: {:?}", other),
        }
    }

    #[test]
    fn no_error_with_user_record_yields_the_person() {
        let response = serde_json::json!({
            "errorCode": 0,
            "user": { "email": "abc@xyz.com", "activated": 1, "created": 1444222569 }
        });
        let person = interpret_response(&response).unwrap();
        assert_eq!(person.email, "abc@xyz.com");
        assert_eq!(person.activated, 1);
        assert_eq!(person.created, 1444222569);
    }

    #[test]
    fn sparse_user_record_maps_with_defaults() {
        let response = serde_json::json!({
            "errorCode": 0,
            "user": { "email": "abc@xyz.com" }
        });
        let person = interpret_response(&response).unwrap();
        assert_eq!(person.activated, 0);
        assert_eq!(person.created, 0);
    }

    #[test]
    fn recognized_error_codes_surface_verbatim() {
        for (raw, expected) in [
            (100, ErrorCode::InvalidCredentials),
            (101, ErrorCode::UserNotVerified),
            (102, ErrorCode::UserBlocked),
        ] {
            let response = serde_json::json!({ "errorCode": raw });
            assert_eq!(code_of(interpret_response(&response)), expected);
        }
    }

    #[test]
    fn unrecognized_error_code_is_unknown() {
        let response = serde_json::json!({ "errorCode": 999 });
        assert_eq!(code_of(interpret_response(&response)), ErrorCode::UnknownError);
    }

    #[test]
    fn missing_error_code_is_unknown() {
        let response = serde_json::json!({ "user": { "email": "abc@xyz.com" } });
        assert_eq!(code_of(interpret_response(&response)), ErrorCode::UnknownError);
    }

    #[test]
    fn non_integer_error_code_is_unknown() {
        let response = serde_json::json!({ "errorCode": "0" });
        assert_eq!(code_of(interpret_response(&response)), ErrorCode::UnknownError);
    }

    #[test]
    fn non_object_payload_is_unknown() {
        assert_eq!(
            code_of(interpret_response(&serde_json::json!([1, 2, 3]))),
            ErrorCode::UnknownError
        );
        assert_eq!(
            code_of(interpret_response(&serde_json::json!("ok"))),
            ErrorCode::UnknownError
        );
    }

    #[test]
    fn missing_user_record_on_success_code_is_unknown() {
        let response = serde_json::json!({ "errorCode": 0 });
        assert_eq!(code_of(interpret_response(&response)), ErrorCode::UnknownError);
    }

    #[test]
    fn unmappable_user_record_is_unknown() {
        let response = serde_json::json!({ "errorCode": 0, "user": "abc@xyz.com" });
        assert_eq!(code_of(interpret_response(&response)), ErrorCode::UnknownError);
    }

    #[tokio::test]
    async fn login_offline_fails_immediately_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("store.json"), 1);
        let service = LoginService::with_http(
            HttpService::with_connectivity(Offline).unwrap(),
            db.clone(),
            "http://127.0.0.1:9/login",
        );

        let err = service.login("abc@xyz.com", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Code(ErrorCode::NetworkUnavailable)));
        assert!(db.all().is_empty());
    }
}
