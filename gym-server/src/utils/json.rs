//! JSON body extractor
//!
//! Same as `axum::Json`, but a body that fails to parse is answered with
//! the usual error envelope (400 `ValidationFailed`) instead of axum's
//! plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use super::{AppError, ErrorCode};

pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let reason = match &rejection {
        JsonRejection::JsonDataError(_) => "invalid_field",
        JsonRejection::JsonSyntaxError(_) => "malformed_json",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "unreadable_body",
    };
    AppError::with_message(ErrorCode::ValidationFailed, rejection.body_text())
        .with_detail("reason", reason)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{StatusCode, header};
    use shared::models::PaymentCreate;

    use super::*;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_enum_value_is_a_validation_error() {
        let req = json_request(r#"{"memberId": "m1", "amount": 10, "paymentType": "bogus"}"#);
        let err = AppJson::<PaymentCreate>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.unwrap()["reason"], "invalid_field");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let err = AppJson::<PaymentCreate>::from_request(json_request("{not json"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.details.unwrap()["reason"], "malformed_json");
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let AppJson(payload) =
            AppJson::<PaymentCreate>::from_request(json_request(r#"{"memberId": "m1", "amount": 10}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.member_id, "m1");
    }
}
