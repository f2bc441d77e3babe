//! Uniform response body: `{"success": bool, "data"?: T, "error"?: string}`.
//!
//! Every handler response goes through [`success`] or [`error`]; nothing
//! writes a bare JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Wire shape of every JSON response.
///
/// Field order is part of the contract: `success` first, then `data` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Success envelope with `status`. `data: None` yields `{"success":true}`.
pub fn success<T: Serialize>(status: StatusCode, data: Option<T>) -> Response {
    (status, Json(Envelope::ok(data))).into_response()
}

/// Error envelope with `status`.
pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(Envelope::failure(message))).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn success_with_data_is_bit_exact() {
        let response = success(StatusCode::OK, Some(json!({ "status": "OK" })));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body_string(response).await,
            r#"{"success":true,"data":{"status":"OK"}}"#
        );
    }

    #[tokio::test]
    async fn success_without_data_omits_the_field() {
        let response = success::<()>(StatusCode::CREATED, None);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response).await, r#"{"success":true}"#);
    }

    #[tokio::test]
    async fn error_is_bit_exact() {
        let response = error(StatusCode::INTERNAL_SERVER_ERROR, "database connection failed");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"success":false,"error":"database connection failed"}"#
        );
    }

    proptest! {
        #[test]
        fn error_envelope_keeps_any_message(message in ".*") {
            let body = serde_json::to_value(Envelope::failure(message.clone())).unwrap();
            prop_assert_eq!(&body["success"], &json!(false));
            prop_assert_eq!(&body["error"], &json!(message));
            prop_assert!(body.get("data").is_none());
        }

        #[test]
        fn success_envelope_carries_data_unchanged(n in any::<i64>(), s in "[a-zA-Z0-9 ]{0,32}") {
            let data = json!({ "n": n, "s": s });
            let body = serde_json::to_value(Envelope::ok(Some(data.clone()))).unwrap();
            prop_assert_eq!(&body["success"], &json!(true));
            prop_assert_eq!(&body["data"], &data);
            prop_assert!(body.get("error").is_none());
        }
    }
}
