//! JSON body extraction with field validation
//!
//! Request DTOs (registration, booking and feedback forms) derive
//! `validator::Validate`; this extractor parses the body like `axum::Json`
//! and then runs the derived rules, so handlers only ever see well-formed
//! input. Malformed JSON is a 400, rule violations a 422, both wrapped in
//! the standard response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct SubmitFeedbackRequest {
///     #[validate(length(min = 2, max = 100))]
///     name: String,
///     #[validate(email)]
///     email: String,
///     #[validate(length(min = 1, max = 2000))]
///     message: String,
/// }
///
/// async fn handler(ValidatedJson(form): ValidatedJson<SubmitFeedbackRequest>) {
///     // `form` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// The body is not valid JSON for the target type.
    JsonError(JsonRejection),
    /// The body parsed but one or more field rules failed.
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Malformed JSON body: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| match &e.message {
                            Some(msg) => format!("{}: {}", field, msg),
                            None => format!("{}: violates rule '{}'", field, e.code),
                        })
                    })
                    .collect();
                // field_errors() iterates a HashMap; sort so the combined
                // message is deterministic for clients and tests
                field_errors.sort();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    /// Same shape and rules as the public feedback form.
    #[derive(Debug, Deserialize, Validate)]
    struct FeedbackForm {
        #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
        name: String,
        #[validate(email(message = "must be a valid email address"))]
        email: String,
        #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
        message: String,
    }

    async fn handler(ValidatedJson(form): ValidatedJson<FeedbackForm>) -> String {
        format!("feedback from {}", form.email)
    }

    fn app() -> Router {
        Router::new().route("/feedback", post(handler))
    }

    async fn send(body: Body) -> axum::http::Response<Body> {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/feedback")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn envelope(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn well_formed_feedback_passes() {
        let body = serde_json::json!({
            "name": "Aziz Karimov",
            "email": "aziz@example.com",
            "message": "Port STN-001 charged my Nexon in under an hour."
        });
        let resp = send(Body::from(serde_json::to_vec(&body).unwrap())).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn truncated_body_is_a_400_with_envelope() {
        let resp = send(Body::from(r#"{"name": "Aziz", "email":"#)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = envelope(resp).await;
        assert_eq!(json["success"], false);
        let error = json["error"].as_str().unwrap();
        assert!(error.starts_with("Malformed JSON body"), "got {error}");
    }

    #[tokio::test]
    async fn rule_violations_are_a_422_naming_each_field() {
        let body = serde_json::json!({
            "name": "A",
            "email": "not-an-email",
            "message": ""
        });
        let resp = send(Body::from(serde_json::to_vec(&body).unwrap())).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = envelope(resp).await;
        assert_eq!(json["success"], false);
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("name:"), "got {error}");
        assert!(error.contains("email:"), "got {error}");
        assert!(error.contains("message:"), "got {error}");
    }
}
