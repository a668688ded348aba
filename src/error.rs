use std::collections::BTreeMap;

use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use log::{error, info};
use serde::Serialize;

use crate::auth::LOGIN_PATH;
use crate::validation::{FieldErrors, ValidationError};

/// Application-level error type for HTTP handlers and repositories.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more rejected fields; the write did not happen.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// The record does not exist or lies outside the caller's scope.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// No valid session; answered with a redirect to the login page.
    #[error("Login required")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error.into())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, errors) = match self {
            AppError::Unauthenticated => {
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, LOGIN_PATH))
                    .finish();
            }
            AppError::Validation(fields) => (
                "There was an error with your submission. Please correct the errors below."
                    .to_string(),
                Some(fields.by_field()),
            ),
            AppError::NotFound { .. } => ("Not found".to_string(), None),
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::Internal(_) => {
                error!("{}", self);
                ("An internal error occurred".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message,
            errors,
        })
    }
}

/// JSON extractor settings for every form endpoint: unreadable bodies are
/// answered with the same field-tagged 400 as rejected fields.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = match &err {
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    info!("Rejected body for {}: {}", req.path(), detail);
    AppError::from(ValidationError::Malformed { detail }).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_error_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.push(ValidationError::DateRange { field: "due_date" });
        fields.push(ValidationError::ProjectBounds);

        let (status, body) = body_json(AppError::Validation(fields)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"]["due_date"],
            serde_json::json!([
                "Due date cannot be earlier than start date.",
                "Task due date cannot exceed the project end date."
            ])
        );
    }

    #[actix_web::test]
    async fn test_not_found_hides_details() {
        let (status, body) = body_json(AppError::NotFound { entity: "Task", id: 4 }).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn test_internal_error_is_generic() {
        let (status, body) = body_json(AppError::Internal("pool missing".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[derive(serde::Deserialize)]
    struct DateForm {
        #[allow(dead_code)]
        due_date: chrono::NaiveDate,
    }

    async fn accept(_form: web::Json<DateForm>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_unreadable_body_gets_field_tagged_response() {
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(json_config())
                .route("/form", web::post().to(accept)),
        )
        .await;

        for body in [serde_json::json!({}), serde_json::json!({"due_date": "tomorrow"})] {
            let req = actix_web::test::TestRequest::post()
                .uri("/form")
                .set_json(body)
                .to_request();
            let resp = actix_web::test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            let messages = body["errors"]["non_field_errors"].as_array().unwrap();
            assert_eq!(messages.len(), 1);
            assert!(messages[0].as_str().unwrap().starts_with("Invalid request body: "));
        }

        let req = actix_web::test::TestRequest::post()
            .uri("/form")
            .set_json(serde_json::json!({"due_date": "2024-03-31"}))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let response = AppError::Unauthenticated.error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_PATH
        );
    }
}
