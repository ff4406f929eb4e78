use axum::{
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "error": { "message": self.message },
    }));

    (self.status_code, body).into_response()
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    AppError::new(rejection.status(), rejection.body_text())
  }
}

impl From<PathRejection> for AppError {
  fn from(rejection: PathRejection) -> Self {
    tracing::warn!("Rejected request path: {}", rejection.body_text());
    AppError::new(rejection.status(), rejection.body_text())
  }
}

impl From<crate::domains::user::service::UserServiceError> for AppError {
  fn from(error: crate::domains::user::service::UserServiceError) -> Self {
    use crate::domains::user::service::UserServiceError;
    match error {
      UserServiceError::ValidationError(msg) => AppError::bad_request(msg),
      UserServiceError::InternalServerError(msg) => {
        tracing::error!("User service failure: {}", msg);
        AppError::internal_server_error("Internal server error occurred")
      }
    }
  }
}

impl From<crate::domains::project::service::ProjectServiceError> for AppError {
  fn from(error: crate::domains::project::service::ProjectServiceError) -> Self {
    use crate::domains::project::service::ProjectServiceError;
    match error {
      ProjectServiceError::ValidationError(msg) => AppError::bad_request(msg),
      ProjectServiceError::InternalServerError(msg) => {
        tracing::error!("Project service failure: {}", msg);
        AppError::internal_server_error("Internal server error occurred")
      }
    }
  }
}
