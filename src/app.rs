use axum::{http::StatusCode, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
  domains::{project::rest::project_routes, user::rest::user_routes},
  state::SharedAppState,
  AppError,
};

pub fn create_app(state: SharedAppState) -> Router {
  let api = user_routes(state.clone()).merge(project_routes(state.clone()));

  Router::new()
    .route("/", get(hello_world_handler))
    .nest("/api", api)
    .fallback(not_found_handler)
    .method_not_allowed_fallback(method_not_allowed_handler)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

pub async fn hello_world_handler() -> &'static str {
  "Hello, world!"
}

async fn not_found_handler() -> AppError {
  AppError::not_found("Not found")
}

async fn method_not_allowed_handler() -> AppError {
  AppError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
