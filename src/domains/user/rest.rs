use axum::{
  extract::{
    rejection::{JsonRejection, PathRejection},
    Json, Path, Request, State,
  },
  http::StatusCode,
  middleware::{self, Next},
  response::{Json as JsonResponse, Response},
  routing::get,
  Extension, Router,
};

use super::model::{User, UserResponse};
use crate::{payload::Payload, state::SharedAppState, AppError};

pub fn user_routes(state: SharedAppState) -> Router<SharedAppState> {
  let item_routes = Router::new()
    .route(
      "/users/{user_id}",
      get(get_user_handler)
        .delete(delete_user_handler)
        .patch(update_user_handler),
    )
    .route_layer(middleware::from_fn_with_state(state, load_user));

  Router::new()
    .route("/users", get(list_users_handler).post(create_user_handler))
    .merge(item_routes)
}

/// Loads the addressed user once for every item route, answering 404 when it is absent.
async fn load_user(
  State(state): State<SharedAppState>,
  user_id: Result<Path<i32>, PathRejection>,
  mut request: Request,
  next: Next,
) -> Result<Response, AppError> {
  let Path(user_id) = user_id?;
  let user = state
    .user_service
    .get_user_by_id(user_id)
    .await?
    .ok_or_else(|| AppError::not_found("User doesn't exist"))?;

  request.extensions_mut().insert(user);
  Ok(next.run(request).await)
}

pub async fn list_users_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<Vec<UserResponse>>, AppError> {
  let users = state.user_service.list_users().await?;
  Ok(JsonResponse(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<Payload>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<UserResponse>), AppError> {
  let Json(body) = payload?;
  let user = state.user_service.create_user(&body).await?;
  Ok((StatusCode::CREATED, JsonResponse(user.into())))
}

pub async fn get_user_handler(Extension(user): Extension<User>) -> JsonResponse<UserResponse> {
  JsonResponse(user.into())
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
  state.user_service.delete_user(user.id).await?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  Extension(user): Extension<User>,
  payload: Result<Json<Payload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
  let Json(body) = payload?;
  state.user_service.update_user(user.id, &body).await?;
  Ok(StatusCode::NO_CONTENT)
}
