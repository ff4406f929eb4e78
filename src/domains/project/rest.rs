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

use super::model::{Project, ProjectResponse};
use crate::{payload::Payload, state::SharedAppState, AppError};

pub fn project_routes(state: SharedAppState) -> Router<SharedAppState> {
  let item_routes = Router::new()
    .route(
      "/projects/{project_id}",
      get(get_project_handler)
        .delete(delete_project_handler)
        .patch(update_project_handler),
    )
    .route_layer(middleware::from_fn_with_state(state, load_project));

  Router::new()
    .route("/projects", get(list_projects_handler).post(create_project_handler))
    .merge(item_routes)
}

async fn load_project(
  State(state): State<SharedAppState>,
  project_id: Result<Path<i32>, PathRejection>,
  mut request: Request,
  next: Next,
) -> Result<Response, AppError> {
  let Path(project_id) = project_id?;
  let project = state
    .project_service
    .get_project_by_id(project_id)
    .await?
    .ok_or_else(|| AppError::not_found("Project doesn't exist"))?;

  request.extensions_mut().insert(project);
  Ok(next.run(request).await)
}

pub async fn list_projects_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<Vec<ProjectResponse>>, AppError> {
  let projects = state.project_service.list_projects().await?;
  Ok(JsonResponse(projects.into_iter().map(ProjectResponse::from).collect()))
}

pub async fn create_project_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<Payload>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<ProjectResponse>), AppError> {
  let Json(body) = payload?;
  let project = state.project_service.create_project(&body).await?;
  Ok((StatusCode::CREATED, JsonResponse(project.into())))
}

pub async fn get_project_handler(Extension(project): Extension<Project>) -> JsonResponse<ProjectResponse> {
  JsonResponse(project.into())
}

pub async fn delete_project_handler(
  State(state): State<SharedAppState>,
  Extension(project): Extension<Project>,
) -> Result<StatusCode, AppError> {
  state.project_service.delete_project(project.id).await?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn update_project_handler(
  State(state): State<SharedAppState>,
  Extension(project): Extension<Project>,
  payload: Result<Json<Payload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
  let Json(body) = payload?;
  state.project_service.update_project(project.id, &body).await?;
  Ok(StatusCode::NO_CONTENT)
}
