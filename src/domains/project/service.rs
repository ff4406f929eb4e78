use async_trait::async_trait;
use std::error::Error;

use super::{
  model::{NewProject, Project, ProjectChanges},
  repository::ProjectRepository,
};
use crate::{impl_service_error_conversions, payload::Payload};

#[derive(Debug)]
pub enum ProjectServiceError {
  ValidationError(String),
  InternalServerError(String),
}

impl Error for ProjectServiceError {}

impl std::fmt::Display for ProjectServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ProjectServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      ProjectServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(ProjectServiceError, InternalServerError, ValidationError);

#[async_trait]
pub trait ProjectService: Send + Sync {
  async fn list_projects(&self) -> Result<Vec<Project>, ProjectServiceError>;
  async fn create_project(&self, body: &Payload) -> Result<Project, ProjectServiceError>;
  async fn get_project_by_id(&self, project_id: i32) -> Result<Option<Project>, ProjectServiceError>;
  async fn delete_project(&self, project_id: i32) -> Result<u64, ProjectServiceError>;
  async fn update_project(&self, project_id: i32, body: &Payload) -> Result<u64, ProjectServiceError>;
}

pub struct ProjectServiceImpl<P> {
  project_repository: P,
}

impl<P> ProjectServiceImpl<P>
where
  P: ProjectRepository,
{
  pub fn new(project_repository: P) -> Self {
    Self { project_repository }
  }
}

#[async_trait]
impl<P> ProjectService for ProjectServiceImpl<P>
where
  P: ProjectRepository,
{
  async fn list_projects(&self) -> Result<Vec<Project>, ProjectServiceError> {
    Ok(self.project_repository.list_all().await?)
  }

  async fn create_project(&self, body: &Payload) -> Result<Project, ProjectServiceError> {
    let new_project = NewProject::from_payload(body)?;

    let project = self
      .project_repository
      .insert(&new_project)
      .await
      .map_err(|e| ProjectServiceError::InternalServerError(format!("Failed to create project: {}", e)))?;

    tracing::info!("Created project {} for charity {}", project.id, project.charity_id);
    Ok(project)
  }

  async fn get_project_by_id(&self, project_id: i32) -> Result<Option<Project>, ProjectServiceError> {
    Ok(self.project_repository.find_by_id(project_id).await?)
  }

  async fn delete_project(&self, project_id: i32) -> Result<u64, ProjectServiceError> {
    let deleted = self.project_repository.delete_by_id(project_id).await?;
    tracing::info!("Deleted project {} ({} row(s))", project_id, deleted);
    Ok(deleted)
  }

  async fn update_project(&self, project_id: i32, body: &Payload) -> Result<u64, ProjectServiceError> {
    let changes = ProjectChanges::from_payload(body)?;

    let updated = self
      .project_repository
      .update_by_id(project_id, &changes)
      .await
      .map_err(|e| ProjectServiceError::InternalServerError(format!("Failed to update project: {}", e)))?;

    tracing::debug!("Updated project {} ({} row(s))", project_id, updated);
    Ok(updated)
  }
}
