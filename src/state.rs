use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::{
  project::{
    repository::SqlxProjectRepository,
    service::{ProjectService, ProjectServiceImpl},
  },
  user::{
    repository::SqlxUserRepository,
    service::{UserService, UserServiceImpl},
  },
};

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
  pub project_service: Arc<dyn ProjectService>,
}

impl SharedAppState {
  pub fn new(pool: PgPool) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(SqlxUserRepository::new(pool.clone())));
    let project_service = Arc::new(ProjectServiceImpl::new(SqlxProjectRepository::new(pool)));

    Self::from_services(user_service, project_service)
  }

  pub fn from_services(user_service: Arc<dyn UserService>, project_service: Arc<dyn ProjectService>) -> Self {
    Self {
      user_service,
      project_service,
    }
  }
}
