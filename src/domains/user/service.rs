use async_trait::async_trait;
use std::error::Error;

use super::{
  model::{NewUser, User, UserChanges},
  repository::UserRepository,
};
use crate::{impl_service_error_conversions, payload::Payload};

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError(String),
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError, ValidationError);

#[async_trait]
pub trait UserService: Send + Sync {
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError>;
  async fn create_user(&self, body: &Payload) -> Result<User, UserServiceError>;
  async fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>, UserServiceError>;
  async fn delete_user(&self, user_id: i32) -> Result<u64, UserServiceError>;
  async fn update_user(&self, user_id: i32, body: &Payload) -> Result<u64, UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    Ok(self.user_repository.list_all().await?)
  }

  async fn create_user(&self, body: &Payload) -> Result<User, UserServiceError> {
    let new_user = NewUser::from_payload(body)?;

    let user = self
      .user_repository
      .insert(&new_user)
      .await
      .map_err(|e| UserServiceError::InternalServerError(format!("Failed to create user: {}", e)))?;

    tracing::info!("Created user {}", user.id);
    Ok(user)
  }

  async fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>, UserServiceError> {
    Ok(self.user_repository.find_by_id(user_id).await?)
  }

  async fn delete_user(&self, user_id: i32) -> Result<u64, UserServiceError> {
    let deleted = self.user_repository.delete_by_id(user_id).await?;
    tracing::info!("Deleted user {} ({} row(s))", user_id, deleted);
    Ok(deleted)
  }

  async fn update_user(&self, user_id: i32, body: &Payload) -> Result<u64, UserServiceError> {
    let changes = UserChanges::from_payload(body)?;

    let updated = self
      .user_repository
      .update_by_id(user_id, &changes)
      .await
      .map_err(|e| UserServiceError::InternalServerError(format!("Failed to update user: {}", e)))?;

    tracing::debug!("Updated user {} ({} row(s))", user_id, updated);
    Ok(updated)
  }
}
