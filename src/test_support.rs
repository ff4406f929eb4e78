use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use tower::ServiceExt;

use crate::{
  app::create_app,
  domains::{
    project::{
      model::{NewProject, Project, ProjectChanges},
      repository::ProjectRepository,
      service::ProjectServiceImpl,
    },
    user::{
      model::{NewUser, User, UserChanges},
      repository::UserRepository,
      service::UserServiceImpl,
    },
  },
  state::SharedAppState,
};

fn not_null_violation(column: &str) -> sqlx::Error {
  sqlx::Error::Protocol(format!("null value in column \"{}\" violates not-null constraint", column))
}

fn apply_required<T: Clone>(target: &mut T, change: &Option<Option<T>>, column: &str) -> Result<(), sqlx::Error> {
  match change {
    Some(Some(value)) => *target = value.clone(),
    Some(None) => return Err(not_null_violation(column)),
    None => {}
  }
  Ok(())
}

fn apply_nullable<T: Clone>(target: &mut Option<T>, change: &Option<Option<T>>) {
  if let Some(value) = change {
    *target = value.clone();
  }
}

/// Table stand-in: rows kept in id order, ids assigned after the highest one seen.
struct Table<T> {
  rows: Mutex<Vec<T>>,
}

impl<T> Table<T> {
  fn new(rows: Vec<T>) -> Self {
    Self { rows: Mutex::new(rows) }
  }
}

pub struct InMemoryUserRepository {
  table: Table<User>,
}

impl InMemoryUserRepository {
  pub fn new(users: Vec<User>) -> Self {
    Self { table: Table::new(users) }
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().clone())
  }

  async fn insert(&self, user: &NewUser) -> Result<User, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    let created = User {
      id,
      name: user.name.clone(),
      email: user.email.clone(),
      user_type: user.user_type.clone(),
      password: user.password.clone(),
      about: user.about.clone(),
      website: user.website.clone(),
    };
    rows.push(created.clone());
    Ok(created)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
  }

  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|u| u.id != id);
    Ok((before - rows.len()) as u64)
  }

  async fn update_by_id(&self, id: i32, changes: &UserChanges) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
      return Ok(0);
    };
    let mut updated = user.clone();
    apply_required(&mut updated.name, &changes.name, "name")?;
    apply_required(&mut updated.email, &changes.email, "email")?;
    apply_required(&mut updated.password, &changes.password, "password")?;
    apply_nullable(&mut updated.about, &changes.about);
    apply_nullable(&mut updated.website, &changes.website);
    *user = updated;
    Ok(1)
  }
}

pub struct InMemoryProjectRepository {
  table: Table<Project>,
}

impl InMemoryProjectRepository {
  pub fn new(projects: Vec<Project>) -> Self {
    Self {
      table: Table::new(projects),
    }
  }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
  async fn list_all(&self) -> Result<Vec<Project>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().clone())
  }

  async fn insert(&self, project: &NewProject) -> Result<Project, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let created = Project {
      id,
      project_type: project.project_type.clone(),
      deadline: project.deadline,
      deadline_flexibility: project.deadline_flexibility.clone(),
      charity_id: project.charity_id,
      details: project.details.clone(),
    };
    rows.push(created.clone());
    Ok(created)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error> {
    Ok(self.table.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
  }

  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|p| p.id != id);
    Ok((before - rows.len()) as u64)
  }

  async fn update_by_id(&self, id: i32, changes: &ProjectChanges) -> Result<u64, sqlx::Error> {
    let mut rows = self.table.rows.lock().unwrap();
    let Some(project) = rows.iter_mut().find(|p| p.id == id) else {
      return Ok(0);
    };
    let mut updated = project.clone();
    apply_required(&mut updated.project_type, &changes.project_type, "project_type")?;
    apply_required(&mut updated.deadline, &changes.deadline, "deadline")?;
    apply_required(
      &mut updated.deadline_flexibility,
      &changes.deadline_flexibility,
      "deadline_flexibility",
    )?;
    apply_nullable(&mut updated.details, &changes.details);
    *project = updated;
    Ok(1)
  }
}

pub fn test_users() -> Vec<User> {
  vec![
    User {
      id: 1,
      name: "Scranton Animal Shelter".to_string(),
      email: "shelter@example.org".to_string(),
      user_type: "charity".to_string(),
      password: "password123".to_string(),
      about: Some("We look after the animals of Scranton".to_string()),
      website: Some("https://shelter.example.org".to_string()),
    },
    User {
      id: 2,
      name: "Dunder Mifflin Infinity".to_string(),
      email: "infinity@example.org".to_string(),
      user_type: "charity".to_string(),
      password: "password123".to_string(),
      about: Some("Paper for everyone".to_string()),
      website: None,
    },
    User {
      id: 3,
      name: "Pam Beesly".to_string(),
      email: "pam@example.org".to_string(),
      user_type: "creative".to_string(),
      password: "password123".to_string(),
      about: None,
      website: None,
    },
  ]
}

pub fn test_projects() -> Vec<Project> {
  let details = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt";
  vec![
    Project {
      id: 1,
      project_type: "website".to_string(),
      deadline: Utc.with_ymd_and_hms(2019, 1, 3, 0, 0, 0).unwrap(),
      deadline_flexibility: "set".to_string(),
      charity_id: 1,
      details: Some(details.to_string()),
    },
    Project {
      id: 2,
      project_type: "photography".to_string(),
      deadline: Utc.with_ymd_and_hms(2018, 8, 15, 23, 0, 0).unwrap(),
      deadline_flexibility: "flex".to_string(),
      charity_id: 2,
      details: Some(details.to_string()),
    },
    Project {
      id: 3,
      project_type: "advertisement".to_string(),
      deadline: Utc.with_ymd_and_hms(2018, 8, 15, 23, 0, 0).unwrap(),
      deadline_flexibility: "flex".to_string(),
      charity_id: 1,
      details: Some(details.to_string()),
    },
  ]
}

pub fn app_with_fixtures(users: Vec<User>, projects: Vec<Project>) -> Router {
  let state = SharedAppState::from_services(
    Arc::new(UserServiceImpl::new(InMemoryUserRepository::new(users))),
    Arc::new(ProjectServiceImpl::new(InMemoryProjectRepository::new(projects))),
  );
  create_app(state)
}

async fn respond(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Bytes) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(body) => builder
      .header("content-type", "application/json")
      .body(Body::from(serde_json::to_vec(&body).expect("serialize request body"))),
    None => builder.body(Body::empty()),
  }
  .expect("build request");

  respond(app, request).await
}

pub async fn send_raw(app: Router, method: &str, uri: &str, body: &'static str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body))
    .expect("build request");

  respond(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, "GET", uri, None).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_value(body).expect("serialize request body");
  send(app, "POST", uri, Some(body)).await
}

pub async fn patch_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_value(body).expect("serialize request body");
  send(app, "PATCH", uri, Some(body)).await
}
