use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use super::model::{NewProject, Project, ProjectChanges};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
  async fn list_all(&self) -> Result<Vec<Project>, sqlx::Error>;
  async fn insert(&self, project: &NewProject) -> Result<Project, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error>;
  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error>;
  async fn update_by_id(&self, id: i32, changes: &ProjectChanges) -> Result<u64, sqlx::Error>;
}

pub struct SqlxProjectRepository {
  pub pool: PgPool,
}

impl SqlxProjectRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
  async fn list_all(&self) -> Result<Vec<Project>, sqlx::Error> {
    list_all(&self.pool).await
  }

  async fn insert(&self, project: &NewProject) -> Result<Project, sqlx::Error> {
    insert(&self.pool, project).await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error> {
    find_by_id(&self.pool, id).await
  }

  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error> {
    delete_by_id(&self.pool, id).await
  }

  async fn update_by_id(&self, id: i32, changes: &ProjectChanges) -> Result<u64, sqlx::Error> {
    update_by_id(&self.pool, id, changes).await
  }
}

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Project>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let projects = sqlx::query_as::<_, Project>(
    r#"
      SELECT id, project_type, deadline, deadline_flexibility, charity_id, details
      FROM cc_projects
      ORDER BY id
    "#,
  )
  .fetch_all(executor)
  .await?;

  Ok(projects)
}

pub async fn insert<'e, E>(executor: E, project: &NewProject) -> Result<Project, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let project = sqlx::query_as::<_, Project>(
    r#"
      INSERT INTO cc_projects (project_type, deadline, deadline_flexibility, charity_id, details)
      VALUES ($1, $2, $3, $4, $5)
      RETURNING id, project_type, deadline, deadline_flexibility, charity_id, details
    "#,
  )
  .bind(&project.project_type)
  .bind(project.deadline)
  .bind(&project.deadline_flexibility)
  .bind(project.charity_id)
  .bind(&project.details)
  .fetch_one(executor)
  .await?;

  Ok(project)
}

pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<Project>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let project = sqlx::query_as::<_, Project>(
    r#"
      SELECT id, project_type, deadline, deadline_flexibility, charity_id, details
      FROM cc_projects
      WHERE id = $1
    "#,
  )
  .bind(id)
  .fetch_optional(executor)
  .await?;

  Ok(project)
}

pub async fn delete_by_id<'e, E>(executor: E, id: i32) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM cc_projects WHERE id = $1")
    .bind(id)
    .execute(executor)
    .await?;

  Ok(result.rows_affected())
}

pub async fn update_by_id<'e, E>(executor: E, id: i32, changes: &ProjectChanges) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  if changes.is_empty() {
    return Ok(0);
  }

  let mut builder = QueryBuilder::<Postgres>::new("UPDATE cc_projects SET ");
  {
    let mut assignments = builder.separated(", ");
    if let Some(project_type) = &changes.project_type {
      assignments.push("project_type = ");
      assignments.push_bind_unseparated(project_type.clone());
    }
    if let Some(deadline) = changes.deadline {
      assignments.push("deadline = ");
      assignments.push_bind_unseparated(deadline);
    }
    if let Some(deadline_flexibility) = &changes.deadline_flexibility {
      assignments.push("deadline_flexibility = ");
      assignments.push_bind_unseparated(deadline_flexibility.clone());
    }
    if let Some(details) = &changes.details {
      assignments.push("details = ");
      assignments.push_bind_unseparated(details.clone());
    }
  }
  builder.push(" WHERE id = ").push_bind(id);

  let result = builder.build().execute(executor).await?;

  Ok(result.rows_affected())
}
