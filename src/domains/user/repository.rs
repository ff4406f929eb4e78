use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use super::model::{NewUser, User, UserChanges};

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn list_all(&self) -> Result<Vec<User>, sqlx::Error>;
  async fn insert(&self, user: &NewUser) -> Result<User, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error>;
  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error>;
  async fn update_by_id(&self, id: i32, changes: &UserChanges) -> Result<u64, sqlx::Error>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
    list_all(&self.pool).await
  }

  async fn insert(&self, user: &NewUser) -> Result<User, sqlx::Error> {
    insert(&self.pool, user).await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
    find_by_id(&self.pool, id).await
  }

  async fn delete_by_id(&self, id: i32) -> Result<u64, sqlx::Error> {
    delete_by_id(&self.pool, id).await
  }

  async fn update_by_id(&self, id: i32, changes: &UserChanges) -> Result<u64, sqlx::Error> {
    update_by_id(&self.pool, id, changes).await
  }
}

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let users = sqlx::query_as::<_, User>(
    r#"
      SELECT id, name, email, user_type, password, about, website
      FROM cc_users
      ORDER BY id
    "#,
  )
  .fetch_all(executor)
  .await?;

  Ok(users)
}

pub async fn insert<'e, E>(executor: E, user: &NewUser) -> Result<User, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let user = sqlx::query_as::<_, User>(
    r#"
      INSERT INTO cc_users (name, email, user_type, password, about, website)
      VALUES ($1, $2, $3, $4, $5, $6)
      RETURNING id, name, email, user_type, password, about, website
    "#,
  )
  .bind(&user.name)
  .bind(&user.email)
  .bind(&user.user_type)
  .bind(&user.password)
  .bind(&user.about)
  .bind(&user.website)
  .fetch_one(executor)
  .await?;

  Ok(user)
}

pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let user = sqlx::query_as::<_, User>(
    r#"
      SELECT id, name, email, user_type, password, about, website
      FROM cc_users
      WHERE id = $1
    "#,
  )
  .bind(id)
  .fetch_optional(executor)
  .await?;

  Ok(user)
}

pub async fn delete_by_id<'e, E>(executor: E, id: i32) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM cc_users WHERE id = $1")
    .bind(id)
    .execute(executor)
    .await?;

  Ok(result.rows_affected())
}

pub async fn update_by_id<'e, E>(executor: E, id: i32, changes: &UserChanges) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  if changes.is_empty() {
    return Ok(0);
  }

  let mut builder = QueryBuilder::<Postgres>::new("UPDATE cc_users SET ");
  {
    let mut assignments = builder.separated(", ");
    let columns = [
      ("name", &changes.name),
      ("email", &changes.email),
      ("password", &changes.password),
      ("about", &changes.about),
      ("website", &changes.website),
    ];
    for (column, value) in columns {
      if let Some(value) = value {
        assignments.push(format!("{} = ", column));
        assignments.push_bind_unseparated(value.clone());
      }
    }
  }
  builder.push(" WHERE id = ").push_bind(id);

  let result = builder.build().execute(executor).await?;

  Ok(result.rows_affected())
}
