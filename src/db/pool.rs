use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::Config;

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}
