use std::{env, fmt, str::FromStr};

use anyhow::{bail, Context};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/create_cause";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
  Development,
  Test,
  Production,
}

impl Environment {
  pub fn default_log_filter(&self) -> &'static str {
    match self {
      Environment::Production => "info",
      Environment::Development | Environment::Test => "debug",
    }
  }
}

impl FromStr for Environment {
  type Err = anyhow::Error;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Environment::Development),
      "test" => Ok(Environment::Test),
      "production" | "prod" => Ok(Environment::Production),
      other => bail!("unknown APP_ENV '{}'", other),
    }
  }
}

impl fmt::Display for Environment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Environment::Development => "development",
      Environment::Test => "test",
      Environment::Production => "production",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  pub port: u16,
  pub environment: Environment,
  pub database_url: String,
  pub max_connections: u32,
}

impl Config {
  /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let port = match lookup("PORT") {
      Some(raw) => raw.parse().with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
      None => DEFAULT_PORT,
    };

    let environment = match lookup("APP_ENV") {
      Some(raw) => raw.parse()?,
      None => Environment::Development,
    };

    let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
      Some(raw) => raw
        .parse()
        .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got '{}'", raw))?,
      None => DEFAULT_MAX_CONNECTIONS,
    };

    Ok(Self {
      port,
      environment,
      database_url,
      max_connections,
    })
  }

  pub fn listen_addr(&self) -> String {
    format!("0.0.0.0:{}", self.port)
  }
}
