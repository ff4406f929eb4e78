use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
  payload::{self, Payload, PayloadError},
  utils::escape_markup,
};

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct User {
  pub id: i32,
  pub name: String,
  pub email: String,
  pub user_type: String,
  // Stored as received; nothing hashes it.
  pub password: String,
  pub about: Option<String>,
  pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub user_type: String,
  pub password: String,
  pub about: Option<String>,
  pub website: Option<String>,
}

impl NewUser {
  pub const REQUIRED_FIELDS: &'static [&'static str] = &["name", "email", "user_type", "password"];

  pub fn from_payload(body: &Payload) -> Result<Self, PayloadError> {
    payload::require(body, Self::REQUIRED_FIELDS)?;

    Ok(Self {
      name: payload::required(body, "name")?,
      email: payload::required(body, "email")?,
      user_type: payload::required(body, "user_type")?,
      password: payload::required(body, "password")?,
      about: payload::optional(body, "about")?,
      website: payload::optional(body, "website")?,
    })
  }
}

/// Fields a PATCH may touch. `None` leaves the column alone, `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
  pub name: Option<Option<String>>,
  pub email: Option<Option<String>>,
  pub password: Option<Option<String>>,
  pub about: Option<Option<String>>,
  pub website: Option<Option<String>>,
}

impl UserChanges {
  pub const UPDATABLE_FIELDS: &'static [&'static str] = &["name", "email", "password", "about", "website"];

  pub fn from_payload(body: &Payload) -> Result<Self, PayloadError> {
    payload::require_any(body, Self::UPDATABLE_FIELDS)?;

    Ok(Self {
      name: payload::change(body, "name")?,
      email: payload::change(body, "email")?,
      password: payload::change(body, "password")?,
      about: payload::change(body, "about")?,
      website: payload::change(body, "website")?,
    })
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.email.is_none()
      && self.password.is_none()
      && self.about.is_none()
      && self.website.is_none()
  }
}

/// Public shape of a user. `about` is escaped every time a row is serialized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserResponse {
  pub id: i32,
  pub name: String,
  pub email: String,
  pub user_type: String,
  pub password: String,
  pub about: Option<String>,
  pub website: Option<String>,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email,
      user_type: user.user_type,
      password: user.password,
      // NULL about stays null rather than becoming "".
      about: user.about.as_deref().map(escape_markup),
      website: user.website,
    }
  }
}
