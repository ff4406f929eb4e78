use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use crate::{
  payload::{self, Payload, PayloadError},
  utils::escape_markup,
};

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct Project {
  pub id: i32,
  pub project_type: String,
  pub deadline: DateTime<Utc>,
  pub deadline_flexibility: String,
  pub charity_id: i32,
  pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
  pub project_type: String,
  pub deadline: DateTime<Utc>,
  pub deadline_flexibility: String,
  pub charity_id: i32,
  pub details: Option<String>,
}

impl NewProject {
  pub const REQUIRED_FIELDS: &'static [&'static str] =
    &["project_type", "deadline", "deadline_flexibility", "charity_id"];

  pub fn from_payload(body: &Payload) -> Result<Self, PayloadError> {
    payload::require(body, Self::REQUIRED_FIELDS)?;

    Ok(Self {
      project_type: payload::required(body, "project_type")?,
      deadline: payload::required(body, "deadline")?,
      deadline_flexibility: payload::required(body, "deadline_flexibility")?,
      charity_id: payload::required(body, "charity_id")?,
      details: payload::optional(body, "details")?,
    })
  }
}

/// `charity_id` is fixed at creation and deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
  pub project_type: Option<Option<String>>,
  pub deadline: Option<Option<DateTime<Utc>>>,
  pub deadline_flexibility: Option<Option<String>>,
  pub details: Option<Option<String>>,
}

impl ProjectChanges {
  pub const UPDATABLE_FIELDS: &'static [&'static str] = &["project_type", "deadline", "deadline_flexibility", "details"];

  pub fn from_payload(body: &Payload) -> Result<Self, PayloadError> {
    payload::require_any(body, Self::UPDATABLE_FIELDS)?;

    Ok(Self {
      project_type: payload::change(body, "project_type")?,
      deadline: payload::change(body, "deadline")?,
      deadline_flexibility: payload::change(body, "deadline_flexibility")?,
      details: payload::change(body, "details")?,
    })
  }

  pub fn is_empty(&self) -> bool {
    self.project_type.is_none()
      && self.deadline.is_none()
      && self.deadline_flexibility.is_none()
      && self.details.is_none()
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectResponse {
  pub id: i32,
  pub project_type: String,
  #[serde(serialize_with = "serialize_timestamp_millis")]
  pub deadline: DateTime<Utc>,
  pub deadline_flexibility: String,
  pub charity_id: i32,
  pub details: Option<String>,
}

impl From<Project> for ProjectResponse {
  fn from(project: Project) -> Self {
    Self {
      id: project.id,
      project_type: project.project_type,
      deadline: project.deadline,
      deadline_flexibility: project.deadline_flexibility,
      charity_id: project.charity_id,
      // NULL details stay null rather than becoming "".
      details: project.details.as_deref().map(escape_markup),
    }
  }
}

/// `2018-08-15T23:00:00.000Z`: millisecond precision, `Z` suffix.
fn serialize_timestamp_millis<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
