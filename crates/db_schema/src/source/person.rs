use crate::{enums::Role, newtypes::PersonId, schema::person, sensitive::SensitiveString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = person)]
#[diesel(check_for_backend(diesel::pg::Pg))]
/// A member of the organization.
pub struct Person {
  pub id: PersonId,
  pub name: String,
  /// The login email.
  pub email: String,
  /// The bcrypt hash of the password. Never sent to clients.
  #[serde(skip)]
  pub password_encrypted: SensitiveString,
  pub department: String,
  pub role: Role,
  pub avatar_url: String,
  pub bio: Option<String>,
  /// Deactivated users can't log in.
  pub active: bool,
  pub published: DateTime<Utc>,
  pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone, derive_new::new, Insertable)]
#[diesel(table_name = person)]
pub struct PersonInsertForm {
  pub name: String,
  pub email: String,
  /// Plain text, hashed on insert.
  pub password_encrypted: String,
  pub department: String,
  #[new(default)]
  pub role: Option<Role>,
  #[new(default)]
  pub avatar_url: Option<String>,
  #[new(default)]
  pub bio: Option<String>,
  #[new(default)]
  pub active: Option<bool>,
}

#[derive(Clone, Default, AsChangeset)]
#[diesel(table_name = person)]
pub struct PersonUpdateForm {
  pub name: Option<String>,
  pub email: Option<String>,
  pub department: Option<String>,
  pub role: Option<Role>,
  pub avatar_url: Option<String>,
  pub bio: Option<Option<String>>,
  pub active: Option<bool>,
  pub updated: Option<Option<DateTime<Utc>>>,
}
