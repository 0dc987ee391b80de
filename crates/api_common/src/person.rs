use crate::sensitive::Sensitive;
use connecthub_db_schema::source::person::Person;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Debug, Serialize, Deserialize, Clone)]
/// Register a new user.
pub struct Register {
  pub name: String,
  pub email: String,
  pub password: Sensitive<String>,
  pub department: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterResponse {
  pub message: String,
  pub token: Sensitive<String>,
  pub user: Person,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// Logging into ConnectHub.
pub struct Login {
  pub email: String,
  pub password: Sensitive<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// A response for your login.
pub struct LoginResponse {
  /// Send this as `Authorization: Bearer <token>`.
  pub token: Sensitive<String>,
  pub user: Person,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// Changes your account password.
pub struct ChangePassword {
  pub current_password: Sensitive<String>,
  pub new_password: Sensitive<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Edits your own profile. An empty `bio` clears it.
pub struct SaveProfile {
  pub name: Option<String>,
  pub department: Option<String>,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PersonResponse {
  pub message: String,
  pub user: Person,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Lists the posts of a person.
pub struct GetPersonPosts {
  pub page: Option<i64>,
  pub limit: Option<i64>,
}
