use crate::{newtypes::CategoryId, schema::category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
/// A topic that posts can be filed under.
pub struct Category {
  pub id: CategoryId,
  pub name: String,
  pub description: Option<String>,
  /// Inactive categories can't be attached to new posts, but stay on old ones.
  pub active: bool,
  pub published: DateTime<Utc>,
  pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, derive_new::new, Insertable)]
#[diesel(table_name = category)]
pub struct CategoryInsertForm {
  pub name: String,
  #[new(default)]
  pub description: Option<String>,
  #[new(default)]
  pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = category)]
pub struct CategoryUpdateForm {
  pub name: Option<String>,
  pub description: Option<Option<String>>,
  pub active: Option<bool>,
  pub updated: Option<Option<DateTime<Utc>>>,
}
