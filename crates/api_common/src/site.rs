use connecthub_db_schema::{enums::Role, source::person::Person};
use connecthub_db_views::structs::PostView;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SiteCounts {
  pub users: i64,
  /// Posts that aren't deleted.
  pub posts: i64,
  pub comments: i64,
  pub categories: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// The admin dashboard.
pub struct GetDashboardResponse {
  pub stats: SiteCounts,
  pub recent_posts: Vec<PostView>,
  pub recent_users: Vec<Person>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Lists all users, newest first.
pub struct ListUsers {
  /// Matches name, email or department.
  pub search: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Lets an admin edit any account.
pub struct AdminEditUser {
  pub name: Option<String>,
  pub email: Option<String>,
  pub department: Option<String>,
  pub role: Option<Role>,
  pub active: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Lists all posts including deleted ones, newest first.
pub struct AdminListPosts {
  pub search: Option<String>,
  pub category: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}
