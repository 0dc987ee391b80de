use connecthub_db_schema::source::category::Category;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListCategories {
  pub active_only: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Create a category.
pub struct CreateCategory {
  pub name: String,
  pub description: Option<String>,
  pub active: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Edit a category. An empty `description` clears it.
pub struct EditCategory {
  pub name: Option<String>,
  pub description: Option<String>,
  pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryResponse {
  pub message: String,
  pub category: Category,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Lists the posts in a category, pinned first.
pub struct GetCategoryPosts {
  pub page: Option<i64>,
  pub limit: Option<i64>,
}
