use connecthub_db_schema::source::category::Category;
use connecthub_db_views::structs::{CommentView, PostView};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Create a post.
pub struct CreatePost {
  pub title: String,
  /// The body, which may contain inline markup.
  pub body: String,
  /// Names of active categories. Unknown names are ignored.
  #[serde(default)]
  pub categories: Vec<String>,
  pub pinned: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostResponse {
  pub message: String,
  pub post_view: PostView,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// The post response.
pub struct GetPostResponse {
  pub post_view: PostView,
  pub comments: Vec<CommentView>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Get a list of posts.
pub struct GetPosts {
  pub category: Option<String>,
  pub search: Option<String>,
  pub pinned: Option<bool>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Searches post titles and bodies.
pub struct SearchPosts {
  pub query: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Edit a post. `categories` replaces the whole set when present.
pub struct EditPost {
  pub title: Option<String>,
  pub body: Option<String>,
  pub pinned: Option<bool>,
  pub categories: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Replaces the categories of a post. An empty list clears them.
pub struct ReplacePostCategories {
  pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostCategoriesResponse {
  pub message: String,
  pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LikePostResponse {
  pub message: String,
  pub liked: bool,
}
