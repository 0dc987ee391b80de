use connecthub_db_views::structs::CommentView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Create a comment.
pub struct CreateComment {
  pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
/// Edit a comment.
pub struct EditComment {
  pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// A comment response.
pub struct CommentResponse {
  pub message: String,
  pub comment_view: CommentView,
}
