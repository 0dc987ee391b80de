use connecthub_db_schema::source::{
  category::Category,
  comment::Comment,
  person::Person,
  post::Post,
};
use connecthub_utils::error::ConnectHubErrorType;
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
/// The user making the current request.
pub struct LocalUserView {
  pub person: Person,
}

/// Why a request with an `Authorization` header couldn't be authenticated. Stored in the request
/// extensions so that handlers requiring a login can report it.
#[derive(Debug, Clone)]
pub struct SessionError(pub ConnectHubErrorType);

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
/// A post with its author, categories and engagement counts.
pub struct PostView {
  pub post: Post,
  pub creator: Person,
  pub categories: Vec<Category>,
  pub like_count: i64,
  pub comment_count: i64,
  /// Whether the requesting user likes this post. Always false for anonymous requests.
  pub liked: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Queryable, Selectable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
/// A comment with its author.
pub struct CommentView {
  #[diesel(embed)]
  pub comment: Comment,
  #[diesel(embed)]
  pub creator: Person,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
/// A public profile.
pub struct PersonView {
  pub person: Person,
  pub post_count: i64,
  pub comment_count: i64,
}
