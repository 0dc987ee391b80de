use crate::{
  newtypes::{CategoryId, PersonId, PostId},
  schema::{post, post_category, post_like},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = post)]
#[diesel(check_for_backend(diesel::pg::Pg))]
/// A post.
pub struct Post {
  pub id: PostId,
  pub title: String,
  /// The post body. Inline markup is stored as written.
  pub body: String,
  pub creator_id: PersonId,
  /// Pinned posts are listed first.
  pub pinned: bool,
  pub views: i32,
  /// Whether the post is deleted. Deleted posts are hidden everywhere except the admin listing.
  pub deleted: bool,
  pub published: DateTime<Utc>,
  pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, derive_new::new, Insertable)]
#[diesel(table_name = post)]
pub struct PostInsertForm {
  pub title: String,
  pub body: String,
  pub creator_id: PersonId,
  #[new(default)]
  pub pinned: Option<bool>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = post)]
pub struct PostUpdateForm {
  pub title: Option<String>,
  pub body: Option<String>,
  pub pinned: Option<bool>,
  pub deleted: Option<bool>,
  pub updated: Option<Option<DateTime<Utc>>>,
}

#[derive(PartialEq, Eq, Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = post_category)]
#[diesel(primary_key(post_id, category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostCategory {
  pub post_id: PostId,
  pub category_id: CategoryId,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_category)]
pub struct PostCategoryForm {
  pub post_id: PostId,
  pub category_id: CategoryId,
}

#[derive(PartialEq, Eq, Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = post_like)]
#[diesel(primary_key(post_id, person_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostLike {
  pub post_id: PostId,
  pub person_id: PersonId,
  pub published: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_like)]
pub struct PostLikeForm {
  pub post_id: PostId,
  pub person_id: PersonId,
}
