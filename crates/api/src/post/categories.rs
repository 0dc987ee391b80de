use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use connecthub_api_common::{
  context::ConnectHubContext,
  post::{PostCategoriesResponse, ReplacePostCategories},
  utils::{check_can_mutate, clean_category_names},
};
use connecthub_db_schema::{
  newtypes::PostId,
  policy::ResourceKind,
  source::{
    category::Category,
    post::{Post, PostUpdateForm},
  },
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;

/// Replaces every category of a post. Unknown and inactive names are dropped.
#[tracing::instrument(skip(context))]
pub async fn replace_post_categories(
  post_id: Path<i32>,
  data: Json<ReplacePostCategories>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<PostCategoriesResponse>> {
  let post = Post::read_visible(&mut context.pool(), PostId(post_id.into_inner())).await?;
  check_can_mutate(ResourceKind::Post, post.creator_id, &local_user_view)?;

  let post_form = PostUpdateForm {
    updated: Some(Some(Utc::now())),
    ..Default::default()
  };
  let category_names = clean_category_names(&data.categories);
  Post::update_with_categories(
    &mut context.pool(),
    post.id,
    &post_form,
    Some(category_names.as_slice()),
  )
  .await?;

  let categories = Category::for_posts(&mut context.pool(), &[post.id])
    .await?
    .into_iter()
    .map(|(_, category)| category)
    .collect();
  Ok(Json(PostCategoriesResponse {
    message: "Post categories updated successfully".to_string(),
    categories,
  }))
}
