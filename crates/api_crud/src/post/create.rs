use actix_web::{
  web::{Data, Json},
  HttpResponse,
};
use connecthub_api_common::{
  context::ConnectHubContext,
  post::{CreatePost, PostResponse},
  utils::clean_category_names,
};
use connecthub_db_schema::source::post::{Post, PostInsertForm};
use connecthub_db_views::structs::{LocalUserView, PostView};
use connecthub_utils::{
  error::ConnectHubResult,
  utils::validation::{is_valid_post_body, is_valid_post_title},
};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn create_post(
  data: Json<CreatePost>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<HttpResponse> {
  let title = data.title.trim();
  is_valid_post_title(title)?;
  is_valid_post_body(&data.body)?;

  let post_form = PostInsertForm {
    pinned: data.pinned,
    ..PostInsertForm::new(
      title.to_string(),
      data.body.clone(),
      local_user_view.person.id,
    )
  };
  let category_names = clean_category_names(&data.categories);
  let post = Post::create_with_categories(&mut context.pool(), &post_form, &category_names).await?;
  info!(post_id = %post.id, creator_id = %post.creator_id, "Created post");

  let post_view =
    PostView::from_post(&mut context.pool(), post, Some(local_user_view.person.id)).await?;
  Ok(HttpResponse::Created().json(PostResponse {
    message: "Post created successfully".to_string(),
    post_view,
  }))
}
