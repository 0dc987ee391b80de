use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, post::LikePostResponse};
use connecthub_db_schema::{
  newtypes::PostId,
  source::post::{Post, PostLike, PostLikeForm},
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;

/// Likes the post, or removes the like if it already exists.
#[tracing::instrument(skip(context))]
pub async fn like_post(
  post_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<LikePostResponse>> {
  let post = Post::read_visible(&mut context.pool(), PostId(post_id.into_inner())).await?;

  let like_form = PostLikeForm {
    post_id: post.id,
    person_id: local_user_view.person.id,
  };
  let liked = PostLike::toggle(&mut context.pool(), &like_form).await?;

  let message = if liked {
    "Post liked"
  } else {
    "Post like removed"
  };
  Ok(Json(LikePostResponse {
    message: message.to_string(),
    liked,
  }))
}
