use actix_web::web::{Data, Json, Path};
use connecthub_api_common::context::ConnectHubContext;
use connecthub_db_schema::{newtypes::PostId, source::post::Post};
use connecthub_db_views::structs::CommentView;
use connecthub_utils::error::ConnectHubResult;

/// Comments of a deleted post are hidden along with the post.
#[tracing::instrument(skip(context))]
pub async fn list_comments(
  post_id: Path<i32>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<Json<Vec<CommentView>>> {
  let post = Post::read_visible(&mut context.pool(), PostId(post_id.into_inner())).await?;
  let comments = CommentView::list_for_post(&mut context.pool(), post.id).await?;
  Ok(Json(comments))
}
