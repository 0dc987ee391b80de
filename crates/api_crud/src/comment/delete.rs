use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, utils::check_can_mutate, SuccessResponse};
use connecthub_db_schema::{
  newtypes::{CommentId, PostId},
  policy::ResourceKind,
  source::{comment::Comment, post::Post},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;
use tracing::info;

/// Removes the comment row. Moderators may delete any comment.
#[tracing::instrument(skip(context))]
pub async fn delete_comment(
  path: Path<(i32, i32)>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<SuccessResponse>> {
  let (post_id, comment_id) = path.into_inner();
  let post = Post::read_visible(&mut context.pool(), PostId(post_id)).await?;
  let orig_comment =
    Comment::read_for_post(&mut context.pool(), post.id, CommentId(comment_id)).await?;
  check_can_mutate(ResourceKind::Comment, orig_comment.creator_id, &local_user_view)?;

  Comment::delete(&mut context.pool(), orig_comment.id).await?;
  info!(comment_id = %orig_comment.id, deleted_by = %local_user_view.person.id, "Deleted comment");

  Ok(Json(SuccessResponse::new("Comment deleted successfully")))
}
