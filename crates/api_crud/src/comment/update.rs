use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use connecthub_api_common::{
  comment::{CommentResponse, EditComment},
  context::ConnectHubContext,
  utils::check_can_mutate,
};
use connecthub_db_schema::{
  newtypes::{CommentId, PostId},
  policy::ResourceKind,
  source::{
    comment::{Comment, CommentUpdateForm},
    post::Post,
  },
  traits::Crud,
};
use connecthub_db_views::structs::{CommentView, LocalUserView};
use connecthub_utils::{error::ConnectHubResult, utils::validation::is_valid_comment};

#[tracing::instrument(skip(context))]
pub async fn update_comment(
  path: Path<(i32, i32)>,
  data: Json<EditComment>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<CommentResponse>> {
  let (post_id, comment_id) = path.into_inner();
  let post = Post::read_visible(&mut context.pool(), PostId(post_id)).await?;
  let orig_comment =
    Comment::read_for_post(&mut context.pool(), post.id, CommentId(comment_id)).await?;
  check_can_mutate(ResourceKind::Comment, orig_comment.creator_id, &local_user_view)?;

  let content = data.content.trim();
  is_valid_comment(content)?;

  let comment_form = CommentUpdateForm {
    content: Some(content.to_string()),
    updated: Some(Some(Utc::now())),
  };
  Comment::update(&mut context.pool(), orig_comment.id, &comment_form).await?;
  let comment_view = CommentView::read(&mut context.pool(), orig_comment.id).await?;

  Ok(Json(CommentResponse {
    message: "Comment updated successfully".to_string(),
    comment_view,
  }))
}
