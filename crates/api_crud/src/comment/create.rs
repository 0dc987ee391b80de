use actix_web::{
  web::{Data, Json, Path},
  HttpResponse,
};
use connecthub_api_common::{
  comment::{CommentResponse, CreateComment},
  context::ConnectHubContext,
};
use connecthub_db_schema::{
  newtypes::PostId,
  source::{
    comment::{Comment, CommentInsertForm},
    post::Post,
  },
  traits::Crud,
};
use connecthub_db_views::structs::{CommentView, LocalUserView};
use connecthub_utils::{error::ConnectHubResult, utils::validation::is_valid_comment};

#[tracing::instrument(skip(context))]
pub async fn create_comment(
  post_id: Path<i32>,
  data: Json<CreateComment>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<HttpResponse> {
  let content = data.content.trim();
  is_valid_comment(content)?;

  let post = Post::read_visible(&mut context.pool(), PostId(post_id.into_inner())).await?;

  let comment_form =
    CommentInsertForm::new(post.id, local_user_view.person.id, content.to_string());
  let comment = Comment::create(&mut context.pool(), &comment_form).await?;
  let comment_view = CommentView::read(&mut context.pool(), comment.id).await?;

  Ok(HttpResponse::Created().json(CommentResponse {
    message: "Comment added successfully".to_string(),
    comment_view,
  }))
}
