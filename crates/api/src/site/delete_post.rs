use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, utils::is_admin, SuccessResponse};
use connecthub_api_crud::post::delete::delete_post;
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;

/// Soft deletes any post. Only admins get here.
#[tracing::instrument(skip(context))]
pub async fn admin_delete_post(
  post_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<SuccessResponse>> {
  is_admin(&local_user_view)?;
  delete_post(post_id, context, local_user_view).await
}
