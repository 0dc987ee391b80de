use actix_web::web::Json;
use connecthub_api_common::SuccessResponse;
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;
use tracing::info;

/// Tokens aren't stored on the server, so the client only needs to discard its token.
#[tracing::instrument]
pub async fn logout(local_user_view: LocalUserView) -> ConnectHubResult<Json<SuccessResponse>> {
  info!(person_id = %local_user_view.person.id, "User logged out");
  Ok(Json(SuccessResponse::new("Logged out successfully")))
}
