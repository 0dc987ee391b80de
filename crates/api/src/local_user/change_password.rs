use actix_web::web::{Data, Json};
use connecthub_api_common::{
  context::ConnectHubContext,
  person::ChangePassword,
  utils::check_password,
  SuccessResponse,
};
use connecthub_db_schema::source::person::Person;
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::{error::ConnectHubResult, utils::validation::is_valid_password};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn change_password(
  data: Json<ChangePassword>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<SuccessResponse>> {
  check_password(
    &data.current_password,
    &local_user_view.person.password_encrypted,
  )?;
  is_valid_password(&data.new_password)?;

  Person::update_password(
    &mut context.pool(),
    local_user_view.person.id,
    &data.new_password,
  )
  .await?;
  info!(person_id = %local_user_view.person.id, "Password changed");

  Ok(Json(SuccessResponse::new("Password changed successfully")))
}
