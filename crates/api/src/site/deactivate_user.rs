use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, person::PersonResponse, utils::is_admin};
use connecthub_db_schema::{newtypes::PersonId, source::person::Person, traits::Crud};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;
use tracing::info;

/// Accounts are never removed. A deactivated user can't log in and their tokens stop working.
#[tracing::instrument(skip(context))]
pub async fn deactivate_user(
  person_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<PersonResponse>> {
  is_admin(&local_user_view)?;
  let orig_person = Person::read(&mut context.pool(), PersonId(person_id.into_inner())).await?;

  let person = Person::deactivate(&mut context.pool(), orig_person.id).await?;
  info!(person_id = %person.id, deactivated_by = %local_user_view.person.id, "Deactivated user");

  Ok(Json(PersonResponse {
    message: "User deactivated successfully".to_string(),
    user: person,
  }))
}
