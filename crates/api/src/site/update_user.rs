use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use connecthub_api_common::{
  context::ConnectHubContext,
  person::PersonResponse,
  site::AdminEditUser,
  utils::is_admin,
};
use connecthub_db_schema::{
  newtypes::PersonId,
  source::person::{Person, PersonUpdateForm},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::{
  error::ConnectHubResult,
  utils::validation::{is_valid_department, is_valid_email, is_valid_person_name},
};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn update_user(
  person_id: Path<i32>,
  data: Json<AdminEditUser>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<PersonResponse>> {
  is_admin(&local_user_view)?;
  let orig_person = Person::read(&mut context.pool(), PersonId(person_id.into_inner())).await?;

  let name = data.name.as_deref().map(str::trim);
  let email = data.email.as_deref().map(str::trim);
  let department = data.department.as_deref().map(str::trim);
  if let Some(name) = name {
    is_valid_person_name(name)?;
  }
  if let Some(email) = email {
    is_valid_email(email)?;
    Person::check_email_taken(&mut context.pool(), email, Some(orig_person.id)).await?;
  }
  if let Some(department) = department {
    is_valid_department(department)?;
  }

  let person_form = PersonUpdateForm {
    name: name.map(ToString::to_string),
    email: email.map(ToString::to_string),
    department: department.map(ToString::to_string),
    role: data.role,
    active: data.active,
    updated: Some(Some(Utc::now())),
    ..Default::default()
  };
  let person = Person::update(&mut context.pool(), orig_person.id, &person_form).await?;
  info!(person_id = %person.id, role = %person.role, active = person.active, "Admin updated user");

  Ok(Json(PersonResponse {
    message: "User updated successfully".to_string(),
    user: person,
  }))
}
