use actix_web::web::{Data, Json};
use chrono::Utc;
use connecthub_api_common::{
  context::ConnectHubContext,
  person::{PersonResponse, SaveProfile},
  utils::blank_to_none,
};
use connecthub_db_schema::{
  source::person::{Person, PersonUpdateForm},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::{
  error::ConnectHubResult,
  utils::validation::{is_valid_bio_field, is_valid_department, is_valid_person_name},
};

#[tracing::instrument(skip(context))]
pub async fn save_profile(
  data: Json<SaveProfile>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<PersonResponse>> {
  let name = data.name.as_deref().map(str::trim);
  let department = data.department.as_deref().map(str::trim);
  if let Some(name) = name {
    is_valid_person_name(name)?;
  }
  if let Some(department) = department {
    is_valid_department(department)?;
  }
  if let Some(bio) = &data.bio {
    is_valid_bio_field(bio)?;
  }

  let person_form = PersonUpdateForm {
    name: name.map(ToString::to_string),
    department: department.map(ToString::to_string),
    // An empty bio clears it
    bio: data.bio.as_deref().map(|b| blank_to_none(Some(b))),
    avatar_url: blank_to_none(data.avatar_url.as_deref()),
    updated: Some(Some(Utc::now())),
    ..Default::default()
  };
  let person = Person::update(&mut context.pool(), local_user_view.person.id, &person_form).await?;

  Ok(Json(PersonResponse {
    message: "Profile updated successfully".to_string(),
    user: person,
  }))
}
