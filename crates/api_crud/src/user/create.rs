use actix_web::{
  web::{Data, Json},
  HttpResponse,
};
use connecthub_api_common::{
  context::ConnectHubContext,
  person::{Register, RegisterResponse},
  utils::issue_token,
};
use connecthub_db_schema::{
  source::person::{Person, PersonInsertForm},
  traits::Crud,
};
use connecthub_utils::{
  error::ConnectHubResult,
  utils::validation::{is_valid_department, is_valid_email, is_valid_password, is_valid_person_name},
};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn register(
  data: Json<Register>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<HttpResponse> {
  let name = data.name.trim();
  let email = data.email.trim();
  let department = data.department.trim();

  is_valid_person_name(name)?;
  is_valid_email(email)?;
  is_valid_password(&data.password)?;
  is_valid_department(department)?;

  Person::check_email_taken(&mut context.pool(), email, None).await?;

  // New accounts always start as contributors
  let person_form = PersonInsertForm::new(
    name.to_string(),
    email.to_string(),
    data.password.clone().into_inner(),
    department.to_string(),
  );
  let person = Person::create(&mut context.pool(), &person_form).await?;
  info!(person_id = %person.id, "Registered new user");

  let token = issue_token(person.id, &context)?;
  Ok(HttpResponse::Created().json(RegisterResponse {
    message: "User registered successfully".to_string(),
    token,
    user: person,
  }))
}
