use actix_web::web::{Data, Json};
use connecthub_api_common::{
  context::ConnectHubContext,
  person::{Login, LoginResponse},
  utils::{check_password, check_user_active, issue_token},
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::{ConnectHubErrorExt2, ConnectHubErrorType, ConnectHubResult};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn login(
  data: Json<Login>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<Json<LoginResponse>> {
  // Unknown emails and wrong passwords look the same to the client
  let local_user_view = LocalUserView::find_by_email(&mut context.pool(), data.email.trim())
    .await
    .with_connecthub_type(ConnectHubErrorType::IncorrectLogin)?;

  check_password(&data.password, &local_user_view.person.password_encrypted)?;
  check_user_active(&local_user_view.person)?;

  let token = issue_token(local_user_view.person.id, &context)?;
  info!(person_id = %local_user_view.person.id, "User logged in");

  Ok(Json(LoginResponse {
    token,
    user: local_user_view.person,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use connecthub_api_common::claims::Claims;
  use connecthub_db_schema::{
    schema::person,
    source::person::{Person, PersonInsertForm},
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use diesel::QueryDsl;
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  fn login_form(email: &str, password: &str) -> Json<Login> {
    Json(Login {
      email: email.to_string(),
      password: password.into(),
    })
  }

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_login() -> ConnectHubResult<()> {
    let context = Data::new(ConnectHubContext::create(build_db_pool_for_tests().await));
    let email = "quinn.login@example.com";
    let form = PersonInsertForm::new(
      "Quinn".into(),
      email.into(),
      "correct-password".into(),
      "Legal".into(),
    );
    let person = Person::create(&mut context.pool(), &form).await?;

    let res = login(login_form(email, "correct-password"), context.clone()).await?;
    assert_eq!(person.id, res.user.id);
    let claims = Claims::decode(&res.token, &context.settings().jwt_secret())?;
    assert_eq!(person.id, claims.person_id());

    let wrong_password = login(login_form(email, "wrong-password"), context.clone())
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::IncorrectLogin), wrong_password);

    let unknown_email = login(
      login_form("nobody@example.com", "correct-password"),
      context.clone(),
    )
    .await
    .err()
    .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::IncorrectLogin), unknown_email);

    Person::deactivate(&mut context.pool(), person.id).await?;
    let disabled = login(login_form(email, "correct-password"), context.clone())
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::AccountDisabled), disabled);

    let pool = &mut context.pool();
    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.find(person.id))
      .execute(conn)
      .await?;
    Ok(())
  }
}
