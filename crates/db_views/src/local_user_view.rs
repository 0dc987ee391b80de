use crate::structs::{LocalUserView, SessionError};
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use connecthub_db_schema::{
  newtypes::PersonId,
  source::person::Person,
  traits::Crud,
  utils::DbPool,
};
use connecthub_utils::error::{ConnectHubError, ConnectHubErrorType, ConnectHubResult};
use std::future::{ready, Ready};

impl LocalUserView {
  pub async fn read(pool: &mut DbPool<'_>, person_id: PersonId) -> ConnectHubResult<Self> {
    let person = Person::read(pool, person_id).await?;
    Ok(Self { person })
  }

  pub async fn find_by_email(pool: &mut DbPool<'_>, email: &str) -> ConnectHubResult<Self> {
    let person = Person::find_by_email(pool, email)
      .await?
      .ok_or(ConnectHubErrorType::NotFound)?;
    Ok(Self { person })
  }
}

impl FromRequest for LocalUserView {
  type Error = ConnectHubError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let extensions = req.extensions();
    ready(match extensions.get::<LocalUserView>() {
      Some(c) => Ok(c.clone()),
      None => match extensions.get::<SessionError>() {
        Some(SessionError(error_type)) => Err(error_type.clone().into()),
        None => Err(ConnectHubErrorType::NotLoggedIn.into()),
      },
    })
  }
}
