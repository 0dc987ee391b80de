use crate::{claims::Claims, context::ConnectHubContext, sensitive::Sensitive};
use bcrypt::verify;
use chrono::TimeDelta;
use connecthub_db_schema::{
  newtypes::PersonId,
  policy::{can_mutate, ResourceKind},
  source::person::Person,
  utils::Pagination,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::{ConnectHubErrorType, ConnectHubResult};

pub fn is_admin(local_user_view: &LocalUserView) -> ConnectHubResult<()> {
  if !local_user_view.person.role.is_admin() {
    Err(ConnectHubErrorType::NotAnAdmin)?
  }
  Ok(())
}

/// Authors may always change their own content. Others need an elevated role.
pub fn check_can_mutate(
  kind: ResourceKind,
  author_id: PersonId,
  local_user_view: &LocalUserView,
) -> ConnectHubResult<()> {
  if can_mutate(kind, author_id, &local_user_view.person) {
    Ok(())
  } else {
    match kind {
      ResourceKind::Post => Err(ConnectHubErrorType::NoPostEditAllowed)?,
      ResourceKind::Comment => Err(ConnectHubErrorType::NoCommentEditAllowed)?,
    }
  }
}

pub fn check_user_active(person: &Person) -> ConnectHubResult<()> {
  if !person.active {
    Err(ConnectHubErrorType::AccountDisabled)?
  }
  Ok(())
}

/// Compares a plain text password with a stored bcrypt hash.
pub fn check_password(password: &str, password_encrypted: &str) -> ConnectHubResult<()> {
  let valid = verify(password, password_encrypted).unwrap_or(false);
  if !valid {
    Err(ConnectHubErrorType::IncorrectLogin)?
  }
  Ok(())
}

/// Signs a fresh bearer token for the given person.
pub fn issue_token(
  person_id: PersonId,
  context: &ConnectHubContext,
) -> ConnectHubResult<Sensitive<String>> {
  let settings = context.settings();
  let jwt = Claims::generate(
    person_id,
    &settings.jwt_secret(),
    &settings.hostname,
    TimeDelta::hours(settings.jwt_expiry_hours),
  )?;
  Ok(jwt.into())
}

/// Trims names and drops blanks and duplicates, keeping the first occurrence.
pub fn clean_category_names(names: &[String]) -> Vec<String> {
  let mut cleaned: Vec<String> = Vec::with_capacity(names.len());
  for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
    if !cleaned.iter().any(|c| c == name) {
      cleaned.push(name.to_string());
    }
  }
  cleaned
}

/// Trims optional text and turns blank values into `None`.
pub fn blank_to_none(text: Option<&str>) -> Option<String> {
  text
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(ToString::to_string)
}

pub fn pagination(page: Option<i64>, limit: Option<i64>) -> ConnectHubResult<Pagination> {
  Pagination::new(page, limit)
}
