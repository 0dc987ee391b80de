use crate::{
  enums::Role,
  newtypes::PersonId,
  schema::person,
  source::person::{Person, PersonInsertForm, PersonUpdateForm},
  traits::Crud,
  utils::{get_conn, is_unique_violation, DbPool},
};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use connecthub_utils::error::{ConnectHubErrorExt, ConnectHubErrorType, ConnectHubResult};
use diesel::{dsl::insert_into, ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for Person {
  type InsertForm = PersonInsertForm;
  type UpdateForm = PersonUpdateForm;
  type IdType = PersonId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> ConnectHubResult<Self> {
    let mut form_with_encrypted_password = form.clone();
    form_with_encrypted_password.password_encrypted = hash(&form.password_encrypted, DEFAULT_COST)?;

    let conn = &mut get_conn(pool).await?;
    let inserted = insert_into(person::table)
      .values(form_with_encrypted_password)
      .get_result::<Self>(conn)
      .await;
    match inserted {
      Err(e) if is_unique_violation(&e) => Err(ConnectHubErrorType::EmailAlreadyExists.into()),
      inserted => inserted.with_connecthub_type(ConnectHubErrorType::CouldntCreate),
    }
  }

  async fn read(pool: &mut DbPool<'_>, person_id: PersonId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    person::table
      .find(person_id)
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    form: &Self::UpdateForm,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    let updated = diesel::update(person::table.find(person_id))
      .set(form)
      .get_result::<Self>(conn)
      .await;
    match updated {
      Err(e) if is_unique_violation(&e) => Err(ConnectHubErrorType::EmailAlreadyExists.into()),
      updated => updated.with_connecthub_type(ConnectHubErrorType::CouldntUpdate),
    }
  }
}

impl Person {
  pub async fn find_by_email(pool: &mut DbPool<'_>, email: &str) -> ConnectHubResult<Option<Self>> {
    let conn = &mut get_conn(pool).await?;
    Ok(
      person::table
        .filter(person::email.eq(email))
        .first(conn)
        .await
        .optional()?,
    )
  }

  /// Fails with `EmailAlreadyExists` if someone other than `except` uses this email.
  pub async fn check_email_taken(
    pool: &mut DbPool<'_>,
    email: &str,
    except: Option<PersonId>,
  ) -> ConnectHubResult<()> {
    match Self::find_by_email(pool, email).await? {
      Some(existing) if Some(existing.id) != except => {
        Err(ConnectHubErrorType::EmailAlreadyExists)?
      }
      _ => Ok(()),
    }
  }

  pub async fn update_password(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    new_password: &str,
  ) -> ConnectHubResult<Self> {
    let password_hash = hash(new_password, DEFAULT_COST)?;
    let conn = &mut get_conn(pool).await?;
    diesel::update(person::table.find(person_id))
      .set((
        person::password_encrypted.eq(password_hash),
        person::updated.eq(Utc::now()),
      ))
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)
  }

  pub async fn deactivate(pool: &mut DbPool<'_>, person_id: PersonId) -> ConnectHubResult<Self> {
    let form = PersonUpdateForm {
      active: Some(false),
      updated: Some(Some(Utc::now())),
      ..Default::default()
    };
    Self::update(pool, person_id, &form).await
  }

  pub async fn admin_exists(pool: &mut DbPool<'_>) -> ConnectHubResult<bool> {
    let conn = &mut get_conn(pool).await?;
    let admins: i64 = person::table
      .filter(person::role.eq(Role::Admin))
      .filter(person::active.eq(true))
      .count()
      .get_result(conn)
      .await?;
    Ok(admins > 0)
  }

  pub async fn count(pool: &mut DbPool<'_>) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(person::table.count().get_result(conn).await?)
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    enums::Role,
    schema::person,
    source::person::{Person, PersonInsertForm, PersonUpdateForm},
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use connecthub_utils::error::{ConnectHubErrorType, ConnectHubResult};
  use diesel::QueryDsl;
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_crud() -> ConnectHubResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let form = PersonInsertForm::new(
      "Holly".into(),
      "holly.person@example.com".into(),
      "hunter2hunter2".into(),
      "Design".into(),
    );
    let holly = Person::create(pool, &form).await?;
    assert_eq!(Role::Contributor, holly.role);
    assert!(holly.active);
    assert_eq!("/avatars/default.jpg", holly.avatar_url);
    assert_ne!("hunter2hunter2", &*holly.password_encrypted);

    let duplicate = Person::create(pool, &form).await;
    assert!(matches!(
      duplicate,
      Err(e) if e.error_type == ConnectHubErrorType::EmailAlreadyExists
    ));
    assert!(Person::check_email_taken(pool, &holly.email, Some(holly.id))
      .await
      .is_ok());
    assert!(Person::check_email_taken(pool, &holly.email, None)
      .await
      .is_err());

    let form = PersonUpdateForm {
      bio: Some(Some("Hello".into())),
      ..Default::default()
    };
    let updated = Person::update(pool, holly.id, &form).await?;
    assert_eq!(Some("Hello".to_string()), updated.bio);

    let deactivated = Person::deactivate(pool, holly.id).await?;
    assert!(!deactivated.active);

    let found = Person::find_by_email(pool, "holly.person@example.com").await?;
    assert_eq!(Some(holly.id), found.map(|p| p.id));

    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.find(holly.id))
      .execute(conn)
      .await?;
    Ok(())
  }
}
