use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, utils::check_can_mutate, SuccessResponse};
use connecthub_db_schema::{newtypes::PostId, policy::ResourceKind, source::post::Post};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;
use tracing::info;

/// Soft delete. The post and its comments stay in the database.
#[tracing::instrument(skip(context))]
pub async fn delete_post(
  post_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<SuccessResponse>> {
  let orig_post = Post::read_visible(&mut context.pool(), PostId(post_id.into_inner())).await?;
  check_can_mutate(ResourceKind::Post, orig_post.creator_id, &local_user_view)?;

  Post::soft_delete(&mut context.pool(), orig_post.id).await?;
  info!(post_id = %orig_post.id, deleted_by = %local_user_view.person.id, "Deleted post");

  Ok(Json(SuccessResponse::new("Post deleted successfully")))
}

#[cfg(test)]
mod tests {
  use super::*;
  use connecthub_db_schema::{
    enums::Role,
    schema::person,
    source::{
      person::{Person, PersonInsertForm},
      post::PostInsertForm,
    },
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use connecthub_utils::error::ConnectHubErrorType;
  use diesel::{ExpressionMethods, QueryDsl};
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  async fn create_view(
    context: &ConnectHubContext,
    email: &str,
    role: Role,
  ) -> ConnectHubResult<LocalUserView> {
    let form = PersonInsertForm {
      role: Some(role),
      ..PersonInsertForm::new(
        "Post remover".into(),
        email.into(),
        "remover-password".into(),
        "Finance".into(),
      )
    };
    let person = Person::create(&mut context.pool(), &form).await?;
    Ok(LocalUserView { person })
  }

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_delete_post_permissions() -> ConnectHubResult<()> {
    let context = Data::new(ConnectHubContext::create(build_db_pool_for_tests().await));
    let author = create_view(&context, "remove.author@example.com", Role::Contributor).await?;
    let moderator = create_view(&context, "remove.mod@example.com", Role::Moderator).await?;
    let admin = create_view(&context, "remove.admin@example.com", Role::Admin).await?;

    let form = PostInsertForm::new("Old news".into(), "Outdated".into(), author.person.id);
    let by_author = Post::create(&mut context.pool(), &form).await?;
    let by_admin = Post::create(&mut context.pool(), &form).await?;

    let denied = delete_post(Path::from(by_author.id.0), context.clone(), moderator.clone())
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::NoPostEditAllowed), denied);
    assert!(!Post::read(&mut context.pool(), by_author.id).await?.deleted);

    delete_post(Path::from(by_author.id.0), context.clone(), author.clone()).await?;
    delete_post(Path::from(by_admin.id.0), context.clone(), admin.clone()).await?;
    assert!(Post::read(&mut context.pool(), by_author.id).await?.deleted);
    assert!(Post::read(&mut context.pool(), by_admin.id).await?.deleted);

    // Deleting twice reports the post as gone
    let again = delete_post(Path::from(by_author.id.0), context.clone(), author.clone())
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::NotFound), again);

    let person_ids = vec![author.person.id, moderator.person.id, admin.person.id];
    let pool = &mut context.pool();
    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.filter(person::id.eq_any(person_ids)))
      .execute(conn)
      .await?;
    Ok(())
  }
}
