use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{
  context::ConnectHubContext,
  post::{EditPost, PostResponse},
  utils::is_admin,
};
use connecthub_api_crud::post::update::update_post;
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn admin_update_post(
  post_id: Path<i32>,
  data: Json<EditPost>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<PostResponse>> {
  is_admin(&local_user_view)?;
  update_post(post_id, data, context, local_user_view).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::site::delete_post::admin_delete_post;
  use connecthub_db_schema::{
    enums::Role,
    schema::person,
    source::{
      person::{Person, PersonInsertForm},
      post::{Post, PostInsertForm},
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
        "Admin route tester".into(),
        email.into(),
        "tester-password".into(),
        "IT".into(),
      )
    };
    let person = Person::create(&mut context.pool(), &form).await?;
    Ok(LocalUserView { person })
  }

  fn edit(title: &str) -> Json<EditPost> {
    Json(EditPost {
      title: Some(title.to_string()),
      ..Default::default()
    })
  }

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_admin_post_routes_require_admin() -> ConnectHubResult<()> {
    let context = Data::new(ConnectHubContext::create(build_db_pool_for_tests().await));
    let author = create_view(
      &context,
      "admin.posts.author@example.com",
      Role::Contributor,
    )
    .await?;
    let admin = create_view(&context, "admin.posts.admin@example.com", Role::Admin).await?;
    let post_form = PostInsertForm::new("Mine".into(), "My own post".into(), author.person.id);
    let post = Post::create(&mut context.pool(), &post_form).await?;

    // Even the author is turned away from the admin area
    let by_author = admin_update_post(
      Path::from(post.id.0),
      edit("Sneaky"),
      context.clone(),
      author.clone(),
    )
    .await
    .err()
    .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::NotAnAdmin), by_author);
    let by_author = admin_delete_post(Path::from(post.id.0), context.clone(), author.clone())
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::NotAnAdmin), by_author);
    assert_eq!("Mine", Post::read(&mut context.pool(), post.id).await?.title);

    let res = admin_update_post(
      Path::from(post.id.0),
      edit("Reviewed"),
      context.clone(),
      admin.clone(),
    )
    .await?;
    assert_eq!("Reviewed", res.post_view.post.title);

    admin_delete_post(Path::from(post.id.0), context.clone(), admin.clone()).await?;
    assert!(Post::read(&mut context.pool(), post.id).await?.deleted);

    let pool = &mut context.pool();
    let conn = &mut get_conn(pool).await?;
    let person_ids = vec![author.person.id, admin.person.id];
    diesel::delete(person::table.filter(person::id.eq_any(person_ids)))
      .execute(conn)
      .await?;
    Ok(())
  }
}
