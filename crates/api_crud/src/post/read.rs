use actix_web::web::{Data, Json, Path};
use connecthub_api_common::{context::ConnectHubContext, post::GetPostResponse};
use connecthub_db_schema::{newtypes::PostId, source::post::Post};
use connecthub_db_views::structs::{CommentView, LocalUserView, PostView};
use connecthub_utils::error::ConnectHubResult;

/// Every fetch counts as a view, including the author's own.
#[tracing::instrument(skip(context))]
pub async fn get_post(
  post_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: Option<LocalUserView>,
) -> ConnectHubResult<Json<GetPostResponse>> {
  let post_id = PostId(post_id.into_inner());
  let my_person_id = local_user_view.map(|l| l.person.id);

  let post = Post::increment_views(&mut context.pool(), post_id).await?;
  let post_view = PostView::from_post(&mut context.pool(), post, my_person_id).await?;
  let comments = CommentView::list_for_post(&mut context.pool(), post_id).await?;

  Ok(Json(GetPostResponse {
    post_view,
    comments,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use connecthub_db_schema::{
    schema::person,
    source::{
      person::{Person, PersonInsertForm},
      post::PostInsertForm,
    },
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use connecthub_utils::error::ConnectHubErrorType;
  use diesel::QueryDsl;
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_get_post_counts_views() -> ConnectHubResult<()> {
    let context = Data::new(ConnectHubContext::create(build_db_pool_for_tests().await));
    let form = PersonInsertForm::new(
      "Riley".into(),
      "riley.views@example.com".into(),
      "riley-password".into(),
      "HR".into(),
    );
    let person = Person::create(&mut context.pool(), &form).await?;
    let author = LocalUserView { person };
    let post_form =
      PostInsertForm::new("Holidays".into(), "Office closed".into(), author.person.id);
    let post = Post::create(&mut context.pool(), &post_form).await?;

    let anonymous = get_post(Path::from(post.id.0), context.clone(), None).await?;
    assert_eq!(1, anonymous.post_view.post.views);
    assert!(!anonymous.post_view.liked);

    // The author's own reads count too
    let own = get_post(Path::from(post.id.0), context.clone(), Some(author.clone())).await?;
    assert_eq!(2, own.post_view.post.views);
    assert_eq!(2, Post::read(&mut context.pool(), post.id).await?.views);
    assert!(own.comments.is_empty());

    Post::soft_delete(&mut context.pool(), post.id).await?;
    let deleted = get_post(Path::from(post.id.0), context.clone(), None)
      .await
      .err()
      .map(|e| e.error_type);
    assert_eq!(Some(ConnectHubErrorType::NotFound), deleted);
    assert_eq!(2, Post::read(&mut context.pool(), post.id).await?.views);

    let pool = &mut context.pool();
    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.find(author.person.id))
      .execute(conn)
      .await?;
    Ok(())
  }
}
