use crate::structs::CommentView;
use connecthub_db_schema::{
  newtypes::{CommentId, PostId},
  schema::{comment, person},
  utils::{get_conn, DbPool},
};
use connecthub_utils::error::{ConnectHubErrorExt, ConnectHubErrorType, ConnectHubResult};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

impl CommentView {
  pub async fn read(pool: &mut DbPool<'_>, comment_id: CommentId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    comment::table
      .inner_join(person::table)
      .filter(comment::id.eq(comment_id))
      .select(Self::as_select())
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  /// All comments of a post, oldest first.
  pub async fn list_for_post(
    pool: &mut DbPool<'_>,
    post_id: PostId,
  ) -> ConnectHubResult<Vec<Self>> {
    let conn = &mut get_conn(pool).await?;
    Ok(
      comment::table
        .inner_join(person::table)
        .filter(comment::post_id.eq(post_id))
        .order_by((comment::published.asc(), comment::id.asc()))
        .select(Self::as_select())
        .load(conn)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use crate::structs::CommentView;
  use connecthub_db_schema::{
    schema::person,
    source::{
      comment::{Comment, CommentInsertForm, CommentUpdateForm},
      person::{Person, PersonInsertForm},
      post::{Post, PostInsertForm},
    },
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use connecthub_utils::error::{ConnectHubErrorType, ConnectHubResult};
  use diesel::{ExpressionMethods, QueryDsl};
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  #[ignore]
  async fn test_comment_lifecycle() -> ConnectHubResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let author = Person::create(
      pool,
      &PersonInsertForm::new(
        "Comment author".into(),
        "comment.view.author@example.com".into(),
        "password123".into(),
        "Support".into(),
      ),
    )
    .await?;
    let post = Post::create(
      pool,
      &PostInsertForm::new("Comments".into(), "Talk here".into(), author.id),
    )
    .await?;
    let other_post = Post::create(
      pool,
      &PostInsertForm::new("Elsewhere".into(), "Quiet".into(), author.id),
    )
    .await?;

    let first = Comment::create(
      pool,
      &CommentInsertForm::new(post.id, author.id, "First".into()),
    )
    .await?;
    let second = Comment::create(
      pool,
      &CommentInsertForm::new(post.id, author.id, "Second".into()),
    )
    .await?;

    let listed = CommentView::list_for_post(pool, post.id).await?;
    assert_eq!(
      vec![first.id, second.id],
      listed.iter().map(|c| c.comment.id).collect::<Vec<_>>()
    );
    assert_eq!(
      Some("Comment author"),
      listed.iter().next().map(|c| c.creator.name.as_str())
    );

    // A comment is only found under its own post
    let wrong_post = Comment::read_for_post(pool, other_post.id, first.id).await;
    assert!(matches!(
      wrong_post,
      Err(e) if e.error_type == ConnectHubErrorType::NotFound
    ));

    let form = CommentUpdateForm {
      content: Some("First, edited".into()),
      ..Default::default()
    };
    Comment::update(pool, first.id, &form).await?;
    let edited = CommentView::read(pool, first.id).await?;
    assert_eq!("First, edited", edited.comment.content);

    assert_eq!(1, Comment::delete(pool, first.id).await?);
    let listed = CommentView::list_for_post(pool, post.id).await?;
    assert_eq!(
      vec![second.id],
      listed.iter().map(|c| c.comment.id).collect::<Vec<_>>()
    );
    assert_eq!(1, Comment::count_for_creator(pool, author.id).await?);

    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.filter(person::id.eq(author.id)))
      .execute(conn)
      .await?;
    Ok(())
  }
}
