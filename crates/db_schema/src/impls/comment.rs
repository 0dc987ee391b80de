use crate::{
  newtypes::{CommentId, PersonId, PostId},
  schema::comment,
  source::comment::{Comment, CommentInsertForm, CommentUpdateForm},
  traits::Crud,
  utils::{get_conn, DbPool},
};
use connecthub_utils::error::{ConnectHubErrorExt, ConnectHubErrorType, ConnectHubResult};
use diesel::{
  dsl::{count_star, insert_into},
  ExpressionMethods,
  QueryDsl,
};
use diesel_async::RunQueryDsl;

impl Crud for Comment {
  type InsertForm = CommentInsertForm;
  type UpdateForm = CommentUpdateForm;
  type IdType = CommentId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    insert_into(comment::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntCreate)
  }

  async fn read(pool: &mut DbPool<'_>, comment_id: CommentId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    comment::table
      .find(comment_id)
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    comment_id: CommentId,
    form: &Self::UpdateForm,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(comment::table.find(comment_id))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)
  }

  async fn delete(pool: &mut DbPool<'_>, comment_id: CommentId) -> ConnectHubResult<usize> {
    let conn = &mut get_conn(pool).await?;
    diesel::delete(comment::table.find(comment_id))
      .execute(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)
  }
}

impl Comment {
  /// Reads a comment only if it belongs to the given post.
  pub async fn read_for_post(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    comment_id: CommentId,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    comment::table
      .find(comment_id)
      .filter(comment::post_id.eq(post_id))
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  /// Comment counts per post. Posts without comments are absent.
  pub async fn counts_for_posts(
    pool: &mut DbPool<'_>,
    post_ids: &[PostId],
  ) -> ConnectHubResult<Vec<(PostId, i64)>> {
    if post_ids.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    Ok(
      comment::table
        .filter(comment::post_id.eq_any(post_ids))
        .group_by(comment::post_id)
        .select((comment::post_id, count_star()))
        .load::<(PostId, i64)>(conn)
        .await?,
    )
  }

  pub async fn count(pool: &mut DbPool<'_>) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(comment::table.count().get_result(conn).await?)
  }

  pub async fn count_for_creator(
    pool: &mut DbPool<'_>,
    creator_id: PersonId,
  ) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(
      comment::table
        .filter(comment::creator_id.eq(creator_id))
        .count()
        .get_result(conn)
        .await?,
    )
  }
}
