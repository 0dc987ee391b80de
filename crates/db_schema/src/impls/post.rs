use crate::{
  newtypes::{CategoryId, PersonId, PostId},
  schema::{post, post_category, post_like},
  source::{
    category::Category,
    post::{Post, PostCategoryForm, PostInsertForm, PostLike, PostLikeForm, PostUpdateForm},
  },
  traits::{Crud, Likeable},
  utils::{get_conn, DbPool},
};
use chrono::Utc;
use connecthub_utils::error::{
  ConnectHubError,
  ConnectHubErrorExt,
  ConnectHubErrorType,
  ConnectHubResult,
};
use diesel::{
  dsl::{count_star, insert_into},
  ExpressionMethods,
  OptionalExtension,
  QueryDsl,
};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

impl Crud for Post {
  type InsertForm = PostInsertForm;
  type UpdateForm = PostUpdateForm;
  type IdType = PostId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    insert_into(post::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntCreate)
  }

  /// Reads a post whether or not it is deleted.
  async fn read(pool: &mut DbPool<'_>, post_id: PostId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    post::table
      .find(post_id)
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    form: &Self::UpdateForm,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(post::table.find(post_id))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)
  }
}

impl Post {
  /// Reads a post, treating a deleted one as missing.
  pub async fn read_visible(pool: &mut DbPool<'_>, post_id: PostId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    post::table
      .find(post_id)
      .filter(post::deleted.eq(false))
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  /// Updates a post unless it is deleted. A deleted post is reported as missing.
  pub async fn update_visible(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    form: &PostUpdateForm,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    let post = diesel::update(post::table.find(post_id).filter(post::deleted.eq(false)))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .optional()
      .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)?;
    Ok(post.ok_or(ConnectHubErrorType::NotFound)?)
  }

  /// Counts one view and returns the updated post. Deleted posts are not counted.
  pub async fn increment_views(pool: &mut DbPool<'_>, post_id: PostId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(post::table.find(post_id).filter(post::deleted.eq(false)))
      .set(post::views.eq(post::views + 1))
      .get_result::<Self>(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  /// Inserts the post and attaches the named active categories in one transaction.
  pub async fn create_with_categories(
    pool: &mut DbPool<'_>,
    form: &PostInsertForm,
    category_names: &[String],
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ConnectHubError, _>(|conn| {
        async move {
          let post = Self::create(&mut conn.into(), form).await?;
          let categories = Category::read_active_by_names(&mut conn.into(), category_names).await?;
          let category_ids = categories.iter().map(|c| c.id).collect::<Vec<_>>();
          Self::replace_categories(&mut conn.into(), post.id, &category_ids).await?;
          Ok(post)
        }
        .scope_boxed()
      })
      .await
  }

  /// Updates the post, and if `category_names` is given, replaces its categories in the same
  /// transaction.
  pub async fn update_with_categories(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    form: &PostUpdateForm,
    category_names: Option<&[String]>,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ConnectHubError, _>(|conn| {
        async move {
          let post = Self::update_visible(&mut conn.into(), post_id, form).await?;
          if let Some(names) = category_names {
            let categories = Category::read_active_by_names(&mut conn.into(), names).await?;
            let category_ids = categories.iter().map(|c| c.id).collect::<Vec<_>>();
            Self::replace_categories(&mut conn.into(), post_id, &category_ids).await?;
          }
          Ok(post)
        }
        .scope_boxed()
      })
      .await
  }

  /// Replaces the whole category set of a post. An empty list clears it.
  pub async fn replace_categories(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    category_ids: &[CategoryId],
  ) -> ConnectHubResult<()> {
    let conn = &mut get_conn(pool).await?;
    let forms = category_ids
      .iter()
      .map(|&category_id| PostCategoryForm {
        post_id,
        category_id,
      })
      .collect::<Vec<_>>();

    conn
      .transaction::<_, ConnectHubError, _>(|conn| {
        async move {
          diesel::delete(post_category::table.filter(post_category::post_id.eq(post_id)))
            .execute(conn)
            .await
            .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)?;

          if !forms.is_empty() {
            insert_into(post_category::table)
              .values(forms)
              .on_conflict_do_nothing()
              .execute(conn)
              .await
              .with_connecthub_type(ConnectHubErrorType::CouldntUpdate)?;
          }
          Ok(())
        }
        .scope_boxed()
      })
      .await
  }

  pub async fn soft_delete(pool: &mut DbPool<'_>, post_id: PostId) -> ConnectHubResult<Self> {
    let form = PostUpdateForm {
      deleted: Some(true),
      updated: Some(Some(Utc::now())),
      ..Default::default()
    };
    Self::update_visible(pool, post_id, &form).await
  }

  pub async fn count(pool: &mut DbPool<'_>) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(
      post::table
        .filter(post::deleted.eq(false))
        .count()
        .get_result(conn)
        .await?,
    )
  }

  pub async fn count_for_creator(
    pool: &mut DbPool<'_>,
    creator_id: PersonId,
  ) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(
      post::table
        .filter(post::creator_id.eq(creator_id))
        .filter(post::deleted.eq(false))
        .count()
        .get_result(conn)
        .await?,
    )
  }
}

impl Likeable for PostLike {
  type Form = PostLikeForm;
  type IdType = PostId;

  async fn like(pool: &mut DbPool<'_>, form: &PostLikeForm) -> ConnectHubResult<usize> {
    let conn = &mut get_conn(pool).await?;
    insert_into(post_like::table)
      .values(form)
      .on_conflict_do_nothing()
      .execute(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::CouldntLikePost)
  }

  async fn remove(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    post_id: PostId,
  ) -> ConnectHubResult<usize> {
    let conn = &mut get_conn(pool).await?;
    diesel::delete(
      post_like::table
        .filter(post_like::post_id.eq(post_id))
        .filter(post_like::person_id.eq(person_id)),
    )
    .execute(conn)
    .await
    .with_connecthub_type(ConnectHubErrorType::CouldntLikePost)
  }
}

impl PostLike {
  /// Removes the like if it exists, otherwise adds it. Returns whether the post is now liked.
  ///
  /// A like inserted concurrently by another request still counts as liked.
  pub async fn toggle(pool: &mut DbPool<'_>, form: &PostLikeForm) -> ConnectHubResult<bool> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ConnectHubError, _>(|conn| {
        async move {
          let removed = Self::remove(&mut conn.into(), form.person_id, form.post_id).await?;
          if removed > 0 {
            return Ok(false);
          }
          Self::like(&mut conn.into(), form).await?;
          Ok(true)
        }
        .scope_boxed()
      })
      .await
  }

  /// Like counts per post. Posts without likes are absent.
  pub async fn counts_for_posts(
    pool: &mut DbPool<'_>,
    post_ids: &[PostId],
  ) -> ConnectHubResult<Vec<(PostId, i64)>> {
    if post_ids.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    Ok(
      post_like::table
        .filter(post_like::post_id.eq_any(post_ids))
        .group_by(post_like::post_id)
        .select((post_like::post_id, count_star()))
        .load::<(PostId, i64)>(conn)
        .await?,
    )
  }

  /// Which of the given posts the person likes.
  pub async fn liked_by(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    post_ids: &[PostId],
  ) -> ConnectHubResult<Vec<PostId>> {
    if post_ids.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    Ok(
      post_like::table
        .filter(post_like::person_id.eq(person_id))
        .filter(post_like::post_id.eq_any(post_ids))
        .select(post_like::post_id)
        .load::<PostId>(conn)
        .await?,
    )
  }
}
