use crate::{
  newtypes::{CategoryId, PostId},
  schema::{category, post_category},
  source::category::{Category, CategoryInsertForm, CategoryUpdateForm},
  traits::Crud,
  utils::{get_conn, is_unique_violation, DbPool},
};
use connecthub_utils::error::{ConnectHubErrorExt, ConnectHubErrorType, ConnectHubResult};
use diesel::{dsl::insert_into, ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

impl Crud for Category {
  type InsertForm = CategoryInsertForm;
  type UpdateForm = CategoryUpdateForm;
  type IdType = CategoryId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    let inserted = insert_into(category::table)
      .values(form)
      .get_result::<Self>(conn)
      .await;
    match inserted {
      Err(e) if is_unique_violation(&e) => Err(ConnectHubErrorType::CategoryAlreadyExists.into()),
      inserted => inserted.with_connecthub_type(ConnectHubErrorType::CouldntCreate),
    }
  }

  async fn read(pool: &mut DbPool<'_>, category_id: CategoryId) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    category::table
      .find(category_id)
      .first(conn)
      .await
      .with_connecthub_type(ConnectHubErrorType::NotFound)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    category_id: CategoryId,
    form: &Self::UpdateForm,
  ) -> ConnectHubResult<Self> {
    let conn = &mut get_conn(pool).await?;
    let updated = diesel::update(category::table.find(category_id))
      .set(form)
      .get_result::<Self>(conn)
      .await;
    match updated {
      Err(e) if is_unique_violation(&e) => Err(ConnectHubErrorType::CategoryAlreadyExists.into()),
      Err(diesel::NotFound) => Err(ConnectHubErrorType::NotFound.into()),
      updated => updated.with_connecthub_type(ConnectHubErrorType::CouldntUpdate),
    }
  }
}

impl Category {
  /// All categories, alphabetical.
  pub async fn list(pool: &mut DbPool<'_>, active_only: bool) -> ConnectHubResult<Vec<Self>> {
    let conn = &mut get_conn(pool).await?;
    let mut query = category::table.into_boxed();
    if active_only {
      query = query.filter(category::active.eq(true));
    }
    Ok(
      query
        .order_by((category::name.asc(), category::id.asc()))
        .load::<Self>(conn)
        .await?,
    )
  }

  /// Fails with `CategoryAlreadyExists` if a category other than `except` has this exact name.
  pub async fn check_name_taken(
    pool: &mut DbPool<'_>,
    name: &str,
    except: Option<CategoryId>,
  ) -> ConnectHubResult<()> {
    let conn = &mut get_conn(pool).await?;
    let existing = category::table
      .filter(category::name.eq(name))
      .select(category::id)
      .first::<CategoryId>(conn)
      .await
      .optional()?;
    match existing {
      Some(id) if Some(id) != except => Err(ConnectHubErrorType::CategoryAlreadyExists)?,
      _ => Ok(()),
    }
  }

  /// Resolves names to active categories. Unknown and inactive names are skipped.
  pub async fn read_active_by_names(
    pool: &mut DbPool<'_>,
    names: &[String],
  ) -> ConnectHubResult<Vec<Self>> {
    if names.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    Ok(
      category::table
        .filter(category::active.eq(true))
        .filter(category::name.eq_any(names))
        .order_by(category::name.asc())
        .load::<Self>(conn)
        .await?,
    )
  }

  /// The categories of each given post, paired with the post id.
  pub async fn for_posts(
    pool: &mut DbPool<'_>,
    post_ids: &[PostId],
  ) -> ConnectHubResult<Vec<(PostId, Self)>> {
    if post_ids.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    Ok(
      post_category::table
        .inner_join(category::table)
        .filter(post_category::post_id.eq_any(post_ids))
        .order_by(category::name.asc())
        .select((post_category::post_id, Self::as_select()))
        .load::<(PostId, Self)>(conn)
        .await?,
    )
  }

  pub async fn count(pool: &mut DbPool<'_>) -> ConnectHubResult<i64> {
    let conn = &mut get_conn(pool).await?;
    Ok(category::table.count().get_result(conn).await?)
  }
}
