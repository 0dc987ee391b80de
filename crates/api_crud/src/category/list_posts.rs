use actix_web::web::{Data, Json, Path, Query};
use connecthub_api_common::{
  category::GetCategoryPosts,
  context::ConnectHubContext,
  utils::pagination,
  ListResponse,
};
use connecthub_db_schema::{newtypes::CategoryId, source::category::Category, traits::Crud};
use connecthub_db_views::{
  post_view::PostQuery,
  structs::{LocalUserView, PostView},
};
use connecthub_utils::error::ConnectHubResult;

/// Works for inactive categories too, since old posts keep their associations.
#[tracing::instrument(skip(context))]
pub async fn list_category_posts(
  category_id: Path<i32>,
  data: Query<GetCategoryPosts>,
  context: Data<ConnectHubContext>,
  local_user_view: Option<LocalUserView>,
) -> ConnectHubResult<Json<ListResponse<PostView>>> {
  let pagination = pagination(data.page, data.limit)?;
  let category = Category::read(&mut context.pool(), CategoryId(category_id.into_inner())).await?;

  let (posts, total) = PostQuery {
    category_name: Some(category.name),
    my_person_id: local_user_view.map(|l| l.person.id),
    pagination,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(posts, total, pagination)))
}
