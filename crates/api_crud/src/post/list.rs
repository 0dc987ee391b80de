use actix_web::web::{Data, Json, Query};
use connecthub_api_common::{
  context::ConnectHubContext,
  post::GetPosts,
  utils::{blank_to_none, pagination},
  ListResponse,
};
use connecthub_db_views::{
  post_view::PostQuery,
  structs::{LocalUserView, PostView},
};
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn list_posts(
  data: Query<GetPosts>,
  context: Data<ConnectHubContext>,
  local_user_view: Option<LocalUserView>,
) -> ConnectHubResult<Json<ListResponse<PostView>>> {
  let pagination = pagination(data.page, data.limit)?;

  let (posts, total) = PostQuery {
    category_name: blank_to_none(data.category.as_deref()),
    search_term: blank_to_none(data.search.as_deref()),
    pinned: data.pinned,
    my_person_id: local_user_view.map(|l| l.person.id),
    pagination,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(posts, total, pagination)))
}
