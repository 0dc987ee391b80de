use actix_web::web::{Data, Json, Query};
use connecthub_api_common::{
  context::ConnectHubContext,
  site::AdminListPosts,
  utils::{blank_to_none, is_admin, pagination},
  ListResponse,
};
use connecthub_db_views::{
  post_view::{PostQuery, PostSortType},
  structs::{LocalUserView, PostView},
};
use connecthub_utils::error::ConnectHubResult;

/// Includes deleted posts so they can be reviewed.
#[tracing::instrument(skip(context))]
pub async fn admin_list_posts(
  data: Query<AdminListPosts>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<ListResponse<PostView>>> {
  is_admin(&local_user_view)?;
  let pagination = pagination(data.page, data.limit)?;

  let (posts, total) = PostQuery {
    category_name: blank_to_none(data.category.as_deref()),
    search_term: blank_to_none(data.search.as_deref()),
    include_deleted: true,
    sort: PostSortType::New,
    my_person_id: Some(local_user_view.person.id),
    pagination,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(posts, total, pagination)))
}
