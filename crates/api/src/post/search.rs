use actix_web::web::{Data, Json, Query};
use connecthub_api_common::{
  context::ConnectHubContext,
  post::SearchPosts,
  utils::{blank_to_none, pagination},
  ListResponse,
};
use connecthub_db_views::{
  post_view::PostQuery,
  structs::{LocalUserView, PostView},
};
use connecthub_utils::error::{ConnectHubErrorType, ConnectHubResult};

#[tracing::instrument(skip(context))]
pub async fn search_posts(
  data: Query<SearchPosts>,
  context: Data<ConnectHubContext>,
  local_user_view: Option<LocalUserView>,
) -> ConnectHubResult<Json<ListResponse<PostView>>> {
  let search_term =
    blank_to_none(data.query.as_deref()).ok_or(ConnectHubErrorType::SearchQueryRequired)?;
  let pagination = pagination(data.page, data.limit)?;

  let (posts, total) = PostQuery {
    search_term: Some(search_term),
    my_person_id: local_user_view.map(|l| l.person.id),
    pagination,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(posts, total, pagination)))
}
