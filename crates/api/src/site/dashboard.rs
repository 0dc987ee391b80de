use actix_web::web::{Data, Json};
use connecthub_api_common::{
  context::ConnectHubContext,
  site::{GetDashboardResponse, SiteCounts},
  utils::is_admin,
};
use connecthub_db_schema::{
  source::{category::Category, comment::Comment, person::Person, post::Post},
  utils::Pagination,
};
use connecthub_db_views::{
  person_view::PersonQuery,
  post_view::{PostQuery, PostSortType},
  structs::LocalUserView,
};
use connecthub_utils::error::ConnectHubResult;

const RECENT_LIMIT: i64 = 5;

#[tracing::instrument(skip(context))]
pub async fn get_dashboard(
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<GetDashboardResponse>> {
  is_admin(&local_user_view)?;

  let stats = SiteCounts {
    users: Person::count(&mut context.pool()).await?,
    posts: Post::count(&mut context.pool()).await?,
    comments: Comment::count(&mut context.pool()).await?,
    categories: Category::count(&mut context.pool()).await?,
  };

  let recent = Pagination::new(None, Some(RECENT_LIMIT))?;
  let (recent_posts, _) = PostQuery {
    sort: PostSortType::New,
    my_person_id: Some(local_user_view.person.id),
    pagination: recent,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;
  let (recent_users, _) = PersonQuery {
    pagination: recent,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(GetDashboardResponse {
    stats,
    recent_posts,
    recent_users,
  }))
}
