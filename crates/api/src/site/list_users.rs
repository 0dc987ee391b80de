use actix_web::web::{Data, Json, Query};
use connecthub_api_common::{
  context::ConnectHubContext,
  site::ListUsers,
  utils::{blank_to_none, is_admin, pagination},
  ListResponse,
};
use connecthub_db_schema::source::person::Person;
use connecthub_db_views::{person_view::PersonQuery, structs::LocalUserView};
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn list_users(
  data: Query<ListUsers>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<ListResponse<Person>>> {
  is_admin(&local_user_view)?;
  let pagination = pagination(data.page, data.limit)?;

  let (users, total) = PersonQuery {
    search_term: blank_to_none(data.search.as_deref()),
    pagination,
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(users, total, pagination)))
}
