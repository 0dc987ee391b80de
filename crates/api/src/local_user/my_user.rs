use actix_web::web::Json;
use connecthub_db_schema::source::person::Person;
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument]
pub async fn get_my_user(local_user_view: LocalUserView) -> ConnectHubResult<Json<Person>> {
  Ok(Json(local_user_view.person))
}
