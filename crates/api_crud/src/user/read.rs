use actix_web::web::{Data, Json, Path};
use connecthub_api_common::context::ConnectHubContext;
use connecthub_db_schema::newtypes::PersonId;
use connecthub_db_views::structs::PersonView;
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn get_person(
  person_id: Path<i32>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<Json<PersonView>> {
  let person_id = PersonId(person_id.into_inner());
  let person_view = PersonView::read(&mut context.pool(), person_id).await?;
  Ok(Json(person_view))
}
