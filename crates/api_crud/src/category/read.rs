use actix_web::web::{Data, Json, Path};
use connecthub_api_common::context::ConnectHubContext;
use connecthub_db_schema::{newtypes::CategoryId, source::category::Category, traits::Crud};
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn get_category(
  category_id: Path<i32>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<Json<Category>> {
  let category = Category::read(&mut context.pool(), CategoryId(category_id.into_inner())).await?;
  Ok(Json(category))
}
