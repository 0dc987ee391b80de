use actix_web::web::{Data, Json, Query};
use connecthub_api_common::{category::ListCategories, context::ConnectHubContext};
use connecthub_db_schema::source::category::Category;
use connecthub_utils::error::ConnectHubResult;

#[tracing::instrument(skip(context))]
pub async fn list_categories(
  data: Query<ListCategories>,
  context: Data<ConnectHubContext>,
) -> ConnectHubResult<Json<Vec<Category>>> {
  let active_only = data.active_only.unwrap_or(false);
  let categories = Category::list(&mut context.pool(), active_only).await?;
  Ok(Json(categories))
}
