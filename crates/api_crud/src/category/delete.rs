use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use connecthub_api_common::{
  category::CategoryResponse,
  context::ConnectHubContext,
  utils::is_admin,
};
use connecthub_db_schema::{
  newtypes::CategoryId,
  source::category::{Category, CategoryUpdateForm},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::error::ConnectHubResult;
use tracing::info;

/// Categories are never removed. Deactivating hides them from new posts while existing posts keep
/// them.
#[tracing::instrument(skip(context))]
pub async fn deactivate_category(
  category_id: Path<i32>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<CategoryResponse>> {
  is_admin(&local_user_view)?;
  let category_id = CategoryId(category_id.into_inner());
  let orig_category = Category::read(&mut context.pool(), category_id).await?;

  let category_form = CategoryUpdateForm {
    active: Some(false),
    updated: Some(Some(Utc::now())),
    ..Default::default()
  };
  let category = Category::update(&mut context.pool(), orig_category.id, &category_form).await?;
  info!(category_id = ?category.id, "Deactivated category");

  Ok(Json(CategoryResponse {
    message: "Category deactivated successfully".to_string(),
    category,
  }))
}
