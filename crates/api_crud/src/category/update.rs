use actix_web::web::{Data, Json, Path};
use chrono::Utc;
use connecthub_api_common::{
  category::{CategoryResponse, EditCategory},
  context::ConnectHubContext,
  utils::{blank_to_none, is_admin},
};
use connecthub_db_schema::{
  newtypes::CategoryId,
  source::category::{Category, CategoryUpdateForm},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::{error::ConnectHubResult, utils::validation::is_valid_category_name};

#[tracing::instrument(skip(context))]
pub async fn update_category(
  category_id: Path<i32>,
  data: Json<EditCategory>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<Json<CategoryResponse>> {
  is_admin(&local_user_view)?;
  let category_id = CategoryId(category_id.into_inner());
  let orig_category = Category::read(&mut context.pool(), category_id).await?;

  let name = data.name.as_deref().map(str::trim);
  if let Some(name) = name {
    is_valid_category_name(name)?;
    // Keeping the current name is not a conflict
    Category::check_name_taken(&mut context.pool(), name, Some(orig_category.id)).await?;
  }

  let category_form = CategoryUpdateForm {
    name: name.map(ToString::to_string),
    description: data
      .description
      .as_deref()
      .map(|d| blank_to_none(Some(d))),
    active: data.active,
    updated: Some(Some(Utc::now())),
  };
  let category = Category::update(&mut context.pool(), orig_category.id, &category_form).await?;

  Ok(Json(CategoryResponse {
    message: "Category updated successfully".to_string(),
    category,
  }))
}
