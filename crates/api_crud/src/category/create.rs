use actix_web::{
  web::{Data, Json},
  HttpResponse,
};
use connecthub_api_common::{
  category::{CategoryResponse, CreateCategory},
  context::ConnectHubContext,
  utils::{blank_to_none, is_admin},
};
use connecthub_db_schema::{
  source::category::{Category, CategoryInsertForm},
  traits::Crud,
};
use connecthub_db_views::structs::LocalUserView;
use connecthub_utils::{error::ConnectHubResult, utils::validation::is_valid_category_name};
use tracing::info;

#[tracing::instrument(skip(context))]
pub async fn create_category(
  data: Json<CreateCategory>,
  context: Data<ConnectHubContext>,
  local_user_view: LocalUserView,
) -> ConnectHubResult<HttpResponse> {
  is_admin(&local_user_view)?;

  let name = data.name.trim();
  is_valid_category_name(name)?;
  Category::check_name_taken(&mut context.pool(), name, None).await?;

  let category_form = CategoryInsertForm {
    description: blank_to_none(data.description.as_deref()),
    active: data.active,
    ..CategoryInsertForm::new(name.to_string())
  };
  let category = Category::create(&mut context.pool(), &category_form).await?;
  info!(category_id = ?category.id, name = %category.name, "Created category");

  Ok(HttpResponse::Created().json(CategoryResponse {
    message: "Category created successfully".to_string(),
    category,
  }))
}
