use actix_web::web::{Data, Json, Path, Query};
use connecthub_api_common::{
  context::ConnectHubContext,
  person::GetPersonPosts,
  utils::pagination,
  ListResponse,
};
use connecthub_db_schema::{newtypes::PersonId, source::person::Person, traits::Crud};
use connecthub_db_views::{
  post_view::{PostQuery, PostSortType},
  structs::{LocalUserView, PostView},
};
use connecthub_utils::error::ConnectHubResult;

/// The posts of one person, newest first.
#[tracing::instrument(skip(context))]
pub async fn list_person_posts(
  person_id: Path<i32>,
  data: Query<GetPersonPosts>,
  context: Data<ConnectHubContext>,
  local_user_view: Option<LocalUserView>,
) -> ConnectHubResult<Json<ListResponse<PostView>>> {
  let pagination = pagination(data.page, data.limit)?;
  let creator = Person::read(&mut context.pool(), PersonId(person_id.into_inner())).await?;

  let (posts, total) = PostQuery {
    creator_id: Some(creator.id),
    sort: PostSortType::New,
    my_person_id: local_user_view.map(|l| l.person.id),
    pagination,
    ..Default::default()
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListResponse::new(posts, total, pagination)))
}
