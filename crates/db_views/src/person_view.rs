use crate::structs::PersonView;
use connecthub_db_schema::{
  newtypes::PersonId,
  schema::person,
  source::{comment::Comment, person::Person, post::Post},
  traits::Crud,
  utils::{contains_pattern, get_conn, DbPool, Pagination},
};
use connecthub_utils::error::ConnectHubResult;
use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl PersonView {
  pub async fn read(pool: &mut DbPool<'_>, person_id: PersonId) -> ConnectHubResult<Self> {
    let person = Person::read(pool, person_id).await?;
    let post_count = Post::count_for_creator(pool, person_id).await?;
    let comment_count = Comment::count_for_creator(pool, person_id).await?;
    Ok(Self {
      person,
      post_count,
      comment_count,
    })
  }
}

/// Lists people for administration, newest first.
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
  /// Case-insensitive substring of name, email or department.
  pub search_term: Option<String>,
  pub pagination: Pagination,
}

impl PersonQuery {
  fn filtered(&self) -> person::BoxedQuery<'static, Pg> {
    let mut query = person::table.into_boxed();
    if let Some(search_term) = &self.search_term {
      let pattern = contains_pattern(search_term);
      query = query.filter(
        person::name
          .ilike(pattern.clone())
          .or(person::email.ilike(pattern.clone()))
          .or(person::department.ilike(pattern)),
      );
    }
    query
  }

  pub async fn list(self, pool: &mut DbPool<'_>) -> ConnectHubResult<(Vec<Person>, i64)> {
    let conn = &mut get_conn(pool).await?;
    let total = self.filtered().count().get_result::<i64>(conn).await?;
    let persons = self
      .filtered()
      .order_by(person::published.desc())
      .then_order_by(person::id.desc())
      .limit(self.pagination.limit)
      .offset(self.pagination.offset())
      .load::<Person>(conn)
      .await?;
    Ok((persons, total))
  }
}
