use crate::{newtypes::PersonId, utils::DbPool};
use connecthub_utils::error::{ConnectHubErrorType, ConnectHubResult};
use std::future::Future;

pub trait Crud: Sized {
  type InsertForm;
  type UpdateForm;
  type IdType: Send;

  fn create(
    pool: &mut DbPool<'_>,
    form: &Self::InsertForm,
  ) -> impl Future<Output = ConnectHubResult<Self>> + Send;

  fn read(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
  ) -> impl Future<Output = ConnectHubResult<Self>> + Send;

  /// when you want to null out a column, you have to send Some(None)), since sending None means
  /// you just don't want to update that column.
  fn update(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> impl Future<Output = ConnectHubResult<Self>> + Send;

  fn delete(
    _pool: &mut DbPool<'_>,
    _id: Self::IdType,
  ) -> impl Future<Output = ConnectHubResult<usize>> + Send {
    async { Err(ConnectHubErrorType::NotFound.into()) }
  }
}

pub trait Likeable: Sized {
  type Form;
  type IdType: Send;

  /// Returns the number of inserted rows, which is zero if the like already exists.
  fn like(
    pool: &mut DbPool<'_>,
    form: &Self::Form,
  ) -> impl Future<Output = ConnectHubResult<usize>> + Send;

  fn remove(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    item_id: Self::IdType,
  ) -> impl Future<Output = ConnectHubResult<usize>> + Send;
}
