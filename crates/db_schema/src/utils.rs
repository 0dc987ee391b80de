use crate::schema_setup;
use connecthub_utils::{
  error::{ConnectHubErrorType, ConnectHubResult},
  settings::SETTINGS,
};
use deadpool::Runtime;
use diesel::result::{DatabaseErrorKind, Error::{self as DieselError, QueryBuilderError}};
use diesel_async::{
  pg::AsyncPgConnection,
  pooled_connection::{
    deadpool::{Object as PooledConnection, Pool},
    AsyncDieselConnectionManager,
  },
};
use std::ops::{Deref, DerefMut};
use tracing::info;

pub const FETCH_LIMIT_DEFAULT: i64 = 10;
pub const FETCH_LIMIT_MAX: i64 = 50;

pub type ActualDbPool = Pool<AsyncPgConnection>;

/// References a pool or connection. Functions must take `&mut DbPool<'_>` to allow implicit
/// reborrowing.
///
/// https://github.com/rust-lang/rfcs/issues/1403
pub enum DbPool<'a> {
  Pool(&'a ActualDbPool),
  Conn(&'a mut AsyncPgConnection),
}

pub enum DbConn<'a> {
  Pool(PooledConnection<AsyncPgConnection>),
  Conn(&'a mut AsyncPgConnection),
}

pub async fn get_conn<'a, 'b: 'a>(pool: &'a mut DbPool<'b>) -> Result<DbConn<'a>, DieselError> {
  Ok(match pool {
    DbPool::Pool(pool) => DbConn::Pool(pool.get().await.map_err(|e| QueryBuilderError(e.into()))?),
    DbPool::Conn(conn) => DbConn::Conn(conn),
  })
}

impl Deref for DbConn<'_> {
  type Target = AsyncPgConnection;

  fn deref(&self) -> &Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref(),
      DbConn::Conn(conn) => conn.deref(),
    }
  }
}

impl DerefMut for DbConn<'_> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref_mut(),
      DbConn::Conn(conn) => conn.deref_mut(),
    }
  }
}

// Allows functions that take `DbPool<'_>` to be called in a transaction by passing `&mut
// conn.into()`
impl<'a> From<&'a mut AsyncPgConnection> for DbPool<'a> {
  fn from(value: &'a mut AsyncPgConnection) -> Self {
    DbPool::Conn(value)
  }
}

impl<'a, 'b: 'a> From<&'a mut DbConn<'b>> for DbPool<'a> {
  fn from(value: &'a mut DbConn<'b>) -> Self {
    DbPool::Conn(value.deref_mut())
  }
}

impl<'a> From<&'a ActualDbPool> for DbPool<'a> {
  fn from(value: &'a ActualDbPool) -> Self {
    DbPool::Pool(value)
  }
}

/// Runs pending migrations, then opens the connection pool.
pub async fn build_db_pool() -> ConnectHubResult<ActualDbPool> {
  let db_url = SETTINGS.get_database_url();
  schema_setup::run(&db_url)?;

  let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&db_url);
  let pool = Pool::builder(manager)
    .max_size(SETTINGS.database.pool_size)
    .runtime(Runtime::Tokio1)
    .build()?;
  info!("Database pool ready ({} connections)", SETTINGS.database.pool_size);

  Ok(pool)
}

#[allow(clippy::expect_used)]
pub async fn build_db_pool_for_tests() -> ActualDbPool {
  build_db_pool().await.expect("db pool missing")
}

/// A validated page request. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
  pub page: i64,
  pub limit: i64,
}

impl Default for Pagination {
  fn default() -> Self {
    Self {
      page: 1,
      limit: FETCH_LIMIT_DEFAULT,
    }
  }
}

impl Pagination {
  pub fn new(page: Option<i64>, limit: Option<i64>) -> ConnectHubResult<Self> {
    let page = page.unwrap_or(1);
    let limit = limit.unwrap_or(FETCH_LIMIT_DEFAULT);
    if page < 1 || !(1..=FETCH_LIMIT_MAX).contains(&limit) {
      Err(ConnectHubErrorType::InvalidPagination)?
    }
    // The offset has to fit into a postgres bigint
    if (page - 1).checked_mul(limit).is_none() {
      Err(ConnectHubErrorType::InvalidPagination)?
    }
    Ok(Self { page, limit })
  }

  pub fn offset(&self) -> i64 {
    self.limit.saturating_mul(self.page - 1)
  }

  pub fn total_pages(&self, total: i64) -> i64 {
    (total + self.limit - 1) / self.limit
  }
}

/// Builds a case-insensitive substring pattern for `ILIKE`, escaping the wildcards in `q`.
pub fn contains_pattern(q: &str) -> String {
  let escaped = q
    .trim()
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{escaped}%")
}

pub fn is_unique_violation(e: &DieselError) -> bool {
  matches!(
    e,
    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
  )
}
