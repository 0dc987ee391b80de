use connecthub_db_schema::utils::{ActualDbPool, DbPool};
use connecthub_utils::settings::{structs::Settings, SETTINGS};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ConnectHubContext {
  pool: ActualDbPool,
}

impl ConnectHubContext {
  pub fn create(pool: ActualDbPool) -> ConnectHubContext {
    ConnectHubContext { pool }
  }
  pub fn pool(&self) -> DbPool<'_> {
    DbPool::Pool(&self.pool)
  }
  pub fn settings(&self) -> &'static Settings {
    &SETTINGS
  }
}
