pub mod category;
pub mod claims;
pub mod comment;
pub mod context;
pub mod person;
pub mod post;
pub mod sensitive;
pub mod site;
pub mod utils;

pub extern crate connecthub_db_schema;
pub extern crate connecthub_db_views;
pub extern crate connecthub_utils;

use connecthub_db_schema::utils::Pagination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Acknowledges an action that has no other result.
pub struct SuccessResponse {
  pub message: String,
}

impl SuccessResponse {
  pub fn new(message: &str) -> Self {
    SuccessResponse {
      message: message.to_string(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// One page of a paginated listing.
pub struct ListResponse<T> {
  pub total: i64,
  pub page: i64,
  pub limit: i64,
  pub total_pages: i64,
  pub data: Vec<T>,
}

impl<T> ListResponse<T> {
  pub fn new(data: Vec<T>, total: i64, pagination: Pagination) -> Self {
    ListResponse {
      total,
      page: pagination.page,
      limit: pagination.limit,
      total_pages: pagination.total_pages(total),
      data,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn list_envelope_shape() -> Result<(), serde_json::Error> {
    let pagination = Pagination {
      page: 2,
      limit: 10,
    };
    let list = ListResponse::new(vec!["a", "b"], 12, pagination);
    assert_eq!(
      json!({
        "total": 12,
        "page": 2,
        "limit": 10,
        "total_pages": 2,
        "data": ["a", "b"],
      }),
      serde_json::to_value(list)?
    );
    Ok(())
  }
}
