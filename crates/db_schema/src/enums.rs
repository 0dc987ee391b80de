use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
  EnumString,
  Display,
  EnumIter,
  Debug,
  Serialize,
  Deserialize,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
  Hash,
  DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::RoleEnum"]
#[DbValueStyle = "verbatim"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
/// Account roles, ordered from least to most privileged.
pub enum Role {
  Viewer,
  #[default]
  Contributor,
  Moderator,
  Admin,
}

impl Role {
  pub fn is_admin(&self) -> bool {
    *self == Role::Admin
  }

  /// Moderators and admins may remove any comment.
  pub fn can_moderate_comments(&self) -> bool {
    *self >= Role::Moderator
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::str::FromStr;

  #[test]
  fn roles_are_ordered_by_privilege() {
    assert!(Role::Viewer < Role::Contributor);
    assert!(Role::Contributor < Role::Moderator);
    assert!(Role::Moderator < Role::Admin);
    assert!(Role::Moderator.can_moderate_comments());
    assert!(!Role::Contributor.can_moderate_comments());
    assert!(Role::Admin.is_admin());
    assert!(!Role::Moderator.is_admin());
  }

  #[test]
  fn role_names() -> Result<(), strum::ParseError> {
    assert_eq!(Role::Contributor, Role::default());
    assert_eq!("moderator", Role::Moderator.to_string());
    assert_eq!(Role::Admin, Role::from_str("Admin")?);
    assert_eq!(Role::Viewer, Role::from_str("viewer")?);
    assert!(Role::from_str("owner").is_err());
    Ok(())
  }
}
