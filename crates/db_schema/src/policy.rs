//! Who may edit or delete a piece of content.
//!
//! Moderators may act on any comment, but only admins may act on posts they didn't write.

use crate::{newtypes::PersonId, source::person::Person};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
  Post,
  Comment,
}

pub fn can_mutate(kind: ResourceKind, author_id: PersonId, requester: &Person) -> bool {
  requester.id == author_id
    || requester.role.is_admin()
    || (kind == ResourceKind::Comment && requester.role.can_moderate_comments())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enums::Role;
  use chrono::Utc;

  fn person(id: i32, role: Role) -> Person {
    Person {
      id: PersonId(id),
      name: format!("user {id}"),
      email: format!("user{id}@example.com"),
      password_encrypted: Default::default(),
      department: "Engineering".into(),
      role,
      avatar_url: "/avatars/default.jpg".into(),
      bio: None,
      active: true,
      published: Utc::now(),
      updated: None,
    }
  }

  #[test]
  fn author_can_mutate_own_content() {
    let author = person(1, Role::Viewer);
    assert!(can_mutate(ResourceKind::Post, PersonId(1), &author));
    assert!(can_mutate(ResourceKind::Comment, PersonId(1), &author));
  }

  #[test]
  fn admin_can_mutate_anything() {
    let admin = person(2, Role::Admin);
    assert!(can_mutate(ResourceKind::Post, PersonId(1), &admin));
    assert!(can_mutate(ResourceKind::Comment, PersonId(1), &admin));
  }

  #[test]
  fn moderator_can_only_mutate_others_comments() {
    let moderator = person(3, Role::Moderator);
    assert!(can_mutate(ResourceKind::Comment, PersonId(1), &moderator));
    assert!(!can_mutate(ResourceKind::Post, PersonId(1), &moderator));
  }

  #[test]
  fn others_cannot_mutate() {
    for role in [Role::Viewer, Role::Contributor] {
      let other = person(4, role);
      assert!(!can_mutate(ResourceKind::Post, PersonId(1), &other));
      assert!(!can_mutate(ResourceKind::Comment, PersonId(1), &other));
    }
  }
}
