use serde::{Deserialize, Serialize};
use std::{fmt::Debug, ops::Deref};

/// A string that never shows up in logs or traces.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize, Default, DieselNewType)]
#[serde(transparent)]
pub struct SensitiveString(String);

impl SensitiveString {
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Debug for SensitiveString {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Sensitive").finish()
  }
}

impl Deref for SensitiveString {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<String> for SensitiveString {
  fn from(t: String) -> Self {
    SensitiveString(t)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_debug_is_redacted() {
    let hash = SensitiveString::from("$2b$12$secret".to_string());
    assert_eq!("Sensitive", format!("{hash:?}"));
    assert_eq!("$2b$12$secret", &*hash);
  }
}
