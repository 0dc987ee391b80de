use crate::error::{ConnectHubErrorType, ConnectHubResult};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static VALID_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
    .expect("compile email regex")
});

const POST_TITLE_MAX_LENGTH: usize = 200;
const POST_BODY_MAX_LENGTH: usize = 50000;
const COMMENT_MAX_LENGTH: usize = 10000;
const BIO_MAX_LENGTH: usize = 300;
const NAME_MAX_LENGTH: usize = 100;
const DEPARTMENT_MAX_LENGTH: usize = 100;
const CATEGORY_NAME_MAX_LENGTH: usize = 50;
const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 60;

fn has_newline(name: &str) -> bool {
  name.contains('\n')
}

pub fn is_valid_post_title(title: &str) -> ConnectHubResult<()> {
  let length = title.trim().chars().count();
  let check = (1..=POST_TITLE_MAX_LENGTH).contains(&length) && !has_newline(title);
  if !check {
    Err(ConnectHubErrorType::InvalidPostTitle.into())
  } else {
    Ok(())
  }
}

/// Post bodies may contain inline markup, which is stored verbatim.
pub fn is_valid_post_body(body: &str) -> ConnectHubResult<()> {
  min_length_check(body.trim(), 1, ConnectHubErrorType::InvalidBodyField)?;
  max_length_check(body, POST_BODY_MAX_LENGTH, ConnectHubErrorType::InvalidBodyField)
}

pub fn is_valid_comment(content: &str) -> ConnectHubResult<()> {
  min_length_check(content.trim(), 1, ConnectHubErrorType::EmptyComment)?;
  max_length_check(content, COMMENT_MAX_LENGTH, ConnectHubErrorType::InvalidBodyField)
}

pub fn is_valid_person_name(name: &str) -> ConnectHubResult<()> {
  min_length_check(name.trim(), 1, ConnectHubErrorType::InvalidName)?;
  max_length_check(name, NAME_MAX_LENGTH, ConnectHubErrorType::InvalidName)?;
  if has_newline(name) {
    Err(ConnectHubErrorType::InvalidName)?
  }
  Ok(())
}

pub fn is_valid_department(department: &str) -> ConnectHubResult<()> {
  min_length_check(department.trim(), 1, ConnectHubErrorType::InvalidDepartment)?;
  max_length_check(
    department,
    DEPARTMENT_MAX_LENGTH,
    ConnectHubErrorType::InvalidDepartment,
  )
}

pub fn is_valid_email(email: &str) -> ConnectHubResult<()> {
  if VALID_EMAIL_REGEX.is_match(email) {
    Ok(())
  } else {
    Err(ConnectHubErrorType::InvalidEmail.into())
  }
}

pub fn is_valid_password(password: &str) -> ConnectHubResult<()> {
  min_length_check(
    password,
    PASSWORD_MIN_LENGTH,
    ConnectHubErrorType::InvalidPassword,
  )?;
  max_length_check(
    password,
    PASSWORD_MAX_LENGTH,
    ConnectHubErrorType::InvalidPassword,
  )
}

pub fn is_valid_bio_field(bio: &str) -> ConnectHubResult<()> {
  max_length_check(bio, BIO_MAX_LENGTH, ConnectHubErrorType::BioLengthOverflow)
}

pub fn is_valid_category_name(name: &str) -> ConnectHubResult<()> {
  min_length_check(name.trim(), 1, ConnectHubErrorType::InvalidCategoryName)?;
  max_length_check(
    name,
    CATEGORY_NAME_MAX_LENGTH,
    ConnectHubErrorType::InvalidCategoryName,
  )?;
  if has_newline(name) {
    Err(ConnectHubErrorType::InvalidCategoryName)?
  }
  Ok(())
}

/// Check minimum and maximum length of input string. If the string is too short or too long, the
/// corresponding error is returned.
///
/// HTML frontends specify maximum input length using `maxlength` attribute.
/// For consistency we use the same counting method (UTF-16 code units).
fn max_length_check(
  item: &str,
  max_length: usize,
  max_msg: ConnectHubErrorType,
) -> ConnectHubResult<()> {
  let len = item.encode_utf16().count();
  if len > max_length {
    Err(max_msg.into())
  } else {
    Ok(())
  }
}

fn min_length_check(
  item: &str,
  min_length: usize,
  min_msg: ConnectHubErrorType,
) -> ConnectHubResult<()> {
  let len = item.encode_utf16().count();
  if len < min_length {
    Err(min_msg.into())
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_post_title() {
    assert!(is_valid_post_title("T").is_ok());
    assert!(is_valid_post_title("Quarterly all-hands recap").is_ok());
    assert!(is_valid_post_title("").is_err());
    assert!(is_valid_post_title("   ").is_err());
    assert!(is_valid_post_title("two\nlines").is_err());
    assert!(is_valid_post_title(&"a".repeat(201)).is_err());
    assert!(is_valid_post_title(&"a".repeat(200)).is_ok());
  }

  #[test]
  fn test_valid_post_body() {
    assert!(is_valid_post_body("C").is_ok());
    assert!(is_valid_post_body("**bold** and <u>underline</u>\n- item").is_ok());
    assert!(is_valid_post_body("").is_err());
    assert!(is_valid_post_body(" \n ").is_err());
    assert!(is_valid_post_body(&"a".repeat(POST_BODY_MAX_LENGTH + 1)).is_err());
  }

  #[test]
  fn test_valid_comment() {
    assert!(is_valid_comment("hi").is_ok());
    assert!(matches!(
      is_valid_comment("  "),
      Err(e) if e.error_type == ConnectHubErrorType::EmptyComment
    ));
  }

  #[test]
  fn test_valid_email() {
    assert!(is_valid_email("alice@example.com").is_ok());
    assert!(is_valid_email("a.b+tag@corp.example.co.jp").is_ok());
    assert!(is_valid_email("alice").is_err());
    assert!(is_valid_email("alice@").is_err());
    assert!(is_valid_email("").is_err());
  }

  #[test]
  fn test_valid_password() {
    assert!(is_valid_password("short").is_err());
    assert!(is_valid_password("longenough").is_ok());
    assert!(is_valid_password(&"a".repeat(61)).is_err());
  }

  #[test]
  fn test_valid_person_fields() {
    assert!(is_valid_person_name("Alice Smith").is_ok());
    assert!(is_valid_person_name("").is_err());
    assert!(is_valid_person_name("a\nb").is_err());
    assert!(is_valid_department("Engineering").is_ok());
    assert!(is_valid_department(" ").is_err());
    assert!(is_valid_bio_field(&"a".repeat(300)).is_ok());
    assert!(is_valid_bio_field(&"a".repeat(301)).is_err());
  }

  #[test]
  fn test_valid_category_name() {
    assert!(is_valid_category_name("News").is_ok());
    assert!(is_valid_category_name("").is_err());
    assert!(is_valid_category_name(&"a".repeat(51)).is_err());
  }
}
