use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::{
  backtrace::Backtrace,
  fmt::{self, Debug},
};
use strum::{Display, EnumIter};

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, EnumIter, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum ConnectHubErrorType {
  // Validation
  InvalidPostTitle,
  InvalidBodyField,
  EmptyComment,
  InvalidName,
  InvalidEmail,
  /// Password must be between 8 and 60 characters
  InvalidPassword,
  InvalidDepartment,
  BioLengthOverflow,
  InvalidCategoryName,
  EmailAlreadyExists,
  CategoryAlreadyExists,
  InvalidPagination,
  SearchQueryRequired,
  // Authentication
  NotLoggedIn,
  IncorrectLogin,
  InvalidToken,
  ExpiredToken,
  // Permissions
  AccountDisabled,
  NotAnAdmin,
  NoPostEditAllowed,
  NoCommentEditAllowed,
  NotFound,
  // Store failures
  CouldntCreate,
  CouldntUpdate,
  CouldntLikePost,
  // Startup
  InsecureJwtSecret,
  Unknown(String),
}

impl ConnectHubErrorType {
  /// Human readable text sent to clients along with the error kind.
  pub fn message(&self) -> &'static str {
    use ConnectHubErrorType::*;
    match self {
      InvalidPostTitle => "Title must be between 1 and 200 characters and a single line",
      InvalidBodyField => "Content is empty or too long",
      EmptyComment => "Comment must not be empty",
      InvalidName => "Name must be between 1 and 100 characters",
      InvalidEmail => "Invalid email address",
      InvalidPassword => "Password must be between 8 and 60 characters",
      InvalidDepartment => "Department must not be empty",
      BioLengthOverflow => "Bio is too long",
      InvalidCategoryName => "Category name must be between 1 and 50 characters",
      EmailAlreadyExists => "This email address is already in use",
      CategoryAlreadyExists => "A category with this name already exists",
      InvalidPagination => "Page must be at least 1 and limit between 1 and 50",
      SearchQueryRequired => "A search query is required",
      NotLoggedIn => "Authentication token was not provided",
      IncorrectLogin => "Email or password is incorrect",
      InvalidToken => "Invalid authentication token",
      ExpiredToken => "Authentication token has expired",
      AccountDisabled => "This account has been deactivated",
      NotAnAdmin => "This action requires administrator privileges",
      NoPostEditAllowed => "You are not allowed to modify this post",
      NoCommentEditAllowed => "You are not allowed to modify this comment",
      NotFound => "Not found",
      CouldntCreate => "Could not create the record",
      CouldntUpdate => "Could not update the record",
      CouldntLikePost => "Could not update the like",
      InsecureJwtSecret => "jwt_secret must be set to a non-default value",
      Unknown(_) => "Internal server error",
    }
  }
}

pub type ConnectHubResult<T> = Result<T, ConnectHubError>;

pub struct ConnectHubError {
  pub error_type: ConnectHubErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
}

impl<T> From<T> for ConnectHubError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    let error_type = match cause.downcast_ref::<diesel::result::Error>() {
      Some(&diesel::NotFound) => ConnectHubErrorType::NotFound,
      _ => ConnectHubErrorType::Unknown(format!("{}", &cause)),
    };
    ConnectHubError {
      error_type,
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for ConnectHubError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConnectHubError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for ConnectHubError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl ResponseError for ConnectHubError {
  fn status_code(&self) -> StatusCode {
    use ConnectHubErrorType::*;
    match self.error_type {
      InvalidPostTitle | InvalidBodyField | EmptyComment | InvalidName | InvalidEmail
      | InvalidPassword | InvalidDepartment | BioLengthOverflow | InvalidCategoryName
      | EmailAlreadyExists | CategoryAlreadyExists | InvalidPagination | SearchQueryRequired => {
        StatusCode::BAD_REQUEST
      }
      NotLoggedIn | IncorrectLogin | InvalidToken | ExpiredToken => StatusCode::UNAUTHORIZED,
      AccountDisabled | NotAnAdmin | NoPostEditAllowed | NoCommentEditAllowed => {
        StatusCode::FORBIDDEN
      }
      NotFound => StatusCode::NOT_FOUND,
      CouldntCreate | CouldntUpdate | CouldntLikePost | InsecureJwtSecret | Unknown(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code()).json(ErrorResponse {
      error: self.error_type.to_string(),
      message: self.error_type.message().to_string(),
    })
  }
}

impl From<ConnectHubErrorType> for ConnectHubError {
  fn from(error_type: ConnectHubErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    ConnectHubError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait ConnectHubErrorExt<T, E: Into<anyhow::Error>> {
  fn with_connecthub_type(self, error_type: ConnectHubErrorType) -> ConnectHubResult<T>;
}

impl<T, E: Into<anyhow::Error>> ConnectHubErrorExt<T, E> for Result<T, E> {
  fn with_connecthub_type(self, error_type: ConnectHubErrorType) -> ConnectHubResult<T> {
    self.map_err(|error| ConnectHubError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}

pub trait ConnectHubErrorExt2<T> {
  fn with_connecthub_type(self, error_type: ConnectHubErrorType) -> ConnectHubResult<T>;
}

impl<T> ConnectHubErrorExt2<T> for ConnectHubResult<T> {
  fn with_connecthub_type(self, error_type: ConnectHubErrorType) -> ConnectHubResult<T> {
    self.map_err(|mut e| {
      e.error_type = error_type;
      e
    })
  }
}
