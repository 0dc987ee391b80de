use crate::error::{ConnectHubErrorType, ConnectHubResult};
use deser_hjson::from_str;
use std::{env, fs, io::ErrorKind, sync::LazyLock};
use structs::{DatabaseConnection, Settings, DEFAULT_JWT_SECRET};
use tracing::warn;

pub mod structs;

static DEFAULT_CONFIG_FILE: &str = "config/config.hjson";

#[allow(clippy::expect_used)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(|| {
  if env::var("CONNECTHUB_INITIALIZE_WITH_DEFAULT_SETTINGS").is_ok() {
    Settings::default()
  } else {
    Settings::init().expect("Failed to load settings file, see config/defaults.hjson")
  }
});

impl Settings {
  /// Reads config from configuration file.
  ///
  /// Note: The env var `CONNECTHUB_DATABASE_URL` is parsed in
  /// `get_database_url()`. A missing config file means all defaults.
  fn init() -> ConnectHubResult<Self> {
    match fs::read_to_string(Self::get_config_location()) {
      Ok(config) => Ok(from_str::<Settings>(&config)?),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(Settings::default()),
      Err(e) => Err(e.into()),
    }
  }

  pub fn get_database_url(&self) -> String {
    if let Ok(url) = env::var("CONNECTHUB_DATABASE_URL") {
      return url;
    }
    match &self.database.connection {
      DatabaseConnection::Uri { uri } => uri.clone(),
      DatabaseConnection::Parts(parts) => {
        format!(
          "postgres://{}:{}@{}:{}/{}",
          parts.user, parts.password, parts.host, parts.port, parts.database,
        )
      }
    }
  }

  /// An empty or default `jwt_secret` lets anyone forge tokens. With `strict` this is an error,
  /// otherwise only a warning.
  pub fn check_jwt_secret(&self, strict: bool) -> ConnectHubResult<()> {
    let secret = self.jwt_secret();
    if !secret.trim().is_empty() && secret != DEFAULT_JWT_SECRET {
      return Ok(());
    }
    if strict {
      Err(ConnectHubErrorType::InsecureJwtSecret)?
    }
    warn!("jwt_secret is empty or left at its default, set it before running in production");
    Ok(())
  }

  fn get_config_location() -> String {
    env::var("CONNECTHUB_CONFIG_LOCATION").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
  }
}

/// Renders every setting with its default value and doc comment, in hjson.
pub fn config_docs() -> String {
  use doku::json::{AutoComments, CommentsStyle, Formatting, ObjectsStyle};
  let fmt = Formatting {
    auto_comments: AutoComments::none(),
    comments_style: CommentsStyle {
      separator: "#".to_owned(),
    },
    objects_style: ObjectsStyle {
      surround_keys_with_quotes: false,
      use_comma_as_separator: false,
    },
    ..Default::default()
  };
  doku::to_json_fmt_val(&fmt, &Settings::default())
}
