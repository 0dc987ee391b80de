use doku::Document;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::{
  env,
  net::{IpAddr, Ipv4Addr},
};

pub(crate) const DEFAULT_JWT_SECRET: &str = "changeme";

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(default)]
pub struct Settings {
  /// settings related to the postgresql database
  #[default(Default::default())]
  pub database: DatabaseConfig,
  /// Creates the first admin account on startup if no admin exists yet
  #[default(None)]
  #[doku(example = "Some(Default::default())")]
  pub setup: Option<SetupConfig>,
  /// the domain name of your instance, used as token issuer
  #[default("localhost")]
  #[doku(example = "connecthub.example.com")]
  pub hostname: String,
  /// Address where connecthub should listen for incoming requests
  #[default(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)))]
  #[doku(as = "String")]
  pub bind: IpAddr,
  /// Port where connecthub should listen for incoming requests
  #[default(8080)]
  pub port: u16,
  /// Secret used to sign authentication tokens. Release builds refuse to start with the default.
  #[default(_code = "DEFAULT_JWT_SECRET.to_string()")]
  #[doku(example = "a-long-random-string")]
  jwt_secret: String,
  /// How long an authentication token stays valid
  #[default(24)]
  pub jwt_expiry_hours: i64,
  /// Sets a response Access-Control-Allow-Origin CORS header
  /// https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Origin
  #[default(None)]
  #[doku(example = "*")]
  cors_origin: Option<String>,
}

impl Settings {
  pub fn cors_origin(&self) -> Option<String> {
    env::var("CONNECTHUB_CORS_ORIGIN")
      .ok()
      .or(self.cors_origin.clone())
  }

  pub fn jwt_secret(&self) -> String {
    env::var("CONNECTHUB_JWT_SECRET").unwrap_or_else(|_| self.jwt_secret.clone())
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(default)]
pub struct DatabaseConfig {
  #[serde(flatten, default)]
  pub(crate) connection: DatabaseConnection,

  /// Maximum number of active sql connections
  #[default(30)]
  pub pool_size: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(untagged)]
pub enum DatabaseConnection {
  /// Configure the database by specifying a URI
  ///
  /// This is the preferred method to specify database connection details since
  /// it is the most flexible.
  Uri {
    /// Connection URI pointing to a postgres instance
    ///
    /// For an explanation of how to use connection URIs, see [here][0] in
    /// PostgreSQL's documentation.
    ///
    /// [0]: https://www.postgresql.org/docs/current/libpq-connect.html#id-1.7.3.8.3.6
    #[doku(example = "postgresql:///connecthub?user=connecthub&host=/var/run/postgresql")]
    uri: String,
  },

  /// Configure the database by specifying parts of a URI
  #[default]
  Parts(DatabaseConnectionParts),
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(default)]
pub struct DatabaseConnectionParts {
  /// Username to connect to postgres
  #[default("connecthub")]
  pub(super) user: String,
  /// Password to connect to postgres
  #[default("password")]
  pub(super) password: String,
  #[default("localhost")]
  /// Host where postgres is running
  pub(super) host: String,
  /// Port where postgres can be accessed
  #[default(5432)]
  pub(super) port: i32,
  /// Name of the postgres database for connecthub
  #[default("connecthub")]
  pub(super) database: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, Document)]
#[serde(deny_unknown_fields)]
pub struct SetupConfig {
  /// Display name of the admin user
  #[doku(example = "Administrator")]
  pub admin_name: String,
  /// Login email of the admin user
  #[doku(example = "admin@example.com")]
  pub admin_email: String,
  /// Password for the admin user. It must be between 8 and 60 characters.
  #[doku(example = "tf6HHDS4RolWfFhk4Rq9")]
  pub admin_password: String,
  /// Department of the admin user
  #[default("IT")]
  #[doku(example = "IT")]
  pub admin_department: String,
}
