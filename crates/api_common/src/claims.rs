use chrono::{TimeDelta, Utc};
use connecthub_db_schema::newtypes::PersonId;
use connecthub_utils::error::{ConnectHubErrorExt, ConnectHubErrorType, ConnectHubResult};
use jsonwebtoken::{
  decode,
  encode,
  errors::ErrorKind,
  DecodingKey,
  EncodingKey,
  Header,
  Validation,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
  /// person_id, standard claim by RFC 7519.
  pub sub: i32,
  pub iss: String,
  /// Time when this token was issued as UNIX-timestamp in seconds
  pub iat: i64,
  /// Expiry as UNIX-timestamp in seconds
  pub exp: i64,
}

impl Claims {
  /// Checks the signature and expiry of a token.
  pub fn decode(jwt: &str, secret: &str) -> ConnectHubResult<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    match decode::<Claims>(jwt, &key, &Validation::default()) {
      Ok(data) => Ok(data.claims),
      Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
        Err(ConnectHubErrorType::ExpiredToken)?
      }
      Err(e) => Err(e).with_connecthub_type(ConnectHubErrorType::InvalidToken),
    }
  }

  pub fn generate(
    person_id: PersonId,
    secret: &str,
    hostname: &str,
    valid_for: TimeDelta,
  ) -> ConnectHubResult<String> {
    let now = Utc::now();
    let claims = Claims {
      sub: person_id.0,
      iss: hostname.to_string(),
      iat: now.timestamp(),
      exp: (now + valid_for).timestamp(),
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
  }

  pub fn person_id(&self) -> PersonId {
    PersonId(self.sub)
  }
}
