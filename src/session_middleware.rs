use actix_web::{
  body::MessageBody,
  dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
  http::header::{HeaderValue, AUTHORIZATION, CACHE_CONTROL},
  Error,
  HttpMessage,
};
use connecthub_api_common::{claims::Claims, context::ConnectHubContext, utils::check_user_active};
use connecthub_db_views::structs::{LocalUserView, SessionError};
use connecthub_utils::error::{ConnectHubErrorExt2, ConnectHubErrorType, ConnectHubResult};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{ready, Ready},
  rc::Rc,
};
use tracing::debug;

#[derive(Clone)]
pub struct SessionMiddleware {
  context: ConnectHubContext,
}

impl SessionMiddleware {
  pub fn new(context: ConnectHubContext) -> Self {
    SessionMiddleware { context }
  }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SessionService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SessionService {
      service: Rc::new(service),
      context: self.context.clone(),
    }))
  }
}

pub struct SessionService<S> {
  service: Rc<S>,
  context: ConnectHubContext,
}

impl<S, B> Service<ServiceRequest> for SessionService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let svc = self.service.clone();
    let context = self.context.clone();

    Box::pin(async move {
      let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|h| h.to_str().ok().and_then(bearer_token).map(ToString::to_string));
      let authenticated = auth_header.is_some();

      // Handlers decide whether a failed login matters. Optional-auth handlers treat it as
      // anonymous, the others report the stored error.
      match auth_header {
        Some(Some(jwt)) => match local_user_view_from_jwt(&jwt, &context).await {
          Ok(local_user_view) => {
            req.extensions_mut().insert(local_user_view);
          }
          Err(e) => {
            debug!("Rejected auth token: {}", e.error_type);
            req.extensions_mut().insert(SessionError(e.error_type));
          }
        },
        Some(None) => {
          req
            .extensions_mut()
            .insert(SessionError(ConnectHubErrorType::InvalidToken));
        }
        None => {}
      }

      let mut res = svc.call(req).await?;

      let cache_value = if authenticated {
        "private"
      } else {
        "no-cache"
      };
      res
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(cache_value));
      Ok(res)
    })
  }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
  let (scheme, token) = header.trim().split_once(' ')?;
  let token = token.trim();
  if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
    Some(token)
  } else {
    None
  }
}

#[tracing::instrument(skip_all)]
async fn local_user_view_from_jwt(
  jwt: &str,
  context: &ConnectHubContext,
) -> ConnectHubResult<LocalUserView> {
  let claims = Claims::decode(jwt, &context.settings().jwt_secret())?;
  // A valid token for a user that no longer exists
  let local_user_view = LocalUserView::read(&mut context.pool(), claims.person_id())
    .await
    .with_connecthub_type(ConnectHubErrorType::InvalidToken)?;
  check_user_active(&local_user_view.person)?;
  Ok(local_user_view)
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{
    test::{call_and_read_body, call_service, init_service, TestRequest},
    web::{self, Bytes},
    App,
    HttpResponse,
  };
  use chrono::TimeDelta;
  use connecthub_db_schema::{
    newtypes::PersonId,
    schema::person,
    source::person::{Person, PersonInsertForm},
    traits::Crud,
    utils::{build_db_pool_for_tests, get_conn},
  };
  use diesel::QueryDsl;
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[test]
  fn test_bearer_token() {
    assert_eq!(Some("abc.def.ghi"), bearer_token("Bearer abc.def.ghi"));
    assert_eq!(Some("abc"), bearer_token("bearer  abc "));
    assert_eq!(None, bearer_token("Basic dXNlcjpwYXNz"));
    assert_eq!(None, bearer_token("Bearer "));
    assert_eq!(None, bearer_token("abc.def.ghi"));
  }

  async fn whoami(local_user_view: Option<LocalUserView>) -> HttpResponse {
    match local_user_view {
      Some(l) => HttpResponse::Ok().body(l.person.id.to_string()),
      None => HttpResponse::Ok().body("anonymous"),
    }
  }

  async fn me(local_user_view: LocalUserView) -> HttpResponse {
    HttpResponse::Ok().body(local_user_view.person.id.to_string())
  }

  fn token(
    context: &ConnectHubContext,
    person_id: PersonId,
    valid_for: TimeDelta,
  ) -> ConnectHubResult<String> {
    let settings = context.settings();
    Claims::generate(person_id, &settings.jwt_secret(), &settings.hostname, valid_for)
  }

  #[actix_web::test]
  #[serial]
  #[ignore]
  async fn test_session_resolution() -> ConnectHubResult<()> {
    let context = ConnectHubContext::create(build_db_pool_for_tests().await);
    let form = PersonInsertForm::new(
      "Jordan".into(),
      "jordan.session@example.com".into(),
      "jordan-password".into(),
      "Operations".into(),
    );
    let person = Person::create(&mut context.pool(), &form).await?;

    let app = init_service(
      App::new()
        .wrap(SessionMiddleware::new(context.clone()))
        .route("/whoami", web::get().to(whoami))
        .route("/me", web::get().to(me)),
    )
    .await;

    let valid = token(&context, person.id, TimeDelta::hours(1))?;
    let req = TestRequest::get()
      .uri("/whoami")
      .insert_header((AUTHORIZATION, format!("Bearer {valid}")))
      .to_request();
    let body = call_and_read_body(&app, req).await;
    assert_eq!(Bytes::from(person.id.to_string()), body);

    // A bad token on an optional endpoint is anonymous
    let req = TestRequest::get()
      .uri("/whoami")
      .insert_header((AUTHORIZATION, "Bearer garbage"))
      .to_request();
    let body = call_and_read_body(&app, req).await;
    assert_eq!(Bytes::from_static(b"anonymous"), body);

    let expired = token(&context, person.id, TimeDelta::hours(-2))?;
    let cases = [
      (None, 401),
      (Some("Bearer garbage".to_string()), 401),
      (Some(format!("Bearer {expired}")), 401),
      (Some(format!("Bearer {valid}")), 200),
    ];
    for (header, status) in cases {
      let mut req = TestRequest::get().uri("/me");
      if let Some(header) = header {
        req = req.insert_header((AUTHORIZATION, header));
      }
      let res = call_service(&app, req.to_request()).await;
      assert_eq!(status, res.status().as_u16());
    }

    Person::deactivate(&mut context.pool(), person.id).await?;
    let req = TestRequest::get()
      .uri("/me")
      .insert_header((AUTHORIZATION, format!("Bearer {valid}")))
      .to_request();
    let res = call_service(&app, req).await;
    assert_eq!(403, res.status().as_u16());

    let pool = &mut context.pool();
    let conn = &mut get_conn(pool).await?;
    diesel::delete(person::table.find(person.id))
      .execute(conn)
      .await?;
    Ok(())
  }
}
