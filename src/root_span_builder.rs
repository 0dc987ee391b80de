use actix_web::{dev::ServiceResponse, http::StatusCode, ResponseError};
use tracing::Span;
use tracing_actix_web::RootSpanBuilder;

/// Request spans with fewer fields than the default builder. Client errors are logged at warn,
/// server errors at error.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
  fn on_request_start(request: &actix_web::dev::ServiceRequest) -> Span {
    let request_id = tracing_actix_web::root_span_macro::private::get_request_id(request);

    tracing::info_span!(
      "HTTP request",
      http.method = %request.method(),
      http.target = %request.uri().path(),
      http.status_code = tracing::field::Empty,
      request_id = %request_id,
      exception.message = tracing::field::Empty,
    )
  }

  fn on_request_end<B>(span: Span, outcome: &Result<ServiceResponse<B>, actix_web::Error>) {
    match &outcome {
      Ok(response) => {
        if let Some(error) = response.response().error() {
          handle_error(&span, response.status(), error.as_response_error());
        } else {
          span.record("http.status_code", response.status().as_u16());
        }
      }
      Err(error) => {
        let response_error = error.as_response_error();
        handle_error(&span, response_error.status_code(), response_error);
      }
    };
  }
}

fn handle_error(span: &Span, status_code: StatusCode, response_error: &dyn ResponseError) {
  // pre-formatting errors is a workaround for https://github.com/tokio-rs/tracing/issues/1565
  let message = format!("{response_error}");
  span.record("exception.message", tracing::field::display(&message));
  span.record("http.status_code", status_code.as_u16());

  let entered = span.enter();
  if status_code.is_client_error() {
    tracing::warn!("{message}");
  } else {
    tracing::error!("{message}\n{response_error:?}");
  }
  drop(entered);
}
