pub mod api_routes_http;
pub mod root_span_builder;
pub mod session_middleware;

use crate::{root_span_builder::QuieterRootSpanBuilder, session_middleware::SessionMiddleware};
use actix_cors::Cors;
use actix_web::{middleware, web::Data, App, HttpServer};
use clap::Parser;
use connecthub_api_common::context::ConnectHubContext;
use connecthub_db_schema::{
  enums::Role,
  source::person::{Person, PersonInsertForm},
  traits::Crud,
  utils::{build_db_pool, DbPool},
};
use connecthub_utils::{
  error::ConnectHubResult,
  settings::{config_docs, structs::Settings, SETTINGS},
  utils::validation::{is_valid_email, is_valid_password},
  version::VERSION,
};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

#[derive(Parser, Debug)]
#[command(
  version,
  about = "An intranet server for sharing posts, comments and announcements",
  long_about = None
)]
pub struct CmdArgs {
  /// Don't start the HTTP server.
  ///
  /// Migrations and the admin setup still run, which is useful for preparing a fresh database.
  #[arg(long, default_value_t = false, env = "CONNECTHUB_DISABLE_HTTP_SERVER")]
  disable_http_server: bool,
  /// Print the documented default configuration and exit.
  #[arg(long, default_value_t = false)]
  print_config_docs: bool,
}

pub async fn start_connecthub_server(args: CmdArgs) -> ConnectHubResult<()> {
  if args.print_config_docs {
    println!("{}", config_docs());
    return Ok(());
  }

  let settings = SETTINGS.to_owned();
  info!("Starting ConnectHub v{VERSION}");
  settings.check_jwt_secret(!cfg!(debug_assertions))?;

  // Runs pending migrations before handing out connections
  let pool = build_db_pool().await?;
  setup_admin(&mut (&pool).into(), &settings).await?;

  let context = ConnectHubContext::create(pool);

  if args.disable_http_server {
    info!("HTTP server disabled, exiting");
    return Ok(());
  }

  info!("Starting HTTP server at {}:{}", settings.bind, settings.port);
  let bind = (settings.bind, settings.port);
  let server = HttpServer::new(move || {
    let cors_config = cors_config(&settings);
    App::new()
      .wrap(middleware::Compress::default())
      .wrap(cors_config)
      .wrap(TracingLogger::<QuieterRootSpanBuilder>::new())
      .app_data(Data::new(context.clone()))
      .wrap(SessionMiddleware::new(context.clone()))
      .configure(api_routes_http::config)
  })
  .bind(bind)?
  .run();

  server.await?;
  info!("ConnectHub stopped");
  Ok(())
}

/// Creates the admin account from the `setup` config section, unless an active admin exists.
async fn setup_admin(pool: &mut DbPool<'_>, settings: &Settings) -> ConnectHubResult<()> {
  if Person::admin_exists(pool).await? {
    return Ok(());
  }
  let Some(setup) = &settings.setup else {
    warn!("No admin account exists and no setup section is configured");
    return Ok(());
  };
  info!("No admin found, creating {}", setup.admin_email);

  is_valid_email(&setup.admin_email)?;
  is_valid_password(&setup.admin_password)?;
  Person::check_email_taken(pool, &setup.admin_email, None).await?;

  let person_form = PersonInsertForm {
    role: Some(Role::Admin),
    ..PersonInsertForm::new(
      setup.admin_name.clone(),
      setup.admin_email.clone(),
      setup.admin_password.clone(),
      setup.admin_department.clone(),
    )
  };
  Person::create(pool, &person_form).await?;
  Ok(())
}

fn cors_config(settings: &Settings) -> Cors {
  let cors_default = Cors::default()
    .allow_any_origin()
    .allow_any_method()
    .allow_any_header()
    .expose_any_header()
    .max_age(3600);

  match (settings.cors_origin(), cfg!(debug_assertions)) {
    (Some(origin), false) => {
      // Need to call send_wildcard() explicitly, passing this into allowed_origin() results in
      // error
      if origin == "*" {
        cors_default
      } else {
        Cors::default()
          .allowed_origin(&origin)
          .allow_any_method()
          .allow_any_header()
          .expose_any_header()
          .max_age(3600)
      }
    }
    _ => cors_default,
  }
}
