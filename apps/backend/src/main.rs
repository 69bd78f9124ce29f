use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use simjur_backend::config::db::db_url;
use simjur_backend::config::push::push_config_from_env;
use simjur_backend::config::security::security_from_env;
use simjur_backend::config::server::ServerConfig;
use simjur_backend::infra::state::build_state;
use simjur_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use simjur_backend::push::WebPushSender;
use simjur_backend::{routes, telemetry};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    let security_config = match security_from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "Invalid security configuration");
            std::process::exit(1);
        }
    };
    let database_url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            std::process::exit(1);
        }
    };

    let mut builder = build_state()
        .with_db_url(database_url)
        .with_security(security_config);

    match push_config_from_env() {
        Some(push_config) => match WebPushSender::new(push_config) {
            Ok(sender) => builder = builder.with_push(Arc::new(sender)),
            Err(e) => warn!(error = %e, "Push client unavailable; sending disabled"),
        },
        None => warn!("VAPID keys not set; push sending disabled"),
    }

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, "Starting SIMJUR backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
