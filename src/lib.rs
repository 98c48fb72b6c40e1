use std::future::Future;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub mod config;
pub mod cors;
pub mod errors;
pub mod http;
pub mod logging;

use config::Config;
use cors::with_cors_policy;
use errors::ServerError;

pub fn build_app(config: &Config) -> Router {
    let routes = Router::new()
        .route("/", get(http::handlers::root))
        .route("/health", get(http::handlers::health))
        .route("/api/test", get(http::handlers::api_test))
        .fallback(http::handlers::not_found)
        .method_not_allowed_fallback(http::handlers::method_not_allowed);

    with_cors_policy(routes, &config.cors)
        .layer(middleware::from_fn(logging::request_logging_middleware))
}

/// Serves the API on an already bound listener until `shutdown` resolves.
/// In-flight requests are allowed to finish.
pub async fn serve<F>(
    listener: TcpListener,
    config: &Config,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Binds the configured socket and serves until SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let bind_socket = config.bind_socket()?;
    let listener = TcpListener::bind(bind_socket).await?;

    let allowed_origins: Vec<&str> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.to_str().ok())
        .collect();
    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        allowed_origins = ?allowed_origins,
        "server starting"
    );

    serve(listener, &config, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
