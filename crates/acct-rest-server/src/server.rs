// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::config::ServerConfig;
use crate::dependencies::DefaultServerDependencies;
use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::middleware::json_method_not_allowed;
use crate::state::AppState;
use axum::{http::HeaderValue, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

/// REST API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a server backed by the configured database
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let state = DefaultServerDependencies::new(config.clone()).await?.into_state();
        Ok(Self::with_state(config, state))
    }

    /// Construct a server from an already-built app state (used for custom dependencies)
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = Self::build_app(state, &config);
        Self { config, app }
    }

    /// Build the Axum application with routes and middleware
    pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
        let cors = if config.enable_cors {
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(vec![
                    HeaderValue::from_static("http://localhost:3000"),
                    HeaderValue::from_static("http://127.0.0.1:3000"),
                ])
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
        };

        let middleware_stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(CompressionLayer::new())
            .layer(cors)
            .layer(from_fn(json_method_not_allowed));

        Router::new()
            .route("/health", get(handlers::health::health))
            .route("/", get(handlers::health::index))
            .route(
                "/accounts",
                get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
            )
            .route(
                "/accounts/:id",
                get(handlers::accounts::get_account)
                    .put(handlers::accounts::update_account)
                    .delete(handlers::accounts::delete_account),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware_stack)
    }

    /// The routed application, for serving on a custom listener or in-process tests
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Bind the configured address and serve until SIGINT/SIGTERM
    pub async fn run(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        info!(addr = %listener.local_addr()?, "Starting account service");
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Internal(format!("REST server error: {err}")))?;
        info!("Account service stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM (sent by `docker stop`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "Received SIGINT, shutting down"),
        _ = terminate => info!(signal = "SIGTERM", "Received SIGTERM, shutting down"),
    }
}
