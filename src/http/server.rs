//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the catch-all routes
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Translate axum requests into entry-point calls
//! - Act on the redirect signal
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SegmentConfig;
use crate::dispatch::{EntryPoints, HttpException};
use crate::http::request::{RequestIdExt, UuidRequestId};
use crate::http::response::respond_with_error;
use crate::lifecycle::shutdown;
use crate::routing::path::decode_segments;
use crate::routing::HttpMethod;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub entry_points: Arc<EntryPoints>,
    /// Mount path without its trailing `/`; empty when mounted at the root.
    pub mount: Arc<str>,
}

/// HTTP server hosting one segment's entry points.
pub struct HttpServer {
    router: Router,
    config: SegmentConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: SegmentConfig, entry_points: EntryPoints) -> Self {
        let state = AppState {
            entry_points: Arc::new(entry_points),
            mount: Arc::from(config.dispatch.mount_path.trim_end_matches('/')),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SegmentConfig, state: AppState) -> Router {
        let mount = config.dispatch.mount_path.trim_end_matches('/');

        let router = if mount.is_empty() {
            Router::new()
                .route("/", any(dispatch))
                .route("/{*path}", any(dispatch))
        } else {
            Router::new()
                .route(mount, any(dispatch))
                .route(&format!("{mount}/"), any(dispatch))
                .route(&format!("{mount}/{{*path}}"), any(dispatch))
        };

        router
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.dispatch.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.dispatch.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_path = %self.config.dispatch.mount_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }
}

/// Catch-all handler for the mount path and everything below it.
///
/// Segments come from the raw URI path so an encoded `/` stays inside its
/// segment.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path();
    let raw = path.strip_prefix(&*state.mount).unwrap_or(path);
    let segments = match decode_segments(raw) {
        Ok(segments) => segments,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Rejecting undecodable path");
            return respond_with_error(StatusCode::BAD_REQUEST, "Invalid path encoding");
        }
    };

    let method = match HttpMethod::try_from(request.method()) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting request");
            return respond_with_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        }
    };

    match state.entry_points.for_method(method).call(request, &segments).await {
        Ok(Some(response)) => response,
        Ok(None) => ().into_response(),
        Err(signal) => follow_redirect(signal),
    }
}

/// Turn an escaped redirect signal into a redirect response.
fn follow_redirect(signal: HttpException) -> Response {
    match signal.location() {
        Some(location) => Redirect::temporary(location).into_response(),
        None => {
            tracing::error!(error = %signal, "Redirect signal without a location");
            respond_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Redirect signal without a location",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_without_location_is_500() {
        let response = follow_redirect(HttpException::from_message(crate::dispatch::REDIRECT_SIGNAL));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_redirect_to_location() {
        let response = follow_redirect(HttpException::redirect("/elsewhere"));
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/elsewhere");
    }
}
