//! Per-method entry points and the request lifecycle.
//!
//! # Responsibilities
//! - Resolve the handler for (method, segments)
//! - Invoke it with the request and extracted parameters
//! - Normalize its reply into a response
//! - Translate handler errors into JSON error responses
//! - Let the redirect signal escape untouched
//!
//! # Design Decisions
//! - Resolution errors never escape: they are rendered here
//! - The store is only read; concurrent requests share it without locking
//!   beyond the concurrent maps' own shard locks
//! - No timeouts here; the hosting server owns them

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;

use super::exception::HttpException;
use super::reply::Reply;
use crate::http::response::{respond, respond_with_error};
use crate::observability::metrics;
use crate::routing::{HttpMethod, Segment};

/// Called for every handler error rendered as a JSON error response.
pub type ErrorHook = Arc<dyn Fn(&HttpException, &RequestInfo) + Send + Sync>;

/// Options for [`Segment::activate_with`].
#[derive(Clone, Default)]
pub struct ActivateOptions {
    pub on_error: Option<ErrorHook>,
}

impl ActivateOptions {
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpException, &RequestInfo) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ActivateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivateOptions")
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// What an error hook learns about the failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: HttpMethod,
    /// Request path segments joined with `/`.
    pub path: String,
    /// Pattern of the handler that failed.
    pub pattern: String,
}

/// One entry point per HTTP method, all sharing one [`Segment`].
#[derive(Clone)]
pub struct EntryPoints {
    pub get: EntryPoint,
    pub post: EntryPoint,
    pub put: EntryPoint,
    pub patch: EntryPoint,
    pub delete: EntryPoint,
    pub head: EntryPoint,
    pub options: EntryPoint,
}

impl EntryPoints {
    pub(crate) fn new(segment: Arc<Segment>, options: ActivateOptions) -> Self {
        let entry = |method| EntryPoint {
            method,
            segment: Arc::clone(&segment),
            on_error: options.on_error.clone(),
        };
        Self {
            get: entry(HttpMethod::Get),
            post: entry(HttpMethod::Post),
            put: entry(HttpMethod::Put),
            patch: entry(HttpMethod::Patch),
            delete: entry(HttpMethod::Delete),
            head: entry(HttpMethod::Head),
            options: entry(HttpMethod::Options),
        }
    }

    pub fn for_method(&self, method: HttpMethod) -> &EntryPoint {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Put => &self.put,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Head => &self.head,
            HttpMethod::Options => &self.options,
        }
    }
}

/// The catch-all handler for one HTTP method.
#[derive(Clone)]
pub struct EntryPoint {
    method: HttpMethod,
    segment: Arc<Segment>,
    on_error: Option<ErrorHook>,
}

impl EntryPoint {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Dispatch one request.
    ///
    /// `segments` is the captured wildcard path, already split. Returns
    /// `Ok(None)` when the handler produced nothing, and `Err` only for the
    /// redirect signal.
    pub async fn call(
        &self,
        request: Request<Body>,
        segments: &[String],
    ) -> Result<Option<Response>, HttpException> {
        let start = Instant::now();
        let method = self.method;
        let path = segments.join("/");

        let route = match self.segment.resolve(method, segments) {
            Ok(Some(route)) => route,
            Ok(None) => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                metrics::record_dispatch(method, StatusCode::NOT_FOUND, "not_found", start);
                return Ok(Some(respond_with_error(StatusCode::NOT_FOUND, "Route is not found")));
            }
            Err(err) => {
                tracing::warn!(method = %method, path = %path, error = %err, "Route resolution failed");
                let err = HttpException::from(err);
                metrics::record_dispatch(method, err.status_code(), "route_error", start);
                return Ok(Some(respond_with_error(err.status_code(), err.message())));
            }
        };

        tracing::debug!(
            method = %method,
            path = %path,
            pattern = %route.pattern,
            controller = %route.controller,
            "Dispatching"
        );

        match route.handler.call(request, route.params).await {
            Ok(Reply::Native(response)) => {
                metrics::record_dispatch(method, response.status(), "handled", start);
                Ok(Some(response))
            }
            Ok(Reply::Json(body)) => {
                metrics::record_dispatch(method, StatusCode::OK, "handled", start);
                Ok(Some(respond(StatusCode::OK, &body)))
            }
            Ok(Reply::Empty) => {
                metrics::record_dispatch(method, StatusCode::OK, "empty", start);
                Ok(None)
            }
            Err(err) if err.is_redirect() => {
                tracing::debug!(method = %method, path = %path, location = ?err.location(), "Redirect signal");
                metrics::record_dispatch(method, StatusCode::TEMPORARY_REDIRECT, "redirect", start);
                Err(err)
            }
            Err(err) => {
                let status = err.status_code();
                if status.is_server_error() {
                    tracing::error!(method = %method, path = %path, status = %status, error = %err, "Handler failed");
                } else {
                    tracing::warn!(method = %method, path = %path, status = %status, error = %err, "Handler rejected request");
                }
                if let Some(hook) = &self.on_error {
                    let info = RequestInfo {
                        method,
                        path,
                        pattern: route.pattern,
                    };
                    hook(&err, &info);
                }
                metrics::record_dispatch(method, status, "handler_error", start);
                Ok(Some(respond_with_error(status, err.message())))
            }
        }
    }
}
