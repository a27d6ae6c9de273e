//! Registration store and registrar API.
//!
//! # Responsibilities
//! - Hold one route table per HTTP method: controller → (local path → handler)
//! - Hold controller metadata (name, prefix, activation flag)
//! - Expose the registration calls used during startup wiring
//! - Hand out per-method entry points on activation
//!
//! # Design Decisions
//! - Controllers are identified by an issued integer id, not by reference
//! - Same controller + same path overwrites silently (last registration wins)
//! - Paths are trimmed but not validated here
//! - Concurrent maps so the store can be read by in-flight requests while a
//!   late `activate` call flips flags

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use dashmap::DashMap;
use serde::Serialize;

use super::error::RegistrationError;
use super::method::HttpMethod;
use super::params::PathParams;
use super::path::{join_path, trim_path};
use crate::dispatch::{ActivateOptions, EntryPoints, FnHandler, Handler, HttpException, IntoReply};

/// Stable identity of a controller within one [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ControllerId(u64);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Metadata attached to a controller by the registrar.
#[derive(Debug, Clone)]
pub(crate) struct ControllerMeta {
    pub(crate) name: String,
    pub(crate) prefix: String,
    pub(crate) activated: bool,
}

/// Local path → handler, for one controller and one method.
pub(crate) type PathHandlers = HashMap<String, Arc<dyn Handler>>;

/// One method's registrations.
#[derive(Default)]
pub(crate) struct RouteTable {
    pub(crate) controllers: DashMap<ControllerId, PathHandlers>,
}

/// A registered route as seen from the outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: HttpMethod,
    /// Prefix joined with the local path.
    pub path: String,
    /// Path as registered on the controller.
    pub local_path: String,
    pub controller: ControllerId,
    pub controller_name: String,
    pub activated: bool,
}

/// The registration store shared by every entry point of one catch-all mount.
pub struct Segment {
    tables: [RouteTable; 7],
    controllers: DashMap<ControllerId, ControllerMeta>,
    next_id: AtomicU64,
}

impl Segment {
    /// Create an empty store, already wrapped for sharing with entry points.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tables: std::array::from_fn(|_| RouteTable::default()),
            controllers: DashMap::new(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Declare a controller and start registering its routes.
    pub fn controller(&self, name: impl Into<String>) -> ControllerBuilder<'_> {
        let id = ControllerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let name = name.into();
        tracing::debug!(controller = %name, id = %id, "Controller declared");
        self.controllers.insert(
            id,
            ControllerMeta {
                name,
                prefix: String::new(),
                activated: false,
            },
        );
        ControllerBuilder { segment: self, id }
    }

    /// Register `handler` for `method` at `path` on `controller`.
    ///
    /// The path is trimmed of one leading and one trailing `/`. Re-registering
    /// the same path on the same controller replaces the previous handler.
    pub fn register<F, Fut, R>(
        &self,
        method: HttpMethod,
        path: &str,
        controller: ControllerId,
        handler: F,
    ) -> Result<(), RegistrationError>
    where
        F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
        R: IntoReply + 'static,
    {
        self.ensure_known(controller)?;
        self.insert_route(method, path, controller, Arc::new(FnHandler::new(handler)));
        Ok(())
    }

    /// Set the path prefix applied to every route of `controller`.
    pub fn set_prefix(&self, controller: ControllerId, path: &str) -> Result<(), RegistrationError> {
        let mut meta = self
            .controllers
            .get_mut(&controller)
            .ok_or(RegistrationError::UnknownController(controller))?;
        meta.prefix = trim_path(path).to_string();
        tracing::debug!(controller = %meta.name, prefix = %meta.prefix, "Prefix set");
        Ok(())
    }

    /// Mark `controllers` as servable and return the per-method entry points.
    pub fn activate(
        self: &Arc<Self>,
        controllers: &[ControllerId],
    ) -> Result<EntryPoints, RegistrationError> {
        self.activate_with(controllers, ActivateOptions::default())
    }

    /// Like [`Segment::activate`], with an error hook for the returned entry points.
    pub fn activate_with(
        self: &Arc<Self>,
        controllers: &[ControllerId],
        options: ActivateOptions,
    ) -> Result<EntryPoints, RegistrationError> {
        for id in controllers {
            self.ensure_known(*id)?;
        }
        for id in controllers {
            if let Some(mut meta) = self.controllers.get_mut(id) {
                meta.activated = true;
            }
        }
        tracing::info!(
            activated = controllers.len(),
            routes = self.route_count(),
            "Controllers activated"
        );
        Ok(EntryPoints::new(Arc::clone(self), options))
    }

    /// List registered routes, sorted by method then full path.
    pub fn routes(&self, method: Option<HttpMethod>) -> Vec<RouteInfo> {
        let methods: Vec<HttpMethod> = match method {
            Some(m) => vec![m],
            None => HttpMethod::ALL.to_vec(),
        };

        let mut routes = Vec::new();
        for method in methods {
            for (id, paths) in self.snapshot(method) {
                let Some(meta) = self.controller_meta(id) else {
                    continue;
                };
                for local_path in paths.keys() {
                    routes.push(RouteInfo {
                        method,
                        path: join_path(&meta.prefix, local_path),
                        local_path: local_path.clone(),
                        controller: id,
                        controller_name: meta.name.clone(),
                        activated: meta.activated,
                    });
                }
            }
        }
        routes.sort_by(|a, b| (a.method, &a.path, a.controller).cmp(&(b.method, &b.path, b.controller)));
        routes
    }

    /// Total number of registrations across all methods.
    pub fn route_count(&self) -> usize {
        self.tables
            .iter()
            .flat_map(|t| t.controllers.iter().map(|e| e.value().len()))
            .sum()
    }

    pub(crate) fn insert_route(
        &self,
        method: HttpMethod,
        path: &str,
        controller: ControllerId,
        handler: Arc<dyn Handler>,
    ) {
        let path = trim_path(path).to_string();
        tracing::debug!(method = %method, path = %path, controller = %controller, "Route registered");
        self.table(method)
            .controllers
            .entry(controller)
            .or_default()
            .insert(path, handler);
    }

    /// Copy of one method's table, ordered by controller id.
    pub(crate) fn snapshot(&self, method: HttpMethod) -> Vec<(ControllerId, PathHandlers)> {
        let mut entries: Vec<_> = self
            .table(method)
            .controllers
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    pub(crate) fn controller_meta(&self, id: ControllerId) -> Option<ControllerMeta> {
        self.controllers.get(&id).map(|m| m.value().clone())
    }

    fn table(&self, method: HttpMethod) -> &RouteTable {
        &self.tables[method.index()]
    }

    fn ensure_known(&self, id: ControllerId) -> Result<(), RegistrationError> {
        if self.controllers.contains_key(&id) {
            Ok(())
        } else {
            Err(RegistrationError::UnknownController(id))
        }
    }
}

/// Chained registration for one controller.
///
/// ```ignore
/// let users = segment
///     .controller("UsersController")
///     .prefix("/users")
///     .get("", list_users)
///     .get(":id", get_user)
///     .id();
/// ```
pub struct ControllerBuilder<'a> {
    segment: &'a Segment,
    id: ControllerId,
}

macro_rules! method_registrar {
    ($($(#[$doc:meta])* $name:ident => $method:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<F, Fut, R>(self, path: &str, handler: F) -> Self
            where
                F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
                Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
                R: IntoReply + 'static,
            {
                self.route($method, path, handler)
            }
        )*
    };
}

impl<'a> ControllerBuilder<'a> {
    /// Set the controller's prefix, replacing any earlier one.
    pub fn prefix(self, path: &str) -> Self {
        if let Some(mut meta) = self.segment.controllers.get_mut(&self.id) {
            meta.prefix = trim_path(path).to_string();
        }
        self
    }

    /// Register a handler for an arbitrary method.
    pub fn route<F, Fut, R>(self, method: HttpMethod, path: &str, handler: F) -> Self
    where
        F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
        R: IntoReply + 'static,
    {
        self.segment
            .insert_route(method, path, self.id, Arc::new(FnHandler::new(handler)));
        self
    }

    method_registrar! {
        get => HttpMethod::Get;
        post => HttpMethod::Post;
        put => HttpMethod::Put;
        patch => HttpMethod::Patch;
        delete => HttpMethod::Delete;
        head => HttpMethod::Head;
        options => HttpMethod::Options;
    }

    /// Finish the chain and keep the id for activation.
    pub fn id(self) -> ControllerId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn ok(_req: Request<Body>, _params: PathParams) -> Result<Value, HttpException> {
        Ok(json!({ "ok": true }))
    }

    #[test]
    fn test_register_trims_one_slash_each_side() {
        let segment = Segment::new();
        let id = segment.controller("C").id();
        segment.register(HttpMethod::Get, "/users/", id, ok).unwrap();

        let routes = segment.routes(Some(HttpMethod::Get));
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].local_path, "users");
    }

    #[test]
    fn test_reregistering_same_path_overwrites() {
        let segment = Segment::new();
        let id = segment.controller("C").get("a", ok).get("/a", ok).id();

        assert_eq!(segment.route_count(), 1);
        assert_eq!(segment.routes(None)[0].controller, id);
    }

    #[test]
    fn test_prefix_is_trimmed_and_overwritten() {
        let segment = Segment::new();
        let id = segment.controller("C").prefix("/old/").get(":id", ok).id();
        segment.set_prefix(id, "/new/").unwrap();

        let routes = segment.routes(None);
        assert_eq!(routes[0].path, "new/:id");
    }

    #[test]
    fn test_routes_are_listed_per_method() {
        let segment = Segment::new();
        segment.controller("C").get("a", ok).post("a", ok).delete("b", ok);

        assert_eq!(segment.routes(None).len(), 3);
        assert_eq!(segment.routes(Some(HttpMethod::Post)).len(), 1);
        assert!(segment.routes(Some(HttpMethod::Put)).is_empty());
    }

    #[test]
    fn test_activation_flags_only_given_controllers() {
        let segment = Segment::new();
        let a = segment.controller("A").get("a", ok).id();
        let b = segment.controller("B").get("b", ok).id();

        segment.activate(&[a]).unwrap();

        assert!(segment.controller_meta(a).unwrap().activated);
        assert!(!segment.controller_meta(b).unwrap().activated);
    }

    #[test]
    fn test_unknown_controller_is_rejected() {
        let segment = Segment::new();
        let _ = segment.controller("Local").id();
        let missing = ControllerId(99);

        assert_eq!(
            segment.register(HttpMethod::Get, "x", missing, ok),
            Err(RegistrationError::UnknownController(missing))
        );
        assert!(segment.set_prefix(missing, "p").is_err());
        assert!(segment.activate(&[missing]).is_err());
    }
}
