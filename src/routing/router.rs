//! Route lookup for one request.
//!
//! # Responsibilities
//! - Aggregate every controller registered for the method into one flat
//!   full-path → handler view
//! - Refuse to serve while any of those controllers is inactive
//! - Run the two-pass matcher over the flat view
//!
//! # Design Decisions
//! - The flat view is rebuilt on every call (O(total handlers))
//! - Controllers are visited in id order so errors are deterministic
//! - Two controllers producing the same full path is a conflict, reported
//!   with both owners, never a silent overwrite

use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::RouteError;
use super::matcher::match_path;
use super::method::HttpMethod;
use super::params::PathParams;
use super::path::join_path;
use super::store::{ControllerId, Segment};
use crate::dispatch::Handler;

/// A handler selected for a request.
#[derive(Clone)]
pub struct ResolvedRoute {
    /// Full pattern that matched (prefix included).
    pub pattern: String,
    pub controller: ControllerId,
    pub handler: Arc<dyn Handler>,
    pub params: PathParams,
}

impl std::fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("pattern", &self.pattern)
            .field("controller", &self.controller)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

struct FlatRoute {
    controller: ControllerId,
    controller_name: String,
    handler: Arc<dyn Handler>,
}

impl Segment {
    /// Resolve `segments` for `method`.
    ///
    /// `Ok(None)` means no route matched (404 at the dispatcher).
    pub fn resolve(
        &self,
        method: HttpMethod,
        segments: &[String],
    ) -> Result<Option<ResolvedRoute>, RouteError> {
        let routes = self.aggregate(method)?;

        Ok(match_path(&routes, segments)?.map(|m| ResolvedRoute {
            pattern: m.pattern.to_string(),
            controller: m.route.controller,
            handler: Arc::clone(&m.route.handler),
            params: m.params,
        }))
    }

    fn aggregate(&self, method: HttpMethod) -> Result<BTreeMap<String, FlatRoute>, RouteError> {
        let mut routes: BTreeMap<String, FlatRoute> = BTreeMap::new();

        for (id, paths) in self.snapshot(method) {
            let Some(meta) = self.controller_meta(id) else {
                continue;
            };
            if !meta.activated {
                return Err(RouteError::InactiveController(meta.name));
            }

            for (local_path, handler) in paths {
                let full_path = join_path(&meta.prefix, &local_path);
                if let Some(existing) = routes.get(&full_path) {
                    return Err(RouteError::Conflict(vec![
                        format!("{full_path} ({})", existing.controller_name),
                        format!("{full_path} ({})", meta.name),
                    ]));
                }
                routes.insert(
                    full_path,
                    FlatRoute {
                        controller: id,
                        controller_name: meta.name.clone(),
                        handler,
                    },
                );
            }
        }

        Ok(routes)
    }
}
