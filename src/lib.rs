//! Controller-based request dispatch behind a single catch-all route.
//!
//! Route handlers are registered per controller and HTTP method, activated
//! explicitly, and served through one axum catch-all mount. Each request is
//! resolved against the registrations at request time: literal routes first,
//! then parameterized ones, with ambiguity reported as an error.
//!
//! ```ignore
//! use segment_router::{HttpException, PathParams, Segment};
//! use serde_json::json;
//!
//! let segment = Segment::new();
//! let users = segment
//!     .controller("UsersController")
//!     .prefix("users")
//!     .get(":id", |_req, params: PathParams| async move {
//!         let id: u64 = params.parse("id")?;
//!         Ok::<_, HttpException>(json!({ "id": id }))
//!     })
//!     .id();
//!
//! let entry_points = segment.activate(&[users])?;
//! ```

// Core subsystems
pub mod config;
pub mod dispatch;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::SegmentConfig;
pub use dispatch::{ActivateOptions, EntryPoint, EntryPoints, HttpException, IntoReply, Reply};
pub use error::{Error, Result};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ControllerId, HttpMethod, PathParams, Segment};
