//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! EntryPoint::call(request, segments)
//!     → Segment::resolve (routing)
//!         ├─ no match     → 404 JSON error
//!         ├─ RouteError   → 500 JSON error
//!         └─ ResolvedRoute
//!     → Handler::call(request, params)
//!         ├─ Reply::Native → returned unchanged
//!         ├─ Reply::Json   → 200 JSON body
//!         ├─ Reply::Empty  → no response (host default)
//!         ├─ redirect signal → escapes as Err
//!         └─ HttpException → JSON error with its status (default 500)
//! ```
//!
//! # Design Decisions
//! - Exactly one resolve-and-invoke attempt per request, no retries
//! - Only the redirect signal crosses the dispatch boundary as an error
//! - Handlers are boxed closures; controller state is captured, not bound

pub mod dispatcher;
pub mod exception;
pub mod handler;
pub mod reply;

pub use dispatcher::{ActivateOptions, EntryPoint, EntryPoints, ErrorHook, RequestInfo};
pub use exception::{HttpException, REDIRECT_SIGNAL};
pub use handler::{BoxFuture, FnHandler, Handler};
pub use reply::{IntoReply, Reply};
