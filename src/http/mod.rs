//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum Router: `{mount}` and `{mount}/{*path}`, middleware)
//!     → request.rs (request ID assigned/propagated)
//!     → raw path below the mount → decoded segments, method → EntryPoint
//!     → dispatch (routing + handler)
//!     → response.rs (JSON bodies and error envelopes)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::{respond, respond_with_error, ErrorResponseBody};
pub use server::HttpServer;
