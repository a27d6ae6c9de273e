//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup wiring:
//!     Segment::controller("Users")      (allocate ControllerId)
//!     → prefix / get / post / ...       (store.rs, per-method route tables)
//!     → Segment::activate(&[ids])       (flip activation flags, hand out entry points)
//!
//! Per request (router.rs):
//!     method + path segments
//!     → aggregate every controller registered for the method
//!       (activation check, prefix join, cross-controller duplicates)
//!     → matcher.rs (literal pass, then parameterized pass)
//!     → Return: ResolvedRoute, no match, or RouteError
//! ```
//!
//! # Design Decisions
//! - No precompiled route tree: the flat view is rebuilt per request so
//!   activation changes are observed without a restart
//! - Literal routes always win over parameterized routes of the same shape
//! - Ambiguity is a hard error, never first-match-wins
//! - Registration never validates path syntax; problems surface at
//!   resolution time (and in validation.rs at startup)

pub mod error;
pub mod matcher;
pub mod method;
pub mod params;
pub mod path;
pub mod router;
pub mod store;
pub mod validation;

pub use error::{RegistrationError, RouteError};
pub use method::{HttpMethod, UnsupportedMethod};
pub use params::PathParams;
pub use router::ResolvedRoute;
pub use store::{ControllerBuilder, ControllerId, RouteInfo, Segment};
pub use validation::{validate_routes, RouteIssue};
