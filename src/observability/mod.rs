//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher, server, registrar produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON lines for aggregation)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to the per-request span
//! - Metric updates are no-ops until a recorder is installed
//! - `RUST_LOG` overrides the configured level

pub mod logging;
pub mod metrics;
