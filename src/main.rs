//! segment-router demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────────┐
//!                        │                  SEGMENT ROUTER                    │
//!                        │                                                    │
//!   Client Request       │  ┌──────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ─────────────────────┼─▶│   http   │──▶│  dispatch  │──▶│   routing   │  │
//!                        │  │  server  │   │ EntryPoint │   │  resolver   │  │
//!                        │  └──────────┘   └─────┬──────┘   └──────┬──────┘  │
//!                        │                       │                 │         │
//!                        │                       ▼                 ▼         │
//!   Client Response      │  ┌──────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ◀────────────────────┼──│ response │◀──│  handler   │   │registration │  │
//!                        │  │ builder  │   │ (closure)  │   │    store    │  │
//!                        │  └──────────┘   └────────────┘   └─────────────┘  │
//!                        │                                                    │
//!                        │  config · observability · lifecycle                │
//!                        └───────────────────────────────────────────────────┘
//! ```

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use segment_router::config::{load_config, SegmentConfig};
use segment_router::lifecycle::signals::spawn_signal_listener;
use segment_router::observability::{logging, metrics};
use segment_router::routing::validate_routes;
use segment_router::{HttpServer, Segment, Shutdown};

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Serve controller routes behind a single catch-all mount", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the route table and exit
    #[arg(long)]
    routes: bool,
}

#[tokio::main]
async fn main() -> segment_router::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SegmentConfig::default(),
    };

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "segment-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_path = %config.dispatch.mount_path,
        request_timeout_secs = config.dispatch.request_timeout_secs,
        "Configuration loaded"
    );

    let segment = Segment::new();
    let controllers = demo::register(&segment, &config.dispatch.mount_path);
    let entry_points = segment.activate(&controllers)?;

    if let Err(issues) = validate_routes(&segment) {
        for issue in &issues {
            tracing::warn!(issue = %issue, "Route table issue");
        }
    }

    let mount = config.dispatch.mount_path.trim_end_matches('/');
    if cli.routes {
        for route in segment.routes(None) {
            println!("{:<8} {}/{}  ({})", route.method, mount, route.path, route.controller_name);
        }
        return Ok(());
    }
    for route in segment.routes(None) {
        tracing::info!(
            method = %route.method,
            path = %format!("{mount}/{}", route.path),
            controller = %route.controller_name,
            "Route"
        );
    }

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(Arc::clone(&shutdown));

    let server = HttpServer::new(config, entry_points);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
