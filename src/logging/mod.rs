//! Tracing setup
//!
//! Production deployments get JSON lines for log shipping; everywhere else
//! gets colored human-readable output. `RUST_LOG` overrides the default
//! `info` filter.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let base = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match get_environment().as_str() {
        "production" | "prod" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(base.json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(base.with_ansi(true))
                .init();
        }
    }
}
