//! Tracing subscriber setup
//!
//! Console output respects `RUST_LOG`, e.g. `RUST_LOG=panelpop_runtime=debug`
//! to see mode transitions and hotkey toggles. Defaults to `info`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .init();
}
