use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging. Respects `RUST_LOG` when set; otherwise
/// defaults to debug output for this crate and info for everything else.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ata_scraper=debug,info"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
