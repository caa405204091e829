//! Pulseboard - a personal terminal dashboard.
//!
//! Aggregates live stock quotes, sports results, and news headlines
//! into one interactive terminal view.

use pulseboard::{App, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file: stdout belongs to the TUI.
    let log_dir = pulseboard::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "pulseboard.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseboard=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
