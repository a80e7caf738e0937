//! LineFormatter 演示
//!
//! 运行：`cargo run --example line_formatter_demo`

use linefmt::log::{LineEventFormat, LineFormatter, LineFormatterConfig};

fn main() -> anyhow::Result<()> {
    let formatter = LineFormatter::new(LineFormatterConfig {
        timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        show_fields: true,
        ..Default::default()
    });
    formatter.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .event_format(LineEventFormat::new(formatter).with_caller(true))
        .init();

    tracing::info!("this is {} demo", "line-formatter");

    tracing::info!(component = "web-server", "starting...");
    tracing::info!(
        component = "web-server",
        req = "GET /api/stats",
        reqId = "#1",
        "params: startYear=2048"
    );
    tracing::error!(
        component = "web-server",
        req = "GET /api/stats",
        reqId = "#1",
        "response: 400 Bad Request"
    );

    tracing::info!(category = "db-connector", "connecting to db on 10.10.10.13...");
    tracing::warn!(category = "db-connector", "connection took 10s");

    tracing::info!("demo end.");

    Ok(())
}
