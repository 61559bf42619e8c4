use crate::config::FeedConfig;
use crate::server::start_server;
use crate::Result;
use colored::Colorize;

/// Start the HTTP surface, optionally on a different port than configured
pub async fn run(mut config: FeedConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }

    if !config.endpoints_dir.exists() {
        println!(
            "{}",
            format!(
                "⚠ Endpoint directory {} does not exist; every request will come back empty",
                config.endpoints_dir.display()
            )
            .yellow()
        );
    }

    start_server(&config).await
}
