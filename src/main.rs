use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use mcp_bookings::adapters::memory::booking_repo::InMemoryBookingRepository;
use mcp_bookings::adapters::memory::calendar_store::InMemoryCalendarStore;
use mcp_bookings::adapters::memory::listing_directory::InMemoryListingDirectory;
use mcp_bookings::config::load_config;
use mcp_bookings::mcp::server::BookingMcpServer;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        dirs_next().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn dirs_next() -> PathBuf {
    // Look in the directory where the binary is
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting mcp-bookings server");

    // Load configuration
    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    if config.listings.is_empty() {
        tracing::warn!(
            path = %config_path.display(),
            "no listings configured; every booking tool call will fail until config.yaml lists some"
        );
    }

    // Build dependencies
    let listings = Arc::new(InMemoryListingDirectory::new(config.listings)?);
    let calendar = Arc::new(InMemoryCalendarStore::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());

    let server = BookingMcpServer::new(
        listings,
        calendar,
        bookings,
        config.pricing.service_fee_rate,
        config.calendar.horizon_days,
    );

    // Start MCP server over stdio
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
