use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{self, filter::EnvFilter};

use functional_refactor_mcp::{config::ServiceConfig, service::RefactorService};

/// Functional Refactor MCP Server - pipe and curry detection and rewriting
#[derive(Parser, Debug)]
#[command(name = "functional-refactor-mcp")]
#[command(about = "Model Context Protocol server for functional refactoring")]
#[command(version)]
struct Args {
    /// Maximum source size to analyze (in bytes)
    #[arg(
        long = "max-source-size",
        default_value = "5242880", // 5MB
        help = "Maximum source size to analyze in bytes"
    )]
    max_source_size: usize,

    /// Maximum number of detections to return per analysis
    #[arg(
        long = "limit",
        default_value = "100",
        help = "Maximum number of detections to return per analysis"
    )]
    limit: usize,

    /// Maximum number of completed analysis runs to cache
    #[arg(
        long = "cache-size",
        default_value = "100",
        help = "Maximum number of completed analysis runs to cache"
    )]
    analysis_cache_size: usize,
}

#[tokio::main]
#[tracing::instrument]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the tracing subscriber, logging to stderr so stdout
    // stays free for the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting MCP server with config: {:?}", args);

    let config = ServiceConfig {
        max_source_size: args.max_source_size,
        limit: args.limit,
        analysis_cache_size: args.analysis_cache_size,
    };

    let service = RefactorService::with_config(config).serve(stdio()).await?;

    tracing::info!("Service started, waiting for connections");
    service.waiting().await?;
    Ok(())
}
