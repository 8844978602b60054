//! hugeicons MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Tools:
//! - `list_icons()` - The full icon catalog
//! - `search_icons(query)` - Fuzzy multi-term icon search
//! - `get_platform_usage(platform)` - Installation and usage docs
//! - `get_icon_glyphs(icon_name)` - Font glyphs of an icon in every style
//! - `get_icon_glyph_by_style(icon_name, style)` - Font glyph in one style

mod cache;
mod cli;
mod config;
mod error;
mod http;
mod hugeicons;
mod mcp;
mod search;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use mcp::ServerContext;
use tools::util::{first_text, with_timeout};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    match execute_command(command, &cli.config).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute one subcommand and return the text to print
async fn execute_command(command: Commands, config: &config::ServerConfig) -> Result<String, AppError> {
    use tools::{glyphs, list_icons, search, usage};

    let result = match command {
        Commands::Usage(args) => usage::execute_platform_usage(args),
        Commands::Glyphs(args) => {
            let context = ServerContext::from_config(config)?;
            with_timeout("Glyphs", glyphs::execute_glyphs(args, &context.glyphs)).await
        }
        Commands::Glyph(args) => {
            let context = ServerContext::from_config(config)?;
            with_timeout("Glyph", glyphs::execute_glyph_by_style(args, &context.glyphs)).await
        }
        Commands::List(args) => {
            let context = ServerContext::from_config(config)?;
            with_timeout("List icons", list_icons::execute_list_icons(args, &context.catalog)).await
        }
        Commands::Search(args) => {
            let context = ServerContext::from_config(config)?;
            with_timeout("Search", search::execute_search(args, &context.catalog)).await
        }
    }?;

    Ok(first_text(&result))
}

/// Map AppError to exit code
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) => 1,
        AppError::NetworkError(_) | AppError::ApiError(_) => 2,
        AppError::NotFound(_) => 3,
        AppError::Timeout(_) => 4,
        AppError::CacheError(_) | AppError::ParseError(_) | AppError::Internal(_) => 5,
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting hugeicons MCP Server");

    let config = config::ServerConfig::from_env()?;
    let context = ServerContext::from_config(&config)?;

    mcp::handle_stdio(context).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(get_exit_code(&AppError::InvalidInput("x".into())), 1);
        assert_eq!(get_exit_code(&AppError::NetworkError("x".into())), 2);
        assert_eq!(get_exit_code(&AppError::ApiError("x".into())), 2);
        assert_eq!(get_exit_code(&AppError::NotFound("x".into())), 3);
        assert_eq!(get_exit_code(&AppError::Timeout("x".into())), 4);
        assert_eq!(get_exit_code(&AppError::Internal("x".into())), 5);
    }

    #[tokio::test]
    async fn test_usage_command_needs_no_network() {
        let output = execute_command(
            Commands::Usage(cli::UsageArgs {
                platform: hugeicons::Platform::Angular,
            }),
            &config::ServerConfig::default(),
        )
        .await
        .unwrap();
        assert!(output.contains("npm install @hugeicons/angular"));
    }

    #[tokio::test]
    async fn test_search_command_validates_before_fetching() {
        let config = config::ServerConfig {
            catalog_url: "http://127.0.0.1:9/api/icons".into(),
            no_disk_cache: true,
            ..config::ServerConfig::default()
        };
        let err = execute_command(
            Commands::Search(cli::SearchArgs { query: " ".into() }),
            &config,
        )
        .await
        .unwrap_err();
        assert_eq!(get_exit_code(&err), 1);
    }
}
