//! CLI mode implementation
//!
//! Every MCP tool is also a subcommand. The argument structs double as the
//! tools' input schemas.

use crate::config::ServerConfig;
use crate::hugeicons::types::IconStyle;
use crate::hugeicons::Platform;
use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hugeicons CLI
#[derive(Parser, Debug)]
#[command(name = "hugeicons-mcp")]
#[command(about = "Hugeicons search, usage docs and glyph lookup", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub config: ServerConfig,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the whole icon catalog
    List(ListIconsArgs),
    /// Search icons by name, tags and category
    Search(SearchArgs),
    /// Show installation and usage for a platform
    Usage(UsageArgs),
    /// List every glyph of an icon
    Glyphs(GlyphsArgs),
    /// Show the glyph of an icon in one style
    Glyph(GlyphArgs),
}

/// list_icons tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct ListIconsArgs {}

/// search_icons tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms; separate independent searches with commas
    #[arg(short = 'q', long)]
    #[schemars(
        description = "Search query (e.g. 'home', 'notification', 'arrow left'). Use commas to run several searches at once (e.g. 'home, settings')"
    )]
    pub query: String,
}

/// get_platform_usage tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct UsageArgs {
    /// Target platform
    #[arg(short = 'p', long, value_enum, ignore_case = true)]
    #[schemars(description = "Platform name (react, vue, angular, svelte, react-native, flutter)")]
    pub platform: Platform,
}

/// get_icon_glyphs tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct GlyphsArgs {
    /// Icon name (e.g. home-01)
    #[arg(short = 'n', long = "icon-name")]
    #[schemars(description = "The name of the icon (e.g. 'home-01', 'notification-02')")]
    pub icon_name: String,
}

/// get_icon_glyph_by_style tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct GlyphArgs {
    /// Icon name (e.g. home-01)
    #[arg(short = 'n', long = "icon-name")]
    #[schemars(description = "The name of the icon (e.g. 'home-01', 'notification-02')")]
    pub icon_name: String,

    /// Icon style
    #[arg(short = 's', long, value_enum)]
    #[schemars(description = "The icon style")]
    pub style: IconStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["hugeicons-mcp", "search", "-q", "arrow left"]).unwrap();
        match cli.command {
            Some(Commands::Search(args)) => assert_eq!(args.query, "arrow left"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_glyph_with_style() {
        let cli = Cli::try_parse_from([
            "hugeicons-mcp",
            "glyph",
            "--icon-name",
            "home-01",
            "--style",
            "stroke-rounded",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Glyph(args)) => {
                assert_eq!(args.icon_name, "home-01");
                assert_eq!(args.style, IconStyle::StrokeRounded);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_usage_rejects_unknown_platform() {
        assert!(Cli::try_parse_from(["hugeicons-mcp", "usage", "-p", "html"]).is_err());
        let cli = Cli::try_parse_from(["hugeicons-mcp", "usage", "-p", "React-Native"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Usage(UsageArgs { platform: Platform::ReactNative }))
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hugeicons-mcp",
            "list",
            "--verbose",
            "--no-disk-cache",
            "--request-timeout-secs",
            "5",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.config.no_disk_cache);
        assert_eq!(cli.config.request_timeout_secs, 5);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn test_args_deserialize_from_tool_arguments() {
        let args: GlyphArgs = serde_json::from_value(serde_json::json!({
            "icon_name": "bell",
            "style": "twotone-rounded"
        }))
        .unwrap();
        assert_eq!(args.style, IconStyle::TwotoneRounded);

        let args: ListIconsArgs = serde_json::from_value(serde_json::json!({})).unwrap();
        let _ = args;
    }
}
