//! MCP tools implementation

pub mod glyphs;
pub mod list_icons;
pub mod search;
pub mod usage;
pub mod util;
