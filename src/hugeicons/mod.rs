//! Hugeicons remote APIs, catalog provider and static usage docs

pub mod client;
pub mod platform;
pub mod provider;
pub mod types;

pub use client::HugeiconsClient;
pub use platform::Platform;
pub use provider::{IconCatalog, IconSource};
