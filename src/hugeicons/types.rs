//! Hugeicons data types shared by the catalog, glyph API and search engine

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Icon tags as delivered by the catalog API.
///
/// The API has shipped both a comma-delimited string and a list of strings;
/// both forms are accepted and preserved verbatim for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Joined(String),
    List(Vec<String>),
}

impl Default for Tags {
    fn default() -> Self {
        Tags::Joined(String::new())
    }
}

impl Tags {
    /// Individual trimmed, non-empty tag tokens in their original order
    pub fn tokens(&self) -> Vec<String> {
        let split = |s: &str| -> Vec<String> {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        };

        match self {
            Tags::Joined(s) => split(s),
            Tags::List(items) => items.iter().flat_map(|s| split(s)).collect(),
        }
    }
}

/// An entry in the icon catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub version: String,
}

impl IconRecord {
    /// Convenience constructor used by tests and demo data
    pub fn new(name: &str, tags: &str, category: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            tags: Some(Tags::Joined(tags.to_string())),
            category: Some(category.to_string()),
            featured: false,
            version: String::new(),
        }
    }
}

/// Public projection of an icon returned by search (the `id` is omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub featured: bool,
    pub version: String,
}

impl From<&IconRecord> for IconSummary {
    fn from(record: &IconRecord) -> Self {
        Self {
            name: record.name.clone(),
            tags: record.tags.clone(),
            category: record.category.clone(),
            featured: record.featured,
            version: record.version.clone(),
        }
    }
}

/// Response body of the catalog endpoint
#[derive(Debug, Deserialize)]
pub struct IconsResponse {
    pub icons: Vec<IconRecord>,
}

/// Icon rendering styles offered by the glyph API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IconStyle {
    BulkRounded,
    DuotoneRounded,
    SolidRounded,
    SolidSharp,
    SolidStandard,
    StrokeRounded,
    StrokeSharp,
    StrokeStandard,
    TwotoneRounded,
}

impl IconStyle {
    pub const ALL: [IconStyle; 9] = [
        IconStyle::BulkRounded,
        IconStyle::DuotoneRounded,
        IconStyle::SolidRounded,
        IconStyle::SolidSharp,
        IconStyle::SolidStandard,
        IconStyle::StrokeRounded,
        IconStyle::StrokeSharp,
        IconStyle::StrokeStandard,
        IconStyle::TwotoneRounded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IconStyle::BulkRounded => "bulk-rounded",
            IconStyle::DuotoneRounded => "duotone-rounded",
            IconStyle::SolidRounded => "solid-rounded",
            IconStyle::SolidSharp => "solid-sharp",
            IconStyle::SolidStandard => "solid-standard",
            IconStyle::StrokeRounded => "stroke-rounded",
            IconStyle::StrokeSharp => "stroke-sharp",
            IconStyle::StrokeStandard => "stroke-standard",
            IconStyle::TwotoneRounded => "twotone-rounded",
        }
    }

    const NAMES: &'static [&'static str] = &[
        "bulk-rounded",
        "duotone-rounded",
        "solid-rounded",
        "solid-sharp",
        "solid-standard",
        "stroke-rounded",
        "stroke-sharp",
        "stroke-standard",
        "twotone-rounded",
    ];

    /// Exact style name, ignoring surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl<'de> Deserialize<'de> for IconStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IconStyle::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single font glyph for an icon in one style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub icon_name: String,
    pub style: String,
    pub unicode: String,
    pub unicode_decimal: u32,
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Primary glyph for a style plus the optional secondary layer (duotone/twotone)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphPair {
    pub primary: Glyph,
    pub secondary: Option<Glyph>,
}

#[derive(Debug, Deserialize)]
pub struct GlyphList {
    pub glyphs: Vec<Glyph>,
}

/// Envelope used by every glyph API response
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}
