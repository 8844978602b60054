//! Searchable text projection of catalog entries
//!
//! Flattens an `IconRecord` into the lowercase text fields the matcher works
//! on. Built fresh for every search and never persisted.

use crate::hugeicons::types::IconRecord;

/// Lowercase searchable view of one icon
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableIcon<'a> {
    pub record: &'a IconRecord,
    /// Lowercase name
    pub name: String,
    /// Lowercase tag tokens joined by single spaces
    pub tags: String,
    /// Lowercase category, empty when absent
    pub category: String,
    /// Every name variant, tag and tag fragment in one string
    pub all: String,
}

impl<'a> SearchableIcon<'a> {
    pub fn from_record(record: &'a IconRecord) -> Self {
        let name = record.name.as_str();
        let tags = record
            .tags
            .as_ref()
            .map(|t| t.tokens())
            .unwrap_or_default();
        let category = record.category.as_deref().unwrap_or("");

        let mut parts: Vec<String> = vec![
            name.to_string(),
            name.replace('-', " "),
            name.replace('-', ""),
        ];
        if name.contains('-') {
            parts.extend(name.split('-').map(str::to_string));
        }
        parts.extend(tags.iter().cloned());
        parts.push(category.to_string());
        parts.extend(
            tags.iter()
                .flat_map(|tag| tag.split(|c: char| c.is_whitespace() || c == '-'))
                .map(str::to_string),
        );

        let all = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self {
            record,
            name: name.to_lowercase(),
            tags: tags.join(" ").to_lowercase(),
            category: category.to_lowercase(),
            all,
        }
    }

    /// Name with every hyphen removed
    pub fn name_without_hyphens(&self) -> String {
        self.name.replace('-', "")
    }

    /// Name split on whitespace and hyphens, keeping empty segments
    pub fn name_words(&self) -> impl Iterator<Item = &str> {
        self.name.split(|c: char| c.is_whitespace() || c == '-')
    }
}
