//! Query Parser
//!
//! Turns a raw query into the list of terms the ranking pipeline intersects.
//! Hyphens are treated as word separators, and every adjacent pair of words
//! is also searched as a hyphenated compound so "chart up" finds "chart-up".

/// Parsed and processed search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Deduplicated terms in first-seen order: single words first, then compounds
    pub terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Query parser and preprocessor
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query into its terms
    pub fn parse(query: &str) -> ParsedQuery {
        let normalized = query.to_lowercase().replace('-', " ");
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut terms: Vec<String> = Vec::with_capacity(words.len() * 2);
        for word in &words {
            push_unique(&mut terms, (*word).to_string());
        }
        for pair in words.windows(2) {
            push_unique(&mut terms, format!("{}-{}", pair[0], pair[1]));
        }

        ParsedQuery {
            original: query.to_string(),
            terms,
        }
    }
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}
