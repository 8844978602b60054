//! Search Engine Integration
//!
//! Ties together query parsing, fuzzy matching, and ranking. Every term must
//! match an icon for it to survive; each term adds its adjusted score, and the
//! survivors come back lowest score first.

use super::fuzzy::MatchOptions;
use super::index::FieldIndex;
use super::parser::QueryParser;
use super::projection::SearchableIcon;
use super::ranking::{MatchStrength, ScoredCandidate, ScoringWeights};
use crate::hugeicons::types::{IconRecord, IconSummary};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Icon search engine
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    scoring_weights: ScoringWeights,
    match_options: MatchOptions,
}

impl SearchEngine {
    /// Create a new search engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank `icons` against `query`, best match first
    pub fn search(&self, icons: &[IconRecord], query: &str) -> Vec<IconSummary> {
        self.rank(icons, query)
            .into_iter()
            .map(|candidate| IconSummary::from(&icons[candidate.index]))
            .collect()
    }

    /// Surviving candidates with their accumulated scores, best first
    pub fn rank(&self, icons: &[IconRecord], query: &str) -> Vec<ScoredCandidate> {
        let parsed = QueryParser::parse(query);
        if parsed.is_empty() || icons.is_empty() {
            return Vec::new();
        }

        let searchable: Vec<SearchableIcon> =
            icons.iter().map(SearchableIcon::from_record).collect();
        let index = FieldIndex::build(
            &searchable,
            &self.scoring_weights.fields,
            self.match_options.clone(),
        );

        let mut candidates: Vec<ScoredCandidate> =
            (0..searchable.len()).map(ScoredCandidate::new).collect();

        for term in &parsed.terms {
            let matches = index.search(term);
            // Keyed by name: duplicate names share whichever score came last
            let term_scores: HashMap<&str, f64> = matches
                .iter()
                .map(|m| (searchable[m.record].name.as_str(), m.score))
                .collect();

            candidates = candidates
                .into_iter()
                .filter_map(|candidate| {
                    let icon = &searchable[candidate.index];
                    let base_score = *term_scores.get(icon.name.as_str())?;
                    let strength = MatchStrength::classify(icon, term);
                    Some(candidate.accumulate(
                        base_score,
                        strength.multiplier(&self.scoring_weights.multipliers),
                    ))
                })
                .collect();

            debug!(
                "Term '{}' matched {} icons, {} candidates remain",
                term,
                matches.len(),
                candidates.len()
            );

            if candidates.is_empty() {
                break;
            }
        }

        candidates.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        debug!("'{}' ranked {} icons", parsed.original, candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(results: &[IconSummary]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    fn catalog() -> Vec<IconRecord> {
        vec![
            IconRecord::new("home-01", "house,building", "navigation"),
            IconRecord::new("homework", "school", "education"),
            IconRecord::new("chart-up", "growth,increase", "business"),
            IconRecord::new("chart-down", "decline,decrease", "business"),
            IconRecord::new("settings-01", "gear,preferences", "system"),
            IconRecord::new("notification-03", "bell,alert", "communication"),
        ]
    }

    #[test]
    fn test_search_basic() {
        let engine = SearchEngine::new();
        let results = engine.search(&catalog(), "chart");

        assert_eq!(results.len(), 2);
        assert!(names(&results).contains(&"chart-up"));
        assert!(names(&results).contains(&"chart-down"));
    }

    #[test]
    fn test_exact_full_name_ranks_first() {
        let engine = SearchEngine::new();
        let icons = vec![
            IconRecord::new("home-01", "house", "navigation"),
            IconRecord::new("homework", "school", "education"),
        ];
        let results = engine.search(&icons, "home-01");

        assert_eq!(results[0].name, "home-01");
        if let Some(pos) = results.iter().position(|r| r.name == "homework") {
            assert!(pos > 0);
        }
    }

    #[test]
    fn test_compound_term_synthesis() {
        let engine = SearchEngine::new();
        let results = engine.search(&catalog(), "chart up");
        assert_eq!(names(&results), vec!["chart-up"]);
    }

    #[test]
    fn test_hyphen_insensitive_name_match() {
        let engine = SearchEngine::new();
        let results = engine.search(&catalog(), "home01");
        assert_eq!(names(&results).first(), Some(&"home-01"));
    }

    #[test]
    fn test_all_terms_must_match() {
        let engine = SearchEngine::new();
        let results = engine.search(&catalog(), "home settings");
        assert!(results.is_empty());
    }

    #[test]
    fn test_notification_scenario() {
        let engine = SearchEngine::new();
        let icons: Vec<IconRecord> = serde_json::from_value(json!([{
            "id": "n3",
            "name": "notification-03",
            "tags": "bell,alert",
            "category": "communication",
            "featured": true,
            "version": "1.0"
        }]))
        .unwrap();

        let results = engine.search(&icons, "notification");
        assert_eq!(results.len(), 1);
        assert_eq!(
            serde_json::to_value(&results[0]).unwrap(),
            json!({
                "name": "notification-03",
                "tags": "bell,alert",
                "category": "communication",
                "featured": true,
                "version": "1.0"
            })
        );
    }

    #[test]
    fn test_tag_search() {
        let engine = SearchEngine::new();
        let results = engine.search(&catalog(), "bell");
        assert_eq!(names(&results), vec!["notification-03"]);
    }

    #[test]
    fn test_blank_query_or_empty_catalog() {
        let engine = SearchEngine::new();
        assert!(engine.search(&catalog(), "").is_empty());
        assert!(engine.search(&catalog(), "   ").is_empty());
        assert!(engine.search(&[], "home").is_empty());
    }

    #[test]
    fn test_search_no_match() {
        let engine = SearchEngine::new();
        assert!(engine.search(&catalog(), "xyzzy").is_empty());
    }

    #[test]
    fn test_rank_scores_ascending() {
        let engine = SearchEngine::new();
        let ranked = engine.rank(&catalog(), "home");
        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }

    #[test]
    fn test_exact_word_beats_substring() {
        let engine = SearchEngine::new();
        let icons = vec![
            IconRecord::new("homework", "school", "education"),
            IconRecord::new("home-01", "house", "navigation"),
        ];
        let results = engine.search(&icons, "home");
        assert_eq!(names(&results), vec!["home-01", "homework"]);
    }
}
