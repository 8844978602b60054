//! Ranking & Scoring System
//!
//! Field weights for the fuzzy index and the exact-match multipliers applied
//! when a candidate's per-term score is accumulated. All scores are
//! lower-is-better.

use super::index::Field;
use super::projection::SearchableIcon;

/// Relative importance of each searchable field
#[derive(Debug, Clone)]
pub struct FieldWeights {
    pub name: f64,
    pub tags: f64,
    pub category: f64,
    pub all: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 2.0,
            tags: 1.5,
            category: 0.8,
            all: 0.5,
        }
    }
}

impl FieldWeights {
    /// Weights scaled to sum to 1
    pub fn normalized(&self) -> [(Field, f64); 4] {
        let total = self.name + self.tags + self.category + self.all;
        let scale = |w: f64| if total > 0.0 { w / total } else { 0.25 };
        [
            (Field::Name, scale(self.name)),
            (Field::Tags, scale(self.tags)),
            (Field::Category, scale(self.category)),
            (Field::All, scale(self.all)),
        ]
    }
}

/// Score multipliers by match strength (smaller = stronger boost)
#[derive(Debug, Clone)]
pub struct StrengthMultipliers {
    /// Term equals a whole name segment, the full name, or the hyphen-less name
    pub exact_word: f64,
    /// Term is a substring of the name
    pub name_substring: f64,
    /// Term is a substring of the tags
    pub tag_substring: f64,
    /// Fuzzy-only match
    pub fuzzy: f64,
}

impl Default for StrengthMultipliers {
    fn default() -> Self {
        Self {
            exact_word: 0.1,
            name_substring: 0.3,
            tag_substring: 0.5,
            fuzzy: 1.0,
        }
    }
}

/// Scoring weights for the ranking pipeline
#[derive(Debug, Clone, Default)]
pub struct ScoringWeights {
    pub fields: FieldWeights,
    pub multipliers: StrengthMultipliers,
}

/// How strongly a term hit an icon, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrength {
    ExactWord,
    NameSubstring,
    TagSubstring,
    Fuzzy,
}

impl MatchStrength {
    /// Classify `term` against `icon`; the first applicable level wins
    pub fn classify(icon: &SearchableIcon<'_>, term: &str) -> Self {
        let without_hyphens = icon.name_without_hyphens();

        if icon.name_words().any(|w| w == term) || icon.name == term || without_hyphens == term {
            MatchStrength::ExactWord
        } else if icon.name.contains(term) || without_hyphens.contains(term) {
            MatchStrength::NameSubstring
        } else if icon.tags.contains(term) {
            MatchStrength::TagSubstring
        } else {
            MatchStrength::Fuzzy
        }
    }

    pub fn multiplier(&self, multipliers: &StrengthMultipliers) -> f64 {
        match self {
            MatchStrength::ExactWord => multipliers.exact_word,
            MatchStrength::NameSubstring => multipliers.name_substring,
            MatchStrength::TagSubstring => multipliers.tag_substring,
            MatchStrength::Fuzzy => multipliers.fuzzy,
        }
    }
}

/// A candidate still alive in the pipeline with its accumulated score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Position of the icon in the searched catalog
    pub index: usize,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(index: usize) -> Self {
        Self { index, score: 0.0 }
    }

    /// Add one term's contribution: the base fuzzy score plus its boosted copy
    pub fn accumulate(self, base_score: f64, multiplier: f64) -> Self {
        Self {
            index: self.index,
            score: self.score + (base_score + base_score * multiplier),
        }
    }
}
