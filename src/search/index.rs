//! Weighted multi-field index
//!
//! Holds the searchable fields of every icon together with their length norms
//! and answers "which icons match this term, and how well". A record's score
//! for a term combines every field that matched as
//! `Π score_f ^ (weight_f · norm_f)`, so strong matches in heavy fields pull
//! the score towards 0 fastest.

use super::fuzzy::{FuzzyMatcher, MatchOptions};
use super::projection::SearchableIcon;
use super::ranking::FieldWeights;
use std::cmp::Ordering;

/// Searchable fields of an icon, in weight order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Tags,
    Category,
    All,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Tags, Field::Category, Field::All];

    fn value<'s>(&self, icon: &'s SearchableIcon<'_>) -> &'s str {
        match self {
            Field::Name => &icon.name,
            Field::Tags => &icon.tags,
            Field::Category => &icon.category,
            Field::All => &icon.all,
        }
    }
}

/// One indexed field value
#[derive(Debug, Clone)]
struct IndexedValue {
    field: Field,
    text: String,
    norm: f64,
}

/// A record that matched a term
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    /// Position of the record in the indexed slice
    pub record: usize,
    /// Combined score, lower is better
    pub score: f64,
}

/// Index over a slice of searchable icons
pub struct FieldIndex {
    records: Vec<Vec<IndexedValue>>,
    weights: [(Field, f64); 4],
    options: MatchOptions,
}

impl FieldIndex {
    /// Index `icons`; blank field values are left out and can never match
    pub fn build(icons: &[SearchableIcon<'_>], weights: &FieldWeights, options: MatchOptions) -> Self {
        let records = icons
            .iter()
            .map(|icon| {
                Field::ALL
                    .iter()
                    .filter_map(|field| {
                        let text = field.value(icon);
                        if text.trim().is_empty() {
                            return None;
                        }
                        Some(IndexedValue {
                            field: *field,
                            text: text.to_string(),
                            norm: field_norm(text),
                        })
                    })
                    .collect()
            })
            .collect();

        Self {
            records,
            weights: weights.normalized(),
            options,
        }
    }

    fn weight(&self, field: Field) -> f64 {
        self.weights
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, w)| *w)
            .unwrap_or(1.0)
    }

    /// All records matching `term`, best first; ties keep index order
    pub fn search(&self, term: &str) -> Vec<TermMatch> {
        let matcher = FuzzyMatcher::new(term, self.options.clone());

        let mut matches: Vec<TermMatch> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(record, values)| {
                let mut matched = false;
                let mut score = 1.0;

                for value in values {
                    let Some(m) = matcher.search_in(&value.text) else {
                        continue;
                    };
                    matched = true;
                    let weight = self.weight(value.field);
                    let base = if m.score == 0.0 && weight > 0.0 {
                        f64::EPSILON
                    } else {
                        m.score
                    };
                    score *= base.powf(weight * value.norm);
                }

                matched.then_some(TermMatch { record, score })
            })
            .collect();

        matches.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then(a.record.cmp(&b.record))
        });
        matches
    }
}

/// Length norm of a field: `1/sqrt(token_count)` rounded to three decimals
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
