//! Fuzzy Matching Engine (Bitap)
//!
//! Approximate substring matching with the Bitap (shift-or) algorithm, scored
//! on a lower-is-better scale: 0.0 is an identical field, 1.0 is no match.
//! A candidate at `e` errors found `d` characters away from the expected
//! location scores `e / pattern_len + d / distance`; only candidates at or
//! under the threshold count.

use std::collections::HashMap;

/// Longest pattern the bit-parallel search handles in one pass
pub const MAX_BITS: usize = 32;

/// Smallest score a non-identical match can report
const MIN_SCORE: f64 = 0.001;

/// Matching options
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Maximum accepted score (0.0 exact only, 1.0 anything)
    pub threshold: f64,
    /// Where in the text the pattern is expected to be found
    pub location: usize,
    /// How far from `location` a match may drift before it costs a full error
    pub distance: usize,
    /// Ignore `location`/`distance` entirely
    pub ignore_location: bool,
    /// Keep scanning after a good match is found
    pub find_all_matches: bool,
    /// Shortest run of matched characters that counts as a match
    pub min_match_char_length: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            location: 0,
            distance: 600,
            ignore_location: false,
            find_all_matches: true,
            min_match_char_length: 2,
        }
    }
}

/// Match result with score and matched character ranges
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Lower is better, 0.0 for an identical text
    pub score: f64,
    /// Inclusive character ranges whose characters occur in the pattern
    pub indices: Vec<(usize, usize)>,
}

/// One ≤32 character slice of the pattern with its character bitmasks
#[derive(Debug, Clone)]
struct PatternChunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

impl PatternChunk {
    fn new(pattern: &[char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet: HashMap<char, u64> = HashMap::new();
        for (i, c) in pattern.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Self {
            pattern: pattern.to_vec(),
            alphabet,
            start_index,
        }
    }
}

/// Outcome of searching one chunk
#[derive(Debug)]
struct BitapResult {
    is_match: bool,
    score: f64,
    indices: Vec<(usize, usize)>,
}

/// Fuzzy matcher compiled for a single pattern
///
/// Operator prefixes and suffixes (`!`, `^`, `'`, `$`, `=`) are matched as literal text.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    pattern: String,
    chunks: Vec<PatternChunk>,
    options: MatchOptions,
}

impl FuzzyMatcher {
    /// Compile `pattern` (case-insensitive) with the given options
    pub fn new(pattern: &str, options: MatchOptions) -> Self {
        let pattern = pattern.to_lowercase();
        let chars: Vec<char> = pattern.chars().collect();
        let len = chars.len();

        let mut chunks = Vec::new();
        if len > MAX_BITS {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(PatternChunk::new(&chars[i..i + MAX_BITS], i));
                i += MAX_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                chunks.push(PatternChunk::new(&chars[start..], start));
            }
        } else if len > 0 {
            chunks.push(PatternChunk::new(&chars, 0));
        }

        Self {
            pattern,
            chunks,
            options,
        }
    }

    /// Compile `pattern` with the default options
    #[cfg(test)]
    pub fn with_defaults(pattern: &str) -> Self {
        Self::new(pattern, MatchOptions::default())
    }

    #[cfg(test)]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Search `text` for the pattern
    ///
    /// Returns Some(FuzzyMatch) if the text matches within the threshold, None otherwise
    pub fn search_in(&self, text: &str) -> Option<FuzzyMatch> {
        if self.chunks.is_empty() {
            return None;
        }

        let text = text.to_lowercase();
        if text == self.pattern {
            let len = text.chars().count();
            return Some(FuzzyMatch {
                score: 0.0,
                indices: vec![(0, len.saturating_sub(1))],
            });
        }

        let text: Vec<char> = text.chars().collect();
        let mut total_score = 0.0;
        let mut has_matches = false;
        let mut indices = Vec::new();

        for chunk in &self.chunks {
            let result = bitap_search(
                &text,
                chunk,
                self.options.location + chunk.start_index,
                &self.options,
            );
            if result.is_match {
                has_matches = true;
            }
            total_score += result.score;
            indices.extend(result.indices);
        }

        if !has_matches {
            return None;
        }

        Some(FuzzyMatch {
            score: total_score / self.chunks.len() as f64,
            indices,
        })
    }
}

/// Score for a candidate with `errors` mistakes found at `current_location`
fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    options: &MatchOptions,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    if options.ignore_location {
        return accuracy;
    }

    let proximity = expected_location.abs_diff(current_location);
    if options.distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / options.distance as f64
}

/// Position of the next exact occurrence of `pattern` at or after `from`
fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.len() > text.len() || from > text.len() - pattern.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&i| text[i..i + pattern.len()] == *pattern)
}

/// Bitap search of one pattern chunk over `text`
fn bitap_search(
    text: &[char],
    chunk: &PatternChunk,
    location: usize,
    options: &MatchOptions,
) -> BitapResult {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let expected_location = location.min(text_len);

    let mut current_threshold = options.threshold;
    let compute_matches = options.min_match_char_length > 1;
    let mut match_mask = vec![false; text_len];

    // Exact occurrences tighten the threshold before the fuzzy pass
    let mut search_from = expected_location;
    while let Some(index) = find_from(text, pattern, search_from) {
        let score = compute_score(pattern_len, 0, index, expected_location, options);
        current_threshold = current_threshold.min(score);
        search_from = index + pattern_len;
        if compute_matches {
            match_mask[index..index + pattern_len].fill(true);
        }
    }

    let mut best_location: Option<usize> = None;
    let mut last_bits: Vec<u64> = Vec::new();
    let mut final_score = 1.0;
    let mut bin_max = pattern_len + text_len;
    let mask = 1u64 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window at which this error count can still beat the threshold
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(
                pattern_len,
                errors,
                expected_location + bin_mid,
                expected_location,
                options,
            );
            if score <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected_location + 1).saturating_sub(bin_mid).max(1);
        let finish = if options.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = text
                .get(current_location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);

            if compute_matches {
                if let Some(slot) = match_mask.get_mut(current_location) {
                    *slot = char_match != 0;
                }
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                let prev_here = last_bits.get(j).copied().unwrap_or(0);
                bits[j] |= ((prev_next | prev_here) << 1) | 1 | prev_next;
            }

            if bits[j] & mask != 0 {
                final_score = compute_score(
                    pattern_len,
                    errors,
                    current_location,
                    expected_location,
                    options,
                );
                if final_score <= current_threshold {
                    current_threshold = final_score;
                    best_location = Some(current_location);
                    if current_location <= expected_location {
                        break;
                    }
                    start = (2 * expected_location)
                        .saturating_sub(current_location)
                        .max(1);
                }
            }

            j -= 1;
        }

        // No point trying more errors if even a perfectly placed match would fail
        let score = compute_score(
            pattern_len,
            errors + 1,
            expected_location,
            expected_location,
            options,
        );
        if score > current_threshold {
            break;
        }
        last_bits = bits;
    }

    let mut result = BitapResult {
        is_match: best_location.is_some(),
        score: f64::max(MIN_SCORE, final_score),
        indices: Vec::new(),
    };

    if compute_matches {
        let indices = mask_to_indices(&match_mask, options.min_match_char_length);
        if indices.is_empty() {
            result.is_match = false;
        }
        result.indices = indices;
    }

    result
}

/// Collapse a per-character match mask into runs of at least `min_len`
fn mask_to_indices(mask: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut indices = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    indices.push((s, i - 1));
                }
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        if mask.len() - s >= min_len {
            indices.push((s, mask.len() - 1));
        }
    }

    indices
}
