//! Fuzzy icon search with multi-term ranking
//!
//! Query terms are matched independently against a weighted projection of
//! every icon; only icons matching all terms are returned, ordered by their
//! accumulated lower-is-better score.

pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod parser;
pub mod projection;
pub mod ranking;


pub use engine::SearchEngine;
