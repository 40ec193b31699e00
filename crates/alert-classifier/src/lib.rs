//! Alert Classification
//!
//! Maps free-form alert text onto one of five canned summaries using
//! case-insensitive keyword matching.

mod rules;

pub use rules::{classify, summarize, Summary};
