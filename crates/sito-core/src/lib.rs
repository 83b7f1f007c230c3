//! Core data structures for Sito compiled queries.
//!
//! A [`CompiledQuery`] is the immutable artifact produced by `sito-compiler` and
//! consumed by `sito-engine`: per-pattern predicate lists, capture name and
//! quantifier tables, and the interned regex table. This crate holds that
//! artifact plus the predicate IR both sides share. It never builds regexes
//! itself (searching needs only `dfa-search`); construction lives in the
//! compiler.

pub mod dump;
pub mod predicate;
pub mod quantifier;
pub mod query;
pub mod regex;
pub mod step;

#[cfg(test)]
mod step_tests;

/// Capture ID: index into a query's capture-name table.
pub type CaptureId = u32;

/// Literal ID: index into the pattern set's string-literal table.
pub type LiteralId = u32;

/// Regex ID: index into a query's interned regex table.
pub type RegexId = u32;

// Re-export commonly used items at crate root
pub use dump::dump;
pub use predicate::{
    BindingPolicy, GeneralPredicate, PredicateArg, PropertyPredicate, QueryProperty,
    TextPredicate,
};
pub use quantifier::CaptureQuantifier;
pub use query::{CompiledQuery, PatternPredicates, QueryParts};
pub use regex::CompiledRegex;
pub use step::PredicateStep;
