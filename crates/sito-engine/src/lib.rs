//! Lazy predicate evaluation for Sito compiled queries.
//!
//! The engine sits between a [`sito_core::CompiledQuery`] and an external
//! structural matcher. The matcher proposes candidate matches through the
//! [`MatchSource`] trait; [`MatchStream`] and [`CaptureStream`] pull them
//! lazily, test each one against the pattern's text predicates, yield the
//! survivors, and tell the matcher to reclaim the storage of the rest.

pub mod eval;
pub mod source;
pub mod stream;

#[cfg(test)]
pub mod test_utils;


// Re-export commonly used items at crate root
pub use eval::PredicateEvaluator;
pub use source::{MatchId, MatchSource, QueryCapture, QueryMatch, SyntaxNode};
pub use stream::{CaptureStream, MatchStream};
