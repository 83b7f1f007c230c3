//! Sito predicate compiler.
//!
//! Turns the raw predicate steps carried by a pattern set into a validated
//! [`sito_core::CompiledQuery`]:
//! - `pattern_set` - the compile-time handoff trait and an owned data form
//! - `registry` - operator-name to handler dispatch, with a catch-all
//! - `handlers` - the builtin operators
//! - `arity` - argument-count requirements
//! - `regex` - regex compilation and interning
//! - `compile` - the compilation driver
//! - `error` - locatable errors and source rendering

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod arity;
pub mod compile;
pub mod error;
pub mod handlers;
pub mod pattern_set;
pub mod regex;
pub mod registry;

#[cfg(test)]
pub mod test_utils;


/// Result type for compilation.
pub type Result<T> = std::result::Result<T, QueryError>;

// Re-export commonly used items at crate root
pub use arity::Arity;
pub use compile::{QueryCompiler, compile};
pub use error::{Point, PredicateErrorKind, QueryError, QueryErrorKind};
pub use pattern_set::{PatternSet, PatternSetData, RawPattern};
pub use registry::{
    CompiledPredicate, PredicateContext, PredicateHandler, PredicateRegistry,
};
