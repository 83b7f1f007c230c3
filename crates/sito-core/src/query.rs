//! The compiled query artifact.
//!
//! A [`CompiledQuery`] is the immutable output of query compilation: per-pattern
//! predicate lists, the capture-name table, per-pattern quantifier tables, and
//! the interned regex table. It carries no source text and no matcher state, so
//! one instance can back any number of match streams.

use serde::Serialize;

use crate::predicate::{GeneralPredicate, PropertyPredicate, QueryProperty, TextPredicate};
use crate::quantifier::CaptureQuantifier;
use crate::regex::CompiledRegex;
use crate::{CaptureId, RegexId};

/// The compiled predicates of a single pattern, grouped by kind.
///
/// Only `text_predicates` participate in match-time filtering. The other three
/// lists are structural metadata handed to the caller verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternPredicates {
    pub text_predicates: Vec<TextPredicate>,
    pub property_settings: Vec<QueryProperty>,
    pub property_predicates: Vec<PropertyPredicate>,
    pub general_predicates: Vec<GeneralPredicate>,
}

/// Raw ingredients for a [`CompiledQuery`], produced by the compiler.
///
/// All tables are indexed positionally: `patterns[i]` belongs to pattern `i`,
/// `capture_quantifiers[i][c]` is the quantifier of capture `c` in pattern `i`,
/// and regex ids in text predicates index `regexes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParts {
    pub capture_names: Vec<String>,
    pub capture_quantifiers: Vec<Vec<CaptureQuantifier>>,
    pub pattern_start_bytes: Vec<usize>,
    pub patterns: Vec<PatternPredicates>,
    pub regexes: Vec<CompiledRegex>,
}

/// An immutable compiled query.
///
/// Construction goes through [`CompiledQuery::from_parts`]; there is no way to
/// mutate the tables afterwards. The artifact is `Send + Sync` and is shared by
/// reference across streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    capture_names: Vec<String>,
    capture_quantifiers: Vec<Vec<CaptureQuantifier>>,
    pattern_start_bytes: Vec<usize>,
    patterns: Vec<PatternPredicates>,
    regexes: Vec<CompiledRegex>,
}

impl CompiledQuery {
    /// Seal compiler output into the immutable artifact.
    pub fn from_parts(parts: QueryParts) -> Self {
        Self {
            capture_names: parts.capture_names,
            capture_quantifiers: parts.capture_quantifiers,
            pattern_start_bytes: parts.pattern_start_bytes,
            patterns: parts.patterns,
            regexes: parts.regexes,
        }
    }

    /// Number of patterns in the query.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of distinct captures across all patterns.
    pub fn capture_count(&self) -> usize {
        self.capture_names.len()
    }

    /// Capture names, indexed by capture id.
    pub fn capture_names(&self) -> &[String] {
        &self.capture_names
    }

    /// Resolve a capture name to its id.
    pub fn capture_index_for_name(&self, name: &str) -> Option<CaptureId> {
        self.capture_names
            .iter()
            .position(|n| n == name)
            .map(|i| i as CaptureId)
    }

    /// Quantifiers for every capture of one pattern, indexed by capture id.
    pub fn capture_quantifiers(&self, pattern_index: usize) -> &[CaptureQuantifier] {
        &self.capture_quantifiers[pattern_index]
    }

    /// Quantifier of one capture within one pattern.
    pub fn capture_quantifier(
        &self,
        pattern_index: usize,
        capture_index: CaptureId,
    ) -> CaptureQuantifier {
        self.capture_quantifiers[pattern_index][capture_index as usize]
    }

    /// Byte offset where the pattern begins in the query source.
    pub fn start_byte_for_pattern(&self, pattern_index: usize) -> usize {
        self.pattern_start_bytes[pattern_index]
    }

    /// Text predicates of one pattern, in source order.
    pub fn text_predicates(&self, pattern_index: usize) -> &[TextPredicate] {
        &self.patterns[pattern_index].text_predicates
    }

    /// `set!` properties of one pattern.
    pub fn property_settings(&self, pattern_index: usize) -> &[QueryProperty] {
        &self.patterns[pattern_index].property_settings
    }

    /// `is?` / `is-not?` properties of one pattern.
    pub fn property_predicates(&self, pattern_index: usize) -> &[PropertyPredicate] {
        &self.patterns[pattern_index].property_predicates
    }

    /// Catch-all predicates of one pattern.
    pub fn general_predicates(&self, pattern_index: usize) -> &[GeneralPredicate] {
        &self.patterns[pattern_index].general_predicates
    }

    /// Look up an interned regex by id.
    pub fn regex(&self, id: RegexId) -> &CompiledRegex {
        &self.regexes[id as usize]
    }

    /// The interned regex table.
    pub fn regexes(&self) -> &[CompiledRegex] {
        &self.regexes
    }

    /// Render the query tables as text. See [`crate::dump`].
    pub fn dump(&self) -> String {
        crate::dump::dump(self)
    }
}
