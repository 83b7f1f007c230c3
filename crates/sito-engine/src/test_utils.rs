//! Scripted matcher and span nodes for engine tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

use sito_compiler::regex::RegexInterner;
use sito_compiler::{PatternSetData, RawPattern};
use sito_core::{
    CaptureId, CaptureQuantifier, CompiledQuery, CompiledRegex, PatternPredicates, PredicateStep,
    QueryParts, TextPredicate,
};

use crate::source::{MatchId, MatchSource, QueryCapture, QueryMatch, SyntaxNode};

/// A node that is nothing but a byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanNode(pub Range<usize>);

impl SyntaxNode for SpanNode {
    fn byte_range(&self) -> Range<usize> {
        self.0.clone()
    }
}

/// Build a candidate match over span nodes.
pub fn candidate(
    id: MatchId,
    pattern_index: usize,
    captures: &[(CaptureId, Range<usize>)],
) -> QueryMatch<SpanNode> {
    QueryMatch {
        id,
        pattern_index,
        captures: captures
            .iter()
            .map(|(index, range)| QueryCapture {
                index: *index,
                node: SpanNode(range.clone()),
            })
            .collect(),
    }
}

/// Single-pattern query assembled directly from predicate IR.
pub fn query_with(
    capture_names: &[&str],
    regexes: &[&str],
    text_predicates: Vec<TextPredicate>,
) -> CompiledQuery {
    CompiledQuery::from_parts(QueryParts {
        capture_names: capture_names.iter().map(|name| name.to_string()).collect(),
        capture_quantifiers: vec![vec![CaptureQuantifier::One; capture_names.len()]],
        pattern_start_bytes: vec![0],
        patterns: vec![PatternPredicates {
            text_predicates,
            ..Default::default()
        }],
        regexes: compiled_regexes(regexes),
    })
}

fn compiled_regexes(patterns: &[&str]) -> Vec<CompiledRegex> {
    let mut interner = RegexInterner::new();
    for pattern in patterns {
        interner.intern(pattern).unwrap();
    }
    interner.into_table()
}

/// Single-pattern query run through the real compiler from raw steps.
pub fn compiled_from_steps(
    capture_names: &[&str],
    string_literals: &[&str],
    steps: Vec<PredicateStep>,
) -> CompiledQuery {
    let set = PatternSetData {
        capture_names: capture_names.iter().map(|name| name.to_string()).collect(),
        string_literals: string_literals.iter().map(|lit| lit.to_string()).collect(),
        patterns: vec![RawPattern {
            start_byte: 0,
            steps,
            quantifiers: vec![CaptureQuantifier::One; capture_names.len()],
        }],
    };
    sito_compiler::compile(&set, "").unwrap()
}

/// What the scripted matcher observed.
#[derive(Debug, Default)]
pub struct MatcherLog {
    pub removed: Vec<MatchId>,
    pub polls: u32,
}

/// A matcher that replays a scripted sequence of candidates.
#[derive(Default)]
pub struct ScriptedMatcher {
    matches: VecDeque<QueryMatch<SpanNode>>,
    captures: VecDeque<(QueryMatch<SpanNode>, usize)>,
    limit_exceeded: bool,
    log: Rc<RefCell<MatcherLog>>,
}

impl ScriptedMatcher {
    pub fn from_matches(matches: impl IntoIterator<Item = QueryMatch<SpanNode>>) -> Self {
        Self {
            matches: matches.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn from_captures(
        captures: impl IntoIterator<Item = (QueryMatch<SpanNode>, usize)>,
    ) -> Self {
        Self {
            captures: captures.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_limit_exceeded(mut self) -> Self {
        self.limit_exceeded = true;
        self
    }

    /// Shared handle to the observation log; survives moving the matcher
    /// into a stream.
    pub fn log(&self) -> Rc<RefCell<MatcherLog>> {
        Rc::clone(&self.log)
    }
}

impl MatchSource for ScriptedMatcher {
    type Node = SpanNode;

    fn next_match(&mut self) -> Option<QueryMatch<SpanNode>> {
        self.log.borrow_mut().polls += 1;
        self.matches.pop_front()
    }

    fn next_capture(&mut self) -> Option<(QueryMatch<SpanNode>, usize)> {
        self.log.borrow_mut().polls += 1;
        self.captures.pop_front()
    }

    fn remove_match(&mut self, id: MatchId) {
        self.log.borrow_mut().removed.push(id);
    }

    fn did_exceed_match_limit(&self) -> bool {
        self.limit_exceeded
    }
}
