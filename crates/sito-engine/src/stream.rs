//! Pull-based streams of predicate-checked matches.

use sito_core::CompiledQuery;

use crate::eval::PredicateEvaluator;
use crate::source::{MatchSource, QueryMatch};

/// Streams the candidate matches that satisfy their pattern's predicates.
///
/// Candidates are pulled from the matcher one at a time, never ahead of the
/// consumer. A failing candidate is removed from the matcher's pending
/// storage, once, and skipped. After the matcher runs dry the stream stays
/// exhausted and never touches the matcher again.
pub struct MatchStream<'q, M: MatchSource> {
    evaluator: PredicateEvaluator<'q>,
    matcher: M,
    exhausted: bool,
}

impl<'q, M: MatchSource> MatchStream<'q, M> {
    pub fn new(query: &'q CompiledQuery, source: &'q [u8], matcher: M) -> Self {
        Self {
            evaluator: PredicateEvaluator::new(query, source),
            matcher,
            exhausted: false,
        }
    }

    /// True when the matcher dropped candidates because its pending storage
    /// overflowed. Survivors seen so far are unaffected.
    pub fn did_exceed_match_limit(&self) -> bool {
        self.matcher.did_exceed_match_limit()
    }
}

impl<M: MatchSource> Iterator for MatchStream<'_, M> {
    type Item = QueryMatch<M::Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        loop {
            let Some(candidate) = self.matcher.next_match() else {
                self.exhausted = true;
                return None;
            };
            if self.evaluator.satisfies(&candidate) {
                return Some(candidate);
            }
            self.matcher.remove_match(candidate.id);
        }
    }
}

/// Like [`MatchStream`], but yields one event per capture.
///
/// Each event pairs the enclosing match with the capture's position inside
/// it. Predicate failure removes the whole enclosing match; the matcher then
/// produces no further events for it.
pub struct CaptureStream<'q, M: MatchSource> {
    evaluator: PredicateEvaluator<'q>,
    matcher: M,
    exhausted: bool,
}

impl<'q, M: MatchSource> CaptureStream<'q, M> {
    pub fn new(query: &'q CompiledQuery, source: &'q [u8], matcher: M) -> Self {
        Self {
            evaluator: PredicateEvaluator::new(query, source),
            matcher,
            exhausted: false,
        }
    }

    /// True when the matcher dropped candidates because its pending storage
    /// overflowed.
    pub fn did_exceed_match_limit(&self) -> bool {
        self.matcher.did_exceed_match_limit()
    }
}

impl<M: MatchSource> Iterator for CaptureStream<'_, M> {
    type Item = (QueryMatch<M::Node>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        loop {
            let Some((candidate, capture_index)) = self.matcher.next_capture() else {
                self.exhausted = true;
                return None;
            };
            if self.evaluator.satisfies(&candidate) {
                return Some((candidate, capture_index));
            }
            self.matcher.remove_match(candidate.id);
        }
    }
}
