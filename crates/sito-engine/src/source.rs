//! Collaborator traits and the candidate-match data model.

use std::ops::Range;

use serde::Serialize;

use sito_core::CaptureId;

/// Identifier the external matcher assigns to a candidate match. Stable for
/// the lifetime of the match inside the matcher's pending storage.
pub type MatchId = u32;

/// A node handle produced by the external matcher.
///
/// The engine needs nothing from a node beyond the span of its text. Ranges
/// index the haystack handed to [`crate::PredicateEvaluator::new`].
pub trait SyntaxNode {
    fn byte_range(&self) -> Range<usize>;
}

/// One node bound to a capture index within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryCapture<N> {
    pub index: CaptureId,
    pub node: N,
}

/// A candidate structural match proposed by the external matcher.
///
/// Candidates arrive before text predicates have been checked. A quantified
/// capture may bind several nodes, so `captures` can repeat an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryMatch<N> {
    pub id: MatchId,
    pub pattern_index: usize,
    pub captures: Vec<QueryCapture<N>>,
}

impl<N> QueryMatch<N> {
    /// All nodes bound to one capture index, in capture order.
    pub fn nodes_for_capture_index(&self, index: CaptureId) -> impl Iterator<Item = &N> {
        self.captures
            .iter()
            .filter(move |capture| capture.index == index)
            .map(|capture| &capture.node)
    }
}

/// The structural matcher the engine pulls candidates from.
///
/// The matcher owns bounded pending-match storage. `remove_match` is how the
/// engine hands a rejected candidate's slot back; the matcher must not
/// produce further events for a removed match.
pub trait MatchSource {
    type Node: SyntaxNode;

    /// The next whole candidate match, or `None` when the matcher is done.
    fn next_match(&mut self) -> Option<QueryMatch<Self::Node>>;

    /// The next capture event: the enclosing candidate plus the position of
    /// the capture within it.
    fn next_capture(&mut self) -> Option<(QueryMatch<Self::Node>, usize)>;

    /// Reclaim the pending-storage slot of a rejected candidate.
    fn remove_match(&mut self, id: MatchId);

    /// True when the matcher dropped candidates because its pending storage
    /// overflowed.
    fn did_exceed_match_limit(&self) -> bool {
        false
    }
}
