//! Text-predicate evaluation against candidate matches.

use sito_core::{BindingPolicy, CaptureId, CompiledQuery, TextPredicate};

use crate::source::{QueryMatch, SyntaxNode};

/// Evaluates the text predicates of a compiled query against candidates.
///
/// Holds two borrows and no other state, so one evaluator serves any number
/// of matches. Evaluation is pure: no mutation, no I/O, and no failure mode.
/// Anything that could go wrong (bad arity, malformed regex) was rejected
/// when the query was compiled.
pub struct PredicateEvaluator<'q> {
    query: &'q CompiledQuery,
    source: &'q [u8],
}

impl<'q> PredicateEvaluator<'q> {
    /// `source` is the haystack every node's `byte_range` indexes into.
    pub fn new(query: &'q CompiledQuery, source: &'q [u8]) -> Self {
        Self { query, source }
    }

    /// True when every text predicate of the candidate's pattern holds.
    /// Stops at the first predicate that fails.
    pub fn satisfies<N: SyntaxNode>(&self, candidate: &QueryMatch<N>) -> bool {
        self.query
            .text_predicates(candidate.pattern_index)
            .iter()
            .all(|predicate| self.holds(predicate, candidate))
    }

    fn holds<N: SyntaxNode>(&self, predicate: &TextPredicate, candidate: &QueryMatch<N>) -> bool {
        match predicate {
            TextPredicate::CaptureEqCapture {
                left,
                right,
                positive,
                policy,
            } => {
                let lefts = self.texts(candidate, *left);
                let rights = self.texts(candidate, *right);
                // Bindings pair up positionally. An unpaired binding can
                // never satisfy RequireAll, while RequireAny only needs one
                // agreeing pair.
                if *policy == BindingPolicy::RequireAll && lefts.len() != rights.len() {
                    return false;
                }
                policy.reduce(
                    lefts
                        .iter()
                        .zip(&rights)
                        .map(|(a, b)| (a == b) == *positive),
                )
            }
            TextPredicate::CaptureEqLiteral {
                capture,
                literal,
                positive,
                policy,
            } => policy.reduce(
                self.texts(candidate, *capture)
                    .into_iter()
                    .map(|text| (text == literal.as_bytes()) == *positive),
            ),
            TextPredicate::CaptureMatchesRegex {
                capture,
                regex,
                positive,
                policy,
            } => {
                let regex = self.query.regex(*regex);
                policy.reduce(
                    self.texts(candidate, *capture)
                        .into_iter()
                        .map(|text| regex.is_match(text) == *positive),
                )
            }
            TextPredicate::CaptureInLiteralSet {
                capture,
                set,
                positive,
            } => BindingPolicy::RequireAll.reduce(
                self.texts(candidate, *capture)
                    .into_iter()
                    .map(|text| set.iter().any(|member| member.as_bytes() == text) == *positive),
            ),
        }
    }

    /// The text of every node bound to `capture`, in capture order.
    fn texts<N: SyntaxNode>(&self, candidate: &QueryMatch<N>, capture: CaptureId) -> Vec<&'q [u8]> {
        candidate
            .nodes_for_capture_index(capture)
            .map(|node| &self.source[node.byte_range()])
            .collect()
    }
}
