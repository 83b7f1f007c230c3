//! Precompiled regex predicates.
//!
//! Regexes are compiled to sparse DFAs when the query is compiled; match-time
//! evaluation is a plain forward DFA search over node text. This crate only
//! searches (`dfa-search`); building the DFA is the compiler's job.

use regex_automata::Input;
use regex_automata::dfa::Automaton;
use regex_automata::dfa::sparse::DFA;

/// A regex pattern compiled for match-time search.
///
/// Equality keys on the pattern string: the DFA is a deterministic function
/// of it, and comparing serialized automata would be both expensive and
/// meaningless.
#[derive(Clone)]
pub struct CompiledRegex {
    pattern: String,
    dfa: DFA<Vec<u8>>,
}

impl CompiledRegex {
    /// Wrap a DFA built from `pattern`.
    pub fn new(pattern: impl Into<String>, dfa: DFA<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
            dfa,
        }
    }

    /// The original pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Unanchored search: does the pattern match anywhere in `haystack`?
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        let input = Input::new(haystack);
        // Search is infallible for the DFAs we build: no quit bytes are
        // configured, and unicode word boundaries are rejected at build time.
        self.dfa
            .try_search_fwd(&input)
            .expect("DFA search failed")
            .is_some()
    }
}

impl PartialEq for CompiledRegex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for CompiledRegex {}

impl std::fmt::Debug for CompiledRegex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CompiledRegex").field(&self.pattern).finish()
    }
}
