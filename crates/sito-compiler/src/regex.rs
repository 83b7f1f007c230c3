//! Regex compilation and interning.
//!
//! Patterns are compiled once, at query-compile time, to sparse DFAs. The
//! interner dedups by pattern text so repeated predicates share one DFA and
//! equal queries produce identical regex tables.

use regex_automata::dfa::dense;
use regex_syntax::ast;

use sito_core::{CompiledRegex, RegexId};

/// Builds the query's regex table.
#[derive(Debug, Default)]
pub struct RegexInterner {
    regexes: Vec<CompiledRegex>,
}

impl RegexInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `pattern`, compiling it if unseen.
    ///
    /// On failure returns a one-line reason; the caller attaches the source
    /// location.
    pub fn intern(&mut self, pattern: &str) -> Result<RegexId, String> {
        if let Some(pos) = self.regexes.iter().position(|r| r.pattern() == pattern) {
            return Ok(pos as RegexId);
        }

        // Parse with octal disabled so \1-\9 are rejected as backreferences,
        // with a precise reason, before the DFA builder sees the pattern.
        ast::parse::ParserBuilder::new()
            .octal(false)
            .build()
            .parse(pattern)
            .map_err(|e| e.kind().to_string())?;

        // Compile to dense DFA first, then convert to sparse
        let dense = dense::DFA::builder()
            .configure(
                dense::DFA::config()
                    .start_kind(regex_automata::dfa::StartKind::Unanchored)
                    .minimize(true),
            )
            .build(pattern)
            .map_err(|e| e.to_string())?;

        let sparse = dense.to_sparse().map_err(|e| e.to_string())?;

        let id = self.regexes.len() as RegexId;
        self.regexes.push(CompiledRegex::new(pattern, sparse));
        Ok(id)
    }

    /// Number of interned regexes.
    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    /// Finish, yielding the regex table in interning order.
    pub fn into_table(self) -> Vec<CompiledRegex> {
        self.regexes
    }
}
