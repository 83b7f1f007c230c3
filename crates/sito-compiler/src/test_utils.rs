//! Test fixture: a tiny s-expression reader for query sources.
//!
//! Tests write queries in the familiar surface syntax; this module lexes them
//! and produces the flat [`PatternSetData`] handoff the compiler consumes, the
//! same shape the structural compiler would hand over. It is a fixture, not a
//! parser: it tracks just enough structure for capture ids, quantifiers,
//! pattern start offsets, and predicate steps.

use std::collections::HashMap;

use logos::Logos;

use sito_core::{CaptureQuantifier, CompiledQuery, PredicateStep};

use crate::error::QueryError;
use crate::pattern_set::{PatternSetData, RawPattern};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r";[^\n]*", allow_greedy = true))]
enum Tok {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// `@name` capture reference.
    #[regex(r"@[A-Za-z_][A-Za-z0-9_.\-]*")]
    Capture,

    /// `#op?` / `#op!` predicate operator.
    #[regex(r"#[A-Za-z_][A-Za-z0-9_.\-]*[?!]?")]
    Pred,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    /// Node names, field names, bare predicate args.
    #[regex(r"[A-Za-z_][A-Za-z0-9_.\-]*")]
    Word,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("?")]
    Quest,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,
}

struct Token<'s> {
    kind: Tok,
    text: &'s str,
    start: usize,
}

fn lex(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = Tok::lexer(source);
    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or_else(|()| panic!("fixture failed to lex at {:?}", lexer.span()));
        tokens.push(Token {
            kind,
            text: lexer.slice(),
            start: lexer.span().start,
        });
    }
    tokens
}

fn intern(table: &mut Vec<String>, text: &str) -> u32 {
    if let Some(pos) = table.iter().position(|entry| entry == text) {
        return pos as u32;
    }
    table.push(text.to_string());
    (table.len() - 1) as u32
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Read fixture source into the flat handoff form.
///
/// Every top-level s-expression is one pattern. Captures are numbered in
/// first-appearance order across the whole source; a `?`/`*`/`+` right before
/// `@name` becomes that capture's quantifier, captures appearing only inside
/// predicates get `Zero`.
pub fn pattern_set(source: &str) -> PatternSetData {
    let tokens = lex(source);

    let mut capture_names: Vec<String> = Vec::new();
    let mut string_literals: Vec<String> = Vec::new();
    let mut starts: Vec<usize> = Vec::new();
    let mut step_lists: Vec<Vec<PredicateStep>> = Vec::new();
    let mut rows: Vec<HashMap<u32, CaptureQuantifier>> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        assert!(
            tokens[i].kind == Tok::LParen,
            "patterns must start with '(', found {:?}",
            tokens[i].text
        );
        starts.push(tokens[i].start);

        let mut depth = 0usize;
        let mut steps = Vec::new();
        let mut row: HashMap<u32, CaptureQuantifier> = HashMap::new();
        let mut pending: Option<CaptureQuantifier> = None;
        let mut pred_depth: Option<usize> = None;

        loop {
            let tok = &tokens[i];
            match tok.kind {
                Tok::LParen => {
                    depth += 1;
                    if pred_depth.is_none()
                        && tokens.get(i + 1).map(|t| t.kind) == Some(Tok::Pred)
                    {
                        pred_depth = Some(depth);
                    }
                    pending = None;
                }
                Tok::RParen => {
                    if pred_depth == Some(depth) {
                        steps.push(PredicateStep::Done);
                        pred_depth = None;
                    }
                    depth -= 1;
                    if depth == 0 {
                        i += 1;
                        break;
                    }
                }
                Tok::Pred => {
                    let op = tok.text.trim_start_matches('#');
                    steps.push(PredicateStep::String(intern(&mut string_literals, op)));
                }
                Tok::Capture => {
                    let id = intern(&mut capture_names, &tok.text[1..]);
                    if pred_depth.is_some() {
                        steps.push(PredicateStep::Capture(id));
                    } else {
                        row.insert(id, pending.take().unwrap_or(CaptureQuantifier::One));
                    }
                }
                Tok::Str => {
                    if pred_depth.is_some() {
                        let text = unescape(tok.text);
                        steps.push(PredicateStep::String(intern(&mut string_literals, &text)));
                    }
                    pending = None;
                }
                Tok::Word => {
                    if pred_depth.is_some() {
                        steps.push(PredicateStep::String(intern(&mut string_literals, tok.text)));
                    }
                    pending = None;
                }
                Tok::Quest => pending = Some(CaptureQuantifier::ZeroOrOne),
                Tok::Star => pending = Some(CaptureQuantifier::ZeroOrMore),
                Tok::Plus => pending = Some(CaptureQuantifier::OneOrMore),
                Tok::Colon | Tok::Dot => pending = None,
            }
            i += 1;
        }

        step_lists.push(steps);
        rows.push(row);
    }

    let patterns = starts
        .into_iter()
        .zip(step_lists)
        .zip(rows)
        .map(|((start_byte, steps), row)| RawPattern {
            start_byte,
            steps,
            quantifiers: (0..capture_names.len())
                .map(|id| {
                    row.get(&(id as u32))
                        .copied()
                        .unwrap_or(CaptureQuantifier::Zero)
                })
                .collect(),
        })
        .collect();

    PatternSetData {
        capture_names,
        string_literals,
        patterns,
    }
}

/// Compile fixture source with the builtin operator table.
pub fn compile_str(source: &str) -> Result<CompiledQuery, QueryError> {
    let set = pattern_set(source);
    crate::compile(&set, source)
}

/// Compile source that must succeed; returns the query.
pub fn expect_query(source: &str) -> CompiledQuery {
    match compile_str(source) {
        Ok(query) => query,
        Err(err) => panic!("expected valid query, got: {err}"),
    }
}

/// Compile source that must succeed; returns its dump.
pub fn expect_dump(source: &str) -> String {
    expect_query(source).dump()
}

/// Compile source that must fail; returns the error display.
pub fn expect_error(source: &str) -> String {
    match compile_str(source) {
        Ok(_) => panic!("expected compile error, got a valid query"),
        Err(err) => err.to_string(),
    }
}
