//! Compiled predicate IR.
//!
//! Text predicates are the only predicates the engine evaluates itself.
//! Properties and general predicates are carried structurally for the caller
//! to interpret (editor configuration, external state, custom operators).

use serde::Serialize;

use crate::{CaptureId, RegexId};

/// Reduction policy over the nodes bound to one capture.
///
/// A capture under a `*`/`+` quantifier can bind any number of nodes.
/// Plain operators (`eq?`, `match?`, ...) require every binding to satisfy
/// the test; `any-` operators require at least one. The zero-binding case
/// falls out of the reduction: all-of-nothing holds, any-of-nothing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BindingPolicy {
    /// Every bound node must satisfy the test (vacuously true for none).
    RequireAll,
    /// At least one bound node must satisfy the test (false for none).
    RequireAny,
}

impl BindingPolicy {
    /// Reduce per-binding outcomes to a single verdict.
    pub fn reduce<I>(self, outcomes: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        match self {
            Self::RequireAll => outcomes.into_iter().all(|ok| ok),
            Self::RequireAny => outcomes.into_iter().any(|ok| ok),
        }
    }
}

/// A compiled text predicate, evaluated by the engine at match time.
///
/// `positive` is false for `not-` operators. Regexes are referenced by id
/// into the query's regex table; they were compiled when the query was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TextPredicate {
    /// `eq?`-family with a capture on both sides: positionally paired
    /// bindings of `left` and `right` are compared by text.
    CaptureEqCapture {
        left: CaptureId,
        right: CaptureId,
        positive: bool,
        policy: BindingPolicy,
    },
    /// `eq?`-family against a literal string.
    CaptureEqLiteral {
        capture: CaptureId,
        literal: String,
        positive: bool,
        policy: BindingPolicy,
    },
    /// `match?`-family against a precompiled regex.
    CaptureMatchesRegex {
        capture: CaptureId,
        regex: RegexId,
        positive: bool,
        policy: BindingPolicy,
    },
    /// `any-of?`/`not-any-of?`: set membership over every bound node.
    CaptureInLiteralSet {
        capture: CaptureId,
        set: Vec<String>,
        positive: bool,
    },
}

impl TextPredicate {
    /// The capture whose bound nodes this predicate tests.
    pub fn primary_capture(&self) -> CaptureId {
        match *self {
            Self::CaptureEqCapture { left, .. } => left,
            Self::CaptureEqLiteral { capture, .. }
            | Self::CaptureMatchesRegex { capture, .. }
            | Self::CaptureInLiteralSet { capture, .. } => capture,
        }
    }
}

/// A key/value pair attached to a pattern by `set!`, `is?` or `is-not?`.
///
/// The engine assigns no meaning to properties; it only validates their shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryProperty {
    pub key: String,
    pub value: Option<String>,
    /// Capture the property is scoped to, if any.
    pub capture: Option<CaptureId>,
}

/// A property assertion from `is?` (positive) or `is-not?` (negative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyPredicate {
    pub property: QueryProperty,
    pub positive: bool,
}

/// One argument of a general predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PredicateArg {
    Capture(CaptureId),
    Literal(String),
}

/// A predicate whose operator the engine does not interpret.
///
/// Unrecognized operators compile into this form verbatim so callers can
/// attach their own semantics; they never fail compilation and are never
/// consulted during match filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralPredicate {
    pub operator: String,
    pub args: Vec<PredicateArg>,
}
