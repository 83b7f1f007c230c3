//! Capture quantifiers.
//!
//! Quantifiers describe how many nodes may bind to one capture within a single
//! pattern. They are computed by the external pattern compiler and copied into
//! the [`CompiledQuery`](crate::CompiledQuery) quantifier table at compile time.

use serde::{Deserialize, Serialize};

/// Multiplicity of a capture within one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureQuantifier {
    /// The capture does not occur in this pattern (e.g. it is only referenced
    /// by a predicate).
    Zero,
    /// `?` - zero or one node.
    ZeroOrOne,
    /// `*` - zero or more nodes.
    ZeroOrMore,
    /// Exactly one node.
    One,
    /// `+` - one or more nodes.
    OneOrMore,
}

impl CaptureQuantifier {
    /// Whether a match can legally contain no node for this capture.
    pub fn may_be_absent(self) -> bool {
        matches!(self, Self::Zero | Self::ZeroOrOne | Self::ZeroOrMore)
    }

    /// Whether more than one node can bind to this capture.
    ///
    /// Multi-binding captures are the reason `any-` predicate variants exist.
    pub fn may_repeat(self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    /// Short symbol used in dumps.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::ZeroOrOne => "?",
            Self::ZeroOrMore => "*",
            Self::One => "1",
            Self::OneOrMore => "+",
        }
    }
}
