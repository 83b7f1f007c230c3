//! Raw predicate steps.
//!
//! The external pattern compiler exposes the predicates of a pattern as one
//! flat step array. `Done` steps are sentinels: everything between two
//! sentinels is a single predicate, and the first step of each predicate is a
//! `String` naming the operator. The sentinel encoding is dissolved at the
//! compiler boundary; nothing downstream of `sito-compiler` sees raw steps.

use serde::{Deserialize, Serialize};

use crate::{CaptureId, LiteralId};

/// One step of the flat predicate encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateStep {
    /// Sentinel ending the current predicate.
    Done,
    /// Reference to a capture; the id resolves through the capture-name table.
    Capture(CaptureId),
    /// Reference to a string literal; the id resolves through the literal table.
    String(LiteralId),
}

impl PredicateStep {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_capture(self) -> bool {
        matches!(self, Self::Capture(_))
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::String(_))
    }
}
