//! Locatable compilation errors.
//!
//! Every error carries a byte offset into the query source and the
//! corresponding (row, column). `Display` prints positions 1-based;
//! [`QueryError::render`] draws the error against the source text.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

/// A zero-based source position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

/// Broad classification of a [`QueryError`].
///
/// The non-`Predicate` kinds are produced by external collaborators (the
/// structural compiler, the language handshake) and are marshalled through
/// [`QueryError::external`] so callers deal with one error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    Syntax,
    UnknownNodeType,
    UnknownField,
    UnknownCapture,
    /// Malformed handoff data: ids out of table bounds, missing sentinels.
    Structure,
    LanguageVersionMismatch,
    Predicate(PredicateErrorKind),
}

/// What went wrong inside a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateErrorKind {
    ArgCountMismatch,
    ArgKindMismatch,
    /// A predicate's first step was not a string literal.
    MustBeginWithLiteral,
    InvalidRegex,
    /// Unknown operator and the catch-all handler is disabled.
    UnregisteredHandlerMissing,
}

/// A query compilation error with source location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}:{}", .point.row + 1, .point.column + 1)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
    /// Byte offset into the query source.
    pub offset: usize,
    /// Zero-based position of `offset`.
    pub point: Point,
}

impl QueryError {
    /// Build an error from raw parts. The caller supplies a precomputed point.
    pub fn at(
        kind: QueryErrorKind,
        message: impl Into<String>,
        offset: usize,
        point: Point,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            offset,
            point,
        }
    }

    /// Build a predicate error at a precomputed point.
    pub fn predicate(
        kind: PredicateErrorKind,
        message: impl Into<String>,
        offset: usize,
        point: Point,
    ) -> Self {
        Self::at(QueryErrorKind::Predicate(kind), message, offset, point)
    }

    /// Marshal an external collaborator failure, deriving (row, column)
    /// from a byte offset into `source`.
    pub fn external(
        kind: QueryErrorKind,
        message: impl Into<String>,
        source: &str,
        offset: usize,
    ) -> Self {
        Self::at(kind, message, offset, Self::point_at(source, offset))
    }

    /// Compute the zero-based (row, column) of a byte offset.
    pub fn point_at(source: &str, offset: usize) -> Point {
        let offset = offset.min(source.len());
        let prefix = &source.as_bytes()[..offset];
        let row = prefix.iter().filter(|&&b| b == b'\n').count();
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        Point {
            row,
            column: offset - line_start,
        }
    }

    /// Render the error against the query source.
    pub fn render(&self, source: &str, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let start = self.offset.min(source.len());
        let end = (start + 1).min(source.len());
        let snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end).label(&self.message));

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&self.message).element(snippet)];
        renderer.render(&report)
    }
}
