//! Operator-name to handler dispatch.
//!
//! The registry maps each operator to a [`PredicateHandler`] strategy.
//! Builtins cover the `eq?`, `match?`, `any-of?`, `set!` and `is?` families;
//! everything else falls to a catch-all that compiles the predicate verbatim
//! into a [`GeneralPredicate`]. Callers may register additional operators or
//! disable the catch-all, in which case unknown operators fail compilation.

use indexmap::IndexMap;

use sito_core::{
    BindingPolicy, CaptureId, GeneralPredicate, LiteralId, PredicateStep, PropertyPredicate,
    QueryProperty, RegexId, TextPredicate,
};

use crate::arity::Arity;
use crate::error::{Point, PredicateErrorKind, QueryError};
use crate::handlers;
use crate::pattern_set::PatternSet;
use crate::regex::RegexInterner;

/// A handler's verdict on one predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPredicate {
    /// Evaluated by the engine at match time.
    Text(TextPredicate),
    /// A `set!` property, carried structurally.
    Setting(QueryProperty),
    /// An `is?` / `is-not?` assertion, carried structurally.
    Property(PropertyPredicate),
    /// Catch-all: operator and args preserved verbatim.
    General(GeneralPredicate),
}

/// Validates and compiles one predicate.
pub type PredicateHandler =
    fn(&mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError>;

/// Everything a handler sees while compiling one predicate.
///
/// Arguments are the steps after the operator name, sentinel excluded. The
/// context resolves ids through the pattern set, interns regexes, and builds
/// errors located at the enclosing pattern.
pub struct PredicateContext<'a> {
    op: &'a str,
    args: &'a [PredicateStep],
    set: &'a dyn PatternSet,
    regexes: &'a mut RegexInterner,
    offset: usize,
    point: Point,
}

impl<'a> PredicateContext<'a> {
    pub(crate) fn new(
        op: &'a str,
        args: &'a [PredicateStep],
        set: &'a dyn PatternSet,
        regexes: &'a mut RegexInterner,
        offset: usize,
        point: Point,
    ) -> Self {
        Self {
            op,
            args,
            set,
            regexes,
            offset,
            point,
        }
    }

    /// Operator name, without the `#` sigil.
    pub fn operator(&self) -> &'a str {
        self.op
    }

    /// Argument steps, operator excluded.
    pub fn args(&self) -> &'a [PredicateStep] {
        self.args
    }

    /// `false` for `not-` spellings.
    pub fn is_positive(&self) -> bool {
        !self.op.contains("not-")
    }

    /// `RequireAny` for `any-` spellings, `RequireAll` otherwise.
    pub fn binding_policy(&self) -> BindingPolicy {
        if self.op.starts_with("any-") {
            BindingPolicy::RequireAny
        } else {
            BindingPolicy::RequireAll
        }
    }

    /// Fail with `ArgCountMismatch` unless the argument count is admitted.
    pub fn check_arity(&self, arity: Arity) -> Result<(), QueryError> {
        let count = self.args.len();
        if arity.admits(count) {
            return Ok(());
        }
        let noun = if arity == Arity::Exactly(1) {
            "argument"
        } else {
            "arguments"
        };
        Err(self.error(
            PredicateErrorKind::ArgCountMismatch,
            format!("#{} expects {arity} {noun}, got {count}", self.op),
        ))
    }

    /// The argument at `index`, which must be a capture.
    pub fn capture_arg(&self, index: usize) -> Result<CaptureId, QueryError> {
        match self.args[index] {
            PredicateStep::Capture(id) => Ok(id),
            _ => Err(self.error(
                PredicateErrorKind::ArgKindMismatch,
                format!("{} to #{} must be a capture", arg_label(index), self.op),
            )),
        }
    }

    /// The argument at `index`, which must be a string literal.
    pub fn literal_arg(&self, index: usize) -> Result<&'a str, QueryError> {
        match self.args[index] {
            PredicateStep::String(id) => Ok(self.set.string_literal(id)),
            _ => Err(self.error(
                PredicateErrorKind::ArgKindMismatch,
                format!(
                    "{} to #{} must be a string literal, not a capture",
                    arg_label(index),
                    self.op
                ),
            )),
        }
    }

    /// Resolve a literal id.
    pub fn literal(&self, id: LiteralId) -> &'a str {
        self.set.string_literal(id)
    }

    /// Resolve a capture id to its name.
    pub fn capture_name(&self, id: CaptureId) -> &'a str {
        self.set.capture_name(id)
    }

    /// Intern a regex, failing with `InvalidRegex` on malformed patterns.
    pub fn intern_regex(&mut self, pattern: &str) -> Result<RegexId, QueryError> {
        self.regexes.intern(pattern).map_err(|reason| {
            self.error(
                PredicateErrorKind::InvalidRegex,
                format!("invalid regex {pattern:?}: {reason}"),
            )
        })
    }

    /// Build an error located at the enclosing pattern.
    pub fn error(&self, kind: PredicateErrorKind, message: impl Into<String>) -> QueryError {
        QueryError::predicate(kind, message, self.offset, self.point)
    }
}

fn arg_label(index: usize) -> String {
    match index {
        0 => "first argument".to_string(),
        1 => "second argument".to_string(),
        2 => "third argument".to_string(),
        _ => format!("argument {}", index + 1),
    }
}

/// The operator table.
pub struct PredicateRegistry {
    handlers: IndexMap<String, PredicateHandler>,
    catch_all: Option<PredicateHandler>,
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        let mut registry = Self {
            handlers: IndexMap::new(),
            catch_all: Some(handlers::general),
        };
        for op in ["eq?", "not-eq?", "any-eq?", "any-not-eq?"] {
            registry.register(op, handlers::eq);
        }
        for op in ["match?", "not-match?", "any-match?", "any-not-match?"] {
            registry.register(op, handlers::matches);
        }
        for op in ["any-of?", "not-any-of?"] {
            registry.register(op, handlers::any_of);
        }
        registry.register("set!", handlers::set);
        registry.register("is?", handlers::is);
        registry.register("is-not?", handlers::is);
        registry
    }
}

impl PredicateRegistry {
    /// The builtin operator table with the catch-all enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override an operator.
    pub fn register(&mut self, name: impl Into<String>, handler: PredicateHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Disable the catch-all: unknown operators become compile errors.
    pub fn without_catch_all(mut self) -> Self {
        self.catch_all = None;
        self
    }

    /// Handler for `name`, falling back to the catch-all if registered.
    pub fn resolve(&self, name: &str) -> Option<PredicateHandler> {
        self.handlers.get(name).copied().or(self.catch_all)
    }

    /// Registered operator names, in registration order.
    pub fn operator_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}
