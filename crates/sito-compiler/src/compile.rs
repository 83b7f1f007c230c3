//! The compilation driver.
//!
//! Walks every pattern's step array once, splits it into predicates at the
//! `Done` sentinels, dispatches each predicate through the registry, and
//! seals the result into a [`CompiledQuery`]. Compilation is all-or-nothing:
//! the first error aborts and no partial query escapes.

use sito_core::{CompiledQuery, PatternPredicates, PredicateStep, QueryParts};

use crate::error::{PredicateErrorKind, QueryError, QueryErrorKind};
use crate::pattern_set::PatternSet;
use crate::regex::RegexInterner;
use crate::registry::{CompiledPredicate, PredicateContext, PredicateRegistry};

/// Compiles pattern-set predicates into a [`CompiledQuery`].
#[derive(Default)]
pub struct QueryCompiler {
    registry: PredicateRegistry,
}

impl QueryCompiler {
    /// A compiler with the builtin operator table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler with a caller-supplied operator table.
    pub fn with_registry(registry: PredicateRegistry) -> Self {
        Self { registry }
    }

    /// The operator table, for registering custom operators.
    pub fn registry_mut(&mut self) -> &mut PredicateRegistry {
        &mut self.registry
    }

    /// Compile the predicates of `set` against the query `source` text.
    ///
    /// `source` is only read for error positions; predicates reference it
    /// through the set's tables.
    pub fn compile(
        &self,
        set: &dyn PatternSet,
        source: &str,
    ) -> Result<CompiledQuery, QueryError> {
        validate_handoff(set, source)?;

        let capture_names: Vec<String> = (0..set.capture_count())
            .map(|id| set.capture_name(id as u32).to_string())
            .collect();

        let mut interner = RegexInterner::new();
        let mut capture_quantifiers = Vec::with_capacity(set.pattern_count());
        let mut pattern_start_bytes = Vec::with_capacity(set.pattern_count());
        let mut patterns = Vec::with_capacity(set.pattern_count());

        for pattern_index in 0..set.pattern_count() {
            let offset = set.start_byte_for_pattern(pattern_index);
            patterns.push(compile_pattern(
                set,
                &self.registry,
                &mut interner,
                pattern_index,
                source,
            )?);
            pattern_start_bytes.push(offset);
            capture_quantifiers.push(
                (0..set.capture_count())
                    .map(|id| set.capture_quantifier(pattern_index, id as u32))
                    .collect(),
            );
        }

        Ok(CompiledQuery::from_parts(QueryParts {
            capture_names,
            capture_quantifiers,
            pattern_start_bytes,
            patterns,
            regexes: interner.into_table(),
        }))
    }
}

/// Compile with the builtin operator table.
pub fn compile(set: &dyn PatternSet, source: &str) -> Result<CompiledQuery, QueryError> {
    QueryCompiler::new().compile(set, source)
}

fn compile_pattern(
    set: &dyn PatternSet,
    registry: &PredicateRegistry,
    interner: &mut RegexInterner,
    pattern_index: usize,
    source: &str,
) -> Result<PatternPredicates, QueryError> {
    let offset = set.start_byte_for_pattern(pattern_index);
    let point = QueryError::point_at(source, offset);
    let mut out = PatternPredicates::default();

    // One linear pass: sentinels dissolve here, nothing downstream sees them.
    for segment in set.predicate_steps(pattern_index).split(|step| step.is_done()) {
        if segment.is_empty() {
            continue;
        }

        let (op, args) = match segment[0] {
            PredicateStep::String(id) => (set.string_literal(id), &segment[1..]),
            _ => {
                return Err(QueryError::predicate(
                    PredicateErrorKind::MustBeginWithLiteral,
                    "predicate must begin with an operator name",
                    offset,
                    point,
                ));
            }
        };

        let handler = registry.resolve(op).ok_or_else(|| {
            QueryError::predicate(
                PredicateErrorKind::UnregisteredHandlerMissing,
                format!("unknown predicate operator #{op}"),
                offset,
                point,
            )
        })?;

        let mut ctx = PredicateContext::new(op, args, set, interner, offset, point);
        match handler(&mut ctx)? {
            CompiledPredicate::Text(predicate) => out.text_predicates.push(predicate),
            CompiledPredicate::Setting(property) => out.property_settings.push(property),
            CompiledPredicate::Property(predicate) => out.property_predicates.push(predicate),
            CompiledPredicate::General(predicate) => out.general_predicates.push(predicate),
        }
    }

    Ok(out)
}

/// Reject out-of-range ids before any handler dereferences them.
fn validate_handoff(set: &dyn PatternSet, source: &str) -> Result<(), QueryError> {
    let captures = set.capture_count();
    let strings = set.string_count();

    for pattern_index in 0..set.pattern_count() {
        for step in set.predicate_steps(pattern_index) {
            let problem = match *step {
                PredicateStep::Capture(id) => (id as usize >= captures)
                    .then(|| format!("capture id {id} out of range for {captures} captures")),
                PredicateStep::String(id) => (id as usize >= strings)
                    .then(|| format!("string id {id} out of range for {strings} literals")),
                PredicateStep::Done => None,
            };
            if let Some(message) = problem {
                return Err(QueryError::external(
                    QueryErrorKind::Structure,
                    message,
                    source,
                    set.start_byte_for_pattern(pattern_index),
                ));
            }
        }
    }
    Ok(())
}
