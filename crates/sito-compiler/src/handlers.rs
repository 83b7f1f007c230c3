//! Builtin predicate handlers.
//!
//! Each handler validates one predicate's shape and compiles it. Polarity and
//! binding policy derive from the operator spelling (`not-`, `any-`), so the
//! same handler serves a whole operator family and custom spellings registered
//! against these handlers stay consistent.

use sito_core::{
    GeneralPredicate, PredicateArg, PredicateStep, PropertyPredicate, QueryProperty, TextPredicate,
};

use crate::arity::Arity;
use crate::error::{PredicateErrorKind, QueryError};
use crate::registry::{CompiledPredicate, PredicateContext};

/// `eq?` family: capture against capture or literal.
pub fn eq(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    ctx.check_arity(Arity::Exactly(2))?;
    let capture = ctx.capture_arg(0)?;
    let positive = ctx.is_positive();
    let policy = ctx.binding_policy();

    let predicate = if let PredicateStep::Capture(right) = ctx.args()[1] {
        TextPredicate::CaptureEqCapture {
            left: capture,
            right,
            positive,
            policy,
        }
    } else {
        TextPredicate::CaptureEqLiteral {
            capture,
            literal: ctx.literal_arg(1)?.to_string(),
            positive,
            policy,
        }
    };
    Ok(CompiledPredicate::Text(predicate))
}

/// `match?` family: capture against a regex literal.
pub fn matches(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    ctx.check_arity(Arity::Exactly(2))?;
    let capture = ctx.capture_arg(0)?;
    let pattern = ctx.literal_arg(1)?;
    let regex = ctx.intern_regex(pattern)?;

    Ok(CompiledPredicate::Text(TextPredicate::CaptureMatchesRegex {
        capture,
        regex,
        positive: ctx.is_positive(),
        policy: ctx.binding_policy(),
    }))
}

/// `any-of?` / `not-any-of?`: capture against a literal set.
pub fn any_of(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    ctx.check_arity(Arity::AtLeast(2))?;
    let capture = ctx.capture_arg(0)?;
    let mut set = Vec::with_capacity(ctx.args().len() - 1);
    for index in 1..ctx.args().len() {
        set.push(ctx.literal_arg(index)?.to_string());
    }

    Ok(CompiledPredicate::Text(TextPredicate::CaptureInLiteralSet {
        capture,
        set,
        positive: ctx.is_positive(),
    }))
}

/// `set!`: attach a property to the pattern.
pub fn set(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    ctx.check_arity(Arity::Between(1, 3))?;
    Ok(CompiledPredicate::Setting(parse_property(ctx)?))
}

/// `is?` / `is-not?`: assert a property of the pattern.
pub fn is(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    ctx.check_arity(Arity::Between(1, 3))?;
    let positive = ctx.is_positive();
    Ok(CompiledPredicate::Property(PropertyPredicate {
        property: parse_property(ctx)?,
        positive,
    }))
}

/// Catch-all: preserve the predicate verbatim.
pub fn general(ctx: &mut PredicateContext<'_>) -> Result<CompiledPredicate, QueryError> {
    let mut args = Vec::with_capacity(ctx.args().len());
    for step in ctx.args() {
        match *step {
            PredicateStep::Capture(id) => args.push(PredicateArg::Capture(id)),
            PredicateStep::String(id) => {
                args.push(PredicateArg::Literal(ctx.literal(id).to_string()));
            }
            // Segments never contain sentinels; the splitter consumed them.
            PredicateStep::Done => {}
        }
    }
    Ok(CompiledPredicate::General(GeneralPredicate {
        operator: ctx.operator().to_string(),
        args,
    }))
}

/// Shared shape of `set!` / `is?` arguments: at most one capture in any
/// position, then a key, then an optional value.
fn parse_property(ctx: &PredicateContext<'_>) -> Result<QueryProperty, QueryError> {
    let mut capture = None;
    let mut key = None;
    let mut value = None;

    for step in ctx.args() {
        match *step {
            PredicateStep::Capture(id) => {
                if capture.is_some() {
                    return Err(ctx.error(
                        PredicateErrorKind::ArgKindMismatch,
                        format!(
                            "#{} expects at most one capture, got a second @{}",
                            ctx.operator(),
                            ctx.capture_name(id)
                        ),
                    ));
                }
                capture = Some(id);
            }
            PredicateStep::String(id) => {
                let text = ctx.literal(id);
                if key.is_none() {
                    key = Some(text);
                } else if value.is_none() {
                    value = Some(text);
                } else {
                    return Err(ctx.error(
                        PredicateErrorKind::ArgKindMismatch,
                        format!(
                            "unexpected argument to #{} after key and value",
                            ctx.operator()
                        ),
                    ));
                }
            }
            PredicateStep::Done => {}
        }
    }

    let Some(key) = key else {
        return Err(ctx.error(
            PredicateErrorKind::ArgKindMismatch,
            format!("#{} is missing the property key", ctx.operator()),
        ));
    };

    Ok(QueryProperty {
        key: key.to_string(),
        value: value.map(str::to_string),
        capture,
    })
}
