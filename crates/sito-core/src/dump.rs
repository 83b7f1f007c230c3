//! Human-readable query dump for debugging and snapshot tests.
//!
//! Renders the compiled tables section by section, with predicates printed
//! back in their surface `(#operator ...)` form. Builtin text predicates are
//! shown under their canonical spelling reconstructed from polarity and
//! binding policy.

use std::fmt::Write as _;

use crate::CaptureId;
use crate::predicate::{
    BindingPolicy, GeneralPredicate, PredicateArg, QueryProperty, TextPredicate,
};
use crate::query::CompiledQuery;

/// Generate a human-readable dump of a compiled query.
pub fn dump(query: &CompiledQuery) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(query);

    dump_captures(&mut out, query, &ctx);
    dump_regexes(&mut out, query, &ctx);
    for pattern in 0..query.pattern_count() {
        dump_pattern(&mut out, query, &ctx, pattern);
    }

    out
}

/// Decimal width needed to display indices up to `count - 1`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

/// Precomputed index widths for aligned output.
struct DumpContext {
    capture_width: usize,
    regex_width: usize,
}

impl DumpContext {
    fn new(query: &CompiledQuery) -> Self {
        Self {
            capture_width: width_for_count(query.capture_count()),
            regex_width: width_for_count(query.regexes().len()),
        }
    }
}

fn dump_captures(out: &mut String, query: &CompiledQuery, ctx: &DumpContext) {
    let w = ctx.capture_width;
    writeln!(out, "[captures]").unwrap();
    for (i, name) in query.capture_names().iter().enumerate() {
        writeln!(out, "C{i:0w$} {name:?}").unwrap();
    }
    out.push('\n');
}

fn dump_regexes(out: &mut String, query: &CompiledQuery, ctx: &DumpContext) {
    let w = ctx.regex_width;
    writeln!(out, "[regexes]").unwrap();
    for (i, regex) in query.regexes().iter().enumerate() {
        writeln!(out, "R{i:0w$} {:?}", regex.pattern()).unwrap();
    }
    out.push('\n');
}

fn dump_pattern(out: &mut String, query: &CompiledQuery, ctx: &DumpContext, pattern: usize) {
    writeln!(out, "[pattern {pattern}]").unwrap();
    writeln!(out, "start {}", query.start_byte_for_pattern(pattern)).unwrap();

    let quantifiers = query.capture_quantifiers(pattern);
    if !quantifiers.is_empty() {
        let w = ctx.capture_width;
        let cells: Vec<String> = quantifiers
            .iter()
            .enumerate()
            .map(|(i, q)| format!("C{i:0w$}={}", q.symbol()))
            .collect();
        writeln!(out, "quant {}", cells.join(" ")).unwrap();
    }

    for predicate in query.text_predicates(pattern) {
        writeln!(out, "text    {}", format_text_predicate(predicate, query)).unwrap();
    }
    for setting in query.property_settings(pattern) {
        writeln!(out, "set     ({})", format_property("#set!", setting, query)).unwrap();
    }
    for predicate in query.property_predicates(pattern) {
        let op = if predicate.positive { "#is?" } else { "#is-not?" };
        writeln!(
            out,
            "prop    ({})",
            format_property(op, &predicate.property, query)
        )
        .unwrap();
    }
    for predicate in query.general_predicates(pattern) {
        writeln!(out, "general {}", format_general_predicate(predicate, query)).unwrap();
    }
    out.push('\n');
}

fn capture_ref(query: &CompiledQuery, id: CaptureId) -> String {
    format!("@{}", query.capture_names()[id as usize])
}

/// Canonical operator spelling from polarity and binding policy.
fn operator_name(base: &str, positive: bool, policy: BindingPolicy) -> String {
    let any = match policy {
        BindingPolicy::RequireAll => "",
        BindingPolicy::RequireAny => "any-",
    };
    let not = if positive { "" } else { "not-" };
    format!("#{any}{not}{base}")
}

fn format_text_predicate(predicate: &TextPredicate, query: &CompiledQuery) -> String {
    match predicate {
        TextPredicate::CaptureEqCapture {
            left,
            right,
            positive,
            policy,
        } => format!(
            "({} {} {})",
            operator_name("eq?", *positive, *policy),
            capture_ref(query, *left),
            capture_ref(query, *right),
        ),
        TextPredicate::CaptureEqLiteral {
            capture,
            literal,
            positive,
            policy,
        } => format!(
            "({} {} {literal:?})",
            operator_name("eq?", *positive, *policy),
            capture_ref(query, *capture),
        ),
        TextPredicate::CaptureMatchesRegex {
            capture,
            regex,
            positive,
            policy,
        } => format!(
            "({} {} {:?})",
            operator_name("match?", *positive, *policy),
            capture_ref(query, *capture),
            query.regex(*regex).pattern(),
        ),
        TextPredicate::CaptureInLiteralSet {
            capture,
            set,
            positive,
        } => {
            let op = if *positive { "#any-of?" } else { "#not-any-of?" };
            let items: Vec<String> = set.iter().map(|s| format!("{s:?}")).collect();
            format!(
                "({op} {} {})",
                capture_ref(query, *capture),
                items.join(" ")
            )
        }
    }
}

fn format_property(op: &str, property: &QueryProperty, query: &CompiledQuery) -> String {
    let mut parts = vec![op.to_string()];
    if let Some(capture) = property.capture {
        parts.push(capture_ref(query, capture));
    }
    parts.push(property.key.clone());
    if let Some(value) = &property.value {
        parts.push(format!("{value:?}"));
    }
    parts.join(" ")
}

fn format_general_predicate(predicate: &GeneralPredicate, query: &CompiledQuery) -> String {
    let mut parts = vec![format!("#{}", predicate.operator)];
    for arg in &predicate.args {
        match arg {
            PredicateArg::Capture(id) => parts.push(capture_ref(query, *id)),
            PredicateArg::Literal(text) => parts.push(format!("{text:?}")),
        }
    }
    format!("({})", parts.join(" "))
}
