//! Coercion rules
//!
//! An ordered table of (predicate, coercion) pairs. The first rule whose
//! predicate accepts the semantic type runs; no match means the host
//! decides. A rule may also decline with [`CastOutcome::Deferred`].
//!
//! Values of a shape a rule has no sensible answer for become NULL. The one
//! exception is an integer column holding a non-numeric string, which fails
//! with [`CastError::InvalidInteger`]. Numbers too wide for `i64` are left to
//! the host.

use crate::datetime::DateTimeNormalizer;
use crate::error::{CastError, CastResult};
use rowcast_types::{CastOutcome, RawValue, SemanticType};
use std::borrow::Cow;
use std::num::IntErrorKind;

// 2^63; every float in `-I64_BOUND..I64_BOUND` truncates to an exact i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// State shared by all rules during one cast
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleContext {
    pub normalizer: DateTimeNormalizer,
}

/// One entry of the dispatch table
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(SemanticType) -> bool,
    pub coerce: fn(&RawValue, &RuleContext) -> CastResult<CastOutcome>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Dispatch table, evaluated top to bottom
pub static RULES: [Rule; 6] = [
    Rule {
        name: "string",
        matches: is_string_type,
        coerce: cast_string,
    },
    Rule {
        name: "float",
        matches: is_float_type,
        coerce: cast_float,
    },
    Rule {
        name: "integer",
        matches: is_integer_type,
        coerce: cast_integer,
    },
    Rule {
        name: "json",
        matches: is_json_type,
        coerce: cast_json,
    },
    Rule {
        name: "boolean",
        matches: is_boolean_type,
        coerce: cast_boolean,
    },
    Rule {
        name: "date_time",
        matches: is_date_time_type,
        coerce: cast_date_time,
    },
];

/// First rule accepting `ty`
pub fn find_rule(ty: SemanticType) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(ty))
}

/// Run the matching rule; `Deferred` when none matches
pub fn dispatch(
    ty: SemanticType,
    value: &RawValue,
    ctx: &RuleContext,
) -> CastResult<CastOutcome> {
    match find_rule(ty) {
        Some(rule) => (rule.coerce)(value, ctx),
        None => Ok(CastOutcome::Deferred),
    }
}

fn is_string_type(ty: SemanticType) -> bool {
    matches!(
        ty,
        SemanticType::String | SemanticType::Text | SemanticType::Uuid
    )
}

fn cast_string(value: &RawValue, _ctx: &RuleContext) -> CastResult<CastOutcome> {
    Ok(match value {
        RawValue::String(_) => CastOutcome::Handled(value.clone()),
        RawValue::Boolean(true) => CastOutcome::Handled("t".into()),
        RawValue::Boolean(false) => CastOutcome::Handled("f".into()),
        RawValue::Null => CastOutcome::Null,
        other => CastOutcome::Handled(RawValue::String(other.to_host_string())),
    })
}

fn is_float_type(ty: SemanticType) -> bool {
    matches!(ty, SemanticType::Float | SemanticType::NativeFloat)
}

fn cast_float(value: &RawValue, _ctx: &RuleContext) -> CastResult<CastOutcome> {
    Ok(match value {
        RawValue::Float(_) => CastOutcome::Handled(value.clone()),
        RawValue::String(s) => match parse_float_prefix(s) {
            Some(f) => CastOutcome::Handled(RawValue::Float(f)),
            None => CastOutcome::Deferred,
        },
        _ => CastOutcome::Deferred,
    })
}

/// Parse the longest numeric prefix of `s`, ignoring trailing garbage
///
/// Accepts leading whitespace, a sign, decimal digits with an optional
/// fraction and exponent, and `inf`/`infinity`/`nan`. Returns `None` when
/// no digits lead the string.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    for word in ["infinity", "inf", "nan"] {
        if rest
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word))
        {
            return s[..end + word.len()].parse().ok();
        }
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn is_integer_type(ty: SemanticType) -> bool {
    matches!(ty, SemanticType::Integer | SemanticType::NativeInteger)
}

fn cast_integer(value: &RawValue, _ctx: &RuleContext) -> CastResult<CastOutcome> {
    Ok(match value {
        RawValue::Integer(_) => CastOutcome::Handled(value.clone()),
        RawValue::String(s) if s.is_empty() => CastOutcome::Null,
        RawValue::String(s) => match s.trim().parse::<i64>() {
            Ok(parsed) => CastOutcome::Handled(RawValue::Integer(parsed)),
            // well-formed but wider than i64; the host has big integers
            Err(e)
                if matches!(
                    e.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                CastOutcome::Deferred
            }
            Err(e) => return Err(CastError::invalid_integer(s.as_str(), e)),
        },
        RawValue::Float(f) if f.is_finite() => {
            let truncated = f.trunc();
            if (-I64_BOUND..I64_BOUND).contains(&truncated) {
                CastOutcome::Handled(RawValue::Integer(truncated as i64))
            } else {
                CastOutcome::Deferred
            }
        }
        RawValue::Boolean(b) => CastOutcome::Handled(RawValue::Integer(i64::from(*b))),
        // NaN, infinities, NULL, and aggregates have no integer form
        _ => CastOutcome::Null,
    })
}

fn is_json_type(ty: SemanticType) -> bool {
    ty == SemanticType::Json
}

/// Strings are left to the caller's JSON-aware writer
fn cast_json(value: &RawValue, _ctx: &RuleContext) -> CastResult<CastOutcome> {
    Ok(match value {
        RawValue::String(_) => CastOutcome::Deferred,
        other => CastOutcome::from(other.clone()),
    })
}

fn is_boolean_type(ty: SemanticType) -> bool {
    ty == SemanticType::Boolean
}

fn cast_boolean(value: &RawValue, _ctx: &RuleContext) -> CastResult<CastOutcome> {
    Ok(match value {
        RawValue::Boolean(_) => CastOutcome::Handled(value.clone()),
        RawValue::String(s) if s.is_empty() => CastOutcome::Null,
        RawValue::String(s) => CastOutcome::Handled(RawValue::Boolean(!is_false_string(s))),
        RawValue::Integer(i) => CastOutcome::Handled(RawValue::Boolean(*i != 0)),
        RawValue::Float(f) => CastOutcome::Handled(RawValue::Boolean(*f != 0.0)),
        RawValue::Null | RawValue::Other(_) => CastOutcome::Null,
    })
}

/// `0`, anything starting with `f`, and `off`, ignoring case
fn is_false_string(s: &str) -> bool {
    s == "0"
        || s.starts_with(['f', 'F'])
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("off")
}

fn is_date_time_type(ty: SemanticType) -> bool {
    ty.is_temporal()
}

fn cast_date_time(value: &RawValue, ctx: &RuleContext) -> CastResult<CastOutcome> {
    let RawValue::String(s) = value else {
        return Ok(CastOutcome::Deferred);
    };
    Ok(match ctx.normalizer.normalize(s) {
        Some(Cow::Borrowed(_)) => CastOutcome::Handled(value.clone()),
        Some(Cow::Owned(canonical)) => CastOutcome::Handled(RawValue::String(canonical)),
        None => CastOutcome::Deferred,
    })
}
