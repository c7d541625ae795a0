//! Field Encoder
//!
//! Turns one field descriptor and its current value into zero or more
//! argument tokens. The encoder knows nothing about other fields; placement
//! is the compiler's job.

use crate::error::{Error, Result};
use crate::field::{FieldSpec, Flag, Separator, Value, SENTINEL};
use crate::format;

/// Encode a single field into its argument tokens.
///
/// Returns an empty vector when the field is hidden, absent, or holds its
/// type's zero value. The only failure is a format template that cannot
/// render the value.
pub fn encode_field(spec: &FieldSpec, value: &Value<'_>) -> Result<Vec<String>> {
    if !spec.exported {
        return Ok(Vec::new());
    }

    let Some(value) = present(value) else {
        tracing::trace!(field = spec.name, "suppressed");
        return Ok(Vec::new());
    };

    match (spec.flag, &value) {
        (Flag::Literal(flag), Value::Bool(true)) => return Ok(vec![flag.to_string()]),
        (Flag::Bare, Value::Bool(true)) => return Ok(vec![SENTINEL.to_string()]),
        _ => {}
    }

    let mut args = Vec::new();
    if let Flag::Literal(flag) = spec.flag {
        args.push(flag.to_string());
    }

    if let Value::Array(items) | Value::List(items) = value {
        args.extend(items.iter().cloned());
        return Ok(args);
    }

    let arg = format::render(spec.format, &value).map_err(|source| Error::Format {
        field: spec.name,
        format: spec.format.unwrap_or("%v"),
        source,
    })?;

    let flag = match spec.flag {
        Flag::Literal(flag) => flag,
        Flag::None | Flag::Bare => return Ok(vec![arg]),
    };

    match spec.sep {
        Separator::Space => args.push(arg),
        Separator::Concat => args = vec![format!("{}{}", flag, arg)],
        Separator::Literal(sep) => args = vec![format!("{}{}{}", flag, sep, arg)],
    }
    Ok(args)
}

/// The value to render, or `None` when the field contributes nothing.
///
/// A present optional is unwrapped but not zero-checked: `Some(0)` and
/// `Some("")` still render.
fn present<'a>(value: &Value<'a>) -> Option<Value<'a>> {
    match *value {
        Value::Optional(None) => None,
        Value::Optional(Some(inner)) => match inner.to_value() {
            nested @ Value::Optional(_) => present(&nested),
            inner => Some(inner),
        },
        Value::List(items) if items.is_empty() => None,
        Value::Array(items) if items.iter().all(|s| s.is_empty()) => None,
        Value::Unit | Value::Record { fields: 0, .. } => None,
        Value::Bool(false) | Value::Int(0) | Value::Uint(0) | Value::Str("") => None,
        Value::Float(x) if x == 0.0 => None,
        Value::Other { zero: true, .. } => None,
        other => Some(other),
    }
}
