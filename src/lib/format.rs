//! printf-style rendering of scalar field values
//!
//! A field's `format` template is a `%[flags][width][.precision]verb`
//! directive embedded in literal text, e.g. `"%o"`, `"-%o"` or `"%sc"`.
//! Exactly one directive must consume the value; `%%` is a literal percent.
//!
//! Supported verbs:
//! - `v`: natural representation of any scalar
//! - `s`: strings and self-rendering values
//! - `q`: double-quoted string
//! - `d`, `o`, `x`, `X`, `b`: integers
//! - `t`: booleans
//! - `e`, `f`, `g`: floats
//!
//! Supported flags: `-` (left-justify), `+` (always print a sign), ` `
//! (space in the sign slot), `#` (alternate form: `0`, `0x`, `0X`, `0b`
//! prefixes), `0` (zero padding for numbers).

use std::sync::OnceLock;

use regex::Regex;

use crate::field::Value;

/// Directive pattern: flags, optional width, optional precision, verb
const DIRECTIVE_REGEX: &str = r"%([-+# 0]*)(\d+)?(?:\.(\d+))?([a-zA-Z%])";

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DIRECTIVE_REGEX).expect("directive pattern is valid"))
}

/// Why a template could not render a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("template has no directive to consume the value")]
    NoDirective,
    #[error("template has {count} directives but only one value")]
    TooManyDirectives { count: usize },
    #[error("unknown verb %{verb}")]
    UnknownVerb { verb: char },
    #[error("stray '%' at byte {offset}")]
    Stray { offset: usize },
    #[error("verb %{verb} cannot render a {kind} value")]
    Mismatch { verb: char, kind: &'static str },
}

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    sharp: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Spec {
    fn parse(flags: &str, width: Option<&str>, precision: Option<&str>) -> Self {
        let mut spec = Spec {
            width: width.and_then(|w| w.parse().ok()),
            precision: precision.and_then(|p| p.parse().ok()),
            ..Spec::default()
        };
        for c in flags.chars() {
            match c {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '#' => spec.sharp = true,
                '0' => spec.zero = true,
                _ => {}
            }
        }
        spec
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    /// Pad text to the field width with spaces
    fn pad(&self, text: String) -> String {
        let len = text.chars().count();
        match self.width {
            Some(width) if width > len => {
                let fill = " ".repeat(width - len);
                if self.minus {
                    text + &fill
                } else {
                    fill + &text
                }
            }
            _ => text,
        }
    }

    /// Pad a number, placing zero padding between the prefix and the digits
    fn pad_number(&self, prefix: String, digits: String) -> String {
        let len = prefix.chars().count() + digits.chars().count();
        match self.width {
            Some(width) if width > len && self.zero && !self.minus => {
                format!("{}{}{}", prefix, "0".repeat(width - len), digits)
            }
            _ => self.pad(prefix + &digits),
        }
    }
}

/// Natural textual form of a scalar value (the `%v` rendering)
pub fn natural(value: &Value<'_>) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Uint(n) => n.to_string(),
        Value::Float(x) => general(*x, None),
        Value::Str(s) => s.to_string(),
        Value::Array(items) | Value::List(items) => format!("[{}]", items.join(" ")),
        Value::Optional(Some(inner)) => natural(&inner.to_value()),
        Value::Optional(None) => String::new(),
        Value::Record { display, .. } | Value::Other { display, .. } => display.to_string(),
        Value::Unit => "{}".to_string(),
    }
}

/// Render `value` through `template`, or naturally if there is none
pub fn render(template: Option<&str>, value: &Value<'_>) -> Result<String, FormatError> {
    let Some(template) = template else {
        return Ok(natural(value));
    };

    let mut out = String::with_capacity(template.len() + 8);
    let mut consumed = 0usize;
    let mut last = 0usize;

    for caps in directive_regex().captures_iter(template) {
        let whole = caps.get(0).map_or(last..last, |m| m.range());
        literal(&template[last..whole.start], last, &mut out)?;
        last = whole.end;

        let verb = caps
            .get(4)
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or('%');
        if verb == '%' {
            out.push('%');
            continue;
        }

        consumed += 1;
        let spec = Spec::parse(
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        );
        out.push_str(&directive(verb, &spec, value)?);
    }
    literal(&template[last..], last, &mut out)?;

    match consumed {
        0 => Err(FormatError::NoDirective),
        1 => Ok(out),
        count => Err(FormatError::TooManyDirectives { count }),
    }
}

/// Copy literal text, rejecting any `%` the directive pattern did not claim
fn literal(text: &str, offset: usize, out: &mut String) -> Result<(), FormatError> {
    if let Some(i) = text.find('%') {
        return Err(FormatError::Stray { offset: offset + i });
    }
    out.push_str(text);
    Ok(())
}

fn directive(verb: char, spec: &Spec, value: &Value<'_>) -> Result<String, FormatError> {
    let mismatch = || FormatError::Mismatch {
        verb,
        kind: value.kind(),
    };

    // A present optional renders as its inner value.
    if let Value::Optional(Some(inner)) = value {
        return directive(verb, spec, &inner.to_value());
    }

    match verb {
        'v' => match value {
            Value::Int(n) => Ok(integer(i128::from(*n), 'd', spec)),
            Value::Uint(n) => Ok(integer(i128::from(*n), 'd', spec)),
            Value::Float(x) => Ok(float(*x, 'g', spec)),
            other => Ok(spec.pad(truncate(natural(other), spec.precision))),
        },
        's' => match value {
            Value::Str(_) | Value::Record { .. } | Value::Other { .. } => {
                Ok(spec.pad(truncate(natural(value), spec.precision)))
            }
            _ => Err(mismatch()),
        },
        'q' => match value {
            Value::Str(s) => Ok(spec.pad(format!("{:?}", s))),
            Value::Other { display, .. } => Ok(spec.pad(format!("{:?}", display.to_string()))),
            _ => Err(mismatch()),
        },
        't' => match value {
            Value::Bool(b) => Ok(spec.pad(b.to_string())),
            _ => Err(mismatch()),
        },
        'd' | 'o' | 'x' | 'X' | 'b' => match value {
            Value::Int(n) => Ok(integer(i128::from(*n), verb, spec)),
            Value::Uint(n) => Ok(integer(i128::from(*n), verb, spec)),
            _ => Err(mismatch()),
        },
        'e' | 'f' | 'g' => match value {
            Value::Float(x) => Ok(float(*x, verb, spec)),
            _ => Err(mismatch()),
        },
        other => Err(FormatError::UnknownVerb { verb: other }),
    }
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(p) if text.chars().count() > p => text.chars().take(p).collect(),
        _ => text,
    }
}

fn integer(n: i128, verb: char, spec: &Spec) -> String {
    let magnitude = n.unsigned_abs();
    let digits = match verb {
        'o' => format!("{:o}", magnitude),
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        'b' => format!("{:b}", magnitude),
        _ => magnitude.to_string(),
    };
    let alternate = match (spec.sharp, verb) {
        (true, 'o') => "0",
        (true, 'x') => "0x",
        (true, 'X') => "0X",
        (true, 'b') => "0b",
        _ => "",
    };
    let prefix = format!("{}{}", spec.sign(n < 0), alternate);
    spec.pad_number(prefix, digits)
}

fn float(x: f64, verb: char, spec: &Spec) -> String {
    let magnitude = x.abs();
    let digits = match verb {
        'f' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
        'e' => exponent(format!("{:.*e}", spec.precision.unwrap_or(6), magnitude)),
        _ => general(magnitude, spec.precision),
    };
    let negative = x.is_sign_negative() && x != 0.0;
    spec.pad_number(spec.sign(negative).to_string(), digits)
}

/// printf `%g`: `precision` significant digits, or the shortest exact
/// digits when there is none. Exponent form below 1e-4 or at the precision.
fn general(x: f64, precision: Option<usize>) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    match precision {
        None => {
            let scientific = format!("{:e}", x);
            match split_exponent(&scientific) {
                Some((_, exp)) if !(-4..6).contains(&exp) => exponent(scientific),
                _ => x.to_string(),
            }
        }
        Some(p) => {
            let p = p.max(1);
            let scientific = format!("{:.*e}", p - 1, x);
            let exp = split_exponent(&scientific).map_or(0, |(_, exp)| exp);
            if exp < -4 || exp >= p as i32 {
                exponent(trim_zeros(&scientific))
            } else {
                let decimals = (p as i32 - 1 - exp).max(0) as usize;
                trim_zeros(&format!("{:.*}", decimals, x))
            }
        }
    }
}

fn split_exponent(scientific: &str) -> Option<(&str, i32)> {
    let (mantissa, exp) = scientific.split_once('e')?;
    Some((mantissa, exp.parse().ok()?))
}

/// Rewrite Rust's `1.5e3` as printf's `1.5e+03`.
fn exponent(scientific: String) -> String {
    match split_exponent(&scientific) {
        Some((mantissa, exp)) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        None => scientific,
    }
}

/// Drop trailing fractional zeros, from the mantissa when there is an exponent.
fn trim_zeros(text: &str) -> String {
    let (number, exp) = match text.split_once('e') {
        Some((number, exp)) => (number, Some(exp)),
        None => (text, None),
    };
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    };
    match exp {
        Some(exp) => format!("{}e{}", number, exp),
        None => number.to_string(),
    }
}
