//! Field descriptors and runtime values
//!
//! A schema declares one [`FieldSpec`] per command-line option, in the order
//! the options should appear within their pass. At compile time each field's
//! current value is handed to the encoder as a [`Value`], produced through
//! the [`ArgValue`] trait.
//!
//! Descriptors are built with `const fn` builders so a whole table can live in
//! a `const`:
//!
//! ```
//! use shellac::FieldSpec;
//!
//! const FIELDS: &[FieldSpec] = &[
//!     FieldSpec::marker("gfind"),
//!     FieldSpec::new("dirnames").first(),
//!     FieldSpec::new("optimization").flag("-O").first().sep("-"),
//!     FieldSpec::new("name").flag("-name"),
//!     FieldSpec::new("mode").flag("-perm").format("%o"),
//!     FieldSpec::new("print").flag("-print").last(),
//! ];
//! assert_eq!(FIELDS.len(), 6);
//! ```

use std::fmt;

/// The sentinel accepted by [`FieldSpec::flag`] and [`FieldSpec::sep`]
pub const SENTINEL: &str = "-";

/// How a field is introduced on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// No flag: the field is positional.
    None,
    /// A literal flag token such as `-name` or `--level`.
    Literal(&'static str),
    /// The `-` sentinel: the value renders alone, with no flag token.
    Bare,
}

impl Flag {
    /// Whether the field carries any flag annotation (including the sentinel)
    pub const fn is_present(&self) -> bool {
        !matches!(self, Flag::None)
    }
}

/// Which pass of the compiler places the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Unset,
    First,
    Last,
}

/// How a flag and its rendered value are glued together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Two tokens: `[flag, value]`.
    #[default]
    Space,
    /// One token, no separator: `flag` + `value`.
    Concat,
    /// One token joined by the literal: `flag` + `sep` + `value`.
    Literal(&'static str),
}

/// Metadata for one field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub flag: Flag,
    pub pos: Position,
    pub sep: Separator,
    pub format: Option<&'static str>,
    pub command: Option<&'static str>,
    pub exported: bool,
}

const fn is_sentinel(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 1 && bytes[0] == b'-'
}

impl FieldSpec {
    /// A positional, unplaced field with no annotations.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            flag: Flag::None,
            pos: Position::Unset,
            sep: Separator::Space,
            format: None,
            command: None,
            exported: true,
        }
    }

    /// An unexported field that only carries a command-name override.
    pub const fn marker(command: &'static str) -> Self {
        Self::new("_").command(command).hidden()
    }

    /// Set the flag literal; `"-"` selects [`Flag::Bare`].
    pub const fn flag(mut self, flag: &'static str) -> Self {
        self.flag = if is_sentinel(flag) {
            Flag::Bare
        } else {
            Flag::Literal(flag)
        };
        self
    }

    pub const fn first(mut self) -> Self {
        self.pos = Position::First;
        self
    }

    pub const fn last(mut self) -> Self {
        self.pos = Position::Last;
        self
    }

    /// Set the flag/value separator; `"-"` selects [`Separator::Concat`].
    pub const fn sep(mut self, sep: &'static str) -> Self {
        self.sep = if is_sentinel(sep) {
            Separator::Concat
        } else {
            Separator::Literal(sep)
        };
        self
    }

    pub const fn format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }

    pub const fn command(mut self, command: &'static str) -> Self {
        self.command = Some(command);
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// The current value of a field, borrowed from the record
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// Fixed-size array of strings.
    Array(&'a [String]),
    /// Variable-length list of strings.
    List(&'a [String]),
    /// `None` is absent; `Some` is present even when the inner value is zero.
    Optional(Option<&'a dyn ArgValue>),
    /// A nested record rendered through its `Display` impl.
    Record {
        fields: usize,
        display: &'a dyn fmt::Display,
    },
    /// The zero-field placeholder, as carried by marker fields.
    Unit,
    /// Any other scalar: it knows whether it is its type's zero value.
    Other {
        zero: bool,
        display: &'a dyn fmt::Display,
    },
}

impl<'a> Value<'a> {
    /// Wrap a nested record that renders itself.
    pub fn record<R>(record: &'a R) -> Self
    where
        R: crate::compiler::Record + fmt::Display,
    {
        Value::Record {
            fields: R::DESCRIPTOR.fields.len(),
            display: record,
        }
    }

    /// Wrap any displayable scalar together with its zero-ness.
    pub fn other(zero: bool, display: &'a dyn fmt::Display) -> Self {
        Value::Other { zero, display }
    }

    /// Short name of the value's kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Uint(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Optional(_) => "optional",
            Value::Record { .. } => "record",
            Value::Unit => "unit",
            Value::Other { .. } => "value",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Uint(n) => write!(f, "Uint({})", n),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Array(items) => write!(f, "Array({:?})", items),
            Value::List(items) => write!(f, "List({:?})", items),
            Value::Optional(None) => write!(f, "Optional(None)"),
            Value::Optional(Some(inner)) => write!(f, "Optional(Some({:?}))", inner.to_value()),
            Value::Record { fields, display } => {
                write!(f, "Record {{ fields: {}, display: {:?} }}", fields, display.to_string())
            }
            Value::Unit => write!(f, "Unit"),
            Value::Other { zero, display } => {
                write!(f, "Other {{ zero: {}, display: {:?} }}", zero, display.to_string())
            }
        }
    }
}

/// Conversion from a record field to a [`Value`]
pub trait ArgValue {
    fn to_value(&self) -> Value<'_>;
}

impl ArgValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl ArgValue for $t {
            fn to_value(&self) -> Value<'_> {
                Value::Int(*self as i64)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl ArgValue for $t {
            fn to_value(&self) -> Value<'_> {
                Value::Uint(*self as u64)
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl ArgValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl ArgValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl ArgValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ArgValue for &str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ArgValue for Vec<String> {
    fn to_value(&self) -> Value<'_> {
        Value::List(self)
    }
}

impl<const N: usize> ArgValue for [String; N] {
    fn to_value(&self) -> Value<'_> {
        Value::Array(self)
    }
}

impl ArgValue for () {
    fn to_value(&self) -> Value<'_> {
        Value::Unit
    }
}

impl<T: ArgValue> ArgValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Optional(self.as_ref().map(|inner| inner as &dyn ArgValue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_sentinel_is_bare() {
        assert_eq!(FieldSpec::new("options").flag("-").flag, Flag::Bare);
        assert_eq!(
            FieldSpec::new("name").flag("-name").flag,
            Flag::Literal("-name")
        );
        assert!(!FieldSpec::new("dirnames").flag.is_present());
    }

    #[test]
    fn test_sep_sentinel_is_concat() {
        assert_eq!(FieldSpec::new("o").flag("-O").sep("-").sep, Separator::Concat);
        assert_eq!(
            FieldSpec::new("level").flag("--level").sep("=").sep,
            Separator::Literal("=")
        );
        assert_eq!(FieldSpec::new("level").sep, Separator::Space);
    }

    #[test]
    fn test_marker_is_hidden_with_command() {
        let marker = FieldSpec::marker("gfind");
        assert!(!marker.exported);
        assert_eq!(marker.command, Some("gfind"));
        assert_eq!(marker.pos, Position::Unset);
    }

    #[test]
    fn test_option_distinguishes_absent_from_zero() {
        let absent: Option<i32> = None;
        assert!(matches!(absent.to_value(), Value::Optional(None)));

        let zero = Some(0);
        match zero.to_value() {
            Value::Optional(Some(inner)) => assert!(matches!(inner.to_value(), Value::Int(0))),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_collections_map_to_kinds() {
        let list = vec!["a".to_string()];
        assert!(matches!(list.to_value(), Value::List(items) if items.len() == 1));

        let array = [String::new(), String::new()];
        assert!(matches!(array.to_value(), Value::Array(items) if items.len() == 2));

        assert_eq!(().to_value().kind(), "unit");
        assert_eq!(7u16.to_value().kind(), "integer");
    }
}
