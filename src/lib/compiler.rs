//! Record Compiler
//!
//! Compiles a [`Record`] into its argument vector in three passes over the
//! declared fields:
//!
//! 1. `first`: every field placed first (leading positionals, global flags)
//! 2. middle: every flagged field with no placement
//! 3. `last`: every field placed last (trailing positionals, actions)
//!
//! Declaration order is kept within each pass. A field with neither a flag
//! nor a placement is inert.

use crate::encoder::encode_field;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, Position, Value};

/// Static description of a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// The type name, lower-cased to derive the default command name.
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A command described as a record of options
pub trait Record {
    /// Field table, in declaration order
    const DESCRIPTOR: RecordDescriptor;

    /// Current values, aligned one-to-one with `DESCRIPTOR.fields`
    fn values(&self) -> Vec<Value<'_>>;
}

/// The pass a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    First,
    Middle,
    Last,
}

impl Pass {
    /// Category of a field, fixed by its descriptor alone
    pub fn of(spec: &FieldSpec) -> Option<Pass> {
        match spec.pos {
            Position::First => Some(Pass::First),
            Position::Last => Some(Pass::Last),
            Position::Unset if spec.exported && spec.flag.is_present() => Some(Pass::Middle),
            Position::Unset => None,
        }
    }
}

/// Compile a record into its argument vector
pub fn compile_args<R: Record>(record: &R) -> Result<Vec<String>> {
    compile_values(&R::DESCRIPTOR, &record.values())
}

/// Compile already-extracted values against a descriptor
pub fn compile_values(descriptor: &RecordDescriptor, values: &[Value<'_>]) -> Result<Vec<String>> {
    if values.len() != descriptor.fields.len() {
        return Err(Error::Arity {
            record: descriptor.name,
            expected: descriptor.fields.len(),
            actual: values.len(),
        });
    }

    let mut args = Vec::with_capacity(descriptor.fields.len());
    for pass in [Pass::First, Pass::Middle, Pass::Last] {
        for (spec, value) in descriptor.fields.iter().zip(values) {
            if Pass::of(spec) == Some(pass) {
                args.extend(encode_field(spec, value)?);
            }
        }
    }

    tracing::debug!(record = descriptor.name, tokens = args.len(), "compiled arguments");
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ArgValue;

    #[derive(Default)]
    struct Level {
        quiet: bool,
        level: String,
        target: String,
        note: String,
    }

    impl Record for Level {
        const DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            name: "Level",
            fields: &[
                FieldSpec::new("quiet").flag("-q").last(),
                FieldSpec::new("level").flag("--level").sep("="),
                FieldSpec::new("target").first(),
                FieldSpec::new("note"),
            ],
        };

        fn values(&self) -> Vec<Value<'_>> {
            vec![
                self.quiet.to_value(),
                self.level.to_value(),
                self.target.to_value(),
                self.note.to_value(),
            ]
        }
    }

    #[test]
    fn test_pass_categories() {
        let fields = Level::DESCRIPTOR.fields;
        assert_eq!(Pass::of(&fields[0]), Some(Pass::Last));
        assert_eq!(Pass::of(&fields[1]), Some(Pass::Middle));
        assert_eq!(Pass::of(&fields[2]), Some(Pass::First));
        assert_eq!(Pass::of(&fields[3]), None);
    }

    #[test]
    fn test_passes_reorder_across_categories() {
        let record = Level {
            quiet: true,
            level: "hi".to_string(),
            target: "here".to_string(),
            note: "ignored".to_string(),
        };
        assert_eq!(
            compile_args(&record).unwrap(),
            vec!["here", "--level=hi", "-q"]
        );
    }

    #[test]
    fn test_empty_record_compiles_to_nothing() {
        assert!(compile_args(&Level::default()).unwrap().is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let err = compile_values(&Level::DESCRIPTOR, &[Value::Bool(true)]).unwrap_err();
        assert!(matches!(
            err,
            Error::Arity {
                expected: 4,
                actual: 1,
                ..
            }
        ));
    }
}
