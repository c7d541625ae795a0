//! Command Name Resolver

use crate::compiler::{Record, RecordDescriptor};

/// The program name for a record type.
///
/// The first field carrying a `command` override wins; otherwise the type
/// name is lower-cased.
pub fn resolve(descriptor: &RecordDescriptor) -> String {
    descriptor
        .fields
        .iter()
        .find_map(|field| field.command)
        .map(str::to_string)
        .unwrap_or_else(|| descriptor.name.to_lowercase())
}

/// [`resolve`] for a record type
pub fn command_name<R: Record>() -> String {
    resolve(&R::DESCRIPTOR)
}
