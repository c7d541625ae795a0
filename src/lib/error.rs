//! Error type shared by the compiler, the launcher and the CLI

use std::io;

use crate::format::FormatError;

/// Errors produced while compiling or running a command record
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field's format template could not render its value.
    #[error("field `{field}`: cannot render with format {format:?}: {source}")]
    Format {
        /// Name of the offending field.
        field: &'static str,
        /// The template as declared on the field.
        format: &'static str,
        #[source]
        source: FormatError,
    },

    /// A record returned a different number of values than it declares fields.
    #[error("record `{record}` declares {expected} fields but produced {actual} values")]
    Arity {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Elevation was requested but sudo(8) is not on PATH.
    #[error("sudo not found in PATH")]
    SudoNotFound,

    /// The program could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran but did not exit successfully.
    #[error("command `{command}` exited with {}", exit_code_label(.code))]
    ExitStatus {
        /// The full command line that was run.
        command: String,
        /// Exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line usage of the `shellac` binary.
    #[error("{0}")]
    Usage(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
