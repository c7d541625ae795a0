//! shellac library
//!
//! Describes external commands as strongly-typed records and compiles them
//! into argument vectors, then runs them with optional sudo(8) elevation and
//! channel-connected standard streams.
//!
//! ```
//! use shellac::coreutils::{Find, FindType};
//! use shellac::{command_name, compile_args};
//!
//! let find = Find {
//!     dirnames: vec![".".to_string()],
//!     name: "*.rs".to_string(),
//!     type_: Some(FindType::File),
//!     ..Find::default()
//! };
//! assert_eq!(command_name::<Find>(), "find");
//! assert_eq!(compile_args(&find).unwrap(), [".", "-name", "*.rs", "-type", "f"]);
//! ```

pub mod args_parser;
pub mod chan;
pub mod cmd;
pub mod command_name;
pub mod compiler;
pub mod config;
pub mod coreutils;
pub mod encoder;
pub mod error;
pub mod field;
pub mod format;
pub mod ssh;
pub mod which;

// Re-export commonly used items
pub use args_parser::{parse_args, CliOptions, ParsedArgs, VALID_SCHEMAS};
pub use chan::{ChanReader, ChanWriter};
pub use cmd::{command, run, sudo, Cmd};
pub use command_name::{command_name, resolve as resolve_command_name};
pub use compiler::{compile_args, compile_values, Pass, Record, RecordDescriptor};
pub use config::Config;
pub use encoder::encode_field;
pub use error::{Error, Result};
pub use field::{ArgValue, FieldSpec, Flag, Position, Separator, Value};
pub use format::FormatError;
pub use which::{is_command_available, which, which_in};
