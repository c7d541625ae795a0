//! Argument parser for the shellac CLI
//!
//! Usage:
//! $ shellac [options] <schema> [<json> | -]
//!
//! Options:
//! --sudo                 Run the command as root via sudo(8)
//! --dry-run, -n          Print the compiled command instead of running it
//! --quiet, -q            Do not echo the command line before running
//! --debug                Enable debug diagnostics
//! --help, -h             Show usage
//! --version, -V          Show version
//!
//! The record is read from stdin when `<json>` is omitted or `-`.

use crate::error::{Error, Result};

/// Schemas the CLI can decode
pub const VALID_SCHEMAS: [&str; 2] = ["find", "ssh"];

/// Options parsed from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub sudo: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub debug: bool,
    pub help: bool,
    pub version: bool,
}

/// Result of parsing arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: CliOptions,
    /// Schema name, lower-cased
    pub schema: Option<String>,
    /// Inline JSON record; `None` means read stdin
    pub record: Option<String>,
}

/// Parse command line arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<ParsedArgs> {
    let mut options = CliOptions::default();
    let mut positional: Vec<String> = Vec::new();
    let mut only_positional = false;

    for arg in args {
        if only_positional || !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            continue;
        }
        match arg.as_str() {
            "--" => only_positional = true,
            "--sudo" => options.sudo = true,
            "--dry-run" | "-n" => options.dry_run = true,
            "--quiet" | "-q" => options.quiet = true,
            "--debug" => options.debug = true,
            "--help" | "-h" => options.help = true,
            "--version" | "-V" => options.version = true,
            other => return Err(Error::Usage(format!("Unknown option: {}", other))),
        }
    }

    if positional.len() > 2 {
        return Err(Error::Usage(format!(
            "Unexpected argument: {}",
            positional[2]
        )));
    }

    let mut positional = positional.into_iter();
    let schema = positional.next().map(|s| s.to_lowercase());
    let record = positional.next().filter(|r| r != "-");

    let parsed = ParsedArgs {
        options,
        schema,
        record,
    };
    validate(&parsed)?;
    Ok(parsed)
}

/// Validate parsed arguments
pub fn validate(parsed: &ParsedArgs) -> Result<()> {
    if parsed.options.help || parsed.options.version {
        return Ok(());
    }
    match parsed.schema.as_deref() {
        None => Err(Error::Usage("No schema provided".to_string())),
        Some(schema) if !VALID_SCHEMAS.contains(&schema) => Err(Error::Usage(format!(
            "Invalid schema: {}. Valid options are: {}",
            schema,
            VALID_SCHEMAS.join(", ")
        ))),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_and_record() {
        let parsed = parse_args(&args(&["find", r#"{"name":"*.rs"}"#])).unwrap();
        assert_eq!(parsed.schema.as_deref(), Some("find"));
        assert_eq!(parsed.record.as_deref(), Some(r#"{"name":"*.rs"}"#));
        assert_eq!(parsed.options, CliOptions::default());
    }

    #[test]
    fn test_stdin_record() {
        let parsed = parse_args(&args(&["ssh"])).unwrap();
        assert!(parsed.record.is_none());
        let parsed = parse_args(&args(&["ssh", "-"])).unwrap();
        assert!(parsed.record.is_none());
    }

    #[test]
    fn test_options() {
        let parsed = parse_args(&args(&["--sudo", "-n", "-q", "--debug", "FIND"])).unwrap();
        assert!(parsed.options.sudo);
        assert!(parsed.options.dry_run);
        assert!(parsed.options.quiet);
        assert!(parsed.options.debug);
        assert_eq!(parsed.schema.as_deref(), Some("find"));
    }

    #[test]
    fn test_separator_allows_dash_json() {
        let parsed = parse_args(&args(&["--", "find", "-weird"])).unwrap();
        assert_eq!(parsed.record.as_deref(), Some("-weird"));
    }

    #[test]
    fn test_help_needs_no_schema() {
        assert!(parse_args(&args(&["--help"])).unwrap().options.help);
        assert!(parse_args(&args(&["-V"])).unwrap().options.version);
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["tar"])).is_err());
        assert!(parse_args(&args(&["--bogus", "find"])).is_err());
        assert!(parse_args(&args(&["find", "{}", "extra"])).is_err());
    }
}
