//! shellac CLI
//!
//! Decodes a JSON record for one of the bundled command schemas and either
//! prints the compiled command line or runs it:
//!
//! $ shellac --dry-run find '{"dirnames": ["."], "name": "*.rs", "type": "f"}'
//! find . -name *.rs -type f

use std::env;
use std::io::{self, Read};
use std::process;

use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use shellac::{
    coreutils::Find, parse_args, ssh::Ssh, Cmd, CliOptions, Config, Error, Record, Result,
};

fn main() {
    let config = Config::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        process::exit(0);
    }

    let parsed = match parse_args(&args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let options = parsed.options;
    if options.help {
        print_usage();
        process::exit(0);
    }
    if options.version {
        println!("shellac version: {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let debug = options.debug || config.debug;
    let filter = match (&config.log_filter, debug) {
        (None, true) => EnvFilter::new(shellac::config::DEBUG_LOG_FILTER),
        _ => EnvFilter::new(config.log_filter()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let schema = parsed.schema.unwrap_or_default();
    let result = read_record(parsed.record).and_then(|json| match schema.as_str() {
        "find" => execute::<Find>(&json, &config, &options),
        "ssh" => execute::<Ssh>(&json, &config, &options),
        other => Err(Error::Usage(format!("Invalid schema: {}", other))),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match e {
            Error::ExitStatus {
                code: Some(code), ..
            } => code,
            _ => 1,
        };
        process::exit(code);
    }
}

/// Inline record, or the whole of stdin
fn read_record(inline: Option<String>) -> Result<String> {
    match inline {
        Some(json) => Ok(json),
        None => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            Ok(json)
        }
    }
}

fn execute<R>(json: &str, config: &Config, options: &CliOptions) -> Result<()>
where
    R: Record + DeserializeOwned + std::fmt::Debug,
{
    let record: R = serde_json::from_str(json)?;
    if config.verbose {
        eprintln!("[Record] {:?}", record);
    }

    let mut cmd = Cmd::new(&record)?;
    if options.sudo || config.sudo {
        if options.dry_run {
            cmd.sudo_unresolved();
        } else {
            cmd.sudo()?;
        }
    }

    if options.dry_run {
        println!("{}", cmd.command_line());
        return Ok(());
    }

    if options.quiet || config.quiet {
        cmd.quiet();
    }
    cmd.run()
}

fn print_usage() {
    println!(
        r#"Usage: shellac [options] <schema> [<json> | -]

Compiles a JSON record into a command line and runs it.

Schemas:
  find                   find(1)
  ssh                    ssh(1)

Options:
  --sudo                 Run the command as root via sudo(8)
  --dry-run, -n          Print the compiled command instead of running it
  --quiet, -q            Do not echo the command line before running
  --debug                Enable debug diagnostics
  --help, -h             Show this help
  --version, -V          Show version

The record is read from stdin when <json> is omitted or "-".

Environment:
  SHELLAC_VERBOSE, SHELLAC_DEBUG, SHELLAC_QUIET, SHELLAC_SUDO (1 or true)
  SHELLAC_LOG            tracing filter, e.g. shellac=trace

Examples:
  shellac -n find '{{"dirnames": ["."], "name": "*.rs", "type": "f"}}'
  echo '{{"hostname": "example.com", "command": ["uptime"]}}' | shellac ssh"#
    );
}
