//! Process launcher for compiled command records
//!
//! [`Cmd`] pairs a resolved program path with its argument vector and runs
//! it with standard streams inherited, or connected to line channels via
//! [`ChanReader`] / [`ChanWriter`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::chan::{ChanReader, ChanWriter};
use crate::command_name::command_name;
use crate::compiler::{compile_args, Record};
use crate::error::{Error, Result};
use crate::which::which;

enum Input {
    Inherit,
    Channel(Receiver<String>),
}

enum Output {
    Inherit,
    Channel(Sender<String>),
}

impl Output {
    fn stdio(&self) -> Stdio {
        match self {
            Output::Inherit => Stdio::inherit(),
            Output::Channel(_) => Stdio::piped(),
        }
    }
}

/// A command ready to run
pub struct Cmd {
    path: PathBuf,
    /// Full argument vector; `args[0]` is the program name.
    args: Vec<String>,
    stdin: Input,
    stdout: Output,
    stderr: Output,
    log: bool,
}

impl Cmd {
    /// Build the command described by a record
    pub fn new<R: Record>(record: &R) -> Result<Self> {
        Ok(Self::from_argv(command_name::<R>(), compile_args(record)?))
    }

    /// Build a command from a program name and its arguments
    pub fn from_argv(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        let path = which(&program).unwrap_or_else(|| PathBuf::from(&program));
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program);
        argv.extend(args);
        Self {
            path,
            args: argv,
            stdin: Input::Inherit,
            stdout: Output::Inherit,
            stderr: Output::Inherit,
            log: true,
        }
    }

    /// Resolved path of the executable (the bare name if lookup failed)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full argument vector, program name first
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Command line joined with single spaces
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }

    /// Connect standard input to a channel of lines
    pub fn channel_stdin(&mut self, stdin: Receiver<String>) {
        self.stdin = Input::Channel(stdin);
    }

    /// Connect standard output to a channel of lines
    pub fn channel_stdout(&mut self, stdout: Sender<String>) {
        self.stdout = Output::Channel(stdout);
    }

    /// Connect standard error to a channel of lines
    pub fn channel_stderr(&mut self, stderr: Sender<String>) {
        self.stderr = Output::Channel(stderr);
    }

    /// Do not echo the command line when running
    pub fn quiet(&mut self) {
        self.log = false;
    }

    /// Rewrite the command to run as root via sudo(8)
    pub fn sudo(&mut self) -> Result<()> {
        let sudo = which("sudo").ok_or(Error::SudoNotFound)?;
        self.sudo_unresolved();
        self.path = sudo;
        Ok(())
    }

    /// Prefix the command line with `sudo` without looking it up on PATH.
    /// Enough for printing; `run` will then fail to spawn if sudo is missing.
    pub fn sudo_unresolved(&mut self) {
        self.args.insert(0, "sudo".to_string());
        self.path = PathBuf::from("sudo");
    }

    /// Echo the command line to stderr, bold when stderr is a terminal
    pub fn log(&self) {
        let line = self.command_line();
        if atty::is(atty::Stream::Stderr) {
            eprintln!("\x1b[1m{}\x1b[0m", line);
        } else {
            eprintln!("{}", line);
        }
    }

    /// Log, run and wait for the command
    pub fn run(self) -> Result<()> {
        if self.log {
            self.log();
        }
        tracing::debug!(path = %self.path.display(), args = ?self.args, "spawning");

        let mut command = Command::new(&self.path);
        command
            .args(&self.args[1..])
            .stdout(self.stdout.stdio())
            .stderr(self.stderr.stdio());
        if let Input::Channel(_) = self.stdin {
            command.stdin(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            program: self.args[0].clone(),
            source,
        })?;

        if let Input::Channel(rx) = self.stdin {
            pump_stdin(&mut child, rx);
        }
        let pumps: Vec<JoinHandle<io::Result<()>>> = [
            pump_output(child.stdout.take(), self.stdout),
            pump_output(child.stderr.take(), self.stderr),
        ]
        .into_iter()
        .flatten()
        .collect();

        let status = child.wait()?;
        for pump in pumps {
            match pump.join() {
                Ok(result) => result?,
                Err(_) => {
                    return Err(Error::Io(io::Error::new(
                        io::ErrorKind::Other,
                        "output pump panicked",
                    )))
                }
            }
        }

        tracing::debug!(program = %self.args[0], code = ?status.code(), "exited");
        if status.success() {
            Ok(())
        } else {
            Err(Error::ExitStatus {
                command: self.args.join(" "),
                code: status.code(),
            })
        }
    }
}

/// Feed the child's stdin from a channel.
///
/// The thread is detached: it ends once the channel hangs up or the child
/// closes its end of the pipe.
fn pump_stdin(child: &mut Child, rx: Receiver<String>) {
    let Some(mut stdin) = child.stdin.take() else {
        return;
    };
    thread::spawn(move || {
        let mut reader = ChanReader::new(rx);
        match io::copy(&mut reader, &mut stdin) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => tracing::warn!(error = %e, "stdin pump failed"),
        }
        let _ = stdin.flush();
    });
}

/// Copy a piped stream into its channel, closing the channel at EOF
fn pump_output<R>(pipe: Option<R>, output: Output) -> Option<JoinHandle<io::Result<()>>>
where
    R: io::Read + Send + 'static,
{
    let (mut pipe, tx) = match (pipe, output) {
        (Some(pipe), Output::Channel(tx)) => (pipe, tx),
        _ => return None,
    };
    Some(thread::spawn(move || {
        let mut writer = ChanWriter::new(tx);
        io::copy(&mut pipe, &mut writer)?;
        writer.close()
    }))
}

/// Build the command described by a record
pub fn command<R: Record>(record: &R) -> Result<Cmd> {
    Cmd::new(record)
}

/// Build and run the command described by a record
pub fn run<R: Record>(record: &R) -> Result<()> {
    Cmd::new(record)?.run()
}

/// Build and run the command described by a record as root via sudo(8)
pub fn sudo<R: Record>(record: &R) -> Result<()> {
    let mut cmd = Cmd::new(record)?;
    cmd.sudo()?;
    cmd.run()
}
