//! Bridges between line channels and byte streams
//!
//! [`ChanReader`] turns the receiving end of a channel of lines into an
//! [`io::Read`]; [`ChanWriter`] turns the sending end into an [`io::Write`]
//! that emits one message per complete line.

use std::io::{self, Read, Write};
use std::sync::mpsc::{Receiver, Sender};

/// Reads lines from a channel as a byte stream.
///
/// Every received line is terminated with `'\n'` if it does not already end
/// with one. EOF is reported once the sender has hung up and the buffer is
/// empty.
pub struct ChanReader {
    buffer: Vec<u8>,
    pos: usize,
    rx: Receiver<String>,
}

impl ChanReader {
    pub fn new(rx: Receiver<String>) -> Self {
        Self {
            buffer: Vec::new(),
            pos: 0,
            rx,
        }
    }
}

impl Read for ChanReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.pos >= self.buffer.len() {
            let line = match self.rx.recv() {
                Ok(line) => line,
                Err(_) => return Ok(0),
            };
            self.buffer.clear();
            self.pos = 0;
            self.buffer.extend_from_slice(line.as_bytes());
            if !line.ends_with('\n') {
                self.buffer.push(b'\n');
            }
        }

        let n = buf.len().min(self.buffer.len() - self.pos);
        buf[..n].copy_from_slice(&self.buffer[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Sends complete lines written to it over a channel.
///
/// Lines are sent without their trailing `'\n'`. [`ChanWriter::close`] flushes
/// any partial last line and hangs up the channel; dropping the writer does
/// the same if it was not closed explicitly.
pub struct ChanWriter {
    buffer: Vec<u8>,
    tx: Option<Sender<String>>,
}

impl ChanWriter {
    pub fn new(tx: Sender<String>) -> Self {
        Self {
            buffer: Vec::new(),
            tx: Some(tx),
        }
    }

    /// Drain the buffer and close the channel. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        self.send_lines(&tx)?;
        if !self.buffer.is_empty() {
            let rest = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            tx.send(rest).map_err(|_| hung_up())?;
        }
        Ok(())
    }

    fn send_lines(&mut self, tx: &Sender<String>) -> io::Result<()> {
        while let Some(i) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=i).collect();
            let line = String::from_utf8_lossy(&line[..i]).into_owned();
            tx.send(line).map_err(|_| hung_up())?;
        }
        Ok(())
    }
}

fn hung_up() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "channel receiver hung up")
}

impl Write for ChanWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(tx) = self.tx.clone() else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write to closed channel writer",
            ));
        };
        self.buffer.extend_from_slice(buf);
        self.send_lines(&tx)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ChanWriter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
