//! # IO Streams
//!
//! Output sinks passed to every command so tests can capture what a command prints.

use crate::error::CliResult;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// Where commands write results and diagnostics.
pub struct IoStreams {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    /// True when stdin and stdout are both terminals.
    pub is_tty: bool,
}

impl IoStreams {
    /// Binds to the process stdio.
    pub fn system() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            is_tty: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }

    /// In-memory streams plus handles to read back stdout and stderr.
    #[cfg(test)]
    pub fn test() -> (Self, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let streams = Self {
            out: Box::new(out.clone()),
            err: Box::new(err.clone()),
            is_tty: false,
        };
        (streams, out, err)
    }

    /// Pretty-prints `value` as JSON on stdout.
    pub fn print_json<T: Serialize + ?Sized>(&mut self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value)?;
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn println(&mut self, line: &str) -> CliResult<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn eprintln(&mut self, line: &str) -> CliResult<()> {
        writeln!(self.err, "{}", line)?;
        Ok(())
    }
}

/// A cloneable in-memory sink.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
