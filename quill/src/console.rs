//! Demo output sink
//!
//! Demo output goes to stdout by default, or to a log file when
//! `--log-file` is given. Errors reported here are part of the demo
//! output, distinct from the `tracing`-based transport logging.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output sink for demo results
pub struct Console {
    sink: Sink,
}

enum Sink {
    Stdout(io::Stdout),
    File(BufWriter<File>),
}

impl Console {
    /// Sink writing to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            sink: Sink::Stdout(io::stdout()),
        }
    }

    /// Sink writing to the given file, truncating it
    pub fn file(path: &Path) -> io::Result<Self> {
        Ok(Self {
            sink: Sink::File(BufWriter::new(File::create(path)?)),
        })
    }

    /// Write one line
    pub fn line(&mut self, text: impl AsRef<str>) {
        let result = match &mut self.sink {
            Sink::Stdout(out) => writeln!(out, "{}", text.as_ref()),
            Sink::File(out) => writeln!(out, "{}", text.as_ref()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write demo output");
        }
    }

    /// Write a blank line
    pub fn blank(&mut self) {
        self.line("");
    }

    /// Write a demo section header
    pub fn header(&mut self, title: &str) {
        self.line(format!("=== {title} ==="));
    }

    /// Flush buffered output
    pub fn flush(&mut self) {
        let result = match &mut self.sink {
            Sink::Stdout(out) => out.flush(),
            Sink::File(out) => out.flush(),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to flush demo output");
        }
    }
}
