//! Listing progress on a terminal
//!
//! The count is reprinted with exponential back-off: on every entry at
//! first, then on every 2nd, 4th, ... up to every 1024th entry.

use std::io::{self, Write};

const MAX_MASK: u64 = 1023;

/// Progress reporter for one listing phase at a time
pub struct ProgressReporter<W: Write = io::Stderr> {
    writer: W,
    active: bool,
    heading: String,
    count: u64,
    mask: u64,
}

impl ProgressReporter<io::Stderr> {
    /// Reporter printing to stderr when `active`
    #[must_use]
    pub fn stderr(active: bool) -> Self {
        Self::new(io::stderr(), active)
    }
}

impl ProgressReporter<io::Sink> {
    /// Reporter that never prints
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(io::sink(), false)
    }
}

impl<W: Write> ProgressReporter<W> {
    /// Create a reporter writing to `writer`
    pub const fn new(writer: W, active: bool) -> Self {
        Self {
            writer,
            active,
            heading: String::new(),
            count: 0,
            mask: 0,
        }
    }

    /// Begin a phase: reset the counter and print the heading
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn start(&mut self, heading: impl Into<String>) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.heading = heading.into();
        self.count = 0;
        self.mask = 0;
        write!(self.writer, "{}\r", self.heading)?;
        self.writer.flush()
    }

    /// Count one listed entry
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn increment(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.count += 1;
        if self.count & self.mask != 0 {
            return Ok(());
        }
        write!(self.writer, "{} {}\r", self.heading, self.count)?;
        if self.count > self.mask && self.mask < MAX_MASK {
            self.mask = (self.mask << 1) | 1;
        }
        self.writer.flush()
    }

    /// End the phase with a final count line
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn finish(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        writeln!(self.writer, "{} {}", self.heading, self.count)
    }

    /// Entries counted in the current phase
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
