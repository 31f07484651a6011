//! Line assembly from a serial byte stream
//!
//! Commands arrive one per line, terminated by `\n` or `\r`. The reader
//! is fed one byte at a time from the UART and hands back complete lines.

use heapless::String;

/// Longest line kept; longer lines are dropped whole
pub const MAX_LINE_LEN: usize = 32;

/// Incremental line reader
#[derive(Debug, Clone)]
pub struct LineReader<const N: usize = MAX_LINE_LEN> {
    buffer: String<N>,
    /// Current line overflowed or held non-ASCII bytes
    discarding: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// Create an empty reader
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            discarding: false,
        }
    }

    /// Feed one received byte
    ///
    /// Returns the completed line when `byte` terminates a non-empty line
    /// that fit in the buffer.
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        if byte == b'\n' || byte == b'\r' {
            let discarded = core::mem::replace(&mut self.discarding, false);
            let line = core::mem::take(&mut self.buffer);
            if discarded || line.is_empty() {
                return None;
            }
            return Some(line);
        }

        if self.discarding {
            return None;
        }

        if !byte.is_ascii() || self.buffer.push(byte as char).is_err() {
            self.discarding = true;
            self.buffer.clear();
        }
        None
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Bytes of the partial line received so far
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
