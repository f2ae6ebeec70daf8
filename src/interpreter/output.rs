use std::fmt;
use std::io::{self, Write};

/// Append-only accumulator for emitted text, kept as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    buffer: Vec<u8>,
}

impl Output {
    pub fn new() -> Output {
        Output::default()
    }

    pub fn append(&mut self, text: &[u8]) {
        self.buffer.extend_from_slice(text);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes everything appended so far and returns the number of bytes.
    pub fn flush_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        writer.write_all(&self.buffer)?;
        writer.flush()?;

        Ok(self.len())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.buffer))
    }
}
