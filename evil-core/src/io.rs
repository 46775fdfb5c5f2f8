//! Host I/O used by the read and write instructions.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Byte-at-a-time host I/O.
pub trait HostIo {
    /// Block until one input byte is available. `Ok(None)` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Emit one byte. Implementations must not hold it back indefinitely.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<T: HostIo + ?Sized> HostIo for &mut T {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }
}

/// Process stdin/stdout.
///
/// Reads take one byte per call from the shared stdin handle. Every write is
/// flushed before returning.
#[derive(Debug, Default)]
pub struct StdIo;

impl StdIo {
    /// Plain stdin/stdout.
    pub fn new() -> Self {
        Self
    }
}

impl HostIo for StdIo {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(&[byte])?;
        out.flush()
    }
}

/// In-memory I/O: a fixed input script and a capture buffer for output.
#[derive(Debug, Default, Clone)]
pub struct ScriptedIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl ScriptedIo {
    /// I/O that will feed `input` to read instructions, then report end of input.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let input: Vec<u8> = input.into();
        Self {
            input: input.into(),
            output: Vec::new(),
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the adapter, returning the written bytes.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Input bytes not yet read.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl HostIo for ScriptedIo {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_io_feeds_then_reports_eof() {
        let mut io = ScriptedIo::new(b"hi".to_vec());
        assert_eq!(io.read_byte().unwrap(), Some(b'h'));
        assert_eq!(io.remaining_input(), 1);
        assert_eq!(io.read_byte().unwrap(), Some(b'i'));
        assert_eq!(io.read_byte().unwrap(), None);
        assert_eq!(io.read_byte().unwrap(), None);
    }

    #[test]
    fn scripted_io_captures_output_through_reborrow() {
        fn emit<H: HostIo>(mut io: H, byte: u8) {
            io.write_byte(byte).unwrap();
        }

        let mut io = ScriptedIo::default();
        emit(&mut io, b'x');
        io.write_byte(b'y').unwrap();
        assert_eq!(io.into_output(), b"xy");
    }
}
