//! Character sources the lexer pulls from.
//!
//! The lexer never sees its input as a whole: it asks for one character at
//! a time, so a document can be tokenized straight off a file or socket.

use std::io::{self, BufRead};
use std::str::Chars;

/// A pull interface yielding characters until end of input.
pub trait CharSource {
    /// Next character, or `None` once the input is exhausted.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters of an in-memory string.
pub struct TextSource<'a> {
    chars: Chars<'a>,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl CharSource for TextSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// UTF-8 decoder over a buffered byte stream.
///
/// Reads exactly as many bytes as the next character needs. The reader is
/// borrowed or owned as the caller chooses and is never closed here.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = utf8_width(lead)
            .ok_or_else(|| invalid_utf8(format!("invalid UTF-8 lead byte 0x{lead:02x}")))?;

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .next_byte()?
                .ok_or_else(|| invalid_utf8("truncated UTF-8 sequence".into()))?;
        }

        let decoded = std::str::from_utf8(&buf[..width])
            .map_err(|e| invalid_utf8(format!("invalid UTF-8 sequence: {e}")))?;
        Ok(decoded.chars().next())
    }
}

/// Encoded length of a UTF-8 sequence starting with `lead`.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
