/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The module contains the adapters for converting plain
//! bytes to a representation that is useful for parsing.
//!
//! There are three conversions that are supported, each
//! with a top level function that handles the conversion:
//!
//! - `&str` => [`from_utf8()`]
//! - `&[u8]` => [`try_from_bytes()`]
//! - `T: std::io::Read` => [`from_read()`]
//!
//! Every constructor silently consumes a leading UTF8 byte
//! order mark if one is present. Line terminator handling
//! (CR, LF, CRLF and the Unicode breaks) happens in the
//! lexer, which never treats a CR LF pair as two lines.

use std::io;

use crate::{
    error::{internal, Error, Result, SourceMark},
    lexer::{
        entry::TokenEntry,
        error::ScanResult,
        flag::Flags as LexerFlags,
        Lexer,
    },
    queue::Queue,
};

/// Instantiate a new [`Read`]er from the given UTF8 string
/// slice
///
/// ## Examples
///
/// ```rust
/// use yamel::reader::from_utf8;
///
/// let yaml = "{a yaml: mapping}";
///
/// let reader = from_utf8(yaml);
/// ```
pub fn from_utf8(utf8: &str) -> BorrowReader<'_>
{
    BorrowReader::new(utf8)
}

/// Try instantiate a new [`Read`]er from the given byte
/// slice.
///
/// ## Errors
///
/// This function will error if the provided byte slice is
/// not valid UTF8
///
/// ## Examples
///
/// ```rust
/// use yamel::reader::try_from_bytes;
///
/// let yaml = b"[some, valid, yaml]";
///
/// let reader = try_from_bytes(yaml);
/// assert!(reader.is_ok())
/// ```
pub fn try_from_bytes(slice: &[u8]) -> Result<BorrowReader<'_>>
{
    let utf8 = std::str::from_utf8(slice)
        .map_err(|e| Error::new(internal::Error::new(internal::ErrorKind::from(e))))?;

    Ok(BorrowReader::new(utf8))
}

/// Instantiate a new [`Read`]er from the given
/// [`std::io::Read`] source, consuming it to its end.
///
/// ## Errors
///
/// This function will error if the source returns an IO
/// error, or if its content is not valid UTF8
///
/// ## Examples
///
/// ```no_run
/// use std::fs::File;
///
/// use yamel::reader::from_read;
///
/// let file = File::open("config.yaml").unwrap();
///
/// let reader = from_read(file);
/// assert!(reader.is_ok())
/// ```
pub fn from_read<R>(mut src: R) -> Result<OwnedReader>
where
    R: io::Read,
{
    let mut buffer = Vec::new();

    src.read_to_end(&mut buffer)
        .map_err(|e| Error::new(internal::Error::new(internal::ErrorKind::from(e))))?;

    let utf8 = String::from_utf8(buffer).map_err(|e| {
        Error::new(internal::Error::new(internal::ErrorKind::from(e.utf8_error())))
    })?;

    Ok(OwnedReader::new(utf8))
}

/// Sealed interface over the sources a lexer can be driven
/// from. The single requirement is a fully resident UTF8
/// view of the stream.
pub trait Read: std::fmt::Debug + private::Sealed
{
    /// The stream's content, with any byte order mark
    /// already removed
    fn content(&self) -> &str;
}

/// A [`Read`]er borrowing its content from the caller
#[derive(Debug, Clone, Copy)]
pub struct BorrowReader<'de>
{
    data: &'de str,
}

impl<'de> BorrowReader<'de>
{
    pub(crate) fn new(data: &'de str) -> Self
    {
        Self {
            data: strip_bom(data),
        }
    }
}

impl<'de> Read for BorrowReader<'de>
{
    fn content(&self) -> &str
    {
        self.data
    }
}

/// A [`Read`]er owning content drained from an
/// [`io::Read`] source
#[derive(Debug, Clone)]
pub struct OwnedReader
{
    data: String,
}

impl OwnedReader
{
    pub(crate) fn new(data: String) -> Self
    {
        let trim = data.len() - strip_bom(&data).len();
        let mut data = data;

        if trim != 0
        {
            data.drain(..trim);
        }

        Self { data }
    }
}

impl Read for OwnedReader
{
    fn content(&self) -> &str
    {
        &self.data
    }
}

/// Recover a [`SourceMark`] for the given byte .offset into
/// .base, reproducing the full line the offset lands on.
///
/// Offsets past the end of .base saturate to the last line.
pub(crate) fn line_of(base: &str, offset: usize) -> SourceMark
{
    let offset = offset.min(base.len());

    let mut line: u64 = 1;
    let mut line_start = 0;

    for (at, byte) in base.bytes().enumerate().take(offset)
    {
        if byte == b'\n'
        {
            line += 1;
            line_start = at + 1;
        }
    }

    let line_end = base[line_start..]
        .find(|c| c == '\n' || c == '\r')
        .map_or(base.len(), |at| line_start + at);

    let column = base[line_start..offset].chars().count() as u64;

    SourceMark {
        line,
        column,
        line_content: base[line_start..line_end].to_string(),
    }
}

fn strip_bom(data: &str) -> &str
{
    data.strip_prefix('\u{FEFF}').unwrap_or(data)
}

/// Responsible for driving the lexer over a [`Read`]'s
/// content, buffering tokens for the parser's lookahead.
#[derive(Debug)]
pub(crate) struct TokenSource<'de>
{
    base:  &'de str,
    lexer: Lexer,
    queue: Queue<TokenEntry<'de>>,
    opts:  LexerFlags,
}

impl<'de> TokenSource<'de>
{
    pub fn new<T>(read: &'de T) -> Self
    where
        T: Read,
    {
        Self {
            base:  read.content(),
            lexer: Lexer::new(),
            queue: Queue::new(),
            opts:  LexerFlags::empty(),
        }
    }

    /// Peek .nth tokens past the head of the stream,
    /// tokenizing more of the source as needed
    pub fn peek_at(&mut self, nth: usize) -> ScanResult<Option<&TokenEntry<'de>>>
    {
        self.fill(nth)?;

        Ok(self.queue.peek_at(nth))
    }

    /// Peek the head of the stream
    pub fn peek(&mut self) -> ScanResult<Option<&TokenEntry<'de>>>
    {
        self.peek_at(0)
    }

    /// Pop the head of the stream
    pub fn pop(&mut self) -> ScanResult<Option<TokenEntry<'de>>>
    {
        self.fill(0)?;

        Ok(self.queue.pop())
    }

    /// Byte offset the lexer has tokenized up to; the
    /// position errors out of the lexer refer to
    pub fn scan_position(&self) -> usize
    {
        self.lexer.position()
    }

    /// Position of the token at the head of the stream, if
    /// any is buffered
    pub fn head_position(&self) -> Option<usize>
    {
        self.queue.peek().map(|entry| entry.read_at())
    }

    /// Recover the full line and position for the given
    /// byte .offset, for diagnostics
    pub fn mark_of(&self, offset: usize) -> SourceMark
    {
        line_of(self.base, offset)
    }

    fn fill(&mut self, nth: usize) -> ScanResult<()>
    {
        while self.queue.len() <= nth
        {
            if self.lexer.scan_tokens(self.opts, self.base, &mut self.queue)? == 0
            {
                break;
            }
        }

        Ok(())
    }
}

mod private
{
    pub trait Sealed {}

    impl<'de> Sealed for super::BorrowReader<'de> {}
    impl Sealed for super::OwnedReader {}
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bom_is_consumed()
    {
        let reader = from_utf8("\u{FEFF}key: value");

        assert_eq!(reader.content(), "key: value");
    }

    #[test]
    fn bytes_require_utf8()
    {
        assert!(try_from_bytes(b"plain").is_ok());
        assert!(try_from_bytes(&[b'a', 0xFF, 0xFE]).is_err());
    }

    #[test]
    fn read_source_is_drained()
    {
        let src = std::io::Cursor::new(b"\xEF\xBB\xBF- entry".to_vec());
        let reader = from_read(src).unwrap();

        assert_eq!(reader.content(), "- entry");
    }

    #[test]
    fn line_recovery()
    {
        let base = "first\nsecond line\r\nthird";

        let mark = line_of(base, base.find("second").unwrap() + 7);

        assert_eq!(mark.line, 2);
        assert_eq!(mark.column, 7);
        assert_eq!(mark.line_content, "second line");

        let last = line_of(base, base.len());
        assert_eq!(last.line, 3);
        assert_eq!(last.line_content, "third");
    }
}
