/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The line at which the error occurred.
    pub fn line(&self) -> u64
    {
        self.inner.mark.as_ref().map_or(0, |m| m.line)
    }

    /// The column into the line where the error occurred.
    pub fn column(&self) -> u64
    {
        self.inner.mark.as_ref().map_or(0, |m| m.column)
    }

    /// The index into the byte stream at which the error
    /// occurred.
    pub fn at(&self) -> u64
    {
        self.inner.at
    }

    /// The source position of this error, if one was
    /// recorded.
    pub fn mark(&self) -> Option<&SourceMark>
    {
        self.inner.mark.as_ref()
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was
    ///   syntactically invalid
    /// - [`Category::Data`] The YAML stream contained data
    ///   that could not be parsed
    /// - [`Category::IO`] The underlying byte stream
    ///   surfaced an error while doing IO
    /// - [`Category::EOF`] The YAML stream ended
    ///   unexpectedly
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    /// Checks whether this error was contextualized with a
    /// source position.
    ///
    /// If this method returns false then
    /// [`line()`](#method.line) and
    /// [`column()`](#method.column) return meaningless
    /// values.
    pub fn has_context(&self) -> bool
    {
        self.inner.mark.is_some()
    }

    /// Boxes the internal error, returning new public error
    /// type
    pub(crate) fn new(err: internal::Error) -> Self
    {
        Self {
            inner: Box::new(err),
        }
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.inner.mark
        {
            Some(ref mark) =>
            {
                writeln!(
                    f,
                    "{} at line {}, column {}",
                    self.inner.kind,
                    mark.line,
                    mark.column + 1
                )?;

                mark.render(f)
            },
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Error")
            .field("kind", &self.inner.kind)
            .field("at", &self.inner.at)
            .field("mark", &self.inner.mark)
            .finish()
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        match self.inner.kind
        {
            internal::ErrorKind::Source(ref err) => err.source(),
            _ => None,
        }
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The underlying byte stream returned an error while
    /// attempting IO
    IO,

    /// The YAML stream was not syntactically valid
    Syntax,

    /// There was an issue with the data contained in the
    /// YAML stream (e.g: an integer overflowed)
    Data,

    /// The YAML stream unexpectedly terminated before it
    /// was appropriate to do so
    EOF,
}

/// A position in the source character stream, with enough
/// of the surrounding line retained to reproduce it in
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMark
{
    /// 1-based line number
    pub line:         u64,
    /// 0-based offset into the line
    pub column:       u64,
    /// The full content of the offending line
    pub line_content: String,
}

impl SourceMark
{
    /// Write the recorded line with a caret pointing at the
    /// column.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "  | {}", self.line_content)?;
        write!(f, "  | {:>width$}", "^", width = self.column as usize + 1)
    }
}

impl fmt::Display for SourceMark
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        self.render(f)
    }
}

/// A non fatal condition encountered while parsing,
/// delivered through the callback installed on the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning
{
    /// Where in the stream the condition was noticed
    pub mark:    SourceMark,
    /// Human readable description of the condition
    pub message: String,
}

impl fmt::Display for Warning
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(
            f,
            "{} at line {}, column {}",
            self.message,
            self.mark.line,
            self.mark.column + 1
        )?;

        self.mark.render(f)
    }
}

pub(crate) mod internal
{
    use std::{error::Error as StdError, fmt, io, str::Utf8Error};

    use super::{Category, SourceMark};

    /// Internal error representation used throughout the
    /// library.
    ///
    /// Contains enough metadata about the position of the
    /// error that we can contextualize it later
    pub(crate) struct Error
    {
        /// Error variant encountered
        pub kind: ErrorKind,
        /// Position in the byte stream that the error
        /// occurred
        pub at:   u64,
        /// Source position, if one could be recovered
        pub mark: Option<SourceMark>,
    }

    impl Error
    {
        /// Create a new, contextless [`Error`].
        ///
        /// Care should be taken to later apply context, if
        /// at all possible.
        pub fn new<T>(err: T) -> Self
        where
            T: Into<ErrorKind>,
        {
            Self {
                kind: err.into(),
                at:   0,
                mark: None,
            }
        }

        /// Attach a stream offset and source mark to this
        /// error.
        pub fn with_context(mut self, at: u64, mark: SourceMark) -> Self
        {
            self.at = at;
            self.mark = Some(mark);

            self
        }

        /// Categorize this error
        pub fn classify(&self) -> Category
        {
            match self.kind
            {
                ErrorKind::Code(code) => code.classify(),
                ErrorKind::Source(SourceError::IO(_)) => Category::IO,
                ErrorKind::Source(SourceError::UTF8(_)) => Category::Data,
            }
        }
    }

    /// Unified wrapper around the actual error variants we
    /// can produce
    #[derive(Debug)]
    pub(crate) enum ErrorKind
    {
        Code(ErrorCode),
        Source(SourceError),
    }

    impl fmt::Display for ErrorKind
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                Self::Code(code) => write!(f, "{}", code),
                Self::Source(err) => write!(f, "{}", err),
            }
        }
    }

    impl From<ErrorCode> for ErrorKind
    {
        fn from(code: ErrorCode) -> Self
        {
            Self::Code(code)
        }
    }

    /// Lightweight errors, specific to this library.
    ///
    /// This enum should never be polluted with large
    /// variants, or wrap underlying errors. Use
    /// [`SourceError`] for those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) enum ErrorCode
    {
        /*
         * ==== Lexer errors ====
         */
        /// Got end of stream while scanning a token
        UnexpectedEOF,

        /// An escape sequence in a double quoted scalar was
        /// not recognized
        UnknownEscape,

        /// A quoted scalar was missing its closing quote
        UnterminatedScalar,

        /// A tab character was used for indentation
        TabIndentation,

        /// A directive was syntactically invalid
        InvalidDirective,

        /// A directive version component was not a number
        InvalidVersion,

        /// A tag handle contained illegal characters
        InvalidTagHandle,

        /// A tag suffix was missing or contained illegal
        /// characters
        InvalidTagSuffix,

        /// An anchor or alias name was empty or contained
        /// illegal characters
        InvalidAnchorName,

        /// A block scalar header was malformed
        InvalidBlockScalar,

        /// A plain scalar started with, or ran into, an
        /// illegal character sequence
        InvalidPlainScalar,

        /// No token could be scanned at the current position
        UnknownDelimiter,

        /// An integer field overflowed
        IntOverflow,

        /*
         * ==== Structural errors ====
         */
        /// A mismatch between the stream's actual state and
        /// what the parser is expecting
        CorruptStream,

        /// A mapping key was found where none is legal, or
        /// an implicit key spanned multiple lines
        InvalidKey,

        /// A mapping value was found where none is legal
        InvalidValue,

        /// A block sequence entry was misaligned with its
        /// sequence
        MisalignedBlockEntry,

        /// A block collection was indented less than its
        /// parent allows
        MisalignedIndentation,

        /// A block indicator ('-', '?', '|', '>') occurred
        /// inside a flow collection
        BlockIndicatorInFlow,

        /// A flow collection terminator (']' or '}') had no
        /// matching opener
        UnmatchedBracket,

        /// A node carried two tag properties
        DuplicateTag,

        /// A node carried two anchor properties
        DuplicateAnchor,

        /// An alias referenced an anchor that has not been
        /// declared in the current document
        UnknownAlias,

        /// A tag shorthand referenced a handle that has not
        /// been declared
        UnknownTagHandle,

        /// A YAML node was required but not found
        MissingNode,

        /// In certain cases YAML requires an explicit '---'
        /// before further content
        MissingDocumentStart,

        /// A flow sequence was missing a ',' or ']'
        MissingFlowSequenceEntryOrEnd,

        /// A flow mapping was missing a ',' or '}'
        MissingFlowMappingEntryOrEnd,

        /*
         * ==== Semantic errors ====
         */
        /// More than one %YAML directive was found for one
        /// document
        DuplicateVersion,

        /// More than one %TAG directive was found for the
        /// same handle
        DuplicateTagDirective,

        /// The %YAML directive declared a version this
        /// parser cannot honor (fatal in strict mode only)
        UnsupportedVersion,

        /*
         * ==== Presenter errors ====
         */
        /// A second document was fed to a presenter in JSON
        /// mode
        SecondDocumentInJson,

        /// The requested node style cannot be represented in
        /// the surrounding context
        UnpresentableStyle,
    }

    impl ErrorCode
    {
        pub fn classify(self) -> Category
        {
            use ErrorCode::*;

            match self
            {
                UnexpectedEOF => Category::EOF,
                IntOverflow => Category::Data,
                _ => Category::Syntax,
            }
        }
    }

    impl fmt::Display for ErrorCode
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use ErrorCode::*;

            let msg = match self
            {
                UnexpectedEOF => "unexpected end of stream",
                UnknownEscape => "unknown escape sequence",
                UnterminatedScalar => "unterminated quoted scalar",
                TabIndentation => "tab character used for indentation",
                InvalidDirective => "invalid directive syntax",
                InvalidVersion => "invalid directive version",
                InvalidTagHandle => "invalid tag handle",
                InvalidTagSuffix => "invalid tag suffix",
                InvalidAnchorName => "invalid anchor or alias name",
                InvalidBlockScalar => "invalid block scalar header",
                InvalidPlainScalar => "invalid plain scalar",
                UnknownDelimiter => "no token recognized at this position",
                IntOverflow => "integer field overflowed",
                CorruptStream => "token stream is corrupt",
                InvalidKey => "mapping key is not allowed here",
                InvalidValue => "mapping value is not allowed here",
                MisalignedBlockEntry => "block sequence entry is misaligned",
                MisalignedIndentation => "indentation is misaligned",
                BlockIndicatorInFlow => "block indicator inside flow collection",
                UnmatchedBracket => "closing bracket has no matching opener",
                DuplicateTag => "node has more than one tag",
                DuplicateAnchor => "node has more than one anchor",
                UnknownAlias => "alias references an undeclared anchor",
                UnknownTagHandle => "tag shorthand references an undeclared handle",
                MissingNode => "expected a node",
                MissingDocumentStart => "expected '---' before further content",
                MissingFlowSequenceEntryOrEnd => "expected ',' or ']' in flow sequence",
                MissingFlowMappingEntryOrEnd => "expected ',' or '}' in flow mapping",
                DuplicateVersion => "duplicate %YAML directive",
                DuplicateTagDirective => "duplicate %TAG directive for handle",
                UnsupportedVersion => "unsupported YAML version",
                SecondDocumentInJson => "JSON output allows a single document",
                UnpresentableStyle => "style cannot be represented here",
            };

            f.write_str(msg)
        }
    }

    /// Heavyweight error variants which wrap an underlying
    /// cause.
    #[derive(Debug)]
    pub(crate) enum SourceError
    {
        UTF8(Utf8Error),
        IO(io::Error),
    }

    impl SourceError
    {
        pub fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match self
            {
                Self::UTF8(e) => Some(e),
                Self::IO(e) => Some(e),
            }
        }
    }

    impl fmt::Display for SourceError
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                Self::UTF8(e) => write!(f, "{}", e),
                Self::IO(e) => write!(f, "{}", e),
            }
        }
    }

    impl From<Utf8Error> for ErrorKind
    {
        fn from(e: Utf8Error) -> Self
        {
            Self::Source(SourceError::UTF8(e))
        }
    }

    impl From<io::Error> for ErrorKind
    {
        fn from(e: io::Error) -> Self
        {
            Self::Source(SourceError::IO(e))
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::{internal, Category, SourceMark};

    #[test]
    fn snippet_renders_caret_at_column()
    {
        let err = super::Error::new(
            internal::Error::new(internal::ErrorCode::InvalidKey).with_context(9, SourceMark {
                line:         3,
                column:       4,
                line_content: "key: [a, b".into(),
            }),
        );

        let rendered = format!("{}", err);

        assert_eq!(
            rendered,
            "mapping key is not allowed here at line 3, column 5\n  | key: [a, b\n  |     ^"
        );
    }

    #[test]
    fn classification()
    {
        let eof = internal::Error::new(internal::ErrorCode::UnexpectedEOF);
        let syntax = internal::Error::new(internal::ErrorCode::UnknownEscape);

        assert_eq!(eof.classify(), Category::EOF);
        assert_eq!(syntax.classify(), Category::Syntax);
    }
}
