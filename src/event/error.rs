/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the errors that may surface while
//! parsing a YAML byte stream into events.

use std::fmt::{self, Debug};

use crate::{
    error::internal::ErrorCode,
    lexer::error::ScanError,
};

/// Result type used within [`yamel::event`](super)
pub(crate) type ParseResult<T> = std::result::Result<T, ParseError>;

/// Possible errors that can be encountered while parsing
/// YAML events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParseError
{
    /// A mismatch between the stream's actual state and
    /// what the parser is expecting occurred.
    CorruptStream,

    /// More than one `%YAML` directive was found inside a
    /// single document's context.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// %YAML 1.2
    /// %YAML 1.2
    /// #^^^^^^^^ DuplicateVersion
    /// ---
    /// ```
    DuplicateVersion,

    /// More than one `%TAG` directive was found _for the
    /// same handle_ inside a single document's context.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// %TAG !handle! my:custom:tag/
    /// %TAG !handle! my:other:tag/
    /// #    ^^^^^^^^ DuplicateTagDirective
    /// ---
    /// ```
    DuplicateTagDirective,

    /// The `%YAML` directive declared a version this parser
    /// cannot honor, and the parser was asked to be strict
    /// about it.
    UnsupportedVersion,

    /// A tag referenced a handle that has not been defined.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// key: !handle! value
    /// #    ^^^^^^^^ UndefinedTagHandle
    /// ```
    UndefinedTagHandle,

    /// A node carried more than one tag property.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// key: !!str !!str value
    /// #          ^^^^^ DuplicateTag
    /// ```
    DuplicateTag,

    /// A node carried more than one anchor property.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// key: &one &two value
    /// #         ^^^^ DuplicateAnchor
    /// ```
    DuplicateAnchor,

    /// An alias referenced an anchor that has not been
    /// declared earlier in the current document.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// a: *nowhere
    /// #  ^^^^^^^^ UnknownAlias
    /// ```
    UnknownAlias,

    /// In certain cases YAML requires an indication that
    /// another document is being started, necessitating
    /// a DocumentStart '---' symbol.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// document: 1
    /// ...
    /// document: 2 # wants a '---' first
    /// #^^^^^^ MissingDocumentStart
    /// ```
    MissingDocumentStart,

    /// A block sequence entry was found out of line with
    /// its sequence.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// - 1
    /// - 2
    /// foo: bar # should be: '- foo: bar'
    /// #^^ MisalignedBlockEntry
    /// ```
    MisalignedBlockEntry,

    /// Content was found at an indentation no open
    /// collection can claim.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// key: value
    ///    floating
    /// #  ^^^^^^^^ MisalignedIndentation
    /// ```
    MisalignedIndentation,

    /// A mapping key was found where none is legal, or an
    /// implicit key broke the single line / 1024 byte
    /// limits.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// spread
    /// over: lines
    /// #   ^ InvalidKey
    /// ```
    InvalidKey,

    /// A mapping value was found where none is legal.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// - entry
    ///   : value
    /// # ^ InvalidValue
    /// ```
    InvalidValue,

    /// A YAML node was required but not found.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// key: ]
    /// #    ^ MissingNode
    /// ```
    MissingNode,

    /// A flow sequence terminator (']') or continuation
    /// (',') symbol was required but not found.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// missing terminus: [1, 2, 3
    /// #                         ^ MissingFlowSequenceEntryOrEnd
    /// ```
    MissingFlowSequenceEntryOrEnd,

    /// A flow mapping terminator ('}') or continuation
    /// (',') symbol was required but not found.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// missing continuation: {first: value second: value}
    /// #                                  ^ MissingFlowMappingEntryOrEnd
    /// ```
    MissingFlowMappingEntryOrEnd,

    /// A flow collection terminator was found with no
    /// matching opener.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// lonely: ]
    /// #       ^ UnmatchedBracket
    /// ```
    UnmatchedBracket,

    /// The parser was expecting more tokens, but the byte
    /// stream finished unexpectedly.
    UnexpectedEOF,

    /// A numeric field in the stream overflowed.
    IntOverflow,

    /// An issue occurred during stream tokenization.
    Scanner(ScanError),
}

impl From<ScanError> for ParseError
{
    fn from(e: ScanError) -> Self
    {
        Self::Scanner(e)
    }
}

impl fmt::Display for ParseError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&ErrorCode::from(*self), f)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for ErrorCode
{
    fn from(err: ParseError) -> Self
    {
        match err
        {
            ParseError::CorruptStream => Self::CorruptStream,
            ParseError::DuplicateVersion => Self::DuplicateVersion,
            ParseError::DuplicateTagDirective => Self::DuplicateTagDirective,
            ParseError::UnsupportedVersion => Self::UnsupportedVersion,
            ParseError::UndefinedTagHandle => Self::UnknownTagHandle,
            ParseError::DuplicateTag => Self::DuplicateTag,
            ParseError::DuplicateAnchor => Self::DuplicateAnchor,
            ParseError::UnknownAlias => Self::UnknownAlias,
            ParseError::MissingDocumentStart => Self::MissingDocumentStart,
            ParseError::MisalignedBlockEntry => Self::MisalignedBlockEntry,
            ParseError::MisalignedIndentation => Self::MisalignedIndentation,
            ParseError::InvalidKey => Self::InvalidKey,
            ParseError::InvalidValue => Self::InvalidValue,
            ParseError::MissingNode => Self::MissingNode,
            ParseError::MissingFlowSequenceEntryOrEnd => Self::MissingFlowSequenceEntryOrEnd,
            ParseError::MissingFlowMappingEntryOrEnd => Self::MissingFlowMappingEntryOrEnd,
            ParseError::UnmatchedBracket => Self::UnmatchedBracket,
            ParseError::UnexpectedEOF => Self::UnexpectedEOF,
            ParseError::IntOverflow => Self::IntOverflow,
            ParseError::Scanner(e) => Self::from(e),
        }
    }
}
