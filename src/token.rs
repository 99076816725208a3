/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::hints::TypeHint;

pub(crate) type Slice<'a> = std::borrow::Cow<'a, str>;

/// Tokens that may be emitted by the YAML lexer
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a>
{
    /// The stream's end {virtual}
    StreamEnd,
    /// Start of a physical line, with the count of leading
    /// spaces
    LineStart(usize),
    /// A --- at column 0
    DirectivesEnd,
    /// A ... at column 0
    DocumentEnd,
    /// The %YAML directive name
    YamlDirective,
    /// The %TAG directive name
    TagDirective,
    /// One dotted component of a directive version
    VersionPart(Slice<'a>),
    /// A tag handle (`!`, `!!` or `!named!`)
    TagHandle(Slice<'a>),
    /// The prefix URI of a %TAG directive
    TagUri(Slice<'a>),
    /// The suffix following a tag handle on a node
    TagSuffix(Slice<'a>),
    /// A verbatim `!<uri>` tag
    VerbatimTag(Slice<'a>),
    /// The name of a directive that is neither YAML nor TAG
    UnknownDirective(Slice<'a>),
    /// One whitespace separated parameter of an unknown
    /// directive
    UnknownDirectiveParam(Slice<'a>),
    /// A '-' block sequence entry
    Dash,
    /// A '?' explicit key
    QuestionMark,
    /// A ':'
    Colon,
    /// A ','
    Comma,
    /// A '{'
    OpeningBrace,
    /// A '}'
    ClosingBrace,
    /// A '['
    OpeningBracket,
    /// A ']'
    ClosingBracket,
    /// A '|' literal block scalar header
    Pipe,
    /// A '>' folded block scalar header
    Greater,
    /// A '+' keep chomping indicator
    Plus,
    /// An explicit block scalar indentation indicator (1-9)
    BlockIndentationIndicator(u8),
    /// An anchor (&name)
    Anchor(Slice<'a>),
    /// An alias (*name)
    Alias(Slice<'a>),
    /// A quoted or block scalar (content, style)
    Scalar(Slice<'a>, ScalarStyle),
    /// A plain scalar fragment, classified against the core
    /// schema
    ScalarPart(Slice<'a>, TypeHint),
    /// A '#' comment's content
    Comment(Slice<'a>),
}

impl<'a> Token<'a>
{
    pub fn into_owned(self) -> Token<'static>
    {
        use Token::*;

        match self
        {
            StreamEnd => StreamEnd,
            LineStart(indent) => LineStart(indent),
            DirectivesEnd => DirectivesEnd,
            DocumentEnd => DocumentEnd,
            YamlDirective => YamlDirective,
            TagDirective => TagDirective,
            VersionPart(part) => VersionPart(Slice::Owned(part.into_owned())),
            TagHandle(handle) => TagHandle(Slice::Owned(handle.into_owned())),
            TagUri(uri) => TagUri(Slice::Owned(uri.into_owned())),
            TagSuffix(suffix) => TagSuffix(Slice::Owned(suffix.into_owned())),
            VerbatimTag(uri) => VerbatimTag(Slice::Owned(uri.into_owned())),
            UnknownDirective(name) => UnknownDirective(Slice::Owned(name.into_owned())),
            UnknownDirectiveParam(p) => UnknownDirectiveParam(Slice::Owned(p.into_owned())),
            Dash => Dash,
            QuestionMark => QuestionMark,
            Colon => Colon,
            Comma => Comma,
            OpeningBrace => OpeningBrace,
            ClosingBrace => ClosingBrace,
            OpeningBracket => OpeningBracket,
            ClosingBracket => ClosingBracket,
            Pipe => Pipe,
            Greater => Greater,
            Plus => Plus,
            BlockIndentationIndicator(n) => BlockIndentationIndicator(n),
            Anchor(name) => Anchor(Slice::Owned(name.into_owned())),
            Alias(name) => Alias(Slice::Owned(name.into_owned())),
            Scalar(contents, style) => Scalar(Slice::Owned(contents.into_owned()), style),
            ScalarPart(contents, hint) => ScalarPart(Slice::Owned(contents.into_owned()), hint),
            Comment(contents) => Comment(Slice::Owned(contents.into_owned())),
        }
    }
}

/// Discriminant mirror of [Token], cheap to copy and
/// compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker
{
    StreamEnd,
    LineStart,
    DirectivesEnd,
    DocumentEnd,
    YamlDirective,
    TagDirective,
    VersionPart,
    TagHandle,
    TagUri,
    TagSuffix,
    VerbatimTag,
    UnknownDirective,
    UnknownDirectiveParam,
    Dash,
    QuestionMark,
    Colon,
    Comma,
    OpeningBrace,
    ClosingBrace,
    OpeningBracket,
    ClosingBracket,
    Pipe,
    Greater,
    Plus,
    BlockIndentationIndicator,
    Anchor,
    Alias,
    Scalar,
    ScalarPart,
    Comment,
}

impl Marker
{
    fn from_token(t: &Token<'_>) -> Self
    {
        use Token::*;

        match t
        {
            StreamEnd => Self::StreamEnd,
            LineStart(_) => Self::LineStart,
            DirectivesEnd => Self::DirectivesEnd,
            DocumentEnd => Self::DocumentEnd,
            YamlDirective => Self::YamlDirective,
            TagDirective => Self::TagDirective,
            VersionPart(_) => Self::VersionPart,
            TagHandle(_) => Self::TagHandle,
            TagUri(_) => Self::TagUri,
            TagSuffix(_) => Self::TagSuffix,
            VerbatimTag(_) => Self::VerbatimTag,
            UnknownDirective(_) => Self::UnknownDirective,
            UnknownDirectiveParam(_) => Self::UnknownDirectiveParam,
            Dash => Self::Dash,
            QuestionMark => Self::QuestionMark,
            Colon => Self::Colon,
            Comma => Self::Comma,
            OpeningBrace => Self::OpeningBrace,
            ClosingBrace => Self::ClosingBrace,
            OpeningBracket => Self::OpeningBracket,
            ClosingBracket => Self::ClosingBracket,
            Pipe => Self::Pipe,
            Greater => Self::Greater,
            Plus => Self::Plus,
            BlockIndentationIndicator(_) => Self::BlockIndentationIndicator,
            Anchor(_) => Self::Anchor,
            Alias(_) => Self::Alias,
            Scalar(_, _) => Self::Scalar,
            ScalarPart(_, _) => Self::ScalarPart,
            Comment(_) => Self::Comment,
        }
    }
}

impl Default for Marker
{
    fn default() -> Self
    {
        Self::StreamEnd
    }
}

impl From<&'_ Token<'_>> for Marker
{
    fn from(t: &'_ Token<'_>) -> Self
    {
        Self::from_token(t)
    }
}

impl PartialEq<Token<'_>> for Marker
{
    fn eq(&self, other: &Token<'_>) -> bool
    {
        self == &Self::from(other)
    }
}

/// The style of a YAML scalar, corresponding to the
/// possible representations supported by YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle
{
    /// No delimiters, content was detected purely from
    /// stream context
    Plain,
    /// Scalar was quoted in single quotes (`''`)
    SingleQuote,
    /// Scalar was quoted in double quotes (`""`)
    DoubleQuote,
    /// Scalar was preceded by pipe (`|`)
    Literal,
    /// Scalar was preceded by an arrow ('>')
    Folded,
    /// No preference; only meaningful on events fed to the
    /// presenter, which picks a fitting style
    Any,
}
