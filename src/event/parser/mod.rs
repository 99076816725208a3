/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes the [`Parser`] struct. The Parser
//! pulls tokens from the lexer and converts them into a
//! series of [`Event`]s, driving a state machine whose
//! stack mirrors the collections currently open in the
//! stream.
//!
//! Block structure is reconstructed from the LineStart
//! tokens the lexer issues: every handler for an open block
//! collection knows the column its indicator sits at, and a
//! line starting below that column closes the collection.
//! Implicit keys are discovered by looking one token past a
//! scalar for a same line ':'.
//!
//! The parser owns the tag library it resolves shorthands
//! against and the anchor table aliases are resolved
//! through; the latter is cleared at every document
//! boundary.

use std::fmt::{self, Debug};

use atoi::atoi;

use crate::{
    anchors::AnchorTable,
    error::{internal, Error, Warning},
    event::{
        error::{ParseError, ParseResult},
        state::{Flags, State, StateMachine, O_FIRST, O_IMPLICIT, O_NIL},
        types::{
            Alias, CollectionStyle, DocumentEnd, DocumentStart, Event, EventData, Mapping, Node,
            ScalarData, Sequence, Slice, StreamEncoding, StreamStart, VersionDirective,
            DEFAULT_VERSION,
        },
    },
    reader::{Read, TokenSource},
    tags::{TagId, TagLibrary, TAG_EXCLAMATION, TAG_NULL, TAG_QUESTION},
    token::{Marker, ScalarStyle, Token},
};

#[macro_use]
mod macros;

/// Maximum distance between an implicit key's first byte
/// and its ':', per the YAML specification
const KEY_WINDOW: usize = 1024;

/// The [`Parser`] translates a [`Read`] stream into
/// [`Event`]s, pulled one at a time with
/// [`next_event`](#method.next_event), or through the
/// [`Iterator`] implementation.
///
/// A Parser iteratively consumes the stream, ending when
/// the `StreamEnd` event has been returned, after which it
/// always returns None. Any error is terminal; the same
/// error is returned on every subsequent request.
pub struct Parser<'de>
{
    source: TokenSource<'de>,
    state:  StateMachine,

    tags:    TagLibrary,
    anchors: AnchorTable,
    props:   Properties<'de>,

    strict:     bool,
    on_warning: Option<Box<dyn FnMut(Warning) + 'de>>,

    done: bool,
}

impl<'de> Parser<'de>
{
    /// Instantiate a new [`Parser`] over the given
    /// [`Read`]er, resolving tags against the core schema
    /// library.
    pub fn new<T>(read: &'de T) -> Self
    where
        T: Read,
    {
        Self::with_tags(read, TagLibrary::core())
    }

    /// Instantiate a new [`Parser`] resolving tags against
    /// the provided library.
    pub fn with_tags<T>(read: &'de T, tags: TagLibrary) -> Self
    where
        T: Read,
    {
        Self {
            source: TokenSource::new(read),
            state: StateMachine::default(),
            tags,
            anchors: AnchorTable::new(),
            props: Properties::default(),
            strict: false,
            on_warning: None,
            done: false,
        }
    }

    /// Treat a `%YAML` version this parser cannot honor as
    /// an error rather than a warning.
    pub fn strict(mut self, strict: bool) -> Self
    {
        self.strict = strict;

        self
    }

    /// Install a callback receiving the non fatal
    /// [`Warning`]s encountered while parsing.
    pub fn on_warning<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Warning) + 'de,
    {
        self.on_warning = Some(Box::new(callback));

        self
    }

    /// Access the tag library, including any URIs
    /// registered while parsing. Useful for resolving the
    /// [`TagId`]s carried by the produced events.
    pub fn tags(&self) -> &TagLibrary
    {
        &self.tags
    }

    /// Consume the parser, keeping the tag library.
    pub fn into_tags(self) -> TagLibrary
    {
        self.tags
    }

    /// Fetch the next [`Event`] from the stream, or None
    /// once the stream has finished.
    pub fn next_event(&mut self) -> crate::error::Result<Option<Event<'de>>>
    {
        match self.get_next_event()
        {
            Ok(event) => Ok(event),
            Err(err) =>
            {
                self.done = true;

                Err(self.contextualize(err))
            },
        }
    }

    /// Runs the state machine until it either provides the
    /// next [`Event`], an error, or the state machine is
    /// finished
    fn get_next_event(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        let mut event = None;

        // Main loop, continue until an event is produced,
        // an error is returned or we're marked as finished.
        while !self.done && event.is_none()
        {
            event = self.state_transition()?;
        }

        Ok(event)
    }

    /// Process the next event in the state machine, running
    /// the associated routine
    fn state_transition(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        match *self.state.top()
        {
            State::StreamStart => self.stream_start(),
            State::DocumentStart(opts) => self.document_start(opts),
            State::DocumentContent => self.document_content(),
            State::DocumentEnd => self.document_end(),
            State::BlockNode => self.node(BLOCK_CONTEXT, 0, Some(0)),
            State::BlockSequenceEntry { column } => self.block_sequence_entry(column),
            State::BlockMappingKey { column } => self.block_mapping_key(column),
            State::BlockMappingValue { column } => self.block_mapping_value(column),
            State::FlowSequenceEntry(opts) => self.flow_sequence_entry(opts),
            State::FlowSequenceMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceMappingEnd => self.flow_sequence_entry_mapping_end(),
            State::FlowMappingKey(opts) => self.flow_mapping_key(opts),
            State::FlowMappingValue => self.flow_mapping_value(),

            // State machine terminus, no more events will be produced by this parser
            State::StreamEnd => self.stream_end(),
        }
    }

    /// Start of the event stream; always produced, even for
    /// an empty input
    fn stream_start(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        state!(~self, -> State::DocumentStart(O_IMPLICIT | O_FIRST));

        let event = Event::new(
            0,
            0,
            EventData::StreamStart(StreamStart {
                encoding: StreamEncoding::UTF8,
            }),
        );

        Ok(Some(event))
    }

    /// End of the event stream, set ourself to done and
    /// produce the associated Event, if we haven't already
    fn stream_end(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        if self.done
        {
            return Ok(None);
        }

        self.done = true;

        let mark = self.source.scan_position();
        let event = Event::new(mark, mark, EventData::StreamEnd);

        Ok(Some(event))
    }

    /// Start of a new document: process any directives,
    /// determine whether the document is explicit, and
    /// prime the state machine for its content
    fn document_start(&mut self, opts: Flags) -> ParseResult<Option<Event<'de>>>
    {
        let first = opts.contains(O_FIRST);
        let implicit_ok = first || opts.contains(O_IMPLICIT);

        // Skip line markers and any stray '...' separators
        while let Some(peek) = peek!(@ self.source)?
        {
            match peek.marker
            {
                Marker::LineStart => pop!(self.source).map(drop)?,
                Marker::DocumentEnd if !first => pop!(self.source).map(drop)?,
                _ => break,
            }
        }

        let (version, saw_directive) = self.scan_directives()?;

        let peek = match peek!(@ self.source)?
        {
            Some(peek) => peek,
            // Lexer always terminates the stream with a
            // StreamEnd token
            None => return Err(ParseError::CorruptStream),
        };

        match peek.marker
        {
            // Explicit document
            Marker::DirectivesEnd =>
            {
                let mark = peek.read;
                pop!(self.source)?;

                self.reset_document_state();

                state!(~self, >> State::DocumentEnd, -> State::DocumentContent);

                Ok(Some(Event::new(
                    mark,
                    mark,
                    EventData::DocumentStart(DocumentStart {
                        explicit: true,
                        version,
                    }),
                )))
            },
            // Stream exhausted; the first document is still
            // owed to the caller, complete with its empty
            // root node
            Marker::StreamEnd if first =>
            {
                self.reset_document_state();

                state!(~self, >> State::DocumentEnd, -> State::DocumentContent);

                Ok(Some(Event::new(
                    peek.read,
                    peek.read,
                    EventData::DocumentStart(DocumentStart {
                        explicit: false,
                        version,
                    }),
                )))
            },
            Marker::StreamEnd =>
            {
                if saw_directive
                {
                    return Err(ParseError::MissingDocumentStart);
                }

                state!(~self, -> State::StreamEnd);

                Ok(None)
            },
            // Bare content; only legal for the stream's
            // first document, and never after directives
            _ =>
            {
                if !implicit_ok || saw_directive
                {
                    return Err(ParseError::MissingDocumentStart);
                }

                self.reset_document_state();

                state!(~self, >> State::DocumentEnd, -> State::BlockNode);

                Ok(Some(Event::new(
                    peek.read,
                    peek.read,
                    EventData::DocumentStart(DocumentStart {
                        explicit: false,
                        version,
                    }),
                )))
            },
        }
    }

    /// Collect the directives preceding a document,
    /// returning the declared version (if any) and whether
    /// any directive was seen
    fn scan_directives(&mut self) -> ParseResult<(Option<VersionDirective>, bool)>
    {
        let mut version = None;
        let mut saw_directive = false;

        loop
        {
            let peek = match peek!(@ self.source)?
            {
                Some(peek) => peek,
                None => break,
            };

            match peek.marker
            {
                Marker::LineStart => pop!(self.source).map(drop)?,
                Marker::YamlDirective =>
                {
                    if version.is_some()
                    {
                        return Err(ParseError::DuplicateVersion);
                    }

                    let mark = peek.read;
                    pop!(self.source)?;

                    let major = self.version_part()?;
                    let minor = self.version_part()?;
                    let declared = VersionDirective { major, minor };

                    if declared != DEFAULT_VERSION
                    {
                        if self.strict
                        {
                            return Err(ParseError::UnsupportedVersion);
                        }

                        self.warn(
                            mark,
                            format!(
                                "unsupported YAML version {}.{}, parsing as 1.2",
                                major, minor
                            ),
                        );
                    }

                    version = Some(declared);
                    saw_directive = true;
                },
                Marker::TagDirective =>
                {
                    pop!(self.source)?;

                    let handle = match pop!(self.source)?.into_token()
                    {
                        Token::TagHandle(handle) => handle,
                        _ => return Err(ParseError::CorruptStream),
                    };
                    let prefix = match pop!(self.source)?.into_token()
                    {
                        Token::TagUri(uri) => uri,
                        _ => return Err(ParseError::CorruptStream),
                    };

                    self.tags
                        .declare_handle(&handle, &prefix)
                        .map_err(|_| ParseError::DuplicateTagDirective)?;

                    saw_directive = true;
                },
                Marker::UnknownDirective =>
                {
                    let mark = peek.read;
                    let name = match pop!(self.source)?.into_token()
                    {
                        Token::UnknownDirective(name) => name.into_owned(),
                        _ => return Err(ParseError::CorruptStream),
                    };

                    while let Some(Marker::UnknownDirectiveParam) = peek!(self.source, 0)?
                    {
                        pop!(self.source)?;
                    }

                    self.warn(mark, format!("ignoring unknown directive %{}", name));

                    saw_directive = true;
                },
                _ => break,
            }
        }

        Ok((version, saw_directive))
    }

    fn version_part(&mut self) -> ParseResult<u16>
    {
        match pop!(self.source)?.into_token()
        {
            Token::VersionPart(digits) =>
            {
                atoi::<u16>(digits.as_bytes()).ok_or(ParseError::IntOverflow)
            },
            _ => Err(ParseError::CorruptStream),
        }
    }

    /// An explicit document's content: either a root node,
    /// or nothing, in which case the root is an empty
    /// scalar
    fn document_content(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        self.skip_line_starts()?;

        let peek = peek!(self.source)?;

        match peek.marker
        {
            Marker::DocumentEnd | Marker::DirectivesEnd | Marker::StreamEnd =>
            {
                state!(~self, << None);

                let tag = match self.tags.uri_of(TAG_NULL)
                {
                    Some(_) => TAG_NULL,
                    None => TAG_QUESTION,
                };

                Ok(Some(Event::new(
                    peek.read,
                    peek.read,
                    EventData::Scalar(Node::new(None, tag, ScalarData::empty())),
                )))
            },
            _ => self.node(BLOCK_CONTEXT, 0, Some(0)),
        }
    }

    /// End of document, determine if it is explicit, and
    /// return the associated Event
    fn document_end(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        self.skip_line_starts()?;

        let mut explicit = false;
        let mark = match peek!(@ self.source)?
        {
            Some(peek) if peek.marker == Marker::DocumentEnd =>
            {
                explicit = true;
                pop!(self.source)?;

                peek.read
            },
            Some(peek) => peek.read,
            None => self.source.scan_position(),
        };

        // Anchors do not cross document boundaries
        self.anchors.reset();
        self.tags.reset_handles();

        state!(~self, -> State::DocumentStart(O_NIL));

        Ok(Some(Event::new(
            mark,
            mark,
            EventData::DocumentEnd(DocumentEnd { explicit }),
        )))
    }

    /// Produce a node or alias [`Event`], or prime the
    /// state machine for the collection that starts here.
    ///
    /// .min_indent is the column a node on a fresh line
    /// must clear to belong to the caller; .flush names the
    /// column at which a block sequence may sit flush with
    /// its parent mapping key.
    fn node(
        &mut self,
        block: bool,
        min_indent: usize,
        flush: Option<usize>,
    ) -> ParseResult<Option<Event<'de>>>
    {
        // Collect any properties, consuming line markers
        // that keep the node itself on a later line
        loop
        {
            let peek = peek!(self.source)?;

            match peek.marker
            {
                Marker::LineStart =>
                {
                    let dash_follows = peek!(self.source, 1)? == Some(Marker::Dash);
                    let flush_ok =
                        block && dash_follows && flush.map_or(false, |f| peek.indent >= f);

                    if peek.indent >= min_indent || flush_ok
                    {
                        pop!(self.source)?;
                    }
                    else
                    {
                        // Nothing here for us; the node is
                        // implied empty and the line belongs
                        // to an enclosing collection
                        let event = self.empty_scalar(peek.read)?;
                        state!(~self, << None);

                        return Ok(Some(event));
                    }
                },
                Marker::Anchor | Marker::TagHandle | Marker::VerbatimTag =>
                {
                    self.collect_properties()?;
                },
                _ => break,
            }
        }

        let peek = peek!(self.source)?;

        // A scalar followed by a same line ':' is the first
        // implicit key of a block mapping
        let implicit_mapping = block
            && matches!(peek.marker, Marker::ScalarPart | Marker::Scalar)
            && implicit_key_style(&mut self.source)?
            && peek!(self.source, 1)? == Some(Marker::Colon);

        match peek.marker
        {
            // An alias is a leaf; properties cannot apply
            // to it
            Marker::Alias =>
            {
                if self.props.any()
                {
                    return Err(ParseError::MissingNode);
                }

                let entry = pop!(self.source)?;
                let name = match entry.into_token()
                {
                    Token::Alias(name) => name,
                    _ => return Err(ParseError::CorruptStream),
                };

                let target = self
                    .anchors
                    .lookup(&name)
                    .ok_or(ParseError::UnknownAlias)?;

                state!(~self, << None);

                Ok(Some(Event::new(
                    peek.read,
                    peek.read,
                    EventData::Alias(Alias { target }),
                )))
            },

            Marker::ScalarPart | Marker::Scalar if implicit_mapping =>
            {
                // Properties on the key's own line belong
                // to the key; earlier ones to the mapping
                let for_key = self.props.any() && self.props.line == peek.line;

                let event = self.collection_start(
                    peek.read,
                    CollectionStyle::Block,
                    MAPPING,
                    !for_key,
                )?;

                state!(~self, -> State::BlockMappingKey { column: peek.column });

                Ok(Some(event))
            },

            // Any other scalar is a leaf
            Marker::ScalarPart | Marker::Scalar =>
            {
                let entry = pop!(self.source)?;
                let (data, style) = match entry.into_token()
                {
                    Token::ScalarPart(data, _) => (data, ScalarStyle::Plain),
                    Token::Scalar(data, style) => (data, style),
                    _ => return Err(ParseError::CorruptStream),
                };

                let event = self.scalar_node(peek.read, data, style)?;
                state!(~self, << None);

                Ok(Some(event))
            },

            // Start of a block sequence
            Marker::Dash if block =>
            {
                let event =
                    self.collection_start(peek.read, CollectionStyle::Block, !MAPPING, true)?;

                state!(~self, -> State::BlockSequenceEntry { column: peek.column });

                Ok(Some(event))
            },

            // Start of a block mapping with an explicit or
            // empty key
            Marker::QuestionMark | Marker::Colon if block =>
            {
                let event =
                    self.collection_start(peek.read, CollectionStyle::Block, MAPPING, true)?;

                state!(~self, -> State::BlockMappingKey { column: peek.column });

                Ok(Some(event))
            },

            Marker::Dash => Err(ParseError::Scanner(
                crate::lexer::error::ScanError::BlockIndicatorInFlow,
            )),

            // Start of a flow sequence
            Marker::OpeningBracket =>
            {
                pop!(self.source)?;

                let event =
                    self.collection_start(peek.read, CollectionStyle::Flow, !MAPPING, true)?;

                state!(~self, -> State::FlowSequenceEntry(O_FIRST));

                Ok(Some(event))
            },

            // Start of a flow mapping
            Marker::OpeningBrace =>
            {
                pop!(self.source)?;

                let event =
                    self.collection_start(peek.read, CollectionStyle::Flow, MAPPING, true)?;

                state!(~self, -> State::FlowMappingKey(O_FIRST));

                Ok(Some(event))
            },

            // A block scalar; its header pieces precede the
            // constructed content
            Marker::Pipe | Marker::Greater =>
            {
                pop!(self.source)?;

                while let Some(
                    Marker::BlockIndentationIndicator | Marker::Plus | Marker::Dash,
                ) = peek!(self.source, 0)?
                {
                    pop!(self.source)?;
                }

                let entry = pop!(self.source)?;
                let (data, style) = match entry.into_token()
                {
                    Token::Scalar(data, style) => (data, style),
                    _ => return Err(ParseError::CorruptStream),
                };

                let event = self.scalar_node(peek.read, data, style)?;
                state!(~self, << None);

                Ok(Some(event))
            },

            // The stream or document ending implies an
            // empty node
            Marker::StreamEnd | Marker::DocumentEnd | Marker::DirectivesEnd =>
            {
                let event = self.empty_scalar(peek.read)?;
                state!(~self, << None);

                Ok(Some(event))
            },

            Marker::ClosingBracket | Marker::ClosingBrace if block =>
            {
                Err(ParseError::UnmatchedBracket)
            },

            _ => Err(ParseError::MissingNode),
        }
    }

    /// Block context sequence entry, return the associated
    /// node or sequence end [`Event`]
    fn block_sequence_entry(&mut self, column: usize) -> ParseResult<Option<Event<'de>>>
    {
        let peek = peek!(self.source)?;

        match peek.marker
        {
            Marker::LineStart =>
            {
                let dash_follows = peek!(self.source, 1)? == Some(Marker::Dash);

                if peek.indent == column && dash_follows
                {
                    pop!(self.source)?;
                    let dash = pop!(self.source)?;
                    debug_assert_eq!(dash.marker(), Marker::Dash);

                    state!(~self, >> State::BlockSequenceEntry { column });

                    self.node(BLOCK_CONTEXT, column + 1, None)
                }
                else if peek.indent > column
                {
                    Err(ParseError::MisalignedIndentation)
                }
                // The line belongs to something enclosing
                // us; the sequence is finished
                else
                {
                    state!(~self, << None);

                    Ok(Some(Event::new(peek.read, peek.read, EventData::SequenceEnd)))
                }
            },
            // An entry on the same line as the previous
            // one's indicator, or the sequence's first
            Marker::Dash =>
            {
                pop!(self.source)?;

                state!(~self, >> State::BlockSequenceEntry { column });

                self.node(BLOCK_CONTEXT, column + 1, None)
            },
            Marker::StreamEnd | Marker::DocumentEnd | Marker::DirectivesEnd =>
            {
                state!(~self, << None);

                Ok(Some(Event::new(peek.read, peek.read, EventData::SequenceEnd)))
            },
            _ => Err(ParseError::MisalignedBlockEntry),
        }
    }

    /// Block context mapping key, return the appropriate
    /// node or mapping end [`Event`], priming the machine
    /// for the value in the former case
    fn block_mapping_key(&mut self, column: usize) -> ParseResult<Option<Event<'de>>>
    {
        let peek = peek!(self.source)?;

        if peek.marker == Marker::LineStart
        {
            let next_starts_key = matches!(
                peek!(self.source, 1)?,
                Some(
                    Marker::QuestionMark
                        | Marker::Colon
                        | Marker::ScalarPart
                        | Marker::Scalar
                        | Marker::Anchor
                        | Marker::TagHandle
                        | Marker::VerbatimTag
                        | Marker::Alias
                )
            );

            if peek.indent == column && next_starts_key
            {
                pop!(self.source)?;
            }
            else if peek.indent > column
            {
                return Err(ParseError::MisalignedIndentation);
            }
            else
            {
                state!(~self, << None);

                return Ok(Some(Event::new(peek.read, peek.read, EventData::MappingEnd)));
            }
        }

        let peek = peek!(self.source)?;

        match peek.marker
        {
            // Explicit key
            Marker::QuestionMark =>
            {
                pop!(self.source)?;

                state!(~self, >> State::BlockMappingValue { column });

                self.node(BLOCK_CONTEXT, column + 1, None)
            },
            // An empty key; the ':' stays for the value
            // handler
            Marker::Colon =>
            {
                let event = self.empty_scalar(peek.read)?;

                state!(~self, -> State::BlockMappingValue { column });

                Ok(Some(event))
            },
            // An alias key
            Marker::Alias =>
            {
                let entry = pop!(self.source)?;
                let name = match entry.into_token()
                {
                    Token::Alias(name) => name,
                    _ => return Err(ParseError::CorruptStream),
                };

                let target = self
                    .anchors
                    .lookup(&name)
                    .ok_or(ParseError::UnknownAlias)?;

                state!(~self, -> State::BlockMappingValue { column });

                Ok(Some(Event::new(
                    peek.read,
                    peek.read,
                    EventData::Alias(Alias { target }),
                )))
            },
            Marker::StreamEnd | Marker::DocumentEnd | Marker::DirectivesEnd =>
            {
                state!(~self, << None);

                Ok(Some(Event::new(peek.read, peek.read, EventData::MappingEnd)))
            },
            // An implicit key: properties, then a scalar,
            // then a same line ':'
            _ =>
            {
                self.collect_properties()?;

                let key = peek!(self.source)?;

                if !matches!(key.marker, Marker::ScalarPart | Marker::Scalar)
                {
                    return Err(ParseError::InvalidKey);
                }

                let entry = pop!(self.source)?;
                let (data, style) = match entry.into_token()
                {
                    Token::ScalarPart(data, _) => (data, ScalarStyle::Plain),
                    Token::Scalar(data, style) => (data, style),
                    _ => return Err(ParseError::CorruptStream),
                };

                // The ':' must follow on the same line,
                // within the implicit key window
                match peek!(@ self.source)?
                {
                    Some(colon)
                        if colon.marker == Marker::Colon
                            && colon.line == key.line
                            && colon.read.saturating_sub(key.read) <= KEY_WINDOW =>
                    {},
                    _ => return Err(ParseError::InvalidKey),
                }

                let event = self.scalar_node(key.read, data, style)?;

                state!(~self, -> State::BlockMappingValue { column });

                Ok(Some(event))
            },
        }
    }

    /// Block context mapping value, return the appropriate
    /// node [`Event`], implied empty if the ':' never came
    fn block_mapping_value(&mut self, column: usize) -> ParseResult<Option<Event<'de>>>
    {
        let mut peek = peek!(self.source)?;

        // An explicit key's ':' sits on its own line
        if peek.marker == Marker::LineStart
            && peek.indent == column
            && peek!(self.source, 1)? == Some(Marker::Colon)
        {
            pop!(self.source)?;
            peek = peek!(self.source)?;
        }

        match peek.marker
        {
            Marker::Colon =>
            {
                pop!(self.source)?;

                state!(~self, >> State::BlockMappingKey { column });

                self.node(BLOCK_CONTEXT, column + 1, Some(column))
            },
            // No value indicator; the value is implied
            // empty and the mapping continues
            _ =>
            {
                let event = self.empty_scalar(peek.read)?;

                state!(~self, -> State::BlockMappingKey { column });

                Ok(Some(event))
            },
        }
    }

    /// Flow context sequence entry, return the associated
    /// node or sequence end [`Event`]
    fn flow_sequence_entry(&mut self, opts: Flags) -> ParseResult<Option<Event<'de>>>
    {
        let first = opts.contains(O_FIRST);

        self.skip_line_starts()?;

        let mut peek = peek!(self.source)?;

        if peek.marker == Marker::ClosingBracket
        {
            return self.flow_sequence_end(peek.read);
        }

        /*
         * If its not the first entry, there *must* be a
         * ',' e.g:
         *
         * [ one, two, three]
         *  ^   ^    ^
         *  |   But the rest must have an entry
         *  Okay to skip the first ','
         */
        if !first
        {
            if peek.marker != Marker::Comma
            {
                return Err(ParseError::MissingFlowSequenceEntryOrEnd);
            }

            pop!(self.source)?;
            self.skip_line_starts()?;

            peek = peek!(self.source)?;
        }

        match peek.marker
        {
            // Trailing commas are allowed in YAML flow
            // collections
            Marker::ClosingBracket => self.flow_sequence_end(peek.read),

            /*
             * A compact mapping with an explicit or empty
             * key:
             *
             *  [ ? key: value, : value ]
             *
             * Note the complete lack of braces; the single
             * pair mapping is implied by the entry.
             */
            Marker::QuestionMark =>
            {
                pop!(self.source)?;

                let event =
                    self.collection_start(peek.read, CollectionStyle::Flow, MAPPING, true)?;

                state!(~self, -> State::FlowSequenceMappingKey);

                Ok(Some(event))
            },
            Marker::Colon =>
            {
                let event =
                    self.collection_start(peek.read, CollectionStyle::Flow, MAPPING, true)?;

                state!(~self, -> State::FlowSequenceMappingKey);

                Ok(Some(event))
            },

            /*
             * A compact mapping with an implicit key:
             *
             *  [  key: value ,  entryN... ]
             *    ^----------^ Note the lack of '{' '}'s
             *
             * This is, in YAML's opinion, completely fine
             * and *only* supports exactly 1 KV pair.
             *
             * See:
             *     yaml.org/spec/1.2.2/#example-flow-mapping-adjacent-values
             */
            _ if self.compact_key_ahead()? =>
            {
                let event =
                    self.collection_start(peek.read, CollectionStyle::Flow, MAPPING, true)?;

                state!(~self, -> State::FlowSequenceMappingKey);

                Ok(Some(event))
            },

            // Otherwise it must be a node
            _ =>
            {
                state!(~self, >> State::FlowSequenceEntry(O_NIL));

                self.node(!BLOCK_CONTEXT, 0, None)
            },
        }
    }

    fn flow_sequence_end(&mut self, mark: usize) -> ParseResult<Option<Event<'de>>>
    {
        pop!(self.source)?;

        state!(~self, << None);

        Ok(Some(Event::new(mark, mark, EventData::SequenceEnd)))
    }

    /// Flow mapping key with parent flow sequence
    fn flow_sequence_entry_mapping_key(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        self.skip_line_starts()?;

        let peek = peek!(self.source)?;

        /*
         * If the token is one of these, then the key is
         * implied empty, e.g:
         *
         * [  : a value, ]
         *   ^ key is implied here
         */
        let empty = matches!(
            peek.marker,
            Marker::Colon | Marker::Comma | Marker::ClosingBracket
        );

        if empty
        {
            let event = self.empty_scalar(peek.read)?;

            state!(~self, -> State::FlowSequenceMappingValue);

            Ok(Some(event))
        }
        else
        {
            state!(~self, >> State::FlowSequenceMappingValue);

            self.node(!BLOCK_CONTEXT, 0, None)
        }
    }

    /// Flow mapping value with parent flow sequence
    fn flow_sequence_entry_mapping_value(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        self.skip_line_starts()?;

        let peek = peek!(self.source)?;

        if peek.marker == Marker::Colon
        {
            pop!(self.source)?;
            self.skip_line_starts()?;

            let next = peek!(self.source)?;

            if matches!(next.marker, Marker::Comma | Marker::ClosingBracket)
            {
                let event = self.empty_scalar(next.read)?;

                state!(~self, -> State::FlowSequenceMappingEnd);

                Ok(Some(event))
            }
            else
            {
                state!(~self, >> State::FlowSequenceMappingEnd);

                self.node(!BLOCK_CONTEXT, 0, None)
            }
        }
        // The value is implied empty
        else
        {
            let event = self.empty_scalar(peek.read)?;

            state!(~self, -> State::FlowSequenceMappingEnd);

            Ok(Some(event))
        }
    }

    /// Clean up after a flow_sequence->flow_mapping state
    /// loop, returning the appropriate mapping end
    /// [`Event`]
    fn flow_sequence_entry_mapping_end(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        let mark = self.source.scan_position();

        state!(~self, -> State::FlowSequenceEntry(O_NIL));

        Ok(Some(Event::new(mark, mark, EventData::MappingEnd)))
    }

    /// Flow context mapping key, return the appropriate
    /// node or mapping end [`Event`]
    fn flow_mapping_key(&mut self, opts: Flags) -> ParseResult<Option<Event<'de>>>
    {
        let first = opts.contains(O_FIRST);

        self.skip_line_starts()?;

        let mut peek = peek!(self.source)?;

        if peek.marker == Marker::ClosingBrace
        {
            return self.flow_mapping_end(peek.read);
        }

        if !first
        {
            if peek.marker != Marker::Comma
            {
                return Err(ParseError::MissingFlowMappingEntryOrEnd);
            }

            pop!(self.source)?;
            self.skip_line_starts()?;

            peek = peek!(self.source)?;
        }

        match peek.marker
        {
            Marker::ClosingBrace => self.flow_mapping_end(peek.read),

            // An explicit key
            Marker::QuestionMark =>
            {
                pop!(self.source)?;
                self.skip_line_starts()?;

                let next = peek!(self.source)?;

                if matches!(
                    next.marker,
                    Marker::Colon | Marker::Comma | Marker::ClosingBrace
                )
                {
                    let event = self.empty_scalar(next.read)?;

                    state!(~self, -> State::FlowMappingValue);

                    Ok(Some(event))
                }
                else
                {
                    state!(~self, >> State::FlowMappingValue);

                    self.node(!BLOCK_CONTEXT, 0, None)
                }
            },

            /*
             * An implied empty key, e.g:
             *
             * { : a value, another: value }
             *  ^ key is implied here
             */
            Marker::Colon =>
            {
                let event = self.empty_scalar(peek.read)?;

                state!(~self, -> State::FlowMappingValue);

                Ok(Some(event))
            },

            // Otherwise the key is a node
            _ =>
            {
                state!(~self, >> State::FlowMappingValue);

                self.node(!BLOCK_CONTEXT, 0, None)
            },
        }
    }

    fn flow_mapping_end(&mut self, mark: usize) -> ParseResult<Option<Event<'de>>>
    {
        pop!(self.source)?;

        state!(~self, << None);

        Ok(Some(Event::new(mark, mark, EventData::MappingEnd)))
    }

    /// Flow context mapping value, implied empty if the ':'
    /// never came
    ///
    /// ```yaml
    /// { hello }
    /// #      ^ Note the complete lack of *both* entry and
    /// #        value indicators; YAML reads this as
    /// #        { hello: "" }
    /// ```
    fn flow_mapping_value(&mut self) -> ParseResult<Option<Event<'de>>>
    {
        self.skip_line_starts()?;

        let peek = peek!(self.source)?;

        if peek.marker == Marker::Colon
        {
            pop!(self.source)?;
            self.skip_line_starts()?;

            let next = peek!(self.source)?;

            /*
             * Check that the value is real, not implied,
             * e.g:
             *
             * { key: } or {key: , another: key }
             *       ^          ^
             *       Implied values
             */
            if matches!(next.marker, Marker::Comma | Marker::ClosingBrace)
            {
                let event = self.empty_scalar(next.read)?;

                state!(~self, -> State::FlowMappingKey(O_NIL));

                Ok(Some(event))
            }
            else
            {
                state!(~self, >> State::FlowMappingKey(O_NIL));

                self.node(!BLOCK_CONTEXT, 0, None)
            }
        }
        else
        {
            let event = self.empty_scalar(peek.read)?;

            state!(~self, -> State::FlowMappingKey(O_NIL));

            Ok(Some(event))
        }
    }

    /// Collect any anchor and tag properties at the head of
    /// the stream into the pending property set
    fn collect_properties(&mut self) -> ParseResult<()>
    {
        loop
        {
            let peek = match peek!(@ self.source)?
            {
                Some(peek) => peek,
                None => return Ok(()),
            };

            match peek.marker
            {
                Marker::Anchor =>
                {
                    if self.props.anchor.is_some()
                    {
                        return Err(ParseError::DuplicateAnchor);
                    }

                    let entry = pop!(self.source)?;
                    let name = match entry.into_token()
                    {
                        Token::Anchor(name) => name,
                        _ => return Err(ParseError::CorruptStream),
                    };

                    self.props.set_anchor(name, peek.line, peek.read);
                },
                Marker::TagHandle =>
                {
                    if self.props.tag.is_some()
                    {
                        return Err(ParseError::DuplicateTag);
                    }

                    let entry = pop!(self.source)?;
                    let handle = match entry.into_token()
                    {
                        Token::TagHandle(handle) => handle,
                        _ => return Err(ParseError::CorruptStream),
                    };
                    let suffix = match pop!(self.source)?.into_token()
                    {
                        Token::TagSuffix(suffix) => suffix,
                        _ => return Err(ParseError::CorruptStream),
                    };

                    let tag = self.resolve_tag(&handle, &suffix)?;

                    self.props.set_tag(tag, peek.line, peek.read);
                },
                Marker::VerbatimTag =>
                {
                    if self.props.tag.is_some()
                    {
                        return Err(ParseError::DuplicateTag);
                    }

                    let entry = pop!(self.source)?;
                    let uri = match entry.into_token()
                    {
                        Token::VerbatimTag(uri) => uri,
                        _ => return Err(ParseError::CorruptStream),
                    };

                    let tag = self.tags.register_uri(&uri);

                    self.props.set_tag(tag, peek.line, peek.read);
                },
                _ => return Ok(()),
            }
        }
    }

    /// Resolve a tag shorthand against the handles in scope
    fn resolve_tag(&mut self, handle: &Slice, suffix: &Slice) -> ParseResult<TagId>
    {
        // A bare '!' is the non specific tag
        if handle == "!" && suffix.is_empty()
        {
            return Ok(TAG_EXCLAMATION);
        }

        let uri = self
            .tags
            .resolve_handle(handle, suffix)
            .map_err(|_| ParseError::UndefinedTagHandle)?;

        Ok(self.tags.register_uri(&uri))
    }

    /// Is a compact flow mapping key ahead? Looks past any
    /// properties for a scalar directly followed by ':'
    fn compact_key_ahead(&mut self) -> ParseResult<bool>
    {
        let mut nth = 0;

        // Window bound mirroring the implicit key limit;
        // properties and a key never span more tokens
        while nth < 8
        {
            match peek!(self.source, nth)?
            {
                Some(Marker::Anchor | Marker::VerbatimTag) => nth += 1,
                Some(Marker::TagHandle) => nth += 2,
                Some(Marker::ScalarPart | Marker::Scalar) =>
                {
                    return Ok(peek!(self.source, nth + 1)? == Some(Marker::Colon));
                },
                _ => return Ok(false),
            }
        }

        Ok(false)
    }

    /// Produce a collection start event, declaring any
    /// pending anchor first so aliases within the
    /// collection can refer back to it
    fn collection_start(
        &mut self,
        mark: usize,
        style: CollectionStyle,
        mapping: bool,
        take_props: bool,
    ) -> ParseResult<Event<'de>>
    {
        let (anchor, tag, pmark) = match take_props
        {
            true => self.props.take(),
            false => (None, None, None),
        };

        let anchor = anchor.map(|name| self.anchors.declare(&name));
        let tag = tag.unwrap_or(TAG_QUESTION);
        let start = pmark.unwrap_or(mark);

        let data = match mapping
        {
            true => EventData::MappingStart(Node::new(anchor, tag, Mapping { style })),
            false => EventData::SequenceStart(Node::new(anchor, tag, Sequence { style })),
        };

        Ok(Event::new(start, mark, data))
    }

    /// Produce a scalar node event, consuming the pending
    /// properties. The anchor is declared before the event
    /// is returned, so self referential aliases resolve.
    fn scalar_node(
        &mut self,
        mark: usize,
        data: Slice<'de>,
        style: ScalarStyle,
    ) -> ParseResult<Event<'de>>
    {
        let (anchor, tag, pmark) = self.props.take();

        let anchor = anchor.map(|name| self.anchors.declare(&name));
        let tag = tag.unwrap_or(match style
        {
            ScalarStyle::Plain => TAG_QUESTION,
            _ => TAG_EXCLAMATION,
        });

        Ok(Event::new(
            pmark.unwrap_or(mark),
            mark,
            EventData::Scalar(Node::new(anchor, tag, ScalarData { data, style })),
        ))
    }

    /// Produce an empty scalar node [`Event`], as implied
    /// by the surrounding structure
    fn empty_scalar(&mut self, mark: usize) -> ParseResult<Event<'de>>
    {
        self.scalar_node(mark, Slice::Borrowed(""), ScalarStyle::Plain)
    }

    /// Pop any line markers at the head of the stream; flow
    /// collections are line agnostic
    fn skip_line_starts(&mut self) -> ParseResult<()>
    {
        while let Some(Marker::LineStart) = peek!(self.source, 0)?
        {
            pop!(self.source)?;
        }

        Ok(())
    }

    /// Begin a fresh document scope
    fn reset_document_state(&mut self)
    {
        self.anchors.reset();
        self.tags.reset_handles();
        self.props = Properties::default();
    }

    /// Deliver a warning through the installed callback, if
    /// any
    fn warn(&mut self, at: usize, message: String)
    {
        if let Some(callback) = self.on_warning.as_mut()
        {
            let mark = self.source.mark_of(at);

            callback(Warning { mark, message });
        }
    }

    /// Wrap a [`ParseError`] into the public error type,
    /// attaching the source position it occurred at
    fn contextualize(&self, err: ParseError) -> Error
    {
        let at = match err
        {
            ParseError::Scanner(_) => self.source.scan_position(),
            _ => self
                .source
                .head_position()
                .unwrap_or_else(|| self.source.scan_position()),
        };

        let code = internal::ErrorCode::from(err);
        let mark = self.source.mark_of(at);

        Error::new(internal::Error::new(code).with_context(at as u64, mark))
    }
}

impl<'de> Iterator for Parser<'de>
{
    type Item = crate::error::Result<Event<'de>>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.next_event().transpose()
    }
}

impl<'de> Debug for Parser<'de>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Parser")
            .field("state", &self.state)
            .field("done", &self.done)
            .field("strict", &self.strict)
            .finish()
    }
}

/// A copied out view of a token entry's discriminant and
/// position, small enough to hold across further source
/// access
#[derive(Debug, Clone, Copy)]
pub(in crate::event) struct Peek
{
    pub marker: Marker,
    pub read:   usize,
    pub line:   usize,
    pub column: usize,
    pub indent: usize,
}

impl Peek
{
    pub(in crate::event) fn of(entry: &crate::lexer::entry::TokenEntry) -> Self
    {
        let indent = match entry.token()
        {
            Token::LineStart(indent) => *indent,
            _ => 0,
        };

        Self {
            marker: entry.marker(),
            read: entry.read_at(),
            line: entry.line(),
            column: entry.column(),
            indent,
        }
    }
}

/// The pending `(tag, anchor)` pair collected from the
/// stream but not yet attached to a node event
#[derive(Debug, Default)]
struct Properties<'de>
{
    anchor: Option<Slice<'de>>,
    tag:    Option<TagId>,

    /// Line of the most recently collected property; used
    /// to tell key properties from collection properties
    line: usize,
    /// Position of the first collected property
    mark: Option<usize>,
}

impl<'de> Properties<'de>
{
    fn any(&self) -> bool
    {
        self.anchor.is_some() || self.tag.is_some()
    }

    fn set_anchor(&mut self, name: Slice<'de>, line: usize, mark: usize)
    {
        self.anchor = Some(name);
        self.line = line;
        self.mark.get_or_insert(mark);
    }

    fn set_tag(&mut self, tag: TagId, line: usize, mark: usize)
    {
        self.tag = Some(tag);
        self.line = line;
        self.mark.get_or_insert(mark);
    }

    fn take(&mut self) -> (Option<Slice<'de>>, Option<TagId>, Option<usize>)
    {
        let anchor = self.anchor.take();
        let tag = self.tag.take();
        let mark = self.mark.take();

        (anchor, tag, mark)
    }
}

/// Was the scalar at the head of the stream read with a
/// style that may serve as an implicit key?
fn implicit_key_style(source: &mut TokenSource) -> ParseResult<bool>
{
    let style = match source.peek()?.map(|entry| entry.token())
    {
        Some(Token::ScalarPart(_, _)) => return Ok(true),
        Some(Token::Scalar(_, style)) => *style,
        _ => return Ok(false),
    };

    Ok(matches!(
        style,
        ScalarStyle::Plain | ScalarStyle::SingleQuote | ScalarStyle::DoubleQuote
    ))
}

const BLOCK_CONTEXT: bool = true;
const MAPPING: bool = true;

#[cfg(test)]
mod tests
{
    #[macro_use]
    mod macros;

    mod collection;
    mod document;
    mod scalar;

    use crate::{
        event::types::{
            CollectionStyle, DocumentEnd, DocumentStart, EventData, Mapping, Node, ScalarData,
            Sequence, StreamEncoding, StreamStart,
        },
        tags::{TagId, TAG_EXCLAMATION, TAG_QUESTION},
        token::ScalarStyle,
    };

    fn stream_start() -> EventData<'static>
    {
        EventData::StreamStart(StreamStart {
            encoding: StreamEncoding::UTF8,
        })
    }

    fn stream_end() -> EventData<'static>
    {
        EventData::StreamEnd
    }

    fn doc_start(explicit: bool) -> EventData<'static>
    {
        EventData::DocumentStart(DocumentStart {
            explicit,
            version: None,
        })
    }

    fn doc_end(explicit: bool) -> EventData<'static>
    {
        EventData::DocumentEnd(DocumentEnd { explicit })
    }

    fn scalar(content: &str, style: ScalarStyle) -> EventData<'_>
    {
        let tag = match style
        {
            ScalarStyle::Plain => TAG_QUESTION,
            _ => TAG_EXCLAMATION,
        };

        tagged_scalar(content, style, tag)
    }

    fn tagged_scalar(content: &str, style: ScalarStyle, tag: TagId) -> EventData<'_>
    {
        EventData::Scalar(Node::new(
            None,
            tag,
            ScalarData {
                data: content.into(),
                style,
            },
        ))
    }

    fn mapping_start_block() -> EventData<'static>
    {
        EventData::MappingStart(Node::new(None, TAG_QUESTION, Mapping {
            style: CollectionStyle::Block,
        }))
    }

    fn mapping_start_flow() -> EventData<'static>
    {
        EventData::MappingStart(Node::new(None, TAG_QUESTION, Mapping {
            style: CollectionStyle::Flow,
        }))
    }

    fn sequence_start_block() -> EventData<'static>
    {
        EventData::SequenceStart(Node::new(None, TAG_QUESTION, Sequence {
            style: CollectionStyle::Block,
        }))
    }

    fn sequence_start_flow() -> EventData<'static>
    {
        EventData::SequenceStart(Node::new(None, TAG_QUESTION, Sequence {
            style: CollectionStyle::Flow,
        }))
    }
}
