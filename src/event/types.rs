/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the various types used by [Event]s to represent
//! YAML.

use crate::{
    anchors::AnchorId,
    tags::TagId,
    token::ScalarStyle,
};

/// Copy on write representation of YAML data content.
///
/// Scalar content returned in [`Event`]s is stored as this
/// type, and where possible is borrowed directly from the
/// underlying byte stream.
pub type Slice<'a> = std::borrow::Cow<'a, str>;

/// Default YAML stream version. If unspecified in the
/// stream it is assumed to be this version.
///
/// Equivalent of:
///
/// ```yaml
/// %YAML 1.2
/// ```
pub const DEFAULT_VERSION: VersionDirective = VersionDirective { major: 1, minor: 2 };

/// Specific YAML productions found in the YAML stream. Each
/// Event has a start and end mark indicating an approximate
/// range that is represented by the given Event. See
/// [EventData] for all of the possible Event variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'de>
{
    start_mark: usize,
    end_mark:   usize,
    inner:      EventData<'de>,
}

impl<'de> Event<'de>
{
    /// Instantiate a new [`Event`] with the given marks and
    /// data
    pub(crate) fn new(start_mark: usize, end_mark: usize, event: EventData<'de>) -> Self
    {
        Self {
            start_mark,
            end_mark,
            inner: event,
        }
    }

    /// Retrieve the start mark of this [`Event`]
    pub fn start(&self) -> usize
    {
        self.start_mark
    }

    /// Retrieve the end mark of this [`Event`]
    pub fn end(&self) -> usize
    {
        self.end_mark
    }

    /// Retrieve the data associated with this [`Event`]
    pub fn data(&self) -> &EventData<'de>
    {
        &self.inner
    }

    /// Retrieve the data associated with this [`Event`]
    /// mutably
    pub fn data_mut(&mut self) -> &mut EventData<'de>
    {
        &mut self.inner
    }

    /// Unwrap the data associated with this [`Event`]
    pub fn into_inner(self) -> EventData<'de>
    {
        self.inner
    }
}

impl<'de> From<EventData<'de>> for Event<'de>
{
    fn from(data: EventData<'de>) -> Self
    {
        Self::new(0, 0, data)
    }
}

/// The possible variants of an [Event]. See the
/// documentation on each variant for an explanation of what
/// each variant represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData<'de>
{
    /// Beginning of event stream, always the first event
    /// produced, and will only be produced once per event
    /// stream
    StreamStart(StreamStart),
    /// End of events, always the last event produced, and
    /// no more events will be produced after seeing this
    /// event
    StreamEnd,

    /// Start of document content, once seen, all future
    /// events belong to this document's scope until the
    /// matching DocumentEnd
    DocumentStart(DocumentStart),
    /// End of document content, this event may be followed
    /// either by another DocumentStart, or StreamEnd
    DocumentEnd(DocumentEnd),

    /// A reference back to a previously anchored node
    Alias(Alias),
    /// A scalar leaf node, containing unicode slice content
    Scalar(Node<'de, ScalarData<'de>>),

    /// Start of a YAML key value production, followed by
    /// zero or more node pairs until a `MappingEnd` is
    /// reached
    MappingStart(Node<'de, Mapping>),
    /// End of a YAML key value production
    MappingEnd,
    /// Start of a YAML array production, followed by zero
    /// or more nodes until a `SequenceEnd` is reached
    SequenceStart(Node<'de, Sequence>),
    /// End of a YAML array production
    SequenceEnd,
}

/// Wrapper around [Event] variants that correspond to a
/// YAML node production -- that is, those that carry the
/// properties pair of resolved tag and optional anchor.
///
/// One of:
///
///   `[Scalar, MappingStart, SequenceStart]`
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'de, T: 'de>
{
    /// The anchor declared on this node (if any)
    pub anchor:  Option<AnchorId>,
    /// The resolved tag of this node; a non specific tag
    /// unless the stream said otherwise
    pub tag:     TagId,
    /// The node's content if simple, or a hint about the
    /// complex structure type
    pub content: T,

    marker: std::marker::PhantomData<&'de ()>,
}

impl<'de, T> Node<'de, T>
{
    pub(crate) fn new(anchor: Option<AnchorId>, tag: TagId, content: T) -> Self
    {
        Self {
            anchor,
            tag,
            content,
            marker: std::marker::PhantomData,
        }
    }
}

/// Representation of a YAML scalar's content and
/// presentation style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarData<'de>
{
    /// The scalar's content, after any folding, escape or
    /// chomp processing its style demanded
    pub data:  Slice<'de>,
    /// The style the scalar was read with
    pub style: ScalarStyle,
}

impl<'de> ScalarData<'de>
{
    /// An empty scalar, as implied by the stream where a
    /// node was expected but none was present
    pub const fn empty() -> Self
    {
        Self {
            data:  Slice::Borrowed(""),
            style: ScalarStyle::Plain,
        }
    }
}

impl<'de> AsRef<str> for ScalarData<'de>
{
    fn as_ref(&self) -> &str
    {
        &self.data
    }
}

/// MappingStart [Event] payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping
{
    /// The collection form the mapping was read with
    pub style: CollectionStyle,
}

/// SequenceStart [Event] payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence
{
    /// The collection form the sequence was read with
    pub style: CollectionStyle,
}

/// StreamStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStart
{
    /// Encoding used in the YAML byte stream
    pub encoding: StreamEncoding,
}

/// DocumentStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStart
{
    /// Was this document opened by an explicit '---'?
    pub explicit: bool,
    /// The version declared by a %YAML directive, if one
    /// was present
    pub version:  Option<VersionDirective>,
}

/// DocumentEnd [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEnd
{
    /// Was this document closed by an explicit '...'?
    pub explicit: bool,
}

/// Alias [Event] contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias
{
    /// The anchor this alias refers back to, declared
    /// earlier in the same document
    pub target: AnchorId,
}

/// %YAML directive representation, containing the .major
/// and .minor version of the current document in the YAML
/// stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDirective
{
    /// The major version of this YAML stream
    pub major: u16,
    /// The minor version of this YAML stream
    pub minor: u16,
}

/// The collection form of a mapping or sequence, either
/// indentation delimited or bracket delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStyle
{
    /// Indentation delimited
    Block,
    /// Bracket delimited
    Flow,
    /// No preference; only meaningful on events fed to the
    /// presenter, which picks a fitting form
    Any,
}

/// The encoding of the underlying byte stream.
///
/// Currently, and for the forseeable future only `UTF8`
/// will be supported, though this may change eventually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEncoding
{
    /// The byte stream is encoded as UTF8
    UTF8,
}
