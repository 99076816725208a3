/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module writes event streams back out as YAML text.
//!
//! The [`Presenter`] consumes one [`Event`] at a time and
//! writes incrementally, honoring the style carried on each
//! event where the surrounding context allows it and
//! falling back to safe defaults otherwise. Output always
//! ends in a newline and never carries trailing spaces.
//!
//! Two of the options change the pacing: the Tidy anchor
//! style and Mixed containers both need to see a whole
//! document before its first byte is written (to know which
//! anchors are aliased, and which collections are small
//! enough to condense), so under either the presenter
//! buffers per document. Every other combination streams.

mod error;
mod options;
mod scalar;

pub use options::{AnchorStyle, ContainerStyle, PresentOptions, Quoting, TagStyle};

use std::{
    collections::{HashMap, HashSet},
    io::Write,
};

use crate::{
    anchors::AnchorId,
    error::Result,
    event::types::{CollectionStyle, Event, EventData},
    presenter::{
        error::{EmitError, EmitResult},
        scalar::{
            choose_style, write_double, write_folded, write_literal, write_plain, write_single,
            OutStyle,
        },
    },
    tags::{TagId, TagLibrary, CORE_SCHEMA_PREFIX},
    token::ScalarStyle,
};

/// Upper entry count for a Mixed container to condense to
/// flow
const MIXED_LIMIT: usize = 8;

/// Present every event of .events into .sink using
/// .options, resolving tags against .tags.
///
/// ## Examples
///
/// ```rust
/// use yamel::{event::Parser, presenter, reader};
///
/// let reader = reader::from_utf8("- 1\n- 2");
/// let parser = Parser::new(&reader);
/// let mut out = Vec::new();
///
/// let events: Vec<_> = parser.collect::<Result<_, _>>().unwrap();
/// presenter::present(
///     events,
///     &mut out,
///     presenter::PresentOptions::default(),
///     yamel::tags::TagLibrary::core(),
/// )
/// .unwrap();
///
/// assert_eq!(out, b"- 1\n- 2\n");
/// ```
pub fn present<'de, I, W>(
    events: I,
    sink: &mut W,
    options: PresentOptions,
    tags: TagLibrary,
) -> Result<()>
where
    I: IntoIterator<Item = Event<'de>>,
    W: Write,
{
    let mut presenter = Presenter::new(sink).with_options(options).with_tags(tags);

    for event in events
    {
        presenter.feed(&event)?;
    }

    presenter.finish()
}

/// Writes an event stream as YAML text into an
/// [`io::Write`](std::io::Write) sink.
#[derive(Debug)]
pub struct Presenter<W>
where
    W: Write,
{
    sink: W,
    opts: PresentOptions,
    tags: TagLibrary,
    step: usize,

    documents:   usize,
    in_document: bool,

    buffering:       bool,
    replaying:       bool,
    in_buffered_doc: bool,
    buffer:          Vec<EventData<'static>>,

    ctx:        Vec<Ctx>,
    column:     usize,
    line_start: bool,

    /// A separator indicator (`-`, `:`, `?`, `,`) was
    /// written; the next content must put a space after it
    pending_sep: bool,
    /// The next block collection may start inline (directly
    /// after a sequence dash)
    compact_ok:  bool,

    names:     HashMap<AnchorId, String>,
    next_name: usize,
    aliased:   HashSet<AnchorId>,
    small:     Vec<bool>,
    cursor:    usize,
}

/// One open collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx
{
    BlockSeq
    {
        indent:  usize,
        started: bool,
        /// The first entry may continue the current line
        /// (the collection sits right after its parent's
        /// dash)
        inline:  bool,
    },
    BlockMap
    {
        indent:        usize,
        started:       bool,
        inline:        bool,
        expect_value:  bool,
        explicit_pair: bool,
    },
    FlowSeq
    {
        indent: usize,
        first:  bool,
    },
    FlowMap
    {
        indent:       usize,
        first:        bool,
        expect_value: bool,
    },
}

/// How a node renders relative to its entry prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape
{
    Scalar,
    FlowColl,
    BlockColl,
}

#[derive(Debug, Clone, Copy)]
struct Entry
{
    is_key: bool,
    indent: usize,
}

impl<W> Presenter<W>
where
    W: Write,
{
    /// Instantiate a new [`Presenter`] writing into .sink
    /// with default options and the core schema library.
    pub fn new(sink: W) -> Self
    {
        let opts = PresentOptions::default();

        Self {
            sink,
            step: clamp_step(opts.indentation_step),
            buffering: buffers(&opts),
            opts,
            tags: TagLibrary::core(),
            documents: 0,
            in_document: false,
            replaying: false,
            in_buffered_doc: false,
            buffer: Vec::new(),
            ctx: Vec::new(),
            column: 0,
            line_start: true,
            pending_sep: false,
            compact_ok: false,
            names: HashMap::new(),
            next_name: 0,
            aliased: HashSet::new(),
            small: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace the presentation options
    pub fn with_options(mut self, opts: PresentOptions) -> Self
    {
        self.step = clamp_step(opts.indentation_step);
        self.buffering = buffers(&opts);
        self.opts = opts;

        self
    }

    /// Replace the tag library [`TagId`]s are resolved
    /// against. This must be the library the events'
    /// ids were registered in (typically the parser's).
    pub fn with_tags(mut self, tags: TagLibrary) -> Self
    {
        self.tags = tags;

        self
    }

    /// Feed the next event of a well formed stream.
    pub fn feed(&mut self, event: &Event<'_>) -> Result<()>
    {
        self.process(event.data()).map_err(Into::into)
    }

    /// Flush the sink, returning it.
    pub fn finish(mut self) -> Result<()>
    {
        self.sink.flush().map_err(|e| EmitError::from(e).into())
    }

    fn process(&mut self, data: &EventData<'_>) -> EmitResult<()>
    {
        if !self.buffering
        {
            return self.write_event(data);
        }

        match data
        {
            EventData::StreamStart(_) | EventData::StreamEnd => Ok(()),
            EventData::DocumentStart(_) =>
            {
                self.in_buffered_doc = true;
                self.buffer.push(own(data));

                Ok(())
            },
            EventData::DocumentEnd(_) if self.in_buffered_doc =>
            {
                self.buffer.push(own(data));

                self.flush_document()
            },
            _ if self.in_buffered_doc =>
            {
                self.buffer.push(own(data));

                Ok(())
            },
            _ => Err(EmitError::CorruptStream),
        }
    }

    /// Analyze the buffered document, then write it out
    fn flush_document(&mut self) -> EmitResult<()>
    {
        let events = std::mem::take(&mut self.buffer);

        let (aliased, small) = analyze(&events, self.opts.max_line_length);
        self.aliased = aliased;
        self.small = small;

        self.replaying = true;

        for (at, event) in events.iter().enumerate()
        {
            self.cursor = at;

            let outcome = self.write_event(event);

            if outcome.is_err()
            {
                self.replaying = false;

                return outcome;
            }
        }

        self.replaying = false;
        self.in_buffered_doc = false;

        Ok(())
    }

    fn write_event(&mut self, data: &EventData<'_>) -> EmitResult<()>
    {
        match data
        {
            EventData::StreamStart(_) | EventData::StreamEnd => Ok(()),
            EventData::DocumentStart(doc) => self.begin_document(doc.explicit),
            EventData::DocumentEnd(doc) => self.end_document(doc.explicit),
            EventData::Scalar(node) =>
            {
                self.emit_scalar(node.anchor, node.tag, &node.content.data, node.content.style)
            },
            EventData::MappingStart(node) =>
            {
                self.begin_collection(node.anchor, node.tag, node.content.style, MAPPING)
            },
            EventData::SequenceStart(node) =>
            {
                self.begin_collection(node.anchor, node.tag, node.content.style, !MAPPING)
            },
            EventData::MappingEnd | EventData::SequenceEnd => self.end_collection(),
            EventData::Alias(alias) => self.emit_alias(alias.target),
        }
    }

    fn begin_document(&mut self, explicit: bool) -> EmitResult<()>
    {
        if self.in_document
        {
            return Err(EmitError::CorruptStream);
        }

        let json = self.opts.quoting == Quoting::Json;

        if json && self.documents > 0
        {
            return Err(EmitError::SecondDocumentInJson);
        }

        let mut wrote_directives = false;

        if self.documents == 0 && !json
        {
            if let Some(version) = self.opts.output_version
            {
                let line = format!("%YAML {}.{}\n", version.major, version.minor);
                self.out(&line)?;

                wrote_directives = true;
            }

            let handles = std::mem::take(&mut self.opts.handles);
            for (handle, prefix) in &handles
            {
                let line = format!("%TAG {} {}\n", handle, prefix);
                self.out(&line)?;

                wrote_directives = true;
            }
            self.opts.handles = handles;
        }

        if !json && (explicit || wrote_directives || self.documents > 0)
        {
            self.out("---")?;
            self.pending_sep = true;
        }

        self.documents += 1;
        self.in_document = true;

        Ok(())
    }

    fn end_document(&mut self, explicit: bool) -> EmitResult<()>
    {
        if !self.in_document || !self.ctx.is_empty()
        {
            return Err(EmitError::CorruptStream);
        }

        if !self.line_start
        {
            self.out("\n")?;
        }

        if explicit && self.opts.quoting != Quoting::Json
        {
            self.out("...\n")?;
        }

        self.in_document = false;
        self.pending_sep = false;
        self.names.clear();
        self.next_name = 0;
        self.aliased.clear();

        Ok(())
    }

    fn emit_scalar(
        &mut self,
        anchor: Option<AnchorId>,
        tag: TagId,
        data: &str,
        requested: ScalarStyle,
    ) -> EmitResult<()>
    {
        let at_root = self.ctx.is_empty();
        let entry = self.begin_entry(Shape::Scalar)?;
        self.compact_ok = false;

        let props = self.props_text(anchor, tag, at_root);
        if !props.is_empty()
        {
            self.separate()?;
            self.out(&props)?;
            self.pending_sep = true;
        }

        let json = self.opts.quoting == Quoting::Json;
        let in_flow = self.in_flow();

        // An empty plain scalar writes nothing at all; the
        // surrounding structure implies it, exactly as it
        // was implied on the way in
        let implied = data.is_empty()
            && !json
            && !in_flow
            && matches!(requested, ScalarStyle::Plain | ScalarStyle::Any);

        if implied
        {
            self.after_node(entry.is_key);

            return Ok(());
        }

        self.separate()?;

        let style = choose_style(data, requested, tag, json, in_flow, entry.is_key);

        match style
        {
            OutStyle::Plain =>
            {
                let width = write_plain(&mut self.sink, data)?;
                self.column += width;
            },
            OutStyle::Single =>
            {
                let width = write_single(&mut self.sink, data)?;
                self.column += width;
            },
            OutStyle::Double =>
            {
                let allow_wrap = !entry.is_key && !json;
                let column = write_double(
                    &mut self.sink,
                    data,
                    self.column,
                    self.opts.max_line_length,
                    entry.indent,
                    allow_wrap,
                )?;
                self.column = column;
            },
            OutStyle::Literal =>
            {
                write_literal(&mut self.sink, data, entry.indent, self.step)?;
                self.column = 0;
                self.line_start = true;
            },
            OutStyle::Folded =>
            {
                write_folded(&mut self.sink, data, entry.indent)?;
                self.column = 0;
                self.line_start = true;
            },
        }

        if style != OutStyle::Literal && style != OutStyle::Folded
        {
            self.line_start = false;
        }

        self.after_node(entry.is_key);

        Ok(())
    }

    fn emit_alias(&mut self, target: AnchorId) -> EmitResult<()>
    {
        let entry = self.begin_entry(Shape::Scalar)?;
        self.compact_ok = false;

        let name = match self.names.get(&target)
        {
            Some(name) => name.clone(),
            // An alias must refer back to an anchor already
            // written in this document
            None => return Err(EmitError::CorruptStream),
        };

        self.separate()?;

        let text = format!("*{}", name);
        self.out(&text)?;

        self.after_node(entry.is_key);

        Ok(())
    }

    fn begin_collection(
        &mut self,
        anchor: Option<AnchorId>,
        tag: TagId,
        style: CollectionStyle,
        mapping: bool,
    ) -> EmitResult<()>
    {
        let at_root = self.ctx.is_empty();
        let flow = self.decide_flow(style);

        let shape = match flow
        {
            true => Shape::FlowColl,
            false => Shape::BlockColl,
        };

        let entry = self.begin_entry(shape)?;
        let compact = std::mem::replace(&mut self.compact_ok, false);

        let props = self.props_text(anchor, tag, at_root);
        let has_props = !props.is_empty();

        if has_props
        {
            self.separate()?;
            self.out(&props)?;
            self.pending_sep = true;
        }

        if flow
        {
            self.separate()?;

            self.out(match mapping
            {
                true => "{",
                false => "[",
            })?;

            self.ctx.push(match mapping
            {
                true => Ctx::FlowMap {
                    indent:       entry.indent + self.step,
                    first:        true,
                    expect_value: false,
                },
                false => Ctx::FlowSeq {
                    indent: entry.indent + self.step,
                    first:  true,
                },
            });
        }
        else
        {
            // A block collection writes nothing by itself;
            // its entries open their own lines. The first
            // entry may only continue the current line when
            // the collection directly follows a sequence
            // dash, and never when its properties just did
            let inline = compact && !has_props && self.pending_sep;

            self.ctx.push(match mapping
            {
                true => Ctx::BlockMap {
                    indent: entry.indent,
                    started: false,
                    inline,
                    expect_value: false,
                    explicit_pair: false,
                },
                false => Ctx::BlockSeq {
                    indent: entry.indent,
                    started: false,
                    inline,
                },
            });
        }

        Ok(())
    }

    fn end_collection(&mut self) -> EmitResult<()>
    {
        let ctx = match self.ctx.pop()
        {
            Some(ctx) => ctx,
            None => return Err(EmitError::CorruptStream),
        };

        match ctx
        {
            Ctx::BlockSeq { started: false, .. } =>
            {
                self.separate()?;
                self.out("[]")?;
            },
            Ctx::BlockMap { started: false, .. } =>
            {
                self.separate()?;
                self.out("{}")?;
            },
            Ctx::BlockSeq { .. } | Ctx::BlockMap { .. } =>
            {},
            Ctx::FlowSeq { indent, .. } =>
            {
                if !self.opts.condense_flow
                {
                    self.break_to(indent.saturating_sub(self.step))?;
                }

                self.out("]")?;
            },
            Ctx::FlowMap { indent, .. } =>
            {
                if !self.opts.condense_flow
                {
                    self.break_to(indent.saturating_sub(self.step))?;
                }

                self.out("}")?;
            },
        }

        // The finished collection fills a key or value slot
        // in its parent
        let was_key = self.parent_expects_value_toggle();
        self.after_node(was_key);

        Ok(())
    }

    /// Write the entry prefix the current context demands,
    /// returning the node's position and content indent
    fn begin_entry(&mut self, shape: Shape) -> EmitResult<Entry>
    {
        if !self.in_document
        {
            return Err(EmitError::CorruptStream);
        }

        let top = match self.ctx.last().copied()
        {
            None =>
            {
                // Document root
                return Ok(Entry {
                    is_key: false,
                    indent: 0,
                });
            },
            Some(top) => top,
        };

        match top
        {
            Ctx::BlockSeq {
                indent,
                started,
                inline,
            } =>
            {
                if started || !inline
                {
                    self.break_to(indent)?;
                }
                else
                {
                    self.separate()?;
                }

                self.out("-")?;
                self.pending_sep = true;
                self.compact_ok = shape == Shape::BlockColl && self.step == 2;
                self.set_started();

                Ok(Entry {
                    is_key: false,
                    indent: indent + self.step,
                })
            },
            Ctx::BlockMap {
                indent,
                started,
                inline,
                expect_value,
                explicit_pair,
            } =>
            {
                match expect_value
                {
                    // Key position
                    false =>
                    {
                        if started || !inline
                        {
                            self.break_to(indent)?;
                        }
                        else
                        {
                            self.separate()?;
                        }
                        self.set_started();

                        let explicit =
                            self.opts.explicit_keys || shape != Shape::Scalar;

                        if explicit
                        {
                            self.out("?")?;
                            self.pending_sep = true;
                            self.compact_ok = shape == Shape::BlockColl && self.step == 2;
                        }

                        self.mark_pair(explicit);

                        Ok(Entry {
                            is_key: true,
                            indent: indent + self.step,
                        })
                    },
                    // Value position
                    true =>
                    {
                        if explicit_pair
                        {
                            self.break_to(indent)?;
                        }

                        self.out(":")?;
                        self.pending_sep = true;
                        self.compact_ok = false;

                        Ok(Entry {
                            is_key: false,
                            indent: indent + self.step,
                        })
                    },
                }
            },
            Ctx::FlowSeq { indent, first } =>
            {
                if !first
                {
                    self.out(",")?;
                    self.pending_sep = true;
                }

                if !self.opts.condense_flow
                {
                    self.break_to(indent)?;
                }

                self.flow_advance();

                Ok(Entry {
                    is_key: false,
                    indent,
                })
            },
            Ctx::FlowMap {
                indent,
                first,
                expect_value,
            } =>
            {
                match expect_value
                {
                    false =>
                    {
                        if !first
                        {
                            self.out(",")?;
                            self.pending_sep = true;
                        }

                        if !self.opts.condense_flow
                        {
                            self.break_to(indent)?;
                        }

                        self.flow_advance();

                        Ok(Entry {
                            is_key: true,
                            indent,
                        })
                    },
                    true =>
                    {
                        self.out(":")?;
                        self.pending_sep = true;

                        Ok(Entry {
                            is_key: false,
                            indent,
                        })
                    },
                }
            },
        }
    }

    /// Bookkeeping after a node completed: a key primes its
    /// mapping for the value, a value hands the mapping
    /// back to keys
    fn after_node(&mut self, was_key: bool)
    {
        match self.ctx.last_mut()
        {
            Some(Ctx::BlockMap { expect_value, .. }) | Some(Ctx::FlowMap { expect_value, .. }) =>
            {
                *expect_value = was_key;
            },
            _ =>
            {},
        }

        self.pending_sep = false;
    }

    /// When a collection just closed, was it a key? Clears
    /// the parent's value expectation accordingly.
    fn parent_expects_value_toggle(&mut self) -> bool
    {
        match self.ctx.last()
        {
            Some(Ctx::BlockMap { expect_value, .. }) | Some(Ctx::FlowMap { expect_value, .. }) =>
            {
                !expect_value
            },
            _ => false,
        }
    }

    fn mark_pair(&mut self, explicit: bool)
    {
        if let Some(Ctx::BlockMap {
            expect_value,
            explicit_pair,
            ..
        }) = self.ctx.last_mut()
        {
            *expect_value = false;
            *explicit_pair = explicit;
        }
    }

    fn set_started(&mut self)
    {
        match self.ctx.last_mut()
        {
            Some(Ctx::BlockSeq { started, .. }) | Some(Ctx::BlockMap { started, .. }) =>
            {
                *started = true
            },
            _ =>
            {},
        }
    }

    fn flow_advance(&mut self)
    {
        match self.ctx.last_mut()
        {
            Some(Ctx::FlowSeq { first, .. }) => *first = false,
            Some(Ctx::FlowMap { first, .. }) => *first = false,
            _ =>
            {},
        }
    }

    /// Decide the collection form, honoring the event's
    /// style when representable
    fn decide_flow(&mut self, style: CollectionStyle) -> bool
    {
        if self.opts.quoting == Quoting::Json || self.in_flow()
        {
            return true;
        }

        match style
        {
            CollectionStyle::Flow => true,
            CollectionStyle::Block => false,
            CollectionStyle::Any => match self.opts.containers
            {
                ContainerStyle::Flow => true,
                ContainerStyle::Block => false,
                ContainerStyle::Mixed =>
                {
                    self.replaying && self.small.get(self.cursor).copied().unwrap_or(false)
                },
            },
        }
    }

    fn in_flow(&self) -> bool
    {
        matches!(
            self.ctx.last(),
            Some(Ctx::FlowSeq { .. }) | Some(Ctx::FlowMap { .. })
        )
    }

    /// Render the `&anchor` / `!tag` prefix for a node, or
    /// an empty string
    fn props_text(&mut self, anchor: Option<AnchorId>, tag: TagId, at_root: bool) -> String
    {
        let mut text = String::new();

        if let Some(id) = anchor
        {
            let wanted = match self.opts.anchor_style
            {
                AnchorStyle::Tidy => self.aliased.contains(&id),
                AnchorStyle::Always => true,
            };

            if wanted
            {
                let name = self.name_for(id);

                text.push('&');
                text.push_str(&name);
            }
        }

        let tag_wanted = match self.opts.tag_style
        {
            TagStyle::None => false,
            TagStyle::RootOnly => at_root,
            TagStyle::All => true,
        };

        if tag_wanted && !tag.is_non_specific()
        {
            if let Some(rendered) = self.render_tag(tag)
            {
                if !text.is_empty()
                {
                    text.push(' ');
                }

                text.push_str(&rendered);
            }
        }

        text
    }

    /// Shorthand a tag URI against the core schema prefix
    /// and any declared handles, falling back to the
    /// verbatim form
    fn render_tag(&self, tag: TagId) -> Option<String>
    {
        let uri = self.tags.uri_of(tag)?;

        if let Some(suffix) = uri.strip_prefix(CORE_SCHEMA_PREFIX)
        {
            return Some(format!("!!{}", suffix));
        }

        for (handle, prefix) in &self.opts.handles
        {
            if let Some(suffix) = uri.strip_prefix(prefix.as_str())
            {
                return Some(format!("{}{}", handle, suffix));
            }
        }

        if uri.starts_with('!')
        {
            return Some(uri.to_string());
        }

        Some(format!("!<{}>", uri))
    }

    fn name_for(&mut self, id: AnchorId) -> String
    {
        if let Some(name) = self.names.get(&id)
        {
            return name.clone();
        }

        let name = anchor_name(self.next_name);
        self.next_name += 1;

        self.names.insert(id, name.clone());

        name
    }

    /// Start a fresh line indented to .indent; a no-op
    /// fresh-line-wise when already at one
    fn break_to(&mut self, indent: usize) -> EmitResult<()>
    {
        if !self.line_start
        {
            self.out("\n")?;
        }

        for _ in 0..indent
        {
            self.out(" ")?;
        }

        self.pending_sep = false;

        Ok(())
    }

    /// Write the pending separating space, if one is owed
    fn separate(&mut self) -> EmitResult<()>
    {
        if self.pending_sep && !self.line_start
        {
            self.out(" ")?;
        }

        self.pending_sep = false;

        Ok(())
    }

    fn out(&mut self, text: &str) -> EmitResult<()>
    {
        self.sink.write_all(text.as_bytes())?;

        match text.rfind('\n')
        {
            Some(at) =>
            {
                self.column = text[at + 1..].chars().count();
                self.line_start = at + 1 == text.len();
            },
            None =>
            {
                if !text.is_empty()
                {
                    self.column += text.chars().count();
                    self.line_start = false;
                }
            },
        }

        Ok(())
    }
}

/// Generate the .nth anchor name: a, b, .. z, aa, ab, ..
fn anchor_name(nth: usize) -> String
{
    let mut name = String::new();
    let mut n = nth;

    loop
    {
        name.insert(0, (b'a' + (n % 26) as u8) as char);
        n /= 26;

        if n == 0
        {
            break;
        }

        n -= 1;
    }

    name
}

fn clamp_step(step: usize) -> usize
{
    step.max(2).min(9)
}

/// Do the given options require per document buffering?
fn buffers(opts: &PresentOptions) -> bool
{
    opts.anchor_style == AnchorStyle::Tidy || opts.containers == ContainerStyle::Mixed
}

/// Detach an event's content from its source so it can sit
/// in the document buffer
fn own(data: &EventData<'_>) -> EventData<'static>
{
    use crate::event::types::{Node, ScalarData};

    match data
    {
        EventData::StreamStart(start) => EventData::StreamStart(start.clone()),
        EventData::StreamEnd => EventData::StreamEnd,
        EventData::DocumentStart(doc) => EventData::DocumentStart(doc.clone()),
        EventData::DocumentEnd(doc) => EventData::DocumentEnd(doc.clone()),
        EventData::Alias(alias) => EventData::Alias(*alias),
        EventData::Scalar(node) => EventData::Scalar(Node::new(node.anchor, node.tag, ScalarData {
            data:  node.content.data.to_string().into(),
            style: node.content.style,
        })),
        EventData::MappingStart(node) =>
        {
            EventData::MappingStart(Node::new(node.anchor, node.tag, node.content))
        },
        EventData::MappingEnd => EventData::MappingEnd,
        EventData::SequenceStart(node) =>
        {
            EventData::SequenceStart(Node::new(node.anchor, node.tag, node.content))
        },
        EventData::SequenceEnd => EventData::SequenceEnd,
    }
}

/// One pass over a buffered document: which anchors are
/// aliased, and which collections are small enough for a
/// Mixed presenter to condense
fn analyze(events: &[EventData<'_>], max_width: usize) -> (HashSet<AnchorId>, Vec<bool>)
{
    let mut aliased = HashSet::new();
    let mut small = vec![false; events.len()];
    let mut stack: Vec<(usize, bool, usize, usize)> = Vec::new();

    for (at, event) in events.iter().enumerate()
    {
        match event
        {
            EventData::Alias(alias) =>
            {
                aliased.insert(alias.target);

                if let Some(top) = stack.last_mut()
                {
                    top.1 = false;
                }
            },
            EventData::MappingStart(_) | EventData::SequenceStart(_) =>
            {
                if let Some(top) = stack.last_mut()
                {
                    top.1 = false;
                }

                stack.push((at, true, 2, 0));
            },
            EventData::Scalar(node) =>
            {
                if let Some(top) = stack.last_mut()
                {
                    top.2 += node.content.data.chars().count() + 2;
                    top.3 += 1;
                }
            },
            EventData::MappingEnd | EventData::SequenceEnd =>
            {
                if let Some((start, pure, width, count)) = stack.pop()
                {
                    small[start] = pure && count <= MIXED_LIMIT && width <= max_width;
                }
            },
            _ =>
            {},
        }
    }

    (aliased, small)
}

const MAPPING: bool = true;
