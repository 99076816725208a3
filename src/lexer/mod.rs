/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

// Note that this module must come before all others, as
// they depend on the macros which expand into this scope
#[macro_use]
mod macros;

pub(crate) mod entry;
pub(crate) mod error;
pub(crate) mod flag;
pub(crate) mod progress;

mod anchor;
mod directive;
mod scalar;
mod tag;

use crate::{
    lexer::{
        anchor::scan_anchor,
        directive::scan_directive,
        entry::TokenEntry,
        error::{ScanError, ScanResult as Result},
        flag::{Flags, O_COMMENTS},
        progress::Progress,
        scalar::{block::scan_block_scalar, flow::scan_flow_scalar, plain::scan_plain_scalar},
        tag::scan_node_tag,
    },
    queue::Queue,
    token::Token,
};

pub(crate) type Tokens<'de> = Queue<TokenEntry<'de>>;

/// The lexer tokenizes a YAML stream into the vocabulary
/// the event parser consumes: line starts carrying
/// indentation, document markers, directive pieces, node
/// decorators, flow punctuation and scalar content.
///
/// It is line oriented but context light; all block
/// structure (indentation rolling, implicit keys) is the
/// parser's business. The only context maintained here is
/// the flow nesting depth, which changes how plain scalars
/// terminate.
#[derive(Debug)]
pub(crate) struct Lexer
{
    /// Offset into the data buffer to start at
    offset: usize,

    /// Current stream state
    state: StreamState,

    /// Position tracking
    stats: Progress,

    /// Flow collection nesting depth
    flow: usize,

    /// The last line a LineStart was issued for; multi line
    /// scalars mark their final line here to keep the
    /// remainder of that line from producing one
    line_emitted: Option<usize>,

    /// Indentation of the line the current tokens sit on
    line_indent: usize,

    /// Line of the most recent '---', which roots the node
    /// that follows it on the same line
    marker_line: Option<usize>,
}

impl Lexer
{
    pub fn new() -> Self
    {
        Self {
            offset:       0,
            state:        StreamState::Start,
            stats:        Progress::new(),
            flow:         0,
            line_emitted: None,
            line_indent:  0,
            marker_line:  None,
        }
    }

    /// Byte offset scanned up to so far
    pub fn position(&self) -> usize
    {
        self.stats.read
    }

    /// Scan some tokens from the given .base into .tokens
    /// returning the number added.
    pub fn scan_tokens<'de>(
        &mut self,
        opts: Flags,
        base: &'de str,
        tokens: &mut Tokens<'de>,
    ) -> Result<usize>
    {
        let starting_tokens = tokens.len();

        while self.state != StreamState::Done && starting_tokens == tokens.len()
        {
            if let Some(mut buffer) = base.get(self.offset..)
            {
                self.scan_next_token(opts, &mut buffer, tokens)?;

                self.offset = base.len() - buffer.len();
            }
        }

        Ok(tokens.len() - starting_tokens)
    }

    fn scan_next_token<'de>(
        &mut self,
        opts: Flags,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
    ) -> Result<()>
    {
        // Is it the beginning of the stream?
        if self.state == StreamState::Start
        {
            self.state = StreamState::Stream;
        }

        // Eat whitespace and comments to the next delimiter
        self.eat_whitespace(opts, base, tokens)?;

        // Is it the end of the stream?
        if base.is_empty()
        {
            return self.fetch_stream_end(tokens);
        }

        // First token on a new line? Surface the line's
        // indentation before it
        if self.line_emitted != Some(self.stats.lines)
        {
            enqueue!(Token::LineStart(self.stats.column), :self.stats => tokens);

            self.line_emitted = Some(self.stats.lines);
            self.line_indent = self.stats.column;
        }

        // Fetch the next token(s)
        match base.as_bytes()
        {
            // Is it a directive?
            [DIRECTIVE, ..] if self.stats.column == 0 => self.fetch_directive(base, tokens),

            // Is it a document marker?
            [b @ b'-', b'-', b'-', ..] | [b @ b'.', b'.', b'.', ..]
                if self.stats.column == 0 && isWhiteSpaceZ!(~base, 3) =>
            {
                self.fetch_document_marker(base, tokens, *b == b'-')
            },

            // Is it the start or end of a flow collection?
            [b'{', ..] | [b'}', ..] | [b'[', ..] | [b']', ..] =>
            {
                self.fetch_flow_punctuation(base, tokens)
            },

            // Is it a flow entry?
            [b',', ..] => self.fetch_simple(base, tokens, Token::Comma),

            // Is it a block entry?
            [b'-', ..] if isWhiteSpaceZ!(~base, 1) =>
            {
                self.fetch_simple(base, tokens, Token::Dash)
            },

            // Is it an explicit key?
            [b'?', ..] if self.flow != 0 || isWhiteSpaceZ!(~base, 1) =>
            {
                self.fetch_simple(base, tokens, Token::QuestionMark)
            },

            // Is it a value?
            [b':', ..] if self.flow != 0 || isWhiteSpaceZ!(~base, 1) =>
            {
                self.fetch_simple(base, tokens, Token::Colon)
            },

            // Is it an anchor or alias?
            [b'&', ..] | [b'*', ..] => self.fetch_anchor(base, tokens),

            // Is it a tag?
            [b'!', ..] => self.fetch_tag(base, tokens),

            // Is it a block scalar?
            [c @ b'|', ..] | [c @ b'>', ..] =>
            {
                let fold = *c == b'>';

                match self.flow
                {
                    0 => self.fetch_block_scalar(base, tokens, fold),
                    _ => Err(ScanError::BlockIndicatorInFlow),
                }
            },

            // Is it a quoted scalar?
            [c @ b'\'', ..] | [c @ b'"', ..] =>
            {
                let single = *c == b'\'';

                self.fetch_flow_scalar(base, tokens, single)
            },

            // Is it a plain scalar?
            _ if self.is_plain_scalar(*base) => self.fetch_plain_scalar(base, tokens),

            // Otherwise its an error
            _ => Err(ScanError::UnknownDelimiter),
        }
    }

    fn fetch_stream_end(&mut self, tokens: &mut Tokens) -> Result<()>
    {
        if self.state != StreamState::Done
        {
            self.state = StreamState::Done;

            enqueue!(Token::StreamEnd, :self.stats => tokens);
        }

        Ok(())
    }

    fn fetch_document_marker<'de>(
        &mut self,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
        start: bool,
    ) -> Result<()>
    {
        let token = match start
        {
            true => Token::DirectivesEnd,
            false => Token::DocumentEnd,
        };

        // A '---' roots whatever follows it on the same
        // line
        if start
        {
            self.marker_line = Some(self.stats.lines);
        }

        enqueue!(token, :self.stats => tokens);

        advance!(*base, :self.stats, 3);

        Ok(())
    }

    fn fetch_directive<'de>(&mut self, base: &mut &'de str, tokens: &mut Tokens<'de>)
        -> Result<()>
    {
        let amt = scan_directive(*base, &mut self.stats, tokens)?;

        advance!(*base, amt);

        Ok(())
    }

    fn fetch_flow_punctuation<'de>(
        &mut self,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
    ) -> Result<()>
    {
        let token = match base.as_bytes()
        {
            [b'{', ..] =>
            {
                self.flow = self.flow.checked_add(1).ok_or(ScanError::IntOverflow)?;

                Token::OpeningBrace
            },
            [b'[', ..] =>
            {
                self.flow = self.flow.checked_add(1).ok_or(ScanError::IntOverflow)?;

                Token::OpeningBracket
            },
            [b'}', ..] =>
            {
                self.flow = self.flow.saturating_sub(1);

                Token::ClosingBrace
            },
            _ =>
            {
                self.flow = self.flow.saturating_sub(1);

                Token::ClosingBracket
            },
        };

        enqueue!(token, :self.stats => tokens);

        advance!(*base, :self.stats, 1);

        Ok(())
    }

    fn fetch_simple<'de>(
        &mut self,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
        token: Token<'de>,
    ) -> Result<()>
    {
        enqueue!(token, :self.stats => tokens);

        advance!(*base, :self.stats, 1);

        Ok(())
    }

    fn fetch_anchor<'de>(&mut self, base: &mut &'de str, tokens: &mut Tokens<'de>) -> Result<()>
    {
        let amt = scan_anchor(*base, &mut self.stats, tokens)?;

        advance!(*base, amt);

        Ok(())
    }

    fn fetch_tag<'de>(&mut self, base: &mut &'de str, tokens: &mut Tokens<'de>) -> Result<()>
    {
        let amt = scan_node_tag(*base, &mut self.stats, tokens)?;

        advance!(*base, amt);

        Ok(())
    }

    fn fetch_block_scalar<'de>(
        &mut self,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
        fold: bool,
    ) -> Result<()>
    {
        let node_indent = self.node_indent();

        let amt = scan_block_scalar(*base, &mut self.stats, node_indent, fold, tokens)?;

        advance!(*base, amt);

        // The scalar swallowed its own lines; whatever
        // follows sits at the start of an unseen line
        // already positioned at column 0, which the next
        // dispatch will surface
        Ok(())
    }

    fn fetch_flow_scalar<'de>(
        &mut self,
        base: &mut &'de str,
        tokens: &mut Tokens<'de>,
        single: bool,
    ) -> Result<()>
    {
        let start_stats = self.stats.clone();

        let (token, amt) = scan_flow_scalar(*base, &mut self.stats, single)?;

        enqueue!(token, :start_stats => tokens);

        advance!(*base, amt);

        // Suppress a LineStart for the remainder of the
        // line a multi line scalar ends on
        self.line_emitted = Some(self.stats.lines);

        Ok(())
    }

    fn fetch_plain_scalar<'de>(&mut self, base: &mut &'de str, tokens: &mut Tokens<'de>)
        -> Result<()>
    {
        let start_stats = self.stats.clone();

        let node_indent = self.node_indent();

        let (token, amt) =
            scan_plain_scalar(*base, &mut self.stats, node_indent, self.flow != 0)?;

        enqueue!(token, :start_stats => tokens);

        advance!(*base, amt);

        self.line_emitted = Some(self.stats.lines);

        Ok(())
    }

    /// The indentation the node starting at the current
    /// position hangs from, None when the node is a
    /// document root introduced by '---' on this line
    fn node_indent(&self) -> Option<usize>
    {
        match self.marker_line == Some(self.stats.lines)
        {
            true => None,
            false => Some(self.line_indent),
        }
    }

    /// Checks if .base starts with a character that could
    /// be a plain scalar
    fn is_plain_scalar(&self, base: &str) -> bool
    {
        if isWhiteSpaceZ!(~base)
        {
            return false;
        }

        /*
         * Per the YAML spec, a plain scalar cannot start with
         * any YAML indicators, excluding ':' '?' '-' in
         * certain circumstances.
         *
         * See:
         *      YAML 1.2: Section 7.3.3
         *      yaml.org/spec/1.2/spec.html#ns-plain-first(c)
         */
        match base.as_bytes()
        {
            [b'%', ..]
            | [b'&', ..]
            | [b'*', ..]
            | [b'!', ..]
            | [b'\'', ..]
            | [b'"', ..]
            | [b'{', ..]
            | [b'[', ..]
            | [b'}', ..]
            | [b']', ..]
            | [b',', ..]
            | [b'|', ..]
            | [b'>', ..]
            | [b'#', ..]
            | [b'@', ..]
            | [b'`', ..] => false,
            [b':', ..] | [b'?', ..] | [b'-', ..] if !self.is_plain_safe(base, 1) => false,
            _ => true,
        }
    }

    /// Checks if the character at .offset is "safe" to
    /// follow a plain scalar's first indicator, as defined
    /// in
    ///
    /// yaml.org/spec/1.2/spec.html#ns-plain-safe(c)
    fn is_plain_safe(&self, base: &str, offset: usize) -> bool
    {
        if isWhiteSpaceZ!(~base, offset)
        {
            return false;
        }

        self.flow == 0 || !check!(~base, offset => b',' | b'[' | b']' | b'{' | b'}')
    }

    /// Chomp whitespace and comments until we reach the
    /// next token, erroring on tabs used as indentation
    fn eat_whitespace<'de>(
        &mut self,
        opts: Flags,
        buffer: &mut &'de str,
        tokens: &mut Tokens<'de>,
    ) -> Result<usize>
    {
        let start = buffer.len();
        let mut leading = self.stats.column == 0;

        loop
        {
            match buffer.as_bytes()
            {
                [b' ', ..] =>
                {
                    advance!(*buffer, :self.stats, 1);
                },
                [b'\t', ..] =>
                {
                    if leading && self.flow == 0
                    {
                        self.reject_indentation_tab(buffer)?;
                    }

                    advance!(*buffer, :self.stats, 1);
                },
                _ if isBreak!(~*buffer) =>
                {
                    advance!(*buffer, :self.stats, @line);

                    leading = true;
                },
                [b'#', ..] =>
                {
                    let comment_stats = self.stats.clone();
                    let comment = take_comment(buffer, &mut self.stats);

                    if opts.contains(O_COMMENTS)
                    {
                        enqueue!(Token::Comment(cow!(comment)), :comment_stats => tokens);
                    }
                },
                _ => break,
            }
        }

        Ok(start - buffer.len())
    }

    /// A tab in leading whitespace is only legal if the
    /// line carries no content (blank or comment only)
    fn reject_indentation_tab(&self, buffer: &str) -> Result<()>
    {
        let mut at = 0;

        while isBlank!(~buffer, at)
        {
            at += 1;
        }

        match isBreakZ!(~buffer, at) || check!(~buffer, at => b'#')
        {
            true => Ok(()),
            false => Err(ScanError::TabIndentation),
        }
    }
}

/// Consume a comment's content to the line's end, excluding
/// the '#' itself
fn take_comment<'de>(buffer: &mut &'de str, stats: &mut Progress) -> &'de str
{
    // Eat the '#'
    advance!(*buffer, :stats, 1);

    let base = *buffer;
    let mut len = 0;

    while !isBreakZ!(~*buffer)
    {
        advance!(*buffer, :stats, @char, len);
    }

    &base[..len]
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum StreamState
{
    Start,
    Stream,
    Done,
}

const DIRECTIVE: u8 = b'%';
