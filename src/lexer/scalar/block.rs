/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of literal ('|') and folded ('>') block
//! scalars.
//!
//! The header indicators are surfaced as their own tokens
//! (the style piece, then any indentation indicator and
//! chomping sign), followed by a single Scalar token
//! carrying the fully constructed content: indentation
//! stripped, folding applied for '>', and the trailing
//! breaks resolved per the chomping mode.
//!
//! Folding never joins across a more indented line; breaks
//! adjacent to one are kept literally.

use atoi::atoi;

use crate::{
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        Tokens,
    },
    token::{ScalarStyle, Token},
};

const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Trailing line break disposition, declared by the '+' or
/// '-' header sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomp
{
    /// Remove all trailing breaks
    Strip,
    /// Keep exactly one trailing break (the default)
    Clip,
    /// Keep every trailing break
    Keep,
}

/// Scans a block scalar from .base (which must start at the
/// '|' or '>'), enqueuing the header tokens and the
/// constructed Scalar into .tokens, and returning the
/// amount of .base consumed.
///
/// .line_indent is the indentation of the line the header
/// sits on; an explicit indentation indicator is relative
/// to it, and content must clear it.
///
/// See:
///     YAML 1.2: Section 8.1
///     yaml.org/spec/1.2/#c-b-block-header(m,t)
pub(in crate::lexer) fn scan_block_scalar<'de>(
    base: &'de str,
    stats: &mut Progress,
    line_indent: Option<usize>,
    fold: bool,
    tokens: &mut Tokens<'de>,
) -> Result<usize>
{
    let mut buffer = base;
    let start_stats = stats.clone();
    let mut local_stats = stats.clone();
    let mut scratch: Vec<u8> = Vec::new();

    let style = match fold
    {
        true => ScalarStyle::Folded,
        false => ScalarStyle::Literal,
    };

    // Eat the '|' or '>', emitting its token
    let header = match fold
    {
        true => Token::Greater,
        false => Token::Pipe,
    };
    enqueue!(header, :local_stats => tokens);
    advance!(buffer, :local_stats, 1);

    // Scan the header indicators
    let (chomp, explicit) = scan_header(&mut buffer, &mut local_stats, tokens)?;

    // The header line may only carry blanks and a comment
    // after the indicators
    while isBlank!(~buffer)
    {
        advance!(buffer, :local_stats, 1);
    }
    if check!(~buffer => b'#')
    {
        while !isBreakZ!(~buffer)
        {
            advance!(buffer, :local_stats, @char);
        }
    }
    if !isBreakZ!(~buffer)
    {
        return Err(ScanError::InvalidBlockScalar);
    }

    // Tracks breaks seen since the last content line
    let mut lines: usize = 0;

    // Eat the header line's break (unless the stream ends
    // with the header)
    if isBreak!(~buffer)
    {
        advance!(buffer, :local_stats, @line);
        lines = 1;
    }

    // The scalar's indentation level, either declared
    // (relative to the parent's indent) or detected from
    // the first non blank line. A .line_indent of None
    // means the scalar is a document root, whose content
    // may sit flush at column 0.
    let mut indent = explicit.map(|n| match line_indent
    {
        Some(parent) => parent + n as usize,
        None => n as usize,
    });

    let mut first_content_seen = false;
    let mut prev_more_indented = false;

    'scalar: loop
    {
        if buffer.is_empty()
        {
            break 'scalar;
        }

        // Measure this line's leading spaces without
        // consuming anything
        let spaces = leading_spaces(buffer);

        // A line of nothing but whitespace counts as a
        // break, regardless of its indentation
        if blank_to_break(buffer, spaces)
        {
            skip_blank_line(&mut buffer, &mut local_stats)?;
            lines += 1;

            continue 'scalar;
        }

        // Tabs may not make up the indentation a block
        // scalar's content is aligned by
        let aligned_to = indent.unwrap_or(spaces);
        if spaces < aligned_to && check!(~buffer, spaces => b'\t')
        {
            return Err(ScanError::TabIndentation);
        }

        // The first non blank line establishes the indent
        // when the header did not
        if indent.is_none()
        {
            indent = Some(spaces);
        }

        // Safety: both branches above ensure indent is set
        let indent = indent.unwrap();

        // A non blank line at or below the header line's
        // indentation belongs to the enclosing structure
        // and terminates the scalar, as does any line that
        // no longer clears the scalar's own indent
        if line_indent.map_or(false, |parent| spaces <= parent) || spaces < indent
        {
            break 'scalar;
        }

        // Strip exactly the indentation; anything beyond it
        // is content
        advance!(buffer, :local_stats, indent);

        let this_more_indented = isBlank!(~buffer);

        // Reconcile the breaks accumulated since the last
        // content line
        match (first_content_seen, fold)
        {
            // Leading breaks, and every break in a literal
            // scalar, are kept as is (minus the header
            // line's own break)
            // The header line's own break never becomes
            // content, hence the subtraction on the first
            // content line
            (false, _) | (true, false) =>
            {
                for _ in 0..lines.saturating_sub(usize::from(!first_content_seen))
                {
                    scratch.push(NEWLINE)
                }
            },
            // Folding between two normally indented content
            // lines: one break becomes a space, n breaks
            // become n-1 newlines. Breaks touching a more
            // indented line are all kept.
            (true, true) =>
            {
                if prev_more_indented || this_more_indented
                {
                    for _ in 0..lines
                    {
                        scratch.push(NEWLINE)
                    }
                }
                else if lines == 1
                {
                    scratch.push(SPACE)
                }
                else
                {
                    for _ in 0..lines - 1
                    {
                        scratch.push(NEWLINE)
                    }
                }
            },
        }

        lines = 0;
        first_content_seen = true;
        prev_more_indented = this_more_indented;

        // Consume the line's content verbatim
        while !isBreakZ!(~buffer)
        {
            let width = widthOf!(~buffer).max(1);
            scratch.extend_from_slice(&buffer.as_bytes()[..width]);

            advance!(buffer, :local_stats, @char);
        }

        // Eat the line break (if not EOF)
        if isBreak!(~buffer)
        {
            advance!(buffer, :local_stats, @line);
            lines = 1;
        }
    }

    // Resolve the trailing breaks per the chomp mode
    match chomp
    {
        Chomp::Strip =>
        {},
        Chomp::Clip if first_content_seen && lines > 0 => scratch.push(NEWLINE),
        Chomp::Clip =>
        {},
        Chomp::Keep =>
        {
            for _ in 0..lines
            {
                scratch.push(NEWLINE)
            }
        },
    }

    // Safety: scratch only ever receives whole UTF8
    // sequences from .base, or ASCII breaks
    let content = String::from_utf8(scratch).unwrap();
    let token = Token::Scalar(cow!(content), style);

    // The scalar token sits at the header's position
    enqueue!(token, :start_stats => tokens);

    let advance = base.len() - buffer.len();
    *stats = local_stats;

    Ok(advance)
}

/// Scan the optional indentation indicator and chomping
/// sign, in either order, emitting their tokens
fn scan_header<'de>(
    buffer: &mut &'de str,
    stats: &mut Progress,
    tokens: &mut Tokens<'de>,
) -> Result<(Chomp, Option<u8>)>
{
    let mut chomp = Chomp::Clip;
    let mut explicit = None;

    for _ in 0..2
    {
        match buffer.as_bytes()
        {
            [b'+', ..] if chomp == Chomp::Clip =>
            {
                chomp = Chomp::Keep;

                enqueue!(Token::Plus, :stats => tokens);
                advance!(*buffer, :stats, 1);
            },
            [b'-', ..] if chomp == Chomp::Clip =>
            {
                chomp = Chomp::Strip;

                enqueue!(Token::Dash, :stats => tokens);
                advance!(*buffer, :stats, 1);
            },
            [d @ b'1'..=b'9', ..] if explicit.is_none() =>
            {
                explicit = atoi::<u8>(&[*d]);

                enqueue!(
                    Token::BlockIndentationIndicator(explicit.unwrap_or(0)),
                    :stats => tokens
                );
                advance!(*buffer, :stats, 1);
            },
            // An explicit zero is not a legal indentation
            // indicator; eat it silently rather than
            // erroring
            [b'0', ..] if explicit.is_none() =>
            {
                advance!(*buffer, :stats, 1);
            },
            _ => break,
        }
    }

    Ok((chomp, explicit))
}

/// Count the spaces at the head of .buffer
fn leading_spaces(buffer: &str) -> usize
{
    buffer.as_bytes().iter().take_while(|&&b| b == SPACE).count()
}

/// Is everything from .offset to the line's end whitespace?
fn blank_to_break(buffer: &str, offset: usize) -> bool
{
    let mut at = offset;

    loop
    {
        if isBreakZ!(~buffer, at)
        {
            return true;
        }

        if !isBlank!(~buffer, at)
        {
            return false;
        }

        at += 1;
    }
}

/// Consume a line known to hold only whitespace, including
/// its break
fn skip_blank_line(buffer: &mut &str, stats: &mut Progress) -> Result<()>
{
    while isBlank!(~*buffer)
    {
        advance!(*buffer, :stats, 1);
    }

    isBreakZ!(~*buffer)
        .then(|| ())
        .ok_or(ScanError::InvalidBlockScalar)?;

    if isBreak!(~*buffer)
    {
        advance!(*buffer, :stats, @line);
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{lexer::entry::TokenEntry, queue::Queue, token::Marker};

    type TestResult = anyhow::Result<()>;

    const FOLD: bool = true;
    const LITERAL: bool = false;

    fn scan(data: &str, line_indent: usize, fold: bool) -> Result<Vec<Token<'_>>>
    {
        let mut stats = Progress::new();
        let mut tokens: Queue<TokenEntry> = Queue::new();

        scan_block_scalar(data, &mut stats, Some(line_indent), fold, &mut tokens)?;

        let mut out = Vec::new();
        while let Some(entry) = tokens.pop()
        {
            out.push(entry.into_token())
        }

        Ok(out)
    }

    fn content<'a>(tokens: &'a [Token<'a>]) -> &'a str
    {
        match tokens.last()
        {
            Some(Token::Scalar(s, _)) => s.as_ref(),
            other => panic!("expected a scalar token, got {:?}", other),
        }
    }

    #[test]
    fn literal_simple() -> TestResult
    {
        let tokens = scan("|\n ab\n cd\n", 0, LITERAL)?;

        assert_eq!(tokens[0], Token::Pipe);
        assert_eq!(content(&tokens), "ab\ncd\n");

        Ok(())
    }

    #[test]
    fn literal_interior_blank_lines() -> TestResult
    {
        let tokens = scan("|\n ab\n\n cd\n", 0, LITERAL)?;

        assert_eq!(content(&tokens), "ab\n\ncd\n");

        Ok(())
    }

    #[test]
    fn folded_joins_lines() -> TestResult
    {
        let tokens = scan(">\n ab\n cd\n", 0, FOLD)?;

        assert_eq!(tokens[0], Token::Greater);
        assert_eq!(content(&tokens), "ab cd\n");

        Ok(())
    }

    #[test]
    fn folded_blank_line_breaks() -> TestResult
    {
        let tokens = scan(">\n ab\n\n cd\n", 0, FOLD)?;

        assert_eq!(content(&tokens), "ab\ncd\n");

        Ok(())
    }

    #[test]
    fn folded_keeps_more_indented() -> TestResult
    {
        let tokens = scan(">\n fold\n line\n   kept\n fin\n", 0, FOLD)?;

        assert_eq!(content(&tokens), "fold line\n  kept\nfin\n");

        Ok(())
    }

    #[test]
    fn chomp_strip() -> TestResult
    {
        let tokens = scan("|-\n ab\n\n\n", 0, LITERAL)?;

        assert_eq!(tokens[1], Token::Dash);
        assert_eq!(content(&tokens), "ab");

        Ok(())
    }

    #[test]
    fn chomp_keep() -> TestResult
    {
        let tokens = scan("|+\n ab\n\n\n", 0, LITERAL)?;

        assert_eq!(tokens[1], Token::Plus);
        assert_eq!(content(&tokens), "ab\n\n\n");

        Ok(())
    }

    #[test]
    fn explicit_indentation_indicator() -> TestResult
    {
        let tokens = scan("|2\n  ab\n   cd\n", 0, LITERAL)?;

        assert_eq!(tokens[1], Token::BlockIndentationIndicator(2));
        assert_eq!(content(&tokens), "ab\n cd\n");

        Ok(())
    }

    #[test]
    fn detected_indentation_from_first_line() -> TestResult
    {
        let tokens = scan("|\n   ab\n   cd\n", 0, LITERAL)?;

        assert_eq!(content(&tokens), "ab\ncd\n");

        Ok(())
    }

    #[test]
    fn leading_blank_lines_preserved() -> TestResult
    {
        let tokens = scan("|\n\n ab\n", 0, LITERAL)?;

        assert_eq!(content(&tokens), "\nab\n");

        Ok(())
    }

    #[test]
    fn terminates_on_outdent() -> TestResult
    {
        let data = "|\n  ab\nnext: line";
        let mut stats = Progress::new();
        let mut tokens: Queue<TokenEntry> = Queue::new();

        let amt = scan_block_scalar(data, &mut stats, Some(0), LITERAL, &mut tokens)?;

        assert_eq!(&data[amt..], "next: line");

        let markers: Vec<Marker> = std::iter::from_fn(|| tokens.pop())
            .map(|e| e.marker())
            .collect();
        assert_eq!(markers, vec![Marker::Pipe, Marker::Scalar]);

        Ok(())
    }

    #[test]
    fn header_rejects_trailing_garbage()
    {
        assert!(scan("| trailing\n content\n", 0, LITERAL).is_err());
    }

    #[test]
    fn header_comment_allowed() -> TestResult
    {
        let tokens = scan("|- # stripped\n ab\n", 0, LITERAL)?;

        assert_eq!(content(&tokens), "ab");

        Ok(())
    }
}
