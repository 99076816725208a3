/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of plain (unquoted) scalars.
//!
//! A plain scalar may span multiple lines; subsequent more
//! indented lines are joined to it with a single space,
//! while blank lines contribute newlines. All folding
//! happens here, so the token the parser receives is the
//! complete fragment, classified against the core schema.

use crate::{
    hints::guess_type,
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        scalar::{set_no_borrow, NEWLINE, SPACE},
    },
    token::Token,
};

/// Scans a plain scalar from .base, returning the token and
/// the amount of .base consumed. Borrows from .base unless
/// line joining forced an allocation.
///
/// The trailing whitespace after the last content character
/// is never consumed; the caller's whitespace handling owns
/// it.
///
/// See:
///     YAML 1.2: Section 7.3.3
///     yaml.org/spec/1.2/spec.html#ns-plain-first(c)
pub(in crate::lexer) fn scan_plain_scalar<'de>(
    base: &'de str,
    stats: &mut Progress,
    line_indent: Option<usize>,
    flow_context: bool,
) -> Result<(Token<'de>, usize)>
{
    let mut buffer = base;
    let mut scratch = Vec::new();

    // Local copies of the given stats
    let mut local_stats = stats.clone();
    let mut scalar_stats = stats.clone();

    // Do we need to normalize and therefore allocate?
    let mut can_borrow = true;
    // Have we hit a lower indentation than our starting
    // line?
    let mut outdent = false;

    // Track whitespace and line breaks accumulated, these
    // have two uses:
    //
    // 1. In loop, for handling line joins
    // 2. Post loop for truncating trailing space
    let mut whitespace: usize = 0;
    let mut lines: usize = 0;

    let block_context = !flow_context;

    // Continuation lines must clear the indentation of the
    // line this scalar starts on. A scalar flush at column
    // 0, or one rooting a document directly after '---'
    // (.line_indent of None), may continue at column 0.
    let min_indent = match (local_stats.column == 0, line_indent)
    {
        (true, _) | (_, None) => 0,
        (_, Some(indent)) => indent + 1,
    };

    // Inside flow contexts you *may not* start a plain
    // scalar with a ':', '?', or '-' followed by a flow
    // indicator
    if flow_context && check!(~buffer => b':' | b'?' | b'-') && flow_indicator(buffer, 1)
    {
        return Err(ScanError::InvalidPlainScalar);
    }

    'scalar: loop
    {
        if buffer.is_empty() || outdent
        {
            break 'scalar;
        }

        // A YAML document indicator or ' #' terminates a
        // plain scalar
        //
        // Note that we only hit this guard directly after
        // whitespace, so checking for a bare '#' is okay
        if isDocumentIndicator!(~buffer, :local_stats) || check!(~buffer => b'#')
        {
            break 'scalar;
        }

        // Check for character sequences which end a plain
        // scalar, namely:
        //
        // ': '                         -> anywhere
        // ',' | '[' | ']' | '{' | '}'  -> flow context
        if (check!(~buffer => b':') && isWhiteSpaceZ!(~buffer, 1))
            || flow_context && flow_indicator(buffer, 0)
        {
            break 'scalar;
        }

        // Reset whitespace counters for the next char /
        // whitespace sequence. We do this here, after all
        // possible terminations that could leave trailing
        // whitespace, so that the post loop truncate is
        // accurate.
        whitespace = 0;
        lines = 0;

        // Handle non whitespace characters
        while !isWhiteSpaceZ!(~buffer)
        {
            if (check!(~buffer => b':') && isWhiteSpaceZ!(~buffer, 1))
                || flow_context && flow_indicator(buffer, 0)
            {
                break;
            }

            if !can_borrow
            {
                let width = widthOf!(~buffer).max(1);
                scratch.extend_from_slice(&buffer.as_bytes()[..width]);
            }
            advance!(buffer, :local_stats, @char);
        }
        // Save last non whitespace character position
        scalar_stats = local_stats.clone();

        // Handle whitespace characters
        loop
        {
            match (isBlank!(~buffer), isBreak!(~buffer))
            {
                // No more whitespace, exit loop
                (false, false) => break,
                // Handle non break space
                (true, _) =>
                {
                    if !can_borrow
                    {
                        scratch.push(buffer.as_bytes()[0])
                    }
                    whitespace += 1;
                    advance!(buffer, :local_stats, 1);
                },
                // Handle line breaks
                (false, _) =>
                {
                    set_no_borrow(&mut can_borrow, base, buffer, 0, &mut scratch);

                    lines += 1;
                    advance!(buffer, :local_stats, @line);
                },
            }
        }

        // If the whitespace ended at a lower indent, then
        // we're done, and should exit on the next loop
        outdent = block_context && local_stats.column < min_indent;

        // Handle line joins as needed. Note that .whitespace
        // and .lines deliberately survive this match; if the
        // loop exits before more content arrives, the post
        // loop truncate uses them to undo the speculative
        // join.
        match lines
        {
            // No join needed
            0 =>
            {},
            // If a single line break was recorded, we
            // _cannot_ have seen a line wholly made of
            // whitespace, therefore join via a space
            1 =>
            {
                scratch.truncate(scratch.len() - whitespace);
                whitespace = 0;

                scratch.push(SPACE);
            },
            // Else we need to append (n - 1) newlines, as we
            // skip the origin line's break
            _ =>
            {
                scratch.truncate(scratch.len() - whitespace);
                whitespace = 0;
                lines -= 1;

                // Safety: we can only reach this branch if
                // lines > 1
                for _ in 0..lines
                {
                    scratch.push(NEWLINE)
                }
            },
        }
    }

    // Trim any trailing whitespace that might be left after
    // exiting the loop
    if !can_borrow
    {
        scratch.truncate(scratch.len() - (whitespace + lines));
    }
    // Note we use the stats which point at the last content
    // character read
    let advance = scalar_stats.read - stats.read;

    let slice = match can_borrow
    {
        true => cow!(&base[..advance]),
        false =>
        {
            // Safety: scratch only ever receives whole UTF8
            // sequences from .base, or ASCII joins
            let utf8 = String::from_utf8(scratch).unwrap();

            cow!(utf8)
        },
    };

    let hint = guess_type(&slice);
    let token = Token::ScalarPart(slice, hint);
    *stats = scalar_stats;

    Ok((token, advance))
}

/// Checks if the byte (@ .offset) is a flow indicator
fn flow_indicator(buffer: &str, offset: usize) -> bool
{
    check!(~buffer, offset => b',' | b'[' | b']' | b'{' | b'}')
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::hints::TypeHint;

    type TestResult = anyhow::Result<()>;

    const BLOCK: bool = false;
    const FLOW: bool = true;

    fn scan(data: &str, flow: bool) -> Result<(Token<'_>, usize)>
    {
        let mut stats = Progress::new();

        scan_plain_scalar(data, &mut stats, Some(0), flow)
    }

    #[test]
    fn single_line() -> TestResult
    {
        let (token, amt) = scan("hello world: ", BLOCK)?;

        assert_eq!(token, Token::ScalarPart(cow!("hello world"), TypeHint::Str));
        assert_eq!(amt, 11);

        Ok(())
    }

    #[test]
    fn hints_attached() -> TestResult
    {
        let (token, _) = scan("-12", BLOCK)?;
        assert_eq!(token, Token::ScalarPart(cow!("-12"), TypeHint::Integer));

        let (token, _) = scan("true", BLOCK)?;
        assert_eq!(token, Token::ScalarPart(cow!("true"), TypeHint::BoolTrue));

        Ok(())
    }

    #[test]
    fn folds_continuation_lines() -> TestResult
    {
        let (token, _) = scan("first\nsecond\nthird", BLOCK)?;

        assert_eq!(
            token,
            Token::ScalarPart(cow!("first second third"), TypeHint::Str)
        );

        Ok(())
    }

    #[test]
    fn blank_lines_become_newlines() -> TestResult
    {
        let (token, _) = scan("first\n\nsecond\n\n\nthird", BLOCK)?;

        assert_eq!(
            token,
            Token::ScalarPart(cow!("first\nsecond\n\nthird"), TypeHint::Str)
        );

        Ok(())
    }

    #[test]
    fn comment_terminates() -> TestResult
    {
        let (token, amt) = scan("content # not content", BLOCK)?;

        assert_eq!(token, Token::ScalarPart(cow!("content"), TypeHint::Str));
        assert_eq!(amt, 7);

        Ok(())
    }

    #[test]
    fn flow_indicators_terminate() -> TestResult
    {
        let (token, _) = scan("entry, next", FLOW)?;
        assert_eq!(token, Token::ScalarPart(cow!("entry"), TypeHint::Str));

        let (token, _) = scan("entry]", FLOW)?;
        assert_eq!(token, Token::ScalarPart(cow!("entry"), TypeHint::Str));

        // In the block context the same bytes are content
        let (token, _) = scan("entry, next", BLOCK)?;
        assert_eq!(token, Token::ScalarPart(cow!("entry, next"), TypeHint::Str));

        Ok(())
    }

    #[test]
    fn adjacent_colon_is_content() -> TestResult
    {
        let (token, _) = scan("a:1", BLOCK)?;

        assert_eq!(token, Token::ScalarPart(cow!("a:1"), TypeHint::Str));

        Ok(())
    }

    #[test]
    fn document_indicator_terminates() -> TestResult
    {
        let (token, _) = scan("content\n--- next", BLOCK)?;

        assert_eq!(token, Token::ScalarPart(cow!("content"), TypeHint::Str));

        Ok(())
    }

    #[test]
    fn outdent_terminates() -> TestResult
    {
        let mut stats = Progress::new();
        stats.update(3, 0, 3);

        // "a: foo\n bar" seen from the scalar's start, on a
        // line indented 0; the continuation clears it
        let (token, _) = scan_plain_scalar("foo\n bar\nnext", &mut stats, Some(0), BLOCK)?;

        assert_eq!(token, Token::ScalarPart(cow!("foo bar"), TypeHint::Str));

        Ok(())
    }

    #[test]
    fn invalid_flow_starts()
    {
        assert!(scan(":[x]", FLOW).is_err());
    }
}
