/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of single and double quoted scalars.
//!
//! Both styles fold line breaks exactly like plain scalars
//! do: a single break joins via a space, further blank
//! lines add newlines. Double quotes additionally support
//! the full escape repertoire, including `\x`, `\u`, `\U`
//! unicode points and the escaped line break which joins
//! two lines without inserting anything.

use crate::{
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        scalar::{escape::flow_unescape, set_no_borrow, NEWLINE, SPACE},
    },
    token::{ScalarStyle, Token},
};

const SINGLE: u8 = b'\'';
const DOUBLE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// Scans a quoted scalar from .base, returning the token
/// and the amount of .base consumed, including both
/// quotes. Borrows from .base unless an escape or a line
/// join forced an allocation.
///
/// See:
///     YAML 1.2: Section 7.3.1 / 7.3.2
///     yaml.org/spec/1.2/spec.html#c-quoted-quote
pub(in crate::lexer) fn scan_flow_scalar<'de>(
    base: &'de str,
    stats: &mut Progress,
    single: bool,
) -> Result<(Token<'de>, usize)>
{
    let mut buffer = base;
    let mut scratch = Vec::new();

    let mut local_stats = stats.clone();

    let mut can_borrow = true;
    let mut whitespace: usize = 0;
    let mut lines: usize = 0;

    let (quote, style) = match single
    {
        true => (SINGLE, ScalarStyle::SingleQuote),
        false => (DOUBLE, ScalarStyle::DoubleQuote),
    };

    // Eat the left quote
    advance!(buffer, :local_stats, 1);

    'scalar: loop
    {
        // A document indicator at column 0 means the quote
        // was never closed
        if local_stats.column == 0 && isDocumentIndicator!(~buffer, :local_stats)
        {
            return Err(ScanError::UnterminatedScalar);
        }

        // As does the stream ending
        if buffer.is_empty()
        {
            return Err(ScanError::UnterminatedScalar);
        }

        // We're done if we hit the closing quote
        if buffer.as_bytes().first() == Some(&quote)
        {
            break 'scalar;
        }

        whitespace = 0;
        lines = 0;

        // Consume content characters
        while !isWhiteSpaceZ!(~buffer)
        {
            match buffer.as_bytes()
            {
                // An escaped single quote ('')
                [b'\'', b'\'', ..] if single =>
                {
                    set_no_borrow(&mut can_borrow, base, buffer, 1, &mut scratch);

                    scratch.push(SINGLE);
                    advance!(buffer, :local_stats, 2);
                },
                // The closing quote
                [q, ..] if *q == quote => break,
                // An escaped line break joins two lines
                // without content; trailing blanks of the
                // next line's indentation are discarded
                [BACKSLASH, ..] if !single && isBreak!(~buffer, 1) =>
                {
                    set_no_borrow(&mut can_borrow, base, buffer, 1, &mut scratch);

                    advance!(buffer, :local_stats, 1);
                    advance!(buffer, :local_stats, @line);

                    while isBlank!(~buffer)
                    {
                        advance!(buffer, :local_stats, 1);
                    }

                    continue 'scalar;
                },
                // Any other escape sequence
                [BACKSLASH, ..] if !single =>
                {
                    set_no_borrow(&mut can_borrow, base, buffer, 1, &mut scratch);

                    let amt = flow_unescape(buffer, &mut scratch)?;
                    advance!(buffer, :local_stats, amt);
                },
                // Unescaped content
                _ =>
                {
                    if !can_borrow
                    {
                        let width = widthOf!(~buffer).max(1);
                        scratch.extend_from_slice(&buffer.as_bytes()[..width]);
                    }
                    advance!(buffer, :local_stats, @char);
                },
            }
        }

        // Consume whitespace, tracking the counts for the
        // join below
        loop
        {
            match (isBlank!(~buffer), isBreak!(~buffer))
            {
                (false, false) => break,
                (true, _) =>
                {
                    if !can_borrow
                    {
                        scratch.push(buffer.as_bytes()[0])
                    }
                    whitespace += 1;
                    advance!(buffer, :local_stats, 1);
                },
                (false, _) =>
                {
                    set_no_borrow(&mut can_borrow, base, buffer, 1, &mut scratch);

                    lines += 1;
                    advance!(buffer, :local_stats, @line);
                },
            }
        }

        // Handle line joins as needed
        match lines
        {
            0 =>
            {},
            1 =>
            {
                scratch.truncate(scratch.len() - whitespace);
                whitespace = 0;

                scratch.push(SPACE);
            },
            _ =>
            {
                scratch.truncate(scratch.len() - whitespace);
                whitespace = 0;
                lines -= 1;

                for _ in 0..lines
                {
                    scratch.push(NEWLINE)
                }
            },
        }
    }

    let slice = match can_borrow
    {
        // Safety: .base->0 is a quote and the head of
        // .buffer is the closing quote, so both ends sit on
        // codepoint boundaries
        true => cow!(&base[1..base.len() - buffer.len()]),
        false =>
        {
            // Safety: scratch only ever receives whole UTF8
            // sequences or decoded escapes
            let utf8 = String::from_utf8(scratch).unwrap();

            cow!(utf8)
        },
    };

    // Eat the right quote
    advance!(buffer, :local_stats, 1);

    let advance = base.len() - buffer.len();
    let token = Token::Scalar(slice, style);

    *stats = local_stats;

    Ok((token, advance))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    const SINGLE_Q: bool = true;
    const DOUBLE_Q: bool = false;

    fn scan(data: &str, single: bool) -> Result<(Token<'_>, usize)>
    {
        let mut stats = Progress::new();

        scan_flow_scalar(data, &mut stats, single)
    }

    #[test]
    fn single_empty() -> TestResult
    {
        let (token, amt) = scan("''", SINGLE_Q)?;

        assert_eq!(token, Token::Scalar(cow!(""), ScalarStyle::SingleQuote));
        assert_eq!(amt, 2);

        Ok(())
    }

    #[test]
    fn single_simple() -> TestResult
    {
        let (token, amt) = scan("'hello world'", SINGLE_Q)?;

        assert_eq!(
            token,
            Token::Scalar(cow!("hello world"), ScalarStyle::SingleQuote)
        );
        assert_eq!(amt, 13);

        Ok(())
    }

    #[test]
    fn single_escaped_quote() -> TestResult
    {
        let (token, _) = scan("'it''s'", SINGLE_Q)?;

        assert_eq!(token, Token::Scalar(cow!("it's"), ScalarStyle::SingleQuote));

        Ok(())
    }

    #[test]
    fn single_folds_lines() -> TestResult
    {
        let (token, _) = scan("'first\n second\n\n third'", SINGLE_Q)?;

        assert_eq!(
            token,
            Token::Scalar(cow!("first second\nthird"), ScalarStyle::SingleQuote)
        );

        Ok(())
    }

    #[test]
    fn double_escapes() -> TestResult
    {
        let (token, _) = scan(r#""tab\there\nand\x41ü""#, DOUBLE_Q)?;

        assert_eq!(
            token,
            Token::Scalar(cow!("tab\there\nandAü"), ScalarStyle::DoubleQuote)
        );

        Ok(())
    }

    #[test]
    fn double_escaped_break_joins_without_space() -> TestResult
    {
        let (token, _) = scan("\"one\\\n  two\"", DOUBLE_Q)?;

        assert_eq!(
            token,
            Token::Scalar(cow!("onetwo"), ScalarStyle::DoubleQuote)
        );

        Ok(())
    }

    #[test]
    fn unterminated_is_rejected()
    {
        assert_eq!(
            scan("'no end", SINGLE_Q).unwrap_err(),
            ScanError::UnterminatedScalar
        );
        assert_eq!(
            scan("\"a\n--- b\"", DOUBLE_Q).unwrap_err(),
            ScanError::UnterminatedScalar
        );
    }

    #[test]
    fn unknown_escape_is_rejected()
    {
        assert_eq!(
            scan(r#""\q""#, DOUBLE_Q).unwrap_err(),
            ScanError::UnknownEscape
        );
    }
}
