/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of node tags and the pieces shared with the
//! %TAG directive scanner.
//!
//! A node tag is one of:
//!
//! ```yaml
//! !<tag:example.com,2024:verbatim>  # verbatim
//! !!str                             # secondary handle
//! !named!suffix                     # named handle
//! !local                            # primary handle
//! !                                 # non specific
//! ```
//!
//! Handles and suffixes are emitted as separate tokens;
//! resolution against the handle table is the parser's
//! business. Percent escapes in suffixes and URIs are
//! decoded here.

use crate::{
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        scalar::escape::tag_uri_unescape,
        Tokens,
    },
    token::{Slice, Token},
};

/// Scans a node tag from .base (which must start at the
/// '!'), enqueuing its tokens and returning the amount of
/// .base consumed.
///
/// See:
///     YAML 1.2: Section 6.9.1
///     yaml.org/spec/1.2/spec.html#c-ns-tag-property
pub(in crate::lexer) fn scan_node_tag<'de>(
    base: &'de str,
    stats: &mut Progress,
    tokens: &mut Tokens<'de>,
) -> Result<usize>
{
    let mut buffer = base;
    let start_stats = stats.clone();

    // Verbatim tag
    if check!(~buffer, 1 => b'<')
    {
        // Eat the '!<'
        advance!(buffer, :stats, 2);

        let uri = scan_uri_until(&mut buffer, stats, |b| b == b'>')?;

        if uri.is_empty()
        {
            return Err(ScanError::InvalidTagSuffix);
        }

        check!(~buffer => b'>', else ScanError::InvalidTagSuffix)?;
        advance!(buffer, :stats, 1);

        enqueue!(Token::VerbatimTag(uri), :start_stats => tokens);

        return Ok(base.len() - buffer.len());
    }

    let handle = scan_tag_handle(&mut buffer, stats)?;
    enqueue!(Token::TagHandle(handle.clone()), :start_stats => tokens);

    let suffix_stats = stats.clone();
    let suffix = scan_uri_until(&mut buffer, stats, is_suffix_end)?;

    // A secondary or named handle must be followed by a
    // suffix; only the primary '!' may stand alone
    if suffix.is_empty() && handle != "!"
    {
        return Err(ScanError::InvalidTagSuffix);
    }

    enqueue!(Token::TagSuffix(suffix), :suffix_stats => tokens);

    Ok(base.len() - buffer.len())
}

/// Scans a tag handle: `!`, `!!` or `!word!`, returning the
/// whole handle including its bracketing marks
pub(in crate::lexer) fn scan_tag_handle<'de>(
    buffer: &mut &'de str,
    stats: &mut Progress,
) -> Result<Slice<'de>>
{
    let base = *buffer;
    let mut len = 0;

    check!(~*buffer => b'!', else ScanError::InvalidTagHandle)?;
    advance!(*buffer, :stats, 1, len);

    // Secondary handle ('!!')
    if check!(~*buffer => b'!')
    {
        advance!(*buffer, :stats, 1, len);

        return Ok(cow!(&base[..len]));
    }

    // Word characters would make this a named handle, if a
    // closing '!' follows them
    let mut word = 0;
    while check!(~*buffer, word => [b'a'..=b'z', ..] | [b'A'..=b'Z', ..] | [b'0'..=b'9', ..] | b'-')
    {
        word += 1;
    }

    if word > 0 && check!(~*buffer, word => b'!')
    {
        advance!(*buffer, :stats, word + 1, len);

        return Ok(cow!(&base[..len]));
    }

    // Otherwise it was the primary handle; the word (if
    // any) belongs to the suffix
    Ok(cow!(&base[..len]))
}

/// Scans a tag prefix URI for the %TAG directive, ending at
/// the first whitespace
pub(in crate::lexer) fn scan_uri<'de>(
    buffer: &mut &'de str,
    stats: &mut Progress,
) -> Result<Slice<'de>>
{
    let uri = scan_uri_until(buffer, stats, |_| false)?;

    if uri.is_empty()
    {
        return Err(ScanError::InvalidTagSuffix);
    }

    Ok(uri)
}

/// Scans URI characters until whitespace, .term, or a
/// character that cannot be part of a URI. Percent escapes
/// are decoded, in which case the result is owned.
fn scan_uri_until<'de, F>(
    buffer: &mut &'de str,
    stats: &mut Progress,
    term: F,
) -> Result<Slice<'de>>
where
    F: Fn(u8) -> bool,
{
    let base = *buffer;
    let mut scratch: Vec<u8> = Vec::new();
    let mut can_borrow = true;
    let mut len = 0;

    loop
    {
        let byte = match buffer.as_bytes().first()
        {
            None => break,
            Some(&b) => b,
        };

        if term(byte) || isWhiteSpace!(~*buffer) || !is_uri_char(byte)
        {
            break;
        }

        if byte == b'%'
        {
            if can_borrow
            {
                scratch.extend_from_slice(base[..len].as_bytes());
                can_borrow = false;
            }

            let amt = tag_uri_unescape(buffer, &mut scratch)?;
            advance!(*buffer, :stats, amt, len);

            continue;
        }

        if !can_borrow
        {
            scratch.push(byte);
        }
        advance!(*buffer, :stats, 1, len);
    }

    let slice = match can_borrow
    {
        true => cow!(&base[..len]),
        false =>
        {
            // Safety: scratch receives ascii URI characters
            // or whole decoded UTF8 sequences
            let utf8 = String::from_utf8(scratch).map_err(|_| ScanError::UnknownEscape)?;

            cow!(utf8)
        },
    };

    Ok(slice)
}

/// Suffix characters stop at flow indicators so that
/// `[!!str, other]` lexes sanely
fn is_suffix_end(byte: u8) -> bool
{
    matches!(byte, b',' | b'[' | b']' | b'{' | b'}')
}

/// ns-uri-char, less the percent sign which is handled by
/// the escape decoder
fn is_uri_char(byte: u8) -> bool
{
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'#' | b';'
                | b'/'
                | b'?'
                | b':'
                | b'@'
                | b'&'
                | b'='
                | b'+'
                | b'$'
                | b','
                | b'_'
                | b'.'
                | b'!'
                | b'~'
                | b'*'
                | b'\''
                | b'('
                | b')'
                | b'['
                | b']'
                | b'-'
                | b'%'
        )
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{lexer::entry::TokenEntry, queue::Queue};

    type TestResult = anyhow::Result<()>;

    fn scan(data: &str) -> Result<Vec<Token<'_>>>
    {
        let mut stats = Progress::new();
        let mut tokens: Queue<TokenEntry> = Queue::new();

        scan_node_tag(data, &mut stats, &mut tokens)?;

        Ok(std::iter::from_fn(|| tokens.pop())
            .map(|e| e.into_token())
            .collect())
    }

    #[test]
    fn secondary_handle() -> TestResult
    {
        let tokens = scan("!!str value")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!!")), Token::TagSuffix(cow!("str"))]
        );

        Ok(())
    }

    #[test]
    fn primary_handle() -> TestResult
    {
        let tokens = scan("!local value")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!")), Token::TagSuffix(cow!("local"))]
        );

        Ok(())
    }

    #[test]
    fn named_handle() -> TestResult
    {
        let tokens = scan("!e!thing value")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!e!")), Token::TagSuffix(cow!("thing"))]
        );

        Ok(())
    }

    #[test]
    fn non_specific() -> TestResult
    {
        let tokens = scan("! value")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!")), Token::TagSuffix(cow!(""))]
        );

        Ok(())
    }

    #[test]
    fn verbatim() -> TestResult
    {
        let tokens = scan("!<tag:example.com,2024:thing> value")?;

        assert_eq!(
            tokens,
            vec![Token::VerbatimTag(cow!("tag:example.com,2024:thing"))]
        );

        Ok(())
    }

    #[test]
    fn suffix_percent_escapes() -> TestResult
    {
        let tokens = scan("!!b%C3%BCro value")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!!")), Token::TagSuffix(cow!("büro"))]
        );

        Ok(())
    }

    #[test]
    fn suffix_stops_at_flow_indicators() -> TestResult
    {
        let tokens = scan("!!str]")?;

        assert_eq!(
            tokens,
            vec![Token::TagHandle(cow!("!!")), Token::TagSuffix(cow!("str"))]
        );

        Ok(())
    }

    #[test]
    fn missing_suffix_rejected()
    {
        assert!(scan("!! value").is_err());
        assert!(scan("!e! value").is_err());
        assert!(scan("!<> value").is_err());
    }
}
