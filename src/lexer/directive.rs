/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of stream directives.
//!
//! `%YAML` becomes a YamlDirective token followed by one
//! VersionPart per dotted component, `%TAG` becomes a
//! TagDirective token followed by its TagHandle and TagUri,
//! and anything else becomes an UnknownDirective with zero
//! or more UnknownDirectiveParam tokens. The parser decides
//! what, if anything, to do about unknown directives.

use crate::{
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        tag::{scan_tag_handle, scan_uri},
        Tokens,
    },
    token::Token,
};

/// Scans a directive from .base (which must start at the
/// '%'), enqueuing the directive's tokens and returning the
/// amount of .base consumed.
///
/// The line's trailing break is left unconsumed.
///
/// See:
///     YAML 1.2: Section 6.8
///     yaml.org/spec/1.2/spec.html#ns-directive-name
pub(in crate::lexer) fn scan_directive<'de>(
    base: &'de str,
    stats: &mut Progress,
    tokens: &mut Tokens<'de>,
) -> Result<usize>
{
    let mut buffer = base;
    let start_stats = stats.clone();

    // Eat the '%'
    advance!(buffer, :stats, 1);

    let name = take_word(&mut buffer, stats);

    if name.is_empty()
    {
        return Err(ScanError::InvalidDirective);
    }

    match name
    {
        "YAML" =>
        {
            enqueue!(Token::YamlDirective, :start_stats => tokens);

            eat_blanks(&mut buffer, stats, true)?;
            scan_version(&mut buffer, stats, tokens)?;
        },
        "TAG" =>
        {
            enqueue!(Token::TagDirective, :start_stats => tokens);

            eat_blanks(&mut buffer, stats, true)?;

            let handle_stats = stats.clone();
            let handle = scan_tag_handle(&mut buffer, stats)?;
            enqueue!(Token::TagHandle(handle), :handle_stats => tokens);

            eat_blanks(&mut buffer, stats, true)?;

            let uri_stats = stats.clone();
            let uri = scan_uri(&mut buffer, stats)?;
            enqueue!(Token::TagUri(uri), :uri_stats => tokens);
        },
        _ =>
        {
            enqueue!(Token::UnknownDirective(cow!(name)), :start_stats => tokens);

            // Collect any whitespace separated parameters
            // up to the line's end or a comment
            loop
            {
                eat_blanks(&mut buffer, stats, false)?;

                if isBreakZ!(~buffer) || check!(~buffer => b'#')
                {
                    break;
                }

                let param_stats = stats.clone();
                let param = take_word(&mut buffer, stats);

                enqueue!(
                    Token::UnknownDirectiveParam(cow!(param)),
                    :param_stats => tokens
                );
            }
        },
    }

    // Nothing but blanks and a comment may follow a
    // directive
    eat_blanks(&mut buffer, stats, false)?;
    if !(isBreakZ!(~buffer) || check!(~buffer => b'#'))
    {
        return Err(ScanError::InvalidDirective);
    }

    Ok(base.len() - buffer.len())
}

/// Scans a 'major.minor' version pair, enqueuing one
/// VersionPart per component
fn scan_version<'de>(
    buffer: &mut &'de str,
    stats: &mut Progress,
    tokens: &mut Tokens<'de>,
) -> Result<()>
{
    let major_stats = stats.clone();
    let major = take_digits(buffer, stats)?;
    enqueue!(Token::VersionPart(cow!(major)), :major_stats => tokens);

    check!(~*buffer => b'.', else ScanError::InvalidVersion)?;
    advance!(*buffer, :stats, 1);

    let minor_stats = stats.clone();
    let minor = take_digits(buffer, stats)?;
    enqueue!(Token::VersionPart(cow!(minor)), :minor_stats => tokens);

    Ok(())
}

/// Consume a run of directive name characters
fn take_word<'de>(buffer: &mut &'de str, stats: &mut Progress) -> &'de str
{
    let base = *buffer;
    let mut len = 0;

    while !isWhiteSpaceZ!(~*buffer)
    {
        advance!(*buffer, :stats, @char, len);
    }

    &base[..len]
}

/// Consume a run of ascii digits, erroring if none are
/// found
fn take_digits<'de>(buffer: &mut &'de str, stats: &mut Progress) -> Result<&'de str>
{
    let base = *buffer;
    let mut len = 0;

    while check!(~*buffer => [b'0'..=b'9', ..])
    {
        advance!(*buffer, :stats, @char, len);
    }

    if len == 0
    {
        return Err(ScanError::InvalidVersion);
    }

    Ok(&base[..len])
}

/// Consume blanks, optionally requiring at least one
fn eat_blanks(buffer: &mut &str, stats: &mut Progress, required: bool) -> Result<usize>
{
    let mut eaten = 0;

    while isBlank!(~*buffer)
    {
        advance!(*buffer, :stats, 1, eaten);
    }

    if required && eaten == 0 && !isBreakZ!(~*buffer)
    {
        return Err(ScanError::InvalidDirective);
    }

    Ok(eaten)
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

        scan_directive(data, &mut stats, &mut tokens)?;

        Ok(std::iter::from_fn(|| tokens.pop())
            .map(|e| e.into_token())
            .collect())
    }

    #[test]
    fn yaml_version() -> TestResult
    {
        let tokens = scan("%YAML 1.2")?;

        assert_eq!(
            tokens,
            vec![
                Token::YamlDirective,
                Token::VersionPart(cow!("1")),
                Token::VersionPart(cow!("2")),
            ]
        );

        Ok(())
    }

    #[test]
    fn tag_directive() -> TestResult
    {
        let tokens = scan("%TAG !e! tag:example.com,2024:")?;

        assert_eq!(
            tokens,
            vec![
                Token::TagDirective,
                Token::TagHandle(cow!("!e!")),
                Token::TagUri(cow!("tag:example.com,2024:")),
            ]
        );

        Ok(())
    }

    #[test]
    fn unknown_directive_with_params() -> TestResult
    {
        let tokens = scan("%RESERVED one two # comment")?;

        assert_eq!(
            tokens,
            vec![
                Token::UnknownDirective(cow!("RESERVED")),
                Token::UnknownDirectiveParam(cow!("one")),
                Token::UnknownDirectiveParam(cow!("two")),
            ]
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_versions()
    {
        assert!(scan("%YAML 1").is_err());
        assert!(scan("%YAML .2").is_err());
        assert!(scan("%YAML 1.x").is_err());
        assert!(scan("%YAML 1.2 garbage").is_err());
        assert!(scan("%").is_err());
    }
}
