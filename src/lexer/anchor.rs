/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanning of anchors (&name) and aliases (*name).

use crate::{
    lexer::{
        error::{ScanError, ScanResult as Result},
        progress::Progress,
        Tokens,
    },
    token::Token,
};

/// Scans an anchor or alias from .base (which must start at
/// the '&' or '*'), enqueuing its token and returning the
/// amount of .base consumed.
///
/// See:
///     YAML 1.2: Section 6.9.2
///     yaml.org/spec/1.2/spec.html#c-ns-anchor-property
pub(in crate::lexer) fn scan_anchor<'de>(
    base: &'de str,
    stats: &mut Progress,
    tokens: &mut Tokens<'de>,
) -> Result<usize>
{
    let mut buffer = base;
    let start_stats = stats.clone();

    let alias = check!(~buffer => b'*');

    // Eat the '&' or '*'
    advance!(buffer, :stats, 1);

    let name = take_name(&mut buffer, stats);

    if name.is_empty()
    {
        return Err(ScanError::InvalidAnchorName);
    }

    let token = match alias
    {
        true => Token::Alias(cow!(name)),
        false => Token::Anchor(cow!(name)),
    };

    enqueue!(token, :start_stats => tokens);

    Ok(base.len() - buffer.len())
}

/// An anchor name runs to the next whitespace, flow
/// indicator, or value indicator
fn take_name<'de>(buffer: &mut &'de str, stats: &mut Progress) -> &'de str
{
    let base = *buffer;
    let mut len = 0;

    loop
    {
        if isWhiteSpaceZ!(~*buffer)
            || check!(~*buffer => b',' | b'[' | b']' | b'{' | b'}')
            || (check!(~*buffer => b':') && isWhiteSpaceZ!(~*buffer, 1))
        {
            break;
        }

        advance!(*buffer, :stats, @char, len);
    }

    &base[..len]
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{lexer::entry::TokenEntry, queue::Queue};

    type TestResult = anyhow::Result<()>;

    fn scan(data: &str) -> Result<Token<'_>>
    {
        let mut stats = Progress::new();
        let mut tokens: Queue<TokenEntry> = Queue::new();

        scan_anchor(data, &mut stats, &mut tokens)?;

        Ok(tokens.pop().unwrap().into_token())
    }

    #[test]
    fn anchor() -> TestResult
    {
        assert_eq!(scan("&base rest")?, Token::Anchor(cow!("base")));

        Ok(())
    }

    #[test]
    fn alias() -> TestResult
    {
        assert_eq!(scan("*base rest")?, Token::Alias(cow!("base")));

        Ok(())
    }

    #[test]
    fn name_stops_at_flow_indicator() -> TestResult
    {
        assert_eq!(scan("*base, next")?, Token::Alias(cow!("base")));
        assert_eq!(scan("&k]")?, Token::Anchor(cow!("k")));

        Ok(())
    }

    #[test]
    fn empty_name_rejected()
    {
        assert!(scan("& value").is_err());
        assert!(scan("*").is_err());
    }
}
