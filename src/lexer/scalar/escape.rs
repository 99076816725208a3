/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Escape decoding shared by the double quoted scalar and
//! tag scanners.

use crate::lexer::error::{ScanError, ScanResult as Result};

/// Decode a YAML escape sequence as defined in [Section
/// 5.7][Link]. YAML defines 18 'special' escapes, and 3
/// methods of encoding 8, 16 and 32 bit unicode points.
///
/// Writes the unescaped character to .scratch, returning
/// the length of .base consumed, or an error if the escape
/// sequence is invalid. .base->0 must be a backslash (\\),
/// as this is the only valid start of an escape sequence.
///
/// [Link]: https://yaml.org/spec/1.2/spec.html#c-escape
pub(in crate::lexer) fn flow_unescape(base: &str, scratch: &mut Vec<u8>) -> Result<usize>
{
    let mut buffer = base;
    let mut escape_len: Option<u8> = None;

    // Not an escape sequence, early exit
    if !check!(~buffer => b'\\')
    {
        return Ok(0);
    }

    advance!(buffer, 1);

    // See 5.7: Escaped Characters
    // yaml.org/spec/1.2/spec.html#id2776092
    match buffer.as_bytes()
    {
        [b'0', ..] => scratch.push(b'\0'),
        [b'a', ..] => scratch.push(b'\x07'),
        [b'b', ..] => scratch.push(b'\x08'),
        [b't', ..] | [b'\t', ..] => scratch.push(b'\x09'),
        [b'n', ..] => scratch.push(b'\x0A'),
        [b'v', ..] => scratch.push(b'\x0B'),
        [b'f', ..] => scratch.push(b'\x0C'),
        [b'r', ..] => scratch.push(b'\x0D'),
        [b'e', ..] => scratch.push(b'\x1B'),
        [b' ', ..] => scratch.push(b'\x20'),
        [b'"', ..] => scratch.push(b'"'),
        [b'/', ..] => scratch.push(b'/'),
        [b'\\', ..] => scratch.push(b'\\'),
        [b'N', ..] => scratch.extend_from_slice(&NEL),
        [b'_', ..] => scratch.extend_from_slice(&NBS),
        [b'L', ..] => scratch.extend_from_slice(&LS),
        [b'P', ..] => scratch.extend_from_slice(&PS),
        [b'x', ..] => escape_len = Some(2),
        [b'u', ..] => escape_len = Some(4),
        [b'U', ..] => escape_len = Some(8),
        [] => return Err(ScanError::UnexpectedEOF),
        _ => return Err(ScanError::UnknownEscape),
    }
    advance!(buffer, 1);

    if let Some(sequence) = escape_len
    {
        let amt = write_unicode_point(buffer, scratch, sequence)?;
        advance!(buffer, amt);
    }

    Ok(base.len() - buffer.len())
}

/// Decode a percent encoded UTF8 octet sequence as defined
/// in [Section 5.6][Link], writing the bytes to .scratch,
/// returning the length of .base consumed.
///
/// [Link]: https://yaml.org/spec/1.2/spec.html#ns-uri-char
pub(in crate::lexer) fn tag_uri_unescape(base: &str, scratch: &mut Vec<u8>) -> Result<usize>
{
    let mut buffer = base;
    let mut codepoint_len: i8 = 0;

    while {
        if buffer.len() < 3
        {
            return Err(ScanError::UnexpectedEOF);
        }

        if !(check!(~buffer => b'%') && isHex!(~buffer, 1) && isHex!(~buffer, 2))
        {
            return Err(ScanError::UnknownEscape);
        }

        // Safety: we just checked that there are at least
        // three bytes in the buffer
        let octet: u8 = (as_hex(buffer.as_bytes()[1]) << 4) + as_hex(buffer.as_bytes()[2]);

        match codepoint_len
        {
            // First time through, determine how many octets this codepoint has
            0 =>
            {
                codepoint_len = match octet
                {
                    o if (o & 0x80) == 0x00 => 1,
                    o if (o & 0xE0) == 0xC0 => 2,
                    o if (o & 0xF0) == 0xE0 => 3,
                    o if (o & 0xF8) == 0xF0 => 4,
                    _ => return Err(ScanError::UnknownEscape),
                }
            },
            // Else ensure that the trailing octet is valid
            _ =>
            {
                if (octet & 0xC0) != 0x80
                {
                    return Err(ScanError::UnknownEscape);
                }
            },
        }

        scratch.push(octet);
        codepoint_len -= 1;
        advance!(buffer, 3);

        codepoint_len > 0
    }
    {}

    Ok(base.len() - buffer.len())
}

/// Decode .codepoint_len hex digits into a UTF8 sequence
/// appended to .scratch
fn write_unicode_point(base: &str, scratch: &mut Vec<u8>, codepoint_len: u8) -> Result<usize>
{
    let mut buffer = base;
    let mut i = 0;
    let mut value: u32 = 0;

    if codepoint_len < 1
    {
        return Ok(0);
    }

    while i < codepoint_len
    {
        match buffer.as_bytes().first()
        {
            None => return Err(ScanError::UnexpectedEOF),
            Some(c) if !c.is_ascii_hexdigit() => return Err(ScanError::UnknownEscape),

            Some(b) => value = (value << 4) + as_hex(*b) as u32,
        }
        advance!(buffer, 1, i);
    }

    // Bit shift the value into the correct byte
    // configuration for UTF8
    match value
    {
        // v <= 127 (ASCII)
        v if v <= 0x7F => scratch.push(v as u8),
        // v <= 2047
        v if v <= 0x7FF =>
        {
            scratch.extend_from_slice(&[0xC0 | (v >> 6) as u8, 0x80 | (v & 0x3F) as u8])
        },
        // v <= 65535
        v if v <= 0xFFFF => scratch.extend_from_slice(&[
            0xE0 | (v >> 12) as u8,
            0x80 | ((v >> 6) & 0x3F) as u8,
            0x80 | (v & 0x3F) as u8,
        ]),
        // Otherwise it must be a full 4 byte code point
        v => scratch.extend_from_slice(&[
            0xF0 | (v >> 18) as u8,
            0x80 | ((v >> 12) & 0x3F) as u8,
            0x80 | ((v >> 6) & 0x3F) as u8,
            0x80 | (v & 0x3F) as u8,
        ]),
    }

    Ok(codepoint_len as usize)
}

#[allow(clippy::manual_range_contains)]
#[inline]
fn as_hex(b: u8) -> u8
{
    if b >= b'A' && b <= b'F'
    {
        b - b'A' + 10
    }
    else if b >= b'a' && b <= b'f'
    {
        b - b'a' + 10
    }
    else
    {
        b - b'0'
    }
}

/// <Next Line> (U+0085)
const NEL: [u8; 2] = [b'\xC2', b'\x85'];
/// <No-Break Space> (U+00A0)
const NBS: [u8; 2] = [b'\xC2', b'\xA0'];
/// <Line Separator> (U+2028)
const LS: [u8; 3] = [b'\xE2', b'\x80', b'\xA8'];
/// <Paragraph Separator> (U+2029)
const PS: [u8; 3] = [b'\xE2', b'\x80', b'\xA9'];

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    #[test]
    fn special_escapes() -> TestResult
    {
        let data = [
            (r#"\0"#, &[b'\0'][..]),
            (r#"\a"#, &[0x07]),
            (r#"\t"#, &[0x09]),
            (r#"\n"#, &[0x0A]),
            (r#"\e"#, &[0x1B]),
            (r#"\ "#, &[0x20]),
            (r#"\""#, &[b'"']),
            (r#"\\"#, &[b'\\']),
            (r#"\N"#, &NEL[..]),
            (r#"\_"#, &NBS[..]),
            (r#"\L"#, &LS[..]),
            (r#"\P"#, &PS[..]),
        ];

        for (input, expected) in &data
        {
            let mut scratch = Vec::new();
            let amt = flow_unescape(input, &mut scratch)?;

            assert_eq!(amt, 2, "input: {:?}", input);
            assert_eq!(&scratch[..], *expected, "input: {:?}", input);
        }

        Ok(())
    }

    #[test]
    fn unicode_escapes() -> TestResult
    {
        let data = [
            (r#"\x41"#, "A"),
            (r#"\u00FC"#, "ü"),
            (r#"\u2028"#, "\u{2028}"),
            (r#"\U0001F603"#, "\u{1F603}"),
        ];

        for (input, expected) in &data
        {
            let mut scratch = Vec::new();
            let amt = flow_unescape(input, &mut scratch)?;

            assert_eq!(amt, input.len(), "input: {:?}", input);
            assert_eq!(&scratch[..], expected.as_bytes(), "input: {:?}", input);
        }

        Ok(())
    }

    #[test]
    fn rejects_truncated_and_unknown()
    {
        for input in &[r#"\"#, r#"\x4"#, r#"\q"#, r#"\x4z"#]
        {
            let mut scratch = Vec::new();

            assert!(flow_unescape(input, &mut scratch).is_err(), "input: {:?}", input);
        }
    }

    #[test]
    fn percent_escapes() -> TestResult
    {
        let mut scratch = Vec::new();

        // 'ü' percent encoded
        let amt = tag_uri_unescape("%C3%BC", &mut scratch)?;

        assert_eq!(amt, 6);
        assert_eq!(&scratch[..], "ü".as_bytes());

        Ok(())
    }

    #[test]
    fn percent_escape_rejects_bad_continuation()
    {
        let mut scratch = Vec::new();

        assert!(tag_uri_unescape("%C3%41", &mut scratch).is_err());
    }
}
