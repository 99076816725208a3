/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scalar analysis and rendering.
//!
//! The style carried on an incoming event is honored when
//! the content and surrounding context allow it; otherwise
//! the scalar falls back to double quotes, which can
//! represent anything.
//!
//! Plain output is the most constrained: the content must
//! survive a round trip through a core schema resolver
//! unchanged, so anything whose lexical form means
//! something (a number, a boolean, null) may only be
//! emitted plain when its tag agrees with that meaning.

use std::io::Write;

use crate::{
    hints::{guess_type, TypeHint},
    presenter::error::EmitResult,
    tags::{TagId, TAG_BOOL, TAG_FLOAT, TAG_INT, TAG_NULL, TAG_QUESTION},
    token::ScalarStyle,
};

/// The rendition chosen for a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OutStyle
{
    Plain,
    Single,
    Double,
    Literal,
    Folded,
}

/// Pick the output style for a scalar, preferring the
/// .requested style where the content and context permit
pub(super) fn choose_style(
    data: &str,
    requested: ScalarStyle,
    tag: TagId,
    json: bool,
    in_flow: bool,
    is_key: bool,
) -> OutStyle
{
    if json
    {
        return OutStyle::Double;
    }

    // Block scalars cannot serve as implicit keys, nor
    // appear inside flow context
    let block_styles_ok = !in_flow && !is_key;

    match requested
    {
        ScalarStyle::Literal if block_styles_ok && literal_safe(data) => OutStyle::Literal,
        ScalarStyle::Folded if block_styles_ok && folded_safe(data) => OutStyle::Folded,
        ScalarStyle::Folded if block_styles_ok && literal_safe(data) => OutStyle::Literal,
        ScalarStyle::SingleQuote if single_safe(data) => OutStyle::Single,
        ScalarStyle::Plain | ScalarStyle::Any if plain_safe(data, tag, in_flow) =>
        {
            OutStyle::Plain
        },
        _ => OutStyle::Double,
    }
}

/// May .data be written without any quoting and still read
/// back as the same string with the same meaning?
fn plain_safe(data: &str, tag: TagId, in_flow: bool) -> bool
{
    if data.is_empty()
    {
        return false;
    }

    let bytes = data.as_bytes();

    // Surrounding whitespace would be folded away
    if data.starts_with(' ') || data.ends_with(' ')
    {
        return false;
    }

    // Multi line plain scalars do not survive a round trip
    // with their breaks intact
    if data.contains(|c: char| c == '\n' || c == '\r' || c == '\t' || c.is_control())
    {
        return false;
    }

    // Leading characters the grammar reserves
    match bytes[0]
    {
        b',' | b'[' | b']' | b'{' | b'}' | b'#' | b'&' | b'*' | b'!' | b'|' | b'>' | b'\''
        | b'"' | b'%' | b'@' | b'`' => return false,
        b'-' | b'?' | b':' if bytes.len() == 1 || bytes[1] == b' ' => return false,
        _ =>
        {},
    }

    // Sequences that terminate or confuse a plain scalar
    if data.contains(": ") || data.ends_with(':') || data.contains(" #")
    {
        return false;
    }

    if data.starts_with("---") || data.starts_with("...")
    {
        return false;
    }

    if in_flow && data.contains(|c| matches!(c, ',' | '[' | ']' | '{' | '}'))
    {
        return false;
    }

    // A lexical form the core schema would interpret may
    // only stay plain when the tag agrees with the
    // interpretation
    let hint = guess_type(data);

    match hint
    {
        TypeHint::Integer => matches!(tag, TAG_QUESTION | TAG_INT),
        TypeHint::Float | TypeHint::FloatInf | TypeHint::FloatNaN =>
        {
            matches!(tag, TAG_QUESTION | TAG_FLOAT)
        },
        TypeHint::BoolTrue | TypeHint::BoolFalse => matches!(tag, TAG_QUESTION | TAG_BOOL),
        TypeHint::Null => matches!(tag, TAG_QUESTION | TAG_NULL),
        TypeHint::Str | TypeHint::Unknown => true,
    }
}

/// Single quotes cannot express breaks or controls, and
/// surrounding whitespace would fold away
fn single_safe(data: &str) -> bool
{
    !(data.starts_with(' ')
        || data.ends_with(' ')
        || data.contains(|c: char| c == '\n' || c == '\r' || c.is_control()))
}

/// A literal block scalar reproduces anything line
/// oriented, provided no line carries trailing blanks (the
/// output must never end a line in whitespace)
fn literal_safe(data: &str) -> bool
{
    !data.is_empty()
        && !data.contains('\r')
        && !data.contains(|c: char| c.is_control() && c != '\n')
        && data.split('\n').all(|line| !line.ends_with(' ') && !line.ends_with('\t'))
}

/// Folding additionally demands that no content line leads
/// with whitespace, which would change the fold on reread
fn folded_safe(data: &str) -> bool
{
    literal_safe(data)
        && body_of(data)
            .0
            .split('\n')
            .all(|line| !line.starts_with(' ') && !line.starts_with('\t'))
}

/// Split .data into its body and the count of trailing
/// newlines
fn body_of(data: &str) -> (&str, usize)
{
    let body = data.trim_end_matches('\n');
    let trailing = data.len() - body.len();

    (body, trailing)
}

pub(super) fn write_plain<W>(sink: &mut W, data: &str) -> EmitResult<usize>
where
    W: Write,
{
    sink.write_all(data.as_bytes())?;

    Ok(data.chars().count())
}

pub(super) fn write_single<W>(sink: &mut W, data: &str) -> EmitResult<usize>
where
    W: Write,
{
    sink.write_all(b"'")?;

    let mut written = 2 + data.chars().count();
    let mut first = true;

    for piece in data.split('\'')
    {
        // Each interior quote is written doubled
        if !first
        {
            sink.write_all(b"''")?;
            written += 1;
        }
        first = false;

        sink.write_all(piece.as_bytes())?;
    }

    sink.write_all(b"'")?;

    Ok(written)
}

/// Write .data double quoted, escaping as needed and
/// wrapping at spaces once a line exceeds .max_width.
/// Wrapped continuations fold back to the single space they
/// replace.
pub(super) fn write_double<W>(
    sink: &mut W,
    data: &str,
    start_column: usize,
    max_width: usize,
    indent: usize,
    allow_wrap: bool,
) -> EmitResult<usize>
where
    W: Write,
{
    sink.write_all(b"\"")?;

    let mut column = start_column + 1;
    let mut chars = data.chars().peekable();

    while let Some(c) = chars.next()
    {
        let wrappable = allow_wrap
            && c == ' '
            && column >= max_width
            && chars.peek().map_or(false, |&next| next != ' ');

        if wrappable
        {
            // The break replaces this space; reading folds
            // it back
            sink.write_all(b"\n")?;

            for _ in 0..indent
            {
                sink.write_all(b" ")?;
            }

            column = indent;
            continue;
        }

        column += write_escaped(sink, c)?;
    }

    sink.write_all(b"\"")?;

    Ok(column + 1)
}

fn write_escaped<W>(sink: &mut W, c: char) -> EmitResult<usize>
where
    W: Write,
{
    let simple = match c
    {
        '\\' => Some("\\\\"),
        '"' => Some("\\\""),
        '\0' => Some("\\0"),
        '\x07' => Some("\\a"),
        '\x08' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\x0B' => Some("\\v"),
        '\x0C' => Some("\\f"),
        '\r' => Some("\\r"),
        '\x1B' => Some("\\e"),
        '\u{85}' => Some("\\N"),
        '\u{A0}' => Some("\\_"),
        '\u{2028}' => Some("\\L"),
        '\u{2029}' => Some("\\P"),
        _ => None,
    };

    if let Some(escape) = simple
    {
        sink.write_all(escape.as_bytes())?;

        return Ok(escape.len());
    }

    if c.is_control()
    {
        let code = c as u32;
        let escape = match code
        {
            _ if code <= 0xFF => format!("\\x{:02X}", code),
            _ if code <= 0xFFFF => format!("\\u{:04X}", code),
            _ => format!("\\U{:08X}", code),
        };

        sink.write_all(escape.as_bytes())?;

        return Ok(escape.len());
    }

    let mut buffer = [0u8; 4];
    sink.write_all(c.encode_utf8(&mut buffer).as_bytes())?;

    Ok(1)
}

/// Write .data as a literal block scalar: a '|' header
/// (with chomping and, where the first line leads with a
/// blank, an indentation indicator), then the content lines
/// at .indent. The indicator is relative to the header's
/// line, which sits one .step above the content.
pub(super) fn write_literal<W>(
    sink: &mut W,
    data: &str,
    indent: usize,
    step: usize,
) -> EmitResult<()>
where
    W: Write,
{
    let (body, trailing) = body_of(data);

    sink.write_all(b"|")?;

    // A first line leading with whitespace would throw off
    // indentation detection on reread
    if body.starts_with(' ') || body.starts_with('\t')
    {
        write!(sink, "{}", step.max(1).min(9))?;
    }

    match trailing
    {
        0 => sink.write_all(b"-")?,
        1 =>
        {},
        _ => sink.write_all(b"+")?,
    }

    sink.write_all(b"\n")?;

    for line in body.split('\n')
    {
        if !line.is_empty()
        {
            for _ in 0..indent
            {
                sink.write_all(b" ")?;
            }
            sink.write_all(line.as_bytes())?;
        }

        sink.write_all(b"\n")?;
    }

    // Everything past the first trailing break is blank
    // lines the keep indicator preserves
    for _ in 1..trailing
    {
        sink.write_all(b"\n")?;
    }

    Ok(())
}

/// Write .data as a folded block scalar. Every content
/// break becomes a blank output line, which folds back to
/// the break it stands for.
pub(super) fn write_folded<W>(sink: &mut W, data: &str, indent: usize) -> EmitResult<()>
where
    W: Write,
{
    let (body, trailing) = body_of(data);

    sink.write_all(b">")?;

    match trailing
    {
        0 => sink.write_all(b"-")?,
        1 =>
        {},
        _ => sink.write_all(b"+")?,
    }

    sink.write_all(b"\n")?;

    for (nth, line) in body.split('\n').enumerate()
    {
        if nth != 0
        {
            sink.write_all(b"\n")?;
        }

        if !line.is_empty()
        {
            for _ in 0..indent
            {
                sink.write_all(b" ")?;
            }
            sink.write_all(line.as_bytes())?;
        }

        sink.write_all(b"\n")?;
    }

    for _ in 1..trailing
    {
        sink.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tags::{TAG_EXCLAMATION, TAG_STR};

    #[test]
    fn interpretable_content_quotes_unless_tag_agrees()
    {
        assert!(plain_safe("12", TAG_QUESTION, false));
        assert!(plain_safe("12", TAG_INT, false));
        assert!(!plain_safe("12", TAG_STR, false));
        assert!(!plain_safe("true", TAG_EXCLAMATION, false));
        assert!(plain_safe("words", TAG_EXCLAMATION, false));
    }

    #[test]
    fn plain_rejects_structural_content()
    {
        for content in &["a: b", "a #b", "- a", "[x", "x,y\u{7f}", " pad", "pad ", "a\nb", "---"]
        {
            assert!(
                !plain_safe(content, TAG_QUESTION, true),
                "content: {:?}",
                content
            );
        }
    }

    #[test]
    fn style_fallbacks()
    {
        use crate::token::ScalarStyle;

        // A literal style key falls back to quotes
        assert_eq!(
            choose_style("x\ny", ScalarStyle::Literal, TAG_QUESTION, false, false, true),
            OutStyle::Double
        );
        // Literal in flow falls back
        assert_eq!(
            choose_style("x\ny", ScalarStyle::Literal, TAG_QUESTION, false, true, false),
            OutStyle::Double
        );
        // JSON forces double quotes
        assert_eq!(
            choose_style("plain", ScalarStyle::Plain, TAG_QUESTION, true, false, false),
            OutStyle::Double
        );
        // Otherwise the requested style sticks
        assert_eq!(
            choose_style("x\ny\n", ScalarStyle::Literal, TAG_QUESTION, false, false, false),
            OutStyle::Literal
        );
    }

    #[test]
    fn literal_rendering()
    {
        let mut out = Vec::new();
        write_literal(&mut out, "ab\n\ncd\n", 2, 2).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "|\n  ab\n\n  cd\n");
    }

    #[test]
    fn literal_chomping_indicators()
    {
        let mut strip = Vec::new();
        write_literal(&mut strip, "ab", 2, 2).unwrap();
        assert_eq!(String::from_utf8(strip).unwrap(), "|-\n  ab\n");

        let mut keep = Vec::new();
        write_literal(&mut keep, "ab\n\n", 2, 2).unwrap();
        assert_eq!(String::from_utf8(keep).unwrap(), "|+\n  ab\n\n");
    }

    #[test]
    fn folded_rendering()
    {
        let mut out = Vec::new();
        write_folded(&mut out, "one two\nthree\n", 2).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), ">\n  one two\n\n  three\n");
    }

    #[test]
    fn double_quoting_escapes()
    {
        let mut out = Vec::new();
        write_double(&mut out, "a\tb\nc\"", 0, 80, 0, true).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), r#""a\tb\nc\"""#);
    }

    #[test]
    fn double_quoting_wraps_at_spaces()
    {
        let mut out = Vec::new();
        write_double(&mut out, "aaaa bbbb cccc", 0, 6, 2, true).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\"aaaa bbbb\n  cccc\"");
    }
}
