/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the various macros used by
//! lib/lexer.

/// Rebinds .buffer's binding .amount bytes, a @line break
/// or a @char codepoint forward, optionally taking a .var
/// to add the byte amount to.
///
/// Can also be used to update lexer .stats
///
/// Care must be taken to ensure that @line is only used
/// when you are sure that a YAML line break starts the
/// given .buffer, as @line _will not advance_ the buffer at
/// all if it is not a line break
///
/// Variants
///     /1 .buffer, .amount
///     /2 .buffer, .amount, .var
///     /3 .buffer, :.stats, .amount
///     /4 .buffer, :.stats, @line
///     /5 .buffer, :.stats, @char
///     /6 .buffer, @line
macro_rules! advance {
    ($buffer:expr, $( :$stats:expr, )? $amount:expr $(, $var:ident )? ) => {
        let (_, rest) = $buffer.split_at($amount);
        $( $stats.update($amount, 0, $amount); )?

        $( advance!(@update $var, $amount); )?

        $buffer = rest
    };
    ($buffer:expr, $( :$stats:expr, )? @line $(, $var:ident )? ) => {
        let amount = advance!(@amount $buffer);
        let (_, rest) = $buffer.split_at(amount);
        $( $stats.update(amount, 1, 0); )?

        $buffer = rest;

        $( advance!(@update $var, amount) )?
    };
    ($buffer:expr, $( :$stats:expr, )? @char $(, $var:ident )? ) => {
        let amount = match widthOf!(~$buffer)
        {
            0 => 1,
            w => w,
        };
        let (_, rest) = $buffer.split_at(amount);
        $( $stats.update(amount, 0, 1); )?

        $buffer = rest;

        $( advance!(@update $var, amount) )?
    };

    (@amount $buffer:expr) => {
        match $buffer.as_bytes()
        {
            [b'\r', b'\n', ..]
            | [b'\xC2', b'\x85', ..] => 2,
            [b'\xE2', b'\x80', b'\xA8', ..]
            | [b'\xE2', b'\x80', b'\xA9', ..] => 3,
            [b'\r', ..] | [b'\n', ..] => 1,
            _ => 0,
        }
    };

    (@update $( $var:ident, $amount:expr)? ) => {
          $({ $var += $amount } )?
    };
}

/// New cow pointer from the given expr
macro_rules! cow {
    ($from:expr) => {
        std::borrow::Cow::from($from)
    };
}

/// Check the .buffer (@ .offset) matches the given
/// .pattern, optionally returning an .error.
///
/// Note that the error path is special cased to return an
/// UnexpectedEOF if it encounters an empty slice, although
/// this can be overridden by expressly including an empty
/// pattern ([]) in your .pattern
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer => .pattern := /2 .buffer, 0 => .pattern
///     /2 .buffer, .offset => .pattern
///     /3 .buffer => .pattern, else .error
///             := /4 .buffer, 0 => .pattern else .error
///     /4 .buffer, .offset => .pattern, else .error
macro_rules! check {
    (~ $buffer:expr $(, $offset:expr )? => $( $match:tt )|+ $(, else $error:expr)? ) => {
        check!(@priv $buffer.as_bytes() $(, $offset )? => $( $match )|+ $(, else $error)?)
    };

    ($buffer:expr $(, $offset:expr )? => $( $match:tt )|+ $(, else $error:expr)? ) => {
        check!(@priv $buffer $(, $offset )? => $( $match )|+ $(, else $error)?)
    };

    /* Private variants */
    (@priv $buffer:expr, $offset:expr => $( $match:tt )|+) => {
        match $buffer.get($offset..) {
            Some(buffer) => check!(@priv buffer => $( $match )|+),
            None => check!(@eofck $( $match )|+ ),
        }
    };
    (@priv $buffer:expr => $( $match:tt )|+) => {
        match $buffer {
            $( check!(@ptn $match) )|+ => true,
            _ => false
        }
    };
    (@priv $buffer:expr, $offset:expr => $( $match:tt )|+, else $error:expr) => {
        match $buffer.get($offset..) {
            Some(buffer) => check!(@priv buffer => $( $match )|+, else $error),
            None if check!(@eofck $( $match )|+ ) => Ok(()),
            _ => Err($crate::lexer::error::ScanError::UnexpectedEOF),
        }
    };
    (@priv $buffer:expr => $( $match:tt )|+, else $error:expr) => {
        match $buffer {
            $( check!(@ptn $match) )|+ => Ok(()),
            [] => Err($crate::lexer::error::ScanError::UnexpectedEOF),
            _ => Err($error),
        }
    };

    // Note we use macro path rules to first try matching the given
    // token as a literal, e.g a b'_', then try it as a pattern
    (@ptn $byte:literal) => {
        [$byte, ..]
    };
    (@ptn $match:pat) => {
        $match
    };

    // When indexing to an out of bounds .offset, we mostly want
    // to return false, however if the caller is checking for an
    // out of bounds (e.g a [] pattern) we must special case this
    // and return true
    (@eofck $( $match:tt )|+) => {{
        #[allow(unused_mut)]
        let mut checking_eof = false;
        $( check!(@eofck &mut checking_eof, $match); )+

        checking_eof
    }};
    // _If and only if_ there is an empty slice pattern, set
    // checking_eof to true as the caller wants to positively
    // check for EOF
    (@eofck $is_checking:expr, []) => {
        *$is_checking = true
    };
    (@eofck $is_checking:expr, $_:literal) => {
    };
    (@eofck $is_checking:expr, $_:pat) => {
    };
}

/// Pushes a token into the token queue, recording the
/// position it was scanned at
///
/// Variants
///     /1 .token, :.stats => .tokens
macro_rules! enqueue {
    ($token:expr, :$stats:expr => $tokens:expr) => {
        $tokens.push(crate::lexer::entry::TokenEntry::new(
            $token,
            $stats.read,
            $stats.lines,
            $stats.column,
        ))
    };
}

/// Check if the byte (@ .offset) is a line break
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! isBreak {
    (~ $buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        isBreak!($buffer.as_bytes() $(, $offset )? $(, else $error)?)
    };
    ($buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        check!($buffer $(, $offset)? =>
            b'\r'                                   /* CR   #xD     */
            | b'\n'                                 /* LF   #xA     */
            | [b'\xC2', b'\x85', ..]                /* NEL  #x85    */
            | [b'\xE2', b'\x80', b'\xA8', ..]       /* LS   #x2028  */
            | [b'\xE2', b'\x80', b'\xA9', ..]       /* PS   #x2029  */
            $(, else $error)?
        )
    };
}

/// Check if the byte (@ .offset) is a line break or if the
/// buffer is empty
macro_rules! isBreakZ {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isBreakZ!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBreak!($buffer $(, $offset)? ) || check!($buffer $(, $offset)? => [])
    };
}

/// Check if the byte (@ .offset) is a space or tab
macro_rules! isBlank {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? => b' ' | b'\t')
    };
}

/// Check if the byte (@ .offset) is a space, tab or line
/// break
macro_rules! isWhiteSpace {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isWhiteSpace!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer $(, $offset)?) || isBreak!($buffer $(, $offset)?)
    };
}

/// Check if the byte (@ .offset) is a space, tab, line
/// break or if .buffer is empty
macro_rules! isWhiteSpaceZ {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isWhiteSpaceZ!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer $(, $offset)?)
            || isBreak!($buffer $(, $offset)?)
            || check!($buffer $(, $offset)? => [])
    };
}

/// Check if a YAML document indicator ('---', '...') exists
/// at the head of .buffer. You must provide the current
/// .column (or .stats object)
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer, .column
///     /2 .buffer, :.stats
macro_rules! isDocumentIndicator {
    (~ $buffer:expr, :$stats:expr) => {
        isDocumentIndicator!($buffer.as_bytes(), $stats.column)
    };
    ($buffer:expr, :$stats:expr) => {
        isDocumentIndicator!($buffer, $stats.column)
    };
    (~ $buffer:expr, $column:expr) => {
        isDocumentIndicator!($buffer.as_bytes(), $column)
    };
    ($buffer:expr, $column:expr) => {
        $column == 0
            && check!($buffer => [b'-', b'-', b'-', ..] | [b'.', b'.', b'.', ..])
            && isWhiteSpaceZ!($buffer, 3)
    };
}

/// Checks if byte (@ .offset) in .buffer is hexadecimal
macro_rules! isHex {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isHex!($buffer.as_bytes() $(, $offset)? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? =>
                [b'0'..=b'9', ..] | [b'A'..=b'F', ..] | [b'a'..=b'f', ..]
            )
    };
}

/// Returns the length of the unicode character (@ .offset)
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! widthOf {
    (~ $buffer:expr $(, $offset:expr )?) => {
        widthOf!($buffer.as_bytes() $(, $offset)?)
    };
    ($buffer:expr $(, $offset:expr )?) => {
        widthOf!(@priv $buffer $(, $offset)? )
    };
    (@priv $buffer:expr) => {
        widthOf!(@priv $buffer, 0)
    };
    (@priv $buffer:expr, $offset:expr) => {
        match $buffer.get($offset) {
            Some(c) if c & 0x80 == 0x00 => 1,
            Some(c) if c & 0xE0 == 0xC0 => 2,
            Some(c) if c & 0xF0 == 0xE0 => 3,
            Some(c) if c & 0xF8 == 0xF0 => 4,
            _ => 0,
        }
    };
}

#[cfg(test)]
mod tests
{
    #![allow(non_snake_case)]

    #[test]
    fn lexer_macro_isBreak()
    {
        for brk in &BREAK_CHARS
        {
            let mut c = [0; 4];
            let b = brk.encode_utf8(&mut c);

            assert!(isBreak!(~b));
        }

        assert!(!isBreak!(~"x"));
    }

    #[test]
    fn lexer_macro_isBlank_offset()
    {
        let b = "ab \t";

        assert!(!isBlank!(~b, 1));
        assert!(isBlank!(~b, 2));
        assert!(isBlank!(~b, 3));
    }

    #[test]
    fn lexer_macro_isWhiteSpaceZ_eof()
    {
        let empty = "";

        assert!(isWhiteSpaceZ!(~empty));
        assert!(isWhiteSpaceZ!(~"a", 5));
    }

    #[test]
    fn lexer_macro_advance_line()
    {
        let mut stats = crate::lexer::progress::Progress::new();
        let mut buffer = "\r\nnext";

        advance!(buffer, :stats, @line);

        assert_eq!(buffer, "next");
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.column, 0);
    }

    #[test]
    fn lexer_macro_advance_char()
    {
        let mut stats = crate::lexer::progress::Progress::new();
        let mut buffer = "üx";

        advance!(buffer, :stats, @char);

        assert_eq!(buffer, "x");
        assert_eq!(stats.read, 2);
        assert_eq!(stats.column, 1);
    }

    const BREAK_CHARS: [char; 5] = ['\r', '\n', '\u{0085}', '\u{2028}', '\u{2029}'];
}
