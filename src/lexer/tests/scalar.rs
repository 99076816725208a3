/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    hints::TypeHint::*,
    lexer::error::ScanError,
    token::{ScalarStyle, Token::*},
};

#[test]
fn plain_multiline_folds()
{
    tokens!("key: first\n  second" =>
        LineStart(0),
        ScalarPart(cow!("key"), Str),
        Colon,
        ScalarPart(cow!("first second"), Str),
        StreamEnd
    );
}

#[test]
fn single_quoted()
{
    tokens!("'a scalar'" =>
        LineStart(0),
        Scalar(cow!("a scalar"), ScalarStyle::SingleQuote),
        StreamEnd
    );
}

#[test]
fn double_quoted_with_escapes()
{
    tokens!(r#""a\tb""# =>
        LineStart(0),
        Scalar(cow!("a\tb"), ScalarStyle::DoubleQuote),
        StreamEnd
    );
}

#[test]
fn quoted_key_then_value()
{
    tokens!("'key': value" =>
        LineStart(0),
        Scalar(cow!("key"), ScalarStyle::SingleQuote),
        Colon,
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn literal_block_scalar()
{
    tokens!("a: |\n ab\n\n cd\n" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        Pipe,
        Scalar(cow!("ab\n\ncd\n"), ScalarStyle::Literal),
        StreamEnd
    );
}

#[test]
fn folded_block_scalar_with_header()
{
    tokens!(">-\n one\n two\n" =>
        LineStart(0),
        Greater,
        Dash,
        Scalar(cow!("one two"), ScalarStyle::Folded),
        StreamEnd
    );
}

#[test]
fn keep_chomping_header()
{
    tokens!("|+2\n  kept\n\n" =>
        LineStart(0),
        Pipe,
        Plus,
        BlockIndentationIndicator(2),
        Scalar(cow!("kept\n\n"), ScalarStyle::Literal),
        StreamEnd
    );
}

#[test]
fn content_after_block_scalar()
{
    tokens!("a: |\n  text\nb: 2" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        Pipe,
        Scalar(cow!("text\n"), ScalarStyle::Literal),
        LineStart(0),
        ScalarPart(cow!("b"), Str),
        Colon,
        ScalarPart(cow!("2"), Integer),
        StreamEnd
    );
}

#[test]
fn unterminated_quote_rejected()
{
    scan_error!("'never closed" => ScanError::UnterminatedScalar);
}
