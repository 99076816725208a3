/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    hints::TypeHint::*,
    lexer::error::ScanError,
    token::Token::*,
};

#[test]
fn block_sequence()
{
    tokens!("- a\n- b" =>
        LineStart(0),
        Dash,
        ScalarPart(cow!("a"), Str),
        LineStart(0),
        Dash,
        ScalarPart(cow!("b"), Str),
        StreamEnd
    );
}

#[test]
fn block_mapping()
{
    tokens!("a: 1\nb: 2" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        ScalarPart(cow!("1"), Integer),
        LineStart(0),
        ScalarPart(cow!("b"), Str),
        Colon,
        ScalarPart(cow!("2"), Integer),
        StreamEnd
    );
}

#[test]
fn nested_block()
{
    tokens!("outer:\n  inner: value" =>
        LineStart(0),
        ScalarPart(cow!("outer"), Str),
        Colon,
        LineStart(2),
        ScalarPart(cow!("inner"), Str),
        Colon,
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn explicit_key()
{
    tokens!("? key\n: value" =>
        LineStart(0),
        QuestionMark,
        ScalarPart(cow!("key"), Str),
        LineStart(0),
        Colon,
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn flow_sequence_nested()
{
    tokens!("[a, [b, c]]" =>
        LineStart(0),
        OpeningBracket,
        ScalarPart(cow!("a"), Str),
        Comma,
        OpeningBracket,
        ScalarPart(cow!("b"), Str),
        Comma,
        ScalarPart(cow!("c"), Str),
        ClosingBracket,
        ClosingBracket,
        StreamEnd
    );
}

#[test]
fn flow_mapping()
{
    tokens!("{key: value, other: 1.5}" =>
        LineStart(0),
        OpeningBrace,
        ScalarPart(cow!("key"), Str),
        Colon,
        ScalarPart(cow!("value"), Str),
        Comma,
        ScalarPart(cow!("other"), Str),
        Colon,
        ScalarPart(cow!("1.5"), Float),
        ClosingBrace,
        StreamEnd
    );
}

#[test]
fn flow_adjacent_colon_after_quote()
{
    tokens!(r#"{"a":1}"# =>
        LineStart(0),
        OpeningBrace,
        Scalar(cow!("a"), crate::token::ScalarStyle::DoubleQuote),
        Colon,
        ScalarPart(cow!("1"), Integer),
        ClosingBrace,
        StreamEnd
    );
}

#[test]
fn anchors_and_aliases()
{
    tokens!("- &x 1\n- *x" =>
        LineStart(0),
        Dash,
        Anchor(cow!("x")),
        ScalarPart(cow!("1"), Integer),
        LineStart(0),
        Dash,
        Alias(cow!("x")),
        StreamEnd
    );
}

#[test]
fn tags_on_nodes()
{
    tokens!("!!str value" =>
        LineStart(0),
        TagHandle(cow!("!!")),
        TagSuffix(cow!("str")),
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn block_scalar_in_flow_rejected()
{
    scan_error!("[|\n a\n]" => ScanError::BlockIndicatorInFlow);
}
