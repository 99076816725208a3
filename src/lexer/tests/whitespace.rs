/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    hints::TypeHint::*,
    lexer::{
        error::ScanError,
        flag::O_COMMENTS,
        tests::ScanIter,
    },
    token::Token::{self, *},
};

#[test]
fn comments_are_chomped_by_default()
{
    tokens!("# leading\nkey: value # trailing" =>
        LineStart(0),
        ScalarPart(cow!("key"), Str),
        Colon,
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn comments_surface_when_asked()
{
    let iter = ScanIter::with_opts("# note\nkey: value", O_COMMENTS);
    let tokens: Vec<Token> = iter.collect::<Result<_, _>>().unwrap();

    assert!(tokens.contains(&Comment(cow!(" note"))));
}

#[test]
fn blank_lines_do_not_stack_line_starts()
{
    tokens!("a: 1\n\n\nb: 2" =>
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
fn indentation_is_counted_per_line()
{
    tokens!("a:\n    deep: 1" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        LineStart(4),
        ScalarPart(cow!("deep"), Str),
        Colon,
        ScalarPart(cow!("1"), Integer),
        StreamEnd
    );
}

#[test]
fn tab_indentation_rejected()
{
    scan_error!("a:\n\tb: 1" => ScanError::TabIndentation);
}

#[test]
fn tab_separation_allowed()
{
    tokens!("a:\tvalue" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        ScalarPart(cow!("value"), Str),
        StreamEnd
    );
}

#[test]
fn tab_on_blank_line_allowed()
{
    tokens!("a: 1\n\t\nb: 2" =>
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
fn crlf_and_cr_are_single_breaks()
{
    tokens!("a: 1\r\nb: 2\rc: 3" =>
        LineStart(0),
        ScalarPart(cow!("a"), Str),
        Colon,
        ScalarPart(cow!("1"), Integer),
        LineStart(0),
        ScalarPart(cow!("b"), Str),
        Colon,
        ScalarPart(cow!("2"), Integer),
        LineStart(0),
        ScalarPart(cow!("c"), Str),
        Colon,
        ScalarPart(cow!("3"), Integer),
        StreamEnd
    );
}
