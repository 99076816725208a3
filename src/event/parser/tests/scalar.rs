/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::{doc_end, doc_start, scalar, stream_end, stream_start, tagged_scalar};
use crate::{
    event::types::EventData,
    tags::{TAG_NULL, TAG_STR},
    token::ScalarStyle,
};

#[test]
fn empty_stream_is_one_null_document()
{
    events!("" =>
        stream_start(),
        doc_start(false),
        tagged_scalar("", ScalarStyle::Plain, TAG_NULL),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn bare_marker_document()
{
    events!("---" =>
        stream_start(),
        doc_start(true),
        tagged_scalar("", ScalarStyle::Plain, TAG_NULL),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn root_scalar()
{
    events!("'a root scalar'" =>
        stream_start(),
        doc_start(false),
        scalar("a root scalar", ScalarStyle::SingleQuote),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn root_plain_multiline()
{
    events!("folds\nacross lines" =>
        stream_start(),
        doc_start(false),
        scalar("folds across lines", ScalarStyle::Plain),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn literal_block_scalar_value()
{
    events!("a: |\n ab\n\n cd\n" =>
        stream_start(),
        doc_start(false),
        super::mapping_start_block(),
        scalar("a", ScalarStyle::Plain),
        scalar("ab\n\ncd\n", ScalarStyle::Literal),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn explicit_tag_overrides_default()
{
    events!("!!str 1" =>
        stream_start(),
        doc_start(false),
        tagged_scalar("1", ScalarStyle::Plain, TAG_STR),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn multiline_implicit_key_rejected()
{
    parse_error!("spread\nover: lines");
}

#[test]
fn double_quoted_escapes_resolve()
{
    events!("\"a\\x41\"" =>
        stream_start(),
        doc_start(false),
        scalar("aA", ScalarStyle::DoubleQuote),
        doc_end(false),
        stream_end()
    );
}
