/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::{
    doc_end, doc_start, mapping_start_block, mapping_start_flow, scalar, sequence_start_block,
    sequence_start_flow, stream_end, stream_start,
};
use crate::{
    event::types::EventData,
    token::ScalarStyle::Plain,
};

#[test]
fn block_sequence()
{
    events!("- a\n- b" =>
        stream_start(),
        doc_start(false),
        sequence_start_block(),
        scalar("a", Plain),
        scalar("b", Plain),
        EventData::SequenceEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn block_mapping()
{
    events!("a: 1\nb: 2" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("a", Plain),
        scalar("1", Plain),
        scalar("b", Plain),
        scalar("2", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn nested_block_mapping()
{
    events!("outer:\n  inner: value\n  other: x" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("outer", Plain),
        mapping_start_block(),
        scalar("inner", Plain),
        scalar("value", Plain),
        scalar("other", Plain),
        scalar("x", Plain),
        EventData::MappingEnd,
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn sequence_flush_with_parent_key()
{
    events!("key:\n- a\n- b\nother: x" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("key", Plain),
        sequence_start_block(),
        scalar("a", Plain),
        scalar("b", Plain),
        EventData::SequenceEnd,
        scalar("other", Plain),
        scalar("x", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn sequence_of_mappings()
{
    events!("- a: 1\n  b: 2\n- c: 3" =>
        stream_start(),
        doc_start(false),
        sequence_start_block(),
        mapping_start_block(),
        scalar("a", Plain),
        scalar("1", Plain),
        scalar("b", Plain),
        scalar("2", Plain),
        EventData::MappingEnd,
        mapping_start_block(),
        scalar("c", Plain),
        scalar("3", Plain),
        EventData::MappingEnd,
        EventData::SequenceEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn empty_sequence_entries()
{
    events!("- \n- a" =>
        stream_start(),
        doc_start(false),
        sequence_start_block(),
        scalar("", Plain),
        scalar("a", Plain),
        EventData::SequenceEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn missing_value_is_empty_scalar()
{
    events!("a:\nb: 1" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("a", Plain),
        scalar("", Plain),
        scalar("b", Plain),
        scalar("1", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn explicit_key_and_value()
{
    events!("? key\n: value" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("key", Plain),
        scalar("value", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn flow_sequence_nested()
{
    events!("[a, [b, c]]" =>
        stream_start(),
        doc_start(false),
        sequence_start_flow(),
        scalar("a", Plain),
        sequence_start_flow(),
        scalar("b", Plain),
        scalar("c", Plain),
        EventData::SequenceEnd,
        EventData::SequenceEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn flow_mapping()
{
    events!("{a: 1, b: 2}" =>
        stream_start(),
        doc_start(false),
        mapping_start_flow(),
        scalar("a", Plain),
        scalar("1", Plain),
        scalar("b", Plain),
        scalar("2", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn flow_mapping_missing_bits()
{
    events!("{a: , : b, c}" =>
        stream_start(),
        doc_start(false),
        mapping_start_flow(),
        scalar("a", Plain),
        scalar("", Plain),
        scalar("", Plain),
        scalar("b", Plain),
        scalar("c", Plain),
        scalar("", Plain),
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn compact_mapping_in_flow_sequence()
{
    events!("[key: value, next]" =>
        stream_start(),
        doc_start(false),
        sequence_start_flow(),
        mapping_start_flow(),
        scalar("key", Plain),
        scalar("value", Plain),
        EventData::MappingEnd,
        scalar("next", Plain),
        EventData::SequenceEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn flow_in_block_value()
{
    events!("key: {a: [1, 2]}" =>
        stream_start(),
        doc_start(false),
        mapping_start_block(),
        scalar("key", Plain),
        mapping_start_flow(),
        scalar("a", Plain),
        sequence_start_flow(),
        scalar("1", Plain),
        scalar("2", Plain),
        EventData::SequenceEnd,
        EventData::MappingEnd,
        doc_end(false),
        stream_end()
    );
}

#[test]
fn unterminated_flow_sequence_rejected()
{
    parse_error!("[1, 2");
}

#[test]
fn missing_comma_rejected()
{
    parse_error!("[a, {b: 1} {c: 2}]");
}

#[test]
fn misaligned_content_rejected()
{
    parse_error!("- 'a'\n  b");
}
