/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;

use super::{doc_end, doc_start, scalar, stream_end, stream_start};
use crate::{
    event::{
        types::{DocumentStart, EventData, VersionDirective},
        Parser,
    },
    reader::from_utf8,
    token::ScalarStyle::Plain,
};

#[test]
fn explicit_document()
{
    events!("--- a" =>
        stream_start(),
        doc_start(true),
        scalar("a", Plain),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn explicit_document_end()
{
    events!("a\n..." =>
        stream_start(),
        doc_start(false),
        scalar("a", Plain),
        doc_end(true),
        stream_end()
    );
}

#[test]
fn two_documents()
{
    events!("--- a\n--- b" =>
        stream_start(),
        doc_start(true),
        scalar("a", Plain),
        doc_end(false),
        doc_start(true),
        scalar("b", Plain),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn version_directive_carried_on_document()
{
    events!("%YAML 1.2\n--- a" =>
        stream_start(),
        EventData::DocumentStart(DocumentStart {
            explicit: true,
            version:  Some(VersionDirective { major: 1, minor: 2 }),
        }),
        scalar("a", Plain),
        doc_end(false),
        stream_end()
    );
}

#[test]
fn version_mismatch_warns()
{
    let warnings = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&warnings);

    let reader = from_utf8("%YAML 1.1\n--- a");
    let parser = Parser::new(&reader).on_warning(move |warning| {
        sink.borrow_mut().push(warning.message.clone());
    });

    let events: Vec<_> = parser.collect::<Result<_, _>>().unwrap();

    assert!(events.len() == 5);
    assert_eq!(
        warnings.borrow().as_slice(),
        ["unsupported YAML version 1.1, parsing as 1.2"]
    );
}

#[test]
fn version_mismatch_fatal_in_strict_mode()
{
    let reader = from_utf8("%YAML 1.1\n--- a");
    let parser = Parser::new(&reader).strict(true);

    assert!(parser.collect::<Result<Vec<_>, _>>().is_err());
}

#[test]
fn duplicate_version_rejected()
{
    parse_error!("%YAML 1.2\n%YAML 1.2\n--- a");
}

#[test]
fn directives_require_document_start()
{
    parse_error!("%YAML 1.2\na");
}

#[test]
fn content_after_document_end_requires_marker()
{
    parse_error!("a\n...\nb");
}

#[test]
fn tag_directive_resolves_shorthands()
{
    let reader = from_utf8("%TAG !e! tag:example.com,2024:\n--- !e!widget spanner");
    let mut parser = Parser::new(&reader);

    let mut tagged = None;

    while let Some(event) = parser.next_event().unwrap()
    {
        if let EventData::Scalar(node) = event.data()
        {
            tagged = Some(node.tag);
        }
    }

    let tag = tagged.expect("a scalar event");
    assert_eq!(
        parser.tags().uri_of(tag),
        Some("tag:example.com,2024:widget")
    );
}

#[test]
fn anchors_reset_between_documents()
{
    parse_error!("--- &a 1\n--- *a");
}

#[test]
fn aliases_resolve_within_document()
{
    let reader = from_utf8("- &x 1\n- *x");
    let parser = Parser::new(&reader);

    let events: Vec<_> = parser.collect::<Result<_, _>>().unwrap();

    let declared = events.iter().find_map(|event| match event.data()
    {
        EventData::Scalar(node) => node.anchor,
        _ => None,
    });
    let target = events.iter().find_map(|event| match event.data()
    {
        EventData::Alias(alias) => Some(alias.target),
        _ => None,
    });

    assert_eq!(declared.expect("an anchored scalar"), target.expect("an alias"));
}

#[test]
fn unknown_alias_rejected()
{
    parse_error!("- *nowhere");
}

#[test]
fn unknown_tag_handle_rejected()
{
    parse_error!("--- !missing!thing x");
}

#[test]
fn duplicate_anchor_property_rejected()
{
    parse_error!("- &one &two x");
}
