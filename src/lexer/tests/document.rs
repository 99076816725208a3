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
fn empty_stream()
{
    tokens!("" => StreamEnd);
}

#[test]
fn bare_document_markers()
{
    tokens!("---\n...\n" =>
        LineStart(0),
        DirectivesEnd,
        LineStart(0),
        DocumentEnd,
        StreamEnd
    );
}

#[test]
fn version_directive()
{
    tokens!("%YAML 1.2\n--- x" =>
        LineStart(0),
        YamlDirective,
        VersionPart(cow!("1")),
        VersionPart(cow!("2")),
        LineStart(0),
        DirectivesEnd,
        ScalarPart(cow!("x"), Str),
        StreamEnd
    );
}

#[test]
fn tag_directive()
{
    tokens!("%TAG !e! tag:example.com,2024:\n--- !e!thing x" =>
        LineStart(0),
        TagDirective,
        TagHandle(cow!("!e!")),
        TagUri(cow!("tag:example.com,2024:")),
        LineStart(0),
        DirectivesEnd,
        TagHandle(cow!("!e!")),
        TagSuffix(cow!("thing")),
        ScalarPart(cow!("x"), Str),
        StreamEnd
    );
}

#[test]
fn unknown_directive()
{
    tokens!("%FOO bar\n---" =>
        LineStart(0),
        UnknownDirective(cow!("FOO")),
        UnknownDirectiveParam(cow!("bar")),
        LineStart(0),
        DirectivesEnd,
        StreamEnd
    );
}

#[test]
fn two_documents()
{
    tokens!("--- a\n--- b" =>
        LineStart(0),
        DirectivesEnd,
        ScalarPart(cow!("a"), Str),
        LineStart(0),
        DirectivesEnd,
        ScalarPart(cow!("b"), Str),
        StreamEnd
    );
}

#[test]
fn reserved_indicator_rejected()
{
    scan_error!("@reserved" => ScanError::UnknownDelimiter);
}
