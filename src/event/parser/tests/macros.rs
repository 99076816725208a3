/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

/// Macro for asserting event streams.
///
/// Used as: events!(yaml => <expected> [, ..]), asserting
/// that parsing .yaml produces exactly the given event data
/// and nothing after it.
macro_rules! events {
    ($yaml:expr => $( $expected:expr ),+ $(,)? ) => {{
        let reader = $crate::reader::from_utf8($yaml);
        let mut parser = $crate::event::Parser::new(&reader);

        $(
            match parser.next_event()
            {
                Ok(Some(event)) =>
                {
                    pretty_assertions::assert_eq!(event.into_inner(), $expected)
                },
                Ok(None) => panic!("unexpected end of events, was expecting: {:?}", $expected),
                Err(e) => panic!("parser error: {}, was expecting: {:?}", e, $expected),
            }
        )+

        match parser.next_event()
        {
            Ok(None) => {},
            other => panic!("expected end of events, got: {:?}", other),
        }
    }};
}

/// Asserts that parsing .yaml fails, optionally checking
/// the failure's [`Category`](crate::Category)
macro_rules! parse_error {
    ($yaml:expr) => {{
        parse_error!($yaml => $crate::Category::Syntax)
    }};
    ($yaml:expr => $category:expr) => {{
        let reader = $crate::reader::from_utf8($yaml);
        let parser = $crate::event::Parser::new(&reader);

        match parser.collect::<Result<Vec<_>, _>>()
        {
            Err(e) => pretty_assertions::assert_eq!(e.classify(), $category),
            Ok(events) => panic!("expected an error, but parsed: {:#?}", events),
        }
    }};
}
