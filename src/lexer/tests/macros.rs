/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

/// Macro for asserting token streams.
///
/// Used as: tokens!(data => <expected> [, ..]), asserting
/// that scanning .data produces exactly the given tokens
/// and nothing after them.
macro_rules! tokens {
    ($data:expr => $( $expected:expr ),+ $(,)? ) => {{
        let mut iter = crate::lexer::tests::ScanIter::new($data);

        $(
            match iter.next().transpose()
            {
                Ok(actual) => pretty_assertions::assert_eq!(actual, Some($expected)),
                Err(e) => panic!("lexer error: {}, was expecting: {:?}", e, $expected),
            }
        )+

        match iter.next().transpose()
        {
            Ok(None) => {},
            other => panic!("expected end of tokens, got: {:?}", other),
        }
    }};
}

/// Asserts that scanning .data surfaces the given error
macro_rules! scan_error {
    ($data:expr => $expected:expr) => {{
        let iter = crate::lexer::tests::ScanIter::new($data);

        match iter.collect::<Result<Vec<_>, _>>()
        {
            Err(e) => pretty_assertions::assert_eq!(e, $expected),
            Ok(tokens) => panic!(
                "expected error {:?}, but scanning succeeded with: {:?}",
                $expected, tokens
            ),
        }
    }};
}
