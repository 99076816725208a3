/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

/// Peek into the token stream, copying out the head entry's
/// position and marker.
///
/// Modifiers
///     @  .source := return Option<Peek> (no error on EOF)
///
/// Variants
///     /1 .source
///     /2 .source, .nth := return Option<Marker>
macro_rules! peek {
    ($source:expr) => {
        $source
            .peek()
            .map_err($crate::event::error::ParseError::from)
            .and_then(|maybe| {
                maybe
                    .map($crate::event::parser::Peek::of)
                    .ok_or($crate::event::error::ParseError::UnexpectedEOF)
            })
    };
    (@ $source:expr) => {
        $source
            .peek()
            .map_err($crate::event::error::ParseError::from)
            .map(|maybe| maybe.map($crate::event::parser::Peek::of))
    };
    ($source:expr, $nth:expr) => {
        $source
            .peek_at($nth)
            .map_err($crate::event::error::ParseError::from)
            .map(|maybe| maybe.map(|entry| entry.marker()))
    };
}

/// Pop the head of the token stream, returning the owned
/// entry, or an error if the stream was empty.
macro_rules! pop {
    ($source:expr) => {
        $source
            .pop()
            .map_err($crate::event::error::ParseError::from)
            .and_then(|maybe| maybe.ok_or($crate::event::error::ParseError::UnexpectedEOF))
    };
}

/// ```text
/// Manipulate the given state .machine (or .parser),
/// pushing / popping states in the stack and modifying the
/// current top state
///
/// Variants
///     /1 .machine, $op .state
///     /2 .parser, $op .state *[, $op .state ]
///
///     $op :=
///         | -> (change top state)
///         | >> (push state to stack)
///         | << (pop state from stack to top)
/// ```
macro_rules! state {
    (~$parser:expr, $( $op:tt $state:expr ),+) => {
        $( state!($parser.state, $op $state); )+
    };

    ($machine:expr, -> $state:expr) => {
        *$machine.top_mut() = $state
    };
    ($machine:expr, >> $state:expr) => {
        $machine.push($state)
    };
    ($machine:expr, << $_:expr) => {
        $machine.pop()
    };
}
