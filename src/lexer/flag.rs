/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default set, with
/// all other flags disabled.
pub const O_ZEROED: Flags = Flags::empty();

/// Sets the Lexer to surface Comment tokens for the
/// comments it encounters between tokens.
///
/// By default comments are chomped silently; nothing
/// downstream of the lexer consumes them, as the event
/// stream does not preserve comments.
pub const O_COMMENTS: Flags = Flags::COMMENTS;

bitflags! {
    /// Directives controlling various behaviors of the Lexer,
    /// see each O_ variant for an explanation of how each works
    #[derive(Default)]
    pub struct Flags: u32 {
        const COMMENTS = 0b00000001;
    }
}
