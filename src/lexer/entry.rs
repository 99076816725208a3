/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::token::{Marker, Token};

/// A token plus the stream position it was scanned at.
///
/// The position is the token's *start*; the parser uses
/// `line` to enforce same-line rules (implicit keys), and
/// `read_at` to contextualize errors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TokenEntry<'de>
{
    token: Token<'de>,

    read_at: usize,
    line:    usize,
    column:  usize,
}

impl<'de> TokenEntry<'de>
{
    pub fn new(token: Token<'de>, read_at: usize, line: usize, column: usize) -> Self
    {
        Self {
            token,
            read_at,
            line,
            column,
        }
    }

    pub fn marker(&self) -> Marker
    {
        Marker::from(&self.token)
    }

    pub fn token(&self) -> &Token<'de>
    {
        &self.token
    }

    pub fn into_token(self) -> Token<'de>
    {
        self.token
    }

    pub fn read_at(&self) -> usize
    {
        self.read_at
    }

    pub fn line(&self) -> usize
    {
        self.line
    }

    pub fn column(&self) -> usize
    {
        self.column
    }
}
