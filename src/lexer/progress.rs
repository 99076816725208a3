/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Tracks how far into the stream the lexer has read:
//! bytes, lines and the offset into the current line.
//! Token entries snapshot these so that the parser can
//! reason about line placement, and errors can be pointed
//! back at their source.

use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Progress
{
    /// Amount of bytes read from the underlying stream
    pub read:   usize,
    /// Number of line breaks seen
    pub lines:  usize,
    /// Codepoints since the last line break
    pub column: usize,
}

impl Progress
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Update the stored stats with the given .read .lines
    /// and .column
    pub fn update(&mut self, read: usize, lines: usize, column: usize)
    {
        self.read += read;
        self.lines += lines;

        match lines
        {
            0 => self.column += column,
            _ => self.column = column,
        }
    }
}

impl Default for Progress
{
    fn default() -> Self
    {
        Self {
            read:   0,
            lines:  0,
            column: 0,
        }
    }
}

impl Add for Progress
{
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output
    {
        self += rhs;

        self
    }
}

impl AddAssign for Progress
{
    fn add_assign(&mut self, rhs: Self)
    {
        self.update(rhs.read, rhs.lines, rhs.column)
    }
}

impl PartialEq<(usize, usize, usize)> for Progress
{
    fn eq(&self, (read, lines, column): &(usize, usize, usize)) -> bool
    {
        self.read == *read && self.lines == *lines && self.column == *column
    }
}
