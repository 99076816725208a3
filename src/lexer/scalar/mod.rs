/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scalar content construction. Each submodule owns one
//! scalar family and its folding rules:
//!
//! - plain:  unquoted scalars, folded across continuation
//!   lines, classified against the core schema
//! - flow:   single and double quoted scalars, including
//!   escapes and in-quote folding
//! - block:  literal and folded block scalars, including
//!   header handling and chomping
//! - escape: the shared escape decoding primitives

pub(in crate::lexer) mod block;
pub(in crate::lexer) mod escape;
pub(in crate::lexer) mod flow;
pub(in crate::lexer) mod plain;

const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Trapdoor out of zero copy land. Copies everything
/// between .start and the head of .buffer in .base into the
/// scratch space, unsetting .can_borrow.
///
/// A no-op if .can_borrow is already unset.
fn set_no_borrow(can_borrow: &mut bool, base: &str, buffer: &str, start: usize, scratch: &mut Vec<u8>)
{
    if *can_borrow
    {
        let consumed = base.len() - buffer.len();

        scratch.extend_from_slice(base[start..consumed].as_bytes());
    }

    *can_borrow = false;
}
