/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{fmt, io};

use crate::error::{internal, Error};

pub(crate) type EmitResult<T> = std::result::Result<T, EmitError>;

/// Errors the presenter can produce. The presenter aborts
/// on the first of these and flushes no further output.
#[derive(Debug)]
pub(crate) enum EmitError
{
    /// JSON output holds exactly one document
    SecondDocumentInJson,

    /// The event stream was not well formed (unbalanced
    /// ends, an alias with no preceding anchor, nodes
    /// outside a document)
    CorruptStream,

    /// The sink failed to accept output
    IO(io::Error),
}

impl fmt::Display for EmitError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::SecondDocumentInJson =>
            {
                fmt::Display::fmt(&internal::ErrorCode::SecondDocumentInJson, f)
            },
            Self::CorruptStream => fmt::Display::fmt(&internal::ErrorCode::CorruptStream, f),
            Self::IO(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<io::Error> for EmitError
{
    fn from(e: io::Error) -> Self
    {
        Self::IO(e)
    }
}

impl From<EmitError> for Error
{
    fn from(err: EmitError) -> Self
    {
        let kind = match err
        {
            EmitError::SecondDocumentInJson =>
            {
                internal::ErrorKind::from(internal::ErrorCode::SecondDocumentInJson)
            },
            EmitError::CorruptStream =>
            {
                internal::ErrorKind::from(internal::ErrorCode::CorruptStream)
            },
            EmitError::IO(e) => internal::ErrorKind::from(e),
        };

        Error::new(internal::Error::new(kind))
    }
}
