/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Classification of plain scalar content against the YAML
//! 1.2 core schema.
//!
//! The classifier is a pure function over the scalar's
//! lexical form; it allocates nothing and looks at nothing
//! beyond the given slice. Equal inputs produce equal
//! outputs.

/// The core schema type a plain scalar's lexical form
/// matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHint
{
    /// Signed or unsigned decimal integer
    Integer,
    /// Finite floating point number
    Float,
    /// Positive or negative infinity (`.inf` forms)
    FloatInf,
    /// Not-a-number (`.nan` forms)
    FloatNaN,
    /// `true`, `True` or `TRUE`
    BoolTrue,
    /// `false`, `False` or `FALSE`
    BoolFalse,
    /// `null`, `Null`, `NULL`, `~` or the empty string
    Null,
    /// Content only interpretable as a string
    Str,
    /// Content this classifier has no opinion on, e.g the
    /// product of a non plain style
    Unknown,
}

impl Default for TypeHint
{
    fn default() -> Self
    {
        Self::Unknown
    }
}

impl TypeHint
{
    /// Would a plain scalar with this hint be interpreted
    /// as something other than a string by a core schema
    /// resolver?
    pub fn is_interpretable(self) -> bool
    {
        !matches!(self, Self::Str | Self::Unknown)
    }
}

/// Classify .content against the core schema's lexical
/// productions.
pub(crate) fn guess_type(content: &str) -> TypeHint
{
    match content
    {
        "" | "~" | "null" | "Null" | "NULL" => TypeHint::Null,
        "true" | "True" | "TRUE" => TypeHint::BoolTrue,
        "false" | "False" | "FALSE" => TypeHint::BoolFalse,
        ".nan" | ".NaN" | ".NAN" => TypeHint::FloatNaN,
        _ if is_inf(content) => TypeHint::FloatInf,
        _ if is_integer(content) => TypeHint::Integer,
        _ if is_float(content) => TypeHint::Float,
        _ => TypeHint::Str,
    }
}

/// [-+]? '.' ( inf | Inf | INF )
fn is_inf(content: &str) -> bool
{
    let unsigned = content
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(content);

    matches!(unsigned, ".inf" | ".Inf" | ".INF")
}

/// [-+]? [0-9]+
fn is_integer(content: &str) -> bool
{
    let unsigned = content
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(content);

    !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit())
}

/// [-+]? ( '.' [0-9]+ | [0-9]+ ( '.' [0-9]* )? ) ( [eE] [-+]? [0-9]+ )?
fn is_float(content: &str) -> bool
{
    let unsigned = content
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(content);

    let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E')
    {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let mantissa_ok = match mantissa.find('.')
    {
        Some(at) =>
        {
            let (int, frac) = (&mantissa[..at], &mantissa[at + 1..]);

            // One side of the dot may be empty, not both
            (!int.is_empty() || !frac.is_empty())
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        },
        // A dotless mantissa is only a float if an exponent
        // follows, otherwise it was an integer
        None => exponent.is_some() && !mantissa.is_empty() && is_integer(mantissa),
    };

    let exponent_ok = match exponent
    {
        Some(e) => is_integer(e),
        None => true,
    };

    mantissa_ok && exponent_ok
}
