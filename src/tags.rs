/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The tag library maps tag URIs to compact [`TagId`]s and
//! back, and expands tag shorthands against the handle
//! table in scope.
//!
//! A library value is passed to each parser at construction
//! and persists across the documents of a stream; handle
//! declarations (`%TAG`) are per document and reset at each
//! document boundary. After construction a library may be
//! shared read-only between presenters.

use std::collections::{HashMap, HashSet};

use crate::{
    error::internal::ErrorCode,
    token::Slice,
};

/// Compact identifier of a tag URI registered in a
/// [`TagLibrary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u16);

impl TagId
{
    /// Is this one of the two non specific tags (`!`, `?`)?
    pub fn is_non_specific(self) -> bool
    {
        self == TAG_EXCLAMATION || self == TAG_QUESTION
    }
}

/// The `!` non specific tag, the default of quoted scalars
pub const TAG_EXCLAMATION: TagId = TagId(0);
/// The `?` non specific tag, the default of plain scalars
/// and collections
pub const TAG_QUESTION: TagId = TagId(1);

pub const TAG_STR: TagId = TagId(2);
pub const TAG_SEQ: TagId = TagId(3);
pub const TAG_MAP: TagId = TagId(4);
pub const TAG_NULL: TagId = TagId(5);
pub const TAG_BOOL: TagId = TagId(6);
pub const TAG_INT: TagId = TagId(7);
pub const TAG_FLOAT: TagId = TagId(8);
pub const TAG_OMAP: TagId = TagId(9);
pub const TAG_PAIRS: TagId = TagId(10);
pub const TAG_SET: TagId = TagId(11);
pub const TAG_BINARY: TagId = TagId(12);
pub const TAG_MERGE: TagId = TagId(13);
pub const TAG_TIMESTAMP: TagId = TagId(14);
pub const TAG_VALUE: TagId = TagId(15);
pub const TAG_YAML: TagId = TagId(16);

/// First identifier handed out to URIs registered after
/// construction. Everything below is reserved for the
/// schema constants above.
const FIRST_CUSTOM: u16 = 64;

/// The prefix the `!!` handle expands to
pub const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Default tag handles applied to every YAML document.
///
/// Equivalent of:
///
/// ```yaml
/// %TAG !    !
/// %TAG !!   tag:yaml.org,2002:
/// ```
///
/// These are always in scope, though documents may
/// expressly override them
pub(crate) const DEFAULT_HANDLES: [(&str, &str); 2] = [("!", "!"), ("!!", CORE_SCHEMA_PREFIX)];

/// Bidirectional mapping between tag URIs and [`TagId`]s,
/// plus the tag shorthand table currently in scope.
#[derive(Debug, Clone)]
pub struct TagLibrary
{
    by_uri: HashMap<String, TagId>,
    by_id:  HashMap<TagId, String>,

    handles:  HashMap<String, String>,
    declared: HashSet<String>,
    next:     u16,
}

impl TagLibrary
{
    /// A library knowing only the failsafe schema: the non
    /// specific tags plus `!!str`, `!!seq` and `!!map`
    pub fn failsafe() -> Self
    {
        let mut lib = Self {
            by_uri:   HashMap::new(),
            by_id:    HashMap::new(),
            handles:  HashMap::new(),
            declared: HashSet::new(),
            next:     FIRST_CUSTOM,
        };

        lib.reserve(TAG_EXCLAMATION, "!");
        lib.reserve(TAG_QUESTION, "?");
        lib.reserve(TAG_STR, "tag:yaml.org,2002:str");
        lib.reserve(TAG_SEQ, "tag:yaml.org,2002:seq");
        lib.reserve(TAG_MAP, "tag:yaml.org,2002:map");

        lib.reset_handles();

        lib
    }

    /// A library knowing the core schema: failsafe plus
    /// `!!null`, `!!bool`, `!!int` and `!!float`
    pub fn core() -> Self
    {
        let mut lib = Self::failsafe();

        lib.reserve(TAG_NULL, "tag:yaml.org,2002:null");
        lib.reserve(TAG_BOOL, "tag:yaml.org,2002:bool");
        lib.reserve(TAG_INT, "tag:yaml.org,2002:int");
        lib.reserve(TAG_FLOAT, "tag:yaml.org,2002:float");

        lib
    }

    /// A library additionally knowing the extended type
    /// repertoire: `!!omap`, `!!pairs`, `!!set`,
    /// `!!binary`, `!!merge`, `!!timestamp`, `!!value` and
    /// `!!yaml`
    pub fn extended() -> Self
    {
        let mut lib = Self::core();

        lib.reserve(TAG_OMAP, "tag:yaml.org,2002:omap");
        lib.reserve(TAG_PAIRS, "tag:yaml.org,2002:pairs");
        lib.reserve(TAG_SET, "tag:yaml.org,2002:set");
        lib.reserve(TAG_BINARY, "tag:yaml.org,2002:binary");
        lib.reserve(TAG_MERGE, "tag:yaml.org,2002:merge");
        lib.reserve(TAG_TIMESTAMP, "tag:yaml.org,2002:timestamp");
        lib.reserve(TAG_VALUE, "tag:yaml.org,2002:value");
        lib.reserve(TAG_YAML, "tag:yaml.org,2002:yaml");

        lib
    }

    /// Register .uri, returning its id. Idempotent: a URI
    /// already known returns its existing id.
    pub fn register_uri(&mut self, uri: &str) -> TagId
    {
        if let Some(&id) = self.by_uri.get(uri)
        {
            return id;
        }

        let id = TagId(self.next);
        self.next += 1;

        self.by_uri.insert(uri.to_string(), id);
        self.by_id.insert(id, uri.to_string());

        id
    }

    /// Reverse lookup of a registered id
    pub fn uri_of(&self, id: TagId) -> Option<&str>
    {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Expand the shorthand .handle and concatenate .suffix
    /// onto the expansion.
    ///
    /// `!!` expands to `tag:yaml.org,2002:` and a bare `!`
    /// to itself (producing a local tag), unless a document
    /// has overridden them. Any other handle must have been
    /// declared before use.
    pub(crate) fn resolve_handle(&self, handle: &str, suffix: &str)
        -> Result<String, ErrorCode>
    {
        let expansion = self
            .handles
            .get(handle)
            .ok_or(ErrorCode::UnknownTagHandle)?;

        let mut uri = String::with_capacity(expansion.len() + suffix.len());
        uri.push_str(expansion);
        uri.push_str(suffix);

        Ok(uri)
    }

    /// Declare a `%TAG` shorthand for the current document.
    /// Redeclaring a handle within one document is an
    /// error, though the builtin `!` and `!!` expansions
    /// may each be overridden once.
    pub(crate) fn declare_handle(&mut self, handle: &Slice, prefix: &Slice)
        -> Result<(), ErrorCode>
    {
        if !self.declared.insert(handle.to_string())
        {
            return Err(ErrorCode::DuplicateTagDirective);
        }

        self.handles
            .insert(handle.to_string(), prefix.to_string());

        Ok(())
    }

    /// Drop any document scoped handle declarations,
    /// restoring the builtin `!` and `!!` expansions.
    /// Called at every document boundary.
    pub(crate) fn reset_handles(&mut self)
    {
        self.handles.clear();
        self.declared.clear();

        for (handle, prefix) in DEFAULT_HANDLES.iter()
        {
            self.handles.insert((*handle).into(), (*prefix).into());
        }
    }

    fn reserve(&mut self, id: TagId, uri: &str)
    {
        self.by_uri.insert(uri.to_string(), id);
        self.by_id.insert(id, uri.to_string());
    }
}

impl Default for TagLibrary
{
    fn default() -> Self
    {
        Self::core()
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn register_is_idempotent()
    {
        let mut lib = TagLibrary::core();

        let first = lib.register_uri("tag:example.com,2024:widget");
        let second = lib.register_uri("tag:example.com,2024:widget");

        assert_eq!(first, second);
        assert_eq!(lib.uri_of(first), Some("tag:example.com,2024:widget"));
    }

    #[test]
    fn reserved_ids_resolve()
    {
        let lib = TagLibrary::extended();

        assert_eq!(lib.uri_of(TAG_STR), Some("tag:yaml.org,2002:str"));
        assert_eq!(lib.uri_of(TAG_TIMESTAMP), Some("tag:yaml.org,2002:timestamp"));
        assert_eq!(lib.uri_of(TAG_EXCLAMATION), Some("!"));
        assert_eq!(lib.uri_of(TAG_QUESTION), Some("?"));
    }

    #[test]
    fn failsafe_omits_core_types()
    {
        let lib = TagLibrary::failsafe();

        assert_eq!(lib.uri_of(TAG_MAP), Some("tag:yaml.org,2002:map"));
        assert_eq!(lib.uri_of(TAG_INT), None);
    }

    #[test]
    fn handle_expansion()
    {
        let lib = TagLibrary::core();

        assert_eq!(
            lib.resolve_handle("!!", "str").unwrap(),
            "tag:yaml.org,2002:str"
        );
        assert_eq!(lib.resolve_handle("!", "local").unwrap(), "!local");
        assert!(lib.resolve_handle("!absent!", "x").is_err());
    }

    #[test]
    fn declared_handles_reset_per_document()
    {
        let mut lib = TagLibrary::core();

        lib.declare_handle(&"!e!".into(), &"tag:example.com,2024:".into())
            .unwrap();
        assert_eq!(
            lib.resolve_handle("!e!", "thing").unwrap(),
            "tag:example.com,2024:thing"
        );

        lib.reset_handles();
        assert!(lib.resolve_handle("!e!", "thing").is_err());
    }

    #[test]
    fn duplicate_handle_rejected()
    {
        let mut lib = TagLibrary::core();

        lib.declare_handle(&"!e!".into(), &"one:".into()).unwrap();
        assert!(lib.declare_handle(&"!e!".into(), &"two:".into()).is_err());
    }
}
