/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The anchor table tracks the anchors declared in the
//! current document, handing out compact [`AnchorId`]s for
//! the event stream to carry.
//!
//! Ids are only meaningful within one document; the parser
//! resets the table at every document boundary.

use std::collections::HashMap;

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Compact identifier of an anchor declared in the
    /// current document
    pub struct AnchorId;
}

/// Per document mapping between anchor names and
/// [`AnchorId`]s.
#[derive(Debug, Clone, Default)]
pub struct AnchorTable
{
    names: SlotMap<AnchorId, String>,
    index: HashMap<String, AnchorId>,
}

impl AnchorTable
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Bind .name to a fresh id, returning it. A name
    /// already bound is rebound; later aliases resolve to
    /// the newest binding.
    pub fn declare(&mut self, name: &str) -> AnchorId
    {
        let id = self.names.insert(name.to_string());

        if let Some(old) = self.index.insert(name.to_string(), id)
        {
            self.names.remove(old);
        }

        id
    }

    /// Resolve .name against the current document's
    /// bindings
    pub fn lookup(&self, name: &str) -> Option<AnchorId>
    {
        self.index.get(name).copied()
    }

    /// The name bound to .id, if the binding is still live
    pub fn name_of(&self, id: AnchorId) -> Option<&str>
    {
        self.names.get(id).map(String::as_str)
    }

    /// Number of live bindings
    pub fn len(&self) -> usize
    {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.names.is_empty()
    }

    /// Forget every binding. Called at each document end.
    pub fn reset(&mut self)
    {
        self.names.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn declare_then_lookup()
    {
        let mut table = AnchorTable::new();

        let id = table.declare("base");

        assert_eq!(table.lookup("base"), Some(id));
        assert_eq!(table.name_of(id), Some("base"));
        assert_eq!(table.lookup("other"), None);
    }

    #[test]
    fn redeclare_overwrites()
    {
        let mut table = AnchorTable::new();

        let first = table.declare("a");
        let second = table.declare("a");

        assert_ne!(first, second);
        assert_eq!(table.lookup("a"), Some(second));
        assert_eq!(table.name_of(first), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reset_clears_bindings()
    {
        let mut table = AnchorTable::new();

        table.declare("a");
        table.declare("b");
        table.reset();

        assert!(table.is_empty());
        assert_eq!(table.lookup("a"), None);
    }
}
