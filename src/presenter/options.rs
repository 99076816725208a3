/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::event::types::VersionDirective;

/// Knobs controlling how a [`Presenter`](super::Presenter)
/// lays out the YAML it writes.
#[derive(Debug, Clone)]
pub struct PresentOptions
{
    /// Spaces per indentation level
    pub indentation_step: usize,

    /// Global preference for collection forms; a style
    /// carried on the incoming event wins when it is
    /// representable in context
    pub containers: ContainerStyle,

    /// Emit a `%YAML` directive ahead of the first document
    pub output_version: Option<VersionDirective>,

    /// Target line width for double quoted scalars and for
    /// deciding when a Mixed container may condense to flow
    pub max_line_length: usize,

    /// Scalar quoting regime
    pub quoting: Quoting,

    /// Whether flow collections emit on one line when they
    /// fit
    pub condense_flow: bool,

    /// Use the `?`/`:` form for every block mapping key,
    /// even ones that would fit the implicit form
    pub explicit_keys: bool,

    /// Which nodes get their specific tags written out
    pub tag_style: TagStyle,

    /// How anchors are assigned to output names
    pub anchor_style: AnchorStyle,

    /// Custom `%TAG` shorthands to declare ahead of the
    /// first document, as (handle, prefix) pairs. Tags
    /// under a declared prefix are written in shorthand
    /// form.
    pub handles: Vec<(String, String)>,
}

impl Default for PresentOptions
{
    fn default() -> Self
    {
        Self {
            indentation_step: 2,
            containers:       ContainerStyle::Block,
            output_version:   None,
            max_line_length:  80,
            quoting:          Quoting::Default,
            condense_flow:    true,
            explicit_keys:    false,
            tag_style:        TagStyle::None,
            anchor_style:     AnchorStyle::Tidy,
            handles:          Vec::new(),
        }
    }
}

impl PresentOptions
{
    /// Options producing a JSON compatible rendition: flow
    /// containers, double quoted scalars, one document
    pub fn json() -> Self
    {
        Self {
            quoting: Quoting::Json,
            containers: ContainerStyle::Flow,
            ..Self::default()
        }
    }
}

/// Global collection form preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStyle
{
    /// Indentation delimited collections wherever possible
    Block,
    /// Bracket delimited collections everywhere
    Flow,
    /// Block structure, but collections holding nothing but
    /// a handful of scalars condense to flow
    Mixed,
}

/// Scalar quoting regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting
{
    /// Plain where safe, quoted where needed, honoring the
    /// style carried on the event when possible
    Default,
    /// Double quote every key and value and force flow
    /// containers; a second document is an error
    Json,
}

/// Which nodes get their (specific) tags written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle
{
    /// Tags are never written
    None,
    /// Only the document root's tag is written
    RootOnly,
    /// Every node carrying a specific tag gets it written
    All,
}

/// How anchors map to output names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorStyle
{
    /// Buffer each document and name only the anchors that
    /// are actually aliased
    Tidy,
    /// Name and write every anchor as it streams through
    Always,
}
