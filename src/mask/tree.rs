//! Compiled mask tree
//!
//!     A [`Mask`] compiles a rule string into a prefix tree of [`MaskNode`]s,
//!     built once and immutable thereafter. Each chain becomes a linear path
//!     of nodes carrying the chain's select flag; a trailing wildcard child
//!     is attached below the deepest node so that a rule on a path applies
//!     recursively to everything under that path unless a deeper, more
//!     specific rule overrides it.
//!
//!     Chains merge by structural path: an existing child with the same key
//!     absorbs the incoming segment and only its children grow, so `foo.bar`
//!     and `foo.quux` share one `foo` node and a chain that collides with an
//!     existing node never overwrites its select flag.
//!
//!     Literal children live in a name-keyed map; the single allowed
//!     wildcard child has its own slot, so a document key literally named
//!     `*` can never alias the wildcard.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::mask::cursor::MaskCursor;
use crate::mask::rules::{parse_rules, RuleChain, SegmentKey};

/// A node of the compiled mask tree
#[derive(Debug)]
pub(crate) struct MaskNode {
    key: SegmentKey,
    select: bool,
    children: HashMap<String, MaskNode>,
    wildcard: Option<Box<MaskNode>>,
}

impl MaskNode {
    fn new(key: SegmentKey, select: bool) -> MaskNode {
        MaskNode {
            key,
            select,
            children: HashMap::new(),
            wildcard: None,
        }
    }

    pub(crate) fn select(&self) -> bool {
        self.select
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        matches!(self.key, SegmentKey::Wildcard)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.wildcard.is_none()
    }

    /// True when the only thing below this node is the trailing wildcard
    /// injected at chain compilation; the decision is final here.
    pub(crate) fn has_lone_leaf_wildcard(&self) -> bool {
        self.children.is_empty() && self.wildcard.as_deref().is_some_and(MaskNode::is_leaf)
    }

    /// Child lookup for a document segment: the literal child if present,
    /// the wildcard child otherwise.
    pub(crate) fn resolve(&self, segment: &str) -> Option<&MaskNode> {
        self.children.get(segment).or(self.wildcard.as_deref())
    }

    /// Walk or create the child for one rule segment. An existing child
    /// keeps its select flag; only missing nodes take the chain's.
    fn child_entry(&mut self, key: &SegmentKey, select: bool) -> &mut MaskNode {
        match key {
            SegmentKey::Literal(name) => self
                .children
                .entry(name.clone())
                .or_insert_with(|| MaskNode::new(key.clone(), select)),
            SegmentKey::Wildcard => self
                .wildcard
                .get_or_insert_with(|| Box::new(MaskNode::new(SegmentKey::Wildcard, select))),
        }
    }

    /// Merge one rule chain into the tree below this node, appending the
    /// trailing wildcard under the chain's deepest node.
    fn attach_chain(&mut self, chain: &RuleChain) {
        let mut node = self;
        for key in &chain.segments {
            node = node.child_entry(key, chain.select);
        }
        node.child_entry(&SegmentKey::Wildcard, chain.select);
    }
}

/// A compiled mask: the root of the prefix tree plus the original rule
/// string, kept for diagnostics only and never reparsed.
///
/// Construction is pure and never fails; malformed rule input degrades per
/// the permissive parsing in [rules](crate::mask::rules). The tree is
/// immutable after construction, so a `Mask` is safe to share across
/// threads and any number of cursors may walk it concurrently.
#[derive(Debug)]
pub struct Mask {
    rules: String,
    root: MaskNode,
}

impl Mask {
    pub fn new(rules: &str) -> Mask {
        // The root selects nothing by itself; a leading `*` chain merges as
        // an ordinary wildcard child and establishes select-everything
        // through normal traversal.
        let mut root = MaskNode::new(SegmentKey::Literal("root".to_string()), false);
        for chain in parse_rules(rules) {
            root.attach_chain(&chain);
        }
        Mask {
            rules: rules.to_string(),
            root,
        }
    }

    /// The rule string this mask was compiled from
    pub fn rules(&self) -> &str {
        &self.rules
    }

    /// A fresh cursor positioned at the tree root
    pub fn cursor(&self) -> MaskCursor<'_> {
        MaskCursor::at_root(self)
    }

    pub(crate) fn root(&self) -> &MaskNode {
        &self.root
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({})", self.rules)
    }
}

impl Serialize for Mask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rules)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Mask, D::Error> {
        let rules = String::deserialize(deserializer)?;
        Ok(Mask::new(&rules))
    }
}

static SELECT_ALL: Lazy<Mask> = Lazy::new(|| Mask::new("*"));
static SELECT_NONE: Lazy<Mask> = Lazy::new(|| Mask::new(""));

/// Shared mask selecting every path (`*`)
pub fn select_all() -> &'static Mask {
    &SELECT_ALL
}

/// Shared mask selecting nothing (empty rule string)
pub fn select_none() -> &'static Mask {
    &SELECT_NONE
}
