//! Mask traversal cursor
//!
//!     A [`MaskCursor`] is a lightweight, copyable position inside a compiled
//!     mask tree, advanced in lockstep with a JSON document. The caller asks
//!     `can_tag(segment, is_leaf_value)` before emitting or descending into a
//!     key, and `with_next(segment)` to descend. Advancing returns a new
//!     cursor value and never mutates the tree, so recursive and concurrent
//!     traversals are safe.
//!
//!     When a traversal walks past the tree (no literal child, no wildcard),
//!     the cursor freezes on the answer the miss produced: every `can_tag`
//!     below an already-decided subtree is O(1) and consistent, and
//!     `with_next` keeps returning the same frozen cursor.

use crate::mask::tree::{Mask, MaskNode};

#[derive(Debug, Clone, Copy)]
enum CursorState<'m> {
    /// Positioned at a tree node
    At(&'m MaskNode),
    /// Past the tree; answers the stored boolean forever
    Frozen(bool),
}

/// An immutable traversal position over a [`Mask`]
#[derive(Debug, Clone, Copy)]
pub struct MaskCursor<'m> {
    mask: &'m Mask,
    state: CursorState<'m>,
}

impl<'m> MaskCursor<'m> {
    pub(crate) fn at_root(mask: &'m Mask) -> MaskCursor<'m> {
        MaskCursor {
            mask,
            state: CursorState::At(mask.root()),
        }
    }

    /// May the value under `segment` be tagged from this position?
    ///
    /// `is_leaf_value` is true when the value under `segment` is a scalar,
    /// i.e. the document offers no further depth. The answer is final when
    /// the document or the tree runs out of depth; otherwise the call admits
    /// the key provisionally and defers to a deeper call after
    /// [`with_next`](Self::with_next).
    pub fn can_tag(&self, segment: &str, is_leaf_value: bool) -> bool {
        let node = match self.state {
            CursorState::Frozen(answer) => return answer,
            CursorState::At(node) => node,
        };
        match node.resolve(segment) {
            None => self.miss_answer(node),
            Some(child) => {
                if is_leaf_value || child.is_leaf() || child.has_lone_leaf_wildcard() {
                    // The document or the rule path ends here; the resolved
                    // node's polarity decides.
                    child.select()
                } else {
                    // More tree below and more document below: keep going,
                    // a deeper node may change the answer.
                    true
                }
            }
        }
    }

    /// Descend one segment, resolving the wildcard fallback like
    /// [`can_tag`](Self::can_tag). A miss returns a frozen cursor carrying
    /// the miss answer.
    pub fn with_next(&self, segment: &str) -> MaskCursor<'m> {
        let node = match self.state {
            CursorState::Frozen(_) => return *self,
            CursorState::At(node) => node,
        };
        match node.resolve(segment) {
            Some(child) => MaskCursor {
                mask: self.mask,
                state: CursorState::At(child),
            },
            None => MaskCursor {
                mask: self.mask,
                state: CursorState::Frozen(self.miss_answer(node)),
            },
        }
    }

    /// Answer when no child resolves for a segment:
    ///   - a childless wildcard is the trailing marker of its chain and
    ///     answers its own polarity for everything below;
    ///   - an inclusion node that does not name the key denies it;
    ///   - the root with no matching child denies (nothing is selected by
    ///     default);
    ///   - any other exclusion node admits what it does not name.
    fn miss_answer(&self, node: &MaskNode) -> bool {
        if node.is_wildcard() && node.is_leaf() {
            node.select()
        } else if node.select() {
            false
        } else {
            !std::ptr::eq(node, self.mask.root())
        }
    }
}
