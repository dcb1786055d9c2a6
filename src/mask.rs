//! Payload tagging mask engine
//!
//!     This module turns a textual rule string into an immutable prefix tree
//!     and lets callers walk that tree in lockstep with a decoded JSON
//!     document, one path segment at a time.
//!
//! The Masking Pipeline
//!
//!     The pipeline consists of:
//!         1. Rule lexing. See [rules](rules). The rule string is tokenized
//!            with a logos lexer into separators, escapes and text runs, and
//!            assembled into rule chains (polarity + unescaped segments).
//!
//!         2. Tree compilation. See [tree](tree). Each chain becomes a linear
//!            path of nodes carrying the chain's select flag, with a trailing
//!            wildcard below the deepest node so a rule applies recursively
//!            under its path. Chains merge into a single root by structural
//!            path; shared prefixes share nodes.
//!
//!         3. Traversal. See [cursor](cursor). A cursor borrows the compiled
//!            tree and answers `can_tag(segment, is_leaf_value)` per document
//!            key, advancing with `with_next(segment)`. The tree is never
//!            mutated after construction, so any number of cursors may walk
//!            one mask concurrently.
//!
//!     The [object](object) module is the reference consumer: it applies a
//!     mask to a `serde_json::Value` and returns the masked copy. Production
//!     consumers that flatten paths into dotted tag strings drive the cursor
//!     the same way.

pub mod cursor;
pub mod object;
pub mod rules;
pub mod tree;

pub use cursor::MaskCursor;
pub use object::masked_object;
pub use rules::{parse_rules, RuleChain, SegmentKey};
pub use tree::Mask;
