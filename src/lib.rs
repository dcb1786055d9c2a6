//! # tagmask
//!
//! Rule-compiled masking of JSON payloads for tag export.
//!
//! A [`Mask`] is built once from a compact rule string and decides, for every
//! key encountered while walking a decoded JSON document, whether the value
//! under that key may be exported as a flattened key-value tag.
//!
//! Rule language:
//!   - rules are comma-separated chains of dot-separated segments:
//!     `foo.bar,foo.quux`
//!   - a leading `-` on a chain excludes its path: `*,-password`
//!   - a segment spelled `*` matches any key at that depth; a leading bare
//!     `*` chain selects everything not otherwise excluded
//!   - `\,` and `\.` escape literal separators inside a segment
//!
//! Construction never fails; malformed input degrades to skipped chains or
//! literal segments. See the [mask module](mask) for the compilation and
//! traversal pipeline.

pub mod mask;

pub use mask::cursor::MaskCursor;
pub use mask::object::masked_object;
pub use mask::tree::{select_all, select_none, Mask};
