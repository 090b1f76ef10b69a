//! Structural debug representation of values.
//!
//! A [`Repr`] is an immutable tree built through the builders in
//! [`repr::build`] (or the [`ToRepr`] producer trait), read through
//! [`Repr::children`], rewritten through [`Repr::with_children`], rendered by
//! [`pretty`], compared by [`diff`] and projected to JSON by [`json::to_json`].
pub mod diff;
pub mod error;
pub mod json;
pub mod path;
pub mod pretty;
pub mod produce;
pub mod repr;
pub mod walk;

pub use error::ReprError;
pub use json::to_json;
pub use path::{Path, Step};
pub use produce::ToRepr;
pub use repr::{Float, Kind, Label, Node, Repr, build};
