//! # Snapshot Support
//!
//! Stable views of a parsed document for tests and the `tree` command.
//!
//! ## Modules
//!
//! - **`normalize`**: converts the arena tree into a nested, serializable
//!   [`Snap`] and an indented text outline
//! - **`invariants`**: assertions every finished tree satisfies (tree links
//!   consistent, spans well formed, no leftover inline delimiters)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize, outline};
