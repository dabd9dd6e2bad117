//! # Block Parsing
//!
//! A single pass over the lines builds the tree of block spans.
//!
//! ## Parsing Phases
//!
//! For each non-blank line, the builder alternates two phases until the line's
//! cursor reaches its end:
//!
//! 1. **Close** (`builder`): ask the active leaf whether it ends here, either on
//!    an explicit token or on a blank run plus an indentation change. When the
//!    leaf is a list block and an enclosing tagged block's closing token ends
//!    at the cursor, the lists in between are soft-discarded.
//! 2. **Open** (`contract`): try the leaf's allowed children in declared order.
//!    The first that starts at the cursor and is accepted by the leaf opens.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `BlockKind`, `BlockNode`
//! - **`kinds`**: per-variant tokens, option pools and field types
//! - **`contract`**: the recognizer contract (`try_start`, `check_ends`, seeks, hooks)
//! - **`options`**: `[key=value]` option group scanning
//! - **`containers`**: open-block `Frame`s and the `ParsingContext`
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - The cursor only moves forward, so every line is consumed in bounded steps
//! - Raw variants (code, math, passthrough, comments) admit no children
//! - Every finalized span satisfies `start <= content_start <= content_end <= end`

pub mod builder;
pub mod containers;
pub mod contract;
pub mod kinds;
pub mod options;
pub mod types;

pub use builder::BlockBuilder;
pub use contract::EndCheck;
pub use types::{Block, BlockKind, BlockNode, DocumentTree};
