//! # Source Text Model
//!
//! Everything downstream of the line model addresses source text by
//! [`Position`] (line index, code-point offset) rather than by byte offset.
//!
//! ## Modules
//!
//! - **`span`**: `Position` and the four-position `Span`
//! - **`lines`**: `Source::read` normalizes line endings and measures indentation
//! - **`cursor`**: `LineCursor`, the per-line read cursor used by block recognizers
//! - **`slice`**: literal text recovery between two positions

pub mod cursor;
pub mod lines;
pub mod slice;
pub mod span;

pub use cursor::LineCursor;
pub use lines::{Line, Source};
pub use slice::{preview, slice_between};
pub use span::{Position, Span};
