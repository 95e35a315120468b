//! Foundation types for the xref toolchain.
//!
//! This module provides fundamental types used throughout the indexer:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Name`], [`Interner`] - String interning
//!
//! This module has NO dependencies on other xref modules.

mod file_id;
mod intern;
mod line_index;

pub use file_id::FileId;
pub use intern::{Interner, Name};
pub use line_index::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
