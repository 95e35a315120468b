//! # xref-base
//!
//! Core library for source cross-reference indexing, symbol identity
//! resolution, and navigation queries.
//!
//! The crate consumes resolved occurrence events produced by an external
//! compiler front-end, builds an immutable cross-reference index over a
//! corpus snapshot, and answers two query families: resolve-at-position
//! (click navigation) and name search.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → navigation + search queries (resolve_at, search, AnalysisHost)
//!   ↓
//! corpus   → corpus snapshots, parallel collection, single-writer merge
//!   ↓
//! index    → cross-reference index: building → sealed lifecycle
//!   ↓
//! identity → canonical identity resolution (overloads, instantiations)
//!   ↓
//! collect  → occurrence collection from resolved units
//!   ↓
//! unit     → resolved-unit event model (front-end boundary)
//!   ↓
//! base     → primitives (FileId, interning, LineIndex, byte spans)
//! ```

// ============================================================================
// MODULES (dependency order: base → unit → collect → identity → index →
// corpus → ide)
// ============================================================================

/// Foundation types: FileId, string interning, line/offset conversion
pub mod base;

/// Resolved-unit event model: the boundary to the external front-end
pub mod unit;

/// Occurrence collection: the first pass over resolved units
pub mod collect;

/// Canonical symbol identities and the identity resolver
pub mod identity;

/// Cross-reference index: building and sealed query structures
pub mod index;

/// Corpus snapshots and the parallel index build
pub mod corpus;

/// Query engine: resolve-at-position, name search, analysis host
pub mod ide;

// Re-export foundation types
pub use base::{FileId, Interner, LineCol, LineIndex, Name, TextRange, TextSize};

// Re-export the main entry points
pub use corpus::Corpus;
pub use index::{SearchMode, XrefIndex};
