//! AnalysisHost and Analysis — state management for the query layer.
//!
//! The `AnalysisHost` owns the corpus snapshot and rebuilds the index
//! wholesale when units change. `Analysis` is a consistent read-only view;
//! `snapshot()` hands out an `Arc` of the sealed index for concurrent
//! readers.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_unit(unit);
//!
//! let analysis = host.analysis()?;
//! let nav = analysis.resolve_at(file_id, offset);
//! let hits = analysis.search("symbol", &SearchOptions::default());
//! ```

use std::sync::Arc;

use text_size::TextSize;

use crate::base::FileId;
use crate::corpus::Corpus;
use crate::index::{BuildError, XrefIndex};
use crate::unit::SourceUnit;

use super::nav::NavResult;
use super::references::ReferenceResult;
use super::search::{RankedHit, SearchHit, SearchOptions};

/// Owns the corpus and the current sealed index.
///
/// Apply changes via `set_unit()` and `remove_unit()`, then get a
/// consistent view via `analysis()`. The index is rebuilt from scratch on
/// the first query after a change; there is no incremental update.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    corpus: Corpus,
    index: Arc<XrefIndex>,
    dirty: bool,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the unit for a path.
    pub fn set_unit(&mut self, unit: SourceUnit) {
        self.corpus.add_unit(unit);
        self.dirty = true;
    }

    /// Remove the unit for a path. Returns true if one was present.
    pub fn remove_unit(&mut self, path: &str) -> bool {
        let removed = self.corpus.remove_unit(path);
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn unit_count(&self) -> usize {
        self.corpus.unit_count()
    }

    /// Rebuild the index from the current corpus snapshot.
    pub fn rebuild(&mut self) -> Result<(), BuildError> {
        self.index = Arc::new(self.corpus.build()?);
        self.dirty = false;
        Ok(())
    }

    /// Get a consistent view for querying, rebuilding first if any unit
    /// changed since the last build.
    pub fn analysis(&mut self) -> Result<Analysis<'_>, BuildError> {
        if self.dirty {
            self.rebuild()?;
        }
        Ok(Analysis { index: &self.index })
    }

    /// Get a shareable handle to the sealed index for concurrent readers.
    pub fn snapshot(&mut self) -> Result<Arc<XrefIndex>, BuildError> {
        if self.dirty {
            self.rebuild()?;
        }
        Ok(Arc::clone(&self.index))
    }
}

/// An immutable view of the sealed index.
///
/// All queries go through this struct to ensure consistent results.
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    index: &'a XrefIndex,
}

impl<'a> Analysis<'a> {
    /// Resolve the occurrence at a position to navigation targets.
    pub fn resolve_at(&self, file: FileId, offset: TextSize) -> NavResult {
        super::resolve_at(self.index, file, offset)
    }

    /// Find all occurrences of the identity at a position.
    pub fn find_references(
        &self,
        file: FileId,
        offset: TextSize,
        include_declaration: bool,
    ) -> ReferenceResult {
        super::find_references(self.index, file, offset, include_declaration)
    }

    /// Search occurrences of all identities matching the query.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        super::search(self.index, query, options)
    }

    /// Definition-first ranked search.
    pub fn search_ranked(&self, query: &str, options: &SearchOptions) -> Vec<RankedHit> {
        super::search_ranked(self.index, query, options)
    }

    /// Get the FileId for a path, if the corpus contains it.
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.index.file_id(path)
    }

    /// Get the sealed index.
    pub fn index(&self) -> &'a XrefIndex {
        self.index
    }
}
