//! The cross-reference index.
//!
//! Pure aggregation over collector output, with a two-phase lifecycle:
//! [`IndexBuilder`] is the mutable, single-writer building phase;
//! [`XrefIndex`] is the sealed result: immutable lookup structures that
//! support unlimited concurrent readers with no locking.
//!
//! Sealing verifies the collector's span invariant (occurrence spans within
//! one file never overlap); a violation is a programming-contract error and
//! fails the build loudly rather than corrupting position lookups.

mod entry;

pub use entry::{IndexEntry, Occurrence};

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};
use thiserror::Error;
use tracing::debug;

use crate::base::{FileId, LineIndex, Name};
use crate::identity::{Identity, IdentityId, IdentityKind};
use crate::unit::Role;

/// Name matching mode for [`XrefIndex::by_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Simple name equals the query.
    Exact,
    /// Simple name starts with the query.
    Prefix,
    /// Query appears anywhere in the simple name.
    #[default]
    Substring,
}

/// Errors raised when sealing an index.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two occurrences of different identities with overlapping spans in
    /// one file. The collector must never emit these.
    #[error("overlapping occurrence spans in {file}: {first:?} and {second:?}")]
    OverlappingSpans {
        file: String,
        first: TextRange,
        second: TextRange,
    },
}

/// Per-file data retained by the index: text plus its line index.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub file: FileId,
    pub path: Name,
    pub text: Arc<str>,
    pub line_index: LineIndex,
}

/// An occurrence found by position lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionHit {
    pub identity: IdentityId,
    pub range: TextRange,
    pub role: Role,
}

// ============================================================================
// BUILDING PHASE
// ============================================================================

/// The mutable building phase of the index. Single writer; sealed exactly
/// once.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    files: IndexMap<Name, FileRecord>,
    entries: Vec<IndexEntry>,
    positions: FxHashMap<FileId, Vec<(TextRange, IdentityId, Role)>>,
    occurrence_count: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file, returning its id. Registering the same path twice
    /// returns the existing id.
    pub fn add_file(&mut self, path: Name, text: Arc<str>) -> FileId {
        if let Some(index) = self.files.get_index_of(path.as_ref()) {
            return FileId::new(index as u32);
        }
        let file = FileId::new(self.files.len() as u32);
        let line_index = LineIndex::new(&text);
        self.files.insert(
            path.clone(),
            FileRecord {
                file,
                path,
                text,
                line_index,
            },
        );
        file
    }

    /// Append an occurrence to the identity's bucket matching its role.
    /// O(1) amortized.
    pub fn put(&mut self, occurrence: Occurrence, identity: IdentityId) {
        if self.entries.len() <= identity.index() {
            self.entries.resize_with(identity.index() + 1, IndexEntry::default);
        }
        self.entries[identity.index()].push(occurrence);
        self.positions
            .entry(occurrence.file)
            .or_default()
            .push((occurrence.range, identity, occurrence.role));
        self.occurrence_count += 1;
    }

    /// Seal the index: verify the span invariant and freeze the lookup
    /// structures. The identity arena comes from the resolver that assigned
    /// the ids fed to [`IndexBuilder::put`].
    pub fn seal(mut self, identities: Vec<Identity>) -> Result<XrefIndex, BuildError> {
        self.entries
            .resize_with(identities.len().max(self.entries.len()), IndexEntry::default);

        let paths_by_id: Vec<Name> = self.files.values().map(|f| f.path.clone()).collect();

        // Sort per-file position tables and verify the non-overlap
        // invariant while the neighbours are adjacent.
        for (file, table) in self.positions.iter_mut() {
            table.sort_by_key(|(range, _, _)| (range.start(), range.end()));
            for pair in table.windows(2) {
                let (first, second) = (pair[0].0, pair[1].0);
                if first.end() > second.start() {
                    return Err(BuildError::OverlappingSpans {
                        file: paths_by_id
                            .get(file.index())
                            .map(|p| p.to_string())
                            .unwrap_or_default(),
                        first,
                        second,
                    });
                }
            }
        }

        // Reverse candidate map: concrete identity -> dependent uses.
        let mut dependents: FxHashMap<IdentityId, Vec<IdentityId>> = FxHashMap::default();
        for (index, identity) in identities.iter().enumerate() {
            if identity.kind == IdentityKind::DependentUse {
                for &candidate in &identity.candidates {
                    dependents
                        .entry(candidate)
                        .or_default()
                        .push(IdentityId::new(index));
                }
            }
        }

        // Reference counts include references held by dependent uses.
        let ref_counts: Vec<u32> = (0..identities.len())
            .map(|index| {
                let own = self.entries[index].references.len();
                let via_dependents: usize = dependents
                    .get(&IdentityId::new(index))
                    .map(|uses| {
                        uses.iter()
                            .map(|d| self.entries[d.index()].references.len())
                            .sum()
                    })
                    .unwrap_or(0);
                (own + via_dependents) as u32
            })
            .collect();

        // Anchor occurrence per identity, for deterministic search order.
        let anchors: Vec<Option<(Name, TextSize)>> = self
            .entries
            .iter()
            .map(|entry| {
                entry
                    .iter()
                    .map(|occ| (paths_by_id[occ.file.index()].clone(), occ.range.start()))
                    .min_by(|a, b| (a.0.as_ref(), a.1).cmp(&(b.0.as_ref(), b.1)))
            })
            .collect();

        let names_lower: Vec<String> = identities
            .iter()
            .map(|identity| identity.name.to_lowercase())
            .collect();

        debug!(
            files = self.files.len(),
            occurrences = self.occurrence_count,
            identities = identities.len(),
            "sealed cross-reference index"
        );

        Ok(XrefIndex {
            files: self.files,
            paths_by_id,
            identities,
            entries: self.entries,
            positions: self.positions,
            names_lower,
            anchors,
            dependents,
            ref_counts,
            occurrence_count: self.occurrence_count,
            empty_entry: IndexEntry::default(),
        })
    }
}

// ============================================================================
// SEALED PHASE
// ============================================================================

/// The sealed, query-ready cross-reference index.
#[derive(Debug, Default)]
pub struct XrefIndex {
    files: IndexMap<Name, FileRecord>,
    paths_by_id: Vec<Name>,
    identities: Vec<Identity>,
    entries: Vec<IndexEntry>,
    /// Per file, occurrences sorted by span start (non-overlapping).
    positions: FxHashMap<FileId, Vec<(TextRange, IdentityId, Role)>>,
    /// Lowercase simple names, parallel to `identities`.
    names_lower: Vec<String>,
    /// First occurrence of each identity in (file path, offset) order.
    anchors: Vec<Option<(Name, TextSize)>>,
    /// Concrete identity -> dependent uses that carry it as a candidate.
    dependents: FxHashMap<IdentityId, Vec<IdentityId>>,
    ref_counts: Vec<u32>,
    occurrence_count: usize,
    empty_entry: IndexEntry,
}

impl XrefIndex {
    /// An index over nothing; every query returns empty.
    pub fn empty() -> Self {
        Self::default()
    }

    // ==================== Identities ====================

    pub fn identity(&self, id: IdentityId) -> &Identity {
        &self.identities[id.index()]
    }

    pub fn identities(&self) -> impl Iterator<Item = (IdentityId, &Identity)> {
        self.identities
            .iter()
            .enumerate()
            .map(|(index, identity)| (IdentityId::new(index), identity))
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    /// Dependent uses carrying the given identity as a candidate.
    pub fn dependent_uses(&self, id: IdentityId) -> &[IdentityId] {
        self.dependents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of references to this identity, counting references held by
    /// dependent uses.
    pub fn ref_count(&self, id: IdentityId) -> u32 {
        self.ref_counts.get(id.index()).copied().unwrap_or(0)
    }

    // ==================== Files ====================

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get_index_of(path).map(|i| FileId::new(i as u32))
    }

    pub fn file(&self, id: FileId) -> Option<&FileRecord> {
        self.files.get_index(id.index()).map(|(_, record)| record)
    }

    pub fn file_path(&self, id: FileId) -> Option<&str> {
        self.paths_by_id.get(id.index()).map(Name::as_ref)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    // ==================== Lookups ====================

    /// Forward lookup: the occurrence buckets of an identity. Unknown
    /// identities get empty buckets, not an error.
    pub fn by_identity(&self, id: IdentityId) -> &IndexEntry {
        self.entries.get(id.index()).unwrap_or(&self.empty_entry)
    }

    /// Reverse lookup: the identity whose occurrence span contains the
    /// offset, if any.
    pub fn by_position(&self, file: FileId, offset: TextSize) -> Option<IdentityId> {
        self.occurrence_at(file, offset).map(|hit| hit.identity)
    }

    /// Reverse lookup returning the full occurrence under the offset.
    pub fn occurrence_at(&self, file: FileId, offset: TextSize) -> Option<PositionHit> {
        let table = self.positions.get(&file)?;
        let slot = table
            .partition_point(|(range, _, _)| range.start() <= offset)
            .checked_sub(1)?;
        let (range, identity, role) = table[slot];
        range.contains(offset).then_some(PositionHit {
            identity,
            range,
            role,
        })
    }

    /// Identities whose simple name matches the query (case-insensitive),
    /// ordered by their anchor occurrence: file path (lexicographic), then
    /// starting offset. Identities with no occurrences sort last.
    pub fn by_name(&self, query: &str, mode: SearchMode) -> Vec<IdentityId> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<IdentityId> = self
            .names_lower
            .iter()
            .enumerate()
            .filter(|(_, name)| name_matches(name, &query_lower, mode))
            .map(|(index, _)| IdentityId::new(index))
            .collect();

        matches.sort_by(|&a, &b| {
            let key = |id: IdentityId| {
                self.anchors[id.index()]
                    .as_ref()
                    .map(|(path, offset)| (path.as_ref(), *offset))
            };
            match (key(a), key(b)) {
                (Some(ka), Some(kb)) => ka.cmp(&kb).then(a.cmp(&b)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.cmp(&b),
            }
        });
        matches
    }
}

fn name_matches(name_lower: &str, query_lower: &str, mode: SearchMode) -> bool {
    match mode {
        SearchMode::Exact => name_lower == query_lower,
        SearchMode::Prefix => name_lower.starts_with(query_lower),
        SearchMode::Substring => name_lower.contains(query_lower),
    }
}
