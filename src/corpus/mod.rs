//! Corpus snapshots and the index build.
//!
//! A [`Corpus`] is a fixed snapshot of resolved source units. Building an
//! index is a batch operation: units are collected in parallel (independent
//! occurrence streams, no shared mutable state), then merged by a single
//! writer that materializes dependent occurrences against the corpus-wide
//! instantiation table, canonicalizes identities, and aggregates into the
//! builder. The same snapshot always seals into identical query results;
//! corpus changes rebuild the index wholesale.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::LineIndex;
use crate::collect::{CollectedOccurrence, OccurrenceTargets, UnitCollection, collect_unit};
use crate::identity::{IdentityId, IdentityResolver, SyntheticOrigin};
use crate::index::{BuildError, IndexBuilder, Occurrence, XrefIndex};
use crate::unit::{Instantiation, ScopePath, SourceUnit};

/// A fixed snapshot of resolved source units.
///
/// Units are keyed by path; adding a unit for an existing path replaces it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    units: IndexMap<Arc<str>, SourceUnit>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit to the snapshot, replacing any previous unit for the
    /// same path.
    pub fn add_unit(&mut self, unit: SourceUnit) {
        self.units.insert(unit.path.clone(), unit);
    }

    /// Remove the unit for a path. Returns true if one was present.
    pub fn remove_unit(&mut self, path: &str) -> bool {
        self.units.shift_remove(path).is_some()
    }

    pub fn units(&self) -> impl Iterator<Item = &SourceUnit> {
        self.units.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Build a sealed cross-reference index over this snapshot.
    ///
    /// Collection runs per-unit in parallel; canonicalization and
    /// aggregation happen in a sequential single-writer merge, so identity
    /// assignment is deterministic in corpus path order.
    pub fn build(&self) -> Result<XrefIndex, BuildError> {
        // Path order fixes FileId assignment, identity discovery order, and
        // instantiation discovery order.
        let mut ordered: Vec<&SourceUnit> = self.units.values().collect();
        ordered.sort_by(|a, b| a.path.cmp(&b.path));

        let collections: Vec<UnitCollection> =
            ordered.par_iter().map(|unit| collect_unit(unit)).collect();

        // Corpus-wide instantiation table, in unit order. Explicit
        // instantiations in one file re-attribute template bodies in
        // another.
        let mut instantiations: FxHashMap<&ScopePath, Vec<&Instantiation>> = FxHashMap::default();
        for unit in &ordered {
            for instantiation in &unit.instantiations {
                instantiations
                    .entry(&instantiation.template)
                    .or_default()
                    .push(instantiation);
            }
        }

        let mut resolver = IdentityResolver::new();
        let mut builder = IndexBuilder::new();
        let mut dropped = 0usize;

        for (unit, collection) in ordered.iter().zip(&collections) {
            dropped += collection.dropped;
            let file = builder.add_file(unit.path.clone(), unit.text.clone());
            let line_index = LineIndex::new(&unit.text);

            for occurrence in &collection.occurrences {
                let token = &unit.text[std::ops::Range::<usize>::from(occurrence.range)];
                let origin = SyntheticOrigin {
                    file: &unit.path,
                    line: line_index.line_col(occurrence.range.start()).line + 1,
                    token,
                };

                let targets =
                    resolve_targets(&mut resolver, &instantiations, occurrence, origin);
                let identity = match targets.len() {
                    1 => targets[0],
                    _ => resolver.resolve_dependent(targets, token),
                };
                builder.put(
                    Occurrence::new(file, occurrence.range, occurrence.role),
                    identity,
                );
            }
        }

        debug!(
            units = ordered.len(),
            dropped,
            identities = resolver.len(),
            "merged corpus occurrence streams"
        );
        builder.seal(resolver.into_arena())
    }
}

/// Resolve one collected occurrence to its concrete identities, in
/// discovery order and deduplicated. Dependent occurrences materialize
/// against every instantiation of their enclosing template; with none in
/// the corpus they fall back to the primary handle.
fn resolve_targets(
    resolver: &mut IdentityResolver,
    instantiations: &FxHashMap<&ScopePath, Vec<&Instantiation>>,
    occurrence: &CollectedOccurrence,
    origin: SyntheticOrigin<'_>,
) -> Vec<IdentityId> {
    let mut ids: Vec<IdentityId> = Vec::new();
    match &occurrence.targets {
        OccurrenceTargets::Resolved(targets) => {
            for target in targets {
                let id = resolver.resolve(target, origin);
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        OccurrenceTargets::Dependent { primary, template } => {
            for instantiation in instantiations.get(template).into_iter().flatten() {
                if let Some(target) = instantiation.resolution_for(occurrence.range) {
                    let id = resolver.resolve(target, origin);
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
            if ids.is_empty() {
                ids.push(resolver.resolve(primary, origin));
            }
        }
    }
    ids
}
