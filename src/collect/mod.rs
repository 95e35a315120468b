//! Occurrence collection — the first pass over resolved units.
//!
//! [`collect_unit`] walks one unit's event stream and produces an ordered
//! sequence of collected occurrences:
//!
//! - unresolved events and events with malformed spans are skipped, never a
//!   pass failure;
//! - byte-identical spans are coalesced: an inline member definition
//!   subsumes its declaration, and coincident events with *different*
//!   targets (the range-for `:` resolving to both `begin` and `end`) become
//!   one multi-target occurrence;
//! - events inside an uninstantiated template body with dependent targets
//!   are emitted as [`OccurrenceTargets::Dependent`] and re-attributed at
//!   merge time against the corpus-wide instantiation table.
//!
//! The pass has no side effects beyond the emitted records.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};
use tracing::trace;

use crate::unit::{DeclRef, Role, ScopePath, SourceUnit};

/// Targets of a collected occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum OccurrenceTargets {
    /// One or more concrete targets. More than one means coincident events
    /// with distinct targets were coalesced into a candidate set.
    Resolved(Vec<DeclRef>),
    /// A dependent target inside a template body, pending re-attribution
    /// once every instantiation in the corpus is known.
    Dependent {
        primary: DeclRef,
        template: ScopePath,
    },
}

/// One occurrence surviving collection, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedOccurrence {
    pub range: TextRange,
    pub role: Role,
    pub targets: OccurrenceTargets,
}

/// The collector's output for one source unit.
#[derive(Debug, Clone)]
pub struct UnitCollection {
    pub path: Arc<str>,
    pub occurrences: Vec<CollectedOccurrence>,
    /// Events skipped for missing targets or malformed spans.
    pub dropped: usize,
}

/// Collect one resolved source unit into an ordered occurrence sequence.
pub fn collect_unit(unit: &SourceUnit) -> UnitCollection {
    let text_len = TextSize::of(unit.text.as_ref());
    let mut occurrences: Vec<CollectedOccurrence> = Vec::new();
    let mut by_span: FxHashMap<(TextSize, TextSize), usize> = FxHashMap::default();
    let mut dropped = 0usize;

    for event in &unit.occurrences {
        let Some(target) = event.target.as_ref() else {
            trace!(
                file = unit.path.as_ref(),
                span = ?event.range,
                "dropping unresolved occurrence"
            );
            dropped += 1;
            continue;
        };
        if event.range.is_empty() || event.range.end() > text_len {
            trace!(
                file = unit.path.as_ref(),
                span = ?event.range,
                "dropping occurrence with malformed span"
            );
            dropped += 1;
            continue;
        }

        let targets = match (&event.template, target.dependent) {
            (Some(template), true) => OccurrenceTargets::Dependent {
                primary: target.clone(),
                template: template.clone(),
            },
            _ => OccurrenceTargets::Resolved(vec![target.clone()]),
        };

        let key = (event.range.start(), event.range.end());
        match by_span.get(&key) {
            Some(&slot) => coalesce(&mut occurrences[slot], event.role, targets),
            None => {
                by_span.insert(key, occurrences.len());
                occurrences.push(CollectedOccurrence {
                    range: event.range,
                    role: event.role,
                    targets,
                });
            }
        }
    }

    // Event streams are not guaranteed to arrive in source order; the index
    // relies on discovery (file, then line) order downstream.
    occurrences.sort_by_key(|occ| (occ.range.start(), occ.range.end()));

    UnitCollection {
        path: Arc::clone(&unit.path),
        occurrences,
        dropped,
    }
}

/// Fold a coincident event into an already-collected occurrence.
fn coalesce(existing: &mut CollectedOccurrence, role: Role, targets: OccurrenceTargets) {
    existing.role = existing.role.merged(role);
    match (&mut existing.targets, targets) {
        (OccurrenceTargets::Resolved(have), OccurrenceTargets::Resolved(new)) => {
            for target in new {
                if !have.contains(&target) {
                    have.push(target);
                }
            }
        }
        // A dependent record for a span already seen (or vice versa) keeps
        // the dependent form: re-attribution decides the final targets.
        (OccurrenceTargets::Resolved(_), dependent @ OccurrenceTargets::Dependent { .. }) => {
            existing.targets = dependent;
        }
        (OccurrenceTargets::Dependent { .. }, _) => {}
    }
}
