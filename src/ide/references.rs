//! Find references: all occurrences of the identity under a position.

use text_size::TextSize;

use crate::base::FileId;
use crate::identity::{IdentityId, IdentityKind};
use crate::index::{Occurrence, XrefIndex};

use super::nav::NavTarget;

/// Result of a find-references request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceResult {
    /// All locations found, in (file, offset) order.
    pub locations: Vec<NavTarget>,
}

impl ReferenceResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }
}

/// Find all occurrences of the identity at the given position.
///
/// References held by dependent uses count as references to each of their
/// candidates; clicking a dependent use gathers its candidates'
/// occurrences. With `include_declaration`, definition and declaration
/// sites are included as well.
pub fn find_references(
    index: &XrefIndex,
    file: FileId,
    offset: TextSize,
    include_declaration: bool,
) -> ReferenceResult {
    let Some(hit) = index.occurrence_at(file, offset) else {
        return ReferenceResult::empty();
    };

    let identity = index.identity(hit.identity);
    let targets: Vec<IdentityId> = if identity.kind == IdentityKind::DependentUse {
        identity.candidates.clone()
    } else {
        vec![hit.identity]
    };

    let mut found: Vec<(Occurrence, IdentityId)> = Vec::new();
    for &target in &targets {
        let entry = index.by_identity(target);
        if include_declaration {
            found.extend(entry.definitions.iter().map(|occ| (*occ, target)));
            found.extend(entry.declarations.iter().map(|occ| (*occ, target)));
        }
        found.extend(entry.references.iter().map(|occ| (*occ, target)));
        for &dependent in index.dependent_uses(target) {
            found.extend(
                index
                    .by_identity(dependent)
                    .references
                    .iter()
                    .map(|occ| (*occ, dependent)),
            );
        }
    }

    super::nav::sort_occurrences(index, &mut found);
    super::nav::dedupe_occurrences(&mut found);

    ReferenceResult {
        locations: super::nav::to_targets(index, found),
    }
}
