//! Resolve-at-position: click navigation.
//!
//! Clicking a reference or declaration navigates to the definition side;
//! clicking a definition shows the declarations + references view. A click
//! that resolves to several targets (an identity with multiple definitions,
//! or a dependent use spanning several instantiations) yields the multiple-
//! definitions listing instead of a single jump.

use text_size::{TextRange, TextSize};

use crate::base::{FileId, Name};
use crate::identity::{IdentityId, IdentityKind};
use crate::index::{Occurrence, XrefIndex};
use crate::unit::Role;

/// A navigation target location.
#[derive(Clone, Debug, PartialEq)]
pub struct NavTarget {
    /// Path of the file containing the target.
    pub file: Name,
    /// 1-based line number, as used in source anchors.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// Byte span of the target occurrence.
    pub range: TextRange,
    /// Qualified display name of the target identity.
    pub name: Name,
    /// Which bucket the target came from.
    pub role: Role,
}

/// The declarations + references view shown when a definition is clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct UsagesView {
    /// Qualified display name of the clicked identity.
    pub name: Name,
    pub declarations: Vec<NavTarget>,
    pub references: Vec<NavTarget>,
}

/// Result of a resolve-at-position request.
#[derive(Clone, Debug, PartialEq)]
pub enum NavResult {
    /// No occurrence recorded at the position. A valid outcome, not an
    /// error.
    NoTarget,
    /// A single navigation target.
    Jump(NavTarget),
    /// Several targets: the multiple-definitions listing.
    Multiple(Vec<NavTarget>),
    /// The click landed on a definition: show its declarations and
    /// references.
    Usages(UsagesView),
}

impl NavResult {
    pub fn is_no_target(&self) -> bool {
        matches!(self, NavResult::NoTarget)
    }

    /// All targets carried by this result, in order.
    pub fn targets(&self) -> &[NavTarget] {
        match self {
            NavResult::NoTarget | NavResult::Usages(_) => &[],
            NavResult::Jump(target) => std::slice::from_ref(target),
            NavResult::Multiple(targets) => targets,
        }
    }
}

/// Resolve the occurrence at the given position to navigation targets.
pub fn resolve_at(index: &XrefIndex, file: FileId, offset: TextSize) -> NavResult {
    let Some(hit) = index.occurrence_at(file, offset) else {
        return NavResult::NoTarget;
    };

    match hit.role {
        Role::Definition => {
            let definitions = index.by_identity(hit.identity).definitions.clone();
            if definitions.len() > 1 {
                let targets = to_targets(
                    index,
                    definitions.into_iter().map(|occ| (occ, hit.identity)),
                );
                NavResult::Multiple(targets)
            } else {
                NavResult::Usages(usages_view(index, hit.identity))
            }
        }
        Role::Declaration | Role::Reference => {
            let mut found = navigation_occurrences(index, hit.identity);
            // Navigating a declaration to itself is useless; show its
            // usages instead when nothing else exists.
            found.retain(|(occ, _)| !(occ.file == file && occ.range == hit.range));

            match found.len() {
                0 if hit.role == Role::Declaration => {
                    NavResult::Usages(usages_view(index, hit.identity))
                }
                0 => NavResult::NoTarget,
                1 => match to_targets(index, found).pop() {
                    Some(target) => NavResult::Jump(target),
                    None => NavResult::NoTarget,
                },
                _ => NavResult::Multiple(to_targets(index, found)),
            }
        }
    }
}

/// The definition-side occurrences a click on this identity navigates to:
/// its definitions, or its declarations when it has none. Dependent uses
/// fan out over their candidates in order; a concrete identity with no
/// recorded sites of its own fans in through the dependent uses that carry
/// it (an instantiation's definition site is the shared template body).
fn navigation_occurrences(
    index: &XrefIndex,
    id: IdentityId,
) -> Vec<(Occurrence, IdentityId)> {
    let identity = index.identity(id);
    let mut found: Vec<(Occurrence, IdentityId)> = Vec::new();

    if identity.kind == IdentityKind::DependentUse {
        for &candidate in &identity.candidates {
            found.extend(direct_targets(index, candidate));
        }
    } else {
        found = direct_targets(index, id);
        if found.is_empty() {
            for &dependent in index.dependent_uses(id) {
                found.extend(direct_targets(index, dependent));
            }
        }
    }

    dedupe_occurrences(&mut found);
    found
}

/// An identity's own definition occurrences, or its first declaration when
/// it has no definition.
fn direct_targets(index: &XrefIndex, id: IdentityId) -> Vec<(Occurrence, IdentityId)> {
    let entry = index.by_identity(id);
    if entry.definitions.is_empty() {
        entry
            .declarations
            .iter()
            .take(1)
            .map(|occ| (*occ, id))
            .collect()
    } else {
        entry.definitions.iter().map(|occ| (*occ, id)).collect()
    }
}

/// The declarations + references view of an identity.
///
/// References include occurrences held by dependent uses that carry the
/// identity as a candidate; for a dependent use, candidates contribute
/// their own declarations and references.
fn usages_view(index: &XrefIndex, id: IdentityId) -> UsagesView {
    let identity = index.identity(id);
    let entry = index.by_identity(id);

    let mut declarations: Vec<(Occurrence, IdentityId)> =
        entry.declarations.iter().map(|occ| (*occ, id)).collect();
    let mut references: Vec<(Occurrence, IdentityId)> =
        entry.references.iter().map(|occ| (*occ, id)).collect();

    if identity.kind == IdentityKind::DependentUse {
        for &candidate in &identity.candidates {
            let candidate_entry = index.by_identity(candidate);
            declarations.extend(
                candidate_entry
                    .declarations
                    .iter()
                    .map(|occ| (*occ, candidate)),
            );
            references.extend(
                candidate_entry
                    .references
                    .iter()
                    .map(|occ| (*occ, candidate)),
            );
        }
    } else {
        for &dependent in index.dependent_uses(id) {
            references.extend(
                index
                    .by_identity(dependent)
                    .references
                    .iter()
                    .map(|occ| (*occ, dependent)),
            );
        }
    }

    sort_occurrences(index, &mut declarations);
    sort_occurrences(index, &mut references);
    dedupe_occurrences(&mut declarations);
    dedupe_occurrences(&mut references);

    UsagesView {
        name: identity.qualified.clone(),
        declarations: to_targets(index, declarations),
        references: to_targets(index, references),
    }
}

pub(super) fn sort_occurrences(index: &XrefIndex, occurrences: &mut Vec<(Occurrence, IdentityId)>) {
    occurrences.sort_by(|(a, _), (b, _)| {
        let path = |occ: &Occurrence| index.file_path(occ.file).unwrap_or_default();
        path(a)
            .cmp(path(b))
            .then(a.range.start().cmp(&b.range.start()))
    });
}

/// Drop repeated (file, span) pairs, keeping the first.
pub(super) fn dedupe_occurrences(occurrences: &mut Vec<(Occurrence, IdentityId)>) {
    let mut seen: Vec<(FileId, TextRange)> = Vec::new();
    occurrences.retain(|(occ, _)| {
        let key = (occ.file, occ.range);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}

pub(super) fn to_targets(
    index: &XrefIndex,
    occurrences: impl IntoIterator<Item = (Occurrence, IdentityId)>,
) -> Vec<NavTarget> {
    occurrences
        .into_iter()
        .filter_map(|(occ, id)| nav_target(index, occ, id))
        .collect()
}

fn nav_target(index: &XrefIndex, occ: Occurrence, id: IdentityId) -> Option<NavTarget> {
    let record = index.file(occ.file)?;
    let position = record.line_index.line_col(occ.range.start());
    Some(NavTarget {
        file: record.path.clone(),
        line: position.line + 1,
        column: position.col + 1,
        range: occ.range,
        name: index.identity(id).qualified.clone(),
        role: occ.role,
    })
}
