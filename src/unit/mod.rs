//! Resolved-unit event model — the boundary to the external front-end.
//!
//! The indexer does not parse source text. An external compiler-derived
//! front-end walks its resolved AST and reports, per source file, a stream
//! of [`OccurrenceEvent`]s (identifier occurrences with resolved-declaration
//! handles) plus the template [`Instantiation`]s it saw. A [`SourceUnit`]
//! bundles one file's text with that stream.

mod decl;

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextRange;

pub use decl::{DeclRef, ScopePath};

/// Syntactic role of an identifier occurrence.
///
/// A node introducing a body/initializer is a `Definition`; one introducing
/// only a type/signature is a `Declaration`; anything else is a `Reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Definition,
    Declaration,
    Reference,
}

impl Role {
    pub fn is_definition(self) -> bool {
        matches!(self, Role::Definition)
    }

    pub fn is_declaration(self) -> bool {
        matches!(self, Role::Declaration)
    }

    pub fn is_reference(self) -> bool {
        matches!(self, Role::Reference)
    }

    /// Merge two role hints for one span: a definition subsumes a
    /// declaration of the same entity (inline member definitions), and any
    /// non-reference hint outranks a reference.
    pub fn merged(self, other: Role) -> Role {
        self.min(other)
    }

    /// Get a display label for this role.
    pub fn display(self) -> &'static str {
        match self {
            Role::Definition => "definition",
            Role::Declaration => "declaration",
            Role::Reference => "reference",
        }
    }
}

/// One identifier occurrence reported by the front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceEvent {
    /// Byte span of the identifier token within the unit text.
    pub range: TextRange,
    /// Role hint from the front-end.
    pub role: Role,
    /// Resolved-declaration handle; `None` means the front-end could not
    /// resolve the occurrence, and the collector drops it.
    pub target: Option<DeclRef>,
    /// The innermost uninstantiated template body enclosing this event,
    /// if any. Required for dependent targets to be re-attributed per
    /// instantiation.
    pub template: Option<ScopePath>,
}

impl OccurrenceEvent {
    /// Create a resolved occurrence event.
    pub fn new(range: TextRange, role: Role, target: DeclRef) -> Self {
        Self {
            range,
            role,
            target: Some(target),
            template: None,
        }
    }

    /// Create an unresolved occurrence event (dropped at collection).
    pub fn unresolved(range: TextRange, role: Role) -> Self {
        Self {
            range,
            role,
            target: None,
            template: None,
        }
    }

    /// Mark this event as occurring inside the body of the given
    /// uninstantiated template.
    pub fn in_template(mut self, template: ScopePath) -> Self {
        self.template = Some(template);
        self
    }
}

/// Whether an instantiation point was written out (`template struct S<int>;`)
/// or triggered by use (`foo<c1>()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstantiationKind {
    Explicit,
    Implicit,
}

/// One template instantiation observed by the front-end.
///
/// `resolutions` records, for each dependent occurrence span inside the
/// template body, the concrete target that span resolves to under this
/// argument binding. Spans refer to the file holding the template body.
#[derive(Debug, Clone, PartialEq)]
pub struct Instantiation {
    pub template: ScopePath,
    pub args: Vec<SmolStr>,
    pub kind: InstantiationKind,
    pub resolutions: Vec<(TextRange, DeclRef)>,
}

impl Instantiation {
    pub fn new<I, A>(template: ScopePath, args: I, kind: InstantiationKind) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<SmolStr>,
    {
        Self {
            template,
            args: args.into_iter().map(Into::into).collect(),
            kind,
            resolutions: Vec::new(),
        }
    }

    /// Record the concrete target of a dependent occurrence span under this
    /// instantiation.
    pub fn resolve(mut self, range: TextRange, target: DeclRef) -> Self {
        self.resolutions.push((range, target));
        self
    }

    /// Look up the concrete target for a dependent occurrence span.
    pub fn resolution_for(&self, range: TextRange) -> Option<&DeclRef> {
        self.resolutions
            .iter()
            .find(|(r, _)| *r == range)
            .map(|(_, target)| target)
    }
}

/// One resolved source unit: a file's text plus the front-end's occurrence
/// stream for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    /// Corpus-relative file path.
    pub path: Arc<str>,
    /// Full source text, used for line mapping and search snippets.
    pub text: Arc<str>,
    pub occurrences: Vec<OccurrenceEvent>,
    pub instantiations: Vec<Instantiation>,
}

impl SourceUnit {
    pub fn new(path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            occurrences: Vec::new(),
            instantiations: Vec::new(),
        }
    }

    /// Append an occurrence event.
    pub fn add(&mut self, event: OccurrenceEvent) {
        self.occurrences.push(event);
    }

    /// Append an instantiation record.
    pub fn add_instantiation(&mut self, instantiation: Instantiation) {
        self.instantiations.push(instantiation);
    }
}
