//! The identity resolver: declaration handles → canonical identities.
//!
//! Resolution is a pure get-or-insert into an arena keyed by the canonical
//! key string. The resolver is fed by the single-writer merge phase; once
//! the build completes the arena moves into the sealed index.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::base::{Interner, Name};
use crate::unit::DeclRef;

use super::{Identity, IdentityId, IdentityKind};

/// Where an occurrence was found, for the synthetic-identity fallback:
/// file path, 1-based line, and the identifier token text.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticOrigin<'a> {
    pub file: &'a str,
    pub line: u32,
    pub token: &'a str,
}

/// Canonicalization table mapping declaration handles to stable identities.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    interner: Interner,
    by_key: FxHashMap<Name, IdentityId>,
    arena: Vec<Identity>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a declaration handle to its canonical identity.
    ///
    /// Handles with no resolvable scope chain (empty path) downgrade to a
    /// synthetic identity keyed to the occurrence's file + line; everything
    /// else is keyed by scope chain + argument binding + signature.
    pub fn resolve(&mut self, decl: &DeclRef, origin: SyntheticOrigin<'_>) -> IdentityId {
        if decl.path.is_empty() {
            return self.resolve_synthetic(origin);
        }

        let qualified = qualified_name(decl);
        let key = match decl.signature.as_deref() {
            Some(signature) => format!("{qualified}{signature}"),
            None => qualified.clone(),
        };
        let key = self.interner.intern_string(key);
        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }

        let kind = if !decl.template_args.is_empty() {
            IdentityKind::Instantiation
        } else if decl.signature.is_some() {
            IdentityKind::Callable
        } else {
            IdentityKind::Plain
        };
        // Non-empty path checked above.
        let name = self
            .interner
            .intern(decl.name().unwrap_or_default());
        let qualified = self.interner.intern_string(qualified);

        self.insert(Identity {
            key,
            name,
            qualified,
            kind,
            candidates: Vec::new(),
            confident: true,
        })
    }

    /// Resolve a dependent use to an identity carrying its candidate set.
    ///
    /// Identical candidate sets share one identity, so repeated uses of the
    /// same dependent expression accumulate in one bucket.
    pub fn resolve_dependent(&mut self, candidates: Vec<IdentityId>, token: &str) -> IdentityId {
        debug_assert!(candidates.len() > 1);
        let mut key = String::from("use(");
        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 {
                key.push('|');
            }
            key.push_str(&self.arena[candidate.index()].key);
        }
        key.push(')');

        let key = self.interner.intern_string(key);
        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }

        let name = self.interner.intern(token);
        self.insert(Identity {
            key,
            name: name.clone(),
            qualified: name,
            kind: IdentityKind::DependentUse,
            candidates,
            confident: true,
        })
    }

    fn resolve_synthetic(&mut self, origin: SyntheticOrigin<'_>) -> IdentityId {
        let key = self
            .interner
            .intern_string(format!("{}:{}:{}", origin.file, origin.line, origin.token));
        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }

        warn!(
            file = origin.file,
            line = origin.line,
            token = origin.token,
            "declaration without resolvable scope, indexing under synthetic identity"
        );
        let name = self.interner.intern(origin.token);
        self.insert(Identity {
            key: key.clone(),
            name,
            qualified: key,
            kind: IdentityKind::Synthetic,
            candidates: Vec::new(),
            confident: false,
        })
    }

    fn insert(&mut self, identity: Identity) -> IdentityId {
        let id = IdentityId::new(self.arena.len());
        self.by_key.insert(identity.key.clone(), id);
        self.arena.push(identity);
        id
    }

    pub fn get(&self, id: IdentityId) -> &Identity {
        &self.arena[id.index()]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Consume the resolver, yielding the identity arena for sealing.
    pub fn into_arena(self) -> Vec<Identity> {
        self.arena
    }
}

/// Qualified display name: scope chain with the template-argument binding
/// attached to the innermost enclosing scope (or to the name itself for a
/// top-level template), e.g. `S<int>::f` or `foo<c1>`.
fn qualified_name(decl: &DeclRef) -> String {
    let segments = decl.path.segments();
    let mut out = String::new();
    let binding_at = if decl.template_args.is_empty() {
        usize::MAX
    } else if segments.len() >= 2 {
        segments.len() - 2
    } else {
        0
    };

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(segment);
        if i == binding_at {
            out.push('<');
            for (j, arg) in decl.template_args.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(arg);
            }
            out.push('>');
        }
    }
    out
}
