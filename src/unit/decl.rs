//! Resolved-declaration handles.
//!
//! A [`DeclRef`] is what the front-end attaches to an occurrence: the
//! canonical scope chain of the declared entity (namespace/class nesting,
//! never textual aliasing), the overload signature for callables, and the
//! template-argument binding for members of instantiations.

use std::fmt;

use smol_str::SmolStr;

/// Canonical scope chain for a declaration, terminating in its simple name.
///
/// `["c1", "bar"]` denotes `bar` declared inside `c1`. An empty path means
/// the front-end could not determine any canonical scope; the identity
/// resolver downgrades such handles to synthetic identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopePath {
    segments: Vec<SmolStr>,
}

impl ScopePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The simple name: the last segment.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    /// The enclosing scope chain: all segments but the last.
    pub fn scope(&self) -> &[SmolStr] {
        match self.segments.len() {
            0 => &[],
            n => &self.segments[..n - 1],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Resolved-declaration handle attached to an occurrence event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclRef {
    /// Canonical scope chain ending in the simple name.
    pub path: ScopePath,
    /// Overload signature for callables, e.g. `"(int)"`. Two members with
    /// the same path but different signatures are distinct entities.
    pub signature: Option<SmolStr>,
    /// Template-argument binding of the innermost enclosing instantiation.
    /// Empty for non-template entities and for uninstantiated primaries.
    pub template_args: Vec<SmolStr>,
    /// True when the target still depends on enclosing template parameters
    /// and must be re-attributed per instantiation.
    pub dependent: bool,
}

impl DeclRef {
    pub fn new(path: ScopePath) -> Self {
        Self {
            path,
            signature: None,
            template_args: Vec::new(),
            dependent: false,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<SmolStr>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn instantiated<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<SmolStr>,
    {
        self.template_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn dependent(mut self) -> Self {
        self.dependent = true;
        self
    }

    /// The simple name of the target, if the path is non-empty.
    pub fn name(&self) -> Option<&str> {
        self.path.name()
    }
}
