//! Query engine: read-only, side-effect-free queries over a sealed index.
//!
//! Two operations cover the browser surface: [`resolve_at`] (click
//! navigation) and [`search`] (name search), plus [`find_references`] and
//! the [`AnalysisHost`] state wrapper. Results are presentation-ready:
//! 1-based line numbers matching source anchors, display names, and
//! containing-line text.

mod analysis;
mod nav;
mod references;
mod search;

pub use analysis::{Analysis, AnalysisHost};
pub use nav::{NavResult, NavTarget, UsagesView, resolve_at};
pub use references::{ReferenceResult, find_references};
pub use search::{
    MAX_MATCHES, RankedHit, RankedTarget, SearchHit, SearchOptions, search, search_ranked,
};

// Search modes live on the index itself; re-exported here for callers.
pub use crate::index::SearchMode;
