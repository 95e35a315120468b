//! Name search over the sealed index.
//!
//! [`search`] flattens the occurrences of every identity whose name matches
//! the query and orders them by file path, then line, then column, which is
//! the deterministic order the results page renders. [`search_ranked`] is the
//! definition-first variant: definitions are scored by how often they are
//! referenced and how much of their name the query covers, and file paths
//! matching the query as a suffix are surfaced alongside.
//!
//! Matching is case-insensitive and applies to symbol names only; full-text
//! matches (e.g. comment text containing the query) belong to a separate
//! full-text index, not this one.

use text_size::TextRange;

use crate::base::Name;
use crate::identity::IdentityId;
use crate::index::{Occurrence, SearchMode, XrefIndex};
use crate::unit::Role;

/// Result cap, matching the original service.
pub const MAX_MATCHES: usize = 100;

/// Knobs for a search request.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub mode: SearchMode,
    pub max_matches: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::Substring,
            max_matches: MAX_MATCHES,
        }
    }
}

/// One occurrence in a search result list.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Path of the file containing the occurrence.
    pub file: Name,
    /// 1-based line number.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// Role of the occurrence.
    pub role: Role,
    /// Qualified display name of the matched identity.
    pub name: Name,
    /// Byte range within `name` that the query matched, for highlighting.
    pub match_range: TextRange,
    /// Text of the containing source line.
    pub line_text: String,
    pub identity: IdentityId,
}

/// Search all occurrences of all matching identities.
///
/// Results are flattened across identities and sorted by (file path, line,
/// column), capped at `options.max_matches`.
pub fn search(index: &XrefIndex, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
    let query_lower = query.to_lowercase();
    let mut hits: Vec<SearchHit> = Vec::new();

    for id in index.by_name(query, options.mode) {
        let identity = index.identity(id);
        let match_range = name_match_range(&identity.qualified, &query_lower);
        for occurrence in index.by_identity(id).iter() {
            if let Some(hit) = search_hit(index, *occurrence, id, match_range) {
                hits.push(hit);
            }
        }
    }

    hits.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
    });
    hits.truncate(options.max_matches);
    hits
}

/// A ranked search result: a scored definition or a file-path match.
#[derive(Debug, Clone, PartialEq)]
pub enum RankedTarget {
    Symbol(SearchHit),
    File { path: Name },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedHit {
    pub score: f32,
    pub target: RankedTarget,
}

/// Definition-first ranked search.
///
/// Each identity with a definition whose qualified name contains the query
/// (overlapping the simple-name part) scores
/// `ref_count × matched_len ÷ simple_name_len`; most-referenced, best-
/// covered definitions come first. Files whose path ends with the query are
/// appended with score 0. Capped at `options.max_matches`.
pub fn search_ranked(index: &XrefIndex, query: &str, options: &SearchOptions) -> Vec<RankedHit> {
    let query_lower = query.to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<RankedHit> = Vec::new();
    for (id, identity) in index.identities() {
        let Some(&first_definition) = index.by_identity(id).definitions.first() else {
            continue;
        };
        let qualified_lower = identity.qualified.to_lowercase();
        let Some(found) = qualified_lower.find(&query_lower) else {
            continue;
        };
        let simple_begin = qualified_lower.rfind("::").map(|i| i + 2).unwrap_or(0);
        let match_end = found + query_lower.len();
        if match_end < simple_begin {
            continue;
        }
        let match_begin = found.max(simple_begin);
        let simple_len = (qualified_lower.len() - simple_begin).max(1);
        let score = index.ref_count(id) as f32 * (match_end - match_begin) as f32
            / simple_len as f32;

        let match_range = TextRange::new(
            (match_begin as u32).into(),
            (match_end as u32).into(),
        );
        if let Some(hit) = search_hit(index, first_definition, id, match_range) {
            hits.push(RankedHit {
                score,
                target: RankedTarget::Symbol(hit),
            });
        }
    }

    for record in index.files() {
        if record.path.to_lowercase().ends_with(&query_lower) {
            hits.push(RankedHit {
                score: 0.0,
                target: RankedTarget::File {
                    path: record.path.clone(),
                },
            });
        }
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| ranked_order_key(a).cmp(&ranked_order_key(b)))
    });
    hits.truncate(options.max_matches);
    hits
}

fn ranked_order_key(hit: &RankedHit) -> (Name, u32, u32) {
    match &hit.target {
        RankedTarget::Symbol(hit) => (hit.file.clone(), hit.line, hit.column),
        RankedTarget::File { path } => (path.clone(), 0, 0),
    }
}

/// Byte range the query matched within a qualified display name, anchored
/// to the simple-name part.
fn name_match_range(qualified: &str, query_lower: &str) -> TextRange {
    let simple_begin = qualified.rfind("::").map(|i| i + 2).unwrap_or(0);
    let qualified_lower = qualified.to_lowercase();
    let begin = match qualified_lower
        .get(simple_begin..)
        .and_then(|simple| simple.find(query_lower))
    {
        Some(relative) => simple_begin + relative,
        None => simple_begin,
    };
    TextRange::new(
        (begin as u32).into(),
        ((begin + query_lower.len()).min(qualified.len()) as u32).into(),
    )
}

fn search_hit(
    index: &XrefIndex,
    occurrence: Occurrence,
    id: IdentityId,
    match_range: TextRange,
) -> Option<SearchHit> {
    let record = index.file(occurrence.file)?;
    let position = record.line_index.line_col(occurrence.range.start());
    let line_text = record
        .line_index
        .line_text(&record.text, position.line)
        .unwrap_or_default()
        .to_string();
    Some(SearchHit {
        file: record.path.clone(),
        line: position.line + 1,
        column: position.col + 1,
        role: occurrence.role,
        name: index.identity(id).qualified.clone(),
        match_range,
        line_text,
        identity: id,
    })
}
