//! Core domain types for interplay walks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one walk run (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Entry / KnowledgeBase
// ---------------------------------------------------------------------------

/// A single accumulated entry: a header line plus its ordered body lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The header text (trimmed).
    pub header: String,
    /// Body lines in the order they were encountered (trimmed).
    pub body: Vec<String>,
}

impl Entry {
    /// Create an entry with an empty body.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: Vec::new(),
        }
    }
}

/// The ordered, append-only collection of entries accumulated during a walk.
///
/// Single writer: the active visit. Entries preserve the relative order in
/// which their headers were encountered across all visited documents. The
/// "current entry" is an index, never a second owner.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
    current: Option<usize>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// A header line starts a new entry, appended at the end, and makes it
    /// the current entry. Always succeeds.
    pub fn on_header(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::new(text));
        self.current = Some(self.entries.len() - 1);
    }

    /// A continuation line is appended to the current entry's body. With no
    /// current entry the line is silently dropped — there is nothing to
    /// attach it to, and that is intentional, not an error.
    pub fn on_continuation(&mut self, text: impl Into<String>) {
        if let Some(idx) = self.current {
            self.entries[idx].body.push(text.into());
        }
    }

    /// All accumulated entries, in discovery order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of accumulated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the knowledge base, yielding its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Visit records
// ---------------------------------------------------------------------------

/// Outcome of one document visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// All lines classified and applied.
    Visited,
    /// The document could not be located; the branch is abandoned.
    Missing,
    /// Retrieval failed with an underlying I/O fault; treated like missing
    /// for traversal purposes.
    Faulted,
}

/// Per-document record kept in the walk summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Document name as referenced.
    pub name: String,
    /// How the visit ended.
    pub status: VisitStatus,
    /// Number of lines classified (0 for missing/faulted documents).
    pub lines: usize,
    /// SHA-256 hash of the document content, for visited documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    /// When the visit completed.
    pub visited_at: DateTime<Utc>,
}

/// Summary of a completed walk.
#[derive(Debug, Clone)]
pub struct WalkSummary {
    /// Identifier for this run.
    pub run_id: RunId,
    /// Entry-point document name.
    pub entry: String,
    /// Sentinel document name.
    pub sentinel: String,
    /// Per-document records, in visit order.
    pub visits: Vec<VisitRecord>,
    /// Documents fully processed.
    pub visited: usize,
    /// Documents referenced but absent.
    pub missing: usize,
    /// Documents whose retrieval faulted.
    pub faulted: usize,
    /// Scheduled visits skipped by the visited-set guard.
    pub skipped: usize,
    /// Whether the sentinel was successfully visited.
    pub sentinel_reached: bool,
    /// Total duration of the walk.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Notation knobs
// ---------------------------------------------------------------------------

/// The leading marker that makes a line a continuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indent {
    /// A single leading tab character.
    Tab,
    /// A run of exactly this many leading spaces.
    Spaces(usize),
}

impl Indent {
    /// Whether the raw (untrimmed) line carries this indent marker.
    pub fn is_indented(&self, raw: &str) -> bool {
        match self {
            Self::Tab => raw.starts_with('\t'),
            Self::Spaces(n) => *n > 0 && raw.chars().take(*n).filter(|c| *c == ' ').count() == *n,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Tab
    }
}

/// How header lines are recognized. Selected at configuration time, not
/// hardcoded — draft interpreters of the notation disagreed on this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// A non-blank, non-reference line with no indent marker is a header.
    Indentation,
    /// A non-blank, non-reference line whose trimmed text starts with this
    /// keyword is a header, independent of indentation.
    Keyword(String),
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::Indentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_roundtrip() {
        let id = RunId::new();
        let s = id.to_string();
        let parsed: RunId = s.parse().expect("parse RunId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn header_appends_and_becomes_current() {
        let mut kb = KnowledgeBase::new();
        kb.on_header("alpha");
        kb.on_continuation("step one");
        kb.on_header("beta");
        kb.on_continuation("step two");

        assert_eq!(kb.len(), 2);
        assert_eq!(kb.entries()[0].header, "alpha");
        assert_eq!(kb.entries()[0].body, vec!["step one"]);
        assert_eq!(kb.entries()[1].header, "beta");
        assert_eq!(kb.entries()[1].body, vec!["step two"]);
    }

    #[test]
    fn orphan_continuation_is_dropped() {
        let mut kb = KnowledgeBase::new();
        kb.on_continuation("floating detail");
        assert!(kb.is_empty());
    }

    #[test]
    fn body_preserves_order() {
        let mut kb = KnowledgeBase::new();
        kb.on_header("steps");
        for i in 1..=5 {
            kb.on_continuation(format!("line {i}"));
        }
        let body = &kb.entries()[0].body;
        assert_eq!(body.len(), 5);
        assert_eq!(body[0], "line 1");
        assert_eq!(body[4], "line 5");
    }

    #[test]
    fn indent_markers() {
        assert!(Indent::Tab.is_indented("\tdetail"));
        assert!(!Indent::Tab.is_indented("header"));
        assert!(Indent::Spaces(4).is_indented("    detail"));
        assert!(!Indent::Spaces(4).is_indented("  shallow"));
        assert!(!Indent::Spaces(0).is_indented("anything"));
    }

    #[test]
    fn entry_serialization_shape() {
        let entry = Entry {
            header: "alpha".into(),
            body: vec!["step one".into()],
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"header":"alpha","body":["step one"]}"#);
    }

    #[test]
    fn notation_knobs_deserialize_from_toml() {
        #[derive(serde::Deserialize)]
        struct Probe {
            indent: Indent,
            policy: HeaderPolicy,
        }

        let probe: Probe = toml::from_str(
            r#"
indent = "tab"
policy = "indentation"
"#,
        )
        .expect("parse unit variants");
        assert_eq!(probe.indent, Indent::Tab);
        assert_eq!(probe.policy, HeaderPolicy::Indentation);

        let probe: Probe = toml::from_str(
            r#"
indent = { spaces = 2 }
policy = { keyword = "when" }
"#,
        )
        .expect("parse parameterized variants");
        assert_eq!(probe.indent, Indent::Spaces(2));
        assert_eq!(probe.policy, HeaderPolicy::Keyword("when".into()));
    }
}
