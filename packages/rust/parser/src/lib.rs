//! Line classifier for the interplay notation.
//!
//! Each line of a document is exactly one of:
//! - `Blank` — empty after trimming; skipped
//! - `Reference` — trimmed content ends with the notation's extension and
//!   names the next document to visit
//! - `Header` — opens a new entry (recognized per [`HeaderPolicy`])
//! - `Continuation` — any other non-blank line; attaches to the current entry
//!
//! Classification precedence: Reference wins over Header. A link line is
//! never a header, regardless of its indentation — early drafts of the
//! notation disagreed on this, so it is fixed here.

use interplayer_shared::{HeaderPolicy, Indent, WalkConfig};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Classification of a single raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming.
    Blank,
    /// Names another document to visit; carries the trimmed target name.
    Reference(String),
    /// Opens a new entry; carries the trimmed header text.
    Header(String),
    /// Attaches to the current entry; carries the trimmed text.
    Continuation(String),
}

/// Knobs for classification, usually derived from a [`WalkConfig`].
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Trailing suffix marking reference lines (e.g. `.interplay`).
    pub extension: String,
    /// Leading marker for continuation lines.
    pub indent: Indent,
    /// Header detection policy.
    pub header_policy: HeaderPolicy,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            extension: ".interplay".into(),
            indent: Indent::Tab,
            header_policy: HeaderPolicy::Indentation,
        }
    }
}

impl From<&WalkConfig> for ClassifyOptions {
    fn from(config: &WalkConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            indent: config.indent.clone(),
            header_policy: config.header_policy.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify one raw line of an interplay document.
pub fn classify(raw: &str, opts: &ClassifyOptions) -> LineKind {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    // Reference before header: link lines never open entries.
    if trimmed.ends_with(opts.extension.as_str()) {
        return LineKind::Reference(trimmed.to_string());
    }

    let is_header = match &opts.header_policy {
        HeaderPolicy::Indentation => !opts.indent.is_indented(raw),
        HeaderPolicy::Keyword(word) => trimmed.starts_with(word.as_str()),
    };

    if is_header {
        LineKind::Header(trimmed.to_string())
    } else {
        LineKind::Continuation(trimmed.to_string())
    }
}

/// Resolve a line to a reference target, if it is one.
///
/// Purely syntactic — whether the named document exists is the walker's
/// concern, not the resolver's.
pub fn resolve_reference(raw: &str, opts: &ClassifyOptions) -> Option<String> {
    match classify(raw, opts) {
        LineKind::Reference(target) => Some(target),
        _ => None,
    }
}
