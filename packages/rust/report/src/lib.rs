//! Knowledge-base renderers.
//!
//! Two output shapes: a pretty text listing with an aligned indentation
//! gutter for body lines, and a JSON dump matching the notation's original
//! saturated output (an array of `{header, body}` objects). Both preserve
//! entry order and body-line order, and include every entry exactly once.

use tracing::debug;

use interplayer_shared::{Entry, InterplayerError, Result};

/// Render entries as a numbered text listing.
///
/// Headers are numbered right-aligned to the widest index so the body
/// gutter lines up across the whole report:
///
/// ```text
///  9. alpha
///       step one
/// 10. beta
/// ```
pub fn render_text(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "(no entries)\n".to_string();
    }

    let width = entries.len().to_string().len();
    let gutter = " ".repeat(width + 2);
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{:>width$}. {}\n", i + 1, entry.header));
        for line in &entry.body {
            out.push_str(&gutter);
            out.push_str(line);
            out.push('\n');
        }
    }

    debug!(entries = entries.len(), bytes = out.len(), "rendered text report");
    out
}

/// Render entries as pretty-printed JSON.
pub fn render_json(entries: &[Entry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(|e| InterplayerError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(header: &str, body: &[&str]) -> Entry {
        Entry {
            header: header.into(),
            body: body.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn text_preserves_order_and_completeness() {
        let entries = vec![
            entry("alpha", &["step one", "step two"]),
            entry("beta", &[]),
            entry("gamma", &["last"]),
        ];
        let text = render_text(&entries);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "1. alpha");
        assert_eq!(lines[1], "   step one");
        assert_eq!(lines[2], "   step two");
        assert_eq!(lines[3], "2. beta");
        assert_eq!(lines[4], "3. gamma");
        assert_eq!(lines[5], "   last");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn gutter_aligns_past_nine_entries() {
        let entries: Vec<Entry> = (1..=10)
            .map(|i| entry(&format!("h{i}"), &["d"]))
            .collect();
        let text = render_text(&entries);

        assert!(text.contains(" 1. h1"));
        assert!(text.contains("10. h10"));
        // Body gutter is uniform: index width + ". "
        let body_lines: Vec<_> = text.lines().filter(|l| l.trim() == "d").collect();
        assert_eq!(body_lines.len(), 10);
        assert!(body_lines.iter().all(|l| *l == "    d"));
    }

    #[test]
    fn empty_report() {
        assert_eq!(render_text(&[]), "(no entries)\n");
    }

    #[test]
    fn json_shape_matches_notation_output() {
        let entries = vec![entry("alpha", &["step one"])];
        let json = render_json(&entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["header"], "alpha");
        assert_eq!(parsed[0]["body"][0], "step one");
    }
}
