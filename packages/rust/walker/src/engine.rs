//! Paced, cycle-safe traversal engine for interplay document graphs.
//!
//! The walker starts from the entry document, classifies each line, routes
//! headers/continuations into the knowledge base, and enqueues every
//! reference for a later, paced visit. Discovered references drain FIFO in
//! discovery order, so the schedule is deterministic rather than an accident
//! of timer ordering. A visited-set guard makes repeated or circular
//! references a no-op instead of an infinite loop.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use interplayer_parser::{ClassifyOptions, LineKind, classify};
use interplayer_shared::{
    Entry, KnowledgeBase, Result, RunId, VisitRecord, VisitStatus, WalkConfig, WalkSummary,
};

use crate::source::DocumentSource;

// ---------------------------------------------------------------------------
// WalkOutcome
// ---------------------------------------------------------------------------

/// Everything a completed walk produced.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Per-run summary: visit records, counts, timings.
    pub summary: WalkSummary,
    /// The full knowledge base, including entries from documents visited
    /// after the sentinel.
    pub knowledge: KnowledgeBase,
    /// Snapshot of the entries at the moment the sentinel completed, if it
    /// was reached. This is what the report renders.
    pub report: Option<Vec<Entry>>,
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Progress callbacks for a walk in flight.
pub trait WalkObserver: Send + Sync {
    /// A visit is about to fetch the named document.
    fn visit_started(&self, name: &str, position: usize);
    /// A visit finished with the given record.
    fn visit_finished(&self, record: &VisitRecord);
    /// The sentinel document completed; fired at most once per run.
    fn sentinel_reached(&self, entries: &[Entry]);
    /// The queue drained.
    fn done(&self, summary: &WalkSummary);
}

/// No-op observer for headless/test usage.
pub struct SilentObserver;

impl WalkObserver for SilentObserver {
    fn visit_started(&self, _name: &str, _position: usize) {}
    fn visit_finished(&self, _record: &VisitRecord) {}
    fn sentinel_reached(&self, _entries: &[Entry]) {}
    fn done(&self, _summary: &WalkSummary) {}
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Traversal engine over an open-ended, self-extending set of documents.
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    /// Create a walker with the given configuration.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk the document graph from the configured entry document.
    ///
    /// Single logical thread of control: one visit at a time, suspension
    /// only at the pacing delay between scheduled visits. Absent documents
    /// and retrieval faults abandon their branch; they never abort the run.
    #[instrument(skip_all, fields(entry = %self.config.entry, sentinel = %self.config.sentinel))]
    pub async fn walk(
        &self,
        source: &dyn DocumentSource,
        observer: &dyn WalkObserver,
    ) -> Result<WalkOutcome> {
        let start = std::time::Instant::now();
        let run_id = RunId::new();
        let opts = ClassifyOptions::from(&self.config);

        let mut knowledge = KnowledgeBase::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        let mut records: Vec<VisitRecord> = Vec::new();
        let mut skipped: usize = 0;
        let mut report: Option<Vec<Entry>> = None;
        let mut position: usize = 0;

        queue.push_back(self.config.entry.clone());

        info!(
            %run_id,
            pace_ms = self.config.pace_ms,
            "starting walk"
        );

        while let Some(name) = queue.pop_front() {
            // Cycle guard: a name is visited at most once per run. A repeat
            // is a no-op, not a missing document.
            if !visited.insert(name.clone()) {
                debug!(%name, "already visited, skipping");
                skipped += 1;
                continue;
            }

            // Pacing: every scheduled visit after the entry document waits
            // out the configured delay before it fires.
            if position > 0 && self.config.pace_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.pace_ms)).await;
            }
            position += 1;
            observer.visit_started(&name, position);

            let record = match source.fetch(&name).await {
                Ok(Some(content)) => {
                    self.consume_document(&name, &content, &opts, &mut knowledge, &mut queue)
                }
                Ok(None) => {
                    warn!(%name, "document absent, waiting for it to manifest");
                    VisitRecord {
                        name: name.clone(),
                        status: VisitStatus::Missing,
                        lines: 0,
                        content_hash: None,
                        visited_at: Utc::now(),
                    }
                }
                Err(e) => {
                    warn!(%name, error = %e, "retrieval fault, branch abandoned");
                    VisitRecord {
                        name: name.clone(),
                        status: VisitStatus::Faulted,
                        lines: 0,
                        content_hash: None,
                        visited_at: Utc::now(),
                    }
                }
            };

            // Terminal condition: a successful visit of the sentinel captures
            // the report exactly once. Pending visits keep draining but can
            // never re-trigger it.
            if record.status == VisitStatus::Visited
                && name == self.config.sentinel
                && report.is_none()
            {
                info!(%name, entries = knowledge.len(), "sentinel reached, capturing report");
                let snapshot = knowledge.entries().to_vec();
                observer.sentinel_reached(&snapshot);
                report = Some(snapshot);
            }

            observer.visit_finished(&record);
            records.push(record);
        }

        let visited_count = count(&records, VisitStatus::Visited);
        let missing = count(&records, VisitStatus::Missing);
        let faulted = count(&records, VisitStatus::Faulted);

        let summary = WalkSummary {
            run_id,
            entry: self.config.entry.clone(),
            sentinel: self.config.sentinel.clone(),
            visits: records,
            visited: visited_count,
            missing,
            faulted,
            skipped,
            sentinel_reached: report.is_some(),
            elapsed: start.elapsed(),
        };

        info!(
            visited = summary.visited,
            missing = summary.missing,
            faulted = summary.faulted,
            skipped = summary.skipped,
            entries = knowledge.len(),
            sentinel_reached = summary.sentinel_reached,
            duration_ms = summary.elapsed.as_millis(),
            "walk completed"
        );

        observer.done(&summary);

        Ok(WalkOutcome {
            summary,
            knowledge,
            report,
        })
    }

    /// Classify every line of one document, routing into the knowledge base
    /// and the work queue. Runs to completion without suspension.
    fn consume_document(
        &self,
        name: &str,
        content: &str,
        opts: &ClassifyOptions,
        knowledge: &mut KnowledgeBase,
        queue: &mut VecDeque<String>,
    ) -> VisitRecord {
        let mut lines = 0;

        for raw in content.lines() {
            lines += 1;
            match classify(raw, opts) {
                LineKind::Blank => {}
                LineKind::Reference(target) => {
                    debug!(from = %name, to = %target, "path found, scheduling visit");
                    queue.push_back(target);
                }
                LineKind::Header(text) => knowledge.on_header(text),
                LineKind::Continuation(text) => knowledge.on_continuation(text),
            }
        }

        VisitRecord {
            name: name.to_string(),
            status: VisitStatus::Visited,
            lines,
            content_hash: Some(compute_hash(content)),
            visited_at: Utc::now(),
        }
    }
}

fn count(records: &[VisitRecord], status: VisitStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

/// Compute SHA-256 hash of document content.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
