//! Traversal engine and document sources for interplay walks.
//!
//! [`Walker`] drives paced, cycle-safe visits across the document graph;
//! [`DocumentSource`] is the retrieval seam it requires from its
//! environment, with filesystem and in-memory backends.

mod engine;
pub mod source;

pub use engine::{SilentObserver, WalkObserver, WalkOutcome, Walker};
pub use source::{DocumentSource, FsSource, MemSource};
