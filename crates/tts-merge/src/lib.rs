//! Delete generation for timetable-sync.
//!
//! The target system applies an imported document as a list of actions:
//! nodes in the document are created or overwritten, and nodes carrying a
//! deletion marker are removed. Anything merely absent survives. To move the
//! target from a `current` state to a `future` state, the document sent must
//! be `future` plus a marker for every node that only exists in `current`.
//!
//! [`generate_deletes`] builds that document by pairing the nodes of both
//! snapshots level by level on their match keys:
//!
//! | present in | group / section | item |
//! |---|---|---|
//! | future only | copied from future | copied from future |
//! | current only | identifying fields + deletion marker | id + deletion marker |
//! | both | future's fields, children merged recursively | per [`SharedItemPolicy`] |
//!
//! Siblings at every merged level come out in ascending match-key order.
//! A subtree present only in `future` is copied as it stands, so callers
//! wanting fully canonical output canonicalise their inputs first.

pub mod config;
pub mod driver;
pub mod error;
pub mod generator;
pub mod index;
pub mod node;
pub mod summary;

pub use config::{MergeConfig, SharedItemPolicy};
pub use driver::merge_collections;
pub use error::{MergeError, MergeResult, Side};
pub use generator::{generate_deletes, DeleteGenerator};
pub use index::{check_unique_keys, index, pair_up, Pair};
pub use summary::{summarize, DeleteSummary, LevelCounts};
