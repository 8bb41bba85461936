//! Foundation types for timetable-sync.
//!
//! A timetable document is a fixed four-level tree:
//! [`Collection`] → [`Group`] → [`Section`] → [`Item`]. Every other crate in
//! the workspace consumes and produces values of these types.
//!
//! # Key Types
//!
//! - [`Collection`] / [`Group`] / [`Section`] / [`Item`]: the document tree
//! - [`GroupKey`] / [`SectionKey`] / [`ItemKey`]: match keys used to pair
//!   nodes across two snapshots
//! - [`ContentDigest`]: BLAKE3 digest of a canonicalised document
//!
//! # Transforms
//!
//! - [`canonicalise`]: sort siblings by key at every level
//! - [`concat`]: combine the groups of several documents
//! - [`fix_export_ids`]: undo the id prefix the target system adds on export

pub mod digest;
pub mod error;
pub mod key;
pub mod model;
pub mod transform;

pub use digest::{digest, ContentDigest};
pub use error::{TypeError, TypeResult};
pub use key::{group_key, item_key, section_key, GroupKey, ItemKey, Level, SectionKey};
pub use model::{Collection, Group, GroupPath, Item, Payload, Section};
pub use transform::{canonicalise, concat, fix_export_ids, EXPORT_ID_PREFIX};
