//! Per-level node merging.
//!
//! Each function receives the (possibly absent) current and future node for
//! one key and produces exactly one output node. Output nodes are always
//! fresh copies; nothing is shared with the inputs.

use tracing::debug;
use tts_types::{Group, GroupKey, Item, ItemKey, Level, Payload, Section, SectionKey};

use crate::config::{MergeConfig, SharedItemPolicy};
use crate::driver::{merge_items, merge_sections};
use crate::error::{MergeError, MergeResult};

fn unpaired(level: Level, key: &impl std::fmt::Display) -> MergeError {
    MergeError::StructuralInvariant {
        level,
        key: key.to_string(),
        reason: "neither current nor future node present".into(),
    }
}

/// Merge the groups sharing `key`.
pub fn merge_group(
    key: &GroupKey,
    current: Option<&Group>,
    future: Option<&Group>,
    config: &MergeConfig,
) -> MergeResult<Group> {
    match (current, future) {
        (Some(current), None) => {
            debug!(level = %Level::Group, key = %key, "marking for deletion");
            Ok(Group {
                path: current.path.clone(),
                name: current.name.clone(),
                sections: Vec::new(),
                deleted: true,
                fields: Payload::new(),
            })
        }
        (None, Some(future)) => Ok(future.clone()),
        (Some(current), Some(future)) => {
            let sections = merge_sections(key, &current.sections, &future.sections, config)?;
            Ok(Group {
                path: future.path.clone(),
                name: future.name.clone(),
                sections,
                deleted: future.deleted,
                fields: future.fields.clone(),
            })
        }
        (None, None) => Err(unpaired(Level::Group, key)),
    }
}

/// Merge the sections sharing `key`.
pub fn merge_section(
    key: &SectionKey,
    current: Option<&Section>,
    future: Option<&Section>,
    config: &MergeConfig,
) -> MergeResult<Section> {
    match (current, future) {
        (Some(current), None) => {
            debug!(level = %Level::Section, key = %key, "marking for deletion");
            Ok(Section {
                id: current.id.clone(),
                name: current.name.clone(),
                items: Vec::new(),
                deleted: true,
                fields: Payload::new(),
            })
        }
        (None, Some(future)) => Ok(future.clone()),
        (Some(current), Some(future)) => {
            let items = merge_items(key, &current.items, &future.items, config)?;
            Ok(Section {
                id: future.id.clone(),
                name: future.name.clone(),
                items,
                deleted: future.deleted,
                fields: future.fields.clone(),
            })
        }
        (None, None) => Err(unpaired(Level::Section, key)),
    }
}

/// Merge the items sharing `key`. Items are leaves: they are replaced or
/// deleted, never reconciled field by field.
pub fn merge_item(
    key: &ItemKey,
    current: Option<&Item>,
    future: Option<&Item>,
    config: &MergeConfig,
) -> MergeResult<Item> {
    match (current, future) {
        (Some(current), None) => {
            debug!(level = %Level::Item, key = %key, "marking for deletion");
            Ok(Item {
                id: current.id.clone(),
                deleted: true,
                fields: Payload::new(),
            })
        }
        (None, Some(future)) => Ok(future.clone()),
        (Some(_), Some(future)) => match config.shared_items {
            SharedItemPolicy::TakeFuture => Ok(future.clone()),
            SharedItemPolicy::Reject => Err(MergeError::StructuralInvariant {
                level: Level::Item,
                key: key.to_string(),
                reason: "item is present in both current and future state".into(),
            }),
        },
        (None, None) => Err(unpaired(Level::Item, key)),
    }
}
