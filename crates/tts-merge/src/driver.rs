//! Level-by-level walk of the two snapshots.
//!
//! At every level both sibling sets are indexed, their keys joined, and each
//! pair handed to the node merger in ascending key order. A node's children
//! are fully merged before the node itself is built.

use tracing::debug;
use tts_types::{
    group_key, item_key, section_key, Collection, Group, GroupKey, Item, Level, Section,
    SectionKey,
};

use crate::config::MergeConfig;
use crate::error::{MergeResult, Side};
use crate::index::{index, pair_up};
use crate::node::{merge_group, merge_item, merge_section};

/// Merge two whole snapshots. The root itself is never deleted; only its
/// groups take part in the merge.
pub fn merge_collections(
    current: &Collection,
    future: &Collection,
    config: &MergeConfig,
) -> MergeResult<Collection> {
    let groups = merge_groups(&current.groups, &future.groups, config)?;
    Ok(Collection::new(groups))
}

/// Merge the groups under the root.
pub fn merge_groups(
    current: &[Group],
    future: &[Group],
    config: &MergeConfig,
) -> MergeResult<Vec<Group>> {
    let pairs = pair_up(
        index(Level::Group, Side::Current, current, group_key)?,
        index(Level::Group, Side::Future, future, group_key)?,
    );
    debug!(level = %Level::Group, keys = pairs.len(), "merging siblings");

    pairs
        .iter()
        .map(|(key, pair)| merge_group(key, pair.current, pair.future, config))
        .collect()
}

/// Merge the sections under the group identified by `parent`.
pub fn merge_sections(
    parent: &GroupKey,
    current: &[Section],
    future: &[Section],
    config: &MergeConfig,
) -> MergeResult<Vec<Section>> {
    let key = |s: &Section| section_key(parent, s);
    let pairs = pair_up(
        index(Level::Section, Side::Current, current, key)?,
        index(Level::Section, Side::Future, future, key)?,
    );

    pairs
        .iter()
        .map(|(key, pair)| merge_section(key, pair.current, pair.future, config))
        .collect()
}

/// Merge the items under the section identified by `parent`.
pub fn merge_items(
    parent: &SectionKey,
    current: &[Item],
    future: &[Item],
    config: &MergeConfig,
) -> MergeResult<Vec<Item>> {
    let key = |i: &Item| item_key(parent, i);
    let pairs = pair_up(
        index(Level::Item, Side::Current, current, key)?,
        index(Level::Item, Side::Future, future, key)?,
    );

    pairs
        .iter()
        .map(|(key, pair)| merge_item(key, pair.current, pair.future, config))
        .collect()
}
