//! Sibling indexing and key pairing.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Display;

use tts_types::{group_key, item_key, section_key, Collection, Level};

use crate::error::{MergeError, MergeResult, Side};

/// Index a sibling set by key.
///
/// Fails with [`MergeError::DuplicateKey`] on the first key produced twice.
/// The returned map iterates in ascending key order.
pub fn index<'a, N, K, F>(
    level: Level,
    side: Side,
    nodes: &'a [N],
    key: F,
) -> MergeResult<BTreeMap<K, &'a N>>
where
    K: Ord + Display,
    F: Fn(&N) -> K,
{
    let mut map = BTreeMap::new();
    for node in nodes {
        match map.entry(key(node)) {
            Entry::Occupied(e) => {
                return Err(MergeError::DuplicateKey {
                    level,
                    side,
                    key: e.key().to_string(),
                })
            }
            Entry::Vacant(e) => {
                e.insert(node);
            }
        }
    }
    Ok(map)
}

/// The current and future node sharing one key. At least one side is set
/// whenever the pair comes from [`pair_up`].
#[derive(Debug)]
pub struct Pair<'a, N> {
    pub current: Option<&'a N>,
    pub future: Option<&'a N>,
}

impl<N> Default for Pair<'_, N> {
    fn default() -> Self {
        Self {
            current: None,
            future: None,
        }
    }
}

/// Join two indexes on their keys, keeping ascending key order.
pub fn pair_up<'a, K, N>(
    current: BTreeMap<K, &'a N>,
    future: BTreeMap<K, &'a N>,
) -> BTreeMap<K, Pair<'a, N>>
where
    K: Ord,
{
    let mut pairs: BTreeMap<K, Pair<'a, N>> = BTreeMap::new();
    for (key, node) in current {
        pairs.entry(key).or_default().current = Some(node);
    }
    for (key, node) in future {
        pairs.entry(key).or_default().future = Some(node);
    }
    pairs
}

/// Check every sibling set of a whole document for duplicate keys.
///
/// The merge only descends into subtrees present on both sides, so this
/// walk is what catches duplicates inside a subtree that exists in one
/// snapshot only.
pub fn check_unique_keys(collection: &Collection, side: Side) -> MergeResult<()> {
    let groups = index(Level::Group, side, &collection.groups, group_key)?;
    for (gk, group) in &groups {
        let sections = index(Level::Section, side, &group.sections, |s| section_key(gk, s))?;
        for (sk, section) in &sections {
            index(Level::Item, side, &section.items, |i| item_key(sk, i))?;
        }
    }
    Ok(())
}
