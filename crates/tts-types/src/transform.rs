//! Whole-document transforms applied before comparison or import.

use crate::key::group_key;
use crate::model::Collection;

/// Prefix the target system adds to item ids when exporting a document.
pub const EXPORT_ID_PREFIX: &str = "import-";

/// Sort siblings by key at every level.
///
/// Two documents with the same content canonicalise to equal values and
/// therefore to byte-identical JSON. Siblings with equal keys keep their
/// relative order.
pub fn canonicalise(collection: &Collection) -> Collection {
    let mut out = collection.clone();
    out.groups.sort_by_cached_key(group_key);
    for group in &mut out.groups {
        group.sections.sort_by(|a, b| a.id.cmp(&b.id));
        for section in &mut group.sections {
            section.items.sort_by(|a, b| a.id.cmp(&b.id));
        }
    }
    out
}

/// Combine several documents into one, keeping groups in input order.
///
/// No de-duplication is done: a group present in two inputs appears twice,
/// and a later merge will reject it as a duplicate key.
pub fn concat<I>(collections: I) -> Collection
where
    I: IntoIterator<Item = Collection>,
{
    Collection::new(
        collections
            .into_iter()
            .flat_map(|c| c.groups)
            .collect(),
    )
}

/// Strip [`EXPORT_ID_PREFIX`] from item ids so that exported ids match the
/// ids originally imported.
pub fn fix_export_ids(collection: &Collection) -> Collection {
    let mut out = collection.clone();
    for item in out
        .groups
        .iter_mut()
        .flat_map(|g| g.sections.iter_mut())
        .flat_map(|s| s.items.iter_mut())
    {
        if let Some(stripped) = item.id.strip_prefix(EXPORT_ID_PREFIX) {
            item.id = stripped.to_string();
        }
    }
    out
}
