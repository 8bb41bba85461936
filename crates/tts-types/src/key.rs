//! Match keys for pairing nodes across two snapshots.
//!
//! Keys are not global identifiers. A [`GroupKey`] includes the group's
//! display name, so two groups with the same path but different names never
//! match. Section and item keys extend their parent's key, which keeps the
//! derived `Ord` equal to lexicographic tuple order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Group, Item, Section};

/// A level of the document tree below the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Group,
    Section,
    Item,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Section => write!(f, "section"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// `(tripos, part, subject, name)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub tripos: String,
    pub part: String,
    pub subject: String,
    pub name: String,
}

/// `GroupKey + (section id,)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey {
    pub group: GroupKey,
    pub section_id: String,
}

/// `SectionKey + (item id,)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub section: SectionKey,
    pub item_id: String,
}

/// Key of a group.
pub fn group_key(group: &Group) -> GroupKey {
    GroupKey {
        tripos: group.path.tripos.clone(),
        part: group.path.part.clone(),
        subject: group.path.subject.clone(),
        name: group.name.clone(),
    }
}

/// Key of a section under the group identified by `parent`.
pub fn section_key(parent: &GroupKey, section: &Section) -> SectionKey {
    SectionKey {
        group: parent.clone(),
        section_id: section.id.clone(),
    }
}

/// Key of an item under the section identified by `parent`.
pub fn item_key(parent: &SectionKey, item: &Item) -> ItemKey {
    ItemKey {
        section: parent.clone(),
        item_id: item.id.clone(),
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {:?}",
            self.tripos, self.part, self.subject, self.name
        )
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} section {:?}", self.group, self.section_id)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} item {:?}", self.section, self.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupPath;

    fn module(name: &str) -> Group {
        Group::new(GroupPath::new("tripos", "part1", "subjA"), name)
    }

    #[test]
    fn group_key_includes_display_name() {
        assert_ne!(group_key(&module("Module A")), group_key(&module("Module B")));
    }

    #[test]
    fn group_key_ignores_payload_and_children() {
        let plain = module("Module A");
        let busy = module("Module A")
            .with_field("colour", "red")
            .with_section(Section::new("S1", "Series"));
        assert_eq!(group_key(&plain), group_key(&busy));
    }

    #[test]
    fn section_key_is_scoped_to_group() {
        let s = Section::new("S1", "Series");
        let a = section_key(&group_key(&module("Module A")), &s);
        let b = section_key(&group_key(&module("Module B")), &s);
        assert_ne!(a, b);
    }

    #[test]
    fn section_key_ignores_section_name() {
        let g = group_key(&module("Module A"));
        assert_eq!(
            section_key(&g, &Section::new("S1", "Old name")),
            section_key(&g, &Section::new("S1", "New name"))
        );
    }

    #[test]
    fn item_key_extends_section_key() {
        let g = group_key(&module("Module A"));
        let s = section_key(&g, &Section::new("S1", "Series"));
        let i = item_key(&s, &Item::new("I1"));
        assert_eq!(i.section, s);
        assert_eq!(i.item_id, "I1");
    }

    #[test]
    fn ordering_is_lexicographic_by_component() {
        let a = GroupKey {
            tripos: "a".into(),
            part: "z".into(),
            subject: "z".into(),
            name: "z".into(),
        };
        let b = GroupKey {
            tripos: "b".into(),
            part: "a".into(),
            subject: "a".into(),
            name: "a".into(),
        };
        assert!(a < b);

        let s1 = SectionKey { group: a.clone(), section_id: "S9".into() };
        let s2 = SectionKey { group: b, section_id: "S1".into() };
        assert!(s1 < s2);
    }

    #[test]
    fn display_formats() {
        let g = group_key(&module("Module A"));
        assert_eq!(g.to_string(), "tripos/part1/subjA \"Module A\"");
        let s = section_key(&g, &Section::new("S1", "Series"));
        assert_eq!(s.to_string(), "tripos/part1/subjA \"Module A\" section \"S1\"");
        assert_eq!(Level::Item.to_string(), "item");
    }
}
