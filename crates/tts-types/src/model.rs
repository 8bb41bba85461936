//! The timetable document tree.
//!
//! The JSON form mirrors the tree directly. Identifying fields have fixed
//! names; everything else on a node is kept verbatim in its [`Payload`].
//!
//! ```json
//! {
//!   "groups": [{
//!     "path": { "tripos": "tripos", "part": "part1", "subject": "subjA" },
//!     "name": "Module A",
//!     "sections": [{
//!       "id": "S1",
//!       "name": "Series 1",
//!       "items": [{ "id": "I1", "location": "Room 3" }]
//!     }]
//!   }]
//! }
//! ```
//!
//! A node scheduled for removal carries `"delete": true` and nothing but its
//! identifying fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeResult;

/// Non-identifying fields of a node, kept in key order.
pub type Payload = BTreeMap<String, Value>;

fn is_false(value: &bool) -> bool {
    !*value
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Root of one snapshot. Never itself deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Collection {
    /// Create a collection holding the given groups.
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a group (builder style).
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns `true` if no node anywhere in the tree carries a deletion marker.
    pub fn is_free_of_deletes(&self) -> bool {
        self.groups.iter().all(|g| {
            !g.deleted
                && g.sections
                    .iter()
                    .all(|s| !s.deleted && s.items.iter().all(|i| !i.deleted))
        })
    }

    /// Parse a collection from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> TypeResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Compact JSON.
    pub fn to_json(&self) -> TypeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> TypeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// Classification path of a group: tripos / part / subject.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupPath {
    pub tripos: String,
    pub part: String,
    pub subject: String,
}

impl GroupPath {
    pub fn new(
        tripos: impl Into<String>,
        part: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            tripos: tripos.into(),
            part: part.into(),
            subject: subject.into(),
        }
    }
}

impl std::fmt::Display for GroupPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.tripos, self.part, self.subject)
    }
}

/// First-level node (a module), matched by path plus display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub path: GroupPath,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, rename = "delete", skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(flatten)]
    pub fields: Payload,
}

impl Group {
    /// Create an empty, undeleted group.
    pub fn new(path: GroupPath, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
            sections: Vec::new(),
            deleted: false,
            fields: Payload::new(),
        }
    }

    /// Append a section (builder style).
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Set a payload field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Second-level node (a lecture series), matched by id within its group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, rename = "delete", skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(flatten)]
    pub fields: Payload,
}

impl Section {
    /// Create an empty, undeleted section.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
            deleted: false,
            fields: Payload::new(),
        }
    }

    /// Append an item (builder style).
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Set a payload field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// Leaf node (a single scheduled event), matched by id within its section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, rename = "delete", skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(flatten)]
    pub fields: Payload,
}

impl Item {
    /// Create an undeleted item with no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: false,
            fields: Payload::new(),
        }
    }

    /// Set a payload field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Collection {
        Collection::empty().with_group(
            Group::new(GroupPath::new("tripos", "part1", "subjA"), "Module A").with_section(
                Section::new("S1", "Series 1")
                    .with_field("links", json!([]))
                    .with_item(Item::new("I1").with_field("location", "Room 3")),
            ),
        )
    }

    #[test]
    fn json_layout_flattens_payload() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let item = &value["groups"][0]["sections"][0]["items"][0];
        assert_eq!(item["id"], "I1");
        assert_eq!(item["location"], "Room 3");
        assert!(item.get("delete").is_none());
        assert!(item.get("fields").is_none());
    }

    #[test]
    fn unknown_fields_land_in_payload() {
        let doc = br#"{"groups":[{"path":{"tripos":"t","part":"p","subject":"s"},
            "name":"M","colour":"red","sections":[{"id":"S","name":"N","items":[
            {"id":"E","start":"09:00"}]}]}]}"#;
        let c = Collection::from_json_slice(doc).unwrap();
        assert_eq!(c.groups[0].fields.get("colour"), Some(&json!("red")));
        assert_eq!(c.groups[0].sections[0].items[0].fields.get("start"), Some(&json!("09:00")));
    }

    #[test]
    fn delete_marker_serializes_as_delete_true() {
        let mut item = Item::new("I1");
        item.deleted = true;
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"id": "I1", "delete": true}));
    }

    #[test]
    fn missing_children_default_to_empty() {
        let doc = br#"{"groups":[{"path":{"tripos":"t","part":"p","subject":"s"},"name":"M"}]}"#;
        let c = Collection::from_json_slice(doc).unwrap();
        assert!(c.groups[0].sections.is_empty());
        assert!(!c.groups[0].deleted);
    }

    #[test]
    fn json_roundtrip_preserves_tree() {
        let c = sample();
        let parsed = Collection::from_json_slice(c.to_json_pretty().unwrap().as_bytes()).unwrap();
        assert_eq!(c, parsed);
    }

    #[test]
    fn malformed_json_is_document_error() {
        let err = Collection::from_json_slice(b"{\"groups\": 3}").unwrap_err();
        assert!(matches!(err, crate::TypeError::Document(_)));
    }

    #[test]
    fn free_of_deletes_detects_nested_marker() {
        let mut c = sample();
        assert!(c.is_free_of_deletes());
        c.groups[0].sections[0].items[0].deleted = true;
        assert!(!c.is_free_of_deletes());
    }
}
