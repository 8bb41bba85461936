use tts_types::{group_key, item_key, section_key, Collection, Payload};

use crate::config::SchemaConfig;
use crate::error::Violation;
use crate::rule::SchemaRule;

const GROUP_FIELDS: &[&str] = &["path", "name", "sections", "delete"];
const SECTION_FIELDS: &[&str] = &["id", "name", "items", "delete"];
const ITEM_FIELDS: &[&str] = &["id", "delete"];

/// Payload keys must not shadow a node's structural fields, which would
/// produce duplicate keys in the serialized document.
pub struct PayloadRule;

fn check_payload(
    out: &mut Vec<Violation>,
    location: &dyn Fn() -> String,
    fields: &Payload,
    reserved: &[&str],
) {
    for key in fields.keys().filter(|k| reserved.contains(&k.as_str())) {
        out.push(Violation::new(
            location(),
            format!("payload field '{key}' is reserved"),
        ));
    }
}

impl SchemaRule for PayloadRule {
    fn name(&self) -> &str {
        "payload"
    }

    fn check(&self, collection: &Collection, _config: &SchemaConfig) -> Vec<Violation> {
        let mut out = Vec::new();
        for group in &collection.groups {
            let gk = group_key(group);
            check_payload(&mut out, &|| format!("group {gk}"), &group.fields, GROUP_FIELDS);
            for section in &group.sections {
                let sk = section_key(&gk, section);
                check_payload(&mut out, &|| sk.to_string(), &section.fields, SECTION_FIELDS);
                for item in &section.items {
                    let ik = item_key(&sk, item);
                    check_payload(&mut out, &|| ik.to_string(), &item.fields, ITEM_FIELDS);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tts_types::{Group, GroupPath, Item, Section};

    #[test]
    fn ordinary_payload_passes() {
        let c = Collection::new(vec![Group::new(GroupPath::new("t", "p", "s"), "M")
            .with_field("colour", "red")
            .with_section(Section::new("S", "N").with_item(Item::new("E").with_field("name", "Lecture 1")))]);
        assert!(PayloadRule.check(&c, &SchemaConfig::default()).is_empty());
    }

    #[test]
    fn reserved_keys_are_reported_per_level() {
        let c = Collection::new(vec![Group::new(GroupPath::new("t", "p", "s"), "M")
            .with_field("sections", 1)
            .with_section(
                Section::new("S", "N")
                    .with_field("id", "dup")
                    .with_item(Item::new("E").with_field("delete", true)),
            )]);
        let v = PayloadRule.check(&c, &SchemaConfig::default());
        let messages: Vec<_> = v.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "payload field 'sections' is reserved",
                "payload field 'id' is reserved",
                "payload field 'delete' is reserved",
            ]
        );
    }
}
