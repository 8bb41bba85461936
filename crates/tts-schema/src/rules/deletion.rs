use tts_types::{group_key, item_key, section_key, Collection};

use crate::config::SchemaConfig;
use crate::error::Violation;
use crate::rule::SchemaRule;

/// Deletion markers must be legal: a deleted node carries only its
/// identifying fields, and markers are rejected outright when the
/// configuration forbids them.
pub struct DeletionMarkerRule;

impl SchemaRule for DeletionMarkerRule {
    fn name(&self) -> &str {
        "deletion-marker"
    }

    fn check(&self, collection: &Collection, config: &SchemaConfig) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut marked = |location: String, extra: Option<&str>| {
            if !config.allow_deletion_markers {
                out.push(Violation::new(location, "deletion markers are not allowed here"));
            } else if let Some(what) = extra {
                out.push(Violation::new(location, format!("deleted node must not carry {what}")));
            }
        };

        for group in &collection.groups {
            let gk = group_key(group);
            if group.deleted {
                let extra = if !group.sections.is_empty() {
                    Some("sections")
                } else if !group.fields.is_empty() {
                    Some("payload fields")
                } else {
                    None
                };
                marked(format!("group {gk}"), extra);
            }

            for section in &group.sections {
                let sk = section_key(&gk, section);
                if section.deleted {
                    let extra = if !section.items.is_empty() {
                        Some("items")
                    } else if !section.fields.is_empty() {
                        Some("payload fields")
                    } else {
                        None
                    };
                    marked(sk.to_string(), extra);
                }

                for item in section.items.iter().filter(|i| i.deleted) {
                    let extra = (!item.fields.is_empty()).then_some("payload fields");
                    marked(item_key(&sk, item).to_string(), extra);
                }
            }
        }

        out
    }
}
