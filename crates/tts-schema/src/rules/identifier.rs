use tts_types::{group_key, item_key, section_key, Collection};

use crate::config::SchemaConfig;
use crate::error::Violation;
use crate::rule::SchemaRule;

/// Identifying fields must be present and of bounded length.
///
/// Checked fields: the three group path segments, group names, section ids
/// and names, and item ids. Whitespace-only values count as empty.
pub struct IdentifierRule;

fn check_field(
    out: &mut Vec<Violation>,
    location: &dyn Fn() -> String,
    field: &str,
    value: &str,
    max_len: usize,
) {
    if value.trim().is_empty() {
        out.push(Violation::new(location(), format!("{field} must not be empty")));
    } else if value.chars().count() > max_len {
        out.push(Violation::new(
            location(),
            format!("{field} exceeds {max_len} characters"),
        ));
    }
}

impl SchemaRule for IdentifierRule {
    fn name(&self) -> &str {
        "identifier"
    }

    fn check(&self, collection: &Collection, config: &SchemaConfig) -> Vec<Violation> {
        let max = config.max_identifier_len;
        let mut out = Vec::new();

        for group in &collection.groups {
            let gk = group_key(group);
            let at_group = || format!("group {gk}");
            check_field(&mut out, &at_group, "path.tripos", &group.path.tripos, max);
            check_field(&mut out, &at_group, "path.part", &group.path.part, max);
            check_field(&mut out, &at_group, "path.subject", &group.path.subject, max);
            check_field(&mut out, &at_group, "name", &group.name, max);

            for section in &group.sections {
                let sk = section_key(&gk, section);
                let at_section = || sk.to_string();
                check_field(&mut out, &at_section, "id", &section.id, max);
                check_field(&mut out, &at_section, "name", &section.name, max);

                for item in &section.items {
                    let ik = item_key(&sk, item);
                    check_field(&mut out, &|| ik.to_string(), "id", &item.id, max);
                }
            }
        }

        out
    }
}
