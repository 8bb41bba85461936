use tracing::{info, warn};
use tts_schema::{SchemaValidator, StructuralValidator};
use tts_types::Collection;

use crate::config::MergeConfig;
use crate::driver::merge_collections;
use crate::error::{MergeResult, Side};
use crate::index::check_unique_keys;
use crate::summary::summarize;

/// Public entry point of the merge engine.
///
/// Holds a merge configuration and the schema validator applied to both
/// inputs and to the output. Build one at start-up and reuse it; it keeps no
/// per-call state and can be shared between threads.
pub struct DeleteGenerator {
    config: MergeConfig,
    validator: Box<dyn SchemaValidator>,
}

impl DeleteGenerator {
    pub fn new(config: MergeConfig, validator: Box<dyn SchemaValidator>) -> Self {
        Self { config, validator }
    }

    /// The current configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Produce the document that turns `current` into `future` when imported.
    ///
    /// Steps, each of which aborts the whole call on failure:
    /// 1. validate `current` and `future`
    /// 2. reject duplicate keys anywhere in either input
    /// 3. merge
    /// 4. validate the merged document
    pub fn generate(&self, current: &Collection, future: &Collection) -> MergeResult<Collection> {
        for (side, doc) in [(Side::Current, current), (Side::Future, future)] {
            if let Err(e) = self.validator.validate(doc) {
                warn!(%side, error = %e, "input failed schema validation");
                return Err(e.into());
            }
            check_unique_keys(doc, side)?;
        }

        let merged = merge_collections(current, future, &self.config)?;

        if let Err(e) = self.validator.validate(&merged) {
            warn!(error = %e, "merged document failed schema validation");
            return Err(e.into());
        }

        let summary = summarize(&merged);
        info!(
            groups = merged.groups.len(),
            deleted = summary.total_deleted(),
            "generated deletes"
        );
        Ok(merged)
    }
}

impl Default for DeleteGenerator {
    fn default() -> Self {
        Self::new(MergeConfig::default(), Box::new(StructuralValidator::default()))
    }
}

/// [`DeleteGenerator::generate`] with the default configuration and
/// validator.
pub fn generate_deletes(current: &Collection, future: &Collection) -> MergeResult<Collection> {
    DeleteGenerator::default().generate(current, future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use serde_json::json;
    use tts_schema::{SchemaConfig, SchemaViolation, Violation};
    use tts_types::{canonicalise, Group, GroupPath, Item, Level, Payload, Section};

    fn module(subject: &str, name: &str) -> Group {
        Group::new(GroupPath::new("tripos", "part1", subject), name)
    }

    fn event(id: &str) -> Item {
        Item::new(id).with_field("location", "Room 3").with_field("date", "2014-10-09")
    }

    fn small() -> Collection {
        Collection::new(vec![
            module("subjB", "Module B")
                .with_field("colour", "green")
                .with_section(
                    Section::new("S2", "Series 2")
                        .with_item(event("E3"))
                        .with_item(event("E1")),
                )
                .with_section(Section::new("S1", "Series 1").with_item(event("E2"))),
            module("subjA", "Module A").with_section(Section::new("S1", "Series 1")),
        ])
    }

    fn assert_no_deletes(c: &Collection) {
        assert!(c.is_free_of_deletes(), "unexpected deletion marker in {c:#?}");
    }

    #[test]
    fn identical_states_are_unchanged() {
        let state = small();
        let out = generate_deletes(&state, &state.clone()).unwrap();
        assert_eq!(out, canonicalise(&state));
        assert_no_deletes(&out);
    }

    #[test]
    fn empty_states_produce_empty_document() {
        let out = generate_deletes(&Collection::empty(), &Collection::empty()).unwrap();
        assert_eq!(out, Collection::empty());
    }

    #[test]
    fn pure_addition_equals_future() {
        let current = small();
        let mut future = small();
        future.groups.push(module("subjC", "Module C"));
        future.groups[0].sections.push(Section::new("S3", "Series 3"));
        future.groups[0].sections[0].items.push(event("E9"));

        let out = generate_deletes(&current, &future).unwrap();
        assert_eq!(out, canonicalise(&future));
        assert_no_deletes(&out);
    }

    #[test]
    fn modules_in_current_but_not_future_state_are_deleted() {
        let current = small();
        let mut future = small();
        future.groups.retain(|g| g.name != "Module B");

        let out = generate_deletes(&current, &future).unwrap();

        let mut expected = canonicalise(&current);
        let gone = expected
            .groups
            .iter_mut()
            .find(|g| g.name == "Module B")
            .unwrap();
        gone.deleted = true;
        gone.sections.clear();
        gone.fields = Payload::new();
        assert_eq!(out, expected);
    }

    #[test]
    fn series_in_current_but_not_future_state_are_deleted() {
        let current = small();
        let mut future = small();
        future.groups[0].sections.retain(|s| s.id != "S2");

        let out = generate_deletes(&current, &future).unwrap();
        let group = out.groups.iter().find(|g| g.name == "Module B").unwrap();
        assert!(!group.deleted);
        assert_eq!(group.fields.get("colour"), Some(&json!("green")));

        let removed = group.sections.iter().find(|s| s.id == "S2").unwrap();
        assert!(removed.deleted);
        assert!(removed.items.is_empty());
        assert_eq!(removed.name, "Series 2");

        let sibling = group.sections.iter().find(|s| s.id == "S1").unwrap();
        assert!(!sibling.deleted);
        assert_eq!(sibling, &future.groups[0].sections[0]);
    }

    #[test]
    fn events_in_current_but_not_future_state_are_deleted() {
        let current = small();
        let mut future = small();
        future.groups[0].sections[0].items.retain(|i| i.id != "E3");

        let out = generate_deletes(&current, &future).unwrap();
        let section = out
            .groups
            .iter()
            .find(|g| g.name == "Module B")
            .and_then(|g| g.sections.iter().find(|s| s.id == "S2"))
            .unwrap();
        let ids: Vec<_> = section.items.iter().map(|i| (i.id.as_str(), i.deleted)).collect();
        assert_eq!(ids, [("E1", false), ("E3", true)]);
        assert!(section.items[1].fields.is_empty());
    }

    #[test]
    fn section_swap_scenario() {
        let group = || module("subjA", "Module A");
        let current = Collection::new(vec![
            group().with_section(Section::new("S1", "Series 1").with_item(Item::new("I1"))),
        ]);
        let future = Collection::new(vec![group().with_section(Section::new("S2", "Series 2"))]);

        let out = generate_deletes(&current, &future).unwrap();

        assert_eq!(out.groups.len(), 1);
        let g = &out.groups[0];
        assert!(!g.deleted);
        assert_eq!(g.path, GroupPath::new("tripos", "part1", "subjA"));
        assert_eq!(g.name, "Module A");

        assert_eq!(g.sections.len(), 2);
        let s1 = &g.sections[0];
        assert_eq!((s1.id.as_str(), s1.name.as_str(), s1.deleted), ("S1", "Series 1", true));
        assert!(s1.items.is_empty());
        let s2 = &g.sections[1];
        assert_eq!(s2, &future.groups[0].sections[0]);
        assert!(s2.items.is_empty());
    }

    #[test]
    fn duplicate_event_ids_raise_exception() {
        let mut state = small();
        state.groups[1].sections[0].items = vec![event("E1"), event("E1")];
        let err = generate_deletes(&state, &state).unwrap_err();
        assert!(matches!(
            err,
            MergeError::DuplicateKey { level: Level::Item, side: Side::Current, .. }
        ));
    }

    #[test]
    fn duplicate_series_raise_exception() {
        let mut state = small();
        let dup = state.groups[0].sections[1].clone();
        state.groups[0].sections.push(dup);
        let err = generate_deletes(&state, &state).unwrap_err();
        assert!(matches!(err, MergeError::DuplicateKey { level: Level::Section, .. }));
    }

    #[test]
    fn duplicate_modules_raise_exception() {
        let mut state = small();
        state.groups.push(module("subjA", "Module A"));
        let err = generate_deletes(&state, &state).unwrap_err();
        assert!(matches!(err, MergeError::DuplicateKey { level: Level::Group, .. }));
    }

    #[test]
    fn duplicate_inside_deleted_subtree_is_still_rejected() {
        let current = Collection::new(vec![module("gone", "Gone").with_section(
            Section::new("S1", "Series")
                .with_item(Item::new("I1"))
                .with_item(Item::new("I1")),
        )]);
        let err = generate_deletes(&current, &Collection::empty()).unwrap_err();
        assert!(matches!(
            err,
            MergeError::DuplicateKey { level: Level::Item, side: Side::Current, .. }
        ));
    }

    #[test]
    fn duplicate_inside_future_only_subtree_is_rejected() {
        let future = Collection::new(vec![module("new", "New")
            .with_section(Section::new("S1", "a"))
            .with_section(Section::new("S1", "b"))]);
        let err = generate_deletes(&Collection::empty(), &future).unwrap_err();
        assert!(matches!(
            err,
            MergeError::DuplicateKey { level: Level::Section, side: Side::Future, .. }
        ));
    }

    #[test]
    fn invalid_input_is_rejected_before_merge() {
        let mut future = small();
        future.groups[0].sections[0].items[0].id = String::new();
        let err = generate_deletes(&small(), &future).unwrap_err();
        match err {
            MergeError::Schema(v) => assert_eq!(v.rule, "identifier"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn output_is_validated() {
        // Forbidding markers everywhere makes any deleting output invalid.
        let generator = DeleteGenerator::new(
            MergeConfig::default(),
            Box::new(StructuralValidator::with_default_rules(SchemaConfig::snapshot())),
        );
        let current = small();
        let future = Collection::new(vec![current.groups[0].clone()]);

        let err = generator.generate(&current, &future).unwrap_err();
        match err {
            MergeError::Schema(v) => assert_eq!(v.rule, "deletion-marker"),
            other => panic!("expected schema error, got {other:?}"),
        }
        assert!(generator.generate(&current, &current).is_ok());
    }

    #[test]
    fn custom_validator_is_consulted() {
        let generator = DeleteGenerator::new(
            MergeConfig::default(),
            Box::new(|c: &Collection| {
                if c.groups.len() > 2 {
                    Err(SchemaViolation::new("max-groups", vec![Violation::new("root", "too many")]))
                } else {
                    Ok(())
                }
            }),
        );
        let mut big = small();
        big.groups.push(module("subjC", "C"));
        assert!(generator.generate(&small(), &small()).is_ok());
        assert!(matches!(
            generator.generate(&small(), &big),
            Err(MergeError::Schema(_))
        ));
    }

    #[test]
    fn strict_policy_rejects_shared_items() {
        let generator = DeleteGenerator::new(MergeConfig::strict(), Box::new(StructuralValidator::default()));
        let err = generator.generate(&small(), &small()).unwrap_err();
        assert!(matches!(err, MergeError::StructuralInvariant { level: Level::Item, .. }));
        assert!(!err.is_data_error());
    }

    #[test]
    fn output_does_not_alias_inputs() {
        let current = small();
        let future = small();
        let mut out = generate_deletes(&current, &future).unwrap();
        out.groups[0].name.push_str(" (edited)");
        out.groups[0].sections.clear();
        assert_eq!(current, small());
        assert_eq!(future, small());
    }

    #[test]
    fn generator_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeleteGenerator>();
    }

    #[test]
    fn output_order_is_independent_of_input_order() {
        let current = small();
        let mut shuffled = small();
        shuffled.groups.reverse();
        for g in &mut shuffled.groups {
            g.sections.reverse();
            for s in &mut g.sections {
                s.items.reverse();
            }
        }
        let future = Collection::new(vec![small().groups[1].clone()]);

        let a = generate_deletes(&current, &future).unwrap();
        let b = generate_deletes(&shuffled, &future).unwrap();
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }
}
