//! Read-view resolution: local drafts overlaid on global values.
//!
//! [`merge`] is the single authority for "what does a read see" - every
//! merged view produced by a session overlay goes through it.

use std::collections::{HashMap, HashSet};

use epicenter_core::EntityId;

use crate::traits::CacheEntity;

/// Resolve local drafts overlaid on a list of global values.
///
/// Every global item keeps its position; an item whose id also has a draft is
/// replaced by that draft in place. Drafts whose ids have no global
/// counterpart are appended after the global-derived entries, each exactly
/// once, in first-occurrence order. When `local` carries duplicate ids the
/// first entry wins. Empty inputs produce an empty vector.
pub fn merge<T: CacheEntity>(local: &[T], global: &[T]) -> Vec<T> {
    let mut drafts: HashMap<EntityId, &T> = HashMap::with_capacity(local.len());
    let mut pending: Vec<&T> = Vec::with_capacity(local.len());
    for item in local {
        if !drafts.contains_key(&item.entity_id()) {
            drafts.insert(item.entity_id(), item);
            pending.push(item);
        }
    }

    let mut merged = Vec::with_capacity(global.len() + pending.len());
    let mut overridden: HashSet<EntityId> = HashSet::new();
    for item in global {
        match drafts.get(&item.entity_id()) {
            Some(draft) => {
                merged.push((*draft).clone());
                overridden.insert(item.entity_id());
            }
            None => merged.push(item.clone()),
        }
    }

    for draft in pending {
        if !overridden.contains(&draft.entity_id()) {
            merged.push(draft.clone());
        }
    }

    merged
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use epicenter_core::Event;
    use epicenter_test_utils::generators::{arb_pooled_events, arb_unique_events};
    use proptest::prelude::*;

    fn dedupe_by_id(events: Vec<Event>) -> Vec<Event> {
        let mut seen = HashSet::new();
        events
            .into_iter()
            .filter(|e| seen.insert(e.id))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Merging an empty draft list over any global list reproduces the
        /// global list exactly, order included.
        #[test]
        fn prop_merge_identity(global in arb_unique_events(16)) {
            let merged = merge(&[], &global);
            prop_assert_eq!(merged, global);
        }

        /// Global positions survive the merge: the i-th output id equals the
        /// i-th global id, whatever the drafts contain.
        #[test]
        fn prop_merge_preserves_global_positions(
            local in arb_pooled_events(6, 10),
            global in arb_pooled_events(6, 10),
        ) {
            let global = dedupe_by_id(global);
            let merged = merge(&local, &global);
            prop_assert!(merged.len() >= global.len());
            for (i, item) in global.iter().enumerate() {
                prop_assert_eq!(merged[i].entity_id(), item.entity_id());
            }
        }

        /// With a unique-id global list, output ids are unique: each net-new
        /// draft appears exactly once, overrides replace in place.
        #[test]
        fn prop_merge_output_ids_unique(
            local in arb_pooled_events(6, 10),
            global in arb_pooled_events(6, 10),
        ) {
            let global = dedupe_by_id(global);
            let merged = merge(&local, &global);
            let mut seen = HashSet::new();
            for item in &merged {
                prop_assert!(seen.insert(item.entity_id()));
            }
        }

        /// Wherever a drafted id appears in the output, the value is the
        /// first draft carrying that id, never the global value.
        #[test]
        fn prop_merge_first_draft_wins(
            local in arb_pooled_events(6, 10),
            global in arb_pooled_events(6, 10),
        ) {
            let global = dedupe_by_id(global);
            let merged = merge(&local, &global);
            for draft in &local {
                let first = local
                    .iter()
                    .find(|l| l.entity_id() == draft.entity_id())
                    .expect("draft exists in its own list");
                let output = merged
                    .iter()
                    .find(|m| m.entity_id() == draft.entity_id())
                    .expect("every drafted id reaches the output");
                prop_assert_eq!(output, first);
            }
        }
    }
}
