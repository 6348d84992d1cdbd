//! Per-batch update orchestration.

use tracing::{debug, warn};

use crate::config::{UpdateRule, UpdateTable};
use crate::document::tree::{insert_into, prune_matching, InsertOutcome};
use crate::document::SceneDocument;
use crate::placement::PlacementBatch;
use crate::updater::item::build_item;

/// Observable result of applying one batch to the item subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Item nodes appended to their target container.
    pub inserted: usize,
    /// Entries skipped because no update rule matched their identity.
    pub unconfigured: usize,
    /// Built nodes dropped because the target container was absent.
    pub missing_container: usize,
}

struct GroupState {
    rule: UpdateRule,
    instance_no: usize,
}

/// Applies one placement batch to the editable item subtree.
///
/// Entries are grouped by consecutive identity. The first entry of each
/// resolved group removes every existing instance of that object before
/// the replacements are inserted, so only the latest placement of a
/// tracked object survives. Each entry's `id` is its 1-based position in
/// the batch, skipped entries included.
///
/// The previous-identity tracker is not advanced when an entry is
/// skipped, so a run of entries for the same unconfigured identity warns
/// on every one of them rather than only the first.
pub fn apply_batch(
    document: &mut SceneDocument,
    table: &UpdateTable,
    batch: &PlacementBatch,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut previous_identity = String::new();
    let mut group: Option<GroupState> = None;

    for (index, object) in batch.objects.iter().enumerate() {
        let sequence_id = (index + 1) as u64;

        if object.name != previous_identity {
            let rule = match table.get(&object.name) {
                Some(rule) => rule,
                None => {
                    warn!(
                        "Object '{}' is not defined in the update table (update_items); entry ignored",
                        object.name
                    );
                    outcome.unconfigured += 1;
                    continue;
                }
            };

            prune_matching(document.items_mut(), "name", &rule.update_object, false);
            group = Some(GroupState {
                rule: rule.clone(),
                instance_no: 0,
            });
        }

        let state = match group.as_mut() {
            Some(state) => state,
            None => {
                // Only reachable when the identity equals the initial
                // empty-string sentinel; no rule was ever resolved for it.
                warn!(
                    "Object '{}' is not defined in the update table (update_items); entry ignored",
                    object.name
                );
                outcome.unconfigured += 1;
                continue;
            }
        };

        let item = build_item(
            &state.rule,
            sequence_id,
            state.instance_no,
            object.new_pose.position.x,
            object.new_pose.position.y,
            object.new_pose.orientation,
        );

        previous_identity = object.name.clone();
        state.instance_no += 1;

        match insert_into(document.items_mut(), &state.rule.top_layer, item) {
            InsertOutcome::Inserted => outcome.inserted += 1,
            InsertOutcome::NoContainer => {
                debug!(
                    "No container named '{}' in the item tree; placement of '{}' dropped",
                    state.rule.top_layer, object.name
                );
                outcome.missing_container += 1;
            }
        }
    }

    outcome
}
