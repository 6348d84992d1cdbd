//! Recursive search-and-insert and filtered removal over the item tree.
//!
//! Item trees are nested mappings: a container carries a `name` and a
//! `children` list of further item mappings. Both operations here walk
//! that shape and nothing else; unrelated keys pass through untouched.

use serde_yaml::Value;
use tracing::debug;

/// Result of a single-target insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The item was appended to the first matching container.
    Inserted,
    /// No container with the requested name accepted the item.
    NoContainer,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Appends `item` to the `children` of the first mapping whose `name`
/// equals `target_name`, searching depth-first, pre-order, left-to-right.
///
/// At most one insertion happens per call: once a sequence element accepts
/// the item, later siblings are not visited. Absence of any matching
/// container is a normal outcome, not an error.
pub fn insert_under(root: &mut Value, target_name: &str, item: Value) -> InsertOutcome {
    let mut item = Some(item);
    if try_insert(root, target_name, &mut item) {
        InsertOutcome::Inserted
    } else {
        InsertOutcome::NoContainer
    }
}

/// List-root variant of [`insert_under`]; the item subtree root is a
/// sequence rather than a single node.
pub fn insert_into(list: &mut [Value], target_name: &str, item: Value) -> InsertOutcome {
    let mut item = Some(item);
    if list
        .iter_mut()
        .any(|element| try_insert(element, target_name, &mut item))
    {
        InsertOutcome::Inserted
    } else {
        InsertOutcome::NoContainer
    }
}

fn try_insert(node: &mut Value, target_name: &str, item: &mut Option<Value>) -> bool {
    match node {
        Value::Sequence(elements) => elements
            .iter_mut()
            .any(|element| try_insert(element, target_name, item)),
        Value::Mapping(_) => {
            if node.get("name").and_then(Value::as_str) == Some(target_name) {
                match node.get_mut("children").and_then(Value::as_sequence_mut) {
                    Some(children) => {
                        if let Some(item) = item.take() {
                            children.push(item);
                        }
                        true
                    }
                    None => {
                        // A container is expected to carry a children list.
                        debug!("Matched container '{}' has no children list", target_name);
                        false
                    }
                }
            } else {
                match node.get_mut("children") {
                    Some(children) => try_insert(children, target_name, item),
                    None => false,
                }
            }
        }
        _ => false,
    }
}

/// Removes every element whose `field` value contains `needle`, recursing
/// into `children` lists first so nested instances are cleaned even when
/// their parent survives. Surviving elements keep their relative order,
/// and pruning an already-pruned list changes nothing.
///
/// `exact_match` is accepted by the contract but matching is always
/// substring containment, regardless of its value.
pub fn prune_matching(list: &mut Vec<Value>, field: &str, needle: &str, _exact_match: bool) {
    list.retain_mut(|element| {
        if let Some(children) = element.get_mut("children").and_then(Value::as_sequence_mut) {
            prune_matching(children, field, needle, _exact_match);
        }

        let matched = element
            .get(field)
            .and_then(Value::as_str)
            .map(|value| value.contains(needle))
            .unwrap_or(false);
        !matched
    });
}
