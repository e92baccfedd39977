//! Structural audit of a layout tree. Returns human-readable issue strings;
//! an intact tree yields an empty list. Used by the randomized model tests
//! and, behind [`crate::LayoutOptions::debug_integrity_checks`], after every
//! mutation.

use std::collections::HashSet;

use crate::item::{Item, ItemId, ItemKind};
use crate::layout::{Layout, SHARE_EPSILON};

pub fn layout_integrity_issues<Pane>(layout: &Layout<Pane>) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();
    let items = layout.items();
    let ground = layout.ground();

    let Some(ground_item) = items.get(ground) else {
        issues.push(format!("integrity: ground {ground:?} missing"));
        return issues;
    };
    if ground_item.kind() != ItemKind::Ground {
        issues.push(format!(
            "integrity: ground {ground:?} has kind {:?}",
            ground_item.kind()
        ));
    }

    let mut visited: HashSet<ItemId> = HashSet::new();
    let mut pending: Vec<ItemId> = vec![ground];

    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            issues.push(format!(
                "integrity: {id:?} reachable more than once (cycle or shared child)"
            ));
            continue;
        }
        let Some(item) = items.get(id) else {
            issues.push(format!("integrity: missing item {id:?} (reachable)"));
            continue;
        };
        let kind = item.kind();
        let children = item.children();

        match item {
            Item::Ground(_) => {
                if children.len() > 1 {
                    issues.push(format!(
                        "integrity: ground {id:?} has {} children",
                        children.len()
                    ));
                }
            }
            Item::Stack(stack) => {
                for child in &stack.children {
                    if items.kind(*child) != Some(ItemKind::Component) {
                        issues.push(format!(
                            "integrity: stack {id:?} holds non-component {child:?}"
                        ));
                    }
                }
                match stack.active {
                    Some(active) if !stack.children.contains(&active) => {
                        issues.push(format!(
                            "integrity: stack {id:?} active {active:?} not in children"
                        ));
                    }
                    None if !stack.children.is_empty() => {
                        issues.push(format!(
                            "integrity: non-empty stack {id:?} has no active child"
                        ));
                    }
                    _ => {}
                }
            }
            Item::Row(_) | Item::Column(_) => {
                if !children.is_empty() {
                    let total: f32 = children
                        .iter()
                        .map(|child| items.share_along(kind, *child))
                        .sum();
                    if (total - 100.0).abs() > SHARE_EPSILON.max(0.5) {
                        issues.push(format!(
                            "integrity: {kind:?} {id:?} share sum {total:.2} != 100"
                        ));
                    }
                }
                for child in children {
                    if let Some(child_kind) = items.kind(*child) {
                        if !kind.accepts(child_kind) {
                            issues.push(format!(
                                "integrity: {kind:?} {id:?} holds illegal {child_kind:?} {child:?}"
                            ));
                        }
                    }
                }
            }
            Item::Component(_) => {
                if !children.is_empty() {
                    issues.push(format!("integrity: component {id:?} has children"));
                }
            }
        }

        let mut local: HashSet<ItemId> = HashSet::new();
        for child in children {
            if !local.insert(*child) {
                issues.push(format!(
                    "integrity: parent {id:?} contains duplicate child {child:?}"
                ));
            }
            match items.parent_of(*child) {
                Some(parent) if parent == id => {}
                other => issues.push(format!(
                    "integrity: child {child:?} of {id:?} has parent pointer {other:?}"
                )),
            }
            pending.push(*child);
        }
    }

    // Every live slot must be reachable, except a component that is mid-drag.
    let dragged = layout.dragged_item();
    for id in items.item_ids() {
        if !visited.contains(&id) && Some(id) != dragged {
            issues.push(format!("integrity: unreachable item {id:?}"));
        }
    }

    issues
}
