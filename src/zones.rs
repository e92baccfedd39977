//! Drop-zone geometry: candidate rectangles computed once per drag, and the
//! selection rule that picks the most specific zone under the pointer.

use egui::{Pos2, Rect, pos2, vec2};

use crate::host::Host;
use crate::item::{Item, ItemId, ItemKind};
use crate::layout::Layout;

/// One side of a rectangle, as a docking target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The container orientation a split along this edge requires.
    pub(crate) fn required_kind(self) -> ItemKind {
        if self.is_horizontal() {
            ItemKind::Row
        } else {
            ItemKind::Column
        }
    }

    /// Whether the new branch lands before (left/top) or after the target.
    pub(crate) fn inserts_before(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// The structural mutation a drop zone performs when committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropAction {
    /// Insert as a tab; the index comes from the pointer's position against
    /// the existing tabs' midpoints at commit time.
    TabInsert { stack: ItemId },
    /// Sole tab of an empty stack's body.
    StackFill { stack: ItemId },
    /// Split the stack along an edge (or extend the enclosing row/column when
    /// its orientation already matches).
    SplitStack { stack: ItemId, edge: Edge },
    /// Whole-ground drop when the layout is empty.
    GroundFill,
    /// Wrap or extend the root along a ground edge.
    GroundEdge { edge: Edge },
}

/// An ephemeral candidate drop location. The set is rebuilt at the start of
/// each drag and discarded when the session ends.
#[derive(Clone, Copy, Debug)]
pub struct DropZone {
    pub owner: ItemId,
    /// Diagnostic only; never used for decisions.
    pub description: &'static str,
    /// Pointer-containment test area.
    pub hover: Rect,
    /// Visual feedback area; may differ from `hover`.
    pub highlight: Rect,
    pub action: DropAction,
    pub(crate) depth: u32,
}

/// Builds the full zone set for the current tree geometry.
pub(crate) fn compute_drop_zones<Pane>(
    layout: &Layout<Pane>,
    host: &dyn Host<Pane>,
) -> Vec<DropZone> {
    let mut zones = Vec::new();
    let ground = layout.ground();
    let ground_rect = layout
        .items()
        .rect(ground)
        .unwrap_or_else(|| layout.viewport());

    // A maximised stack covers the viewport; only it accepts drops.
    if let Some(stack) = layout.maximised_stack() {
        if layout.items().contains(stack) {
            push_stack_zones(layout, host, &mut zones, stack, 1);
            return zones;
        }
    }

    match layout.root() {
        None => zones.push(DropZone {
            owner: ground,
            description: "whole ground item",
            hover: ground_rect,
            highlight: ground_rect,
            action: DropAction::GroundFill,
            depth: 0,
        }),
        Some(root) => {
            push_ground_edge_zones(&mut zones, ground, ground_rect);
            visit(layout, host, &mut zones, root, 1);
        }
    }
    zones
}

fn visit<Pane>(
    layout: &Layout<Pane>,
    host: &dyn Host<Pane>,
    zones: &mut Vec<DropZone>,
    id: ItemId,
    depth: u32,
) {
    let Some(item) = layout.items().get(id) else { return };
    match item {
        Item::Stack(_) => push_stack_zones(layout, host, zones, id, depth),
        Item::Row(_) | Item::Column(_) | Item::Ground(_) => {
            for child in item.children() {
                visit(layout, host, zones, *child, depth + 1);
            }
        }
        Item::Component(_) => {}
    }
}

fn push_ground_edge_zones(zones: &mut Vec<DropZone>, ground: ItemId, rect: Rect) {
    let min_dim = rect.width().min(rect.height());
    if min_dim <= 0.0 {
        return;
    }
    let band = (min_dim * 0.22).clamp(32.0, 80.0).min(min_dim * 0.5);

    let (left_half, right_half) = rect.split_left_right_at_fraction(0.5);
    let (top_half, bottom_half) = rect.split_top_bottom_at_fraction(0.5);

    let sides = [
        (
            Edge::Left,
            "ground left edge",
            Rect::from_min_max(rect.min, pos2(rect.left() + band, rect.bottom())),
            left_half,
        ),
        (
            Edge::Right,
            "ground right edge",
            Rect::from_min_max(pos2(rect.right() - band, rect.top()), rect.max),
            right_half,
        ),
        (
            Edge::Top,
            "ground top edge",
            Rect::from_min_max(rect.min, pos2(rect.right(), rect.top() + band)),
            top_half,
        ),
        (
            Edge::Bottom,
            "ground bottom edge",
            Rect::from_min_max(pos2(rect.left(), rect.bottom() - band), rect.max),
            bottom_half,
        ),
    ];
    for (edge, description, hover, highlight) in sides {
        zones.push(DropZone {
            owner: ground,
            description,
            hover,
            highlight,
            action: DropAction::GroundEdge { edge },
            depth: 0,
        });
    }
}

fn push_stack_zones<Pane>(
    layout: &Layout<Pane>,
    host: &dyn Host<Pane>,
    zones: &mut Vec<DropZone>,
    id: ItemId,
    depth: u32,
) {
    let Some(rect) = layout.items().rect(id) else { return };
    if !rect.is_positive() {
        return;
    }
    let header_height = host.tab_bar_height().min(rect.height());
    let header = Rect::from_min_size(rect.min, vec2(rect.width(), header_height));
    let body = Rect::from_min_max(pos2(rect.left(), rect.top() + header_height), rect.max);

    zones.push(DropZone {
        owner: id,
        description: "stack tab strip",
        hover: header,
        highlight: header,
        action: DropAction::TabInsert { stack: id },
        depth,
    });

    let empty = layout
        .items()
        .get(id)
        .is_some_and(|item| item.children().is_empty());
    if empty || !body.is_positive() {
        zones.push(DropZone {
            owner: id,
            description: "empty stack body",
            hover: body,
            highlight: body,
            action: DropAction::StackFill { stack: id },
            depth,
        });
        return;
    }

    // The body partitions into proportional bands: left/right take the outer
    // 25% columns at full height, top/bottom the middle 50% of the width at
    // the outer halves of the height. Highlights are the matching half-rects.
    let x1 = body.left() + body.width() * 0.25;
    let x2 = body.left() + body.width() * 0.75;
    let mid_y = body.top() + body.height() * 0.5;

    let (left_half, right_half) = body.split_left_right_at_fraction(0.5);
    let (top_half, bottom_half) = body.split_top_bottom_at_fraction(0.5);

    let bands = [
        (
            Edge::Left,
            "stack left edge",
            Rect::from_min_max(body.min, pos2(x1, body.bottom())),
            left_half,
        ),
        (
            Edge::Right,
            "stack right edge",
            Rect::from_min_max(pos2(x2, body.top()), body.max),
            right_half,
        ),
        (
            Edge::Top,
            "stack top edge",
            Rect::from_min_max(pos2(x1, body.top()), pos2(x2, mid_y)),
            top_half,
        ),
        (
            Edge::Bottom,
            "stack bottom edge",
            Rect::from_min_max(pos2(x1, mid_y), pos2(x2, body.bottom())),
            bottom_half,
        ),
    ];
    for (edge, description, hover, highlight) in bands {
        zones.push(DropZone {
            owner: id,
            description,
            hover,
            highlight,
            action: DropAction::SplitStack { stack: id, edge },
            depth,
        });
    }
}

/// Picks the zone under the pointer: the most deeply nested owner wins, and
/// the smaller hover surface breaks ties at equal depth.
pub(crate) fn zone_at(zones: &[DropZone], pointer: Pos2) -> Option<usize> {
    zones
        .iter()
        .enumerate()
        .filter(|(_, zone)| zone.hover.contains(pointer))
        .max_by(|(_, a), (_, b)| {
            a.depth
                .cmp(&b.depth)
                .then_with(|| b.hover.area().total_cmp(&a.hover.area()))
        })
        .map(|(index, _)| index)
}

/// Tab index for a header drop: the pointer left of a tab's midpoint inserts
/// before it, right of it inserts after.
pub(crate) fn tab_insert_index<Pane>(
    layout: &Layout<Pane>,
    host: &dyn Host<Pane>,
    stack: ItemId,
    pointer_x: f32,
) -> usize {
    let Some(item) = layout.items().get(stack) else { return 0 };
    let children = item.children();
    let mut x = layout.items().rect(stack).map_or(0.0, |rect| rect.left());
    for (index, child) in children.iter().enumerate() {
        let Some(component) = layout.items().get(*child).and_then(Item::as_component) else {
            continue;
        };
        let width = host.tab_width(&component.pane, &component.title);
        if pointer_x < x + width * 0.5 {
            return index;
        }
        x += width;
    }
    children.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(owner: u64, hover: Rect, depth: u32) -> DropZone {
        DropZone {
            owner: crate::item::ItemId::from_u64(owner),
            description: "test",
            hover,
            highlight: hover,
            action: DropAction::GroundFill,
            depth,
        }
    }

    #[test]
    fn deeper_zone_wins_over_shallower() {
        let outer = zone(1, Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)), 0);
        let inner = zone(2, Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)), 2);
        let zones = vec![outer, inner];
        let picked = zone_at(&zones, pos2(10.0, 10.0)).expect("pointer is inside both");
        assert_eq!(zones[picked].owner, crate::item::ItemId::from_u64(2));
    }

    #[test]
    fn smaller_area_wins_at_equal_depth() {
        let big = zone(1, Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)), 1);
        let small = zone(2, Rect::from_min_max(pos2(0.0, 0.0), pos2(30.0, 30.0)), 1);
        let zones = vec![big, small];
        let picked = zone_at(&zones, pos2(10.0, 10.0)).expect("pointer is inside both");
        assert_eq!(zones[picked].owner, crate::item::ItemId::from_u64(2));

        // Outside the small zone, the big one is the only candidate.
        let picked = zone_at(&zones, pos2(90.0, 90.0)).expect("pointer is inside the big zone");
        assert_eq!(zones[picked].owner, crate::item::ItemId::from_u64(1));
    }

    #[test]
    fn no_zone_outside_all_hover_rects() {
        let zones = vec![zone(1, Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0)), 0)];
        assert_eq!(zone_at(&zones, pos2(50.0, 50.0)), None);
    }
}
