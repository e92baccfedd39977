use egui::{Rect, pos2, vec2};

use crate::config::{ItemConfig, LayoutConfig};
use crate::drag::DragOutcome;
use crate::error::LayoutError;
use crate::events::LayoutEvent;
use crate::host::{Host, NullHost};
use crate::item::{Item, ItemId, ItemKind};
use crate::layout::{Layout, Location, LocationSelector};
use crate::options::{LayoutOptions, ResponsiveMode};

fn viewport() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(1000.0, 800.0))
}

fn ready(
    config: LayoutConfig<&'static str>,
    options: LayoutOptions,
) -> (Layout<&'static str>, NullHost) {
    let mut host = NullHost;
    let mut layout = Layout::from_config(config, options).expect("config is well-formed");
    layout.init(&mut host, viewport()).expect("init");
    (layout, host)
}

fn find_component(layout: &Layout<&'static str>, pane: &str) -> ItemId {
    layout
        .items()
        .item_ids()
        .into_iter()
        .find(|id| {
            layout
                .items()
                .get(*id)
                .and_then(Item::as_component)
                .is_some_and(|component| component.pane == pane)
        })
        .unwrap_or_else(|| panic!("no component hosting {pane:?}"))
}

fn children_of(layout: &Layout<&'static str>, id: ItemId) -> Vec<ItemId> {
    layout
        .items()
        .get(id)
        .map_or(Vec::new(), |item| item.children().to_vec())
}

// ----------------------------------------------------------------------------
// Drop scenarios

#[test]
fn drop_on_empty_ground_creates_single_stack_root() {
    let mut host = NullHost;
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");

    let dropped = layout
        .start_external_drag(&mut host, "a", "A")
        .expect("external drag");
    layout.drag_move(pos2(500.0, 400.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");

    assert_eq!(outcome, DragOutcome::Committed);
    let root = layout.root().expect("ground has exactly one child");
    assert_eq!(layout.items().kind(root), Some(ItemKind::Stack));
    assert_eq!(children_of(&layout, root), vec![dropped]);
    let stack = layout.items().get(root).and_then(Item::as_stack).expect("stack");
    assert_eq!(stack.active(), Some(dropped));
    assert!(layout
        .take_events()
        .contains(&LayoutEvent::ItemDropped(dropped)));
}

#[test]
fn drop_on_tab_left_half_inserts_before() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![ItemConfig::component("a", "A")]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let first = find_component(&layout, "a");
    let stack = layout.root().expect("root stack");

    let second = layout
        .start_external_drag(&mut host, "b", "B")
        .expect("external drag");
    // NullHost tabs are 120 wide; x=30 is in the left half of tab 0.
    layout.drag_move(pos2(30.0, 10.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");

    assert_eq!(outcome, DragOutcome::Committed);
    assert_eq!(children_of(&layout, stack), vec![second, first]);
}

#[test]
fn drop_on_matching_row_edge_halves_adjacent_share_only() {
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]).with_width(50.0),
        ItemConfig::stack(vec![ItemConfig::component("b", "B")]).with_width(50.0),
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let row = layout.root().expect("root row");
    let original = children_of(&layout, row);
    assert_eq!(original.len(), 2);

    layout
        .start_external_drag(&mut host, "c", "C")
        .expect("external drag");
    layout.drag_move(pos2(990.0, 400.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");
    assert_eq!(outcome, DragOutcome::Committed);

    // No new wrapper level: the row itself gained a third column, and only
    // the adjacent sibling paid for it.
    assert_eq!(layout.root(), Some(row));
    let columns = children_of(&layout, row);
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0], original[0]);
    assert_eq!(columns[1], original[1]);
    let widths: Vec<f32> = columns
        .iter()
        .map(|id| layout.items().width_of(*id))
        .collect();
    assert_eq!(widths, vec![50.0, 25.0, 25.0]);
}

#[test]
fn drop_on_stack_edge_with_mismatched_parent_wraps_in_column() {
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]).with_width(50.0),
        ItemConfig::stack(vec![ItemConfig::component("b", "B")]).with_width(50.0),
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let row = layout.root().expect("root row");
    let left_stack = children_of(&layout, row)[0];

    layout
        .start_external_drag(&mut host, "c", "C")
        .expect("external drag");
    // Bottom band of the left stack's body.
    layout.drag_move(pos2(250.0, 700.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");
    assert_eq!(outcome, DragOutcome::Committed);

    // The left stack was replaced by a column holding it and the new stack.
    let columns = children_of(&layout, row);
    assert_eq!(columns.len(), 2);
    let wrapper = columns[0];
    assert_eq!(layout.items().kind(wrapper), Some(ItemKind::Column));
    // Wrapper inherits the replaced child's row share.
    assert_eq!(layout.items().width_of(wrapper), 50.0);
    let wrapped = children_of(&layout, wrapper);
    assert_eq!(wrapped.len(), 2);
    assert_eq!(wrapped[0], left_stack);
    let heights: Vec<f32> = wrapped
        .iter()
        .map(|id| layout.items().height_of(*id))
        .collect();
    assert_eq!(heights, vec![50.0, 50.0]);
}

#[test]
fn responsive_collapse_moves_rightmost_columns_into_first_stack() {
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]),
        ItemConfig::stack(vec![ItemConfig::component("b", "B")]),
        ItemConfig::stack(vec![ItemConfig::component("c", "C")]),
        ItemConfig::stack(vec![ItemConfig::component("d", "D")]),
    ]));
    let mut options = LayoutOptions::default();
    options.min_item_width = 200.0;
    options.responsive_mode = ResponsiveMode::OnLoad;

    let mut host = NullHost;
    let mut layout = Layout::from_config(config, options).expect("config");
    layout
        .init(&mut host, Rect::from_min_size(pos2(0.0, 0.0), vec2(500.0, 400.0)))
        .expect("init");

    // 4 columns × 200 > 500 ⇒ finalColumnCount = 2; the two right-most
    // columns' components land in the first stack, in order.
    let row = layout.root().expect("root row");
    let columns = children_of(&layout, row);
    assert_eq!(columns.len(), 2);

    let first_stack = columns[0];
    let tabs = children_of(&layout, first_stack);
    assert_eq!(tabs.len(), 3);
    assert_eq!(tabs[0], find_component(&layout, "a"));
    assert_eq!(tabs[1], find_component(&layout, "c"));
    assert_eq!(tabs[2], find_component(&layout, "d"));
    assert_eq!(children_of(&layout, columns[1]).len(), 1);

    let issues = crate::integrity::layout_integrity_issues(&layout);
    assert!(issues.is_empty(), "{}", issues.join("\n"));
}

#[test]
fn release_outside_all_zones_reverts_to_original_index() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![
        ItemConfig::component("a", "A"),
        ItemConfig::component("b", "B"),
    ]));
    let mut options = LayoutOptions::default();
    options.constrain_drag_to_container = false;
    let (mut layout, mut host) = ready(config, options);
    let stack = layout.root().expect("root stack");
    let a = find_component(&layout, "a");
    let b = find_component(&layout, "b");

    layout.start_drag(&mut host, a).expect("start_drag");
    layout.drag_move(pos2(5000.0, 5000.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");

    assert_eq!(outcome, DragOutcome::Reverted);
    assert_eq!(children_of(&layout, stack), vec![a, b]);
    let active = layout
        .items()
        .get(stack)
        .and_then(Item::as_stack)
        .and_then(crate::item::Stack::active);
    assert_eq!(active, Some(a));
}

#[test]
fn release_outside_all_zones_discards_external_node() {
    let mut options = LayoutOptions::default();
    options.constrain_drag_to_container = false;
    let mut host = NullHost;
    let mut layout: Layout<&'static str> = Layout::new(options);
    layout.init(&mut host, viewport()).expect("init");
    // Give the layout some content so zones exist but aren't hit.
    layout
        .add_component(&mut host, "a", "A", None)
        .expect("add_component");

    let external = layout
        .start_external_drag(&mut host, "x", "X")
        .expect("external drag");
    layout.drag_move(pos2(5000.0, 5000.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");

    assert_eq!(outcome, DragOutcome::Discarded);
    assert!(!layout.items().contains(external));
}

#[test]
fn zone_selection_is_sticky_across_gaps() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![ItemConfig::component("a", "A")]));
    let mut options = LayoutOptions::default();
    options.constrain_drag_to_container = false;
    let (mut layout, mut host) = ready(config, options);
    let stack = layout.root().expect("root stack");

    layout
        .start_external_drag(&mut host, "b", "B")
        .expect("external drag");
    // Left band of the stack body…
    layout.drag_move(pos2(100.0, 400.0)).expect("drag_move");
    assert!(layout.drag_highlight().is_some());
    // …then out of every zone: the selection must not flicker away.
    layout.drag_move(pos2(5000.0, 5000.0)).expect("drag_move");
    assert!(layout.drag_highlight().is_some());

    let outcome = layout.end_drag(&mut host).expect("end_drag");
    assert_eq!(outcome, DragOutcome::Committed);

    // Left-edge split: the old stack was wrapped into a row, new stack first.
    let root = layout.root().expect("root");
    assert_eq!(layout.items().kind(root), Some(ItemKind::Row));
    let children = children_of(&layout, root);
    assert_eq!(children.len(), 2);
    assert_eq!(children[1], stack);
}

#[test]
fn release_is_exactly_once() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![
        ItemConfig::component("a", "A"),
        ItemConfig::component("b", "B"),
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let a = find_component(&layout, "a");

    layout.start_drag(&mut host, a).expect("start_drag");
    layout.end_drag(&mut host).expect("first release");
    assert_eq!(layout.end_drag(&mut host), Err(LayoutError::NoActiveDrag));
    assert_eq!(
        layout.drag_move(pos2(1.0, 1.0)),
        Err(LayoutError::NoActiveDrag)
    );
    // The component is back exactly once.
    let stack = layout.root().expect("root stack");
    assert_eq!(children_of(&layout, stack).len(), 2);
}

#[test]
fn cancel_mid_drag_still_reaches_a_terminal_outcome() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![
        ItemConfig::component("a", "A"),
        ItemConfig::component("b", "B"),
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let a = find_component(&layout, "a");

    layout.start_drag(&mut host, a).expect("start_drag");
    // Pointer is over a perfectly good zone; cancellation must not commit.
    layout.drag_move(pos2(500.0, 400.0)).expect("drag_move");
    let outcome = layout.cancel_drag(&mut host).expect("cancel");
    assert_eq!(outcome, DragOutcome::Reverted);
    assert!(layout.items().contains(a));
}

#[test]
fn revert_falls_back_to_selector_chain_when_origin_collapsed() {
    // Two stacks in a row; drag the sole component of the right stack. Its
    // stack collapses away, so revert must find a new home, not lose the node.
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]),
        ItemConfig::stack(vec![ItemConfig::component("b", "B")]),
    ]));
    let mut options = LayoutOptions::default();
    options.constrain_drag_to_container = false;
    let (mut layout, mut host) = ready(config, options);
    let b = find_component(&layout, "b");

    layout.start_drag(&mut host, b).expect("start_drag");
    // The right stack emptied and was removed; the row collapsed too.
    layout.drag_move(pos2(5000.0, 5000.0)).expect("drag_move");
    let outcome = layout.end_drag(&mut host).expect("end_drag");

    assert_eq!(outcome, DragOutcome::Reverted);
    assert!(layout.items().contains(b));
    let issues = crate::integrity::layout_integrity_issues(&layout);
    assert!(issues.is_empty(), "{}", issues.join("\n"));
}

// ----------------------------------------------------------------------------
// Maximise / minimise

#[test]
fn maximise_fills_viewport_and_flags_components() {
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]),
        ItemConfig::stack(vec![ItemConfig::component("b", "B")]),
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let a = find_component(&layout, "a");
    let b = find_component(&layout, "b");
    let sa = layout.items().parent_of(a).expect("a's stack");
    let sb = layout.items().parent_of(b).expect("b's stack");

    layout.maximise_stack(&mut host, sa).expect("maximise");
    assert_eq!(layout.maximised_stack(), Some(sa));
    assert_eq!(layout.items().rect(sa), Some(viewport()));
    assert!(layout.component_is_stack_maximised(a));
    assert!(!layout.component_is_stack_maximised(b));
    assert!(layout.take_events().contains(&LayoutEvent::Maximised(sa)));

    // Idempotent: maximising again emits nothing.
    layout.maximise_stack(&mut host, sa).expect("maximise again");
    assert_eq!(layout.take_events(), Vec::new());

    // Switching first fully minimises the current stack.
    layout.maximise_stack(&mut host, sb).expect("switch");
    let events = layout.take_events();
    let minimised_at = events
        .iter()
        .position(|e| *e == LayoutEvent::Minimised(sa))
        .expect("minimised event");
    let maximised_at = events
        .iter()
        .position(|e| *e == LayoutEvent::Maximised(sb))
        .expect("maximised event");
    assert!(minimised_at < maximised_at, "minimise precedes maximise");
    assert!(!layout.component_is_stack_maximised(a));
    assert!(layout.component_is_stack_maximised(b));

    // Minimising a stack that is not maximised is a no-op.
    layout.minimise_stack(&mut host, sa).expect("no-op minimise");
    assert_eq!(layout.take_events(), Vec::new());

    layout.minimise_stack(&mut host, sb).expect("minimise");
    assert_eq!(layout.maximised_stack(), None);
    let rect = layout.items().rect(sb).expect("sb rect");
    assert!(rect.width() < viewport().width());
}

// ----------------------------------------------------------------------------
// Batching & debounce

#[derive(Default)]
struct CountingHost {
    created: usize,
    destroyed: usize,
    bounds: usize,
    visibility: usize,
}

impl Host<&'static str> for CountingHost {
    fn create_surface(&mut self, _id: ItemId, _pane: &&'static str) {
        self.created += 1;
    }

    fn destroy_surface(&mut self, _id: ItemId) {
        self.destroyed += 1;
    }

    fn set_surface_bounds(&mut self, _id: ItemId, _rect: Rect) {
        self.bounds += 1;
    }

    fn set_surface_visible(&mut self, _id: ItemId, _visible: bool) {
        self.visibility += 1;
    }
}

#[test]
fn size_scope_coalesces_mutations_into_one_pass() {
    let mut host = CountingHost::default();
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");
    assert_eq!(host.bounds, 0);

    {
        let mut scope = layout.defer_size_updates(&mut host);
        for (pane, title) in [("a", "A"), ("b", "B"), ("c", "C")] {
            let (layout, host) = scope.parts();
            layout
                .add_component(host, pane, title, None)
                .expect("batched add");
        }
        // Reentrancy: a nested region must not flush early.
        {
            let mut nested = scope.nested();
            let (layout, host) = nested.parts();
            layout
                .add_component(host, "d", "D", None)
                .expect("nested add");
        }
    }

    // One pass over four components, instead of 1+2+3+4.
    assert_eq!(host.created, 4);
    assert_eq!(host.bounds, 4);
}

#[test]
fn virtual_scope_defers_visibility_sync_to_outermost_close() {
    let mut host = CountingHost::default();
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");
    let a = layout.add_component(&mut host, "a", "A", None).expect("add");
    let b = layout.add_component(&mut host, "b", "B", None).expect("add");
    let stack = layout.items().parent_of(a).expect("stack");

    let before = host.visibility;
    {
        let mut scope = layout.defer_visibility_updates(&mut host);
        {
            let mut nested = scope.nested();
            let (layout, host) = nested.parts();
            layout.set_active(host, stack, a).expect("activate a");
            layout.set_active(host, stack, b).expect("activate b");
        }
        // Still held by the outer scope; nothing synced yet.
    }
    // One visibility walk over both tabs, after the outermost close.
    assert_eq!(host.visibility, before + 2);
}

#[test]
fn unbatched_mutations_pay_one_pass_each() {
    let mut host = CountingHost::default();
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");

    layout.add_component(&mut host, "a", "A", None).expect("add");
    layout.add_component(&mut host, "b", "B", None).expect("add");
    layout.add_component(&mut host, "c", "C", None).expect("add");
    assert_eq!(host.bounds, 1 + 2 + 3);
}

#[test]
fn destroying_a_subtree_tears_down_surfaces() {
    let mut host = CountingHost::default();
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");
    layout.add_component(&mut host, "a", "A", None).expect("add");
    let b = layout.add_component(&mut host, "b", "B", None).expect("add");

    layout.remove_child(&mut host, b, false).expect("remove");
    assert_eq!(host.destroyed, 1);
    assert!(!layout.items().contains(b));
}

#[test]
fn debounced_resize_fires_once_per_quiescent_window() {
    use std::time::{Duration, Instant};

    let mut host = NullHost;
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");

    let t0 = Instant::now();
    let small = Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0));
    let smaller = Rect::from_min_size(pos2(0.0, 0.0), vec2(320.0, 240.0));

    layout.notify_resize(small, t0);
    assert!(!layout
        .tick(&mut host, t0 + Duration::from_millis(50))
        .expect("tick"));
    // A newer resize cancels and reschedules the pending recompute.
    layout.notify_resize(smaller, t0 + Duration::from_millis(60));
    assert!(!layout
        .tick(&mut host, t0 + Duration::from_millis(120))
        .expect("tick"));
    assert!(layout
        .tick(&mut host, t0 + Duration::from_millis(200))
        .expect("tick"));
    assert_eq!(layout.viewport(), smaller);
    assert!(!layout
        .tick(&mut host, t0 + Duration::from_millis(400))
        .expect("tick"));
}

// ----------------------------------------------------------------------------
// Errors & selectors

#[test]
fn operations_before_init_are_precondition_violations() {
    let mut host = NullHost;
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    assert_eq!(
        layout.add_component(&mut host, "a", "A", None),
        Err(LayoutError::NotInitialised)
    );
    layout.init(&mut host, viewport()).expect("init");
    assert_eq!(
        layout.init(&mut host, viewport()),
        Err(LayoutError::AlreadyInitialised)
    );
}

#[test]
fn structural_violations_fail_before_mutating() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![ItemConfig::component("a", "A")]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());
    let stack = layout.root().expect("root stack");
    let a = find_component(&layout, "a");

    // A stack cannot hold a row.
    let row = layout.new_row();
    assert_eq!(
        layout.add_child(&mut host, stack, row, None),
        Err(LayoutError::InvalidChildKind {
            parent: ItemKind::Stack,
            child: ItemKind::Row,
        })
    );
    assert_eq!(children_of(&layout, stack), vec![a]);

    // Ground holds at most one child.
    let extra = layout.new_component(&mut host, "x", "X");
    assert_eq!(
        layout.add_child(&mut host, layout.ground(), extra, None),
        Err(LayoutError::GroundOccupied)
    );

    // Activating a non-member is a structural violation.
    assert_eq!(
        layout.set_active(&mut host, stack, extra),
        Err(LayoutError::ActiveNotInStack {
            stack,
            active: extra,
        })
    );

    // Drag exclusivity is a caller error.
    layout.start_drag(&mut host, a).expect("start_drag");
    assert_eq!(
        layout.start_drag(&mut host, a),
        Err(LayoutError::DragInProgress)
    );
    layout.cancel_drag(&mut host).expect("cancel");
}

#[test]
fn ground_refuses_serialization() {
    let config = LayoutConfig::new(ItemConfig::stack(vec![ItemConfig::component("a", "A")]));
    let (layout, _host) = ready(config, LayoutOptions::default());
    assert_eq!(
        layout.item_config(layout.ground()).map(|_| ()),
        Err(LayoutError::CannotSerializeGround)
    );
}

#[test]
fn location_selector_chain_tries_alternatives_in_order() {
    let mut host = NullHost;
    let mut layout: Layout<&'static str> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");

    // Empty layout: only Root matches, pointing at the empty ground.
    assert_eq!(
        layout.find_location(crate::layout::DEFAULT_LOCATION_SELECTORS),
        Some(Location {
            parent: layout.ground(),
            index: 0,
        })
    );
    assert_eq!(layout.find_location(&[LocationSelector::FirstStack]), None);

    let a = layout.add_component(&mut host, "a", "A", None).expect("add");
    let stack = layout.items().parent_of(a).expect("stack");

    // Now the first stack wins over Root.
    assert_eq!(
        layout.find_location(crate::layout::DEFAULT_LOCATION_SELECTORS),
        Some(Location {
            parent: stack,
            index: 1,
        })
    );

    // A focused component pulls insertion into its own stack.
    layout.focus_component(&mut host, a).expect("focus");
    assert_eq!(
        layout.find_location(&[LocationSelector::FocusedStack]),
        Some(Location {
            parent: stack,
            index: 1,
        })
    );
}

#[test]
fn wants_maximised_flag_is_consumed_during_init() {
    let config = LayoutConfig::new(ItemConfig::row(vec![
        ItemConfig::stack(vec![ItemConfig::component("a", "A")]),
        ItemConfig::Stack {
            children: vec![ItemConfig::component("b", "B")],
            active_index: None,
            maximised: true,
            width: 0.0,
            height: 0.0,
        },
    ]));
    let (mut layout, mut host) = ready(config, LayoutOptions::default());

    let b = find_component(&layout, "b");
    let sb = layout.items().parent_of(b).expect("b's stack");
    assert_eq!(layout.maximised_stack(), Some(sb));
    assert_eq!(layout.items().rect(sb), Some(viewport()));
    assert!(layout.take_events().contains(&LayoutEvent::Maximised(sb)));

    // The flag also round-trips out.
    let snapshot = layout.to_config();
    let ItemConfig::Row { children, .. } = snapshot.root.expect("root") else {
        panic!("expected a row root");
    };
    let ItemConfig::Stack { maximised, .. } = &children[1] else {
        panic!("expected a stack");
    };
    assert!(*maximised);

    layout.minimise_stack(&mut host, sb).expect("minimise");
    assert_eq!(layout.maximised_stack(), None);
}

#[test]
fn active_tab_survives_config_round_trip() {
    let config = LayoutConfig::new(ItemConfig::Stack {
        children: vec![
            ItemConfig::component("a", "A"),
            ItemConfig::component("b", "B"),
        ],
        active_index: Some(1),
        maximised: false,
        width: 0.0,
        height: 0.0,
    });
    let (layout, _host) = ready(config, LayoutOptions::default());

    let snapshot = layout.to_config();
    let ItemConfig::Stack { active_index, .. } = snapshot.root.expect("root") else {
        panic!("expected a stack root");
    };
    assert_eq!(active_index, Some(1));
}
