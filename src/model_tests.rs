use egui::{Rect, pos2, vec2};

use crate::host::NullHost;
use crate::integrity;
use crate::item::ItemKind;
use crate::layout::Layout;
use crate::options::LayoutOptions;

fn assert_layout_ok(layout: &Layout<u32>) {
    let issues = integrity::layout_integrity_issues(layout);
    assert!(
        issues.is_empty(),
        "layout integrity failed:\n{}\n{}",
        issues.join("\n"),
        layout.debug_dump()
    );
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xD0C3_D0C3_D0C3_D0C3)
    }

    fn next_u64(&mut self) -> u64 {
        // Simple LCG: deterministic, fast, no dependency.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005u64)
            .wrapping_add(1442695040888963407u64);
        self.0
    }

    fn next_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) != 0
    }

    fn next_f32(&mut self, upper: f32) -> f32 {
        (self.next_u64() % 10_000) as f32 / 10_000.0 * upper
    }
}

fn viewport() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 900.0))
}

fn components_of(layout: &Layout<u32>) -> Vec<crate::item::ItemId> {
    layout
        .items()
        .item_ids()
        .into_iter()
        .filter(|id| layout.items().kind(*id) == Some(ItemKind::Component))
        .collect()
}

fn stacks_of(layout: &Layout<u32>) -> Vec<crate::item::ItemId> {
    layout
        .items()
        .item_ids()
        .into_iter()
        .filter(|id| layout.items().kind(*id) == Some(ItemKind::Stack))
        .collect()
}

#[test]
fn model_random_mutations_stay_integrity_ok() {
    for seed in 1u64..=10u64 {
        let mut rng = Rng::new(seed);
        let mut host = NullHost;
        let mut layout: Layout<u32> = Layout::new(LayoutOptions::default());
        layout.init(&mut host, viewport()).expect("init");
        let mut serial: u32 = 0;

        for step in 0..400 {
            let roll = rng.next_u64() % 100;

            if roll < 35 {
                // Insert somewhere via the default selector chain.
                serial += 1;
                layout
                    .add_component(&mut host, serial, format!("panel {serial}"), None)
                    .expect("add_component");
            } else if roll < 55 {
                // Drag a random component to a random pointer; sometimes
                // cancel instead of releasing.
                let components = components_of(&layout);
                if components.is_empty() {
                    continue;
                }
                let id = components[rng.next_usize(components.len())];
                layout.start_drag(&mut host, id).expect("start_drag");
                for _ in 0..rng.next_usize(4) {
                    let p = pos2(rng.next_f32(1400.0) - 100.0, rng.next_f32(1100.0) - 100.0);
                    layout.drag_move(p).expect("drag_move");
                }
                let outcome = if rng.next_bool() {
                    layout.end_drag(&mut host).expect("end_drag")
                } else {
                    layout.cancel_drag(&mut host).expect("cancel_drag")
                };
                let _ = outcome;
            } else if roll < 65 {
                // Remove (destroy) a random component or whole stack.
                let victims = if rng.next_bool() {
                    components_of(&layout)
                } else {
                    stacks_of(&layout)
                };
                if victims.is_empty() {
                    continue;
                }
                let id = victims[rng.next_usize(victims.len())];
                layout.remove_child(&mut host, id, false).expect("remove");
            } else if roll < 70 {
                // Replace a random component, then dispose of the old one.
                let components = components_of(&layout);
                if components.is_empty() {
                    continue;
                }
                let old = components[rng.next_usize(components.len())];
                serial += 1;
                let new = layout.new_component(&mut host, serial, format!("panel {serial}"));
                layout.replace_child(&mut host, old, new).expect("replace");
                layout.destroy_detached(&mut host, old).expect("destroy old");
            } else if roll < 80 {
                let stacks = stacks_of(&layout);
                if stacks.is_empty() {
                    continue;
                }
                let id = stacks[rng.next_usize(stacks.len())];
                if rng.next_bool() {
                    layout.maximise_stack(&mut host, id).expect("maximise");
                } else {
                    layout.minimise_stack(&mut host, id).expect("minimise");
                }
            } else if roll < 88 {
                let components = components_of(&layout);
                if components.is_empty() {
                    continue;
                }
                let id = components[rng.next_usize(components.len())];
                layout.focus_component(&mut host, id).expect("focus");
            } else if roll < 95 {
                let size = vec2(
                    400.0 + rng.next_f32(1200.0),
                    300.0 + rng.next_f32(900.0),
                );
                layout
                    .resize(&mut host, Rect::from_min_size(pos2(0.0, 0.0), size))
                    .expect("resize");
            } else {
                // Batch several inserts into one size pass.
                let mut scope = layout.defer_size_updates(&mut host);
                let count = 1 + rng.next_usize(3);
                for _ in 0..count {
                    serial += 1;
                    let (inner, inner_host) = scope.parts();
                    inner
                        .add_component(inner_host, serial, format!("panel {serial}"), None)
                        .expect("batched add_component");
                }
                drop(scope);
            }

            assert_layout_ok(&layout);
            let _ = layout.take_events();
            let _ = step;
        }
    }
}

#[test]
fn model_round_trip_preserves_structure() {
    let mut rng = Rng::new(7);
    let mut host = NullHost;
    let mut layout: Layout<u32> = Layout::new(LayoutOptions::default());
    layout.init(&mut host, viewport()).expect("init");

    for serial in 0..12u32 {
        layout
            .add_component(&mut host, serial, format!("panel {serial}"), None)
            .expect("add_component");
        // A few drags so the tree grows rows/columns, not just one stack.
        if serial % 3 == 0 {
            let components = components_of(&layout);
            let id = components[rng.next_usize(components.len())];
            layout.start_drag(&mut host, id).expect("start_drag");
            layout
                .drag_move(pos2(rng.next_f32(1200.0), rng.next_f32(900.0)))
                .expect("drag_move");
            layout.end_drag(&mut host).expect("end_drag");
        }
    }
    assert_layout_ok(&layout);

    let snapshot = layout.to_config();
    let mut rebuilt =
        Layout::from_config(snapshot.clone(), LayoutOptions::default()).expect("from_config");
    rebuilt.init(&mut host, viewport()).expect("init rebuilt");
    assert_layout_ok(&rebuilt);
    assert_eq!(rebuilt.to_config(), snapshot);
}
