//! Responsive column collapse: when the root row no longer fits the
//! configured minimum column width, surplus right-most columns fold their
//! components into the first stack. One-directional; never undone
//! automatically.

use crate::host::Host;
use crate::item::{ItemId, ItemKind};
use crate::layout::Layout;

impl<Pane> Layout<Pane> {
    pub(crate) fn responsive_collapse(&mut self, host: &mut dyn Host<Pane>) {
        let min_width = self.options.min_item_width;
        if min_width <= 0.0 {
            return;
        }
        let Some(root) = self.root() else { return };
        if self.items.kind(root) != Some(ItemKind::Row) {
            return;
        }
        let available = self.viewport.width();
        if available <= 0.0 {
            return;
        }

        let columns: Vec<ItemId> = self
            .items
            .get(root)
            .map_or(Vec::new(), |item| item.children().to_vec());
        if columns.len() as f32 * min_width <= available {
            return;
        }
        let final_count = ((available / min_width).floor() as usize).max(1);
        if final_count >= columns.len() {
            return;
        }

        // First stack anywhere in the tree, in pre-order. Pre-order visits
        // the surviving first column before any doomed one, so the target
        // cannot sit inside what we are about to remove; the guard below only
        // covers degenerate trees.
        let Some(target_stack) = self.first_of_kind(ItemKind::Stack) else {
            return;
        };
        let doomed: Vec<ItemId> = columns[final_count..].to_vec();
        for column in &doomed {
            if self.preorder(*column).contains(&target_stack) {
                return;
            }
        }
        log::debug!(
            "responsive collapse: {} columns -> {final_count} (min width {min_width})",
            columns.len()
        );

        let mut moved: Vec<ItemId> = Vec::new();
        for column in &doomed {
            for id in self.preorder(*column) {
                if self.items.kind(id) == Some(ItemKind::Component) {
                    moved.push(id);
                }
            }
        }

        for component in &moved {
            self.items.detach(*component);
        }
        for column in doomed {
            self.items.detach(column);
            self.destroy_subtree(host, column);
        }
        for component in moved {
            if let Err(err) = self.items.attach(target_stack, component, usize::MAX) {
                log::warn!("responsive collapse could not move {component:?}: {err}");
            }
        }

        self.normalize_shares(root);
        // A root row left with one column is redundant.
        self.after_removal(host, root, None);
        self.emit(crate::events::LayoutEvent::StateChanged);
        self.size_dirty = true;
    }
}
