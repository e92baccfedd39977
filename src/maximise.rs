//! Maximise/minimise: at most one stack fills the viewport at a time.
//!
//! The stack never leaves the tree; its position *is* the placeholder it
//! returns to. Only the size pass and the per-component flags change.

use crate::error::LayoutError;
use crate::events::LayoutEvent;
use crate::host::Host;
use crate::item::{Item, ItemId, ItemKind};
use crate::layout::Layout;

impl<Pane> Layout<Pane> {
    /// Maximises `id` over the whole viewport. A no-op when it is already
    /// maximised; when another stack is maximised it is fully minimised
    /// first, within this same call, so observers never see both at once.
    pub fn maximise_stack(
        &mut self,
        host: &mut dyn Host<Pane>,
        id: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if self.items.kind(id) != Some(ItemKind::Stack) {
            return Err(LayoutError::NotAStack(id));
        }
        if self.maximised == Some(id) {
            return Ok(());
        }

        if let Some(previous) = self.maximised {
            self.minimise_inner(previous);
        }

        self.set_stack_maximised_flags(id, true);
        self.maximised = Some(id);
        log::debug!("maximised {id:?}");
        self.emit(LayoutEvent::Maximised(id));
        self.refresh_sizes(host);
        Ok(())
    }

    /// Restores a maximised stack to its tree position. Minimising a stack
    /// that is not maximised is a no-op.
    pub fn minimise_stack(
        &mut self,
        host: &mut dyn Host<Pane>,
        id: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if self.maximised != Some(id) {
            return Ok(());
        }
        self.minimise_inner(id);
        self.refresh_sizes(host);
        Ok(())
    }

    /// Whether this component currently sits inside the maximised stack.
    pub fn component_is_stack_maximised(&self, id: ItemId) -> bool {
        self.items
            .get(id)
            .and_then(Item::as_component)
            .is_some_and(|component| component.stack_maximised)
    }

    fn minimise_inner(&mut self, id: ItemId) {
        self.set_stack_maximised_flags(id, false);
        self.maximised = None;
        log::debug!("minimised {id:?}");
        self.emit(LayoutEvent::Minimised(id));
    }

    pub(crate) fn set_stack_maximised_flags(&mut self, stack: ItemId, value: bool) {
        let children = self
            .items
            .get(stack)
            .map_or(Vec::new(), |item| item.children().to_vec());
        for child in children {
            if let Some(component) = self.items.get_mut(child).and_then(Item::as_component_mut) {
                component.stack_maximised = value;
            }
        }
    }

    fn refresh_sizes(&mut self, host: &mut dyn Host<Pane>) {
        if self.size_hold == 0 {
            self.update_size_now(host);
        } else {
            self.size_dirty = true;
        }
        self.maybe_check_integrity();
    }
}
