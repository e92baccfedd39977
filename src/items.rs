use egui::Rect;
use itertools::Itertools as _;

use crate::error::LayoutError;
use crate::item::{Item, ItemId, ItemKind};

/// One arena slot: the item plus the per-item bookkeeping the tree needs.
///
/// `width`/`height` are size shares in percent of the parent's corresponding
/// axis; only the share along the axis the parent distributes is meaningful.
/// `0.0` means "unset" until the next share normalization.
#[derive(Debug)]
struct Slot<Pane> {
    item: Item<Pane>,
    width: f32,
    height: f32,
    parent: Option<ItemId>,
}

/// Id-keyed storage for all items of one layout.
///
/// All parent/child wiring goes through [`Items::attach`] and
/// [`Items::detach`]; they are the only code that touches both sides of the
/// relation, which keeps `parent_of(child) == p ⟺ children(p) contains child`
/// true by construction.
#[derive(Debug)]
pub struct Items<Pane> {
    slots: ahash::HashMap<ItemId, Slot<Pane>>,
    rects: ahash::HashMap<ItemId, Rect>,
    next_id: u64,
}

impl<Pane> Default for Items<Pane> {
    fn default() -> Self {
        Self {
            slots: ahash::HashMap::default(),
            rects: ahash::HashMap::default(),
            next_id: 1,
        }
    }
}

impl<Pane> Items<Pane> {
    pub(crate) fn insert(&mut self, item: Item<Pane>) -> ItemId {
        let id = ItemId::from_u64(self.next_id);
        self.next_id += 1;
        self.slots.insert(
            id,
            Slot {
                item,
                width: 0.0,
                height: 0.0,
                parent: None,
            },
        );
        id
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item<Pane>> {
        self.slots.get(&id).map(|slot| &slot.item)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item<Pane>> {
        self.slots.get_mut(&id).map(|slot| &mut slot.item)
    }

    pub fn kind(&self, id: ItemId) -> Option<ItemKind> {
        self.get(id).map(Item::kind)
    }

    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.slots.get(&id).and_then(|slot| slot.parent)
    }

    /// Pixel box from the last size pass, if the item has been laid out.
    pub fn rect(&self, id: ItemId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub(crate) fn set_rect(&mut self, id: ItemId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn width_of(&self, id: ItemId) -> f32 {
        self.slots.get(&id).map_or(0.0, |slot| slot.width)
    }

    pub fn height_of(&self, id: ItemId) -> f32 {
        self.slots.get(&id).map_or(0.0, |slot| slot.height)
    }

    pub(crate) fn set_width(&mut self, id: ItemId, width: f32) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.width = width;
        }
    }

    pub(crate) fn set_height(&mut self, id: ItemId, height: f32) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.height = height;
        }
    }

    /// Share along the axis a parent of kind `parent_kind` distributes.
    pub(crate) fn share_along(&self, parent_kind: ItemKind, id: ItemId) -> f32 {
        match parent_kind {
            ItemKind::Row => self.width_of(id),
            ItemKind::Column => self.height_of(id),
            _ => 0.0,
        }
    }

    pub(crate) fn set_share_along(&mut self, parent_kind: ItemKind, id: ItemId, share: f32) {
        match parent_kind {
            ItemKind::Row => self.set_width(id, share),
            ItemKind::Column => self.set_height(id, share),
            _ => {}
        }
    }

    /// All live ids, in id order (stable for tests and diagnostics).
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.slots.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Inserts `child` into `parent`'s child list at `index` (clamped to the
    /// list length). Validates kinds and occupancy before mutating anything.
    pub(crate) fn attach(
        &mut self,
        parent: ItemId,
        child: ItemId,
        index: usize,
    ) -> Result<(), LayoutError> {
        let parent_kind = self.kind(parent).ok_or(LayoutError::UnknownItem(parent))?;
        let child_kind = self.kind(child).ok_or(LayoutError::UnknownItem(child))?;
        if !parent_kind.accepts(child_kind) {
            return Err(LayoutError::InvalidChildKind {
                parent: parent_kind,
                child: child_kind,
            });
        }
        if self.parent_of(child).is_some() {
            return Err(LayoutError::AlreadyAttached(child));
        }
        if parent_kind == ItemKind::Ground
            && !self.get(parent).is_some_and(|item| item.children().is_empty())
        {
            return Err(LayoutError::GroundOccupied);
        }

        let parent_item = self
            .get_mut(parent)
            .and_then(Item::children_mut)
            .ok_or(LayoutError::UnknownItem(parent))?;
        let index = index.min(parent_item.len());
        parent_item.insert(index, child);

        if let Some(stack) = self.get_mut(parent).and_then(Item::as_stack_mut) {
            if stack.active.is_none() {
                stack.active = Some(child);
            }
        }

        if let Some(slot) = self.slots.get_mut(&child) {
            slot.parent = Some(parent);
        }
        Ok(())
    }

    /// Removes `child` from its parent's child list without destroying it.
    ///
    /// Returns the old `(parent, index)` so callers can undo the detach. A
    /// stack that loses its active child promotes the nearest remaining tab.
    pub(crate) fn detach(&mut self, child: ItemId) -> Option<(ItemId, usize)> {
        let parent = self.parent_of(child)?;

        let children = self.get_mut(parent).and_then(Item::children_mut)?;
        let (index, _) = children.iter().find_position(|id| **id == child)?;
        children.remove(index);

        if let Some(stack) = self.get_mut(parent).and_then(Item::as_stack_mut) {
            if stack.active == Some(child) {
                stack.active = stack
                    .children
                    .get(index)
                    .or_else(|| stack.children.last())
                    .copied();
            }
        }

        if let Some(slot) = self.slots.get_mut(&child) {
            slot.parent = None;
            // Leaving a stack always ends stack-maximised status.
            if let Item::Component(component) = &mut slot.item {
                component.stack_maximised = false;
            }
        }
        Some((parent, index))
    }

    /// Removes a detached, childless item from the arena entirely.
    pub(crate) fn remove_slot(&mut self, id: ItemId) -> Option<Item<Pane>> {
        debug_assert!(
            self.parent_of(id).is_none(),
            "remove_slot on an attached item"
        );
        self.rects.remove(&id);
        self.slots.remove(&id).map(|slot| slot.item)
    }
}
