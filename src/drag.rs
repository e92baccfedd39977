//! The drag session controller: one exclusive, interactive drag per layout,
//! from detach to exactly one of commit / revert / discard.

use egui::{Pos2, Rect};

use crate::error::LayoutError;
use crate::events::LayoutEvent;
use crate::host::Host;
use crate::item::{Item, ItemId, ItemKind, Stack};
use crate::layout::{DEFAULT_LOCATION_SELECTORS, Layout};
use crate::zones::{self, DropAction, DropZone, Edge};

/// Where the dragged component came from, for reverting.
#[derive(Clone, Copy, Debug)]
struct DragOrigin {
    parent: ItemId,
    index: usize,
}

/// Terminal outcome of a drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The selected zone's action grafted the item into the tree.
    Committed,
    /// No zone selected; the item went back to its original position (or the
    /// default location chain, if the original parent collapsed meanwhile).
    Reverted,
    /// No zone and no origin to return to; the item was destroyed.
    Discarded,
}

/// State of one live drag. Created by [`Layout::start_drag`], consumed by
/// [`Layout::end_drag`]/[`Layout::cancel_drag`]; taking it out of the layout
/// is what makes the release action exactly-once.
#[derive(Debug)]
pub(crate) struct DragSession {
    dragged: ItemId,
    origin: Option<DragOrigin>,
    zones: Vec<DropZone>,
    selected: Option<usize>,
    last_pointer: Option<Pos2>,
    was_focused: bool,
}

impl DragSession {
    pub(crate) fn dragged(&self) -> ItemId {
        self.dragged
    }
}

impl<Pane> Layout<Pane> {
    /// The component currently being dragged, if a session is active.
    pub fn dragged_item(&self) -> Option<ItemId> {
        self.drag.as_ref().map(DragSession::dragged)
    }

    /// Enters `dragging`: detaches the component (alive), remembers its
    /// origin and focus, and computes the drop-zone set once. The zone set is
    /// not recomputed on pointer moves.
    pub fn start_drag(&mut self, host: &mut dyn Host<Pane>, id: ItemId) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        if self.items.kind(id) != Some(ItemKind::Component) {
            return Err(LayoutError::NotAComponent(id));
        }
        if self.items.parent_of(id).is_none() {
            return Err(LayoutError::NotAttached(id));
        }

        let was_focused = self.focused == Some(id);
        if was_focused {
            self.blur();
        }

        let old_active = self
            .items
            .parent_of(id)
            .and_then(|parent| self.items.get(parent))
            .and_then(Item::as_stack)
            .and_then(Stack::active);
        let (parent, index) = self
            .items
            .detach(id)
            .ok_or(LayoutError::NotAttached(id))?;
        self.after_removal(host, parent, old_active);
        self.structure_changed(host);

        let zones = zones::compute_drop_zones(self, &*host);
        log::debug!("drag session START item={id:?} zones={}", zones.len());
        self.drag = Some(DragSession {
            dragged: id,
            origin: Some(DragOrigin { parent, index }),
            zones,
            selected: None,
            last_pointer: None,
            was_focused,
        });
        Ok(())
    }

    /// Starts a drag for a node arriving from an external drag source: it has
    /// no tree membership yet, so an unmatched release destroys it.
    pub fn start_external_drag(
        &mut self,
        host: &mut dyn Host<Pane>,
        pane: Pane,
        title: impl Into<String>,
    ) -> Result<ItemId, LayoutError> {
        self.ensure_initialised()?;
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        let id = self.new_component(host, pane, title);
        let zones = zones::compute_drop_zones(self, &*host);
        log::debug!("drag session START (external) item={id:?} zones={}", zones.len());
        self.drag = Some(DragSession {
            dragged: id,
            origin: None,
            zones,
            selected: None,
            last_pointer: None,
            was_focused: false,
        });
        Ok(id)
    }

    /// Feeds one pointer sample to the active session. Selection is sticky:
    /// leaving every hover rect keeps the previous zone selected, so the
    /// highlight doesn't flicker at zone boundaries.
    pub fn drag_move(&mut self, pointer: Pos2) -> Result<(), LayoutError> {
        let clamped = self.clamp_to_viewport(pointer);
        let session = self.drag.as_mut().ok_or(LayoutError::NoActiveDrag)?;
        session.last_pointer = Some(clamped);
        if let Some(index) = zones::zone_at(&session.zones, clamped) {
            if session.selected != Some(index) {
                log::trace!("drag selected zone: {}", session.zones[index].description);
                session.selected = Some(index);
            }
        }
        Ok(())
    }

    /// The highlight rectangle of the currently selected zone, for rendering.
    pub fn drag_highlight(&self) -> Option<Rect> {
        let session = self.drag.as_ref()?;
        session
            .selected
            .and_then(|index| session.zones.get(index))
            .map(|zone| zone.highlight)
    }

    /// The currently selected drop zone.
    pub fn selected_zone(&self) -> Option<&DropZone> {
        let session = self.drag.as_ref()?;
        session.selected.and_then(|index| session.zones.get(index))
    }

    /// Pointer released: commit the selected zone, or revert, or discard.
    ///
    /// Taking the session out of the layout makes this exactly-once; a second
    /// release is a [`LayoutError::NoActiveDrag`] with no side effects.
    pub fn end_drag(&mut self, host: &mut dyn Host<Pane>) -> Result<DragOutcome, LayoutError> {
        self.ensure_initialised()?;
        let session = self.drag.take().ok_or(LayoutError::NoActiveDrag)?;
        Ok(self.finish_drag(host, session, true))
    }

    /// External cancellation (e.g. the pane was closed mid-drag). Still
    /// reaches a terminal outcome; never commits.
    pub fn cancel_drag(&mut self, host: &mut dyn Host<Pane>) -> Result<DragOutcome, LayoutError> {
        self.ensure_initialised()?;
        let session = self.drag.take().ok_or(LayoutError::NoActiveDrag)?;
        Ok(self.finish_drag(host, session, false))
    }

    fn finish_drag(
        &mut self,
        host: &mut dyn Host<Pane>,
        session: DragSession,
        allow_commit: bool,
    ) -> DragOutcome {
        let DragSession {
            dragged,
            origin,
            zones,
            selected,
            last_pointer,
            was_focused,
        } = session;

        let selected_zone = if allow_commit {
            selected
                .and_then(|index| zones.get(index))
                .copied()
                // The zone owner may have been destroyed since the set was
                // built; a stale target falls through to revert.
                .filter(|zone| self.items.contains(zone.owner))
        } else {
            None
        };

        let outcome = match selected_zone {
            Some(zone) => match self.commit_drop(host, zone, dragged, last_pointer) {
                Ok(()) => {
                    self.emit(LayoutEvent::ItemDropped(dragged));
                    DragOutcome::Committed
                }
                Err(err) => {
                    log::warn!("drop commit failed ({err}); reverting");
                    self.revert_or_discard(host, dragged, origin)
                }
            },
            None => self.revert_or_discard(host, dragged, origin),
        };

        if was_focused && outcome != DragOutcome::Discarded && self.items.contains(dragged) {
            if let Err(err) = self.focus_component(host, dragged) {
                log::warn!("could not restore focus after drag: {err}");
            }
        }
        log::debug!("drag session END item={dragged:?} outcome={outcome:?}");
        outcome
    }

    fn revert_or_discard(
        &mut self,
        host: &mut dyn Host<Pane>,
        dragged: ItemId,
        origin: Option<DragOrigin>,
    ) -> DragOutcome {
        if !self.items.contains(dragged) {
            return DragOutcome::Discarded;
        }

        // A failed commit may have left the node inside an orphaned wrapper
        // stack; pull it back out before reinserting.
        if let Some((wrapper, _)) = self.items.detach(dragged) {
            let wrapper_is_orphan = self.items.parent_of(wrapper).is_none()
                && wrapper != self.ground
                && self
                    .items
                    .get(wrapper)
                    .is_some_and(|item| item.kind() == ItemKind::Stack && item.children().is_empty());
            if wrapper_is_orphan {
                self.items.remove_slot(wrapper);
            }
        }

        if let Some(origin) = origin {
            let origin_is_stack = self
                .items
                .get(origin.parent)
                .is_some_and(|item| item.kind() == ItemKind::Stack);
            if origin_is_stack && self.items.attach(origin.parent, dragged, origin.index).is_ok() {
                let _ = self.set_active_inner(origin.parent, dragged);
                self.structure_changed(host);
                return DragOutcome::Reverted;
            }

            // The origin stack collapsed away while dragging; fall back to the
            // default location chain before giving the node up.
            if let Some(location) = self.find_location(DEFAULT_LOCATION_SELECTORS) {
                if self.insert_component_at(host, dragged, location).is_ok() {
                    return DragOutcome::Reverted;
                }
            }
        }

        self.destroy_subtree(host, dragged);
        self.structure_changed(host);
        DragOutcome::Discarded
    }

    // ------------------------------------------------------------------------
    // Drop commit (the §4.2 graft policy)

    fn commit_drop(
        &mut self,
        host: &mut dyn Host<Pane>,
        zone: DropZone,
        dragged: ItemId,
        pointer: Option<Pos2>,
    ) -> Result<(), LayoutError> {
        match zone.action {
            DropAction::GroundFill => {
                if self.root().is_some() {
                    return Err(LayoutError::GroundOccupied);
                }
                let stack = self.wrap_in_stack(dragged)?;
                self.items.attach(self.ground, stack, 0)?;
                self.items.set_width(stack, 100.0);
                self.items.set_height(stack, 100.0);
            }
            DropAction::TabInsert { stack } => {
                let index = pointer.map_or(usize::MAX, |p| {
                    zones::tab_insert_index(self, &*host, stack, p.x)
                });
                self.items.attach(stack, dragged, index)?;
                self.set_active_inner(stack, dragged)?;
            }
            DropAction::StackFill { stack } => {
                self.items.attach(stack, dragged, 0)?;
                self.set_active_inner(stack, dragged)?;
            }
            DropAction::SplitStack { stack, edge } => {
                let parent = self
                    .items
                    .parent_of(stack)
                    .ok_or(LayoutError::NotAttached(stack))?;
                if self.items.kind(parent) == Some(edge.required_kind()) {
                    // The enclosing container already runs the right way;
                    // avoid a needless wrapper level.
                    self.insert_edge_sibling(parent, stack, edge, dragged)?;
                } else {
                    self.wrap_into_oriented(stack, edge, dragged)?;
                }
            }
            DropAction::GroundEdge { edge } => {
                let root = self.root().ok_or(LayoutError::NoLocation)?;
                if self.items.kind(root) == Some(edge.required_kind()) {
                    let root_children = self
                        .items
                        .get(root)
                        .map_or(&[][..], Item::children);
                    let adjacent = if edge.inserts_before() {
                        root_children.first().copied()
                    } else {
                        root_children.last().copied()
                    };
                    let adjacent = adjacent.ok_or(LayoutError::NoLocation)?;
                    self.insert_edge_sibling(root, adjacent, edge, dragged)?;
                } else {
                    self.wrap_into_oriented(root, edge, dragged)?;
                }
            }
        }

        // Tabs dropped into the maximised stack pick up its flag.
        if let Some(maximised) = self.maximised {
            self.set_stack_maximised_flags(maximised, true);
        }
        self.structure_changed(host);
        Ok(())
    }

    /// Rule 5: the structure already matches the needed orientation. Insert a
    /// new sibling stack next to `adjacent` and take half of *its* share; no
    /// global rebalance.
    fn insert_edge_sibling(
        &mut self,
        parent: ItemId,
        adjacent: ItemId,
        edge: Edge,
        dragged: ItemId,
    ) -> Result<(), LayoutError> {
        let parent_kind = self
            .items
            .kind(parent)
            .ok_or(LayoutError::UnknownItem(parent))?;
        let position = self
            .items
            .get(parent)
            .and_then(|item| item.children().iter().position(|c| *c == adjacent))
            .ok_or(LayoutError::UnknownItem(adjacent))?;

        let new_stack = self.wrap_in_stack(dragged)?;
        let index = if edge.inserts_before() {
            position
        } else {
            position + 1
        };
        self.items.attach(parent, new_stack, index)?;

        let half = self.items.share_along(parent_kind, adjacent) * 0.5;
        self.items.set_share_along(parent_kind, adjacent, half);
        self.items.set_share_along(parent_kind, new_stack, half);
        match parent_kind {
            ItemKind::Row => {
                let cross = self.items.height_of(adjacent);
                self.items.set_height(new_stack, cross);
            }
            ItemKind::Column => {
                let cross = self.items.width_of(adjacent);
                self.items.set_width(new_stack, cross);
            }
            _ => {}
        }
        Ok(())
    }

    /// Rule 3/4: replace `target` with a new row/column holding it and a new
    /// stack around the dropped item, 50% each along the new axis.
    fn wrap_into_oriented(
        &mut self,
        target: ItemId,
        edge: Edge,
        dragged: ItemId,
    ) -> Result<(), LayoutError> {
        // A bare component root first gets its stack, so it can live inside
        // row/column content.
        let target = if self.items.kind(target) == Some(ItemKind::Component) {
            let stack = self.new_stack();
            self.items.set_width(stack, self.items.width_of(target));
            self.items.set_height(stack, self.items.height_of(target));
            self.replace_child_inner(target, stack)?;
            self.items.attach(stack, target, 0)?;
            stack
        } else {
            target
        };

        let new_stack = self.wrap_in_stack(dragged)?;
        let container = match edge.required_kind() {
            ItemKind::Row => self.new_row(),
            ItemKind::Column => self.new_column(),
            _ => unreachable!("edges split into rows or columns"),
        };
        self.replace_child_inner(target, container)?;

        let (first, second) = if edge.inserts_before() {
            (new_stack, target)
        } else {
            (target, new_stack)
        };
        self.items.attach(container, first, 0)?;
        self.items.attach(container, second, 1)?;

        let axis = edge.required_kind();
        for id in [first, second] {
            self.items.set_share_along(axis, id, 50.0);
            match axis {
                ItemKind::Row => self.items.set_height(id, 100.0),
                ItemKind::Column => self.items.set_width(id, 100.0),
                _ => {}
            }
        }
        Ok(())
    }
}
