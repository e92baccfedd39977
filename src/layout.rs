use std::time::Instant;

use egui::{Pos2, Rect, pos2, vec2};
use itertools::Itertools as _;

use crate::config::{ItemConfig, LayoutConfig};
use crate::drag::DragSession;
use crate::error::LayoutError;
use crate::events::LayoutEvent;
use crate::host::Host;
use crate::item::{Component, Ground, Item, ItemId, ItemKind, Linear, Stack};
use crate::items::Items;
use crate::options::LayoutOptions;
use crate::scopes::ResizeDebouncer;

/// Tolerance when checking that size shares along an axis sum to 100.
pub(crate) const SHARE_EPSILON: f32 = 0.01;

/// A pure insertion coordinate: where a new or moved item will land.
///
/// Never stored; always consumed immediately by a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub parent: ItemId,
    pub index: usize,
}

/// A declarative query for a default insertion point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationSelector {
    /// The stack holding the currently focused component.
    FocusedStack,
    /// The first stack in pre-order.
    FirstStack,
    /// The first row or column in pre-order.
    FirstRowOrColumn,
    /// The ground itself when empty, otherwise its child if that child can
    /// hold more children.
    Root,
}

/// The fallback chain used when no explicit location is given.
pub const DEFAULT_LOCATION_SELECTORS: &[LocationSelector] = &[
    LocationSelector::FocusedStack,
    LocationSelector::FirstStack,
    LocationSelector::FirstRowOrColumn,
    LocationSelector::Root,
];

/// The layout orchestrator: owns the item tree of one screen region and every
/// piece of per-layout state layered on it (focus, maximise, the active drag
/// session, size batching, resize debouncing).
///
/// All operations run synchronously on the caller's thread; the layout never
/// blocks or suspends mid-mutation.
#[derive(Debug)]
pub struct Layout<Pane> {
    pub(crate) items: Items<Pane>,
    pub(crate) ground: ItemId,
    pub(crate) options: LayoutOptions,
    pub(crate) viewport: Rect,

    pub(crate) focused: Option<ItemId>,
    pub(crate) maximised: Option<ItemId>,
    pub(crate) drag: Option<DragSession>,

    pub(crate) events: Vec<LayoutEvent>,
    pub(crate) initialised: bool,

    pub(crate) size_hold: u32,
    pub(crate) size_dirty: bool,
    pub(crate) virtual_hold: u32,
    pub(crate) visibility_dirty: bool,

    pub(crate) debouncer: ResizeDebouncer,

    pending_maximise: Option<ItemId>,
}

impl<Pane> Layout<Pane> {
    /// An empty layout: a lone ground with no child.
    pub fn new(options: LayoutOptions) -> Self {
        let mut items = Items::default();
        let ground = items.insert(Item::Ground(Ground::default()));
        Self {
            items,
            ground,
            options,
            viewport: Rect::ZERO,
            focused: None,
            maximised: None,
            drag: None,
            events: Vec::new(),
            initialised: false,
            size_hold: 0,
            size_dirty: false,
            virtual_hold: 0,
            visibility_dirty: false,
            debouncer: ResizeDebouncer::default(),
            pending_maximise: None,
        }
    }

    /// Builds the tree described by a normalized configuration snapshot.
    ///
    /// The wants-active flag is consumed here; the wants-maximised flag is
    /// remembered and consumed once by [`Layout::init`].
    pub fn from_config(
        config: LayoutConfig<Pane>,
        options: LayoutOptions,
    ) -> Result<Self, LayoutError> {
        let mut layout = Self::new(options);
        if let Some(root) = config.root {
            let root_id = layout.build_config_item(root)?;
            layout.items.attach(layout.ground, root_id, 0)?;
        }
        Ok(layout)
    }

    fn build_config_item(&mut self, config: ItemConfig<Pane>) -> Result<ItemId, LayoutError> {
        let id = match config {
            ItemConfig::Component {
                pane,
                title,
                closable,
                width,
                height,
            } => {
                let mut component = Component::new(pane, title);
                component.closable = closable;
                let id = self.items.insert(Item::Component(component));
                self.items.set_width(id, width);
                self.items.set_height(id, height);
                id
            }
            ItemConfig::Stack {
                children,
                active_index,
                maximised,
                width,
                height,
            } => {
                let id = self.items.insert(Item::Stack(Stack::default()));
                for child in children {
                    let child_id = self.build_config_item(child)?;
                    self.items.attach(id, child_id, usize::MAX)?;
                }
                if let Some(index) = active_index {
                    // Indices past the end fall back to the last tab.
                    let children = self.items.get(id).map_or(&[][..], Item::children);
                    let active = children
                        .get(index)
                        .or_else(|| children.last())
                        .copied();
                    if let Some(stack) = self.items.get_mut(id).and_then(Item::as_stack_mut) {
                        stack.active = active;
                    }
                }
                if maximised && self.pending_maximise.is_none() {
                    self.pending_maximise = Some(id);
                }
                self.items.set_width(id, width);
                self.items.set_height(id, height);
                id
            }
            ItemConfig::Row {
                children,
                width,
                height,
            } => self.build_linear(ItemKind::Row, children, width, height)?,
            ItemConfig::Column {
                children,
                width,
                height,
            } => self.build_linear(ItemKind::Column, children, width, height)?,
        };
        Ok(id)
    }

    fn build_linear(
        &mut self,
        kind: ItemKind,
        children: Vec<ItemConfig<Pane>>,
        width: f32,
        height: f32,
    ) -> Result<ItemId, LayoutError> {
        let item = match kind {
            ItemKind::Row => Item::Row(Linear::default()),
            ItemKind::Column => Item::Column(Linear::default()),
            _ => unreachable!("build_linear only handles row/column"),
        };
        let id = self.items.insert(item);
        for child in children {
            let built = self.build_config_item(child)?;
            // A bare component never sits directly in a row or column.
            let child_id = if self.items.kind(built) == Some(ItemKind::Component) {
                self.wrap_in_stack(built)?
            } else {
                built
            };
            self.items.attach(id, child_id, usize::MAX)?;
        }
        self.items.set_width(id, width);
        self.items.set_height(id, height);
        self.normalize_shares(id);
        Ok(id)
    }

    /// Creates the rendering surfaces, runs the first size pass, applies the
    /// one-shot construction flags and emits [`LayoutEvent::Initialised`].
    pub fn init(&mut self, host: &mut dyn Host<Pane>, viewport: Rect) -> Result<(), LayoutError> {
        if self.initialised {
            return Err(LayoutError::AlreadyInitialised);
        }
        self.initialised = true;
        self.viewport = viewport;

        for id in self.preorder(self.ground) {
            if let Some(Item::Component(component)) = self.items.get(id) {
                host.create_surface(id, &component.pane);
            }
        }

        if matches!(
            self.options.responsive_mode,
            crate::options::ResponsiveMode::OnLoad | crate::options::ResponsiveMode::Always
        ) {
            self.responsive_collapse(host);
        }
        self.update_size_now(host);

        if let Some(stack) = self.pending_maximise.take() {
            self.maximise_stack(host, stack)?;
        }

        self.emit(LayoutEvent::Initialised);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn ground(&self) -> ItemId {
        self.ground
    }

    /// The single visible root under ground, if any.
    pub fn root(&self) -> Option<ItemId> {
        self.items.get(self.ground)?.children().first().copied()
    }

    pub fn items(&self) -> &Items<Pane> {
        &self.items
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn focused_component(&self) -> Option<ItemId> {
        self.focused
    }

    pub fn maximised_stack(&self) -> Option<ItemId> {
        self.maximised
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Drains the queued notifications.
    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: LayoutEvent) {
        log::trace!("layout event: {event:?}");
        if event == LayoutEvent::StateChanged && self.events.last() == Some(&LayoutEvent::StateChanged)
        {
            return;
        }
        self.events.push(event);
    }

    pub(crate) fn ensure_initialised(&self) -> Result<(), LayoutError> {
        if self.initialised {
            Ok(())
        } else {
            Err(LayoutError::NotInitialised)
        }
    }

    // ------------------------------------------------------------------------
    // Item factories

    /// Creates a detached component. Attach it with [`Layout::add_child`].
    pub fn new_component(
        &mut self,
        host: &mut dyn Host<Pane>,
        pane: Pane,
        title: impl Into<String>,
    ) -> ItemId {
        let component = Component::new(pane, title);
        let id = self.items.insert(Item::Component(component));
        if self.initialised {
            if let Some(Item::Component(component)) = self.items.get(id) {
                host.create_surface(id, &component.pane);
            }
        }
        id
    }

    pub fn new_stack(&mut self) -> ItemId {
        self.items.insert(Item::Stack(Stack::default()))
    }

    pub fn new_row(&mut self) -> ItemId {
        self.items.insert(Item::Row(Linear::default()))
    }

    pub fn new_column(&mut self) -> ItemId {
        self.items.insert(Item::Column(Linear::default()))
    }

    // ------------------------------------------------------------------------
    // Tree mutations

    /// Inserts a detached item under `parent` at `index` (`None` = append).
    ///
    /// Fails without modifying the tree if the parent kind does not permit the
    /// child kind, or if ground is already occupied.
    pub fn add_child(
        &mut self,
        host: &mut dyn Host<Pane>,
        parent: ItemId,
        child: ItemId,
        index: Option<usize>,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        self.items.attach(parent, child, index.unwrap_or(usize::MAX))?;
        log::trace!("add_child: {child:?} -> {parent:?} at {index:?}");
        if self.items.kind(parent).is_some_and(ItemKind::is_linear) {
            self.normalize_shares(parent);
        }
        self.structure_changed(host);
        Ok(())
    }

    /// Removes `child` from the tree. Unless `keep_alive`, the subtree is
    /// destroyed (children first). A row or column left with a single child
    /// collapses; an emptied stack is removed, propagating upward as long as
    /// collapse conditions keep being met.
    pub fn remove_child(
        &mut self,
        host: &mut dyn Host<Pane>,
        child: ItemId,
        keep_alive: bool,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if !self.items.contains(child) {
            return Err(LayoutError::UnknownItem(child));
        }
        let old_active = self
            .items
            .parent_of(child)
            .and_then(|p| self.items.get(p))
            .and_then(Item::as_stack)
            .and_then(Stack::active);

        let (parent, _index) = self
            .items
            .detach(child)
            .ok_or(LayoutError::NotAttached(child))?;
        log::trace!("remove_child: {child:?} from {parent:?} (keep_alive={keep_alive})");

        if !keep_alive {
            self.destroy_subtree(host, child);
        }
        self.after_removal(host, parent, old_active);
        self.structure_changed(host);
        Ok(())
    }

    /// Swaps `new` into `old`'s position, preserving index and size shares.
    /// `old` is left alive and detached.
    pub fn replace_child(
        &mut self,
        host: &mut dyn Host<Pane>,
        old: ItemId,
        new: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        self.replace_child_inner(old, new)?;
        self.structure_changed(host);
        Ok(())
    }

    pub(crate) fn replace_child_inner(
        &mut self,
        old: ItemId,
        new: ItemId,
    ) -> Result<(), LayoutError> {
        let parent = self
            .items
            .parent_of(old)
            .ok_or(LayoutError::NotAttached(old))?;
        let parent_kind = self.items.kind(parent).ok_or(LayoutError::UnknownItem(parent))?;
        let new_kind = self.items.kind(new).ok_or(LayoutError::UnknownItem(new))?;
        if !parent_kind.accepts(new_kind) {
            return Err(LayoutError::InvalidChildKind {
                parent: parent_kind,
                child: new_kind,
            });
        }
        if self.items.parent_of(new).is_some() {
            return Err(LayoutError::AlreadyAttached(new));
        }

        // Validated; detach+attach can no longer fail except for occupancy,
        // which the detach just guaranteed.
        let (parent, index) = self
            .items
            .detach(old)
            .ok_or(LayoutError::NotAttached(old))?;
        self.items.set_width(new, self.items.width_of(old));
        self.items.set_height(new, self.items.height_of(old));
        self.items.attach(parent, new, index)?;
        log::trace!("replace_child: {old:?} -> {new:?} under {parent:?}");
        Ok(())
    }

    /// Makes `component` the visible tab of `stack`.
    pub fn set_active(
        &mut self,
        host: &mut dyn Host<Pane>,
        stack: ItemId,
        component: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        self.set_active_inner(stack, component)?;
        self.visibility_changed(host);
        Ok(())
    }

    pub(crate) fn set_active_inner(
        &mut self,
        stack: ItemId,
        component: ItemId,
    ) -> Result<(), LayoutError> {
        let item = self
            .items
            .get_mut(stack)
            .ok_or(LayoutError::UnknownItem(stack))?;
        let tabs = item.as_stack_mut().ok_or(LayoutError::NotAStack(stack))?;
        if !tabs.children.contains(&component) {
            return Err(LayoutError::ActiveNotInStack {
                stack,
                active: component,
            });
        }
        if tabs.active != Some(component) {
            tabs.active = Some(component);
            self.emit(LayoutEvent::ActiveContentItemChanged(component));
        }
        Ok(())
    }

    /// Focuses a component, activating its tab.
    pub fn focus_component(
        &mut self,
        host: &mut dyn Host<Pane>,
        id: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if self.items.kind(id) != Some(ItemKind::Component) {
            return Err(LayoutError::NotAComponent(id));
        }
        if let Some(parent) = self.items.parent_of(id) {
            if self.items.kind(parent) == Some(ItemKind::Stack) {
                self.set_active_inner(parent, id)?;
            }
        }
        self.focused = Some(id);
        self.visibility_changed(host);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Adds a component at an explicit [`Location`] or, when `None`, at the
    /// first location the default selector chain yields.
    pub fn add_component(
        &mut self,
        host: &mut dyn Host<Pane>,
        pane: Pane,
        title: impl Into<String>,
        location: Option<Location>,
    ) -> Result<ItemId, LayoutError> {
        self.ensure_initialised()?;
        let location = location
            .or_else(|| self.find_location(DEFAULT_LOCATION_SELECTORS))
            .ok_or(LayoutError::NoLocation)?;
        let component = self.new_component(host, pane, title.into());
        self.insert_component_at(host, component, location)?;
        Ok(component)
    }

    /// Grafts a detached component at `location`, wrapping it in a stack when
    /// the target is not one.
    pub(crate) fn insert_component_at(
        &mut self,
        host: &mut dyn Host<Pane>,
        component: ItemId,
        location: Location,
    ) -> Result<(), LayoutError> {
        let parent_kind = self
            .items
            .kind(location.parent)
            .ok_or(LayoutError::UnknownItem(location.parent))?;
        let inserted = match parent_kind {
            ItemKind::Stack => {
                self.items.attach(location.parent, component, location.index)?;
                self.set_active_inner(location.parent, component)?;
                component
            }
            ItemKind::Ground if self.items.get(location.parent).is_some_and(|g| g.children().is_empty()) => {
                // Whole-ground insertion always produces a stack root.
                let stack = self.wrap_in_stack(component)?;
                self.items.attach(location.parent, stack, 0)?;
                stack
            }
            // Occupied ground; rejected before any wrapper is created.
            ItemKind::Ground => return Err(LayoutError::GroundOccupied),
            ItemKind::Row | ItemKind::Column => {
                let stack = self.wrap_in_stack(component)?;
                self.items.attach(location.parent, stack, location.index)?;
                self.normalize_shares(location.parent);
                stack
            }
            ItemKind::Component => {
                return Err(LayoutError::InvalidChildKind {
                    parent: ItemKind::Component,
                    child: ItemKind::Component,
                });
            }
        };
        log::trace!("insert_component_at: {component:?} under {:?} (as {inserted:?})", location.parent);
        self.structure_changed(host);
        Ok(())
    }

    /// Wraps a detached component in a fresh single-tab stack. The stack
    /// inherits the component's size shares.
    pub(crate) fn wrap_in_stack(&mut self, component: ItemId) -> Result<ItemId, LayoutError> {
        if self.items.kind(component) != Some(ItemKind::Component) {
            return Err(LayoutError::NotAComponent(component));
        }
        let stack = self.items.insert(Item::Stack(Stack::default()));
        self.items.set_width(stack, self.items.width_of(component));
        self.items.set_height(stack, self.items.height_of(component));
        self.items.attach(stack, component, 0)?;
        Ok(stack)
    }

    /// Destroys a detached item and its subtree. Attached items go through
    /// [`Layout::remove_child`].
    pub fn destroy_detached(
        &mut self,
        host: &mut dyn Host<Pane>,
        id: ItemId,
    ) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        if !self.items.contains(id) {
            return Err(LayoutError::UnknownItem(id));
        }
        if self.items.parent_of(id).is_some() {
            return Err(LayoutError::AlreadyAttached(id));
        }
        self.destroy_subtree(host, id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Collapse & shares

    /// Walks up from `parent` removing emptied stacks and promoting the sole
    /// child of single-child rows/columns. Terminates: every step removes one
    /// node from the tree.
    pub(crate) fn after_removal(
        &mut self,
        host: &mut dyn Host<Pane>,
        parent: ItemId,
        old_active: Option<ItemId>,
    ) {
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == self.ground {
                break;
            }
            let Some(item) = self.items.get(id) else { break };
            let kind = item.kind();
            let child_count = item.children().len();

            match kind {
                ItemKind::Stack if child_count == 0 => {
                    let up = self.items.detach(id).map(|(up, _)| up);
                    self.destroy_subtree(host, id);
                    current = up;
                }
                ItemKind::Row | ItemKind::Column if child_count == 0 => {
                    let up = self.items.detach(id).map(|(up, _)| up);
                    self.destroy_subtree(host, id);
                    current = up;
                }
                ItemKind::Row | ItemKind::Column if child_count == 1 => {
                    let sole = item.children()[0];
                    let width = self.items.width_of(id);
                    let height = self.items.height_of(id);
                    self.items.detach(sole);
                    let Some((up, index)) = self.items.detach(id) else {
                        // Unreachable wrapper; destroy it and stop.
                        self.destroy_subtree(host, id);
                        break;
                    };
                    self.destroy_subtree(host, id);
                    if self.items.attach(up, sole, index).is_ok() {
                        self.items.set_width(sole, width);
                        self.items.set_height(sole, height);
                    }
                    log::trace!("collapsed single-child {kind:?} {id:?}, promoted {sole:?}");
                    current = Some(up);
                }
                ItemKind::Row | ItemKind::Column => {
                    self.normalize_shares(id);
                    break;
                }
                ItemKind::Stack => {
                    let new_active = self.items.get(id).and_then(Item::as_stack).and_then(Stack::active);
                    if new_active != old_active {
                        if let Some(active) = new_active {
                            self.emit(LayoutEvent::ActiveContentItemChanged(active));
                        }
                    }
                    break;
                }
                ItemKind::Ground | ItemKind::Component => break,
            }
        }
    }

    /// Rebalances the shares of `parent`'s children along its distributed axis
    /// so they sum to 100. Unset shares absorb whatever the set ones leave.
    pub(crate) fn normalize_shares(&mut self, parent: ItemId) {
        let Some(item) = self.items.get(parent) else { return };
        let kind = item.kind();
        if !kind.is_linear() {
            return;
        }
        let children = item.children().to_vec();
        if children.is_empty() {
            return;
        }

        let mut shares: Vec<f32> = children
            .iter()
            .map(|child| self.items.share_along(kind, *child))
            .collect();

        let unset = shares.iter().filter(|share| **share <= 0.0).count();
        if unset > 0 {
            let assigned: f32 = shares.iter().filter(|share| **share > 0.0).sum();
            let remainder = 100.0 - assigned;
            if remainder > 0.0 {
                let fill = remainder / unset as f32;
                for share in &mut shares {
                    if *share <= 0.0 {
                        *share = fill;
                    }
                }
            } else {
                // No room left for the unset children; reset to an even split.
                let even = 100.0 / shares.len() as f32;
                shares.fill(even);
            }
        }

        let total: f32 = shares.iter().sum();
        if (total - 100.0).abs() > SHARE_EPSILON {
            log::trace!("normalizing {kind:?} {parent:?} share sum {total:.2} -> 100");
            let scale = 100.0 / total;
            for share in &mut shares {
                *share *= scale;
            }
        }

        for (child, share) in children.iter().zip(shares) {
            self.items.set_share_along(kind, *child, share);
        }
    }

    // ------------------------------------------------------------------------
    // Destruction

    /// Synchronous, recursive teardown: children first, then the item itself.
    /// The id is invalid afterwards.
    pub(crate) fn destroy_subtree(&mut self, host: &mut dyn Host<Pane>, id: ItemId) {
        let children = self
            .items
            .get(id)
            .map_or(Vec::new(), |item| item.children().to_vec());
        for child in children {
            self.items.detach(child);
            self.destroy_subtree(host, child);
        }

        if self.items.kind(id) == Some(ItemKind::Component) && self.initialised {
            host.destroy_surface(id);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.maximised == Some(id) {
            self.maximised = None;
        }
        log::trace!("destroyed {id:?}");
        self.items.remove_slot(id);
    }

    // ------------------------------------------------------------------------
    // Location selectors

    /// Tries each selector in order; `None` only when every alternative is
    /// exhausted.
    pub fn find_location(&self, selectors: &[LocationSelector]) -> Option<Location> {
        selectors
            .iter()
            .find_map(|selector| self.resolve_selector(*selector))
    }

    fn resolve_selector(&self, selector: LocationSelector) -> Option<Location> {
        let end_of = |id: ItemId| {
            self.items
                .get(id)
                .map(|item| Location {
                    parent: id,
                    index: item.children().len(),
                })
        };
        match selector {
            LocationSelector::FocusedStack => {
                let focused = self.focused?;
                let parent = self.items.parent_of(focused)?;
                (self.items.kind(parent) == Some(ItemKind::Stack))
                    .then(|| end_of(parent))
                    .flatten()
            }
            LocationSelector::FirstStack => {
                self.first_of_kind(ItemKind::Stack).and_then(end_of)
            }
            LocationSelector::FirstRowOrColumn => self
                .preorder(self.ground)
                .into_iter()
                .find(|id| self.items.kind(*id).is_some_and(ItemKind::is_linear))
                .and_then(end_of),
            LocationSelector::Root => {
                let ground_item = self.items.get(self.ground)?;
                match ground_item.children().first() {
                    None => Some(Location {
                        parent: self.ground,
                        index: 0,
                    }),
                    Some(root) => self
                        .items
                        .get(*root)
                        .is_some_and(|item| item.is_container())
                        .then(|| end_of(*root))
                        .flatten(),
                }
            }
        }
    }

    /// Pre-order traversal starting at (and including) `start`.
    pub(crate) fn preorder(&self, start: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            let Some(item) = self.items.get(id) else { continue };
            out.push(id);
            for child in item.children().iter().rev() {
                pending.push(*child);
            }
        }
        out
    }

    /// First item of `kind` in pre-order, the documented tie-break for
    /// "first stack found anywhere in the tree".
    pub(crate) fn first_of_kind(&self, kind: ItemKind) -> Option<ItemId> {
        self.preorder(self.ground)
            .into_iter()
            .find(|id| self.items.kind(*id) == Some(kind))
    }

    // ------------------------------------------------------------------------
    // Size pass

    /// Immediate resize: sets the viewport and reruns the size pass.
    pub fn resize(&mut self, host: &mut dyn Host<Pane>, viewport: Rect) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        self.viewport = viewport;
        if self.size_hold == 0 {
            self.update_size_now(host);
        } else {
            self.size_dirty = true;
        }
        Ok(())
    }

    /// Debounced resize: remembers the new viewport and (re)arms the
    /// quiescence window. Call [`Layout::tick`] with the current time to let
    /// the pending pass fire.
    pub fn notify_resize(&mut self, viewport: Rect, now: Instant) {
        self.debouncer
            .notify(viewport, now, self.options.resize_debounce);
    }

    /// Fires at most one debounced size pass; returns whether one ran.
    pub fn tick(&mut self, host: &mut dyn Host<Pane>, now: Instant) -> Result<bool, LayoutError> {
        self.ensure_initialised()?;
        if let Some(viewport) = self.debouncer.poll(now) {
            self.viewport = viewport;
            self.update_size_now(host);
            return Ok(true);
        }
        Ok(false)
    }

    /// Explicit full-tree size recomputation.
    pub fn update_size(&mut self, host: &mut dyn Host<Pane>) -> Result<(), LayoutError> {
        self.ensure_initialised()?;
        self.update_size_now(host);
        Ok(())
    }

    pub(crate) fn structure_changed(&mut self, host: &mut dyn Host<Pane>) {
        self.emit(LayoutEvent::StateChanged);
        if self.initialised && self.size_hold == 0 {
            self.update_size_now(host);
        } else {
            self.size_dirty = true;
        }
        self.maybe_check_integrity();
    }

    pub(crate) fn visibility_changed(&mut self, host: &mut dyn Host<Pane>) {
        if self.initialised && self.virtual_hold == 0 {
            self.sync_visibility(host);
        } else {
            self.visibility_dirty = true;
        }
    }

    pub(crate) fn update_size_now(&mut self, host: &mut dyn Host<Pane>) {
        if matches!(
            self.options.responsive_mode,
            crate::options::ResponsiveMode::Always
        ) && self.initialised
        {
            self.responsive_collapse(host);
        }

        self.size_dirty = false;
        self.items.set_rect(self.ground, self.viewport);
        self.layout_item(host, self.ground);

        // The maximised stack overrides its computed box with the viewport.
        // Tabs that arrived since the maximise pick up the flag here.
        if let Some(stack) = self.maximised {
            if self.items.contains(stack) {
                self.set_stack_maximised_flags(stack, true);
                self.items.set_rect(stack, self.viewport);
                self.layout_item(host, stack);
            }
        }

        if self.virtual_hold == 0 {
            self.sync_visibility(host);
        } else {
            self.visibility_dirty = true;
        }
    }

    /// Recomputes this item's children's pixel boxes from its own, then
    /// recurses.
    fn layout_item(&mut self, host: &mut dyn Host<Pane>, id: ItemId) {
        let Some(rect) = self.items.rect(id) else { return };
        let Some(kind) = self.items.kind(id) else { return };
        let children = self
            .items
            .get(id)
            .map_or(Vec::new(), |item| item.children().to_vec());

        match kind {
            ItemKind::Component => {
                host.set_surface_bounds(id, rect);
            }
            ItemKind::Ground => {
                if let Some(child) = children.first().copied() {
                    self.items.set_rect(child, rect);
                    self.layout_item(host, child);
                }
            }
            ItemKind::Stack => {
                // The header strip eats into the vertical axis; every tab gets
                // the remaining body, visibility picks the active one.
                let header = host.tab_bar_height().min(rect.height());
                let body = Rect::from_min_max(pos2(rect.left(), rect.top() + header), rect.max);
                for child in children {
                    self.items.set_rect(child, body);
                    self.layout_item(host, child);
                }
            }
            ItemKind::Row => {
                let n = children.len();
                if n == 0 {
                    return;
                }
                let gaps = self.options.splitter_size * (n - 1) as f32;
                let avail = (rect.width() - gaps).max(0.0);
                let mut x = rect.left();
                for (i, child) in children.iter().enumerate() {
                    let share = self.items.width_of(*child);
                    let width = if i + 1 == n {
                        (rect.right() - x).max(0.0)
                    } else {
                        avail * share / 100.0
                    };
                    let child_rect =
                        Rect::from_min_size(pos2(x, rect.top()), vec2(width, rect.height()));
                    self.items.set_rect(*child, child_rect);
                    x += width + self.options.splitter_size;
                    self.layout_item(host, *child);
                }
            }
            ItemKind::Column => {
                let n = children.len();
                if n == 0 {
                    return;
                }
                let gaps = self.options.splitter_size * (n - 1) as f32;
                let avail = (rect.height() - gaps).max(0.0);
                let mut y = rect.top();
                for (i, child) in children.iter().enumerate() {
                    let share = self.items.height_of(*child);
                    let height = if i + 1 == n {
                        (rect.bottom() - y).max(0.0)
                    } else {
                        avail * share / 100.0
                    };
                    let child_rect =
                        Rect::from_min_size(pos2(rect.left(), y), vec2(rect.width(), height));
                    self.items.set_rect(*child, child_rect);
                    y += height + self.options.splitter_size;
                    self.layout_item(host, *child);
                }
            }
        }
    }

    pub(crate) fn sync_visibility(&mut self, host: &mut dyn Host<Pane>) {
        self.visibility_dirty = false;
        self.visit_visibility(host, self.ground, true);
    }

    fn visit_visibility(&self, host: &mut dyn Host<Pane>, id: ItemId, visible: bool) {
        let Some(item) = self.items.get(id) else { return };
        match item {
            Item::Component(_) => host.set_surface_visible(id, visible),
            Item::Stack(stack) => {
                for child in &stack.children {
                    self.visit_visibility(host, *child, visible && stack.active == Some(*child));
                }
            }
            Item::Row(_) | Item::Column(_) | Item::Ground(_) => {
                for child in item.children() {
                    self.visit_visibility(host, *child, visible);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Serialization boundary

    /// Snapshot of the whole layout (the ground's child; ground itself is not
    /// serializable).
    pub fn to_config(&self) -> LayoutConfig<Pane>
    where
        Pane: Clone,
    {
        LayoutConfig {
            root: self.root().and_then(|root| self.config_of(root)),
        }
    }

    /// Snapshot of one item and its subtree.
    pub fn item_config(&self, id: ItemId) -> Result<ItemConfig<Pane>, LayoutError>
    where
        Pane: Clone,
    {
        if self.items.kind(id) == Some(ItemKind::Ground) {
            return Err(LayoutError::CannotSerializeGround);
        }
        self.config_of(id).ok_or(LayoutError::UnknownItem(id))
    }

    fn config_of(&self, id: ItemId) -> Option<ItemConfig<Pane>>
    where
        Pane: Clone,
    {
        let item = self.items.get(id)?;
        let width = self.items.width_of(id);
        let height = self.items.height_of(id);
        let config = match item {
            Item::Component(component) => ItemConfig::Component {
                pane: component.pane.clone(),
                title: component.title.clone(),
                closable: component.closable,
                width,
                height,
            },
            Item::Stack(stack) => ItemConfig::Stack {
                children: stack
                    .children
                    .iter()
                    .filter_map(|child| self.config_of(*child))
                    .collect(),
                active_index: stack
                    .active
                    .and_then(|active| stack.children.iter().find_position(|c| **c == active))
                    .map(|(index, _)| index),
                maximised: self.maximised == Some(id),
                width,
                height,
            },
            Item::Row(linear) => ItemConfig::Row {
                children: linear
                    .children
                    .iter()
                    .filter_map(|child| self.config_of(*child))
                    .collect(),
                width,
                height,
            },
            Item::Column(linear) => ItemConfig::Column {
                children: linear
                    .children
                    .iter()
                    .filter_map(|child| self.config_of(*child))
                    .collect(),
                width,
                height,
            },
            Item::Ground(_) => return None,
        };
        Some(config)
    }

    // ------------------------------------------------------------------------
    // Diagnostics

    pub(crate) fn maybe_check_integrity(&self) {
        if !self.options.debug_integrity_checks {
            return;
        }
        for issue in crate::integrity::layout_integrity_issues(self) {
            log::error!("{issue}");
        }
    }

    /// Indented one-line-per-item dump for debugging.
    pub fn debug_dump(&self) -> String {
        fn visit<Pane>(layout: &Layout<Pane>, id: ItemId, depth: usize, out: &mut String) {
            use std::fmt::Write as _;
            let indent = "  ".repeat(depth);
            let Some(item) = layout.items.get(id) else {
                let _ = writeln!(out, "{indent}<missing {id:?}>");
                return;
            };
            let _ = writeln!(
                out,
                "{indent}{:?} {id:?} w={:.1} h={:.1}",
                item.kind(),
                layout.items.width_of(id),
                layout.items.height_of(id),
            );
            for child in item.children() {
                visit(layout, *child, depth + 1, out);
            }
        }

        let mut out = String::new();
        visit(self, self.ground, 0, &mut out);
        out
    }

    /// Clamps a pointer sample to the draggable viewport bounds.
    pub(crate) fn clamp_to_viewport(&self, pointer: Pos2) -> Pos2 {
        if !self.options.constrain_drag_to_container {
            return pointer;
        }
        pos2(
            pointer.x.clamp(self.viewport.left(), self.viewport.right()),
            pointer.y.clamp(self.viewport.top(), self.viewport.bottom()),
        )
    }
}
