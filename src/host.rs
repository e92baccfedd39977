use egui::Rect;

use crate::item::ItemId;

/// The rendering-surface capability the layout drives.
///
/// The layout decides *where* things go; the host owns the actual surfaces
/// (DOM nodes, native views, egui areas, …) and is told to create, move,
/// show/hide and destroy them. The host also answers the two measurements the
/// tree cannot know itself: tab-strip thickness and per-tab width.
pub trait Host<Pane> {
    /// A component entered the tree; create its surface.
    fn create_surface(&mut self, id: ItemId, pane: &Pane);

    /// A component was destroyed; tear its surface down.
    fn destroy_surface(&mut self, id: ItemId);

    /// Assign the pixel box computed by the size pass.
    fn set_surface_bounds(&mut self, id: ItemId, rect: Rect);

    fn set_surface_visible(&mut self, id: ItemId, visible: bool);

    /// Header strip thickness a stack reserves along the top of its rect.
    fn tab_bar_height(&self) -> f32 {
        24.0
    }

    /// Measured width of one tab in a stack header. Drives the
    /// midpoint-based insert index for header drops.
    fn tab_width(&self, pane: &Pane, title: &str) -> f32 {
        let _ = (pane, title);
        120.0
    }
}

/// A [`Host`] that does nothing. Useful for tests and for manipulating a
/// tree headlessly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl<Pane> Host<Pane> for NullHost {
    fn create_surface(&mut self, _id: ItemId, _pane: &Pane) {}

    fn destroy_surface(&mut self, _id: ItemId) {}

    fn set_surface_bounds(&mut self, _id: ItemId, _rect: Rect) {}

    fn set_surface_visible(&mut self, _id: ItemId, _visible: bool) {}
}
