use crate::item::ItemId;

/// Notifications queued on the layout and drained by the embedder via
/// [`crate::Layout::take_events`].
///
/// Events from any node bubble to the layout; external layers subscribe at
/// this level rather than on individual items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The tree structure changed (insert, removal, reparent, share change).
    /// Consecutive structure changes within one batch coalesce into one event.
    StateChanged,
    /// [`crate::Layout::init`] completed.
    Initialised,
    /// A drag session committed this item into the tree.
    ItemDropped(ItemId),
    Maximised(ItemId),
    Minimised(ItemId),
    /// A stack's active tab changed.
    ActiveContentItemChanged(ItemId),
}
