use crate::item::{ItemId, ItemKind};

/// Errors surfaced by tree mutations and session operations.
///
/// Structural and precondition violations are programming errors in the caller
/// (or a broken invariant) and abort the attempted operation before any part of
/// the tree is modified. Not-found conditions are *not* errors: lookups like
/// [`crate::Layout::find_location`] return `Option` so callers can fall back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A ground item holds at most one child.
    #[error("ground item already has a child")]
    GroundOccupied,

    /// The parent kind does not permit the child kind (e.g. a non-component
    /// under a stack).
    #[error("a {parent:?} item cannot hold a {child:?} child")]
    InvalidChildKind { parent: ItemKind, child: ItemKind },

    /// The id does not name a live item of this layout (destroyed, or from
    /// another layout instance).
    #[error("item {0:?} is not part of this layout")]
    UnknownItem(ItemId),

    /// Attempted to attach an item that already has a parent.
    #[error("item {0:?} is already attached to a parent")]
    AlreadyAttached(ItemId),

    /// Attempted to detach or replace an item that has no parent.
    #[error("item {0:?} has no parent")]
    NotAttached(ItemId),

    #[error("item {0:?} is not a component")]
    NotAComponent(ItemId),

    #[error("item {0:?} is not a stack")]
    NotAStack(ItemId),

    /// A stack's active child is not among its children.
    #[error("active item {active:?} is not a child of stack {stack:?}")]
    ActiveNotInStack { stack: ItemId, active: ItemId },

    /// Operation invoked before [`crate::Layout::init`].
    #[error("layout is not initialised")]
    NotInitialised,

    /// [`crate::Layout::init`] invoked twice.
    #[error("layout is already initialised")]
    AlreadyInitialised,

    /// Drag sessions are exclusive per layout instance.
    #[error("a drag session is already active")]
    DragInProgress,

    #[error("no drag session is active")]
    NoActiveDrag,

    /// Every location-selector alternative was exhausted.
    #[error("no insertion location found")]
    NoLocation,

    /// Ground is not itself serializable; only its child is.
    #[error("ground items cannot be serialized")]
    CannotSerializeGround,
}
