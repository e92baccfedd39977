#![forbid(unsafe_code)]

//! Content-item tree and docking engine for resizable, tabbed panel layouts.
//!
//! `dockspace` models the layout of an application viewport as a tree of
//! items — [`ItemKind::Ground`] at the root of each screen region, rows and
//! columns distributing proportional size shares, stacks showing components as
//! tabs — and keeps that tree consistent under arbitrary insert, remove and
//! reparent operations.
//!
//! Current scope:
//! - Tree mutations: add/remove/replace children, wrap-in-stack, split into a
//!   row or column, proportional share redistribution, single-child collapse.
//! - Drag-and-drop: a [`Layout::start_drag`] session computes drop-zone
//!   geometry once, hit-tests it on every pointer move, and on release commits
//!   the drop, reverts to the original position, or destroys the node —
//!   exactly once, whatever happens.
//! - Maximise/minimise of one stack per layout, and responsive column
//!   collapse for viewports too narrow for their columns.
//!
//! The crate paints nothing and owns no windows. The embedder supplies a
//! [`Host`]: the rendering-surface capability the size pass drives (create,
//! bound, show/hide, destroy surfaces; measure tab strips). Structural
//! notifications come back out of [`Layout::take_events`].

mod builder;
mod config;
mod drag;
mod error;
mod events;
mod host;
pub mod integrity;
mod item;
mod items;
mod layout;
mod maximise;
mod options;
mod responsive;
mod scopes;
mod zones;

#[cfg(test)]
mod model_tests;
#[cfg(test)]
mod scenario_tests;

pub use builder::{SplitDirection, split};
pub use config::{ItemConfig, LayoutConfig};
pub use drag::DragOutcome;
pub use error::LayoutError;
pub use events::LayoutEvent;
pub use host::{Host, NullHost};
pub use item::{Component, Ground, Item, ItemId, ItemKind, Linear, Stack};
pub use items::Items;
pub use layout::{DEFAULT_LOCATION_SELECTORS, Layout, Location, LocationSelector};
pub use options::{LayoutOptions, ResponsiveMode};
pub use scopes::{SizeScope, VirtualScope};
pub use zones::{DropAction, DropZone, Edge};
