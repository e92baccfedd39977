use std::time::Duration;

/// When the responsive column collapse (see [`crate::Layout`]) runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponsiveMode {
    /// Never collapse columns.
    #[default]
    None,
    /// Collapse once, during [`crate::Layout::init`].
    OnLoad,
    /// Collapse on every size pass that finds the root row too wide.
    Always,
}

/// Options for [`crate::Layout`].
#[derive(Clone, Debug)]
pub struct LayoutOptions {
    /// Thickness in points of the splitter gap between row/column children.
    /// Subtracted from the distributed axis before shares are applied.
    pub splitter_size: f32,

    /// If true, pointer positions fed to an active drag session are clamped to
    /// the layout viewport before hit-testing.
    pub constrain_drag_to_container: bool,

    /// Minimum column width in points used by the responsive collapse.
    ///
    /// Only consulted when `responsive_mode` is not [`ResponsiveMode::None`].
    pub min_item_width: f32,

    pub responsive_mode: ResponsiveMode,

    /// Quiescence window for resize debouncing: a size pass scheduled by
    /// [`crate::Layout::notify_resize`] fires once no further resize arrives
    /// within this window.
    pub resize_debounce: Duration,

    /// Run the structural integrity audit after every mutation and log issues
    /// at `error` level. Expensive; intended for debugging embedders.
    pub debug_integrity_checks: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            splitter_size: 5.0,
            constrain_drag_to_container: true,
            min_item_width: 0.0,
            responsive_mode: ResponsiveMode::None,
            resize_debounce: Duration::from_millis(100),
            debug_integrity_checks: false,
        }
    }
}
