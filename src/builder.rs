use crate::config::ItemConfig;

/// Split direction with Dear ImGui `DockBuilder::SplitNode`-like semantics.
///
/// The direction indicates where the *side* node is placed relative to the
/// *main* node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Creates a binary split configuration.
///
/// - `main`: the remainder node (the "existing dock")
/// - `dir`: where to place `side` relative to `main`
/// - `side_fraction`: fraction of the parent size given to `side` (0.0..=1.0)
/// - `side`: the new side node
pub fn split<Pane>(
    main: ItemConfig<Pane>,
    dir: SplitDirection,
    side_fraction: f32,
    side: ItemConfig<Pane>,
) -> ItemConfig<Pane> {
    debug_assert!(
        (0.0..=1.0).contains(&side_fraction),
        "side_fraction must be in 0.0..=1.0"
    );
    let side_share = side_fraction * 100.0;
    let main_share = 100.0 - side_share;

    match dir {
        SplitDirection::Left => ItemConfig::row(vec![
            side.with_width(side_share),
            main.with_width(main_share),
        ]),
        SplitDirection::Right => ItemConfig::row(vec![
            main.with_width(main_share),
            side.with_width(side_share),
        ]),
        SplitDirection::Up => ItemConfig::column(vec![
            side.with_height(side_share),
            main.with_height(main_share),
        ]),
        SplitDirection::Down => ItemConfig::column(vec![
            main.with_height(main_share),
            side.with_height(side_share),
        ]),
    }
}
