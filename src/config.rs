//! Normalized tree descriptors: the ingestion and serialization boundary.
//!
//! An external resolver turns whatever user-facing configuration syntax it
//! supports into this shape; the layout never parses raw config itself. The
//! same shape comes back out of [`crate::Layout::to_config`], so a snapshot can
//! be fed straight back in.

/// One node of a configuration snapshot.
///
/// `width`/`height` are size shares in percent of the parent's distributed
/// axis; `0.0` leaves the share to be distributed evenly on load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemConfig<Pane> {
    Component {
        pane: Pane,
        title: String,
        closable: bool,
        width: f32,
        height: f32,
    },
    Stack {
        children: Vec<ItemConfig<Pane>>,
        /// Wants-active flag: which tab starts active. Consumed once on load.
        active_index: Option<usize>,
        /// Wants-maximised flag. Consumed once during init.
        maximised: bool,
        width: f32,
        height: f32,
    },
    Row {
        children: Vec<ItemConfig<Pane>>,
        width: f32,
        height: f32,
    },
    Column {
        children: Vec<ItemConfig<Pane>>,
        width: f32,
        height: f32,
    },
}

impl<Pane> ItemConfig<Pane> {
    pub fn component(pane: Pane, title: impl Into<String>) -> Self {
        Self::Component {
            pane,
            title: title.into(),
            closable: true,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn stack(children: Vec<ItemConfig<Pane>>) -> Self {
        Self::Stack {
            children,
            active_index: None,
            maximised: false,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn row(children: Vec<ItemConfig<Pane>>) -> Self {
        Self::Row {
            children,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn column(children: Vec<ItemConfig<Pane>>) -> Self {
        Self::Column {
            children,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn with_width(mut self, new_width: f32) -> Self {
        match &mut self {
            Self::Component { width, .. }
            | Self::Stack { width, .. }
            | Self::Row { width, .. }
            | Self::Column { width, .. } => *width = new_width,
        }
        self
    }

    pub fn with_height(mut self, new_height: f32) -> Self {
        match &mut self {
            Self::Component { height, .. }
            | Self::Stack { height, .. }
            | Self::Row { height, .. }
            | Self::Column { height, .. } => *height = new_height,
        }
        self
    }

    /// Builder-style share assignment.
    pub fn with_size(mut self, new_width: f32, new_height: f32) -> Self {
        match &mut self {
            Self::Component { width, height, .. }
            | Self::Stack { width, height, .. }
            | Self::Row { width, height, .. }
            | Self::Column { width, height, .. } => {
                *width = new_width;
                *height = new_height;
            }
        }
        self
    }

    pub fn children(&self) -> &[ItemConfig<Pane>] {
        match self {
            Self::Component { .. } => &[],
            Self::Stack { children, .. }
            | Self::Row { children, .. }
            | Self::Column { children, .. } => children,
        }
    }
}

/// A whole-layout snapshot: the ground's single child, if any.
///
/// Ground itself is not serializable; it is a fixed per-region anchor, not
/// part of the persisted arrangement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig<Pane> {
    pub root: Option<ItemConfig<Pane>>,
}

impl<Pane> Default for LayoutConfig<Pane> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<Pane> LayoutConfig<Pane> {
    pub fn new(root: ItemConfig<Pane>) -> Self {
        Self { root: Some(root) }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    fn sample() -> LayoutConfig<String> {
        LayoutConfig::new(ItemConfig::row(vec![
            ItemConfig::stack(vec![
                ItemConfig::component("editor".to_owned(), "Editor"),
                ItemConfig::component("preview".to_owned(), "Preview"),
            ])
            .with_width(70.0),
            ItemConfig::column(vec![
                ItemConfig::stack(vec![ItemConfig::component(
                    "outline".to_owned(),
                    "Outline",
                )])
                .with_height(40.0),
                ItemConfig::stack(vec![ItemConfig::component("log".to_owned(), "Log")])
                    .with_height(60.0),
            ])
            .with_width(30.0),
        ]))
    }

    #[test]
    fn round_trips_through_json() {
        let config = sample();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: LayoutConfig<String> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = sample();
        let ron = ron::ser::to_string(&config).expect("serialize");
        let back: LayoutConfig<String> = ron::de::from_str(&ron).expect("deserialize");
        assert_eq!(back, config);
    }
}
