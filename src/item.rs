/// Identifies an item within a [`crate::Layout`].
///
/// Ids are allocated by the layout's item arena and are never reused within one
/// layout instance, so a stale id after destruction reliably fails lookups
/// instead of aliasing a new item.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn from_u64(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

/// The closed set of node kinds in the layout tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Ground,
    Row,
    Column,
    Stack,
    Component,
}

impl ItemKind {
    /// Whether a node of this kind may hold a child of kind `child`.
    ///
    /// Components are only ever children of stacks, with one exception: a
    /// component loaded as a standalone root may sit directly under ground.
    pub fn accepts(self, child: ItemKind) -> bool {
        match self {
            Self::Ground => !matches!(child, Self::Ground),
            Self::Row | Self::Column => {
                matches!(child, Self::Row | Self::Column | Self::Stack)
            }
            Self::Stack => matches!(child, Self::Component),
            Self::Component => false,
        }
    }

    /// Row distributes width, column distributes height.
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Row | Self::Column)
    }
}

/// A leaf item hosting one user panel.
#[derive(Clone, Debug)]
pub struct Component<Pane> {
    pub pane: Pane,
    pub title: String,
    pub closable: bool,
    /// Set while an ancestor stack is maximised; drives the pane's own
    /// enter/exit hooks on the host side.
    pub stack_maximised: bool,
}

impl<Pane> Component<Pane> {
    pub fn new(pane: Pane, title: impl Into<String>) -> Self {
        Self {
            pane,
            title: title.into(),
            closable: true,
            stack_maximised: false,
        }
    }
}

/// A tabbed container. Children are components, exactly one of which is
/// active once the stack is non-empty.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    pub(crate) children: Vec<ItemId>,
    pub(crate) active: Option<ItemId>,
}

impl Stack {
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }
}

/// An ordered run of mixed children laid out along one axis with
/// proportional size shares. Used for both rows and columns; the axis comes
/// from the enclosing [`Item`] variant.
#[derive(Clone, Debug, Default)]
pub struct Linear {
    pub(crate) children: Vec<ItemId>,
}

impl Linear {
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }
}

/// The root container of one screen region. Holds at most one child; that
/// child is the visible layout root.
#[derive(Clone, Debug, Default)]
pub struct Ground {
    pub(crate) children: Vec<ItemId>,
}

impl Ground {
    pub fn child(&self) -> Option<ItemId> {
        self.children.first().copied()
    }
}

/// A node in the layout tree.
#[derive(Clone, Debug)]
pub enum Item<Pane> {
    Component(Component<Pane>),
    Stack(Stack),
    Row(Linear),
    Column(Linear),
    Ground(Ground),
}

impl<Pane> Item<Pane> {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Component(_) => ItemKind::Component,
            Self::Stack(_) => ItemKind::Stack,
            Self::Row(_) => ItemKind::Row,
            Self::Column(_) => ItemKind::Column,
            Self::Ground(_) => ItemKind::Ground,
        }
    }

    pub fn children(&self) -> &[ItemId] {
        match self {
            Self::Component(_) => &[],
            Self::Stack(stack) => &stack.children,
            Self::Row(linear) | Self::Column(linear) => &linear.children,
            Self::Ground(ground) => &ground.children,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<ItemId>> {
        match self {
            Self::Component(_) => None,
            Self::Stack(stack) => Some(&mut stack.children),
            Self::Row(linear) | Self::Column(linear) => Some(&mut linear.children),
            Self::Ground(ground) => Some(&mut ground.children),
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Component(_))
    }

    pub fn as_component(&self) -> Option<&Component<Pane>> {
        match self {
            Self::Component(component) => Some(component),
            _ => None,
        }
    }

    pub(crate) fn as_component_mut(&mut self) -> Option<&mut Component<Pane>> {
        match self {
            Self::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    pub(crate) fn as_stack_mut(&mut self) -> Option<&mut Stack> {
        match self {
            Self::Stack(stack) => Some(stack),
            _ => None,
        }
    }
}
