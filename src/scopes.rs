use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use egui::Rect;

use crate::host::Host;
use crate::layout::Layout;

/// A reentrant, reference-counted "size invalidation" region.
///
/// While at least one scope is open, structural mutations only mark sizes
/// dirty; a single size pass runs when the outermost scope closes. Closing
/// happens in `Drop`, so the pass also runs if an operation inside unwinds.
pub struct SizeScope<'a, Pane> {
    layout: &'a mut Layout<Pane>,
    host: &'a mut dyn Host<Pane>,
}

/// A reentrant, reference-counted "virtual sized-container" region.
///
/// Defers size-dependent visibility synchronization until the outermost scope
/// closes. Nests freely with [`SizeScope`].
pub struct VirtualScope<'a, Pane> {
    layout: &'a mut Layout<Pane>,
    host: &'a mut dyn Host<Pane>,
}

impl<Pane> Layout<Pane> {
    /// Opens a size-invalidation region; mutate the layout through the
    /// returned scope.
    pub fn defer_size_updates<'a>(
        &'a mut self,
        host: &'a mut dyn Host<Pane>,
    ) -> SizeScope<'a, Pane> {
        self.size_hold += 1;
        SizeScope { layout: self, host }
    }

    /// Opens a virtual sized-container region.
    pub fn defer_visibility_updates<'a>(
        &'a mut self,
        host: &'a mut dyn Host<Pane>,
    ) -> VirtualScope<'a, Pane> {
        self.virtual_hold += 1;
        VirtualScope { layout: self, host }
    }
}

impl<'a, Pane> SizeScope<'a, Pane> {
    /// Split borrow for operations that need the layout and the host at once.
    pub fn parts(&mut self) -> (&mut Layout<Pane>, &mut dyn Host<Pane>) {
        (&mut *self.layout, &mut *self.host)
    }

    /// Opens a nested region; the size pass still waits for the outermost
    /// close.
    pub fn nested(&mut self) -> SizeScope<'_, Pane> {
        self.layout.size_hold += 1;
        SizeScope {
            layout: &mut *self.layout,
            host: &mut *self.host,
        }
    }
}

impl<Pane> Deref for SizeScope<'_, Pane> {
    type Target = Layout<Pane>;

    fn deref(&self) -> &Self::Target {
        &*self.layout
    }
}

impl<Pane> DerefMut for SizeScope<'_, Pane> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.layout
    }
}

impl<Pane> Drop for SizeScope<'_, Pane> {
    fn drop(&mut self) {
        self.layout.size_hold -= 1;
        if self.layout.size_hold == 0 && self.layout.size_dirty && self.layout.is_initialised() {
            self.layout.update_size_now(&mut *self.host);
        }
    }
}

impl<'a, Pane> VirtualScope<'a, Pane> {
    pub fn parts(&mut self) -> (&mut Layout<Pane>, &mut dyn Host<Pane>) {
        (&mut *self.layout, &mut *self.host)
    }

    pub fn nested(&mut self) -> VirtualScope<'_, Pane> {
        self.layout.virtual_hold += 1;
        VirtualScope {
            layout: &mut *self.layout,
            host: &mut *self.host,
        }
    }
}

impl<Pane> Deref for VirtualScope<'_, Pane> {
    type Target = Layout<Pane>;

    fn deref(&self) -> &Self::Target {
        &*self.layout
    }
}

impl<Pane> DerefMut for VirtualScope<'_, Pane> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.layout
    }
}

impl<Pane> Drop for VirtualScope<'_, Pane> {
    fn drop(&mut self) {
        self.layout.virtual_hold -= 1;
        if self.layout.virtual_hold == 0
            && self.layout.visibility_dirty
            && self.layout.is_initialised()
        {
            self.layout.sync_visibility(&mut *self.host);
        }
    }
}

/// Coalesces a stream of resize notifications into one size pass per
/// quiescence window. Driven by the host's clock; no timers of its own.
#[derive(Debug, Default)]
pub(crate) struct ResizeDebouncer {
    pending: Option<(Rect, Instant)>,
}

impl ResizeDebouncer {
    /// A newer notification cancels and reschedules the pending pass.
    pub(crate) fn notify(&mut self, viewport: Rect, now: Instant, window: Duration) {
        self.pending = Some((viewport, now + window));
    }

    pub(crate) fn poll(&mut self, now: Instant) -> Option<Rect> {
        let (viewport, deadline) = self.pending?;
        if now >= deadline {
            self.pending = None;
            Some(viewport)
        } else {
            None
        }
    }
}
