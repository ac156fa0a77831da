//! Event-driven re-layout.
//!
//! [`layout`](crate::placement::layout) is a pure function. A page needs it
//! re-run whenever its container is first measured and whenever that
//! measurement changes. [`Collage`] holds the measured items and the latest
//! [`PlacementSet`] and turns those two signals into layout passes.
//!
//! Every pass starts from scratch; the previous set is dropped, never
//! adjusted.

use crate::geometry::Size;
use crate::placement::{LayoutParams, PlacementSet, layout};
use crate::random::RandomSource;

/// Signals that trigger a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// Page structure and styles are available. Always lays out.
    Ready(Size),
    /// The container's measured box changed.
    Resized(Size),
}

/// Measured items plus the placements currently applied to them.
#[derive(Debug, Clone)]
pub struct Collage {
    items: Vec<Size>,
    params: LayoutParams,
    current: Option<PlacementSet>,
}

impl Collage {
    pub fn new(items: Vec<Size>, params: LayoutParams) -> Self {
        Self {
            items,
            params,
            current: None,
        }
    }

    pub fn items(&self) -> &[Size] {
        &self.items
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Replace the measured item sizes. The next event re-lays out.
    pub fn set_items(&mut self, items: Vec<Size>) {
        self.items = items;
        self.current = None;
    }

    /// Latest placement set, if any event has been handled.
    pub fn current(&self) -> Option<&PlacementSet> {
        self.current.as_ref()
    }

    /// React to a trigger.
    ///
    /// Returns the new set when a layout pass ran. A `Resized` event whose
    /// container matches the current set is a no-op and returns `None`.
    pub fn handle(
        &mut self,
        event: LayoutEvent,
        rng: &mut impl RandomSource,
    ) -> Option<&PlacementSet> {
        let container = match event {
            LayoutEvent::Ready(container) => container,
            LayoutEvent::Resized(container) => {
                if self
                    .current
                    .as_ref()
                    .is_some_and(|set| set.container == container)
                {
                    return None;
                }
                container
            }
        };

        let set = layout(container, &self.items, &self.params, rng);
        self.current = Some(set);
        self.current.as_ref()
    }
}
