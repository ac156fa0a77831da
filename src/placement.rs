//! Rectangle placement engine.
//!
//! Places items at random inside a container so that no two placements come
//! within `margin` of each other, using rejection sampling with a per-item
//! attempt cap.
//!
//! ## Algorithm
//!
//! For each item, in input order:
//!
//! 1. Draw a candidate `left = u₁ · (container.width - item.width)`,
//!    `top = u₂ · (container.height - item.height)`.
//! 2. Reject it if it is not separated from every earlier placement by more
//!    than `margin` (see [`Rect::is_separated_from`]).
//! 3. Redraw until a candidate passes or `max_attempts` draws are used.
//! 4. Keep the last candidate either way. A placement that never passed is
//!    marked unsettled and may overlap earlier ones.
//!
//! Once its position is fixed, each item draws a reveal delay in `[0, 1)`.
//! Earlier items are never moved.
//!
//! The engine is total: it always returns one placement per item and at most
//! `max_attempts × items` candidate draws. Input validation belongs to the
//! callers ([`Scene::validate`](crate::scene::Scene::validate) and
//! [`CollageConfig::validate`](crate::config::CollageConfig::validate)).

use crate::geometry::{OversizePolicy, Rect, Size, sampling_range};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARGIN: f64 = 20.0;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Tunables for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Minimum gap between any two placements.
    pub margin: f64,
    /// Candidate draws per item before settling for an overlap. At least 1.
    pub max_attempts: u32,
    pub oversize: OversizePolicy,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            oversize: OversizePolicy::default(),
        }
    }
}

/// Computed position of one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Entrance animation offset in `[0, 1)`, unrelated to geometry.
    pub reveal_delay: f64,
    /// Candidate draws used for this item.
    pub attempts: u32,
    /// Whether the final candidate cleared every earlier placement.
    pub settled: bool,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, Size::new(self.width, self.height))
    }
}

/// All placements of one layout pass, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSet {
    /// Container the set was computed for.
    pub container: Size,
    pub placements: Vec<Placement>,
}

impl PlacementSet {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    /// Indices of placements that hit the attempt cap without clearing.
    pub fn unsettled(&self) -> Vec<usize> {
        self.placements
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.settled)
            .map(|(i, _)| i)
            .collect()
    }

    /// Total candidate draws across all items.
    pub fn total_attempts(&self) -> u64 {
        self.placements.iter().map(|p| u64::from(p.attempts)).sum()
    }

    /// Index pairs `(earlier, later)` that fail the separation test.
    pub fn overlapping_pairs(&self, margin: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (j, later) in self.placements.iter().enumerate() {
            let later = later.rect();
            for (i, earlier) in self.placements[..j].iter().enumerate() {
                if !later.is_separated_from(&earlier.rect(), margin) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl<'a> IntoIterator for &'a PlacementSet {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

/// Lay out `items` inside `container`.
///
/// Draws from `rng` in a fixed order (two values per candidate, then one for
/// the reveal delay), so a deterministic source gives a reproducible set.
pub fn layout(
    container: Size,
    items: &[Size],
    params: &LayoutParams,
    rng: &mut impl RandomSource,
) -> PlacementSet {
    let max_attempts = params.max_attempts.max(1);
    let mut accepted: Vec<Rect> = Vec::with_capacity(items.len());
    let mut placements = Vec::with_capacity(items.len());

    for &item in items {
        let range_x = sampling_range(container.width, item.width, params.oversize);
        let range_y = sampling_range(container.height, item.height, params.oversize);

        let mut attempts = 0;
        let (candidate, settled) = loop {
            attempts += 1;
            // `+ 0.0` turns the -0.0 of a zero draw over a negative range into 0.0.
            let left = rng.next_unit() * range_x + 0.0;
            let top = rng.next_unit() * range_y + 0.0;
            let candidate = Rect::new(left, top, item);

            let clear = accepted
                .iter()
                .all(|other| candidate.is_separated_from(other, params.margin));
            if clear || attempts >= max_attempts {
                break (candidate, clear);
            }
        };

        accepted.push(candidate);
        placements.push(Placement {
            left: candidate.left,
            top: candidate.top,
            width: candidate.width,
            height: candidate.height,
            reveal_delay: rng.next_unit(),
            attempts,
            settled,
        });
    }

    PlacementSet {
        container,
        placements,
    }
}
