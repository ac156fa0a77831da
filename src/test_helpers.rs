//! Shared test utilities for the collage test suite.
//!
//! Provides item builders, placement assertions that panic with the
//! offending indices, and image fixture writers for scan tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let set = layout(Size::new(400.0, 400.0), &squares(3, 100.0), &params, &mut rng);
//! assert_within_container(&set);
//! assert_pairwise_separated(&set, 20.0);
//! ```

use std::path::Path;

use crate::geometry::Size;
use crate::placement::PlacementSet;

// =========================================================================
// Item builders
// =========================================================================

/// `count` square items of side `side`.
pub fn squares(count: usize, side: f64) -> Vec<Size> {
    vec![Size::new(side, side); count]
}

// =========================================================================
// Placement assertions: panic with a clear message on failure
// =========================================================================

/// Assert that no two placements fail the separation test.
pub fn assert_pairwise_separated(set: &PlacementSet, margin: f64) {
    let pairs = set.overlapping_pairs(margin);
    assert!(
        pairs.is_empty(),
        "placements closer than margin {margin}: {pairs:?}\n{:#?}",
        set.placements
    );
}

/// Assert every placement sits inside its container.
pub fn assert_within_container(set: &PlacementSet) {
    for (i, p) in set.iter().enumerate() {
        assert!(
            p.left >= 0.0 && p.left + p.width <= set.container.width,
            "placement {i} out of bounds horizontally: {p:?} in {:?}",
            set.container
        );
        assert!(
            p.top >= 0.0 && p.top + p.height <= set.container.height,
            "placement {i} out of bounds vertically: {p:?} in {:?}",
            set.container
        );
    }
}

// =========================================================================
// Image fixtures
// =========================================================================

/// Write a blank PNG of the given pixel size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save(path)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
}
