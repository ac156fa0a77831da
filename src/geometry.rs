//! Pure geometry for collage placement.
//!
//! All functions here are pure and testable without any I/O or randomness.
//! Units are abstract layout units; the renderer emits them as CSS pixels.

use serde::{Deserialize, Serialize};

/// Width and height of a container or an item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// True when this size is larger than `container` on either axis.
    pub fn exceeds(&self, container: Size) -> bool {
        self.width > container.width || self.height > container.height
    }
}

/// An axis-aligned rectangle positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, size: Size) -> Self {
        Self {
            left,
            top,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `self` and `other` are separated by more than `margin` along
    /// at least one axis.
    ///
    /// The comparisons are strict: a gap of exactly `margin` counts as a
    /// collision.
    ///
    /// ```
    /// # use collage::geometry::{Rect, Size};
    /// let a = Rect::new(0.0, 0.0, Size::new(100.0, 100.0));
    /// let b = Rect::new(121.0, 0.0, Size::new(100.0, 100.0));
    /// let c = Rect::new(120.0, 0.0, Size::new(100.0, 100.0));
    /// assert!(a.is_separated_from(&b, 20.0));
    /// assert!(!a.is_separated_from(&c, 20.0));
    /// ```
    pub fn is_separated_from(&self, other: &Rect, margin: f64) -> bool {
        self.right() + margin < other.left
            || self.left > other.right() + margin
            || self.bottom() + margin < other.top
            || self.top > other.bottom() + margin
    }
}

/// How to sample offsets for an item larger than its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Pin the item at offset 0 on the overflowing axis.
    #[default]
    Clamp,
    /// Keep the raw `container - item` range, producing negative offsets.
    Overhang,
}

/// Sampling range for one axis: a candidate offset is `u * range`, `u ∈ [0, 1)`.
///
/// # Examples
/// ```
/// # use collage::geometry::{OversizePolicy, sampling_range};
/// assert_eq!(sampling_range(400.0, 100.0, OversizePolicy::Clamp), 300.0);
/// assert_eq!(sampling_range(50.0, 100.0, OversizePolicy::Clamp), 0.0);
/// assert_eq!(sampling_range(50.0, 100.0, OversizePolicy::Overhang), -50.0);
/// ```
pub fn sampling_range(container: f64, item: f64, policy: OversizePolicy) -> f64 {
    let range = container - item;
    match policy {
        OversizePolicy::Clamp => range.max(0.0),
        OversizePolicy::Overhang => range,
    }
}

/// Scale `(width, height)` pixels so the width becomes `target_width`,
/// preserving aspect ratio.
///
/// Zero-width sources map to a zero-size item rather than dividing by zero.
pub fn scale_to_width(pixels: (u32, u32), target_width: f64) -> Size {
    let (w, h) = pixels;
    if w == 0 {
        return Size::new(0.0, 0.0);
    }
    let ratio = target_width / w as f64;
    Size::new(target_width, (h as f64 * ratio).round())
}
