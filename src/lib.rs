//! # Collage
//!
//! Scatters images at random, non-overlapping positions inside a fixed area
//! and renders the result as a static page where each image fades in after
//! its own random delay.
//!
//! # Architecture: Scan → Layout → Render
//!
//! ```text
//! 1. Scan     photos/     →  scene.json        (image files → measured items)
//! 2. Layout   scene.json  →  placements.json   (rejection-sampled positions)
//! 3. Render   scene.json  →  collage.html      (positions applied as CSS)
//! ```
//!
//! Each stage reads and writes plain JSON, so a scene can be written by hand
//! and a layout can be inspected or pinned before rendering.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`placement`] | The placement engine: [`placement::layout`] and [`placement::PlacementSet`] |
//! | [`collage`] | Re-layout on `Ready`/`Resized` events, discarding the previous set |
//! | [`geometry`] | `Size`, `Rect`, the margin separation test, sampling ranges |
//! | [`random`] | [`random::RandomSource`] seam, `rand`-backed source, seed selection |
//! | [`scene`] | Scene file: container plus ordered, measured items |
//! | [`scan`] | Directory of images → scene (parallel dimension probing) |
//! | [`naming`] | `NNN-name` ordering convention for image files |
//! | [`render`] | Scene + placements → HTML page via Maud |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Injected Randomness
//!
//! The engine never touches a global generator. It draws from a
//! [`random::RandomSource`] in a fixed order (two values per candidate, one
//! for the reveal delay), so a seeded source reproduces a layout exactly and
//! tests can script every draw.
//!
//! ## Best Effort, Always Total
//!
//! A crowded area may not fit every image. Each image gets at most
//! `layout.max_attempts` candidate positions; after that the last candidate
//! is kept and flagged as unsettled. The engine never fails and never loops
//! unboundedly.
//!
//! ## Oversized Images
//!
//! An image larger than the area has a negative sampling range. The default
//! `oversize = "clamp"` pins it to the top/left edge; `"overhang"` keeps the
//! raw range and lets it hang off at a random negative offset.
//!
//! ## Stable Layouts
//!
//! With `layout.stable = true` the seed is a SHA-256 digest of the ordered
//! image ids: rebuilding the same collage yields the same page, while adding
//! or reordering an image reshuffles it.

pub mod collage;
pub mod config;
pub mod geometry;
pub mod naming;
pub mod output;
pub mod placement;
pub mod random;
pub mod render;
pub mod scan;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_helpers;
