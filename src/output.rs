//! CLI output formatting for every command.
//!
//! Every item is displayed the same way across commands: a 3-digit positional
//! index and its title (or its source filename in parentheses when untitled),
//! with details on indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Images
//! 001 harbour (240 × 160)
//!     Source: 010-harbour.jpg
//! 002 (007.jpg) (240 × 320)
//!
//! Container 1200 × 800
//! ```
//!
//! ## Layout
//!
//! ```text
//! 001 harbour → (412.3, 96) delay 0.31
//! 002 lighthouse → (20, 15.7) delay 0.74
//!     Unsettled: overlaps after 50 attempts
//!
//! Placed 2 images in 1200 × 800, 1 unsettled, 52 draws
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::placement::PlacementSet;
use crate::scene::{Scene, SceneItem};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a layout-unit value: integers without decimals, others with one.
fn format_units(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Item header: index + title, or the source filename (or id) in parens.
fn item_line(index: usize, item: &SceneItem) -> String {
    match &item.title {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!(
            "{} ({})",
            format_index(index),
            item.src.as_deref().unwrap_or(&item.id)
        ),
    }
}

fn dimensions(width: f64, height: f64) -> String {
    format!("{} \u{d7} {}", format_units(width), format_units(height))
}

// ============================================================================
// Scan
// ============================================================================

/// Format the scene produced by `scan`.
pub fn format_scan_output(scene: &Scene) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    for (i, item) in scene.items.iter().enumerate() {
        lines.push(format!(
            "{} ({})",
            item_line(i + 1, item),
            dimensions(item.width, item.height)
        ));
        if item.title.is_some()
            && let Some(src) = &item.src
        {
            lines.push(format!("    Source: {}", src));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Container {}",
        dimensions(scene.container.width, scene.container.height)
    ));
    lines
}

pub fn print_scan_output(scene: &Scene) {
    for line in format_scan_output(scene) {
        println!("{}", line);
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Format one layout pass: each item's offset and delay, then a summary.
pub fn format_layout_output(scene: &Scene, set: &PlacementSet) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (item, p)) in scene.items.iter().zip(set).enumerate() {
        lines.push(format!(
            "{} \u{2192} ({}, {}) delay {:.2}",
            item_line(i + 1, item),
            format_units(p.left),
            format_units(p.top),
            p.reveal_delay
        ));
        if !p.settled {
            lines.push(format!(
                "    Unsettled: overlaps after {} attempts",
                p.attempts
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Placed {} images in {}, {} unsettled, {} draws",
        set.len(),
        dimensions(set.container.width, set.container.height),
        set.unsettled().len(),
        set.total_attempts()
    ));
    lines
}

pub fn print_layout_output(scene: &Scene, set: &PlacementSet) {
    for line in format_layout_output(scene, set) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format `check` results: item count plus any oversized items.
pub fn format_check_output(scene: &Scene) -> Vec<String> {
    let mut lines = vec![format!(
        "{} images, container {}",
        scene.items.len(),
        dimensions(scene.container.width, scene.container.height)
    )];
    let oversized = scene.oversized_items();
    if !oversized.is_empty() {
        lines.push("Larger than the container:".to_string());
        for id in oversized {
            lines.push(format!("    {}", id));
        }
    }
    lines
}

pub fn print_check_output(scene: &Scene) {
    for line in format_check_output(scene) {
        println!("{}", line);
    }
}
