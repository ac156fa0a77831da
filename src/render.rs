//! HTML collage page rendering.
//!
//! Applies a [`PlacementSet`] to a static page: the collage area becomes a
//! relatively positioned box of the container's size, and every item an
//! absolutely positioned `<img>` with its `left`/`top` offsets and an
//! `animation-delay` of `reveal_delay × reveal.stagger` seconds.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Base styles live in `static/collage.css` and are embedded at compile time;
//! timing variables are generated from [`RevealConfig`].

use crate::config::RevealConfig;
use crate::geometry::Size;
use crate::placement::{Placement, PlacementSet};
use crate::scene::{Scene, SceneItem};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scene has {items} items but {placements} placements")]
    Mismatch { items: usize, placements: usize },
    #[error("Placement for {id} is {found:?} but the item is {expected:?}")]
    SizeMismatch {
        id: String,
        expected: Size,
        found: Size,
    },
}

const CSS_STATIC: &str = include_str!("../static/collage.css");

/// Generate CSS custom properties from reveal config.
pub fn generate_reveal_css(reveal: &RevealConfig) -> String {
    format!(
        r#":root {{
    --reveal-duration: {duration}s;
    --reveal-stagger: {stagger}s;
}}"#,
        duration = reveal.duration,
        stagger = reveal.stagger,
    )
}

/// Render the full collage page.
pub fn render_page(
    title: &str,
    scene: &Scene,
    placements: &PlacementSet,
    reveal: &RevealConfig,
) -> Result<Markup, RenderError> {
    if scene.items.len() != placements.len() {
        return Err(RenderError::Mismatch {
            items: scene.items.len(),
            placements: placements.len(),
        });
    }
    for (item, placement) in scene.items.iter().zip(placements) {
        let found = Size::new(placement.width, placement.height);
        if found != item.size() {
            return Err(RenderError::SizeMismatch {
                id: item.id.clone(),
                expected: item.size(),
                found,
            });
        }
    }

    let css = format!("{}\n\n{}", generate_reveal_css(reveal), CSS_STATIC);
    let container = placements.container;

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                div.collage style=(format!("width: {}; height: {};", px(container.width), px(container.height))) {
                    @for (item, placement) in scene.items.iter().zip(placements) {
                        (render_item(item, placement, reveal.stagger))
                    }
                }
            }
        }
    })
}

fn render_item(item: &SceneItem, placement: &Placement, stagger: f64) -> Markup {
    let style = item_style(placement, stagger);
    let alt = item.title.as_deref().unwrap_or("");
    html! {
        @match &item.src {
            Some(src) => {
                img.collage-item src=(src) alt=(alt) data-id=(item.id) style=(style);
            }
            None => {
                div.collage-item.collage-placeholder data-id=(item.id) style=(style) {}
            }
        }
    }
}

/// Inline positioning and animation style for one placement.
fn item_style(p: &Placement, stagger: f64) -> String {
    format!(
        "left: {}; top: {}; width: {}; height: {}; animation-delay: {:.3}s;",
        px(p.left),
        px(p.top),
        px(p.width),
        px(p.height),
        p.reveal_delay * stagger,
    )
}

fn px(value: f64) -> String {
    format!("{:.2}px", value)
}

/// Write a rendered page, creating parent directories as needed.
pub fn write_page(path: &Path, page: Markup) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, page.into_string())?;
    Ok(())
}
