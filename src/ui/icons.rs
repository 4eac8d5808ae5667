// SPDX-License-Identifier: MPL-2.0
//! Built-in button icons, rasterized from embedded SVG at the configured
//! pixmap scale.
//!
//! Icons use generic visual names describing the icon's appearance, not the
//! action context (e.g. `mountain`, not `toggle_ground`). Each icon renders
//! three variants: a dim "off" stroke, a bright "on" stroke, and a white
//! hover overlay the button fades in on top.
//!
//! Rasterization happens once at construction time, so there is no handle
//! cache here; the buttons own the resulting pixmaps.

use crate::error::{Error, Result};
use crate::ui::design_tokens::{palette, sizing};
use crate::ui::hud::bottom_bar::GroupBackgrounds;
use crate::ui::hud::button::ButtonPixmaps;
use crate::ui::pixmap::Pixmap;
use resvg::usvg;
use std::sync::Arc;

const ON_STROKE: &str = "#7ec8ff";
const OFF_STROKE: &str = "#8d93a0";
const HOVER_STROKE: &str = "#ffffff";

/// Wraps a path outline into a complete stroke-styled SVG document.
fn icon_svg(d: &str, stroke: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="34" height="34" "#,
            r#"viewBox="0 0 34 34"><path d="{}" fill="none" stroke="{}" "#,
            r#"stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#
        ),
        d, stroke
    )
}

/// Rasterizes an SVG document at the given device-independent scale.
pub fn render_svg(svg: &str, scale: f32) -> Result<Pixmap> {
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default())
        .map_err(|e| Error::Icon(e.to_string()))?;

    let size = tree.size();
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Icon("zero-sized icon".to_string()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(Pixmap::from_raster(pixmap, scale))
}

/// Renders the on/off/hover pixmap set for one glyph outline.
pub fn button_pixmaps(d: &str, scale: f32) -> Result<ButtonPixmaps> {
    Ok(ButtonPixmaps {
        on: render_svg(&icon_svg(d, ON_STROKE), scale)?,
        off: render_svg(&icon_svg(d, OFF_STROKE), scale)?,
        no_change: None,
        hover: Some(render_svg(&icon_svg(d, HOVER_STROKE), scale)?),
    })
}

macro_rules! define_icon {
    ($name:ident, $d:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name(scale: f32) -> Result<ButtonPixmaps> {
            button_pixmaps($d, scale)
        }
    };
}

define_icon!(
    star_lines,
    "M5 26l8-8 6 4 10-14M13 18l0.1 0.1M19 22l0.1 0.1",
    "Connected star points: a constellation-line polyline."
);
define_icon!(
    grid,
    "M4 17h26M17 4v26M7 9c6 4 14 4 20 0M7 25c6-4 14-4 20 0",
    "Curved coordinate grid: meridian, equator and two parallels."
);
define_icon!(
    mountain,
    "M3 26l8-10 6 7 5-5 9 8",
    "Mountain silhouette: a horizon landscape."
);
define_icon!(
    cloud,
    "M9 22a5 5 0 1 1 2-9 7 7 0 0 1 13 2 4 4 0 0 1-1 7z",
    "Cloud outline."
);
define_icon!(
    moon,
    "M22 6a11 11 0 1 0 6 17 9 9 0 0 1-6-17z",
    "Crescent moon."
);
define_icon!(
    arrows_out,
    "M5 12V5h7M22 5h7v7M29 22v7h-7M12 29H5v-7",
    "Four corner arrows pointing outward."
);
define_icon!(
    clock,
    "M17 7a10 10 0 1 1 0 20 10 10 0 0 1 0-20zM17 11v6l5 3",
    "Clock face with hands."
);
define_icon!(
    triangle_left_bar,
    "M15 8a10 10 0 1 1-8 4M7 6v6h6",
    "Counter-clockwise circular arrow: rewind shape."
);
define_icon!(
    triangle_right_bar,
    "M19 8a10 10 0 1 0 8 4M27 6v6h-6",
    "Clockwise circular arrow: fast-forward shape."
);
define_icon!(
    door_arrow,
    "M12 5H6v24h6M14 17h14M23 11l6 6-6 6",
    "Door with outgoing arrow: quit shape."
);

/// Corner rounding of the generated background plates, logical pixels.
const PLATE_RADIUS: f32 = 8.0;

fn plate_path(w: f32, h: f32, round_left: f32, round_right: f32) -> Option<tiny_skia::Path> {
    let rl = round_left;
    let rr = round_right;
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(rl, 0.0);
    pb.line_to(w - rr, 0.0);
    if rr > 0.0 {
        pb.quad_to(w, 0.0, w, rr);
    }
    pb.line_to(w, h - rr);
    if rr > 0.0 {
        pb.quad_to(w, h, w - rr, h);
    }
    pb.line_to(rl, h);
    if rl > 0.0 {
        pb.quad_to(0.0, h, 0.0, h - rl);
    }
    pb.line_to(0.0, rl);
    if rl > 0.0 {
        pb.quad_to(0.0, 0.0, rl, 0.0);
    }
    pb.close();
    pb.finish()
}

fn plate(scale: f32, round_left: bool, round_right: bool) -> Result<Pixmap> {
    let edge = sizing::BUTTON_ICON * scale;
    let radius = PLATE_RADIUS * scale;
    let mut pixmap = Pixmap::new(edge as u32, edge as u32, scale)
        .ok_or_else(|| Error::Icon("zero-sized plate".to_string()))?;
    let path = plate_path(
        edge,
        edge,
        if round_left { radius } else { 0.0 },
        if round_right { radius } else { 0.0 },
    )
    .ok_or_else(|| Error::Icon("degenerate plate path".to_string()))?;
    pixmap.fill_path(&path, palette::BUTTON_PLATE);
    Ok(pixmap)
}

/// Generates the default left/middle/right/single background plates for a
/// button group.
pub fn group_backgrounds(scale: f32) -> Result<GroupBackgrounds> {
    Ok(GroupBackgrounds {
        left: Arc::new(plate(scale, true, false)?),
        right: Arc::new(plate(scale, false, true)?),
        middle: Arc::new(plate(scale, false, false)?),
        single: Arc::new(plate(scale, true, true)?),
    })
}
