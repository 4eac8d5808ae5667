// SPDX-License-Identifier: MPL-2.0
//! The retained-mode control-bar layer.
//!
//! # Components
//!
//! - [`button`] - Toggleable/tristate pixmap button with hover fade
//! - [`sidebar`] - Vertical button stack with a hover help label
//! - [`bottom_bar`] - Grouped horizontal button stack plus live status text
//! - [`status`] - Status string composition (clock, location, FOV, FPS)
//! - [`outline`] - Decorative rounded path tracing both bars
//! - [`corner`] - Composite-opacity corner button container
//! - [`scene`] - Composition root: pointer routing, animation ticks, redraw
//!
//! Everything works in logical (device-independent) pixels; density scaling
//! happens inside the buttons' composite caches.

pub mod animation;
pub mod bottom_bar;
pub mod button;
pub mod corner;
pub mod outline;
pub mod scene;
pub mod sidebar;
pub mod status;

use crate::action::Action;
use crate::core::Localizer;
use iced::Point;

/// Text measurement used for layout.
///
/// The host injects whatever metrics its text renderer provides.
/// [`ApproxMetrics`] is a deterministic fallback good enough for HUD
/// layout.
pub trait TextMetrics {
    /// Advance width of `text` at the given pixel size.
    fn text_width(&self, text: &str, size: f32) -> f32;
    /// Line height at the given pixel size.
    fn line_height(&self, size: f32) -> f32;
}

/// Average-advance estimate: no font access, fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl TextMetrics for ApproxMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.55
    }

    fn line_height(&self, size: f32) -> f32 {
        size * 1.25
    }
}

/// The shared hover help label a bar repositions and re-texts.
#[derive(Debug, Clone)]
pub struct HelpLabel {
    pub text: String,
    pub pos: Point,
}

impl HelpLabel {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            pos: Point::ORIGIN,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for HelpLabel {
    fn default() -> Self {
        Self::new()
    }
}

/// Union of a set of rectangles; the zero rectangle when empty.
pub(crate) fn bounding_rect(rects: impl Iterator<Item = iced::Rectangle>) -> iced::Rectangle {
    let mut bounds: Option<iced::Rectangle> = None;
    for rect in rects {
        bounds = Some(match bounds {
            None => rect,
            Some(acc) => {
                let x = acc.x.min(rect.x);
                let y = acc.y.min(rect.y);
                let right = (acc.x + acc.width).max(rect.x + rect.width);
                let bottom = (acc.y + acc.height).max(rect.y + rect.height);
                iced::Rectangle {
                    x,
                    y,
                    width: right - x,
                    height: bottom - y,
                }
            }
        });
    }
    bounds.unwrap_or(iced::Rectangle {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    })
}

/// Builds the hover tip for a button's action: label plus bracketed
/// shortcut, with the literal "Space" key name run through the localizer.
pub(crate) fn hover_tip(action: &Action, localizer: &dyn Localizer) -> String {
    let mut tip = action.label.clone();
    if let Some(shortcut) = &action.shortcut {
        let shortcut = if shortcut == "Space" {
            localizer.tr("Space")
        } else {
            shortcut.clone()
        };
        if !shortcut.is_empty() {
            tip.push_str("  [");
            tip.push_str(&shortcut);
            tip.push(']');
        }
    }
    tip
}
