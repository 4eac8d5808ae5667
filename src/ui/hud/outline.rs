// SPDX-License-Identifier: MPL-2.0
//! Decorative rounded path tracing the outer silhouette of both bars.
//!
//! Pure derived geometry: recomputed on demand from the bars' no-label
//! bounding boxes, never maintained incrementally. Angles follow the canvas
//! convention (radians, y-down, clockwise positive).

use crate::ui::design_tokens::{outline, palette};
use crate::ui::hud::bottom_bar::BottomBar;
use crate::ui::hud::sidebar::SideBar;
use crate::ui::hud::TextMetrics;
use iced::{Color, Point, Rectangle};
use std::f32::consts::FRAC_PI_2;

/// One step of the outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc; the renderer connects a line to its start point.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
}

pub struct OutlinePath {
    round_size: f32,
    stroke_color: Color,
    fill_color: Color,
    segments: Vec<Segment>,
}

impl OutlinePath {
    pub fn new() -> Self {
        Self {
            round_size: outline::ROUND_SIZE,
            stroke_color: palette::OUTLINE_STROKE,
            fill_color: palette::OUTLINE_FILL,
            segments: Vec::new(),
        }
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Adjusts the fill opacity only; the tint stays.
    pub fn set_background_opacity(&mut self, opacity: f32) {
        self.fill_color.a = opacity;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rebuilds the path from the two bars' current geometry.
    pub fn update_path(
        &mut self,
        bottom: &BottomBar,
        side: &SideBar,
        metrics: &dyn TextMetrics,
    ) {
        self.segments = compute_segments(
            side.pos(),
            side.bounding_rect_no_help_label(),
            bottom.pos(),
            bottom.bounding_rect_no_help_label(metrics),
            self.round_size,
        );
    }
}

impl Default for OutlinePath {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed silhouette: down the side bar's right edge, around its
/// top-right corner, across the bottom bar's top edge, around its top-right
/// corner, then back along the bottom edge.
pub fn compute_segments(
    side_pos: Point,
    side_rect: Rectangle,
    bottom_pos: Point,
    bottom_rect: Rectangle,
    round_size: f32,
) -> Vec<Segment> {
    let rs = round_size;
    let p = Point::new(
        side_pos.x + outline::EDGE_NUDGE_X,
        side_pos.y + outline::EDGE_NUDGE_Y,
    );
    let p2 = Point::new(
        bottom_pos.x + outline::EDGE_NUDGE_X,
        bottom_pos.y + outline::EDGE_NUDGE_Y,
    );
    let r = side_rect;
    let r2 = bottom_rect;

    vec![
        Segment::MoveTo(Point::new(p.x - rs, p.y - rs)),
        Segment::LineTo(Point::new(p.x + r.width, p.y - rs)),
        Segment::Arc {
            center: Point::new(p.x + r.width, p.y),
            radius: rs,
            start_angle: -FRAC_PI_2,
            end_angle: 0.0,
        },
        Segment::LineTo(Point::new(p.x + r.width + rs, p2.y - rs)),
        Segment::LineTo(Point::new(p2.x + r2.width, p2.y - rs)),
        Segment::Arc {
            center: Point::new(p2.x + r2.width, p2.y),
            radius: rs,
            start_angle: -FRAC_PI_2,
            end_angle: 0.0,
        },
        Segment::LineTo(Point::new(p2.x + r2.width + rs, p2.y + r2.height + rs)),
        Segment::LineTo(Point::new(p.x - rs, p2.y + r2.height + rs)),
    ]
}
