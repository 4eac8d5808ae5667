// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the control-bar layer.
//!
//! All magic numbers the bars and buttons lay out with live here: the hover
//! animation timing, the outline path geometry, and the pixel offsets the
//! bars are designed around.

use iced::Color;

pub mod palette {
    use super::Color;

    /// Text color of status fields and hover labels.
    pub const TEXT: Color = Color::WHITE;

    /// Outline stroke.
    pub const OUTLINE_STROKE: Color = Color {
        r: 0.7,
        g: 0.7,
        b: 0.7,
        a: 0.5,
    };

    /// Outline fill behind the bars.
    pub const OUTLINE_FILL: Color = Color {
        r: 0.22,
        g: 0.22,
        b: 0.23,
        a: 0.2,
    };

    /// Generated button background plate.
    pub const BUTTON_PLATE: Color = Color {
        r: 0.15,
        g: 0.16,
        b: 0.19,
        a: 0.85,
    };
}

pub mod animation {
    use std::time::Duration;

    /// Hover overlay fade duration.
    pub const HOVER: Duration = Duration::from_millis(250);
}

pub mod outline {
    /// Corner radius of the decorative path tracing the bars.
    pub const ROUND_SIZE: f32 = 6.0;

    /// Half-pixel alignment nudge applied to both bar origins.
    pub const EDGE_NUDGE_X: f32 = -0.5;
    pub const EDGE_NUDGE_Y: f32 = 0.5;

    pub const STROKE_WIDTH: f32 = 1.0;
}

pub mod layout {
    /// Vertical spacing added between stacked side-bar buttons.
    pub const SIDEBAR_BUTTON_SPACING: f32 = 10.5;

    /// Gap between the side bar and its hover label.
    pub const SIDEBAR_LABEL_GAP: f32 = 15.5;

    /// Vertical centering offset of the side-bar hover label.
    pub const SIDEBAR_LABEL_RAISE: f32 = 8.0;

    /// Fixed position of the bottom-bar hover label.
    pub const BOTTOM_LABEL_X: f32 = 20.0;
    pub const BOTTOM_LABEL_Y: f32 = -27.0;

    /// Gap between the datetime text baseline row and the button row.
    pub const BUTTON_ROW_GAP: f32 = 3.0;

    /// Right inset of the datetime field against the buttons bounding box.
    pub const DATETIME_RIGHT_INSET: f32 = 5.0;

    /// Base offset of the FPS field left of the datetime field.
    pub const FPS_SHIFT_BASE: f32 = 50.0;

    /// Extra offset of the FOV field left of the FPS field.
    pub const FOV_SHIFT_BASE: f32 = 80.0;

    /// Additional FOV shift when rendering degrees/minutes/seconds.
    pub const FOV_SHIFT_DMS: f32 = 25.0;
}

pub mod sizing {
    /// Authored edge length of the built-in button icons, logical pixels.
    pub const BUTTON_ICON: f32 = 34.0;
}

const _: () = {
    assert!(outline::ROUND_SIZE > 0.0);
    assert!(layout::FOV_SHIFT_BASE > 0.0 && layout::FPS_SHIFT_BASE > 0.0);
    assert!(sizing::BUTTON_ICON > 0.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_duration_matches_design() {
        assert_eq!(animation::HOVER.as_millis(), 250);
    }

    #[test]
    fn outline_colors_are_translucent() {
        assert!(palette::OUTLINE_FILL.a < 1.0);
        assert!(palette::OUTLINE_STROKE.a < 1.0);
    }
}
