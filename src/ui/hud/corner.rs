// SPDX-License-Identifier: MPL-2.0
//! Corner-positioned button container with a broadcast opacity.

use crate::ui::hud::button::IconButton;
use crate::ui::hud::bounding_rect;
use iced::{Point, Rectangle};

/// Holds the buttons parked in one corner of the view and fades them as a
/// unit.
pub struct CornerOverlay {
    buttons: Vec<IconButton>,
    /// Last broadcast value; starts high so the first fade-out always
    /// reaches the children.
    last_opacity: f32,
    pos: Point,
}

impl CornerOverlay {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            last_opacity: 10.0,
            pos: Point::ORIGIN,
        }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub fn add_button(&mut self, button: IconButton) {
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[IconButton] {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut [IconButton] {
        &mut self.buttons
    }

    pub fn button_at(&self, point: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(point))
    }

    pub fn bounding_rect(&self) -> Rectangle {
        let rect = bounding_rect(self.buttons.iter().map(|b| b.bounds()));
        if rect.width == 0.0 && rect.height == 0.0 {
            return rect;
        }
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: rect.width - 1.0,
            height: rect.height - 1.0,
        }
    }

    /// Broadcasts an opacity to every contained button. Skipped entirely
    /// when both the new and the last-applied value are at or below zero,
    /// the cheap early-exit for the fully hidden state.
    pub fn set_opacity(&mut self, opacity: f32) {
        if opacity <= 0.0 && self.last_opacity <= 0.0 {
            return;
        }
        self.last_opacity = opacity;
        for button in &mut self.buttons {
            button.set_opacity(opacity);
        }
    }
}

impl Default for CornerOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::hud::button::{ButtonConfig, ButtonPixmaps};
    use crate::ui::pixmap::Pixmap;
    use iced::Color;

    fn test_button() -> IconButton {
        let on = Pixmap::solid(16, 16, Color::WHITE, 1.0).unwrap();
        let off = Pixmap::solid(16, 16, Color::BLACK, 1.0).unwrap();
        IconButton::new(
            ButtonPixmaps::binary(on, off, None),
            ButtonConfig::default(),
            1.0,
        )
    }

    #[test]
    fn opacity_broadcasts_to_every_button() {
        let mut overlay = CornerOverlay::new();
        overlay.add_button(test_button());
        overlay.add_button(test_button());

        overlay.set_opacity(0.5);
        assert!(overlay.buttons().iter().all(|b| b.opacity() == 0.5));
    }

    #[test]
    fn hidden_state_short_circuits_repeat_broadcasts() {
        let mut overlay = CornerOverlay::new();
        overlay.add_button(test_button());

        overlay.set_opacity(0.0);
        assert_eq!(overlay.buttons()[0].opacity(), 0.0);

        // Sneak a different value in behind the broadcast; a second zero
        // must take the early exit and leave it untouched.
        overlay.buttons_mut()[0].set_opacity(0.7);
        overlay.set_opacity(0.0);
        assert_eq!(overlay.buttons()[0].opacity(), 0.7);

        // A positive value broadcasts again.
        overlay.set_opacity(0.3);
        assert_eq!(overlay.buttons()[0].opacity(), 0.3);
    }

    #[test]
    fn first_fade_out_always_reaches_children() {
        let mut overlay = CornerOverlay::new();
        overlay.add_button(test_button());
        // last_opacity starts high, so an immediate zero is not skipped.
        overlay.set_opacity(0.0);
        assert_eq!(overlay.buttons()[0].opacity(), 0.0);
    }

    #[test]
    fn bounding_rect_spans_all_buttons() {
        let mut overlay = CornerOverlay::new();
        let mut a = test_button();
        a.set_pos(Point::new(0.0, 0.0));
        let mut b = test_button();
        b.set_pos(Point::new(20.0, 0.0));
        overlay.add_button(a);
        overlay.add_button(b);

        let rect = overlay.bounding_rect();
        assert_eq!(rect.width, 35.0);
        assert_eq!(rect.height, 15.0);
    }
}
