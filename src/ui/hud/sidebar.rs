// SPDX-License-Identifier: MPL-2.0
//! Vertical stack of buttons on the left edge of the view.
//!
//! Buttons are appended below the current stack; a single shared help label
//! follows whichever button is hovered. Side-bar buttons never steal view
//! focus: the focus-changing flag is cleared on add.

use crate::action::ActionRegistry;
use crate::core::Localizer;
use crate::ui::design_tokens::{layout, palette};
use crate::ui::hud::button::IconButton;
use crate::ui::hud::{bounding_rect, hover_tip, HelpLabel};
use iced::{Color, Point, Rectangle};

pub struct SideBar {
    buttons: Vec<IconButton>,
    help_label: HelpLabel,
    pos: Point,
    text_color: Color,
}

impl SideBar {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            help_label: HelpLabel::new(),
            pos: Point::ORIGIN,
            text_color: palette::TEXT,
        }
    }

    /// Position of the bar in scene coordinates.
    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Appends a button at the bottom of the existing stack.
    pub fn add_button(&mut self, mut button: IconButton) {
        let mut pos_y = 0.0;
        if !self.buttons.is_empty() {
            let rect = self.bounding_rect_no_help_label();
            pos_y += rect.y + rect.height - 1.0;
        }
        button.set_focus_on_sky(false);
        button.set_pos(Point::new(
            0.0,
            (pos_y + layout::SIDEBAR_BUTTON_SPACING).round(),
        ));
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[IconButton] {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut [IconButton] {
        &mut self.buttons
    }

    /// Index of the button under `point` (bar-local coordinates).
    pub fn button_at(&self, point: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(point))
    }

    /// Children bounding box excluding the help label, so label churn never
    /// feeds back into layout.
    pub fn bounding_rect_no_help_label(&self) -> Rectangle {
        bounding_rect(self.buttons.iter().map(|b| b.bounds()))
    }

    /// Updates the shared help label after a button's hover state changed.
    pub fn button_hover_changed(
        &mut self,
        index: usize,
        hovered: bool,
        actions: &ActionRegistry,
        localizer: &dyn Localizer,
    ) {
        if hovered {
            let Some(button) = self.buttons.get(index) else {
                return;
            };
            let Some(action) = button.action().and_then(|name| actions.get(name)) else {
                return;
            };
            let tip = hover_tip(action, localizer);
            let rect = self.bounding_rect_no_help_label();
            let label_y = button.pos().y + button.size().height / 2.0 - layout::SIDEBAR_LABEL_RAISE;
            self.help_label.text = tip;
            self.help_label.pos = Point::new(
                (rect.width + layout::SIDEBAR_LABEL_GAP).round(),
                label_y.round(),
            );
        } else {
            self.help_label.clear();
        }
    }

    pub fn help_label(&self) -> &HelpLabel {
        &self.help_label
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Recolors the help label.
    pub fn set_color(&mut self, color: Color) {
        self.text_color = color;
    }
}

impl Default for SideBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::core::DefaultLocalizer;
    use crate::ui::hud::button::{ButtonConfig, ButtonPixmaps};
    use crate::ui::pixmap::Pixmap;

    fn test_button(action: Option<&str>) -> IconButton {
        let on = Pixmap::solid(34, 34, Color::WHITE, 1.0).unwrap();
        let off = Pixmap::solid(34, 34, Color::BLACK, 1.0).unwrap();
        IconButton::new(
            ButtonPixmaps::binary(on, off, None),
            ButtonConfig {
                action: action.map(String::from),
                action_checkable: true,
                ..ButtonConfig::default()
            },
            1.0,
        )
    }

    #[test]
    fn buttons_stack_downward() {
        let mut bar = SideBar::new();
        bar.add_button(test_button(None));
        bar.add_button(test_button(None));
        bar.add_button(test_button(None));

        let ys: Vec<f32> = bar.buttons().iter().map(|b| b.pos().y).collect();
        assert_eq!(ys[0], 11.0);
        assert!(ys[1] > ys[0]);
        assert!(ys[2] > ys[1]);
        // Each step advances by one button height plus the spacing.
        let step = ys[1] - ys[0];
        assert!((step - (34.0 + 10.0)).abs() <= 1.0, "step was {step}");
    }

    #[test]
    fn added_buttons_never_steal_sky_focus() {
        let mut bar = SideBar::new();
        let mut button = test_button(Some("actionGrid"));
        button.set_focus_on_sky(true);
        bar.add_button(button);

        let events = bar.buttons_mut()[0].release(super::super::button::PointerButton::Primary);
        assert!(!events.contains(&super::super::button::ButtonEvent::FocusSky));
    }

    #[test]
    fn hover_shows_label_with_shortcut_and_clears() {
        let mut actions = ActionRegistry::new();
        actions.add(Action::new("actionGrid", "Equatorial grid").with_shortcut("E"));

        let mut bar = SideBar::new();
        bar.add_button(test_button(Some("actionGrid")));

        bar.button_hover_changed(0, true, &actions, &DefaultLocalizer);
        assert_eq!(bar.help_label().text, "Equatorial grid  [E]");
        assert!(bar.help_label().pos.x >= 34.0);

        bar.button_hover_changed(0, false, &actions, &DefaultLocalizer);
        assert!(bar.help_label().is_empty());
    }

    #[test]
    fn bounding_rect_ignores_help_label() {
        let mut actions = ActionRegistry::new();
        actions.add(Action::new("actionGrid", "A very long action label"));

        let mut bar = SideBar::new();
        bar.add_button(test_button(Some("actionGrid")));
        let before = bar.bounding_rect_no_help_label();

        bar.button_hover_changed(0, true, &actions, &DefaultLocalizer);
        let after = bar.bounding_rect_no_help_label();
        assert_eq!(before, after);
    }

    #[test]
    fn hover_on_action_less_button_leaves_label_empty() {
        let actions = ActionRegistry::new();
        let mut bar = SideBar::new();
        bar.add_button(test_button(None));
        bar.button_hover_changed(0, true, &actions, &DefaultLocalizer);
        assert!(bar.help_label().is_empty());
    }
}
