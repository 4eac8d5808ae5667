// SPDX-License-Identifier: MPL-2.0
//! Composition root of the HUD: owns both bars, the outline path, and the
//! corner overlays; routes pointer events; advances hover fades; applies
//! action-state changes; and renders everything into an Iced canvas frame.
//!
//! All mutation happens on the UI thread in response to pointer events,
//! timer ticks, or collaborator notifications. The scene accumulates a
//! single "needs redraw" flag the host consumes once per frame.

use crate::action::ActionRegistry;
use crate::core::{CoreSnapshot, Localizer};
use crate::ui::design_tokens::outline as outline_tokens;
use crate::ui::hud::bottom_bar::BottomBar;
use crate::ui::hud::button::{ButtonEvent, IconButton, PointerButton};
use crate::ui::hud::corner::CornerOverlay;
use crate::ui::hud::outline::{OutlinePath, Segment};
use crate::ui::hud::sidebar::SideBar;
use crate::ui::hud::{HelpLabel, TextMetrics};
use iced::widget::canvas;
use iced::{mouse, Color, Point, Radians, Rectangle};
use std::time::Duration;

/// Which container a hit-tested button belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Side,
    Bottom,
    Corner(usize),
}

/// Pointer events the canvas forwards to the host, which applies them to
/// the scene in its update loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudEvent {
    Moved(Point),
    Left,
    Pressed(Point, PointerButton),
    Released(Point, PointerButton),
}

pub struct HudScene {
    side_bar: SideBar,
    bottom_bar: BottomBar,
    outline: OutlinePath,
    corners: Vec<CornerOverlay>,
    hovered: Option<(Region, usize)>,
    needs_redraw: bool,
    focus_sky_requested: bool,
}

impl HudScene {
    pub fn new(side_bar: SideBar, bottom_bar: BottomBar) -> Self {
        Self {
            side_bar,
            bottom_bar,
            outline: OutlinePath::new(),
            corners: Vec::new(),
            hovered: None,
            needs_redraw: true,
            focus_sky_requested: false,
        }
    }

    pub fn side_bar(&self) -> &SideBar {
        &self.side_bar
    }

    pub fn side_bar_mut(&mut self) -> &mut SideBar {
        &mut self.side_bar
    }

    pub fn bottom_bar(&self) -> &BottomBar {
        &self.bottom_bar
    }

    pub fn bottom_bar_mut(&mut self) -> &mut BottomBar {
        &mut self.bottom_bar
    }

    pub fn outline(&self) -> &OutlinePath {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut OutlinePath {
        &mut self.outline
    }

    /// Adds a corner overlay; returns its index for later addressing.
    pub fn add_corner(&mut self, corner: CornerOverlay) -> usize {
        self.corners.push(corner);
        self.corners.len() - 1
    }

    pub fn corner_mut(&mut self, index: usize) -> Option<&mut CornerOverlay> {
        self.corners.get_mut(index)
    }

    /// The button under a scene point, topmost region first.
    pub fn hit_test(&self, point: Point) -> Option<(Region, usize)> {
        for (i, corner) in self.corners.iter().enumerate() {
            let local = local_point(point, corner.pos());
            if let Some(idx) = corner.button_at(local) {
                return Some((Region::Corner(i), idx));
            }
        }
        let local = local_point(point, self.side_bar.pos());
        if let Some(idx) = self.side_bar.button_at(local) {
            return Some((Region::Side, idx));
        }
        let local = local_point(point, self.bottom_bar.pos());
        if let Some(idx) = self.bottom_bar.button_at(local) {
            return Some((Region::Bottom, idx));
        }
        None
    }

    fn button_mut(&mut self, region: Region, index: usize) -> Option<&mut IconButton> {
        match region {
            Region::Side => self.side_bar.buttons_mut().get_mut(index),
            Region::Bottom => self.bottom_bar.button_mut(index),
            Region::Corner(i) => self.corners.get_mut(i)?.buttons_mut().get_mut(index),
        }
    }

    /// Routes a pointer move: hover leave/enter plus help-label updates.
    pub fn pointer_moved(
        &mut self,
        point: Point,
        actions: &ActionRegistry,
        localizer: &dyn Localizer,
    ) {
        let hit = self.hit_test(point);
        if hit == self.hovered {
            return;
        }
        if let Some((region, index)) = self.hovered.take() {
            if let Some(button) = self.button_mut(region, index) {
                button.hover_leave();
            }
            self.route_hover(region, index, false, actions, localizer);
        }
        if let Some((region, index)) = hit {
            if let Some(button) = self.button_mut(region, index) {
                button.hover_enter();
            }
            self.route_hover(region, index, true, actions, localizer);
        }
        self.hovered = hit;
        self.needs_redraw = true;
    }

    /// Clears any hover when the pointer leaves the canvas.
    pub fn pointer_left(&mut self, actions: &ActionRegistry, localizer: &dyn Localizer) {
        self.pointer_moved(Point::new(f32::MIN, f32::MIN), actions, localizer);
    }

    fn route_hover(
        &mut self,
        region: Region,
        index: usize,
        hovered: bool,
        actions: &ActionRegistry,
        localizer: &dyn Localizer,
    ) {
        match region {
            Region::Side => self
                .side_bar
                .button_hover_changed(index, hovered, actions, localizer),
            Region::Bottom => self
                .bottom_bar
                .button_hover_changed(index, hovered, actions, localizer),
            Region::Corner(_) => {}
        }
    }

    pub fn pointer_pressed(
        &mut self,
        point: Point,
        pointer: PointerButton,
        actions: &mut ActionRegistry,
    ) {
        if let Some((region, index)) = self.hit_test(point) {
            let events = match self.button_mut(region, index) {
                Some(button) => button.press(pointer),
                None => return,
            };
            self.apply_button_events(region, index, &events, actions);
        }
    }

    pub fn pointer_released(
        &mut self,
        point: Point,
        pointer: PointerButton,
        actions: &mut ActionRegistry,
    ) {
        if let Some((region, index)) = self.hit_test(point) {
            let events = match self.button_mut(region, index) {
                Some(button) => button.release(pointer),
                None => return,
            };
            self.apply_button_events(region, index, &events, actions);
        }
    }

    /// Applies a button's notifications to the registry and, for resulting
    /// state changes, back into every bound button, all in one call stack.
    fn apply_button_events(
        &mut self,
        region: Region,
        index: usize,
        events: &[ButtonEvent],
        actions: &mut ActionRegistry,
    ) {
        let (action, secondary) = match self.button_mut(region, index) {
            Some(button) => (
                button.action().map(String::from),
                button.secondary_action().map(String::from),
            ),
            None => return,
        };

        for event in events {
            match event {
                ButtonEvent::Toggled(state) => {
                    if let Some(name) = &action {
                        if let Some(change) = actions.set_checked(name, state.is_on()) {
                            self.on_action_state_changed(&change.name, change.checked);
                        }
                    }
                }
                ButtonEvent::Triggered => {
                    if let Some(name) = &action {
                        actions.trigger(name);
                    }
                }
                ButtonEvent::TriggeredSecondary => {
                    if let Some(name) = &secondary {
                        actions.trigger(name);
                    }
                }
                ButtonEvent::FocusSky => self.focus_sky_requested = true,
                ButtonEvent::HoverChanged(_) => {}
            }
        }
        self.needs_redraw = true;
    }

    /// Synchronous external-toggle notification: pushes the new state into
    /// every button bound to the action. Idempotent for the button that
    /// originated the change.
    pub fn on_action_state_changed(&mut self, name: &str, checked: bool) {
        let matches = |b: &IconButton| b.action() == Some(name);
        for button in self.side_bar.buttons_mut().iter_mut().filter(|b| matches(b)) {
            button.set_checked_bool(checked);
        }
        for button in self.bottom_bar.buttons_mut().filter(|b| matches(b)) {
            button.set_checked_bool(checked);
        }
        for corner in &mut self.corners {
            for button in corner.buttons_mut().iter_mut().filter(|b| matches(b)) {
                button.set_checked_bool(checked);
            }
        }
        self.needs_redraw = true;
    }

    fn for_each_button(&mut self, mut f: impl FnMut(&mut IconButton)) {
        for button in self.side_bar.buttons_mut() {
            f(button);
        }
        for button in self.bottom_bar.buttons_mut() {
            f(button);
        }
        for corner in &mut self.corners {
            for button in corner.buttons_mut() {
                f(button);
            }
        }
    }

    /// Advances every hover fade by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let mut changed = false;
        self.for_each_button(|b| changed |= b.tick(dt));
        if changed {
            self.needs_redraw = true;
        }
    }

    pub fn has_running_animation(&self) -> bool {
        self.side_bar.buttons().iter().any(|b| b.is_animating())
            || self.bottom_bar.buttons().any(|b| b.is_animating())
            || self
                .corners
                .iter()
                .any(|c| c.buttons().iter().any(|b| b.is_animating()))
    }

    /// Runs the bottom-bar text pass and recomputes the outline from fresh
    /// core data. Returns true when a structural size change occurred, so
    /// the host can reposition the bars.
    pub fn sync(
        &mut self,
        core: &CoreSnapshot,
        localizer: &dyn Localizer,
        metrics: &dyn TextMetrics,
    ) -> bool {
        let size_changed = self.bottom_bar.take_size_changed();
        let text_changed = self
            .bottom_bar
            .update_text(core, localizer, metrics, size_changed);
        self.outline
            .update_path(&self.bottom_bar, &self.side_bar, metrics);
        if text_changed || size_changed {
            self.needs_redraw = true;
        }
        size_changed
    }

    /// Ensures every button has a composite scaled to the display's
    /// device-pixel ratio.
    pub fn prepare(&mut self, ratio: f32) {
        self.for_each_button(|b| {
            b.prepare(ratio);
        });
    }

    /// Recolors the bars' text items.
    pub fn set_color(&mut self, color: Color) {
        self.side_bar.set_color(color);
        self.bottom_bar.set_color(color);
    }

    /// Propagates the global button-background flag to every button.
    pub fn set_backgrounds_enabled(&mut self, enabled: bool) {
        self.for_each_button(|b| b.set_backgrounds_enabled(enabled));
        self.needs_redraw = true;
    }

    /// The "screen needs redraw" notification, consumed once per frame.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// One-shot request to hand input focus back to the primary scene.
    pub fn take_focus_sky_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_sky_requested)
    }

    /// Paints the outline, all buttons, the status fields, and the help
    /// labels into a canvas frame. Rendering is thin: every pixel decision
    /// was made when the composites were prepared.
    pub fn draw(&self, frame: &mut canvas::Frame) {
        self.draw_outline(frame);

        self.draw_buttons(frame, self.side_bar.pos(), self.side_bar.buttons().iter());
        self.draw_buttons(frame, self.bottom_bar.pos(), self.bottom_bar.buttons());
        for corner in &self.corners {
            self.draw_buttons(frame, corner.pos(), corner.buttons().iter());
        }

        let bar_pos = self.bottom_bar.pos();
        let size = self.bottom_bar.font_size();
        let color = self.bottom_bar.text_color();
        for field in [
            self.bottom_bar.datetime(),
            self.bottom_bar.location(),
            self.bottom_bar.fov(),
            self.bottom_bar.fps(),
        ] {
            if !field.text.trim().is_empty() {
                frame.fill_text(canvas::Text {
                    content: field.text.clone(),
                    position: offset_point(bar_pos, field.pos),
                    color,
                    size: size.into(),
                    ..canvas::Text::default()
                });
            }
        }

        self.draw_help_label(
            frame,
            self.side_bar.pos(),
            self.side_bar.help_label(),
            self.side_bar.text_color(),
            size,
        );
        self.draw_help_label(
            frame,
            self.bottom_bar.pos(),
            self.bottom_bar.help_label(),
            color,
            size,
        );
    }

    fn draw_outline(&self, frame: &mut canvas::Frame) {
        if self.outline.segments().is_empty() {
            return;
        }
        let path = canvas::Path::new(|builder| {
            for segment in self.outline.segments() {
                match *segment {
                    Segment::MoveTo(point) => builder.move_to(point),
                    Segment::LineTo(point) => builder.line_to(point),
                    Segment::Arc {
                        center,
                        radius,
                        start_angle,
                        end_angle,
                    } => builder.arc(canvas::path::Arc {
                        center,
                        radius,
                        start_angle: Radians(start_angle),
                        end_angle: Radians(end_angle),
                    }),
                }
            }
            builder.close();
        });
        frame.fill(&path, self.outline.fill_color());
        frame.stroke(
            &path,
            canvas::Stroke::default()
                .with_width(outline_tokens::STROKE_WIDTH)
                .with_color(self.outline.stroke_color()),
        );
    }

    fn draw_buttons<'a>(
        &self,
        frame: &mut canvas::Frame,
        origin: Point,
        buttons: impl Iterator<Item = &'a IconButton>,
    ) {
        for button in buttons {
            if !button.visible() {
                continue;
            }
            if let Some(handle) = button.handle() {
                let bounds = Rectangle::new(
                    offset_point(origin, button.pos()),
                    button.size(),
                );
                frame.draw_image(bounds, canvas::Image::new(handle.clone()));
            }
        }
    }

    fn draw_help_label(
        &self,
        frame: &mut canvas::Frame,
        origin: Point,
        label: &HelpLabel,
        color: Color,
        size: f32,
    ) {
        if label.is_empty() {
            return;
        }
        frame.fill_text(canvas::Text {
            content: label.text.clone(),
            position: offset_point(origin, label.pos),
            color,
            size: size.into(),
            ..canvas::Text::default()
        });
    }
}

fn local_point(point: Point, origin: Point) -> Point {
    Point::new(point.x - origin.x, point.y - origin.y)
}

fn offset_point(origin: Point, offset: Point) -> Point {
    Point::new(origin.x + offset.x, origin.y + offset.y)
}

/// Canvas adapter: forwards pointer events as [`HudEvent`]s and paints the
/// scene through a host-owned geometry cache.
pub struct HudCanvas<'a> {
    pub scene: &'a HudScene,
    pub cache: &'a canvas::Cache,
}

impl<Message> canvas::Program<Message> for HudCanvas<'_>
where
    Message: From<HudEvent> + 'static,
{
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let publish = |ev: HudEvent| Some(canvas::Action::publish(Message::from(ev)));
        match event {
            iced::Event::Mouse(mouse::Event::CursorLeft) => publish(HudEvent::Left),
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds)?;
                publish(HudEvent::Moved(position))
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let pointer = pointer_button(*button)?;
                let position = cursor.position_in(bounds)?;
                // Only capture when a HUD button is actually under the
                // cursor; the sky view handles everything else.
                if self.scene.hit_test(position).is_some() {
                    Some(canvas::Action::publish(Message::from(HudEvent::Pressed(
                        position, pointer,
                    )))
                    .and_capture())
                } else {
                    None
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                let pointer = pointer_button(*button)?;
                let position = cursor.position_in(bounds)?;
                if self.scene.hit_test(position).is_some() {
                    Some(canvas::Action::publish(Message::from(HudEvent::Released(
                        position, pointer,
                    )))
                    .and_capture())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            self.scene.draw(frame);
        });
        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.scene.hit_test(position).is_some() => {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }
}

fn pointer_button(button: mouse::Button) -> Option<PointerButton> {
    match button {
        mouse::Button::Left => Some(PointerButton::Primary),
        mouse::Button::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::{AtmosphereSection, DisplaySection};
    use crate::core::DefaultLocalizer;
    use crate::ui::hud::bottom_bar::GroupBackgrounds;
    use crate::ui::hud::button::{ButtonConfig, ButtonPixmaps};
    use crate::ui::hud::ApproxMetrics;
    use crate::ui::pixmap::Pixmap;
    use std::sync::Arc;

    fn plates() -> GroupBackgrounds {
        let plate = Arc::new(Pixmap::solid(34, 34, Color::BLACK, 1.0).unwrap());
        GroupBackgrounds {
            left: plate.clone(),
            right: plate.clone(),
            middle: plate.clone(),
            single: plate,
        }
    }

    fn test_button(action: &str, checkable: bool) -> IconButton {
        let on = Pixmap::solid(34, 34, Color::WHITE, 1.0).unwrap();
        let off = Pixmap::solid(34, 34, Color::BLACK, 1.0).unwrap();
        IconButton::new(
            ButtonPixmaps::binary(on, off, Some(Pixmap::solid(34, 34, Color::WHITE, 1.0).unwrap())),
            ButtonConfig {
                action: Some(action.to_string()),
                action_checkable: checkable,
                ..ButtonConfig::default()
            },
            1.0,
        )
    }

    fn scene_with_buttons() -> (HudScene, ActionRegistry) {
        let mut actions = ActionRegistry::new();
        actions.add(Action::new("actionGrid", "Equatorial grid").checkable(false));
        actions.add(Action::new("actionLines", "Constellation lines").checkable(false));

        let mut side = SideBar::new();
        side.set_pos(Point::new(0.0, 100.0));
        side.add_button(test_button("actionLines", true));

        let mut bottom = BottomBar::new(
            plates(),
            DisplaySection::default(),
            AtmosphereSection::default(),
            13.0,
        );
        bottom.set_pos(Point::new(0.0, 500.0));
        bottom.add_button(test_button("actionGrid", true), "010-group", None, &ApproxMetrics);

        (HudScene::new(side, bottom), actions)
    }

    #[test]
    fn press_on_bottom_button_toggles_its_action() {
        let (mut scene, mut actions) = scene_with_buttons();
        let button_pos = {
            let b = scene.bottom_bar().buttons().next().unwrap();
            offset_point(scene.bottom_bar().pos(), b.pos())
        };
        let hit = Point::new(button_pos.x + 5.0, button_pos.y + 5.0);

        scene.pointer_pressed(hit, PointerButton::Primary, &mut actions);
        assert!(actions.is_checked("actionGrid"));
        assert_eq!(actions.take_triggered(), vec!["actionGrid"]);
        assert!(scene.take_redraw_request());
    }

    #[test]
    fn external_state_change_reaches_every_bound_button() {
        let (mut scene, mut actions) = scene_with_buttons();
        if let Some(change) = actions.set_checked("actionLines", true) {
            scene.on_action_state_changed(&change.name, change.checked);
        }
        let button = &scene.side_bar().buttons()[0];
        assert!(button.checked().is_on());
    }

    #[test]
    fn hover_transition_updates_help_label_and_redraw_flag() {
        let (mut scene, actions) = scene_with_buttons();
        let button_pos = offset_point(
            scene.side_bar().pos(),
            scene.side_bar().buttons()[0].pos(),
        );
        let over = Point::new(button_pos.x + 2.0, button_pos.y + 2.0);

        scene.pointer_moved(over, &actions, &DefaultLocalizer);
        assert_eq!(scene.side_bar().help_label().text, "Constellation lines");
        assert!(scene.take_redraw_request());

        scene.pointer_left(&actions, &DefaultLocalizer);
        assert!(scene.side_bar().help_label().is_empty());
    }

    #[test]
    fn hover_fade_runs_through_tick() {
        let (mut scene, actions) = scene_with_buttons();
        let button_pos = offset_point(
            scene.side_bar().pos(),
            scene.side_bar().buttons()[0].pos(),
        );
        scene.pointer_moved(
            Point::new(button_pos.x + 2.0, button_pos.y + 2.0),
            &actions,
            &DefaultLocalizer,
        );
        assert!(scene.has_running_animation());
        scene.take_redraw_request();

        scene.tick(Duration::from_millis(25));
        assert!(scene.take_redraw_request());
        for _ in 0..12 {
            scene.tick(Duration::from_millis(25));
        }
        assert!(!scene.has_running_animation());
    }

    #[test]
    fn sync_reports_structural_changes_once() {
        let (mut scene, _) = scene_with_buttons();
        let core = CoreSnapshot::default();

        // The construction-time insertion left a pending size change.
        assert!(scene.sync(&core, &DefaultLocalizer, &ApproxMetrics));
        assert!(!scene.sync(&core, &DefaultLocalizer, &ApproxMetrics));

        scene.bottom_bar_mut().add_button(
            test_button("actionLines", true),
            "010-group",
            None,
            &ApproxMetrics,
        );
        assert!(scene.sync(&core, &DefaultLocalizer, &ApproxMetrics));
    }

    #[test]
    fn sync_rebuilds_the_outline() {
        let (mut scene, _) = scene_with_buttons();
        let core = CoreSnapshot::default();
        scene.sync(&core, &DefaultLocalizer, &ApproxMetrics);
        assert_eq!(scene.outline().segments().len(), 8);
    }

    #[test]
    fn prepare_populates_every_button_handle() {
        let (mut scene, _) = scene_with_buttons();
        scene.prepare(1.0);
        assert!(scene
            .bottom_bar()
            .buttons()
            .all(|b| b.handle().is_some()));
        assert!(scene
            .side_bar()
            .buttons()
            .iter()
            .all(|b| b.handle().is_some()));
    }

    #[test]
    fn corner_buttons_are_hit_before_bars() {
        let (mut scene, mut actions) = scene_with_buttons();
        actions.add(Action::new("actionCorner", "Corner"));
        let mut corner = CornerOverlay::new();
        corner.set_pos(Point::new(0.0, 100.0));
        corner.add_button(test_button("actionCorner", false));
        scene.add_corner(corner);

        // This point lies inside both the corner button and the side bar's
        // first button; the corner wins.
        let hit = scene.hit_test(Point::new(5.0, 115.0));
        assert_eq!(hit, Some((Region::Corner(0), 0)));
    }
}
