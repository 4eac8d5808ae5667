// SPDX-License-Identifier: MPL-2.0
//! Toggleable pixmap button with hover fade and density-aware rendering.
//!
//! A button owns its state pixmaps and composites them (background layers,
//! state image, hover overlay) into a single raster whenever any input
//! changes. The composite is rescaled to the display's device-pixel ratio
//! on demand and cached until the ratio or the composite changes.

use crate::ui::hud::animation::HoverAnimation;
use crate::ui::pixmap::Pixmap;
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Size};
use std::sync::Arc;
use std::time::Duration;

/// Check state; `NoChange` exists only on tristate buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Off,
    On,
    NoChange,
}

impl ButtonState {
    /// Advances the state one step: binary buttons flip Off↔On, tristate
    /// buttons cycle Off→On→NoChange→Off.
    pub fn toggled(self, tristate: bool) -> Self {
        if tristate {
            match self {
                ButtonState::Off => ButtonState::On,
                ButtonState::On => ButtonState::NoChange,
                ButtonState::NoChange => ButtonState::Off,
            }
        } else {
            match self {
                ButtonState::On => ButtonState::Off,
                _ => ButtonState::On,
            }
        }
    }

    pub fn is_on(self) -> bool {
        self == ButtonState::On
    }

    pub fn from_bool(on: bool) -> Self {
        if on {
            ButtonState::On
        } else {
            ButtonState::Off
        }
    }
}

/// Which pointer button an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Notifications a button emits; collected by the owning container and
/// applied synchronously by the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonEvent {
    Toggled(ButtonState),
    Triggered,
    TriggeredSecondary,
    HoverChanged(bool),
    /// Request that the host return input focus to the primary scene.
    FocusSky,
}

/// Background slot assigned by the bottom-bar layout, kept for
/// introspection and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundRole {
    Single,
    Left,
    Middle,
    /// Last slot of a multi-button group: the Single end-cap layered
    /// beneath the Right pixmap (legacy double-paint, preserved).
    RightCapped,
}

/// State pixmaps a button is constructed with.
#[derive(Debug, Clone)]
pub struct ButtonPixmaps {
    pub on: Pixmap,
    pub off: Pixmap,
    pub no_change: Option<Pixmap>,
    pub hover: Option<Pixmap>,
}

impl ButtonPixmaps {
    pub fn binary(on: Pixmap, off: Pixmap, hover: Option<Pixmap>) -> Self {
        Self {
            on,
            off,
            no_change: None,
            hover,
        }
    }

    /// Rescales every pixmap once to the configured device-independent
    /// scale. A no-op when already at the target scale.
    fn rescaled_to(self, scale: f32) -> Self {
        let rescale = |p: Pixmap| {
            if (p.scale() - scale).abs() < f32::EPSILON {
                p
            } else {
                p.rescaled(scale)
            }
        };
        Self {
            on: rescale(self.on),
            off: rescale(self.off),
            no_change: self.no_change.map(rescale),
            hover: self.hover.map(rescale),
        }
    }
}

/// Construction options. Action references are by name; the registry stays
/// with the host.
#[derive(Debug, Clone, Default)]
pub struct ButtonConfig {
    pub action: Option<String>,
    /// Bound to the secondary pointer button; presses never toggle the
    /// visual state.
    pub secondary_action: Option<String>,
    /// Whether the primary action is checkable, captured at bind time.
    /// Non-checkable actions get momentary visuals (release toggles back).
    pub action_checkable: bool,
    /// Suppress the background plate even when one is assigned.
    pub no_background: bool,
    pub tristate: bool,
    /// Emit toggled/triggered on release instead of press.
    pub trigger_on_release: bool,
}

struct ScaledComposite {
    ratio: f32,
    handle: Handle,
}

/// A toggleable/tristate pixmap button.
pub struct IconButton {
    pixmaps: ButtonPixmaps,
    background: Vec<Arc<Pixmap>>,
    background_role: Option<BackgroundRole>,
    config: ButtonConfig,
    checked: ButtonState,
    opacity: f32,
    hover: HoverAnimation,
    hovered: bool,
    focus_on_sky: bool,
    backgrounds_enabled: bool,
    visible: bool,
    pos: Point,
    composite: Pixmap,
    scaled: Option<ScaledComposite>,
}

impl IconButton {
    /// Builds a button, pre-scaling its pixmaps to `pixmap_scale`.
    ///
    /// A tristate configuration without a no-change pixmap is a programming
    /// error.
    pub fn new(pixmaps: ButtonPixmaps, config: ButtonConfig, pixmap_scale: f32) -> Self {
        debug_assert!(
            !config.tristate || pixmaps.no_change.is_some(),
            "tristate button requires a no-change pixmap"
        );

        let pixmaps = pixmaps.rescaled_to(pixmap_scale);
        let composite = Pixmap::new(pixmaps.on.width(), pixmaps.on.height(), pixmap_scale)
            .unwrap_or_else(|| pixmaps.on.clone());

        let mut button = Self {
            pixmaps,
            background: Vec::new(),
            background_role: None,
            config,
            checked: ButtonState::Off,
            opacity: 1.0,
            hover: HoverAnimation::new(),
            hovered: false,
            focus_on_sky: false,
            backgrounds_enabled: true,
            visible: true,
            pos: Point::ORIGIN,
            composite,
            scaled: None,
        };
        button.render_composite();
        button
    }

    pub fn action(&self) -> Option<&str> {
        self.config.action.as_deref()
    }

    pub fn secondary_action(&self) -> Option<&str> {
        self.config.secondary_action.as_deref()
    }

    pub fn checked(&self) -> ButtonState {
        self.checked
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub fn set_focus_on_sky(&mut self, focus: bool) {
        self.focus_on_sky = focus;
    }

    pub fn background_role(&self) -> Option<BackgroundRole> {
        self.background_role
    }

    /// Logical size of the button (the `on` pixmap dictates it).
    pub fn size(&self) -> Size {
        self.pixmaps.on.logical_size()
    }

    /// Bounds in the owning container's coordinates.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.pos, self.size())
    }

    pub fn contains(&self, point: Point) -> bool {
        self.visible && self.bounds().contains(point)
    }

    /// Replaces the background with an ordered stack of shared pixmaps,
    /// composited bottom-up.
    pub fn set_background_layers(
        &mut self,
        layers: Vec<Arc<Pixmap>>,
        role: Option<BackgroundRole>,
    ) {
        self.background = layers;
        self.background_role = role;
        self.render_composite();
    }

    pub fn set_backgrounds_enabled(&mut self, enabled: bool) {
        if self.backgrounds_enabled != enabled {
            self.backgrounds_enabled = enabled;
            self.render_composite();
        }
    }

    pub fn set_checked(&mut self, state: ButtonState) {
        self.checked = state;
        self.render_composite();
    }

    /// External action-state notification; maps a bool onto Off/On.
    pub fn set_checked_bool(&mut self, on: bool) {
        self.set_checked(ButtonState::from_bool(on));
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.render_composite();
    }

    /// Handles a pointer press in this button. Returns the notifications to
    /// forward.
    pub fn press(&mut self, pointer: PointerButton) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        match pointer {
            PointerButton::Primary => {
                self.checked = self.checked.toggled(self.config.tristate);
                self.render_composite();
                if !self.config.trigger_on_release {
                    events.push(ButtonEvent::Toggled(self.checked));
                    events.push(ButtonEvent::Triggered);
                }
            }
            PointerButton::Secondary => {
                if self.config.secondary_action.is_some() && !self.config.trigger_on_release {
                    events.push(ButtonEvent::TriggeredSecondary);
                }
            }
        }
        events
    }

    /// Handles a pointer release in this button.
    pub fn release(&mut self, pointer: PointerButton) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        match pointer {
            PointerButton::Primary => {
                // Momentary visual for non-checkable actions: the press
                // toggled the pixmap on, the release toggles it back.
                if self.config.action.is_some() && !self.config.action_checkable {
                    self.checked = self.checked.toggled(self.config.tristate);
                    self.render_composite();
                }
                if self.focus_on_sky {
                    events.push(ButtonEvent::FocusSky);
                }
                if self.config.trigger_on_release {
                    events.push(ButtonEvent::Toggled(self.checked));
                    events.push(ButtonEvent::Triggered);
                }
            }
            PointerButton::Secondary => {
                if self.config.secondary_action.is_some() && self.config.trigger_on_release {
                    events.push(ButtonEvent::TriggeredSecondary);
                }
            }
        }
        events
    }

    pub fn hover_enter(&mut self) -> ButtonEvent {
        self.hovered = true;
        self.hover.forward();
        ButtonEvent::HoverChanged(true)
    }

    pub fn hover_leave(&mut self) -> ButtonEvent {
        self.hovered = false;
        self.hover.backward();
        ButtonEvent::HoverChanged(false)
    }

    pub fn is_animating(&self) -> bool {
        self.hover.is_running()
    }

    /// Advances the hover fade; recomposites when the overlay opacity
    /// moved. Returns true when a redraw is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.hover.tick(dt) {
            self.render_composite();
            true
        } else {
            false
        }
    }

    /// Resets the hover fade to fully faded out, recompositing. The bottom
    /// bar calls this when it relayouts.
    pub fn reset_hover(&mut self) {
        self.hover = HoverAnimation::new();
        self.render_composite();
    }

    /// Recomputes the composite pixmap from current fields. Pure given the
    /// fields; invalidates the density-scaled cache.
    fn render_composite(&mut self) {
        if self.opacity < 0.0 {
            self.opacity = 0.0;
        }
        self.composite.clear();

        if !self.config.no_background && self.backgrounds_enabled {
            for layer in &self.background {
                self.composite.draw_layer(layer, self.opacity);
            }
        }

        let state_pixmap = match (self.config.tristate, self.checked) {
            (true, ButtonState::NoChange) => {
                self.pixmaps.no_change.as_ref().unwrap_or(&self.pixmaps.off)
            }
            (_, ButtonState::On) => &self.pixmaps.on,
            _ => &self.pixmaps.off,
        };
        self.composite.draw_layer(state_pixmap, self.opacity);

        let hover_value = self.hover.value();
        if hover_value > 0.0 {
            if let Some(hover_pixmap) = &self.pixmaps.hover {
                self.composite
                    .draw_layer(hover_pixmap, hover_value * self.opacity);
            }
        }

        self.scaled = None;
    }

    /// Ensures a composite scaled to the display's device-pixel ratio is
    /// cached. Returns true when a rescale actually ran.
    pub fn prepare(&mut self, ratio: f32) -> bool {
        if let Some(scaled) = &self.scaled {
            if (scaled.ratio - ratio).abs() < f32::EPSILON {
                return false;
            }
        }
        let pixmap = if (ratio - self.composite.scale()).abs() < f32::EPSILON {
            self.composite.clone()
        } else {
            self.composite.rescaled(ratio)
        };
        self.scaled = Some(ScaledComposite {
            ratio,
            handle: pixmap.to_handle(),
        });
        true
    }

    /// The cached density-scaled image handle, if [`Self::prepare`] ran
    /// since the last recomposite.
    pub fn handle(&self) -> Option<&Handle> {
        self.scaled.as_ref().map(|s| &s.handle)
    }

    /// Current composite, for inspection.
    pub fn composite(&self) -> &Pixmap {
        &self.composite
    }
}

impl std::fmt::Debug for IconButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconButton")
            .field("action", &self.config.action)
            .field("checked", &self.checked)
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Color;

    fn pixmap(color: Color) -> Pixmap {
        Pixmap::solid(8, 8, color, 1.0).unwrap()
    }

    fn binary_button(config: ButtonConfig) -> IconButton {
        IconButton::new(
            ButtonPixmaps::binary(
                pixmap(Color::from_rgb(0.0, 1.0, 0.0)),
                pixmap(Color::from_rgb(0.3, 0.3, 0.3)),
                Some(pixmap(Color::WHITE)),
            ),
            config,
            1.0,
        )
    }

    fn tristate_button() -> IconButton {
        IconButton::new(
            ButtonPixmaps {
                on: pixmap(Color::from_rgb(0.0, 1.0, 0.0)),
                off: pixmap(Color::from_rgb(0.3, 0.3, 0.3)),
                no_change: Some(pixmap(Color::from_rgb(1.0, 1.0, 0.0))),
                hover: None,
            },
            ButtonConfig {
                tristate: true,
                ..ButtonConfig::default()
            },
            1.0,
        )
    }

    #[test]
    fn binary_toggle_has_period_two() {
        let mut state = ButtonState::Off;
        let states: Vec<_> = (0..4)
            .map(|_| {
                state = state.toggled(false);
                state
            })
            .collect();
        assert_eq!(
            states,
            vec![
                ButtonState::On,
                ButtonState::Off,
                ButtonState::On,
                ButtonState::Off
            ]
        );
    }

    #[test]
    fn tristate_toggle_has_period_three() {
        let mut state = ButtonState::Off;
        let states: Vec<_> = (0..6)
            .map(|_| {
                state = state.toggled(true);
                state
            })
            .collect();
        assert_eq!(
            states,
            vec![
                ButtonState::On,
                ButtonState::NoChange,
                ButtonState::Off,
                ButtonState::On,
                ButtonState::NoChange,
                ButtonState::Off
            ]
        );
    }

    #[test]
    #[should_panic(expected = "tristate button requires a no-change pixmap")]
    fn tristate_without_no_change_pixmap_is_rejected() {
        let _ = IconButton::new(
            ButtonPixmaps::binary(pixmap(Color::WHITE), pixmap(Color::BLACK), None),
            ButtonConfig {
                tristate: true,
                ..ButtonConfig::default()
            },
            1.0,
        );
    }

    #[test]
    fn primary_press_toggles_and_emits() {
        let mut button = binary_button(ButtonConfig {
            action: Some("actionTest".into()),
            action_checkable: true,
            ..ButtonConfig::default()
        });
        let events = button.press(PointerButton::Primary);
        assert_eq!(button.checked(), ButtonState::On);
        assert_eq!(
            events,
            vec![
                ButtonEvent::Toggled(ButtonState::On),
                ButtonEvent::Triggered
            ]
        );
    }

    #[test]
    fn secondary_press_without_binding_is_ignored() {
        let mut button = binary_button(ButtonConfig::default());
        let events = button.press(PointerButton::Secondary);
        assert!(events.is_empty());
        assert_eq!(button.checked(), ButtonState::Off);
    }

    #[test]
    fn secondary_press_never_toggles_visual_state() {
        let mut button = binary_button(ButtonConfig {
            secondary_action: Some("actionOther".into()),
            ..ButtonConfig::default()
        });
        let events = button.press(PointerButton::Secondary);
        assert_eq!(events, vec![ButtonEvent::TriggeredSecondary]);
        assert_eq!(button.checked(), ButtonState::Off);
    }

    #[test]
    fn trigger_on_release_defers_notifications() {
        let mut button = binary_button(ButtonConfig {
            action: Some("actionTest".into()),
            action_checkable: true,
            trigger_on_release: true,
            ..ButtonConfig::default()
        });
        assert!(button.press(PointerButton::Primary).is_empty());
        let events = button.release(PointerButton::Primary);
        assert!(events.contains(&ButtonEvent::Triggered));
        assert!(events.contains(&ButtonEvent::Toggled(ButtonState::On)));
    }

    #[test]
    fn non_checkable_action_gets_momentary_visual() {
        let mut button = binary_button(ButtonConfig {
            action: Some("actionShot".into()),
            action_checkable: false,
            ..ButtonConfig::default()
        });
        button.press(PointerButton::Primary);
        assert_eq!(button.checked(), ButtonState::On);
        button.release(PointerButton::Primary);
        assert_eq!(button.checked(), ButtonState::Off);
    }

    #[test]
    fn focus_changing_button_requests_sky_focus_on_release() {
        let mut button = binary_button(ButtonConfig {
            action: Some("actionTest".into()),
            action_checkable: true,
            ..ButtonConfig::default()
        });
        button.set_focus_on_sky(true);
        button.press(PointerButton::Primary);
        let events = button.release(PointerButton::Primary);
        assert!(events.contains(&ButtonEvent::FocusSky));
    }

    #[test]
    fn hover_overlay_scales_with_opacity() {
        let mut button = binary_button(ButtonConfig {
            no_background: true,
            ..ButtonConfig::default()
        });
        button.set_opacity(0.5);
        button.hover_enter();
        // Run the fade to completion.
        for _ in 0..12 {
            button.tick(Duration::from_millis(25));
        }
        // Off pixmap (0.3 gray) at 0.5 plus white overlay at 0.5: alpha
        // accumulates past a single layer's contribution.
        let (_, _, _, alpha) = button.composite().pixel(2, 2).unwrap();
        assert!(alpha > 128, "composited alpha was {alpha}");
    }

    #[test]
    fn background_skipped_when_suppressed() {
        let mut button = binary_button(ButtonConfig {
            no_background: true,
            ..ButtonConfig::default()
        });
        let plate = Arc::new(pixmap(Color::from_rgb(1.0, 0.0, 0.0)));
        button.set_background_layers(vec![plate], Some(BackgroundRole::Single));
        let (r, _, _, _) = button.composite().pixel(2, 2).unwrap();
        // Off pixmap is gray; a red background would push the red channel up.
        assert!(r < 128, "red channel was {r}");
    }

    #[test]
    fn background_skipped_when_globally_disabled() {
        let mut button = binary_button(ButtonConfig::default());
        button.set_backgrounds_enabled(false);
        let plate = Arc::new(pixmap(Color::from_rgb(1.0, 0.0, 0.0)));
        button.set_background_layers(vec![plate], Some(BackgroundRole::Single));
        let (r, _, _, _) = button.composite().pixel(2, 2).unwrap();
        assert!(r < 128, "red channel was {r}");
    }

    #[test]
    fn negative_opacity_clamps_to_zero() {
        let mut button = binary_button(ButtonConfig::default());
        button.set_opacity(-0.5);
        assert_eq!(button.opacity(), 0.0);
    }

    #[test]
    fn density_cache_survives_same_ratio_and_invalidates_on_change() {
        let mut button = binary_button(ButtonConfig::default());
        assert!(button.prepare(2.0));
        assert!(!button.prepare(2.0));
        assert!(button.prepare(1.5));
        // A recomposite invalidates the cache.
        button.set_checked(ButtonState::On);
        assert!(button.handle().is_none());
        assert!(button.prepare(1.5));
    }

    #[test]
    fn pixmaps_prescaled_once_at_construction() {
        let button = IconButton::new(
            ButtonPixmaps::binary(pixmap(Color::WHITE), pixmap(Color::BLACK), None),
            ButtonConfig::default(),
            2.0,
        );
        // Authored at 8px/scale 1; normalized to scale 2 doubles the raster
        // but keeps the logical size.
        assert_eq!(button.composite().scale(), 2.0);
        assert_eq!(button.size(), Size::new(8.0, 8.0));
    }
}
