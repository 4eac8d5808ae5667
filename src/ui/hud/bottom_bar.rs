// SPDX-License-Identifier: MPL-2.0
//! Horizontal, grouped button bar with live status text.
//!
//! Buttons live in named groups laid out left to right in name order; each
//! slot gets a position-dependent background plate. Four status fields
//! (date/time, location, field of view, frame rate) recompute every frame
//! but only trigger a position pass when a string actually changed.

use crate::action::ActionRegistry;
use crate::config::{AtmosphereSection, DisplaySection};
use crate::core::{CoreSnapshot, Localizer};
use crate::ui::design_tokens::{layout, palette};
use crate::ui::hud::button::{BackgroundRole, IconButton};
use crate::ui::hud::status::{self, StatusStrings};
use crate::ui::hud::{bounding_rect, hover_tip, HelpLabel, TextMetrics};
use crate::ui::pixmap::Pixmap;
use iced::{Color, Point, Rectangle, Size};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Background plates for the four slot positions of a group.
#[derive(Debug, Clone)]
pub struct GroupBackgrounds {
    pub left: Arc<Pixmap>,
    pub right: Arc<Pixmap>,
    pub middle: Arc<Pixmap>,
    pub single: Arc<Pixmap>,
}

#[derive(Debug)]
struct ButtonGroup {
    buttons: Vec<IconButton>,
    left_margin: f32,
    right_margin: f32,
    /// Per-group override of the bar's default plates.
    backgrounds: Option<GroupBackgrounds>,
}

impl ButtonGroup {
    fn new() -> Self {
        Self {
            buttons: Vec::new(),
            left_margin: 0.0,
            right_margin: 0.0,
            backgrounds: None,
        }
    }
}

/// One positioned status field.
#[derive(Debug, Clone)]
pub struct TextField {
    pub text: String,
    pub tooltip: String,
    pub pos: Point,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            text: String::new(),
            tooltip: String::new(),
            pos: Point::ORIGIN,
        }
    }
}

pub struct BottomBar {
    groups: BTreeMap<String, ButtonGroup>,
    default_backgrounds: GroupBackgrounds,
    datetime: TextField,
    location: TextField,
    fov: TextField,
    fps: TextField,
    help_label: HelpLabel,
    flags: DisplaySection,
    atmosphere: AtmosphereSection,
    font_size: f32,
    text_color: Color,
    pos: Point,
    size_changed: bool,
}

impl BottomBar {
    pub fn new(
        default_backgrounds: GroupBackgrounds,
        flags: DisplaySection,
        atmosphere: AtmosphereSection,
        app_font_size: f32,
    ) -> Self {
        Self {
            groups: BTreeMap::new(),
            default_backgrounds,
            datetime: TextField::default(),
            location: TextField::default(),
            fov: TextField::default(),
            fps: TextField::default(),
            help_label: HelpLabel::new(),
            flags,
            atmosphere,
            // Status text runs one pixel under the app font.
            font_size: app_font_size - 1.0,
            text_color: palette::TEXT,
            pos: Point::ORIGIN,
            size_changed: false,
        }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub fn flags(&self) -> &DisplaySection {
        &self.flags
    }

    pub fn set_flags(&mut self, flags: DisplaySection) {
        self.flags = flags;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Tracks the host's base font size; status text stays one pixel under.
    pub fn set_font_size(&mut self, app_font_size: f32) {
        self.font_size = app_font_size - 1.0;
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Recolors every text field and the help label.
    pub fn set_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// True once after any structural change (insertion/removal).
    pub fn take_size_changed(&mut self) -> bool {
        std::mem::take(&mut self.size_changed)
    }

    /// Adds a button to a group, inserting before the named action when it
    /// is present, else appending. The group is created on first use.
    pub fn add_button(
        &mut self,
        mut button: IconButton,
        group_name: &str,
        before_action: Option<&str>,
        metrics: &dyn TextMetrics,
    ) {
        button.set_visible(true);
        button.set_focus_on_sky(true);

        let group = self
            .groups
            .entry(group_name.to_string())
            .or_insert_with(ButtonGroup::new);

        let insert_at = before_action.and_then(|name| {
            group
                .buttons
                .iter()
                .position(|b| b.action() == Some(name))
        });
        match insert_at {
            Some(index) => group.buttons.insert(index, button),
            None => group.buttons.push(button),
        }

        self.update_button_groups(metrics);
        self.size_changed = true;
    }

    /// Detaches the button bound to `action_name` and returns it to the
    /// caller; its group is dropped when emptied. `None` when no button
    /// matches.
    pub fn hide_button(
        &mut self,
        action_name: &str,
        metrics: &dyn TextMetrics,
    ) -> Option<IconButton> {
        let mut found: Option<(String, usize)> = None;
        for (name, group) in &self.groups {
            if let Some(index) = group
                .buttons
                .iter()
                .position(|b| b.action() == Some(action_name))
            {
                found = Some((name.clone(), index));
                break;
            }
        }
        let (group_name, index) = found?;

        let group = self.groups.get_mut(&group_name)?;
        let mut button = group.buttons.remove(index);
        if group.buttons.is_empty() {
            self.groups.remove(&group_name);
        }

        // Other parts of the UI may still hold on to this button, so it is
        // hidden and handed back rather than destroyed.
        button.set_visible(false);

        self.update_button_groups(metrics);
        self.size_changed = true;
        Some(button)
    }

    /// Sets the pixel margins at both ends of a group. Unknown groups are a
    /// silent no-op.
    pub fn set_group_margin(
        &mut self,
        group_name: &str,
        left: f32,
        right: f32,
        metrics: &dyn TextMetrics,
    ) {
        let Some(group) = self.groups.get_mut(group_name) else {
            return;
        };
        group.left_margin = left;
        group.right_margin = right;
        self.update_button_groups(metrics);
    }

    /// Overrides a group's background plates. Unknown groups are a silent
    /// no-op.
    pub fn set_group_background(
        &mut self,
        group_name: &str,
        backgrounds: GroupBackgrounds,
        metrics: &dyn TextMetrics,
    ) {
        let Some(group) = self.groups.get_mut(group_name) else {
            return;
        };
        group.backgrounds = Some(backgrounds);
        self.update_button_groups(metrics);
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    pub fn group_len(&self, group_name: &str) -> Option<usize> {
        self.groups.get(group_name).map(|g| g.buttons.len())
    }

    /// All buttons in layout order.
    pub fn buttons(&self) -> impl Iterator<Item = &IconButton> {
        self.groups.values().flat_map(|g| g.buttons.iter())
    }

    pub fn buttons_mut(&mut self) -> impl Iterator<Item = &mut IconButton> {
        self.groups.values_mut().flat_map(|g| g.buttons.iter_mut())
    }

    /// Flat index (layout order) of the button under `point`, bar-local.
    pub fn button_at(&self, point: Point) -> Option<usize> {
        self.buttons().position(|b| b.contains(point))
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut IconButton> {
        self.buttons_mut().nth(index)
    }

    /// Lays out every group against a running x-cursor and reassigns the
    /// position-dependent background plates.
    pub fn update_button_groups(&mut self, metrics: &dyn TextMetrics) {
        let mut x = 0.0;
        let y = metrics.line_height(self.font_size) + layout::BUTTON_ROW_GAP;

        for group in self.groups.values_mut() {
            if group.buttons.is_empty() {
                continue;
            }
            x += group.left_margin;
            let backgrounds = group
                .backgrounds
                .as_ref()
                .unwrap_or(&self.default_backgrounds);
            let count = group.buttons.len();

            for (n, button) in group.buttons.iter_mut().enumerate() {
                let (layers, role) = if count == 1 {
                    (vec![backgrounds.single.clone()], BackgroundRole::Single)
                } else if n == 0 {
                    (vec![backgrounds.left.clone()], BackgroundRole::Left)
                } else if n == count - 1 {
                    // Legacy double-paint: the Single end-cap layered under
                    // the Right plate. Kept to preserve the rendered look.
                    (
                        vec![backgrounds.single.clone(), backgrounds.right.clone()],
                        BackgroundRole::RightCapped,
                    )
                } else {
                    (vec![backgrounds.middle.clone()], BackgroundRole::Middle)
                };

                button.reset_hover();
                button.set_background_layers(layers, Some(role));
                button.set_pos(Point::new(x, y));
                x += button.size().width;
            }
            x += group.right_margin;
        }
    }

    /// Bounding box of the buttons alone, origin-anchored with the
    /// one-pixel inset.
    pub fn buttons_bounding_rect(&self) -> Rectangle {
        let rect = bounding_rect(
            self.buttons()
                .filter(|b| b.visible())
                .map(|b| b.bounds()),
        );
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

    /// Children bounding box excluding the help label: buttons plus the
    /// four status fields.
    pub fn bounding_rect_no_help_label(&self, metrics: &dyn TextMetrics) -> Rectangle {
        let line = metrics.line_height(self.font_size);
        let text_rect = |field: &TextField| {
            Rectangle::new(
                field.pos,
                Size::new(metrics.text_width(&field.text, self.font_size), line),
            )
        };
        bounding_rect(
            self.buttons()
                .filter(|b| b.visible())
                .map(|b| b.bounds())
                .chain(
                    [&self.datetime, &self.location, &self.fov, &self.fps]
                        .into_iter()
                        .filter(|f| !f.text.is_empty())
                        .map(text_rect),
                ),
        )
    }

    /// Recomputes the status strings and, when anything changed (or
    /// `force_pos` after a structural relayout), repositions the fields.
    /// Returns true when the bar needs a redraw.
    pub fn update_text(
        &mut self,
        core: &CoreSnapshot,
        localizer: &dyn Localizer,
        metrics: &dyn TextMetrics,
        force_pos: bool,
    ) -> bool {
        let status: StatusStrings =
            status::compose(core, localizer, &self.flags, &self.atmosphere);

        let mut update_pos = force_pos;
        if self.datetime.text != status.datetime {
            update_pos = true;
            self.datetime.text = status.datetime;
        }
        self.datetime.tooltip = status.datetime_tooltip;

        if self.location.text != status.location {
            update_pos = true;
            self.location.text = status.location;
        }
        self.location.tooltip = status.location_tooltip;

        if self.fov.text != status.fov {
            update_pos = true;
            self.fov.text = status.fov;
        }
        self.fov.tooltip = status.fov_tooltip;

        if self.fps.text != status.fps {
            update_pos = true;
            self.fps.text = status.fps;
        }
        self.fps.tooltip = status.fps_tooltip;

        if update_pos {
            self.update_text_positions(localizer, metrics);
        }
        update_pos
    }

    /// Right-aligns the datetime block against the buttons bounding box and
    /// places FOV/FPS left of it by width-dependent shifts.
    fn update_text_positions(&mut self, localizer: &dyn Localizer, metrics: &dyn TextMetrics) {
        let fps_label = format!(" {}", localizer.tr("FPS"));
        let fps_shift = metrics.text_width(&fps_label, self.font_size) + layout::FPS_SHIFT_BASE;

        let fov_label = format!("{} ", localizer.tr("FOV"));
        let mut fov_shift =
            fps_shift + metrics.text_width(&fov_label, self.font_size) + layout::FOV_SHIFT_BASE;
        if self.flags.fov_dms {
            fov_shift += layout::FOV_SHIFT_DMS;
        }

        let rect = self.buttons_bounding_rect();
        self.location.pos = Point::ORIGIN;

        let datetime_width = metrics.text_width(&self.datetime.text, self.font_size);
        let mut dtp =
            (rect.x + rect.width - datetime_width) as i32 - layout::DATETIME_RIGHT_INSET as i32;
        if dtp % 2 == 1 {
            // Keep the field on an even pixel.
            dtp -= 1;
        }
        self.datetime.pos = Point::new(dtp as f32, 0.0);
        self.fov.pos = Point::new(dtp as f32 - fov_shift, 0.0);
        self.fps.pos = Point::new(dtp as f32 - fps_shift, 0.0);
    }

    pub fn datetime(&self) -> &TextField {
        &self.datetime
    }

    pub fn location(&self) -> &TextField {
        &self.location
    }

    pub fn fov(&self) -> &TextField {
        &self.fov
    }

    pub fn fps(&self) -> &TextField {
        &self.fps
    }

    /// Updates the shared help label after a button's hover state changed.
    /// The bottom-bar label is pinned at a fixed offset above the bar.
    pub fn button_hover_changed(
        &mut self,
        index: usize,
        hovered: bool,
        actions: &ActionRegistry,
        localizer: &dyn Localizer,
    ) {
        if hovered {
            let Some(action) = self
                .buttons()
                .nth(index)
                .and_then(|b| b.action())
                .and_then(|name| actions.get(name))
            else {
                return;
            };
            self.help_label.text = hover_tip(action, localizer);
            self.help_label.pos = Point::new(layout::BOTTOM_LABEL_X, layout::BOTTOM_LABEL_Y);
        } else {
            self.help_label.clear();
        }
    }

    pub fn help_label(&self) -> &HelpLabel {
        &self.help_label
    }
}
