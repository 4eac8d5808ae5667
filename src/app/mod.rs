// SPDX-License-Identifier: MPL-2.0
//! Demo application shell: wires a full HUD (both bars, grouped buttons,
//! a corner overlay) to a small simulated astronomy core.
//!
//! The shell owns the policy glue: which actions exist, which icons they
//! get, how the simulated clock reacts to the time-control buttons, and
//! where the bars sit in the window. The widget layer itself stays in
//! `ui::hud` and never reaches out to globals.

mod subscription;

use crate::action::{Action, ActionRegistry};
use crate::config::{self, Config};
use crate::core::{CoreSnapshot, DefaultLocalizer, FpsCounter, JD_SECOND};
use crate::error::Result;
use crate::ui::design_tokens::{palette, sizing};
use crate::ui::hud::bottom_bar::{BottomBar, GroupBackgrounds};
use crate::ui::hud::button::{ButtonConfig, IconButton};
use crate::ui::hud::corner::CornerOverlay;
use crate::ui::hud::scene::{HudCanvas, HudEvent, HudScene};
use crate::ui::hud::sidebar::SideBar;
use crate::ui::hud::ApproxMetrics;
use crate::ui::icons;
use crate::ui::pixmap::Pixmap;
use iced::widget::{canvas, container, Canvas};
use iced::{window, Color, Element, Length, Point, Size, Subscription, Task};
use std::sync::Arc;
use std::time::Instant;

/// Launch options parsed in `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the configured pixmap scale.
    pub scale: Option<f32>,
    /// Initial field of view, degrees.
    pub fov: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Hud(HudEvent),
    Tick(Instant),
    WindowResized(Size),
}

impl From<HudEvent> for Message {
    fn from(event: HudEvent) -> Self {
        Message::Hud(event)
    }
}

pub struct App {
    scene: HudScene,
    actions: ActionRegistry,
    localizer: DefaultLocalizer,
    metrics: ApproxMetrics,
    config: Config,
    core: CoreSnapshot,
    fps: FpsCounter,
    cache: canvas::Cache,
    last_tick: Option<Instant>,
    window_size: Size,
    /// Device-pixel ratio the composites are prepared for. The windowing
    /// backend reports the real value on platforms that scale.
    device_ratio: f32,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 768;

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window::Settings {
            size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut config = config::load().unwrap_or_default();
        if let Some(scale) = flags.scale {
            config.gui.pixmap_scale = scale;
        }

        let mut core = CoreSnapshot::default();
        if let Some(fov) = flags.fov {
            core.fov = fov;
        }

        let mut actions = ActionRegistry::new();
        register_actions(&mut actions);

        let scene = match build_scene(&config) {
            Ok(scene) => scene,
            Err(err) => {
                // Icon rasterization only fails on malformed embedded SVG;
                // fall back to an empty HUD rather than abort the host.
                eprintln!("failed to build HUD scene: {err}");
                HudScene::new(
                    SideBar::new(),
                    BottomBar::new(
                        fallback_plates(),
                        config.display,
                        config.atmosphere,
                        config.gui.font_size,
                    ),
                )
            }
        };

        let mut app = App {
            scene,
            actions,
            localizer: DefaultLocalizer,
            metrics: ApproxMetrics,
            config,
            core,
            fps: FpsCounter::new(),
            cache: canvas::Cache::default(),
            last_tick: None,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            device_ratio: 1.0,
        };
        app.scene.set_backgrounds_enabled(app.config.gui.use_button_background);
        app.update_bars_pos();
        app.scene.sync(&app.core, &app.localizer, &app.metrics);
        app.scene.prepare(app.device_ratio);

        (app, Task::none())
    }

    fn title(&self) -> String {
        "IcedSkybar".to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Hud(event) => self.on_hud_event(event),
            Message::Tick(now) => self.on_tick(now),
            Message::WindowResized(size) => {
                self.window_size = size;
                self.update_bars_pos();
                self.cache.clear();
                Task::none()
            }
        };
        if self.scene.take_redraw_request() {
            self.cache.clear();
        }
        task
    }

    fn on_hud_event(&mut self, event: HudEvent) -> Task<Message> {
        match event {
            HudEvent::Moved(point) => {
                self.scene
                    .pointer_moved(point, &self.actions, &self.localizer)
            }
            HudEvent::Left => self.scene.pointer_left(&self.actions, &self.localizer),
            HudEvent::Pressed(point, button) => {
                self.scene.pointer_pressed(point, button, &mut self.actions)
            }
            HudEvent::Released(point, button) => {
                self.scene
                    .pointer_released(point, button, &mut self.actions)
            }
        }
        // The demo has no separate sky widget to focus; the request is
        // consumed so it does not linger.
        let _ = self.scene.take_focus_sky_request();
        self.apply_triggers()
    }

    fn on_tick(&mut self, now: Instant) -> Task<Message> {
        let dt = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        self.core.jd += self.core.time_rate * dt.as_secs_f64();
        self.fps.record_frame(Some(now));
        if let Some(fps) = self.fps.fps() {
            self.core.fps = fps;
        }

        self.scene.tick(dt);
        if self.scene.sync(&self.core, &self.localizer, &self.metrics) {
            self.update_bars_pos();
        }
        self.scene.prepare(self.device_ratio);
        Task::none()
    }

    /// Applies side effects of triggered actions to the simulated core.
    fn apply_triggers(&mut self) -> Task<Message> {
        for name in self.actions.take_triggered() {
            match name.as_str() {
                "actionTimeRewind" => {
                    let magnitude = (self.core.time_rate.abs() * 10.0).max(JD_SECOND);
                    self.core.time_rate = -magnitude;
                }
                "actionTimeForward" => {
                    let magnitude = (self.core.time_rate.abs() * 10.0).max(JD_SECOND);
                    self.core.time_rate = magnitude;
                }
                "actionTimeNow" => {
                    self.core.time_rate = JD_SECOND;
                    self.core.jd = current_jd();
                }
                "actionQuit" => return iced::exit(),
                _ => {}
            }
        }
        Task::none()
    }

    /// Anchors the bottom bar to the lower edge and stacks the side bar
    /// above its left end.
    fn update_bars_pos(&mut self) {
        let bottom_rect = self
            .scene
            .bottom_bar()
            .bounding_rect_no_help_label(&self.metrics);
        let bottom_y = (self.window_size.height - bottom_rect.height - 2.0).max(0.0);
        self.scene.bottom_bar_mut().set_pos(Point::new(0.0, bottom_y));

        let side_rect = self.scene.side_bar().bounding_rect_no_help_label();
        let side_y = (bottom_y - side_rect.height - side_rect.y - 20.0).max(0.0);
        self.scene.side_bar_mut().set_pos(Point::new(0.0, side_y));

        if let Some(corner) = self.scene.corner_mut(0) {
            corner.set_pos(Point::new(self.window_size.width - 50.0, 10.0));
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let hud = Canvas::new(HudCanvas {
            scene: &self.scene,
            cache: &self.cache,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        container(hud)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::from_rgb(0.02, 0.03, 0.07).into()),
                ..container::Style::default()
            })
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(self.scene.has_running_animation()),
            subscription::create_event_subscription(),
        ])
    }
}

fn register_actions(actions: &mut ActionRegistry) {
    actions.add(Action::new("actionConstellationLines", "Constellation lines").checkable(false).with_shortcut("C"));
    actions.add(Action::new("actionEquatorialGrid", "Equatorial grid").checkable(false).with_shortcut("E"));
    actions.add(Action::new("actionGround", "Ground").checkable(true).with_shortcut("G"));
    actions.add(Action::new("actionAtmosphere", "Atmosphere").checkable(true).with_shortcut("A"));
    actions.add(Action::new("actionNightMode", "Night mode").checkable(false));
    actions.add(Action::new("actionFullscreen", "Full-screen mode").checkable(false).with_shortcut("F11"));
    actions.add(Action::new("actionTimeRewind", "Decrease time speed").with_shortcut("J"));
    actions.add(Action::new("actionTimeNow", "Set time to now").with_shortcut("8"));
    actions.add(Action::new("actionTimeForward", "Increase time speed").with_shortcut("L"));
    actions.add(Action::new("actionQuit", "Quit").with_shortcut("Ctrl+Q"));
}

/// Builds the demo HUD: five side-bar toggles, time controls and quit in
/// the bottom bar, and a full-screen button in a corner overlay.
fn build_scene(config: &Config) -> Result<HudScene> {
    let scale = config.gui.pixmap_scale;
    let metrics = ApproxMetrics;

    let checkable = |action: &str, pixmaps| {
        IconButton::new(
            pixmaps,
            ButtonConfig {
                action: Some(action.to_string()),
                action_checkable: true,
                ..ButtonConfig::default()
            },
            scale,
        )
    };
    let momentary = |action: &str, pixmaps| {
        IconButton::new(
            pixmaps,
            ButtonConfig {
                action: Some(action.to_string()),
                action_checkable: false,
                ..ButtonConfig::default()
            },
            scale,
        )
    };

    let mut side_bar = SideBar::new();
    side_bar.add_button(checkable("actionConstellationLines", icons::star_lines(scale)?));
    side_bar.add_button(checkable("actionEquatorialGrid", icons::grid(scale)?));
    side_bar.add_button(checkable("actionGround", icons::mountain(scale)?));
    side_bar.add_button(checkable("actionAtmosphere", icons::cloud(scale)?));
    side_bar.add_button(checkable("actionNightMode", icons::moon(scale)?));

    let mut bottom_bar = BottomBar::new(
        icons::group_backgrounds(scale)?,
        config.display,
        config.atmosphere,
        config.gui.font_size,
    );
    bottom_bar.add_button(
        momentary("actionTimeRewind", icons::triangle_left_bar(scale)?),
        "020-time",
        None,
        &metrics,
    );
    bottom_bar.add_button(
        momentary("actionTimeNow", icons::clock(scale)?),
        "020-time",
        None,
        &metrics,
    );
    bottom_bar.add_button(
        momentary("actionTimeForward", icons::triangle_right_bar(scale)?),
        "020-time",
        None,
        &metrics,
    );
    bottom_bar.add_button(
        checkable("actionFullscreen", icons::arrows_out(scale)?),
        "010-view",
        None,
        &metrics,
    );
    bottom_bar.add_button(
        momentary("actionQuit", icons::door_arrow(scale)?),
        "030-quit",
        None,
        &metrics,
    );
    bottom_bar.set_group_margin("020-time", 10.0, 10.0, &metrics);

    let mut scene = HudScene::new(side_bar, bottom_bar);

    let mut corner = CornerOverlay::new();
    let corner_button = checkable("actionFullscreen", icons::arrows_out(scale)?);
    corner.add_button(corner_button);
    corner.set_opacity(0.6);
    scene.add_corner(corner);

    Ok(scene)
}

/// Plain plates used when the embedded icon set fails to rasterize.
fn fallback_plates() -> GroupBackgrounds {
    let edge = sizing::BUTTON_ICON as u32;
    let plate = Arc::new(
        Pixmap::solid(edge, edge, palette::BUTTON_PLATE, 1.0)
            .expect("plate dimensions are non-zero"),
    );
    GroupBackgrounds {
        left: plate.clone(),
        right: plate.clone(),
        middle: plate.clone(),
        single: plate,
    }
}

/// Current wall-clock time as a Julian day.
fn current_jd() -> f64 {
    let unix = chrono::Utc::now().timestamp() as f64;
    unix / 86400.0 + 2440587.5
}
