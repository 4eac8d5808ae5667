// SPDX-License-Identifier: MPL-2.0
//! End-to-end exercise of the HUD through its public API: icon
//! rasterization, bar assembly, pointer routing, action round-trips, and
//! the status text pass.

use iced::Point;
use iced_skybar::action::{Action, ActionRegistry};
use iced_skybar::config::{AtmosphereSection, DisplaySection};
use iced_skybar::core::{CoreSnapshot, DefaultLocalizer, JD_SECOND};
use iced_skybar::error::Result;
use iced_skybar::ui::hud::bottom_bar::BottomBar;
use iced_skybar::ui::hud::button::{ButtonConfig, ButtonPixmaps, IconButton, PointerButton};
use iced_skybar::ui::hud::scene::HudScene;
use iced_skybar::ui::hud::sidebar::SideBar;
use iced_skybar::ui::hud::ApproxMetrics;
use iced_skybar::ui::icons;
use std::time::Duration;

fn button(action: &str, icon: fn(f32) -> Result<ButtonPixmaps>) -> IconButton {
    IconButton::new(
        icon(1.0).expect("icon should render"),
        ButtonConfig {
            action: Some(action.to_string()),
            action_checkable: true,
            ..ButtonConfig::default()
        },
        1.0,
    )
}

fn build() -> (HudScene, ActionRegistry) {
    let mut actions = ActionRegistry::new();
    actions.add(Action::new("actionGrid", "Equatorial grid").checkable(false).with_shortcut("E"));
    actions.add(Action::new("actionGround", "Ground").checkable(true).with_shortcut("G"));
    actions.add(Action::new("actionLines", "Constellation lines").checkable(false).with_shortcut("C"));

    let metrics = ApproxMetrics;

    let mut side = SideBar::new();
    side.set_pos(Point::new(0.0, 300.0));
    side.add_button(button("actionLines", icons::star_lines));
    side.add_button(button("actionGrid", icons::grid));

    let mut bottom = BottomBar::new(
        icons::group_backgrounds(1.0).expect("plates should render"),
        DisplaySection::default(),
        AtmosphereSection::default(),
        13.0,
    );
    bottom.set_pos(Point::new(0.0, 700.0));
    bottom.add_button(button("actionGround", icons::mountain), "010-main", None, &metrics);

    (HudScene::new(side, bottom), actions)
}

#[test]
fn click_round_trip_toggles_action_and_back() {
    let (mut scene, mut actions) = build();
    let target = {
        let b = &scene.side_bar().buttons()[0];
        let origin = scene.side_bar().pos();
        Point::new(origin.x + b.pos().x + 4.0, origin.y + b.pos().y + 4.0)
    };

    scene.pointer_pressed(target, PointerButton::Primary, &mut actions);
    assert!(actions.is_checked("actionLines"));
    assert!(scene.side_bar().buttons()[0].checked().is_on());

    scene.pointer_released(target, PointerButton::Primary, &mut actions);
    scene.pointer_pressed(target, PointerButton::Primary, &mut actions);
    assert!(!actions.is_checked("actionLines"));
    assert!(!scene.side_bar().buttons()[0].checked().is_on());
}

#[test]
fn hover_animates_and_labels_then_clears() {
    let (mut scene, actions) = build();
    let localizer = DefaultLocalizer;
    let target = {
        let b = &scene.side_bar().buttons()[1];
        let origin = scene.side_bar().pos();
        Point::new(origin.x + b.pos().x + 4.0, origin.y + b.pos().y + 4.0)
    };

    scene.pointer_moved(target, &actions, &localizer);
    assert_eq!(scene.side_bar().help_label().text, "Equatorial grid  [E]");
    assert!(scene.has_running_animation());

    for _ in 0..20 {
        scene.tick(Duration::from_millis(16));
    }
    assert!(!scene.has_running_animation());

    scene.pointer_left(&actions, &localizer);
    assert!(scene.side_bar().help_label().is_empty());
    // Leaving starts the fade-out.
    assert!(scene.has_running_animation());
}

#[test]
fn status_pass_renders_the_simulated_core() {
    let (mut scene, _) = build();
    let mut core = CoreSnapshot::default();
    core.time_rate = 120.0 * 60.0 * JD_SECOND;

    scene.sync(&core, &DefaultLocalizer, &ApproxMetrics);

    let bar = scene.bottom_bar();
    assert_eq!(bar.datetime().text, "2008-02-06 17:33:00 UTC");
    assert_eq!(bar.location().text, "Earth, Munich, 500 m");
    assert!(bar.fov().text.starts_with("FOV "));
    assert!(bar.fps().text.ends_with(" FPS"));
    assert!(bar.datetime().tooltip.contains("hr/s"));
    assert_eq!(scene.outline().segments().len(), 8);
}

#[test]
fn hide_and_readd_keeps_the_button_usable() {
    let (mut scene, _) = build();
    let metrics = ApproxMetrics;

    let removed = scene
        .bottom_bar_mut()
        .hide_button("actionGround", &metrics)
        .expect("the button should be found");
    assert!(!removed.visible());
    assert_eq!(scene.bottom_bar().group_len("010-main"), None);

    scene
        .bottom_bar_mut()
        .add_button(removed, "010-main", None, &metrics);
    assert_eq!(scene.bottom_bar().group_len("010-main"), Some(1));
    assert!(scene.bottom_bar().buttons().next().unwrap().visible());
}

#[test]
fn prepared_scene_yields_drawable_handles() {
    let (mut scene, _) = build();
    scene.prepare(2.0);
    assert!(scene.side_bar().buttons().iter().all(|b| b.handle().is_some()));
    assert!(scene.bottom_bar().buttons().all(|b| b.handle().is_some()));
}
