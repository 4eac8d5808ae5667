// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the demo application.
//!
//! The tick subscription drives both the simulated clock and the hover
//! fades: while any fade is running it runs at animation rate, otherwise it
//! drops to a relaxed status-refresh cadence.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Animation-rate ticks while a hover fade runs, relaxed ticks otherwise.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    let interval = if animating {
        Duration::from_millis(16)
    } else {
        Duration::from_millis(100)
    };
    time::every(interval).map(Message::Tick)
}

/// Routes window resizes to the bar-position layout.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        iced::Event::Window(window::Event::Resized(size)) => {
            Some(Message::WindowResized(size))
        }
        _ => None,
    })
}
