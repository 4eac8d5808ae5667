// SPDX-License-Identifier: MPL-2.0
//! `iced_skybar` is an on-screen control-bar framework for planetarium-style
//! sky applications, built with the Iced GUI toolkit.
//!
//! It provides a retained-mode button/toolbar layer: toggleable pixmap
//! buttons with hover animation, a vertical side bar, a grouped bottom bar
//! with live status text (clock, location, field of view, frame rate), a
//! decorative outline path, and corner button overlays. Astronomy, locale
//! formatting, and settings semantics stay with the host; this crate renders
//! and reacts to the values they produce.

#![doc(html_root_url = "https://docs.rs/iced_skybar/0.2.0")]

pub mod action;
pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
