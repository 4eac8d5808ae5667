// SPDX-License-Identifier: MPL-2.0
//! Default values for every configurable setting.
//!
//! Kept in one place so the `Default` impls in [`super`] and the
//! documentation stay in agreement.

/// Buttons pixmaps are authored at this scale (1 device-independent pixel
/// per authored pixel).
pub const AUTHORED_PIXMAP_SCALE: f32 = 1.0;

/// Default device-independent scale applied to all button pixmaps at
/// construction.
pub const DEFAULT_PIXMAP_SCALE: f32 = 1.0;

/// Base font size for the status text fields, in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 13.0;

pub const DEFAULT_SHOW_DATETIME: bool = true;
pub const DEFAULT_SHOW_LOCATION: bool = true;
pub const DEFAULT_SHOW_FOV: bool = true;
pub const DEFAULT_SHOW_FPS: bool = true;
pub const DEFAULT_TIME_JD: bool = false;
pub const DEFAULT_FOV_DMS: bool = false;
pub const DEFAULT_SHOW_TZ: bool = true;
pub const DEFAULT_USE_BUTTON_BACKGROUND: bool = true;

/// Standard atmosphere at sea level.
pub const DEFAULT_PRESSURE_MBAR: f64 = 1013.0;
pub const DEFAULT_TEMPERATURE_C: f64 = 15.0;
