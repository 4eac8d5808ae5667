// SPDX-License-Identifier: MPL-2.0
//! Angle and number formatting for the status text fields.
//!
//! These are presentation helpers only; the values themselves come from the
//! host's astronomy core.

/// Formats decimal degrees as a signed degrees/minutes/seconds string,
/// e.g. `+46°12'34.5"`.
pub fn dec_deg_to_dms_str(degrees: f64) -> String {
    let sign = if degrees < 0.0 { '-' } else { '+' };
    let abs = degrees.abs();
    let d = abs.floor();
    let m = ((abs - d) * 60.0).floor();
    let mut s = (abs - d - m / 60.0) * 3600.0;
    // Guard against 59.999… rounding up to 60.0 in the rendered string.
    if s > 59.95 {
        s = 59.9;
    }
    format!("{}{}°{:02}'{:.1}\"", sign, d as u32, m as u32, s)
}

/// Formats decimal hours as `1h02m03.0s`.
pub fn hours_to_hms_str(hours: f64) -> String {
    let sign = if hours < 0.0 { "-" } else { "" };
    let abs = hours.abs();
    let h = abs.floor();
    let m = ((abs - h) * 60.0).floor();
    let s = (abs - h - m / 60.0) * 3600.0;
    format!("{}{}h{:02}m{:.1}s", sign, h as u32, m as u32, s)
}

/// Formats a value with at most `digits` significant digits, trimming
/// trailing zeros. The FOV and FPS fields print this way.
pub fn fmt_significant(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let mut out = format!("{:.*}", decimals, value);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}
