// SPDX-License-Identifier: MPL-2.0
//! Status string composition for the bottom bar.
//!
//! Pure functions from a [`CoreSnapshot`] plus display flags to the four
//! visible fields (date/time, location, field of view, frame rate) and
//! their tooltips. The bottom bar runs these every frame and diffs the
//! results against what is on screen.

use crate::config::{AtmosphereSection, DisplaySection};
use crate::core::format::{dec_deg_to_dms_str, fmt_significant, hours_to_hms_str};
use crate::core::{CoreSnapshot, Localizer, FLIGHT_MARKER, JD_SECOND, SPACESHIP_BODY,
    TZ_ERA_BEGINNING};

/// All strings the bottom bar renders, recomputed in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusStrings {
    pub datetime: String,
    pub datetime_tooltip: String,
    pub location: String,
    pub location_tooltip: String,
    pub fov: String,
    pub fov_tooltip: String,
    pub fps: String,
    pub fps_tooltip: String,
}

/// Composes every status field from one core snapshot.
pub fn compose(
    core: &CoreSnapshot,
    localizer: &dyn Localizer,
    flags: &DisplaySection,
    atmosphere: &AtmosphereSection,
) -> StatusStrings {
    let (datetime, secondary_date) = datetime_strings(core, localizer, flags);
    let datetime_tooltip = datetime_tooltip(core, localizer, &secondary_date);

    let location = location_line(core, localizer, flags);
    let location_tooltip = location_tooltip(core, localizer, flags, atmosphere);

    let fov_dms = dec_deg_to_dms_str(core.fov);
    let (fov, fov_tooltip) = if flags.show_fov {
        let text = if flags.fov_dms {
            format!("{} {}", localizer.tr("FOV"), fov_dms)
        } else {
            format!("{} {}°", localizer.tr("FOV"), fmt_significant(core.fov, 3))
        };
        let tooltip = format!("{}: {}", localizer.tr("Field of view"), fov_dms);
        (text, tooltip)
    } else {
        (String::new(), String::new())
    };

    let (fps, fps_tooltip) = if flags.show_fps {
        (
            format!("{} {}", fmt_significant(core.fps, 3), localizer.tr("FPS")),
            localizer.tr("Frames per second"),
        )
    } else {
        (String::new(), String::new())
    };

    StatusStrings {
        datetime,
        datetime_tooltip,
        location,
        location_tooltip,
        fov,
        fov_tooltip,
        fps,
        fps_tooltip,
    }
}

/// Primary and secondary date forms; the `time_jd` flag decides which of
/// the calendar string and the Julian-day string is shown and which goes to
/// the tooltip.
pub fn datetime_strings(
    core: &CoreSnapshot,
    localizer: &dyn Localizer,
    flags: &DisplaySection,
) -> (String, String) {
    let mut date_info = " ".to_string();
    if flags.show_datetime {
        date_info = if flags.show_tz {
            format!(
                "{} {} {}",
                localizer.date_local(core.jd),
                localizer.time_local(core.jd),
                localizer.timezone_local(core.jd)
            )
        } else {
            format!(
                "{} {}",
                localizer.date_local(core.jd),
                localizer.time_local(core.jd)
            )
        };
    }
    let jd_info = format!("JD {:.5}", core.jd);

    if flags.time_jd {
        (jd_info, date_info)
    } else {
        (date_info, jd_info)
    }
}

/// Timezone classification line for the datetime tooltip.
pub fn timezone_line(core: &CoreSnapshot, localizer: &dyn Localizer) -> String {
    let on_earth = core.location.planet == "Earth";
    let mut tz_name = core.timezone_name.clone();
    if tz_name.contains("system_default") || (tz_name.is_empty() && on_earth) {
        tz_name = localizer.tr("System default");
    }

    let mut line = format!("{}: {}", localizer.tr("Time zone"), tz_name);

    if tz_name.contains("LMST")
        || tz_name.contains("auto")
        || (on_earth && core.jd <= TZ_ERA_BEGINNING && !core.custom_timezone)
    {
        line = localizer.tr("Local Mean Solar Time");
    }
    if tz_name.contains("LTST") {
        line = localizer.tr("Local True Solar Time");
    }
    line
}

/// Simulation speed with unit auto-scaling: minutes → hours → days → years
/// per second.
pub fn simulation_speed_line(core: &CoreSnapshot, localizer: &dyn Localizer) -> String {
    let time_rate = (core.time_rate / JD_SECOND).abs();
    let mut speed = time_rate / 60.0;
    let mut unit = localizer.tr("min/s");

    if speed >= 60.0 {
        speed /= 60.0;
        unit = localizer.tr("hr/s");
    }
    if speed >= 24.0 {
        speed /= 24.0;
        unit = localizer.tr("d/s");
    }
    if speed >= 365.25 {
        speed /= 365.25;
        unit = localizer.tr("yr/s");
    }

    let label = localizer.tr("Simulation speed");
    if time_rate > 60.0 {
        format!("{}: x{:.0} ({:.2} {})", label, time_rate, speed, unit)
    } else {
        format!("{}: x{:.0}", label, time_rate)
    }
}

/// Datetime tooltip: delta-T details when correction is active, then the
/// secondary date form, the timezone classification, and the simulation
/// speed.
pub fn datetime_tooltip(
    core: &CoreSnapshot,
    localizer: &dyn Localizer,
    secondary_date: &str,
) -> String {
    let tz = timezone_line(core, localizer);
    let rate = simulation_speed_line(core, localizer);

    if !core.delta_t.correction_enabled {
        return format!("{}\n{}\n{}", secondary_date, tz, rate);
    }

    let dt = core.delta_t.seconds;
    let marker = &core.delta_t.valid_range_marker;
    let delta_t_info = if dt.abs() > 60.0 {
        format!("{} ({:.2}s){}", hours_to_hms_str(dt / 3600.0), dt, marker)
    } else {
        format!("{:.3}s{}", dt, marker)
    };

    let sigma = core.delta_t.std_error;
    let sigma_info = if sigma > 0.0 {
        format!("; \u{03c3}(\u{0394}T) = {:.1}s", sigma)
    } else {
        String::new()
    };

    format!(
        "\u{0394}T = {} [n\u{2032} @ {:.4}\"/cy\u{00b2}{}]\n{}\n{}\n{}",
        delta_t_info, core.delta_t.n_dot, sigma_info, secondary_date, tz, rate
    )
}

/// Resolved display name of the current body. The reserved transit body is
/// translated directly instead of hitting the registry.
fn body_name(core: &CoreSnapshot, localizer: &dyn Localizer) -> String {
    if core.location.planet == SPACESHIP_BODY {
        localizer.tr(SPACESHIP_BODY)
    } else {
        core.body_display_name
            .clone()
            .unwrap_or_else(|| core.location.planet.clone())
    }
}

/// The visible location field.
pub fn location_line(
    core: &CoreSnapshot,
    localizer: &dyn Localizer,
    flags: &DisplaySection,
) -> String {
    if !flags.show_location {
        return String::new();
    }
    let planet = body_name(core, localizer);
    let loc = &core.location;

    if core.observer_body {
        planet
    } else if loc.name.is_empty() {
        format!(
            "{}, {}, {}",
            planet,
            dec_deg_to_dms_str(loc.latitude),
            dec_deg_to_dms_str(loc.longitude)
        )
    } else if loc.name.contains(FLIGHT_MARKER) {
        format!("{} [{} {}]", planet, localizer.tr("flight"), loc.name)
    } else {
        format!(
            "{}, {}, {} {}",
            planet,
            localizer.tr(&loc.name),
            loc.altitude,
            localizer.tr("m")
        )
    }
}

/// The location tooltip; empty for flights and observer points.
pub fn location_tooltip(
    core: &CoreSnapshot,
    localizer: &dyn Localizer,
    flags: &DisplaySection,
    atmosphere: &AtmosphereSection,
) -> String {
    if !flags.show_location
        || core.observer_body
        || core.location.name.contains(FLIGHT_MARKER)
    {
        return String::new();
    }

    let (lat_pm, lat) = if core.location.latitude >= 0.0 {
        ("N", core.location.latitude)
    } else {
        ("S", -core.location.latitude)
    };
    let (lon_pm, lon) = if core.location.longitude >= 0.0 {
        ("E", core.location.longitude)
    } else {
        ("W", -core.location.longitude)
    };
    let lat_str = format!("{}{}\u{00b0}", lat_pm, lat);
    let lon_str = format!("{}{}\u{00b0}", lon_pm, lon);

    let rho = if core.topocentric {
        format!(
            "{} {} {}",
            localizer.tr("planetocentric distance"),
            core.distance_from_center_km,
            localizer.tr("km")
        )
    } else {
        localizer.tr("planetocentric observer")
    };

    if core.has_atmosphere {
        let weather = format!(
            "{}: {:.2} {}; {}: {:.1} \u{00b0}C",
            localizer.tr("Atmospheric pressure"),
            atmosphere.pressure_mbar,
            localizer.tr("mbar"),
            localizer.tr("temperature"),
            atmosphere.temperature_c
        );
        format!("{} {}; {}\n{}", lat_str, lon_str, rho, weather)
    } else {
        format!("{} {}; {}", lat_str, lon_str, rho)
    }
}
