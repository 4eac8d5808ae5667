// SPDX-License-Identifier: MPL-2.0
//! Read-only data consumed from the host's astronomy/time core.
//!
//! The widget layer never computes astronomy: the host hands it a
//! [`CoreSnapshot`] each frame and a [`Localizer`] for the handful of
//! strings this layer renders. Both are explicit parameters, never ambient
//! globals, so the bars stay pure and testable.

pub mod format;
pub mod fps;

pub use fps::FpsCounter;

/// One Julian day fraction per real-time second.
pub const JD_SECOND: f64 = 1.0 / 86400.0;

/// Julian day at which zoned civil time begins to make sense on Earth
/// (1847-12-01); before this the bar reports local mean solar time.
pub const TZ_ERA_BEGINNING: f64 = 2395996.5;

/// Reserved body identifier used while in transit between bodies. It is
/// translated directly instead of being resolved against the body registry.
pub const SPACESHIP_BODY: &str = "SpaceShip";

/// Marker substring identifying a transit ("flight") location name.
pub const FLIGHT_MARKER: &str = "->";

/// Astronomical unit in kilometers, for hosts whose core reports the
/// planetocentric distance in AU.
pub const AU_KM: f64 = 149_597_870.7;

/// Observer location as reported by the host core.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    /// Place name; empty when the observer is at raw coordinates.
    pub name: String,
    /// English body identifier, resolved to a display name by the host.
    pub planet: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the reference surface.
    pub altitude: i32,
}

/// Delta-T state of the host's time correction.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaTInfo {
    pub seconds: f64,
    /// Standard error of the estimate, seconds; zero or negative suppresses
    /// the sigma term in the tooltip.
    pub std_error: f64,
    /// Marker appended when the current algorithm is outside its validity
    /// range (typically `*` or empty).
    pub valid_range_marker: String,
    /// False when the host runs without delta-T correction.
    pub correction_enabled: bool,
    /// Lunar secular acceleration used by the active ephemeris, "/cy².
    pub n_dot: f64,
}

/// Everything the bottom bar displays, captured once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSnapshot {
    /// Current simulation time as a Julian day.
    pub jd: f64,
    /// Simulation time rate, Julian days per real second.
    pub time_rate: f64,
    pub location: GeoLocation,
    /// Localized display name for `location.planet`, as resolved by the
    /// host's body registry. `None` when the registry has no entry.
    pub body_display_name: Option<String>,
    /// The current body is an observer point, not a real surface.
    pub observer_body: bool,
    pub has_atmosphere: bool,
    pub delta_t: DeltaTInfo,
    /// Field of view, decimal degrees.
    pub fov: f64,
    pub fps: f64,
    pub topocentric: bool,
    /// Observer distance from the body center, kilometers.
    pub distance_from_center_km: f64,
    pub timezone_name: String,
    pub custom_timezone: bool,
}

impl Default for CoreSnapshot {
    fn default() -> Self {
        Self {
            // 2008-02-06 17:33 UTC.
            jd: 2454503.231250,
            time_rate: JD_SECOND,
            location: GeoLocation {
                name: "Munich".to_string(),
                planet: "Earth".to_string(),
                latitude: 48.1375,
                longitude: 11.575,
                altitude: 500,
            },
            body_display_name: Some("Earth".to_string()),
            observer_body: false,
            has_atmosphere: true,
            delta_t: DeltaTInfo {
                seconds: 66.0,
                std_error: 0.0,
                valid_range_marker: String::new(),
                correction_enabled: true,
                n_dot: -23.8946,
            },
            fov: 60.0,
            fps: 60.0,
            topocentric: true,
            distance_from_center_km: 6378.0,
            timezone_name: "system_default".to_string(),
            custom_timezone: false,
        }
    }
}

/// Localized strings consumed by the status fields and hover labels.
///
/// Keys passed to [`Localizer::tr`] are the English source strings; the
/// built-in [`DefaultLocalizer`] returns them unchanged.
pub trait Localizer {
    /// Localized calendar date for a Julian day.
    fn date_local(&self, jd: f64) -> String;
    /// Localized wall-clock time for a Julian day.
    fn time_local(&self, jd: f64) -> String;
    /// Printable timezone label appended after the time.
    fn timezone_local(&self, jd: f64) -> String;
    /// Translates a fixed UI literal ("Space", "flight", unit
    /// abbreviations, …).
    fn tr(&self, source: &str) -> String;
}

/// English pass-through localizer backed by `chrono` for calendar
/// formatting. Hosts with a real locale manager provide their own
/// [`Localizer`].
#[derive(Debug, Clone, Default)]
pub struct DefaultLocalizer;

const UNIX_EPOCH_JD: f64 = 2440587.5;

fn jd_to_datetime(jd: f64) -> Option<chrono::DateTime<chrono::Utc>> {
    let unix = (jd - UNIX_EPOCH_JD) * 86400.0;
    chrono::DateTime::from_timestamp(unix.floor() as i64, 0)
}

impl Localizer for DefaultLocalizer {
    fn date_local(&self, jd: f64) -> String {
        jd_to_datetime(jd)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn time_local(&self, jd: f64) -> String {
        jd_to_datetime(jd)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_default()
    }

    fn timezone_local(&self, _jd: f64) -> String {
        "UTC".to_string()
    }

    fn tr(&self, source: &str) -> String {
        source.to_string()
    }
}
