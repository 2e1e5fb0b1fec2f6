//! Clock-time parsing and formatting for the storage and render boundaries.

use core::fmt::Write;

use heapless::String;

/// Display and parse convention for a chart's time axis.
///
/// Day-cycle charts use `HH:MM`, bounded macro charts use `MM:SS`. The
/// format is display-only; it never changes how a curve is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    HoursMinutes,
    MinutesSeconds,
}

impl TimeFormat {
    /// Parse a clock string into seconds.
    ///
    /// Returns `None` for anything that is not two colon-separated numbers.
    pub fn parse(self, text: &str) -> Option<u32> {
        let (major, minor) = text.split_once(':')?;
        let major: u32 = major.trim().parse().ok()?;
        let minor: u32 = minor.trim().parse().ok()?;
        Some(match self {
            Self::HoursMinutes => major * 3600 + minor * 60,
            Self::MinutesSeconds => major * 60 + minor,
        })
    }

    /// Format seconds as a clock string.
    pub fn format(self, seconds: u32) -> String<8> {
        let mut text = String::new();
        let _ = match self {
            Self::HoursMinutes => write!(
                text,
                "{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60
            ),
            Self::MinutesSeconds => write!(text, "{}:{:02}", seconds / 60, seconds % 60),
        };
        text
    }
}
