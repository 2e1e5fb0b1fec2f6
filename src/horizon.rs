/// Seconds in a full day cycle.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Error returned when constructing a horizon of zero duration.
///
/// A zero horizon is a caller misconfiguration, not bad user data, so it is
/// reported instead of being clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroHorizon;

/// Time extent of a channel's curve.
///
/// Day-cycle channels wrap at midnight; bounded sequences (macros) end at
/// their configured duration and do not wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    end: u32,
    wraps: bool,
}

impl Horizon {
    /// Full day cycle of 86 400 seconds, wrapping at midnight.
    pub const DAY: Self = Self {
        end: SECONDS_PER_DAY,
        wraps: true,
    };

    /// Bounded sequence of the given duration in seconds.
    pub const fn sequence(duration: u32) -> Result<Self, ZeroHorizon> {
        if duration == 0 {
            return Err(ZeroHorizon);
        }
        Ok(Self {
            end: duration,
            wraps: false,
        })
    }

    /// Last valid time of the curve.
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Whether the curve wraps around from its end back to time zero.
    pub const fn wraps(self) -> bool {
        self.wraps
    }

    /// Clamp a time to the valid range of this horizon.
    #[allow(clippy::cast_precision_loss)]
    pub fn clamp_time(self, time: f32) -> f32 {
        time.clamp(0.0, self.end as f32)
    }
}
