use crate::horizon::Horizon;

/// Maximum brightness value in percent.
pub const MAX_VALUE: u8 = 100;

/// A point on a channel's brightness curve.
///
/// Control points are anchors the user placed; the curve must pass through
/// them exactly. Non-control points are synthesized boundaries or
/// interpolated fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Time in seconds from the start of the cycle.
    pub time: f32,
    /// Brightness in percent.
    pub value: f32,
    /// Whether the user placed this point.
    pub is_control: bool,
}

impl CurvePoint {
    /// Create a user-authored anchor.
    pub const fn control(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            is_control: true,
        }
    }

    /// Create an interpolated or synthesized point.
    pub const fn sample(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            is_control: false,
        }
    }
}

/// A quantized point as persisted and transmitted to the device.
///
/// Field names on the wire follow the controller protocol: `time`, `value`
/// and `isControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// Time in whole seconds, within the channel's horizon.
    pub time: u32,
    /// Brightness in whole percent, `0..=100`.
    pub value: u8,
    /// Whether the point is a user-authored anchor.
    #[cfg_attr(feature = "serde", serde(rename = "isControl", default))]
    pub is_control: bool,
}

impl Target {
    /// Quantize a curve point: clamp the time to the horizon and the value
    /// to `0..=100`, then round both to the nearest integer.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn quantize(point: CurvePoint, horizon: Horizon) -> Self {
        let time = libm::roundf(point.time.clamp(0.0, horizon.end() as f32)) as u32;
        Self {
            time,
            value: round_value(point.value),
            is_control: point.is_control,
        }
    }
}

impl From<Target> for CurvePoint {
    #[allow(clippy::cast_precision_loss)]
    fn from(target: Target) -> Self {
        Self {
            time: target.time as f32,
            value: f32::from(target.value),
            is_control: target.is_control,
        }
    }
}

/// Round and clamp a brightness value to `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_value(value: f32) -> u8 {
    libm::roundf(value.clamp(0.0, f32::from(MAX_VALUE))) as u8
}
