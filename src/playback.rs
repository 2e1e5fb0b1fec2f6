//! Linear playback mirror of the device firmware.
//!
//! The controller interpolates linearly between adjacent stored targets; it
//! never re-evaluates the cubic spline. Previews must show exactly what the
//! hardware will output, so this module reproduces the firmware rule
//! `round(v0 + (v1 - v0) * progress)` over the current sample sequence.

use crate::point::{CurvePoint, round_value};

/// Value the device would output at `time`, given the current samples.
///
/// Out-of-range queries clamp to the first or last sample instead of
/// extrapolating. An empty sequence plays back as 0; a single sample plays
/// back as its value at any time.
pub fn playback_value(samples: &[CurvePoint], time: f32) -> u8 {
    let Some(first) = samples.first() else {
        return 0;
    };
    let Some(last) = samples.last() else {
        return 0;
    };

    if time <= first.time {
        return round_value(first.value);
    }
    if time >= last.time {
        return round_value(last.value);
    }

    for pair in samples.windows(2) {
        if pair[0].time <= time && time <= pair[1].time {
            let dt = pair[1].time - pair[0].time;
            if dt == 0.0 {
                return round_value(pair[0].value);
            }
            let progress = (time - pair[0].time) / dt;
            return round_value(pair[0].value + (pair[1].value - pair[0].value) * progress);
        }
    }

    round_value(last.value)
}
