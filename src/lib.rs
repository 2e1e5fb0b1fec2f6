#![no_std]

pub mod control_points;
pub mod horizon;
pub mod playback;
pub mod point;
pub mod sampler;
pub mod schedule;
pub mod target_list;
pub mod time_format;

pub use control_points::{CapacityError, ControlPointSet};
pub use horizon::{Horizon, SECONDS_PER_DAY, ZeroHorizon};
pub use playback::playback_value;
pub use point::{CurvePoint, MAX_VALUE, Target};
pub use sampler::{InvalidBudget, MonotoneCurveSampler, SampleSequence};
pub use schedule::{
    CHANNEL_COUNT, ChannelSchedule, ChannelTargets, MAX_TARGETS_PER_CHANNEL, RawSchedule,
    ScheduleBank,
};
pub use target_list::TargetListBuilder;
pub use time_format::TimeFormat;

/// Abstract sink for built target lists
///
/// Implement this trait to carry wire lists across the storage or
/// transmission boundary. The engine only encodes; the sink only moves
/// bytes.
pub trait TargetSink {
    /// Write one channel's target list
    fn write(&mut self, channel: u8, targets: &[Target]);
}
