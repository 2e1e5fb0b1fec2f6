//! Per-channel schedule state and the edit surface.
//!
//! One bank holds every channel of a chart (the day chart, or a bounded
//! macro chart). Channels are keyed by id rather than position so a changed
//! channel count cannot silently index out of range. All operations are
//! synchronous and allocation-free; callers serialize edits per channel.

use heapless::{FnvIndexMap, Vec};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::TargetSink;
use crate::control_points::{CapacityError, ControlPointSet};
use crate::horizon::Horizon;
use crate::playback::playback_value;
use crate::point::{CurvePoint, Target};
use crate::sampler::{MonotoneCurveSampler, SampleSequence};
use crate::target_list::TargetListBuilder;

/// Number of dimmable channels on the reference controller.
pub const CHANNEL_COUNT: usize = 6;

/// Hard per-channel target cap enforced by the device.
pub const MAX_TARGETS_PER_CHANNEL: usize = 32;

/// Raw points handed back by storage or transmission.
///
/// Storage may return either the sparse authored shape or a previously
/// densified curve. The two are told apart by this tag, never guessed from
/// the point count.
#[derive(Debug, Clone, Copy)]
pub enum RawSchedule<'a> {
    /// Declared control points are authoritative; everything else is
    /// discarded and the curve is resampled from them.
    Authored(&'a [Target]),
    /// An already-sampled curve, passed through without resampling.
    PreSampled(&'a [Target]),
}

impl<'a> RawSchedule<'a> {
    /// Classify a flat list the way the legacy protocol did: any point
    /// declaring itself a control point makes the whole list authored.
    pub fn classify(points: &'a [Target]) -> Self {
        if points.iter().any(|point| point.is_control) {
            Self::Authored(points)
        } else {
            Self::PreSampled(points)
        }
    }
}

/// Wire payload for one channel's schedule.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelTargets<const CAP: usize> {
    pub channel: u8,
    pub targets: Vec<Target, CAP>,
}

/// Editing state of a single channel: the canonical control points and the
/// dense render samples derived from them.
#[derive(Debug, Clone)]
pub struct ChannelSchedule<const P: usize, const S: usize> {
    controls: ControlPointSet<P>,
    samples: SampleSequence<S>,
}

impl<const P: usize, const S: usize> ChannelSchedule<P, S> {
    pub fn controls(&self) -> &ControlPointSet<P> {
        &self.controls
    }

    pub fn samples(&self) -> &[CurvePoint] {
        &self.samples
    }
}

/// All channel schedules of one chart, keyed by channel id.
///
/// `C` is the map capacity and must be a power of two at least the channel
/// count; `P` bounds control points per channel and `S` the render samples.
pub struct ScheduleBank<const C: usize, const P: usize, const S: usize> {
    channels: FnvIndexMap<u8, ChannelSchedule<P, S>, C>,
    sampler: MonotoneCurveSampler,
    horizon: Horizon,
}

impl<const C: usize, const P: usize, const S: usize> ScheduleBank<C, P, S> {
    pub fn new(horizon: Horizon, sampler: MonotoneCurveSampler) -> Self {
        Self {
            channels: FnvIndexMap::new(),
            sampler,
            horizon,
        }
    }

    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn channel(&self, channel: u8) -> Option<&ChannelSchedule<P, S>> {
        self.channels.get(&channel)
    }

    /// Render samples of a channel; empty if the channel holds no curve.
    pub fn samples(&self, channel: u8) -> &[CurvePoint] {
        self.channels
            .get(&channel)
            .map_or(&[], |schedule| schedule.samples.as_slice())
    }

    /// Insert or overwrite a control point and resample the channel.
    pub fn upsert(&mut self, channel: u8, time: f32, value: f32) -> Result<(), CapacityError> {
        let controls = match self.channels.get(&channel) {
            Some(schedule) => schedule.controls.upsert(time, value)?,
            None => ControlPointSet::new(self.horizon).upsert(time, value)?,
        };
        self.store(channel, controls)
    }

    /// Remove the control point at `time` and resample the channel.
    pub fn remove(&mut self, channel: u8, time: f32) {
        let Some(schedule) = self.channels.get(&channel) else {
            return;
        };
        let controls = schedule.controls.remove(time);
        let samples = self.sampler.sample(&controls);
        // The key is already present, so the insert cannot fail.
        let _ = self.channels.insert(channel, ChannelSchedule { controls, samples });
    }

    /// Load a channel from raw storage points.
    pub fn load(&mut self, channel: u8, raw: RawSchedule<'_>) -> Result<(), CapacityError> {
        match raw {
            RawSchedule::Authored(points) => {
                #[cfg(feature = "esp32-log")]
                println!("schedule: channel {} authored, {} points", channel, points.len());

                let controls = ControlPointSet::from_raw(points, self.horizon)?;
                self.store(channel, controls)
            }
            RawSchedule::PreSampled(points) => {
                #[cfg(feature = "esp32-log")]
                println!("schedule: channel {} pre-sampled, {} points", channel, points.len());

                let mut samples: SampleSequence<S> = SampleSequence::new();
                for point in points {
                    samples
                        .push(CurvePoint::from(*point))
                        .map_err(|_| CapacityError)?;
                }
                samples.sort_unstable_by(|a, b| {
                    a.time
                        .partial_cmp(&b.time)
                        .unwrap_or(core::cmp::Ordering::Equal)
                });

                let controls = ControlPointSet::new(self.horizon);
                self.channels
                    .insert(channel, ChannelSchedule { controls, samples })
                    .map_err(|_| CapacityError)?;
                Ok(())
            }
        }
    }

    /// Build the wire target list for a channel.
    pub fn targets<const CAP: usize>(&self, channel: u8) -> Vec<Target, CAP> {
        TargetListBuilder::new(self.horizon).build(self.samples(channel))
    }

    /// Build the full wire payload for a channel.
    pub fn channel_targets<const CAP: usize>(&self, channel: u8) -> ChannelTargets<CAP> {
        ChannelTargets {
            channel,
            targets: self.targets(channel),
        }
    }

    /// Write every channel's target list to a sink.
    pub fn flush_to<const CAP: usize, T: TargetSink>(&self, sink: &mut T) {
        for (channel, schedule) in &self.channels {
            let targets: Vec<Target, CAP> =
                TargetListBuilder::new(self.horizon).build(&schedule.samples);
            sink.write(*channel, &targets);
        }
    }

    /// Value the device would output on one channel at `time`.
    ///
    /// Channels without a curve play back as 0.
    pub fn value_at(&self, channel: u8, time: f32) -> u8 {
        self.channels
            .get(&channel)
            .map_or(0, |schedule| playback_value(&schedule.samples, time))
    }

    /// Live preview of every loaded channel at `time`.
    pub fn values_at(&self, time: f32) -> Vec<(u8, u8), C> {
        let mut values = Vec::new();
        for (channel, schedule) in &self.channels {
            let _ = values.push((*channel, playback_value(&schedule.samples, time)));
        }
        values
    }

    fn store(&mut self, channel: u8, controls: ControlPointSet<P>) -> Result<(), CapacityError> {
        let samples = self.sampler.sample(&controls);
        self.channels
            .insert(channel, ChannelSchedule { controls, samples })
            .map_err(|_| CapacityError)?;
        Ok(())
    }
}
