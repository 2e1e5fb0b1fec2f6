//! Canonical per-channel control point storage.
//!
//! A set holds the user's anchors in time order plus, for day-cycle
//! channels, synthesized boundary points so the curve wraps without a
//! discontinuity at midnight. Every edit produces a new set; an existing
//! set is never mutated in place.

use heapless::Vec;

use crate::horizon::Horizon;
use crate::point::{CurvePoint, MAX_VALUE, Target};

/// Error returned when a set cannot hold another point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

/// Sorted, deduplicated control points plus synthesized boundaries.
///
/// `P` is the maximum number of stored points and must leave room for the
/// two boundary points on day-cycle channels.
#[derive(Debug, Clone)]
pub struct ControlPointSet<const P: usize> {
    points: Vec<CurvePoint, P>,
    horizon: Horizon,
}

impl<const P: usize> ControlPointSet<P> {
    /// Create an empty set for the given horizon.
    pub const fn new(horizon: Horizon) -> Self {
        Self {
            points: Vec::new(),
            horizon,
        }
    }

    /// All points in time order, boundaries included.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// User-authored anchors only.
    pub fn anchors(&self) -> impl Iterator<Item = &CurvePoint> {
        self.points.iter().filter(|point| point.is_control)
    }

    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert or overwrite the anchor at `time`.
    ///
    /// The time is clamped to the horizon and the value to `0..=100`; an
    /// anchor already sitting on the same rounded time is overwritten.
    /// Returns the rebuilt set.
    pub fn upsert(&self, time: f32, value: f32) -> Result<Self, CapacityError> {
        let time = libm::roundf(self.horizon.clamp_time(time));
        let value = value.clamp(0.0, f32::from(MAX_VALUE));

        let mut anchors: Vec<CurvePoint, P> = Vec::new();
        for point in self.anchors() {
            if libm::roundf(point.time) != time {
                anchors.push(*point).map_err(|_| CapacityError)?;
            }
        }
        anchors
            .push(CurvePoint::control(time, value))
            .map_err(|_| CapacityError)?;

        Self::rebuild(anchors, self.horizon)
    }

    /// Remove the anchor whose rounded time matches `time`, then re-derive
    /// the boundaries from the remaining anchors.
    pub fn remove(&self, time: f32) -> Self {
        let time = libm::roundf(time);

        let mut anchors: Vec<CurvePoint, P> = Vec::new();
        for point in self.anchors() {
            if libm::roundf(point.time) != time {
                let _ = anchors.push(*point);
            }
        }

        // Cannot overflow: the result holds strictly fewer anchors than the
        // set it was derived from.
        Self::rebuild(anchors, self.horizon).unwrap_or_else(|_| Self::new(self.horizon))
    }

    /// Build a set from raw storage points, treating the declared control
    /// points as authoritative and discarding everything else.
    ///
    /// Duplicate times collapse last-write-wins; times and values are
    /// clamped, never rejected.
    pub fn from_raw(points: &[Target], horizon: Horizon) -> Result<Self, CapacityError> {
        let mut anchors: Vec<CurvePoint, P> = Vec::new();
        for target in points.iter().filter(|target| target.is_control) {
            let time = horizon.clamp_time(CurvePoint::from(*target).time);
            let value = f32::from(target.value.min(MAX_VALUE));
            anchors.retain(|anchor| anchor.time != time);
            anchors
                .push(CurvePoint::control(time, value))
                .map_err(|_| CapacityError)?;
        }
        Self::rebuild(anchors, horizon)
    }

    /// Sort the anchors and synthesize the boundary points.
    ///
    /// On a wrapping horizon the value holds across midnight: both
    /// boundaries copy the value of the last anchor of the day.
    #[allow(clippy::cast_precision_loss)]
    fn rebuild(mut anchors: Vec<CurvePoint, P>, horizon: Horizon) -> Result<Self, CapacityError> {
        anchors.sort_unstable_by(|a, b| {
            a.time
                .partial_cmp(&b.time)
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let mut points = anchors;
        if horizon.wraps() {
            if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
                let end = horizon.end() as f32;
                if first.time > 0.0 {
                    points
                        .insert(0, CurvePoint::sample(0.0, last.value))
                        .map_err(|_| CapacityError)?;
                }
                if last.time < end {
                    points
                        .push(CurvePoint::sample(end, last.value))
                        .map_err(|_| CapacityError)?;
                }
            }
        }

        Ok(Self { points, horizon })
    }
}
