//! Monotone cubic curve sampling.
//!
//! Densifies a control point set with a monotone cubic Hermite spline
//! (Fritsch–Carlson tangents). The curve passes through every control point
//! exactly and never overshoots the value range spanned by two neighboring
//! points, so a peak anchor stays the peak of the rendered curve.

use heapless::Vec;

use crate::control_points::ControlPointSet;
use crate::point::CurvePoint;

/// Dense, ordered samples of a channel's curve.
pub type SampleSequence<const N: usize> = Vec<CurvePoint, N>;

/// Error returned for a sample budget too small to hold a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBudget;

/// Samples control point sets into dense render curves.
#[derive(Debug, Clone, Copy)]
pub struct MonotoneCurveSampler {
    budget: usize,
}

impl MonotoneCurveSampler {
    /// Create a sampler with a total sample budget.
    ///
    /// The budget bounds the emitted sample count regardless of how many
    /// control points a curve has. Budgets below 2 cannot hold a curve and
    /// indicate caller misconfiguration.
    pub const fn new(budget: usize) -> Result<Self, InvalidBudget> {
        if budget < 2 {
            return Err(InvalidBudget);
        }
        Ok(Self { budget })
    }

    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Sample a control point set into at most `budget` points.
    ///
    /// Every input point is emitted exactly, carrying its `is_control`
    /// flag. An empty set samples to an empty sequence; a single point is
    /// passed through flagged as a control point.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample<const P: usize, const N: usize>(
        &self,
        set: &ControlPointSet<P>,
    ) -> SampleSequence<N> {
        let points = set.points();
        let mut samples = SampleSequence::new();
        match points {
            [] => return samples,
            [single] => {
                let _ = samples.push(CurvePoint::control(single.time, single.value));
                return samples;
            }
            _ => {}
        }

        let segments = points.len() - 1;

        // Secant slope of every segment.
        let mut secants: Vec<f32, P> = Vec::new();
        for pair in points.windows(2) {
            let dx = pair[1].time - pair[0].time;
            let dy = pair[1].value - pair[0].value;
            let _ = secants.push(if dx > 0.0 { dy / dx } else { 0.0 });
        }

        // Endpoints take the adjacent secant; interior points average the
        // two adjacent secants unless they differ in sign (a local extremum
        // gets a flat tangent).
        let mut tangents: Vec<f32, P> = Vec::new();
        let _ = tangents.push(secants[0]);
        for i in 1..segments {
            let tangent = if secants[i - 1] * secants[i] < 0.0 {
                0.0
            } else {
                (secants[i - 1] + secants[i]) / 2.0
            };
            let _ = tangents.push(tangent);
        }
        let _ = tangents.push(secants[segments - 1]);

        // Fritsch–Carlson clamp: flat segments stay flat, and tangents are
        // rescaled where they would break segment monotonicity.
        for i in 0..segments {
            if secants[i] == 0.0 {
                tangents[i] = 0.0;
                tangents[i + 1] = 0.0;
            } else {
                let alpha = tangents[i] / secants[i];
                let beta = tangents[i + 1] / secants[i];
                let norm = libm::hypotf(alpha, beta);
                if norm > 3.0 {
                    let scale = 3.0 / norm;
                    tangents[i] *= scale;
                    tangents[i + 1] *= scale;
                }
            }
        }

        // Parameter steps per segment, chosen so the total emitted count
        // (anchors included) stays within the budget.
        let steps = ((self.budget - 1) / segments).max(1);

        let _ = samples.push(points[0]);
        for i in 0..segments {
            let start = points[i];
            let end = points[i + 1];
            let dx = end.time - start.time;
            for j in 1..steps {
                let t = j as f32 / steps as f32;
                let value = hermite(t, start.value, end.value, tangents[i], tangents[i + 1], dx);
                let point = CurvePoint::sample(start.time + t * dx, value);
                if samples.push(point).is_err() {
                    break;
                }
            }
            // Anchors are emitted exactly, never recomputed.
            let _ = samples.push(end);
        }

        samples.truncate(self.budget);
        samples
    }
}

/// Cubic Hermite basis, tangents scaled by the segment length.
fn hermite(t: f32, y0: f32, y1: f32, m0: f32, m1: f32, dx: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * y0 + h10 * dx * m0 + h01 * y1 + h11 * dx * m1
}
