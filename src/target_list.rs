//! Wire-format target list construction.

use heapless::Vec;

use crate::horizon::Horizon;
use crate::point::{CurvePoint, Target};

/// Builds the quantized, deduplicated, capped list that is persisted and
/// transmitted to the device.
///
/// Sampling keeps curves within the device cap under normal use; the
/// builder still enforces the cap unconditionally.
#[derive(Debug, Clone, Copy)]
pub struct TargetListBuilder {
    horizon: Horizon,
}

impl TargetListBuilder {
    pub const fn new(horizon: Horizon) -> Self {
        Self { horizon }
    }

    /// Convert samples into at most `CAP` wire targets.
    ///
    /// Times and values are rounded and clamped, samples landing on the
    /// same quantized time collapse last-write-wins, and the earliest
    /// entries survive the cap.
    pub fn build<const CAP: usize>(&self, samples: &[CurvePoint]) -> Vec<Target, CAP> {
        let mut targets: Vec<Target, CAP> = Vec::new();
        for sample in samples {
            insert_sorted(&mut targets, Target::quantize(*sample, self.horizon));
        }
        targets
    }
}

/// Sorted insertion with last-write-wins on equal times.
///
/// When the list is full, later times are dropped first so the earliest
/// entries always survive.
fn insert_sorted<const CAP: usize>(targets: &mut Vec<Target, CAP>, target: Target) {
    if let Some(existing) = targets
        .iter_mut()
        .find(|existing| existing.time == target.time)
    {
        *existing = target;
        return;
    }

    let position = targets
        .iter()
        .position(|existing| existing.time > target.time)
        .unwrap_or(targets.len());

    if targets.is_full() {
        if position == targets.len() {
            return;
        }
        targets.pop();
    }
    let _ = targets.insert(position, target);
}
