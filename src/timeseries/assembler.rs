//! The offline pipeline turning raw arm and gripper telemetry into one aligned trajectory

use tracing::debug;

use crate::downsampler::{downsample, with_goals};
use crate::error::Result;
use crate::interpolation::Interpolation;
use crate::merge::merge;
use crate::resampler::resample;
use crate::samples::{KeyedSample, StateSample, TrajectoryRecord, Value};

/// Aligned trajectory and the grid timestamps the arm telemetry did not reach.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    pub records: Vec<TrajectoryRecord>,
    pub remainder: Vec<f64>,
}

/// Reconstructs arm and gripper state on `grid` (typically the camera frame timestamps).
///
/// Arm keyframes are resampled with `policy`; only the grid prefix the arm covers is kept and
/// the rest is returned as remainder. The gripper stream is downsampled onto that prefix.
/// Both streams get look-ahead goals and are merged, so every record holds the arm state
/// followed by the gripper state.
pub fn assemble<P: Interpolation + ?Sized>(
    grid: &[f64],
    arm: &[KeyedSample],
    gripper: &[StateSample],
    policy: &P,
) -> Result<Assembled> {
    let arm_resampled = resample(grid, arm, policy)?;
    let covered = &grid[..arm_resampled.values.len()];
    debug!("Arm covers {} of {} grid points", covered.len(), grid.len());

    let arm_records = with_goals(
        covered,
        arm_resampled.values.into_iter().map(Value::into_vec).collect(),
    )?;
    let gripper_records = downsample(gripper, covered)?;

    Ok(Assembled {
        records: merge(&[arm_records.as_slice(), gripper_records.as_slice()])?,
        remainder: arm_resampled.remainder,
    })
}
