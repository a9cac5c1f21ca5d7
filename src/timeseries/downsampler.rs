//! Resampling of a sparse discrete-state stream onto an external timestamp grid

use crate::error::{Result, TrajectoryError};
use crate::samples::{first_unsorted, StateSample, TrajectoryRecord};

/// State of `records` at every timestamp of `grid`.
///
/// Unlike [crate::resampler::resample] this never leaves a remainder: grid points before the
/// first record take the first state, points after the last record keep the last state. An
/// exact timestamp match takes that record's state; anything else is interpolated linearly
/// between the bracketing records.
pub fn downsample_states(records: &[StateSample], grid: &[f64]) -> Result<Vec<f64>> {
    if grid.is_empty() {
        return Ok(Vec::new());
    }
    if records.is_empty() {
        return Err(TrajectoryError::precondition("no records to downsample"));
    }
    if let Some(index) = first_unsorted(records, |r| r.timestamp) {
        return Err(TrajectoryError::precondition(format!(
            "records are not sorted at index {index}"
        )));
    }
    if let Some(index) = first_unsorted(grid, |t| *t) {
        return Err(TrajectoryError::precondition(format!(
            "grid is not sorted at index {index}"
        )));
    }

    let mut states = Vec::with_capacity(grid.len());
    let mut cursor = 0;
    for &t in grid {
        while cursor < records.len() && records[cursor].timestamp < t {
            cursor += 1;
        }

        let state = if cursor == records.len() {
            records[cursor - 1].state
        } else if cursor == 0 || records[cursor].timestamp == t {
            records[cursor].state
        } else {
            let (r0, r1) = (&records[cursor - 1], &records[cursor]);
            let fr = (t - r0.timestamp) / (r1.timestamp - r0.timestamp);
            r0.state * (1.0 - fr) + r1.state * fr
        };
        states.push(state);
    }
    Ok(states)
}

/// Downsamples `records` onto `grid` and assigns goals, see [with_goals].
pub fn downsample(records: &[StateSample], grid: &[f64]) -> Result<Vec<TrajectoryRecord>> {
    let states = downsample_states(records, grid)?;
    with_goals(grid, states.into_iter().map(|s| vec![s]).collect())
}

/// Pairs states with their timestamps and sets each goal to the following state.
/// The last record has no successor and takes its own state as goal.
pub fn with_goals(timestamps: &[f64], states: Vec<Vec<f64>>) -> Result<Vec<TrajectoryRecord>> {
    if timestamps.len() != states.len() {
        return Err(TrajectoryError::LengthMismatch {
            expected: timestamps.len(),
            found: states.len(),
        });
    }

    let goals: Vec<Vec<f64>> = states.iter().skip(1).chain(states.last()).cloned().collect();
    Ok(timestamps
        .iter()
        .zip(states)
        .zip(goals)
        .map(|((&timestamp, state), goal)| TrajectoryRecord { timestamp, state, goal })
        .collect())
}
