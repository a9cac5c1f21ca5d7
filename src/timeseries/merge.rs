//! Zipping of aligned streams into one multi-channel trajectory

use crate::error::{Result, TrajectoryError};
use crate::samples::TrajectoryRecord;

/// Concatenates state and goal vectors of aligned streams, index by index.
///
/// All streams must have the same length and exactly the same timestamp at every index,
/// which holds when they were resampled onto one grid. For example an arm stream of 6 joint
/// positions merged with a gripper stream of 1 aperture gives records of 7 values.
pub fn merge(streams: &[&[TrajectoryRecord]]) -> Result<Vec<TrajectoryRecord>> {
    let (first, others) = streams
        .split_first()
        .ok_or_else(|| TrajectoryError::precondition("no streams to merge"))?;

    for stream in others {
        if stream.len() != first.len() {
            return Err(TrajectoryError::LengthMismatch {
                expected: first.len(),
                found: stream.len(),
            });
        }
    }

    let mut merged = Vec::with_capacity(first.len());
    for (index, head) in first.iter().enumerate() {
        let mut record = head.clone();
        for stream in others {
            let other = &stream[index];
            if other.timestamp != head.timestamp {
                return Err(TrajectoryError::TimestampMismatch {
                    index,
                    expected: head.timestamp,
                    found: other.timestamp,
                });
            }
            record.state.extend_from_slice(&other.state);
            record.goal.extend_from_slice(&other.goal);
        }
        merged.push(record);
    }
    Ok(merged)
}
