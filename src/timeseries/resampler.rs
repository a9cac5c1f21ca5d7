//! Resampling of a keyframe series onto ascending target timestamps

use tracing::debug;

use crate::error::{Result, TrajectoryError};
use crate::interpolation::Interpolation;
use crate::samples::{first_unsorted, KeyedSample, Value};

/// Values for the resolved head of the targets, and the targets that lie past the last
/// keyframe. A non-empty remainder means the telemetry does not reach far enough yet;
/// this is a normal outcome the caller must handle, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resampled {
    pub values: Vec<Value>,
    pub remainder: Vec<f64>,
}

impl Resampled {
    /// All targets received a value.
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Interpolates `keyframes` at every timestamp of `targets` with the given policy.
///
/// # Arguments
///
/// * `targets` - Ascending timestamps to produce values for
/// * `keyframes` - Ascending samples; the first must not be later than the first target
/// * `policy` - Interpolation between the two keyframes bracketing each target
///
/// # Returns
///
/// `Resampled` - One value per resolved target (a prefix of `targets`) and the targets past the
/// last keyframe, or a precondition error for unsorted input or a late first keyframe.
///
/// A single cursor advances through the keyframes together with the targets, so the cost is
/// linear in the total number of items. A target at exactly the first keyframe gets that
/// keyframe on both sides of the bracket. When the keyframes run out, resampling stops and the
/// unresolved targets are returned as remainder.
pub fn resample<P: Interpolation + ?Sized>(
    targets: &[f64],
    keyframes: &[KeyedSample],
    policy: &P,
) -> Result<Resampled> {
    let Some(&first_target) = targets.first() else {
        return Ok(Resampled::default());
    };
    check_order(targets, keyframes)?;
    let first_keyframe = keyframes
        .first()
        .ok_or_else(|| TrajectoryError::precondition("no keyframes to resample"))?;
    if first_keyframe.timestamp > first_target {
        return Err(TrajectoryError::precondition(format!(
            "first keyframe at {} is after the first target {}",
            first_keyframe.timestamp, first_target
        )));
    }

    let mut values = Vec::with_capacity(targets.len());
    let mut cursor = 0;

    for (index, &target) in targets.iter().enumerate() {
        while cursor < keyframes.len() && keyframes[cursor].timestamp < target {
            cursor += 1;
        }

        if cursor == keyframes.len() {
            debug!(
                "Keyframes end at {}, {} of {} targets unresolved",
                keyframes[cursor - 1].timestamp,
                targets.len() - index,
                targets.len()
            );
            return Ok(Resampled {
                values,
                remainder: targets[index..].to_vec(),
            });
        }

        let after = &keyframes[cursor];
        let before = if cursor == 0 { after } else { &keyframes[cursor - 1] };
        values.push(policy.interpolate(
            target,
            before.timestamp,
            &before.value,
            after.timestamp,
            &after.value,
        )?);
    }

    Ok(Resampled {
        values,
        remainder: Vec::new(),
    })
}

fn check_order(targets: &[f64], keyframes: &[KeyedSample]) -> Result<()> {
    if let Some(index) = first_unsorted(targets, |t| *t) {
        return Err(TrajectoryError::precondition(format!(
            "targets are not sorted at index {index}"
        )));
    }
    if let Some(index) = first_unsorted(keyframes, |k| k.timestamp) {
        return Err(TrajectoryError::precondition(format!(
            "keyframes are not sorted at index {index}"
        )));
    }
    Ok(())
}
