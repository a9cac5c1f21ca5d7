//! Proportional position-based servo toward a target pose

use nalgebra::Vector6;

use crate::kinematic_traits::Pose;

/// Computes the end-effector twist that moves `current` toward `target`.
///
/// The pose error `current⁻¹ · target` is expressed in the end-effector frame as translation
/// followed by the rotation scaled axis; the returned twist is that error multiplied by `gain`.
/// The second value tells if the sum of absolute error components is below `threshold`.
pub fn pose_servo(current: &Pose, target: &Pose, gain: f64, threshold: f64) -> (Vector6<f64>, bool) {
    let error = pose_error(current, target);
    let arrived = error.abs().sum() < threshold;
    (error * gain, arrived)
}

/// Pose error in the end-effector frame of `current`.
pub fn pose_error(current: &Pose, target: &Pose) -> Vector6<f64> {
    let delta = current.inverse() * target;
    let linear = delta.translation.vector;
    let angular = delta.rotation.scaled_axis();
    Vector6::new(linear.x, linear.y, linear.z, angular.x, angular.y, angular.z)
}
