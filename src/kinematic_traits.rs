//! Types and the capability interface the planner needs from a kinematic model

extern crate nalgebra as na;

use na::{Isometry3, Matrix6};

use crate::jacobian::{body_jacobian, DEFAULT_EPSILON};

/// Pose is used a pose of the robot tcp. It contains both Cartesian position and rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3);
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six joint values. Depending on context these are either raw actuator units (as reported
/// and consumed by the hardware) or calibrated radians (as expected by the kinematic model),
/// see [crate::axis_transform::AxisTransform].
pub type Joints = [f64; 6];

/// Number of axes of the supported arms.
pub const AXES: usize = 6;

/// All joints at zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// Forward kinematics and Jacobian of the arm. The resolved-rate planner only needs these two
/// queries, so any model (analytic, URDF based, or a test double) can be plugged in.
pub trait KinematicOracle: Send + Sync {
    /// Pose of the tool center point for the given calibrated joints.
    fn pose(&self, qs: &Joints) -> Pose;

    /// Body-frame (end-effector frame) Jacobian for the given calibrated joints.
    /// Rows 0..3 are linear velocity, rows 3..6 angular velocity, one column per joint.
    ///
    /// The default implementation differentiates [KinematicOracle::pose] numerically.
    fn jacobian(&self, qs: &Joints) -> Matrix6<f64> {
        body_jacobian(self, qs, DEFAULT_EPSILON)
    }
}
