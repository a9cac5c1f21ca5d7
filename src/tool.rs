//! Provides tool and base for the robot.
//! Both Tool and Base take arbitrary implementation of KinematicOracle and are such
//! implementations themselves. Hence, they can be cascaded, like base, having the robot,
//! that robot having a gripper:
//! ```
//! use std::sync::Arc;
//! use nalgebra::{Isometry3, Translation3, UnitQuaternion};
//! use rs_arm_trajectory::kinematic_traits::{Joints, KinematicOracle, Pose};
//! use rs_arm_trajectory::kinematics_impl::OpwOracle;
//! use rs_arm_trajectory::parameters::Parameters;
//! use rs_arm_trajectory::tool::{Base, Tool};
//!
//! let robot_alone = OpwOracle::new(Parameters::parol6());
//!
//! let robot_on_table = Base {
//!   robot: Arc::new(robot_alone),
//!   base: Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.02), UnitQuaternion::identity()),
//! };
//!
//! // Fingertips of the gripper are 12 cm past the flange
//! let robot_complete = Tool {
//!   robot: Arc::new(robot_on_table),
//!   tool: Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.12), UnitQuaternion::identity()),
//! };
//!
//! let joints: Joints = [0.0, 0.1, 0.2, 0.3, 0.0, 0.5];
//! let tcp_pose: Pose = robot_complete.pose(&joints);
//! println!("The fingertips are at: {:?}", tcp_pose);
//! ```

use std::sync::Arc;

use nalgebra::Isometry3;

use crate::kinematic_traits::{Joints, KinematicOracle, Pose};

/// Defines the fixed tool that can be attached to the last joint (joint 6) of robot.
/// The tool moves with the robot, providing additional translation and, if needed,
/// rotation. The pose reported is that of the tool center point.
#[derive(Clone)]
pub struct Tool {
    pub robot: Arc<dyn KinematicOracle>,

    /// Transformation from the robot's flange to the tool's TCP.
    pub tool: Isometry3<f64>,
}

/// Defines the fixed base that can hold the robot, moving it to its installed location.
#[derive(Clone)]
pub struct Base {
    pub robot: Arc<dyn KinematicOracle>,

    /// Transformation from the world origin to the robots base.
    pub base: Isometry3<f64>,
}

impl KinematicOracle for Tool {
    fn pose(&self, qs: &Joints) -> Pose {
        self.robot.pose(qs) * self.tool
    }
}

impl KinematicOracle for Base {
    fn pose(&self, qs: &Joints) -> Pose {
        self.base * self.robot.pose(qs)
    }

    /// The body-frame Jacobian does not depend on where the base stands.
    fn jacobian(&self, qs: &Joints) -> nalgebra::Matrix6<f64> {
        self.robot.jacobian(qs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics_impl::OpwOracle;
    use crate::parameters::Parameters;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};

    fn assert_diff(a: &Pose, b: &Pose, expected_diff: [f64; 3], epsilon: f64) {
        let actual_diff = a.translation.vector - b.translation.vector;
        for axis in 0..3 {
            assert!(
                (actual_diff[axis] - expected_diff[axis]).abs() <= epsilon,
                "axis {} difference is not as expected: actual = {}, expected = {}",
                axis, actual_diff[axis], expected_diff[axis]
            );
        }
    }

    #[test]
    fn test_tool_extends_along_flange_z() {
        let robot: Arc<dyn KinematicOracle> = Arc::new(OpwOracle::new(Parameters::irb2400_10()));
        let tool = Tool {
            robot: robot.clone(),
            tool: Isometry3::from_parts(Translation3::new(0.0, 0.0, 1.0), UnitQuaternion::identity()),
        };
        let joints = [0.2, 0.1, -0.3, 0.4, 0.6, 0.0];
        let flange = robot.pose(&joints);
        let tcp = tool.pose(&joints);
        let expected = flange.rotation * Vector3::z();
        assert_diff(&tcp, &flange, [expected.x, expected.y, expected.z], 1e-9);
    }

    #[test]
    fn test_base_shifts_world() {
        let robot: Arc<dyn KinematicOracle> = Arc::new(OpwOracle::new(Parameters::irb2400_10()));
        let base = Base {
            robot: robot.clone(),
            base: Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.5), UnitQuaternion::identity()),
        };
        let joints = [0.2, 0.1, -0.3, 0.4, 0.6, 0.0];
        assert_diff(&base.pose(&joints), &robot.pose(&joints), [0.0, 0.0, 0.5], 1e-9);

        let a = base.jacobian(&joints);
        let b = robot.jacobian(&joints);
        assert!((a - b).abs().max() < 1e-12);
    }
}
