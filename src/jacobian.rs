//! Body-frame Jacobian and the joint velocities derived from it

extern crate nalgebra as na;

use na::linalg::SVD;
use na::{Matrix6, Vector6};
use rayon::prelude::*;
use tracing::trace;

use crate::kinematic_traits::{Joints, KinematicOracle};
use crate::utils::vector6_to_joints;

/// Joint perturbation used for numerical differentiation, radians.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Singular values below this are treated as zero by the pseudo-inverse.
const PSEUDO_INVERSE_EPSILON: f64 = 1e-12;

/// Struct representing the Jacobian matrix
pub struct Jacobian {
    /// A 6x6 matrix mapping joint velocities to the end-effector twist,
    /// expressed in the end-effector frame.
    matrix: Matrix6<f64>,
}

impl Jacobian {
    /// Queries the oracle for the Jacobian at the given calibrated joints.
    pub fn new(robot: &(impl KinematicOracle + ?Sized), qs: &Joints) -> Self {
        Self { matrix: robot.jacobian(qs) }
    }

    pub fn from_matrix(matrix: Matrix6<f64>) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.matrix
    }

    /// Computes the joint velocities required to achieve a desired end-effector twist
    ///
    /// # Arguments
    ///
    /// * `desired_twist` - A 6D vector of the desired linear and angular velocity of the
    ///   end-effector, in the end-effector frame
    ///
    /// # Returns
    ///
    /// `Joints` - Joint positions, with values representing joint velocities rather than angles.
    /// All values are NaN if no inverse could be computed.
    ///
    /// The matrix is inverted directly when possible and through the SVD pseudo-inverse
    /// otherwise. Near a singularity the direct inverse still exists and may produce very
    /// large velocities; bounding them is left to the caller.
    pub fn velocities_from_vector(&self, desired_twist: &Vector6<f64>) -> Joints {
        let joint_velocities = match self.matrix.try_inverse() {
            Some(inverse) => inverse * desired_twist,
            None => {
                trace!("Jacobian is not invertible, using pseudo-inverse");
                let svd = SVD::new(self.matrix, true, true);
                match svd.pseudo_inverse(PSEUDO_INVERSE_EPSILON) {
                    Ok(pseudo_inverse) => pseudo_inverse * desired_twist,
                    // Only reachable with a negative epsilon.
                    Err(_) => Vector6::from_element(f64::NAN),
                }
            }
        };
        vector6_to_joints(joint_velocities)
    }
}

/// Numerical body-frame Jacobian of any oracle, by forward differences of its pose.
///
/// Column `i` holds the twist `current⁻¹ · perturbed` divided by `epsilon`, where `perturbed`
/// is the pose with joint `i` increased by `epsilon`.
pub fn body_jacobian<K: KinematicOracle + ?Sized>(robot: &K, joints: &Joints, epsilon: f64) -> Matrix6<f64> {
    let mut jacobian = Matrix6::zeros();
    let current_inverse = robot.pose(joints).inverse();

    let jacobian_columns: Vec<_> = (0..6)
        .into_par_iter()
        .map(|i| {
            let mut perturbed_qs = *joints;
            perturbed_qs[i] += epsilon;
            let delta = current_inverse * robot.pose(&perturbed_qs);
            (
                delta.translation.vector / epsilon,
                delta.rotation.scaled_axis() / epsilon,
            )
        })
        .collect();

    for (i, (linear, angular)) in jacobian_columns.into_iter().enumerate() {
        jacobian.fixed_view_mut::<3, 1>(0, i).copy_from(&linear);
        jacobian.fixed_view_mut::<3, 1>(3, i).copy_from(&angular);
    }

    jacobian
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::Pose;
    use na::{Isometry3, Translation3, UnitQuaternion};

    const EPSILON: f64 = 1e-5;

    /// Single rotary joint of length 1 around Z. In the tool frame, rotating the joint moves
    /// the tip along local Y and rotates it around local Z.
    struct SingleRotaryJointRobot;

    impl KinematicOracle for SingleRotaryJointRobot {
        fn pose(&self, qs: &Joints) -> Pose {
            let angle = qs[0];
            let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, angle);
            let translation = Translation3::new(angle.cos(), angle.sin(), 0.0);
            Isometry3::from_parts(translation, rotation)
        }
    }

    fn assert_matrix_approx_eq(left: &Matrix6<f64>, right: &Matrix6<f64>, epsilon: f64) {
        for i in 0..6 {
            for j in 0..6 {
                assert!(
                    (left[(i, j)] - right[(i, j)]).abs() < epsilon,
                    "left[{0},{1}] = {2} is not approximately equal to right[{0},{1}] = {3}",
                    i, j, left[(i, j)], right[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_body_jacobian_single_joint() {
        let robot = SingleRotaryJointRobot;
        // Rotated, so a world-frame Jacobian would differ from the body-frame one.
        let joints: Joints = [0.7, 0.0, 0.0, 0.0, 0.0, 0.0];
        let jacobian = body_jacobian(&robot, &joints, DEFAULT_EPSILON);

        let mut expected = Matrix6::zeros();
        expected[(1, 0)] = 1.0; // Tip moves along its own Y
        expected[(5, 0)] = 1.0; // and turns around its own Z

        assert_matrix_approx_eq(&jacobian, &expected, EPSILON);
    }

    #[test]
    fn test_default_jacobian_is_numeric() {
        let robot = SingleRotaryJointRobot;
        let joints: Joints = [0.2, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_matrix_approx_eq(
            &robot.jacobian(&joints),
            &body_jacobian(&robot, &joints, DEFAULT_EPSILON),
            1e-12,
        );
    }

    #[test]
    fn test_velocities_identity() {
        let jacobian = Jacobian::from_matrix(Matrix6::identity());
        let twist = Vector6::new(0.1, -0.2, 0.3, 0.0, 0.5, -0.6);
        let qd = jacobian.velocities_from_vector(&twist);
        for i in 0..6 {
            assert!((qd[i] - twist[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_velocities_singular_uses_pseudo_inverse() {
        // Only the first joint does anything; the remaining columns are zero.
        let mut matrix = Matrix6::zeros();
        matrix[(1, 0)] = 1.0;
        matrix[(5, 0)] = 1.0;
        let jacobian = Jacobian::from_matrix(matrix);

        let qd = jacobian.velocities_from_vector(&Vector6::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0));
        assert!((qd[0] - 1.0).abs() < 1e-9, "qd = {:?}", qd);
        for velocity in &qd[1..] {
            assert!(velocity.abs() < 1e-9);
        }
    }
}
