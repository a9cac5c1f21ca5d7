//! Resolved-rate planner shifting the tool by a Cartesian offset.
//!
//! The planner does not solve the inverse kinematics in closed form. It repeatedly turns the
//! remaining Cartesian error into a joint velocity through the Jacobian, bounds the joint speed,
//! and integrates with a fixed timestep. The result is a short list of joint waypoints (raw
//! actuator units) and whether the target was reached within the iteration cap.
//!
//! ```
//! use std::sync::Arc;
//! use nalgebra::Vector3;
//! use rs_arm_trajectory::axis_transform::AxisTransform;
//! use rs_arm_trajectory::kinematics_impl::OpwOracle;
//! use rs_arm_trajectory::parameters::Parameters;
//! use rs_arm_trajectory::planner::ResolvedRatePlanner;
//!
//! let planner = ResolvedRatePlanner::new(
//!     Arc::new(OpwOracle::new(Parameters::parol6())),
//!     AxisTransform::parol6(),
//! );
//! let shift = planner.plan(&[0.0, -1.0, 2.0, 0.0, 1.0, 0.0], &Vector3::new(0.0, 0.0, 0.05));
//! assert!(shift.path.len() <= 10);
//! ```

use std::sync::Arc;

use nalgebra::{Translation3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::axis_transform::AxisTransform;
use crate::error::{Result, TrajectoryError};
use crate::jacobian::Jacobian;
use crate::kinematic_traits::{Joints, KinematicOracle, AXES};
use crate::servo::pose_servo;
use crate::utils::{dump_path, is_valid, joints_norm};

/// Waypoints reserved up front; longer paths grow on demand.
const PATH_CAPACITY: usize = 64;

/// Tuning of the resolved-rate loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerParameters {
    /// Upper bound on iterations, and so on the number of waypoints.
    pub max_iterations: usize,

    /// Proportional gain of the pose servo.
    pub gain: f64,

    /// The target is reached when the summed absolute pose error drops below this.
    pub threshold: f64,

    /// Integration step; each waypoint advances by joint velocity times this.
    pub timestep: f64,

    /// Joint velocity vectors with a larger Euclidean norm are scaled down to it.
    pub max_joint_speed: f64,
}

impl Default for PlannerParameters {
    fn default() -> Self {
        PlannerParameters {
            max_iterations: 10,
            gain: 1.0,
            threshold: 0.2,
            timestep: 0.5,
            max_joint_speed: 1.0,
        }
    }
}

/// Request to shift the tool, joints in raw actuator units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub q: Vec<f64>,
    pub offset: [f64; 3],
}

/// Planned waypoints in raw actuator units, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResponse {
    pub path: Vec<Joints>,
    pub arrived: bool,
}

#[derive(Clone)]
pub struct ResolvedRatePlanner {
    pub robot: Arc<dyn KinematicOracle>,
    pub transform: AxisTransform,
    pub parameters: PlannerParameters,
}

impl ResolvedRatePlanner {
    pub fn new(robot: Arc<dyn KinematicOracle>, transform: AxisTransform) -> Self {
        ResolvedRatePlanner {
            robot,
            transform,
            parameters: PlannerParameters::default(),
        }
    }

    pub fn with_parameters(self, parameters: PlannerParameters) -> Self {
        ResolvedRatePlanner { parameters, ..self }
    }

    /// Plans the motion that shifts the tool by `offset`, expressed in the frame of the tool
    /// at its current pose (orientation is kept).
    ///
    /// # Arguments
    ///
    /// * `raw` - Current joint positions in raw actuator units
    /// * `offset` - Cartesian displacement of the tool, in the tool frame
    ///
    /// # Returns
    ///
    /// `ShiftResponse` - Waypoints in raw actuator units (at most `max_iterations` of them)
    /// and whether the target was reached.
    ///
    /// Each waypoint is the calibrated state at the start of an iteration, converted back to
    /// raw units, so the first waypoint is always the starting configuration. The loop stops
    /// when the servo reports arrival or after `max_iterations`.
    ///
    /// Near a singular Jacobian the joint velocity may get very large or non-finite. The speed
    /// clamp bounds a finite step but convergence is not guaranteed; such steps are logged.
    pub fn plan(&self, raw: &Joints, offset: &Vector3<f64>) -> ShiftResponse {
        let p = &self.parameters;
        let mut q = self.transform.to_calibrated(raw);
        let target = self.robot.pose(&q) * Translation3::from(*offset);

        let mut path: Vec<Joints> = Vec::with_capacity(p.max_iterations.min(PATH_CAPACITY));
        let mut arrived = false;

        while !arrived && path.len() < p.max_iterations {
            let (twist, reached) = pose_servo(&self.robot.pose(&q), &target, p.gain, p.threshold);
            arrived = reached;

            let mut qd = Jacobian::new(self.robot.as_ref(), &q).velocities_from_vector(&twist);
            let norm = joints_norm(&qd);
            if !norm.is_finite() {
                warn!("Non-finite joint velocity at {:?}, Jacobian is singular", q);
            } else if norm > p.max_joint_speed {
                debug!("Joint speed {:.3} clamped to {}", norm, p.max_joint_speed);
                let scale = p.max_joint_speed / norm;
                qd.iter_mut().for_each(|v| *v *= scale);
            }

            path.push(q);
            for (joint, velocity) in q.iter_mut().zip(qd.iter()) {
                *joint += velocity * p.timestep;
            }
            debug!(iteration = path.len(), error = twist.norm() / p.gain, arrived, "resolved-rate step");
        }

        if !arrived {
            debug!("Target not reached after {} iterations", p.max_iterations);
        }
        dump_path(&path);

        ShiftResponse {
            path: path.iter().map(|q| self.transform.to_raw(q)).collect(),
            arrived,
        }
    }

    /// Validates an external request and plans it.
    pub fn plan_request(&self, request: &ShiftRequest) -> Result<ShiftResponse> {
        let raw: Joints = request.q.as_slice().try_into().map_err(|_| TrajectoryError::Arity {
            expected: AXES,
            found: request.q.len(),
        })?;
        if !is_valid(&raw) {
            return Err(TrajectoryError::precondition(format!("joints must be finite, got {:?}", raw)));
        }
        if !request.offset.iter().all(|v| v.is_finite()) {
            return Err(TrajectoryError::precondition(format!(
                "offset must be finite, got {:?}",
                request.offset
            )));
        }
        Ok(self.plan(&raw, &Vector3::from(request.offset)))
    }
}
