//! Geometry of an ortho-parallel arm with a spherical wrist, used by [crate::kinematics_impl::OpwOracle]

use std::f64::consts::PI;

use crate::utils::yaml_real;

/// Parameters for the kinematic model of the robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Offset along x between joint 1 and joint 2.
    pub a1: f64,

    /// Offset along x between joint 3 and joint 4 (elbow offset).
    pub a2: f64,

    /// Lateral offset in y between joint 1 and joint 2. 0 for most arms.
    pub b: f64,

    /// Height of joint 2 above the base.
    pub c1: f64,

    /// Length of the upper arm (joint 2 to joint 3).
    pub c2: f64,

    /// Length of the forearm (joint 3 to the wrist center).
    pub c3: f64,

    /// Distance from the wrist center to the flange.
    pub c4: f64,

    /// Offsets applied to each joint angle to adjust the reference zero position.
    pub offsets: [f64; 6],

    /// Direction of positive rotation for each joint, `-1` reverses it.
    pub sign_corrections: [i8; 6],
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            a1: 0.0,
            a2: 0.0,
            b: 0.0,
            c1: 0.0,
            c2: 0.0,
            c3: 0.0,
            c4: 0.0,
            offsets: [0.0; 6],
            sign_corrections: [1; 6],
        }
    }
}

impl Parameters {
    /// Small desktop 6 axis arm, roughly the size of the PAROL6 (meters).
    pub fn parol6() -> Self {
        Parameters {
            a1: 0.0235,
            a2: -0.0420,
            b: 0.000,
            c1: 0.1105,
            c2: 0.1800,
            c3: 0.1765,
            c4: 0.0450,
            offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, PI],
            ..Self::default()
        }
    }

    pub fn igus_rebel() -> Self {
        Parameters {
            a1: 0.149,
            a2: -0.119,
            b: 0.,
            c1: 0.1,
            c2: 0.2384,
            c3: 0.17,
            c4: 0.1208,
            offsets: [0.0; 6],
            sign_corrections: [-1, 1, 1, 1, 1, 1],
        }
    }

    pub fn irb2400_10() -> Self {
        Parameters {
            a1: 0.100,
            a2: -0.135,
            b: 0.000,
            c1: 0.615,
            c2: 0.705,
            c3: 0.755,
            c4: 0.085,
            offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
            ..Self::default()
        }
    }

    /// Convert to string yaml representation, in the layout [crate::rig_from_file] reads.
    pub fn to_yaml(&self) -> String {
        format!(
            "robot:\n  \
              a1: {}\n  \
              a2: {}\n  \
              b: {}\n  \
              c1: {}\n  \
              c2: {}\n  \
              c3: {}\n  \
              c4: {}\n  \
              offsets: [{}]\n  \
              sign_corrections: [{}]\n",
            self.a1,
            self.a2,
            self.b,
            self.c1,
            self.c2,
            self.c3,
            self.c4,
            self.offsets.iter().map(yaml_real).collect::<Vec<_>>().join(","),
            self.sign_corrections
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}
