//! Reconstruction of a value at an arbitrary time from the two samples bracketing it.
//!
//! A policy is a pure function of `(t, t0, s0, t1, s1)`. Three are provided:
//!
//! - [Linear] blends scalars and equally long vectors.
//! - [StepHold] keeps the earlier value, for discrete commands that must not be smoothed.
//! - [ConstantAcceleration] follows `position`/`velocity` samples assuming the acceleration
//!   is constant between them.
//!
//! Any closure with the same signature is a policy too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajectoryError};
use crate::samples::Value;

pub trait Interpolation {
    /// Value at `t`, given the sample `s0` taken at `t0` and `s1` taken at `t1`, `t0 <= t <= t1`.
    fn interpolate(&self, t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value) -> Result<Value>;
}

impl<F> Interpolation for F
where
    F: Fn(f64, f64, &Value, f64, &Value) -> Result<Value>,
{
    fn interpolate(&self, t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value) -> Result<Value> {
        self(t, t0, s0, t1, s1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepHold;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantAcceleration;

impl Interpolation for Linear {
    fn interpolate(&self, t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value) -> Result<Value> {
        match (s0, s1) {
            (Value::Scalar(v0), Value::Scalar(v1)) => {
                if t == t0 || t0 == t1 {
                    return Ok(s0.clone());
                }
                let fr = (t - t0) / (t1 - t0);
                Ok(Value::Scalar(v0 * (1.0 - fr) + v1 * fr))
            }
            (Value::Vector(v0), Value::Vector(v1)) => {
                check_length(v0.len(), v1.len())?;
                if t == t0 || t0 == t1 {
                    return Ok(s0.clone());
                }
                let fr = (t - t0) / (t1 - t0);
                Ok(Value::Vector(
                    v0.iter().zip(v1).map(|(a, b)| a * (1.0 - fr) + b * fr).collect(),
                ))
            }
            (Value::Scalar(_) | Value::Vector(_), _) => Err(TrajectoryError::TypeMismatch {
                policy: "linear",
                found: s1.kind(),
            }),
            _ => Err(TrajectoryError::TypeMismatch {
                policy: "linear",
                found: s0.kind(),
            }),
        }
    }
}

impl Interpolation for StepHold {
    fn interpolate(&self, _t: f64, _t0: f64, s0: &Value, _t1: f64, _s1: &Value) -> Result<Value> {
        Ok(s0.clone())
    }
}

impl Interpolation for ConstantAcceleration {
    /// Per axis, with `T = t1 - t0` and `dt = t - t0`:
    /// `a = (v1 - v0) / T`, `d = v0·T + a·T²/2`, `dd = v0·dt + a·dt²/2` and the result is
    /// `p0 + (p1 - p0) / d · dd`. Scaling by the measured displacement `p1 - p0` keeps the
    /// endpoints exact even if the recorded velocities are not consistent with the positions.
    /// An axis with `d == 0` while others move is interpolated linearly.
    fn interpolate(&self, t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value) -> Result<Value> {
        let (p0, v0) = motion(s0)?;
        let (p1, v1) = motion(s1)?;
        check_length(p0.len(), v0.len())?;
        check_length(p0.len(), p1.len())?;
        check_length(p0.len(), v1.len())?;

        let resting = v0.iter().chain(v1).all(|v| *v == 0.0);
        if t == t0 || t0 == t1 || resting {
            return Ok(Value::Vector(p0.to_vec()));
        }

        let span = t1 - t0;
        let dt = t - t0;
        let position = (0..p0.len())
            .map(|i| {
                let a = (v1[i] - v0[i]) / span;
                let d = v0[i] * span + 0.5 * a * span * span;
                if d == 0.0 {
                    p0[i] + (p1[i] - p0[i]) * dt / span
                } else {
                    let dd = v0[i] * dt + 0.5 * a * dt * dt;
                    p0[i] + (p1[i] - p0[i]) / d * dd
                }
            })
            .collect();
        Ok(Value::Vector(position))
    }
}

fn motion(value: &Value) -> Result<(&[f64], &[f64])> {
    match value {
        Value::Motion { position, velocity } => Ok((position.as_slice(), velocity.as_slice())),
        other => Err(TrajectoryError::TypeMismatch {
            policy: "constant acceleration",
            found: other.kind(),
        }),
    }
}

fn check_length(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(TrajectoryError::LengthMismatch { expected, found });
    }
    Ok(())
}

/// Policy selectable by name, from configuration or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMethod {
    #[default]
    Linear,
    StepHold,
    ConstantAcceleration,
}

impl Interpolation for InterpolationMethod {
    fn interpolate(&self, t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value) -> Result<Value> {
        match self {
            InterpolationMethod::Linear => Linear.interpolate(t, t0, s0, t1, s1),
            InterpolationMethod::StepHold => StepHold.interpolate(t, t0, s0, t1, s1),
            InterpolationMethod::ConstantAcceleration => {
                ConstantAcceleration.interpolate(t, t0, s0, t1, s1)
            }
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::StepHold => "step-hold",
            InterpolationMethod::ConstantAcceleration => "constant-acceleration",
        };
        f.write_str(name)
    }
}

impl FromStr for InterpolationMethod {
    type Err = TrajectoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(InterpolationMethod::Linear),
            "step-hold" | "last" => Ok(InterpolationMethod::StepHold),
            "constant-acceleration" => Ok(InterpolationMethod::ConstantAcceleration),
            other => Err(TrajectoryError::precondition(format!(
                "unknown interpolation method '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: &Value) -> f64 {
        value.as_scalar().expect("scalar expected")
    }

    #[test]
    fn test_linear_endpoints_exact() {
        let s0 = Value::Scalar(0.3);
        let s1 = Value::Scalar(7.7);
        assert_eq!(Linear.interpolate(1.0, 1.0, &s0, 2.0, &s1), Ok(s0.clone()));
        assert_eq!(Linear.interpolate(2.0, 1.0, &s0, 2.0, &s1), Ok(s1.clone()));
    }

    #[test]
    fn test_linear_midpoint() {
        let value = Linear
            .interpolate(5.0, 0.0, &Value::Scalar(0.0), 10.0, &Value::Scalar(20.0))
            .expect("scalars interpolate");
        assert_eq!(scalar(&value), 10.0);
    }

    #[test]
    fn test_linear_duplicate_timestamps() {
        let s0 = Value::Scalar(1.0);
        let value = Linear.interpolate(3.0, 3.0, &s0, 3.0, &Value::Scalar(2.0)).expect("degenerate");
        assert_eq!(value, s0);
    }

    #[test]
    fn test_linear_vectors() {
        let value = Linear
            .interpolate(0.25, 0.0, &Value::Vector(vec![0.0, 4.0]), 1.0, &Value::Vector(vec![4.0, 0.0]))
            .expect("vectors interpolate");
        assert_eq!(value, Value::Vector(vec![1.0, 3.0]));
    }

    #[test]
    fn test_linear_rejects_mismatches() {
        let err = Linear
            .interpolate(0.5, 0.0, &Value::Vector(vec![0.0]), 1.0, &Value::Vector(vec![0.0, 1.0]))
            .unwrap_err();
        assert_eq!(err, TrajectoryError::LengthMismatch { expected: 1, found: 2 });

        let motion = Value::Motion { position: vec![0.0], velocity: vec![0.0] };
        let err = Linear.interpolate(0.5, 0.0, &motion, 1.0, &motion).unwrap_err();
        assert_eq!(err, TrajectoryError::TypeMismatch { policy: "linear", found: "motion" });

        let err = Linear.interpolate(0.5, 0.0, &Value::Scalar(0.0), 1.0, &Value::Vector(vec![1.0])).unwrap_err();
        assert_eq!(err, TrajectoryError::TypeMismatch { policy: "linear", found: "vector" });
    }

    #[test]
    fn test_step_hold_keeps_earlier() {
        let s0 = Value::Scalar(30.0);
        for t in [0.0, 0.4, 1.0] {
            assert_eq!(StepHold.interpolate(t, 0.0, &s0, 1.0, &Value::Scalar(90.0)), Ok(s0.clone()));
        }
        let motion = Value::Motion { position: vec![1.0], velocity: vec![2.0] };
        assert_eq!(StepHold.interpolate(0.5, 0.0, &motion, 1.0, &motion), Ok(motion.clone()));
    }

    #[test]
    fn test_constant_acceleration_matches_linear_at_constant_velocity() {
        let p0 = vec![0.0, 1.0, -2.0];
        let p1 = vec![3.0, 1.5, -4.0];
        let s0 = Value::Motion { position: p0.clone(), velocity: vec![0.7, 0.7, 0.7] };
        let s1 = Value::Motion { position: p1.clone(), velocity: vec![0.7, 0.7, 0.7] };

        for t in [10.0, 10.1, 10.5, 11.3, 12.0] {
            let ca = ConstantAcceleration.interpolate(t, 10.0, &s0, 12.0, &s1).expect("motion");
            let linear = Linear
                .interpolate(t, 10.0, &Value::Vector(p0.clone()), 12.0, &Value::Vector(p1.clone()))
                .expect("vector");
            let (ca, linear) = (ca.into_vec(), linear.into_vec());
            for (a, b) in ca.iter().zip(&linear) {
                assert!((a - b).abs() < 1e-12, "t = {t}: {ca:?} vs {linear:?}");
            }
        }
    }

    #[test]
    fn test_constant_acceleration_from_rest() {
        // Starting from rest and accelerating: a quarter of the way at half the time.
        let s0 = Value::Motion { position: vec![0.0], velocity: vec![0.0] };
        let s1 = Value::Motion { position: vec![1.0], velocity: vec![2.0] };
        let value = ConstantAcceleration.interpolate(0.5, 0.0, &s0, 1.0, &s1).expect("motion");
        assert_eq!(value, Value::Vector(vec![0.25]));

        let end = ConstantAcceleration.interpolate(1.0, 0.0, &s0, 1.0, &s1).expect("motion");
        assert_eq!(end, Value::Vector(vec![1.0]));
    }

    #[test]
    fn test_constant_acceleration_degenerate() {
        let s0 = Value::Motion { position: vec![1.0, 2.0], velocity: vec![0.0, 0.0] };
        let s1 = Value::Motion { position: vec![5.0, 6.0], velocity: vec![0.0, 0.0] };
        let expected = Value::Vector(vec![1.0, 2.0]);
        // both at rest
        assert_eq!(ConstantAcceleration.interpolate(0.5, 0.0, &s0, 1.0, &s1), Ok(expected.clone()));
        // t == t0
        let moving = Value::Motion { position: vec![5.0, 6.0], velocity: vec![1.0, 1.0] };
        assert_eq!(ConstantAcceleration.interpolate(0.0, 0.0, &s0, 1.0, &moving), Ok(expected.clone()));
        // t0 == t1
        assert_eq!(ConstantAcceleration.interpolate(1.0, 1.0, &s0, 1.0, &moving), Ok(expected));
    }

    #[test]
    fn test_constant_acceleration_idle_axis_is_linear() {
        // Second axis has no velocity at either end but the position still changed.
        let s0 = Value::Motion { position: vec![0.0, 0.0], velocity: vec![1.0, 0.0] };
        let s1 = Value::Motion { position: vec![1.0, 4.0], velocity: vec![1.0, 0.0] };
        let value = ConstantAcceleration.interpolate(0.25, 0.0, &s0, 1.0, &s1).expect("motion");
        assert_eq!(value, Value::Vector(vec![0.25, 1.0]));
    }

    #[test]
    fn test_constant_acceleration_requires_motion() {
        let err = ConstantAcceleration
            .interpolate(0.5, 0.0, &Value::Scalar(1.0), 1.0, &Value::Scalar(2.0))
            .unwrap_err();
        assert!(matches!(err, TrajectoryError::TypeMismatch { found: "scalar", .. }));
    }

    #[test]
    fn test_closure_policy() {
        let nearest = |t: f64, t0: f64, s0: &Value, t1: f64, s1: &Value| -> Result<Value> {
            Ok(if t - t0 <= t1 - t { s0.clone() } else { s1.clone() })
        };
        let value = nearest.interpolate(0.9, 0.0, &Value::Scalar(1.0), 1.0, &Value::Scalar(2.0));
        assert_eq!(value, Ok(Value::Scalar(2.0)));
    }

    #[test]
    fn test_method_names() {
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::StepHold,
            InterpolationMethod::ConstantAcceleration,
        ] {
            assert_eq!(method.to_string().parse::<InterpolationMethod>(), Ok(method));
        }
        assert!("cubic".parse::<InterpolationMethod>().is_err());
    }
}
