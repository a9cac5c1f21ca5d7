//! Telemetry records as they come out of the record store and go into the dataset

use serde::{Deserialize, Serialize};

use crate::kinematic_traits::Joints;

/// Value carried by a keyframe. Streams are dynamically shaped: the gripper reports a scalar,
/// the arm a joint vector, and some streams report position together with velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    Motion { position: Vec<f64>, velocity: Vec<f64> },
}

impl Value {
    /// Short name of the shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Motion { .. } => "motion",
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Values flattened to a vector; a motion contributes its position.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Value::Scalar(v) => vec![v],
            Value::Vector(v) => v,
            Value::Motion { position, .. } => position,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl From<Joints> for Value {
    fn from(v: Joints) -> Self {
        Value::Vector(v.to_vec())
    }
}

/// One record of a time series. Series are sorted by timestamp (non-decreasing); the functions
/// of this crate check the order but never sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedSample {
    pub timestamp: f64,
    pub value: Value,
}

impl KeyedSample {
    pub fn new(timestamp: f64, value: impl Into<Value>) -> Self {
        KeyedSample { timestamp, value: value.into() }
    }

    pub fn motion(timestamp: f64, position: Vec<f64>, velocity: Vec<f64>) -> Self {
        KeyedSample { timestamp, value: Value::Motion { position, velocity } }
    }
}

/// Discrete scalar state of a slowly changing stream, like the gripper aperture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSample {
    pub timestamp: f64,
    pub state: f64,
}

impl StateSample {
    pub fn new(timestamp: f64, state: f64) -> Self {
        StateSample { timestamp, state }
    }
}

/// Aligned record of the reconstructed trajectory: the observed state and the goal the
/// system was heading to (the following state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub timestamp: f64,
    pub state: Vec<f64>,
    pub goal: Vec<f64>,
}

/// Returns the index of the first element breaking non-decreasing order, if any.
pub(crate) fn first_unsorted<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    items
        .windows(2)
        .position(|pair| key(&pair[1]) < key(&pair[0]))
        .map(|i| i + 1)
}
