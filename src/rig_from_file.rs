//! Reads the rig description (axis calibration, planner tuning, arm geometry) from YAML
//!
//! ```yaml
//! axis_transform:
//!   ratios: [-6, -20, 20, -4, -4, -10]
//!   offsets: [0, 0, deg(90), 0, 0, 0]
//! planner:
//!   max_iterations: 10
//!   gain: 1.0
//!   threshold: 0.2
//!   timestep: 0.5
//!   max_joint_speed: 1.0
//! robot:
//!   a1: 0.0235
//!   a2: -0.042
//!   b: 0.0
//!   c1: 0.1105
//!   c2: 0.18
//!   c3: 0.1765
//!   c4: 0.045
//!   offsets: [0, 0, deg(-90), 0, 0, deg(180)]
//!   sign_corrections: [1, 1, 1, 1, 1, 1]
//! ```
//! Only `axis_transform.ratios` is mandatory. Angles are radians unless written as `deg(x)`.

use std::path::Path;
use std::sync::Arc;

use yaml_rust2::{Yaml, YamlLoader};

use crate::axis_transform::AxisTransform;
use crate::kinematic_traits::KinematicOracle;
use crate::kinematics_impl::OpwOracle;
use crate::parameter_error::ParameterError;
use crate::parameters::Parameters;
use crate::planner::{PlannerParameters, ResolvedRatePlanner};
use crate::utils::yaml_real;

/// Everything needed to build a planner for one physical arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    pub transform: AxisTransform,
    pub planner: PlannerParameters,
    /// Geometry of the arm; the PAROL6 sized preset is used when absent.
    pub robot: Option<Parameters>,
}

impl Default for Rig {
    fn default() -> Self {
        Rig {
            transform: AxisTransform::parol6(),
            planner: PlannerParameters::default(),
            robot: None,
        }
    }
}

impl Rig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let doc = docs
            .first()
            .ok_or_else(|| ParameterError::ParseError("empty document".to_string()))?;

        let transform_section = section(doc, "axis_transform")?
            .ok_or_else(|| ParameterError::MissingField("axis_transform".to_string()))?;
        let ratios = six_numbers(transform_section, "ratios", false)?
            .ok_or_else(|| ParameterError::MissingField("axis_transform.ratios".to_string()))?;
        for (i, ratio) in ratios.iter().enumerate() {
            if !ratio.is_finite() || *ratio == 0.0 {
                return Err(ParameterError::ParseError(format!(
                    "ratios[{i}] must be finite and non-zero (got {ratio})"
                )));
            }
        }
        let offsets = six_numbers(transform_section, "offsets", true)?.unwrap_or([0.0; 6]);
        check_finite("axis_transform.offsets", &offsets)?;

        let planner = match section(doc, "planner")? {
            Some(section) => read_planner(section)?,
            None => PlannerParameters::default(),
        };

        let robot = match section(doc, "robot")? {
            Some(section) => Some(read_robot(section)?),
            None => None,
        };

        Ok(Rig {
            transform: AxisTransform::new(ratios, offsets),
            planner,
            robot,
        })
    }

    pub fn oracle(&self) -> Arc<dyn KinematicOracle> {
        Arc::new(OpwOracle::new(self.robot.unwrap_or_else(Parameters::parol6)))
    }

    pub fn resolved_rate_planner(&self) -> ResolvedRatePlanner {
        ResolvedRatePlanner::new(self.oracle(), self.transform).with_parameters(self.planner)
    }

    /// Convert to string yaml representation, readable by [Rig::from_yaml_str]. Angles are
    /// written in radians so that reading them back gives the same values.
    pub fn to_yaml(&self) -> String {
        let join = |values: &[f64]| values.iter().map(yaml_real).collect::<Vec<_>>().join(", ");
        let p = &self.planner;
        let mut yaml = format!(
            "axis_transform:\n  \
              ratios: [{}]\n  \
              offsets: [{}]\n\
            planner:\n  \
              max_iterations: {}\n  \
              gain: {:?}\n  \
              threshold: {:?}\n  \
              timestep: {:?}\n  \
              max_joint_speed: {:?}\n",
            join(self.transform.ratios()),
            join(self.transform.offsets()),
            p.max_iterations,
            p.gain,
            p.threshold,
            p.timestep,
            p.max_joint_speed,
        );
        if let Some(robot) = &self.robot {
            yaml.push_str(&robot.to_yaml());
        }
        yaml
    }
}

fn section<'a>(doc: &'a Yaml, name: &str) -> Result<Option<&'a Yaml>, ParameterError> {
    match &doc[name] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        value @ Yaml::Hash(_) => Ok(Some(value)),
        _ => Err(ParameterError::ParseError(format!("'{name}' must be a mapping"))),
    }
}

fn read_planner(section: &Yaml) -> Result<PlannerParameters, ParameterError> {
    let defaults = PlannerParameters::default();
    let positive = |name: &str, default: f64| -> Result<f64, ParameterError> {
        match optional_number(section, name, false)? {
            None => Ok(default),
            Some(v) if v.is_finite() && v > 0.0 => Ok(v),
            Some(v) => Err(ParameterError::ParseError(format!(
                "planner.{name} must be finite and positive (got {v})"
            ))),
        }
    };

    let max_iterations = match &section["max_iterations"] {
        Yaml::BadValue | Yaml::Null => defaults.max_iterations,
        Yaml::Integer(n) if *n >= 1 => *n as usize,
        other => {
            return Err(ParameterError::ParseError(format!(
                "planner.max_iterations must be a positive integer (got {other:?})"
            )))
        }
    };

    Ok(PlannerParameters {
        max_iterations,
        gain: positive("gain", defaults.gain)?,
        threshold: positive("threshold", defaults.threshold)?,
        timestep: positive("timestep", defaults.timestep)?,
        max_joint_speed: positive("max_joint_speed", defaults.max_joint_speed)?,
    })
}

fn read_robot(section: &Yaml) -> Result<Parameters, ParameterError> {
    let required = |name: &str| -> Result<f64, ParameterError> {
        let value = optional_number(section, name, false)?
            .ok_or_else(|| ParameterError::MissingField(format!("robot.{name}")))?;
        if !value.is_finite() {
            return Err(ParameterError::ParseError(format!(
                "geometric parameter '{name}' must be finite (got {value})"
            )));
        }
        Ok(value)
    };

    let offsets = six_numbers(section, "offsets", true)?.unwrap_or([0.0; 6]);
    check_finite("robot.offsets", &offsets)?;

    let sign_corrections = match six_numbers(section, "sign_corrections", false)? {
        None => [1; 6],
        Some(values) => {
            let mut signs = [1i8; 6];
            for (i, value) in values.iter().enumerate() {
                signs[i] = match *value {
                    v if v == 1.0 => 1,
                    v if v == -1.0 => -1,
                    v => {
                        return Err(ParameterError::ParseError(format!(
                            "sign_corrections[{i}] must be -1 or 1 (got {v})"
                        )))
                    }
                };
            }
            signs
        }
    };

    Ok(Parameters {
        a1: required("a1")?,
        a2: required("a2")?,
        b: required("b")?,
        c1: required("c1")?,
        c2: required("c2")?,
        c3: required("c3")?,
        c4: required("c4")?,
        offsets,
        sign_corrections,
    })
}

fn check_finite(field: &str, values: &[f64; 6]) -> Result<(), ParameterError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ParameterError::ParseError(format!(
            "{field}[{i}] must be finite (got {})",
            values[i]
        ))),
        None => Ok(()),
    }
}

/// Reads a sequence of exactly six numbers, `None` if the key is absent.
fn six_numbers(section: &Yaml, name: &str, angles: bool) -> Result<Option<[f64; 6]>, ParameterError> {
    let items = match &section[name] {
        Yaml::BadValue | Yaml::Null => return Ok(None),
        Yaml::Array(items) => items,
        _ => return Err(ParameterError::ParseError(format!("'{name}' must be a sequence"))),
    };
    if items.len() != 6 {
        return Err(ParameterError::InvalidLength {
            field: name.to_string(),
            expected: 6,
            found: items.len(),
        });
    }
    let mut values = [0.0; 6];
    for (value, item) in values.iter_mut().zip(items) {
        *value = number(item, name, angles)?;
    }
    Ok(Some(values))
}

fn optional_number(section: &Yaml, name: &str, angles: bool) -> Result<Option<f64>, ParameterError> {
    match &section[name] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        value => number(value, name, angles).map(Some),
    }
}

fn number(value: &Yaml, name: &str, angles: bool) -> Result<f64, ParameterError> {
    match value {
        Yaml::Integer(n) => Ok(*n as f64),
        Yaml::Real(_) => value
            .as_f64()
            .ok_or_else(|| ParameterError::ParseError(format!("'{name}' has a malformed number"))),
        Yaml::String(text) if angles => parse_degrees(text),
        other => Err(ParameterError::ParseError(format!(
            "'{name}' must contain numbers (got {other:?})"
        ))),
    }
}

/// Parses `deg(x)` into radians.
fn parse_degrees(text: &str) -> Result<f64, ParameterError> {
    let inner = text
        .trim()
        .strip_prefix("deg(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ParameterError::WrongAngle(text.to_string()))?;
    inner
        .trim()
        .parse::<f64>()
        .map(f64::to_radians)
        .map_err(|_| ParameterError::WrongAngle(text.to_string()))
}
