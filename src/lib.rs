//! Cartesian shifts for six-axis arms planned by resolved-rate motion control, and resampling
//! of the multi-rate telemetry such arms produce
//!
//! # Planning
//!
//! The arm reports joint positions in raw actuator units. An [axis_transform::AxisTransform]
//! maps them to calibrated joint angles, a [kinematic_traits::KinematicOracle] provides the
//! forward kinematics and the Jacobian, and the [planner::ResolvedRatePlanner] integrates
//! the joint velocity that drives the tool toward a pose displaced by a Cartesian offset in
//! the tool frame. The result is a short list of raw waypoints plus an `arrived` flag.
//!
//! Any robot with a parallel base and spherical wrist can serve as oracle through
//! [kinematics_impl::OpwOracle], configured from the seven OPW parameters (_a1, a2, b, c1,
//! c2, c3_, and _c4_). A tool or base transform can be added with [tool::Tool] and
//! [tool::Base].
//!
//! # Resampling
//!
//! Telemetry streams arrive at different rates. [resampler::resample] interpolates a sparse
//! keyframe stream at arbitrary target timestamps with a pluggable
//! [interpolation::Interpolation] policy, [downsampler::downsample] interpolates a discrete
//! state stream linearly onto a grid (holding the first and last state beyond its ends), and
//! [merge::merge] concatenates streams
//! that share a time grid. [assembler::assemble] runs the whole chain for an arm and a
//! gripper, and [episode] turns the result into dataset frames.
//!
//! # Features
//!
//! - `allow_filesystem` (default): the YAML rig reader [rig_from_file] and the
//!   `rs-arm-trajectory` command line tool.

pub mod kinematic_traits;
pub mod jacobian;
#[path = "utils/utils.rs"]
pub mod utils;

pub mod parameters;
pub mod kinematics_impl;
pub mod tool;

pub mod axis_transform;
pub mod error;
pub mod servo;
pub mod planner;

#[path = "timeseries/samples.rs"]
pub mod samples;
#[path = "timeseries/interpolation.rs"]
pub mod interpolation;
#[path = "timeseries/resampler.rs"]
pub mod resampler;
#[path = "timeseries/keyframe_source.rs"]
pub mod keyframe_source;
#[path = "timeseries/downsampler.rs"]
pub mod downsampler;
#[path = "timeseries/merge.rs"]
pub mod merge;
#[path = "timeseries/assembler.rs"]
pub mod assembler;
#[path = "timeseries/episode.rs"]
pub mod episode;

#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;
#[cfg(feature = "allow_filesystem")]
pub mod rig_from_file;

#[cfg(test)]
mod tests;
