//! Helper functions

use crate::kinematic_traits::Joints;
use nalgebra::{Isometry3, UnitQuaternion, Vector6};
use tracing::debug;

/// Checks if all elements in the array are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Log joint values, converting radians to degrees.
pub fn dump_joints(label: &str, joints: &Joints) {
    let mut row_str = String::new();
    for joint in joints {
        row_str.push_str(&format!("{:5.2} ", joint.to_degrees()));
    }
    debug!("{label}: [{}]", row_str.trim_end());
}

/// Log a path of joint values as degrees, one line per waypoint.
pub fn dump_path(path: &[Joints]) {
    if path.is_empty() {
        debug!("Empty path");
    }
    for (index, joints) in path.iter().enumerate() {
        dump_joints(&format!("#{index}"), joints);
    }
}

pub fn dump_pose(label: &str, isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    debug!(
        "{label}: x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// formatting for YAML output, reads back to exactly the same value
pub(crate) fn yaml_real(x: &f64) -> String {
    format!("{x:?}")
}

/// Converts ```nalgebra::Vector6<f64>``` to Joints ([f64; 6])
pub fn vector6_to_joints(v: Vector6<f64>) -> Joints {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Converts ```Joints ([f64; 6])``` to a ```Vector6<f64>```
pub fn joints_to_vector6(j: Joints) -> Vector6<f64> {
    Vector6::new(j[0], j[1], j[2], j[3], j[4], j[5])
}

/// Euclidean norm of the joint vector.
pub fn joints_norm(j: &Joints) -> f64 {
    j.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Largest absolute per-axis difference between two joint vectors.
pub fn max_difference(a: &Joints, b: &Joints) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Panics if the two poses differ more than the given tolerances. Returns true otherwise,
/// so it can be used inside assert!.
pub fn assert_pose_eq(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                      distance_tolerance: f64, angular_tolerance: f64) -> bool {
    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        dump_pose("left", ta);
        dump_pose("right", tb);
        panic!("Poses have too different translations: {translation_distance}");
    }

    if angular_distance.abs() > angular_tolerance {
        dump_pose("left", ta);
        dump_pose("right", tb);
        panic!("Poses have too different angles: {angular_distance}");
    }
    true
}
