//! Mapping between raw actuator units and calibrated joint angles
//!
//! Each axis is related by a fixed affine map:
//! `calibrated = raw / ratio + offset`, and back `raw = (calibrated - offset) * ratio`.
//! Ratios carry the reduction of the drive train and may be negative when the hardware turns
//! the other way than the kinematic model. Offsets fix a zero position mismatch between the
//! physical rig and the model.

use crate::kinematic_traits::Joints;

/// Reduction ratios of the PAROL6 drive trains. Signs follow the direction of the model.
pub const PAROL6_RATIOS: [f64; 6] = [-6.0, -20.0, 20.0, -4.0, -4.0, -10.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    ratios: [f64; 6],
    offsets: [f64; 6],
}

impl AxisTransform {
    /// Creates a transform from per-axis signed reduction ratios and zero offsets (radians).
    /// Ratios must be finite and non-zero; this is checked when loading from file.
    pub fn new(ratios: [f64; 6], offsets: [f64; 6]) -> Self {
        debug_assert!(ratios.iter().all(|r| r.is_finite() && *r != 0.0), "bad ratios {ratios:?}");
        AxisTransform { ratios, offsets }
    }

    /// Raw units are already radians.
    pub fn identity() -> Self {
        Self::new([1.0; 6], [0.0; 6])
    }

    pub fn parol6() -> Self {
        Self::new(PAROL6_RATIOS, [0.0; 6])
    }

    pub fn ratios(&self) -> &[f64; 6] {
        &self.ratios
    }

    pub fn offsets(&self) -> &[f64; 6] {
        &self.offsets
    }

    pub fn to_calibrated(&self, raw: &Joints) -> Joints {
        std::array::from_fn(|i| raw[i] / self.ratios[i] + self.offsets[i])
    }

    pub fn to_raw(&self, calibrated: &Joints) -> Joints {
        std::array::from_fn(|i| (calibrated[i] - self.offsets[i]) * self.ratios[i])
    }
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self::parol6()
    }
}
