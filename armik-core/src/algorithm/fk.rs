use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Point3;

use crate::geometry::ArmGeometry;
use crate::joint::{JointOffset, JointRotation};

/// Forward kinematics matching the conventions of the inverse solver.
///
/// The arm plane is measured from the base pivot and the zero heading of the
/// base is the negative x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForwardKinematics {
    geometry: ArmGeometry,
    offset: JointOffset,
}

impl ForwardKinematics {
    pub fn new(geometry: ArmGeometry, offset: JointOffset) -> Self {
        Self { geometry, offset }
    }

    /// Effector point for the given joint rotations.
    pub fn solve(&self, rotation: &JointRotation) -> Point3<f64> {
        let shoulder = rotation.shoulder - self.offset.shoulder.to_radians();
        let elbow = rotation.elbow + FRAC_PI_2 - self.offset.elbow.to_radians();

        // Lower segment direction in the arm plane.
        let lower = shoulder - (PI - elbow);

        let r = (self.geometry.segment1 * shoulder.cos()) + (self.geometry.segment2 * lower.cos());
        let y = (self.geometry.segment1 * shoulder.sin()) + (self.geometry.segment2 * lower.sin());

        let heading = PI - rotation.base;

        Point3::new(r * heading.cos(), y, r * heading.sin())
    }
}

impl Default for ForwardKinematics {
    fn default() -> Self {
        Self::new(ArmGeometry::default(), JointOffset::default())
    }
}
