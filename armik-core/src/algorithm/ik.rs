use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{arccos, law_of_cosines, within_half_turn, ArmGeometry};
use crate::joint::{JointOffset, JointRotation, Solution};
use crate::target::Target;

/// Solve the inverse kinematics for a single target.
///
/// Shorthand for [`InverseKinematics::solve`].
pub fn solve(geometry: &ArmGeometry, target: &Target, offset: impl Into<JointOffset>) -> Solution {
    InverseKinematics::new(*geometry, offset.into()).solve(target)
}

/// Closed form inverse kinematics for a base, shoulder and elbow arm.
///
/// Only the elbow up configuration is computed. Any target that cannot be
/// reached, whether outside the front half space, beyond the triangle formed
/// by the segments or outside the servo range, results in
/// [`Solution::Unreachable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseKinematics {
    geometry: ArmGeometry,
    offset: JointOffset,
}

impl InverseKinematics {
    pub fn new(geometry: ArmGeometry, offset: JointOffset) -> Self {
        Self { geometry, offset }
    }

    #[inline]
    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    #[inline]
    pub fn offset(&self) -> &JointOffset {
        &self.offset
    }

    /// Solve the target into whole servo degrees.
    pub fn solve(&self, target: &Target) -> Solution {
        self.solve_rotation(target)
            .map(|rotation| rotation.truncate())
            .into()
    }

    /// Solve the target into continuous joint rotations.
    ///
    /// The rotations include the joint offset and are all within `[0, π]`.
    pub fn solve_rotation(&self, target: &Target) -> Option<JointRotation> {
        if !target.is_finite() {
            log::debug!("IK target {} is not finite", target);
            return None;
        }

        if !target.is_front() {
            log::debug!("IK target {} is behind the base", target);
            return None;
        }

        let x = target.point.x;
        let y = target.point.y;
        let z = target.point.z;

        // Shoulder pivot sits above the base pivot.
        let local_y = y - self.geometry.base_height;
        log::trace!(" IK Local Y:        {:.2}", local_y);

        // Radius of the target around the yaw axis.
        let r = target.radius();
        log::trace!(" IK Radius:         {:.2}", r);

        // Chord between the target and the point on the same circle at zero yaw.
        let d = ((x - r).powi(2) + z.powi(2)).sqrt();
        log::trace!(" IK Chord:          {:.2}", d);

        if d > 2.0 * r {
            log::debug!("IK target {} chord exceeds base circle", target);
            return None;
        }

        let theta = if r != 0.0 {
            arccos(1.0 - (d.powi(2) / 2.0 / r.powi(2)))?
        } else {
            0.0
        };

        // Zero heading of the base is the negative x axis.
        let base = PI - theta;
        log::trace!(" IK Base:           {:5.2}rad {:6.2}°", base, base.to_degrees());

        if !within_half_turn(base) {
            log::debug!("IK target {} base out of range", target);
            return None;
        }

        // Leg between the shoulder and the target in the arm plane.
        let a = (r.powi(2) + y.powi(2)).sqrt();
        log::trace!(" IK Vector length A: {:.2}", a);

        let phi = y.atan2(r);
        let psi = match law_of_cosines(self.geometry.segment1, a, self.geometry.segment2) {
            Some(psi) => psi,
            None => {
                log::debug!("IK target {} outside shoulder triangle", target);
                return None;
            }
        };

        let shoulder = phi + psi + self.offset.shoulder.to_radians();
        log::trace!(
            " IK Shoulder:       {:5.2}rad {:6.2}°",
            shoulder,
            shoulder.to_degrees()
        );

        if !within_half_turn(shoulder) {
            log::debug!("IK target {} shoulder out of range", target);
            return None;
        }

        let c = match law_of_cosines(self.geometry.segment1, self.geometry.segment2, a) {
            Some(c) => c,
            None => {
                log::debug!("IK target {} outside elbow triangle", target);
                return None;
            }
        };

        let elbow = c - FRAC_PI_2 + self.offset.elbow.to_radians();
        log::trace!(
            " IK Elbow:          {:5.2}rad {:6.2}°",
            elbow,
            elbow.to_degrees()
        );

        if !within_half_turn(elbow) {
            log::debug!("IK target {} elbow out of range", target);
            return None;
        }

        Some(JointRotation::new(base, shoulder, elbow))
    }
}

impl Default for InverseKinematics {
    fn default() -> Self {
        Self::new(ArmGeometry::default(), JointOffset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::joint::JointAngles;

    fn solver() -> InverseKinematics {
        InverseKinematics::new(ArmGeometry::new(50.0, 110.0, 71.0), JointOffset::uniform(60.0))
    }

    #[test]
    fn test_reachable_target() {
        let solution = solver().solve(&Target::new(90.0, 90.0, 90.0));

        assert_eq!(solution, Solution::Reachable(JointAngles::new(135, 119, 87)));
    }

    #[test]
    fn test_free_function() {
        let geometry = ArmGeometry::new(50.0, 110.0, 71.0);

        assert_eq!(
            solve(&geometry, &Target::new(90.0, 90.0, 90.0), 60.0),
            solver().solve(&Target::new(90.0, 90.0, 90.0))
        );
    }

    #[test]
    fn test_behind_base() {
        let solver = solver();

        assert_eq!(solver.solve(&Target::new(90.0, 90.0, -0.001)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(0.0, 150.0, -50.0)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(-90.0, 0.0, -1.0)), Solution::Unreachable);
    }

    #[test]
    fn test_beyond_reach() {
        let solver = solver();

        assert_eq!(solver.solve(&Target::new(0.0, 182.0, 0.0)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(0.0, 231.0, 0.0)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(150.0, 150.0, 150.0)), Solution::Unreachable);
    }

    #[test]
    fn test_too_close() {
        let solver = solver();

        assert_eq!(solver.solve(&Target::new(0.0, 0.0, 0.0)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(10.0, 10.0, 10.0)), Solution::Unreachable);
    }

    #[test]
    fn test_fully_extended() {
        let rotation = solver().solve_rotation(&Target::new(0.0, 181.0, 0.0)).unwrap();

        let tolerance = 1e-9;
        assert!((rotation.base - PI).abs() < tolerance);
        assert!((rotation.shoulder - 150.0_f64.to_radians()).abs() < tolerance);
        assert!((rotation.elbow - 150.0_f64.to_radians()).abs() < tolerance);
    }

    #[test]
    fn test_yaw_axis() {
        let angles = solver()
            .solve(&Target::new(0.0, 181.0, 0.0))
            .angles()
            .unwrap();

        assert_eq!(angles.base, 180);
    }

    #[test]
    fn test_base_heading() {
        let solver = solver();

        assert_eq!(
            solver.solve(&Target::new(100.0, 0.0, 0.0)),
            Solution::Reachable(JointAngles::new(180, 99, 32))
        );
        assert_eq!(
            solver.solve(&Target::new(-100.0, 0.0, 0.0)),
            Solution::Reachable(JointAngles::new(0, 99, 32))
        );
        assert_eq!(
            solver.solve(&Target::new(0.0, 100.0, 100.0)),
            Solution::Reachable(JointAngles::new(90, 134, 70))
        );
    }

    #[test]
    fn test_truncation() {
        // Exact angles are 134.58° and 70.55°.
        let angles = solver()
            .solve(&Target::new(0.0, 100.0, 100.0))
            .angles()
            .unwrap();

        assert_eq!(angles.shoulder, 134);
        assert_eq!(angles.elbow, 70);
    }

    #[test]
    fn test_shoulder_range() {
        let geometry = ArmGeometry::new(50.0, 110.0, 71.0);
        let target = Target::new(90.0, 90.0, 90.0);

        assert_eq!(
            solve(&geometry, &target, 120.0),
            Solution::Reachable(JointAngles::new(135, 179, 147))
        );
        assert_eq!(solve(&geometry, &target, 121.0), Solution::Unreachable);
    }

    #[test]
    fn test_elbow_range() {
        let geometry = ArmGeometry::new(50.0, 110.0, 71.0);
        let target = Target::new(90.0, 90.0, 90.0);

        assert_eq!(
            solve(&geometry, &target, -27.0),
            Solution::Reachable(JointAngles::new(135, 32, 0))
        );
        assert_eq!(solve(&geometry, &target, -28.0), Solution::Unreachable);
    }

    #[test]
    fn test_independent_offsets() {
        let solver = InverseKinematics::new(
            ArmGeometry::new(50.0, 110.0, 71.0),
            JointOffset::new(0.0, 100.0),
        );

        assert_eq!(
            solver.solve(&Target::new(90.0, 90.0, 90.0)),
            Solution::Reachable(JointAngles::new(135, 59, 127))
        );
    }

    #[test]
    fn test_not_finite() {
        let solver = solver();

        assert_eq!(solver.solve(&Target::new(f64::NAN, 90.0, 90.0)), Solution::Unreachable);
        assert_eq!(solver.solve(&Target::new(90.0, f64::INFINITY, 90.0)), Solution::Unreachable);
    }

    #[test]
    fn test_shared_between_threads() {
        let solver = std::sync::Arc::new(solver());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let solver = solver.clone();
                std::thread::spawn(move || solver.solve(&Target::new(90.0, 90.0, 90.0)))
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                Solution::Reachable(JointAngles::new(135, 119, 87))
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let solver = solver();
        let target = Target::new(-60.0, 40.0, 30.0);

        let first = solver.solve_rotation(&target).unwrap();
        for _ in 0..16 {
            let next = solver.solve_rotation(&target).unwrap();
            assert_eq!(first.base.to_bits(), next.base.to_bits());
            assert_eq!(first.shoulder.to_bits(), next.shoulder.to_bits());
            assert_eq!(first.elbow.to_bits(), next.elbow.to_bits());
        }

        assert_eq!(solver.solve(&target), Solution::Reachable(JointAngles::new(26, 130, 15)));
    }
}
