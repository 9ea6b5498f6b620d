use serde::Deserialize;

use crate::geometry::within_half_turn;

/// Servo zero position calibration in degrees.
///
/// The offset is added to the shoulder and elbow solutions, the base is
/// never offset. The firmware uses the same offset for both joints, see
/// [`JointOffset::uniform`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct JointOffset {
    /// Shoulder offset in degrees.
    pub shoulder: f64,
    /// Elbow offset in degrees.
    pub elbow: f64,
}

impl JointOffset {
    /// Construct an offset with independent shoulder and elbow values.
    pub fn new(shoulder: f64, elbow: f64) -> Self {
        Self { shoulder, elbow }
    }

    /// Same offset for the shoulder and the elbow.
    pub fn uniform(degrees: f64) -> Self {
        Self::new(degrees, degrees)
    }
}

impl Default for JointOffset {
    fn default() -> Self {
        Self::uniform(60.0)
    }
}

impl From<f64> for JointOffset {
    fn from(degrees: f64) -> Self {
        Self::uniform(degrees)
    }
}

/// Joint angles in whole degrees as understood by the servos.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointAngles {
    /// Base yaw.
    pub base: u8,
    /// Shoulder pitch, offset included.
    pub shoulder: u8,
    /// Elbow pitch, offset included.
    pub elbow: u8,
}

impl JointAngles {
    /// Construct new joint angles.
    pub fn new(base: u8, shoulder: u8, elbow: u8) -> Self {
        Self {
            base,
            shoulder,
            elbow,
        }
    }
}

impl std::fmt::Display for JointAngles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.base, self.shoulder, self.elbow)
    }
}

/// Continuous joint rotations in radians, offset included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointRotation {
    /// Base yaw.
    pub base: f64,
    /// Shoulder pitch.
    pub shoulder: f64,
    /// Elbow pitch.
    pub elbow: f64,
}

impl JointRotation {
    /// Construct new joint rotations.
    pub fn new(base: f64, shoulder: f64, elbow: f64) -> Self {
        Self {
            base,
            shoulder,
            elbow,
        }
    }

    /// Truncate the rotations to whole degrees.
    ///
    /// Angles are truncated toward zero, never rounded. The rotations must
    /// already lie within `[0, π]`.
    pub fn truncate(&self) -> JointAngles {
        fn degrees(angle: f64) -> u8 {
            debug_assert!(within_half_turn(angle), "rotation {} out of range", angle);
            angle.to_degrees().trunc() as u8
        }

        JointAngles {
            base: degrees(self.base),
            shoulder: degrees(self.shoulder),
            elbow: degrees(self.elbow),
        }
    }
}

impl From<JointAngles> for JointRotation {
    fn from(angles: JointAngles) -> Self {
        Self {
            base: (angles.base as f64).to_radians(),
            shoulder: (angles.shoulder as f64).to_radians(),
            elbow: (angles.elbow as f64).to_radians(),
        }
    }
}

impl std::fmt::Display for JointRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "base {:5.2}rad {:6.2}° shoulder {:5.2}rad {:6.2}° elbow {:5.2}rad {:6.2}°",
            self.base,
            self.base.to_degrees(),
            self.shoulder,
            self.shoulder.to_degrees(),
            self.elbow,
            self.elbow.to_degrees()
        )
    }
}

/// Outcome of an inverse kinematics solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Solution {
    /// The target can be reached with these angles.
    Reachable(JointAngles),
    /// No joint configuration reaches the target.
    Unreachable,
}

impl Solution {
    /// Whether the target was reachable.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self, Solution::Reachable(_))
    }

    /// Joint angles, if reachable.
    #[inline]
    pub fn angles(&self) -> Option<JointAngles> {
        match self {
            Solution::Reachable(angles) => Some(*angles),
            Solution::Unreachable => None,
        }
    }
}

impl From<Option<JointAngles>> for Solution {
    fn from(value: Option<JointAngles>) -> Self {
        value.map_or(Solution::Unreachable, Solution::Reachable)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Reachable(angles) => write!(f, "{}", angles),
            Solution::Unreachable => write!(f, "unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_toward_zero() {
        let rotation = JointRotation::new(
            45.9_f64.to_radians(),
            134.575_f64.to_radians(),
            0.7_f64.to_radians(),
        );

        assert_eq!(rotation.truncate(), JointAngles::new(45, 134, 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_truncate_out_of_range() {
        JointRotation::new(0.0, -0.1, 1.0).truncate();
    }

    #[test]
    fn test_angles_display() {
        assert_eq!(JointAngles::new(135, 119, 87).to_string(), "135 119 87");
    }

    #[test]
    fn test_solution() {
        let solution = Solution::from(Some(JointAngles::new(90, 90, 90)));
        assert!(solution.is_reachable());
        assert_eq!(solution.angles(), Some(JointAngles::new(90, 90, 90)));

        assert!(!Solution::Unreachable.is_reachable());
        assert_eq!(Solution::Unreachable.angles(), None);
        assert_eq!(Solution::Unreachable.to_string(), "unreachable");
    }

    #[test]
    fn test_uniform_offset() {
        assert_eq!(JointOffset::from(60.0), JointOffset::new(60.0, 60.0));
    }
}
