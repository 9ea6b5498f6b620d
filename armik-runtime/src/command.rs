use crate::core::{JointAngles, Solution};

/// Servo command line understood by the arm firmware.
///
/// The line holds the base, shoulder and elbow angles in whole degrees,
/// optionally followed by the two gripper servo angles, separated by a
/// single space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServoCommand {
    /// Arm joint angles.
    pub angles: JointAngles,
    /// Gripper servo angles.
    pub gripper: Option<(u8, u8)>,
}

impl ServoCommand {
    pub fn new(angles: JointAngles) -> Self {
        Self {
            angles,
            gripper: None,
        }
    }

    pub fn with_gripper(angles: JointAngles, gripper: (u8, u8)) -> Self {
        Self {
            angles,
            gripper: Some(gripper),
        }
    }

    /// Build a command from a solution.
    ///
    /// Returns `None` if the target is unreachable, nothing must be sent in
    /// that case.
    pub fn from_solution(solution: Solution) -> Option<Self> {
        solution.angles().map(Self::new)
    }

    /// Command line terminated by a newline.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl std::fmt::Display for ServoCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.angles)?;

        if let Some((left, right)) = self.gripper {
            write!(f, " {} {}", left, right)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line() {
        let command = ServoCommand::new(JointAngles::new(135, 119, 87));

        assert_eq!(command.to_line(), "135 119 87\n");
    }

    #[test]
    fn test_line_gripper() {
        let command = ServoCommand::with_gripper(JointAngles::new(90, 154, 90), (0, 180));

        assert_eq!(command.to_line(), "90 154 90 0 180\n");
    }

    #[test]
    fn test_unreachable() {
        assert_eq!(ServoCommand::from_solution(Solution::Unreachable), None);
        assert_eq!(
            ServoCommand::from_solution(Solution::Reachable(JointAngles::new(1, 2, 3))),
            Some(ServoCommand::new(JointAngles::new(1, 2, 3)))
        );
    }
}
