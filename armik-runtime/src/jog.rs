use crate::command::ServoCommand;
use crate::config::{Config, GripperConfig};
use crate::core::{InverseKinematics, Target};
use crate::workspace::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    fn sign(&self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gripper {
    Open,
    Closed,
}

impl std::fmt::Display for Gripper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gripper::Open => write!(f, "OPEN"),
            Gripper::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Manual control input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JogCommand {
    /// Move one step along an axis.
    Move(Axis, Direction),
    /// Open or close the gripper.
    ToggleGripper,
    /// Return to the home position.
    Reset,
    /// Print the help.
    Help,
    /// Stop jogging.
    Quit,
}

impl std::str::FromStr for JogCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_lowercase().as_str() {
            "x+" => JogCommand::Move(Axis::X, Direction::Positive),
            "x-" => JogCommand::Move(Axis::X, Direction::Negative),
            "y+" => JogCommand::Move(Axis::Y, Direction::Positive),
            "y-" => JogCommand::Move(Axis::Y, Direction::Negative),
            "z+" | "f" => JogCommand::Move(Axis::Z, Direction::Positive),
            "z-" | "b" => JogCommand::Move(Axis::Z, Direction::Negative),
            "g" | "gripper" => JogCommand::ToggleGripper,
            "r" | "reset" => JogCommand::Reset,
            "?" | "help" => JogCommand::Help,
            "q" | "quit" => JogCommand::Quit,
            other => return Err(format!("unknown jog command '{}'", other)),
        };

        Ok(command)
    }
}

/// Bounded effector position under manual control.
///
/// Every move is clamped into the bounds. The position is not checked for
/// reachability until a command is requested.
#[derive(Clone, Debug)]
pub struct Jog {
    position: Target,
    gripper: Gripper,
    home: Target,
    step: f64,
    bounds: Bounds,
    gripper_angles: GripperConfig,
}

impl Jog {
    pub fn new(home: Target, step: f64, bounds: Bounds, gripper_angles: GripperConfig) -> Self {
        let home = bounds.clamp(&home);

        Self {
            position: home,
            gripper: Gripper::Closed,
            home,
            step,
            bounds,
            gripper_angles,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jog.home.into(),
            config.jog.step,
            config.bounds,
            config.gripper,
        )
    }

    #[inline]
    pub fn position(&self) -> &Target {
        &self.position
    }

    #[inline]
    pub fn gripper(&self) -> Gripper {
        self.gripper
    }

    /// Move one step along the axis.
    ///
    /// Returns whether the position changed.
    pub fn jog(&mut self, axis: Axis, direction: Direction) -> bool {
        let delta = self.step * direction.sign();

        let mut point = self.position.point;
        match axis {
            Axis::X => point.x += delta,
            Axis::Y => point.y += delta,
            Axis::Z => point.z += delta,
        }

        let position = self.bounds.clamp(&point.into());
        if position == self.position {
            return false;
        }

        self.position = position;
        true
    }

    pub fn toggle_gripper(&mut self) -> Gripper {
        self.gripper = match self.gripper {
            Gripper::Open => Gripper::Closed,
            Gripper::Closed => Gripper::Open,
        };
        self.gripper
    }

    /// Return to the home position with the gripper closed.
    pub fn reset(&mut self) {
        self.position = self.home;
        self.gripper = Gripper::Closed;
    }

    /// Apply a jog command.
    ///
    /// Returns whether the arm must be commanded again.
    pub fn apply(&mut self, command: JogCommand) -> bool {
        match command {
            JogCommand::Move(axis, direction) => self.jog(axis, direction),
            JogCommand::ToggleGripper => {
                let gripper = self.toggle_gripper();
                log::info!("Gripper: {}", gripper);
                true
            }
            JogCommand::Reset => {
                self.reset();
                log::info!("Reset to home position");
                true
            }
            JogCommand::Help | JogCommand::Quit => false,
        }
    }

    /// Servo command for the current position.
    ///
    /// Returns `None` if the position is unreachable.
    pub fn command(&self, solver: &InverseKinematics) -> Option<ServoCommand> {
        let angles = solver.solve(&self.position).angles()?;

        let gripper = match self.gripper {
            Gripper::Open => self.gripper_angles.open,
            Gripper::Closed => self.gripper_angles.closed,
        };

        Some(ServoCommand::with_gripper(angles, gripper))
    }
}

impl Default for Jog {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
