pub mod algorithm;
pub mod geometry;
pub mod joint;
pub mod target;

pub use nalgebra;

pub use self::algorithm::fk::ForwardKinematics;
pub use self::algorithm::ik::{solve, InverseKinematics};
pub use self::geometry::ArmGeometry;
pub use self::joint::{JointAngles, JointOffset, JointRotation, Solution};
pub use self::target::Target;
