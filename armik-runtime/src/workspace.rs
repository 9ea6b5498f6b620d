use serde::Deserialize;

use crate::core::{InverseKinematics, JointAngles, Solution, Target};

/// Axis aligned box the generated targets must stay in.
///
/// The solver itself only rejects targets behind the base, any other limit
/// must be enforced by the caller before solving.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Lower and upper x limit.
    pub x: (f64, f64),
    /// Lower and upper y limit.
    pub y: (f64, f64),
    /// Lower and upper z limit.
    pub z: (f64, f64),
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: (-150.0, 150.0),
            y: (-100.0, 200.0),
            z: (0.0, 150.0),
        }
    }
}

impl Bounds {
    /// Whether every lower limit is below its upper limit.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.z]
            .iter()
            .all(|(lower, upper)| lower <= upper)
    }

    /// Whether the target lies within the bounds.
    pub fn contains(&self, target: &Target) -> bool {
        let within = |value: f64, (lower, upper): (f64, f64)| value >= lower && value <= upper;

        within(target.point.x, self.x)
            && within(target.point.y, self.y)
            && within(target.point.z, self.z)
    }

    /// Clamp the target into the bounds.
    pub fn clamp(&self, target: &Target) -> Target {
        Target::new(
            target.point.x.clamp(self.x.0, self.x.1),
            target.point.y.clamp(self.y.0, self.y.1),
            target.point.z.clamp(self.z.0, self.z.1),
        )
    }
}

/// Reachable grid point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Grid coordinate.
    pub coord: [i32; 3],
    /// Solved joint angles.
    pub angles: JointAngles,
}

/// Outcome of a workspace sampling run.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// All reachable grid points.
    pub reachable: Vec<Sample>,
    /// Number of unreachable grid points.
    pub unreachable: usize,
}

impl Report {
    /// Number of sampled grid points.
    pub fn total(&self) -> usize {
        self.reachable.len() + self.unreachable
    }

    /// Fraction of the grid that is reachable.
    pub fn ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.reachable.len() as f64 / self.total() as f64
        }
    }
}

/// Samples the workspace of an arm on a regular grid.
///
/// The grid spans `[-M, M]` on the x and z axis and `[0, M + h]` on the y
/// axis, where `M` is the reach of the arm plus the margin and `h` the base
/// height. Unreachable points are only counted.
pub struct Sampler {
    step: u32,
    margin: u32,
}

impl Sampler {
    pub fn new(step: u32, margin: u32) -> Self {
        Self {
            step: step.max(1),
            margin,
        }
    }

    /// Sample the grid with the given solver.
    pub fn run(&self, solver: &InverseKinematics) -> Report {
        let geometry = solver.geometry();

        let limit = (geometry.max_reach() + self.margin as f64) as i32;
        let height = limit + geometry.base_height as i32;
        let step = self.step as usize;

        log::debug!(
            "Sampling workspace x/z [{}, {}], y [0, {}], step {}",
            -limit,
            limit,
            height,
            step
        );

        let mut report = Report::default();

        for x in (-limit..=limit).step_by(step) {
            for y in (0..=height).step_by(step) {
                for z in (-limit..=limit).step_by(step) {
                    match solver.solve(&Target::from([x, y, z])) {
                        Solution::Reachable(angles) => report.reachable.push(Sample {
                            coord: [x, y, z],
                            angles,
                        }),
                        Solution::Unreachable => report.unreachable += 1,
                    }
                }
            }
        }

        log::debug!(
            "Sampled {} points, {} reachable",
            report.total(),
            report.reachable.len()
        );

        report
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(10, 10)
    }
}
