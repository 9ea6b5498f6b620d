use crate::core::{InverseKinematics, Solution, Target};
use crate::workspace::Bounds;

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Evenly spaced values over `[start, stop]`, both ends included.
///
/// A single sample yields only `start`.
pub fn linspace(start: f64, stop: f64, samples: usize) -> impl Iterator<Item = f64> {
    let divisor = samples.saturating_sub(1).max(1) as f64;

    (0..samples).map(move |i| lerp(start, stop, i as f64 / divisor))
}

/// Sequence of targets for the arm to follow.
pub trait Path {
    /// All targets of the path in order.
    fn targets(&self) -> Vec<Target>;
}

/// Horizontal arc around the yaw axis at a fixed height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    /// Radius around the yaw axis.
    pub radius: f64,
    /// Height of the arc.
    pub height: f64,
    /// Arc sweep in degrees, starting at the positive x axis.
    pub sweep: f64,
    /// Number of targets on the arc.
    pub samples: usize,
}

impl Arc {
    /// Full circle.
    pub fn circle(radius: f64, height: f64, samples: usize) -> Self {
        Self {
            radius,
            height,
            sweep: 360.0,
            samples,
        }
    }

    /// Half circle in front of the base.
    pub fn semicircle(radius: f64, height: f64, samples: usize) -> Self {
        Self {
            radius,
            height,
            sweep: 180.0,
            samples,
        }
    }
}

impl Path for Arc {
    fn targets(&self) -> Vec<Target> {
        linspace(0.0, self.sweep, self.samples)
            .map(|angle| {
                let angle = angle.to_radians();
                Target::new(
                    self.radius * angle.cos(),
                    self.height,
                    self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// Straight line between two targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub from: Target,
    pub to: Target,
    pub samples: usize,
}

impl Line {
    pub fn new(from: Target, to: Target, samples: usize) -> Self {
        Self { from, to, samples }
    }
}

impl Path for Line {
    fn targets(&self) -> Vec<Target> {
        linspace(0.0, 1.0, self.samples)
            .map(|t| {
                Target::new(
                    lerp(self.from.point.x, self.to.point.x, t),
                    lerp(self.from.point.y, self.to.point.y, t),
                    lerp(self.from.point.z, self.to.point.z, t),
                )
            })
            .collect()
    }
}

/// Drive a sequence of targets through the solver.
///
/// Yields every target with its solution. Targets are clamped into the bounds
/// first, if any are set.
pub struct Sweep<'a, I> {
    solver: &'a InverseKinematics,
    targets: I,
    bounds: Option<Bounds>,
}

impl<'a, I: Iterator<Item = Target>> Sweep<'a, I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(solver: &'a InverseKinematics, targets: T) -> Self {
        Self {
            solver,
            targets: targets.into_iter(),
            bounds: None,
        }
    }

    /// Clamp all targets into the bounds before solving.
    pub fn bounded(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl<'a, I: Iterator<Item = Target>> Iterator for Sweep<'a, I> {
    type Item = (Target, Solution);

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.targets.next()?;
        let target = match &self.bounds {
            Some(bounds) if !bounds.contains(&target) => {
                let clamped = bounds.clamp(&target);
                log::debug!("Target {} clamped to {}", target, clamped);
                clamped
            }
            _ => target,
        };

        Some((target, self.solver.solve(&target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(-100.0, 100.0, 1.0), 100.0);
    }

    #[test]
    fn test_linspace() {
        let values: Vec<f64> = linspace(0.0, 360.0, 5).collect();
        assert_eq!(values, vec![0.0, 90.0, 180.0, 270.0, 360.0]);

        assert_eq!(linspace(5.0, 10.0, 1).collect::<Vec<_>>(), vec![5.0]);
        assert_eq!(linspace(5.0, 10.0, 0).count(), 0);
    }

    #[test]
    fn test_circle() {
        let targets = Arc::circle(100.0, -100.0, 360).targets();

        assert_eq!(targets.len(), 360);
        assert_eq!(targets[0], Target::new(100.0, -100.0, 0.0));

        let tolerance = 1e-9;
        let last = targets.last().unwrap();
        assert!((last.point.x - 100.0).abs() < tolerance);
        assert!(last.point.z.abs() < tolerance);

        for target in &targets {
            assert!((target.radius() - 100.0).abs() < tolerance);
            assert_eq!(target.point.y, -100.0);
        }
    }

    #[test]
    fn test_semicircle_in_front() {
        let targets = Arc::semicircle(100.0, 120.0, 37).targets();

        assert_eq!(targets.len(), 37);
        assert!(targets.iter().all(|target| target.point.z >= -1e-9));
    }

    #[test]
    fn test_line() {
        let line = Line::new(
            Target::new(-50.0, 100.0, 50.0),
            Target::new(50.0, 120.0, 50.0),
            3,
        );

        assert_eq!(
            line.targets(),
            vec![
                Target::new(-50.0, 100.0, 50.0),
                Target::new(0.0, 110.0, 50.0),
                Target::new(50.0, 120.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_sweep_skips_behind_base() {
        let solver = InverseKinematics::default();
        let targets = Arc::circle(100.0, -100.0, 360).targets();

        let (reachable, unreachable): (Vec<_>, Vec<_>) =
            Sweep::new(&solver, targets).partition(|(_, solution)| solution.is_reachable());

        assert!(!reachable.is_empty());
        assert!(!unreachable.is_empty());
        assert!(reachable.iter().all(|(target, _)| target.is_front()));
    }

    #[test]
    fn test_sweep_bounded() {
        let solver = InverseKinematics::default();
        let targets = vec![Target::new(0.0, 150.0, -50.0)];

        let (target, solution) = Sweep::new(&solver, targets)
            .bounded(Bounds::default())
            .next()
            .unwrap();

        assert_eq!(target, Target::new(0.0, 150.0, 0.0));
        assert!(solution.is_reachable());
    }

    #[test]
    fn test_sweep_bounded_keeps_inside() {
        let solver = InverseKinematics::default();
        let targets = vec![Target::new(90.0, 90.0, 90.0), Target::new(-200.0, 90.0, 90.0)];

        let clamped: Vec<Target> = Sweep::new(&solver, targets)
            .bounded(Bounds::default())
            .map(|(target, _)| target)
            .collect();

        assert_eq!(
            clamped,
            vec![Target::new(90.0, 90.0, 90.0), Target::new(-150.0, 90.0, 90.0)]
        );
    }
}
