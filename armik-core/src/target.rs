use nalgebra::Point3;

/// Cartesian target for the arm effector.
///
/// The frame origin is the base rotation pivot, the y axis points up and
/// the arm only works in the half space `z >= 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    /// The point in space.
    pub point: Point3<f64>,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            point: Point3::origin(),
        }
    }
}

impl Target {
    /// Construct a new target
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point3::new(x, y, z),
        }
    }

    /// Horizontal distance from the yaw axis.
    #[inline]
    pub fn radius(&self) -> f64 {
        (self.point.x.powi(2) + self.point.z.powi(2)).sqrt()
    }

    /// Whether the target lies in the front half space of the arm.
    #[inline]
    pub fn is_front(&self) -> bool {
        self.point.z >= 0.0
    }

    /// Whether all coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.point.coords.iter().all(|c| c.is_finite())
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2})",
            self.point.x, self.point.y, self.point.z,
        )
    }
}

impl From<[f64; 3]> for Target {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<&[f64; 3]> for Target {
    fn from([x, y, z]: &[f64; 3]) -> Self {
        Self::new(*x, *y, *z)
    }
}

impl From<[i32; 3]> for Target {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x as f64, y as f64, z as f64)
    }
}

impl From<Point3<f64>> for Target {
    fn from(point: Point3<f64>) -> Self {
        Self { point }
    }
}
